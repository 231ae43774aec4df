// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Tolerance-based chain assembly
//!
//! Hosts return the component segments of a compound entity as an
//! unordered bag, in arbitrary orientation. Assembly orders them into
//! an endpoint-continuous sequence; segments that never match are
//! returned in `dropped` so callers can surface the loss instead of
//! guessing.

use crate::geometry::Curve;
use nalgebra::Point3;

/// Outcome of stitching one compound entity.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Ordered, endpoint-continuous segments.
    pub segments: Vec<Curve>,
    /// Final endpoint meets the first start within tolerance.
    pub closed: bool,
    /// Segments that matched neither end of the growing chain.
    pub dropped: Vec<Curve>,
}

impl Assembly {
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            closed: false,
            dropped: Vec::new(),
        }
    }
}

fn near(a: Point3<f64>, b: Point3<f64>, tolerance: f64) -> bool {
    (a - b).norm() <= tolerance
}

/// Stitch an unordered bag of segments into an ordered sequence.
///
/// Greedy: seed with the first segment, then repeatedly scan the pool
/// from the front for a segment whose start (or, reversed, whose end)
/// lies within `tolerance` of the current endpoint. A full pass with
/// no match stops assembly; the remainder lands in `dropped`.
pub fn assemble(mut pool: Vec<Curve>, tolerance: f64) -> Assembly {
    if pool.is_empty() {
        return Assembly::empty();
    }

    let seed = pool.remove(0);
    let first_start = seed.start_pos();
    let mut tail = seed.end_pos();
    let mut segments = vec![seed];

    loop {
        let mut matched = None;
        for (i, candidate) in pool.iter().enumerate() {
            if near(candidate.start_pos(), tail, tolerance) {
                matched = Some((i, false));
                break;
            }
            if near(candidate.end_pos(), tail, tolerance) {
                matched = Some((i, true));
                break;
            }
        }
        match matched {
            Some((i, reverse)) => {
                let mut next = pool.remove(i);
                if reverse {
                    next = next.reversed();
                }
                tail = next.end_pos();
                segments.push(next);
            }
            None => break,
        }
    }

    let closed = near(tail, first_start, tolerance);
    Assembly {
        segments,
        closed,
        dropped: pool,
    }
}
