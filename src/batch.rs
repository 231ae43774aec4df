// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Batch conversion with per-entity error collection
//!
//! Entities arrive here as already-extracted numeric data, so the work
//! is pure math and safe to fan out across threads. Callers that still
//! hold live host handles must serialize kernel-touching extraction
//! onto one executor before batching. Failures are collected per
//! entity; siblings are unaffected and nothing is retried.

use crate::convert::convert_entity;
use crate::error::ConvertError;
use crate::geometry::GeometryElement;
use crate::native::NativeEntity;
use crate::units::ScaleContext;
use rayon::prelude::*;

#[derive(Debug)]
pub struct BatchError {
    pub index: usize,
    pub error: ConvertError,
}

#[derive(Debug)]
pub struct BatchOutcome {
    /// Successful results, in input order.
    pub elements: Vec<GeometryElement>,
    /// Per-entity failures, in input order.
    pub errors: Vec<BatchError>,
    /// Total chain segments dropped across all compound entities.
    pub dropped_segments: usize,
}

impl BatchOutcome {
    pub fn all_failed(&self) -> bool {
        self.elements.is_empty() && !self.errors.is_empty()
    }
}

/// Convert a batch of entities. Each entity is independent; there is
/// no cross-entity ordering requirement, so conversion runs in
/// parallel and results are reassembled in input order.
pub fn convert_batch(entities: &[NativeEntity], ctx: &ScaleContext) -> BatchOutcome {
    let results: Vec<_> = entities
        .par_iter()
        .map(|entity| convert_entity(entity, ctx))
        .collect();

    let mut outcome = BatchOutcome {
        elements: Vec::with_capacity(results.len()),
        errors: Vec::new(),
        dropped_segments: 0,
    };
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(converted) => {
                outcome.dropped_segments += converted.dropped.len();
                outcome.elements.push(converted.element);
            }
            Err(error) => outcome.errors.push(BatchError { index, error }),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{NativeLine, NativeTextNode};
    use crate::units::Units;
    use nalgebra::Point3;

    #[test]
    fn test_batch_isolates_failures() {
        let entities = vec![
            NativeEntity::Line(NativeLine {
                start: Point3::origin(),
                end: Point3::new(1000.0, 0.0, 0.0),
            }),
            NativeEntity::TextNode(NativeTextNode {
                origin: Point3::origin(),
            }),
            NativeEntity::Line(NativeLine {
                start: Point3::origin(),
                end: Point3::new(0.0, 1000.0, 0.0),
            }),
        ];
        let ctx = ScaleContext::new(1000.0, Units::Millimeters);
        let outcome = convert_batch(&entities, &ctx);
        assert_eq!(outcome.elements.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 1);
        assert!(!outcome.all_failed());
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let entities: Vec<NativeEntity> = (0..64)
            .map(|i| {
                NativeEntity::Line(NativeLine {
                    start: Point3::origin(),
                    end: Point3::new(1000.0 * (i + 1) as f64, 0.0, 0.0),
                })
            })
            .collect();
        let ctx = ScaleContext::new(1000.0, Units::Millimeters);
        let outcome = convert_batch(&entities, &ctx);
        assert_eq!(outcome.elements.len(), 64);
        for (i, element) in outcome.elements.iter().enumerate() {
            match element {
                GeometryElement::Line(l) => {
                    assert!((l.length - (i + 1) as f64).abs() < 1e-9);
                }
                other => panic!("expected Line, got {}", other.type_name()),
            }
        }
    }
}
