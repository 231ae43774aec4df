// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Canonical mesh representation
//!
//! Faces use the loop-count-prefix encoding: each face record starts
//! with its vertex count followed by that many zero-based vertex
//! indices. Headers below 3 are the legacy shorthand kept for format
//! compatibility: 0 means triangle, 1 means quad (header + 3 vertices
//! follow).

use super::bbox::BoundingBox;
use crate::error::ConvertError;
use crate::units::Units;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Flattened x,y,z vertex triples.
    pub vertices: Vec<f64>,
    /// Loop-count-prefixed face records.
    pub faces: Vec<i32>,
    pub units: Units,
    pub bbox: BoundingBox,
}

impl Mesh {
    pub fn new(vertices: Vec<f64>, faces: Vec<i32>, units: Units) -> Self {
        let bbox = BoundingBox::from_flat_coords(&vertices, units);
        Self {
            vertices,
            faces,
            units,
            bbox,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn vertex(&self, i: usize) -> Point3<f64> {
        Point3::new(
            self.vertices[3 * i],
            self.vertices[3 * i + 1],
            self.vertices[3 * i + 2],
        )
    }

    /// Decode the face records into index loops, resolving the legacy
    /// 0/1 headers.
    pub fn face_loops(&self) -> Result<Vec<Vec<usize>>, ConvertError> {
        let mut loops = Vec::new();
        let mut i = 0;
        while i < self.faces.len() {
            let header = self.faces[i];
            if header < 0 {
                return Err(ConvertError::InvalidGeometry(format!(
                    "negative face header {} at offset {}",
                    header, i
                )));
            }
            let n = if header < 3 { header + 3 } else { header } as usize;
            if i + 1 + n > self.faces.len() {
                return Err(ConvertError::InvalidGeometry(format!(
                    "face record at offset {} runs past the end",
                    i
                )));
            }
            let mut indices = Vec::with_capacity(n);
            for k in 0..n {
                let v = self.faces[i + 1 + k];
                if v < 0 || v as usize >= self.vertex_count() {
                    return Err(ConvertError::InvalidGeometry(format!(
                        "vertex index {} out of range",
                        v
                    )));
                }
                indices.push(v as usize);
            }
            loops.push(indices);
            i += 1 + n;
        }
        Ok(loops)
    }
}
