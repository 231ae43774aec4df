// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Mesh codec between host polyface data and the canonical flat
//! encoding
//!
//! Host `point_index` arrays are 1-based with `0` as loop terminator.
//! Canonical face records carry a loop-count prefix; headers below 3
//! are the legacy triangle/quad shorthand, understood on the encode
//! path for backward compatibility.

use super::primitives::{point_to_canonical, point_to_native};
use crate::error::ConvertError;
use crate::geometry::{GeometryElement, Mesh, Point};
use crate::native::NativeMeshElement;
use crate::units::ScaleContext;

pub fn mesh_to_canonical(
    mesh: &NativeMeshElement,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    let mut vertices = Vec::with_capacity(mesh.points.len() * 3);
    for p in &mesh.points {
        let c = point_to_canonical(p, ctx);
        vertices.extend_from_slice(&[c.x, c.y, c.z]);
    }

    let mut faces: Vec<i32> = Vec::with_capacity(mesh.point_index.len());
    let mut run: Vec<i32> = Vec::new();
    for &v in &mesh.point_index {
        if v == 0 {
            // Loop terminator; runs shorter than a triangle are noise
            if run.len() >= 3 {
                faces.push(run.len() as i32);
                faces.append(&mut run);
            } else {
                run.clear();
            }
        } else {
            if v < 0 {
                return Err(ConvertError::InvalidGeometry(format!(
                    "negative mesh vertex reference {}",
                    v
                )));
            }
            if v as usize > mesh.points.len() {
                return Err(ConvertError::InvalidGeometry(format!(
                    "mesh vertex reference {} exceeds {} points",
                    v,
                    mesh.points.len()
                )));
            }
            run.push(v - 1);
        }
    }
    // An unterminated trailing run still forms a face
    if run.len() >= 3 {
        faces.push(run.len() as i32);
        faces.append(&mut run);
    }

    Ok(GeometryElement::Mesh(Mesh::new(vertices, faces, ctx.units)))
}

pub fn mesh_to_native(
    mesh: &Mesh,
    ctx: &ScaleContext,
) -> Result<NativeMeshElement, ConvertError> {
    let points = (0..mesh.vertex_count())
        .map(|i| {
            let p = Point::new(
                mesh.vertices[3 * i],
                mesh.vertices[3 * i + 1],
                mesh.vertices[3 * i + 2],
                mesh.units,
            );
            point_to_native(&p, ctx)
        })
        .collect();

    let mut point_index = Vec::with_capacity(mesh.faces.len());
    for indices in mesh.face_loops()? {
        for i in indices {
            point_index.push(i as i32 + 1);
        }
        point_index.push(0);
    }

    Ok(NativeMeshElement {
        points,
        point_index,
    })
}
