// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Bounding-box derivation from native extent blocks

use super::primitives::point_to_canonical;
use crate::geometry::{BoundingBox, Interval, Plane};
use crate::native::NativeRange;
use crate::units::ScaleContext;
use nalgebra::{Point3, Vector3};

/// Derive a canonical box from a native axis-aligned range.
///
/// Ground-plane geometry (both Z extents zero) gets a world-XY base
/// plane, as does a point extent whose diagonal is below tolerance
/// (normalizing it would produce a NaN frame). Anything else gets a
/// base plane derived from the range's diagonal via cross products;
/// the size intervals stay axis-local world extents either way.
pub fn range_to_canonical(range: &NativeRange, ctx: &ScaleContext) -> BoundingBox {
    let low = point_to_canonical(&range.low, ctx).position();
    let high = point_to_canonical(&range.high, ctx).position();
    let diag = high - low;
    let flat = range.low.z == 0.0 && range.high.z == 0.0;

    let base_plane = if flat || diag.norm() <= ctx.tolerance {
        Plane::world_xy(low, ctx.units)
    } else {
        let xdir = diag.normalize();
        let mut ydir = Vector3::z().cross(&xdir);
        if ydir.norm() < 1e-12 {
            // Diagonal parallel to world Z
            ydir = Vector3::x().cross(&xdir);
        }
        Plane::from_frame(low, xdir, ydir, ctx.units)
    };

    BoundingBox::new(
        base_plane,
        Interval::new(0.0, high.x - low.x),
        Interval::new(0.0, high.y - low.y),
        Interval::new(0.0, high.z - low.z),
        ctx.units,
    )
}

/// Rebuild a native range from a canonical box. The box corner is its
/// base-plane origin; extents are the world-axis size intervals.
pub fn box_to_native(bbox: &BoundingBox, ctx: &ScaleContext) -> NativeRange {
    let origin = &bbox.base_plane.origin;
    let low = super::primitives::point_to_native(origin, ctx);
    let to_uor = |v: f64| ctx.to_native(v, bbox.units);
    let high = Point3::new(
        low.x + to_uor(bbox.x_size.length()),
        low.y + to_uor(bbox.y_size.length()),
        low.z + to_uor(bbox.z_size.length()),
    );
    NativeRange { low, high }
}
