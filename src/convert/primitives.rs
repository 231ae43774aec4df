// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Primitive conversions: points, vectors, intervals, planes
//!
//! Positions scale through the UoR factor; directions do not.

use crate::geometry::{Interval, Plane, Point, Vector};
use crate::units::ScaleContext;
use nalgebra::{Point3, Vector3};

pub fn point_to_canonical(p: &Point3<f64>, ctx: &ScaleContext) -> Point {
    Point::new(
        ctx.to_canonical(p.x),
        ctx.to_canonical(p.y),
        ctx.to_canonical(p.z),
        ctx.units,
    )
}

pub fn point_to_native(p: &Point, ctx: &ScaleContext) -> Point3<f64> {
    Point3::new(
        ctx.to_native(p.x, p.units),
        ctx.to_native(p.y, p.units),
        ctx.to_native(p.z, p.units),
    )
}

pub fn vector_to_canonical(v: &Vector3<f64>, ctx: &ScaleContext) -> Vector {
    Vector::from_direction(*v, ctx.units)
}

pub fn vector_to_native(v: &Vector) -> Vector3<f64> {
    v.direction()
}

pub fn interval_to_canonical(start_uor: f64, end_uor: f64, ctx: &ScaleContext) -> Interval {
    Interval::new(ctx.to_canonical(start_uor), ctx.to_canonical(end_uor))
}

pub fn interval_to_native(i: &Interval, ctx: &ScaleContext) -> (f64, f64) {
    (
        ctx.to_native(i.start, ctx.units),
        ctx.to_native(i.end, ctx.units),
    )
}

pub fn plane_to_canonical(
    origin: &Point3<f64>,
    xdir: &Vector3<f64>,
    ydir: &Vector3<f64>,
    ctx: &ScaleContext,
) -> Plane {
    let origin = point_to_canonical(origin, ctx);
    Plane::from_frame(origin.position(), *xdir, *ydir, ctx.units)
}

pub fn plane_to_native(plane: &Plane, ctx: &ScaleContext) -> (Point3<f64>, Vector3<f64>, Vector3<f64>) {
    (
        point_to_native(&plane.origin, ctx),
        plane.xdir.direction(),
        plane.ydir.direction(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Units;
    use approx::assert_relative_eq;

    fn all_units() -> [Units; 8] {
        [
            Units::Millimeters,
            Units::Centimeters,
            Units::Meters,
            Units::Kilometers,
            Units::Inches,
            Units::Feet,
            Units::Yards,
            Units::Miles,
        ]
    }

    #[test]
    fn test_point_roundtrip_all_units() {
        for units in all_units() {
            let ctx = ScaleContext::new(8192.0, units);
            let native = Point3::new(12345.6, -777.25, 0.5);
            let canonical = point_to_canonical(&native, &ctx);
            assert_eq!(canonical.units, units);
            let back = point_to_native(&canonical, &ctx);
            assert_relative_eq!((back - native).norm(), 0.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_vector_does_not_scale() {
        let ctx = ScaleContext::new(1000.0, Units::Millimeters);
        let native = Vector3::new(0.0, 0.0, 1.0);
        let canonical = vector_to_canonical(&native, &ctx);
        assert_eq!(canonical.z, 1.0);
        assert_eq!(vector_to_native(&canonical), native);
    }

    #[test]
    fn test_interval_roundtrip_all_units() {
        for units in all_units() {
            let ctx = ScaleContext::new(100.0, units);
            let i = interval_to_canonical(500.0, 150.0, &ctx);
            // Reversed intervals survive
            assert!(i.start > i.end);
            let (s, e) = interval_to_native(&i, &ctx);
            assert_relative_eq!(s, 500.0, epsilon = 1e-9);
            assert_relative_eq!(e, 150.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_plane_roundtrip_all_units() {
        let origin = Point3::new(100.0, 200.0, 300.0);
        let xdir = Vector3::new(0.0, 1.0, 0.0);
        let ydir = Vector3::new(0.0, 0.0, 1.0);
        for units in all_units() {
            let ctx = ScaleContext::new(10.0, units);
            let plane = plane_to_canonical(&origin, &xdir, &ydir, &ctx);
            assert_eq!(plane.units, units);
            assert_relative_eq!(plane.normal.x, 1.0, epsilon = 1e-12);
            let (o, x, y) = plane_to_native(&plane, &ctx);
            assert_relative_eq!((o - origin).norm(), 0.0, epsilon = 1e-9);
            assert_relative_eq!((x - xdir).norm(), 0.0, epsilon = 1e-12);
            assert_relative_eq!((y - ydir).norm(), 0.0, epsilon = 1e-12);
        }
    }
}
