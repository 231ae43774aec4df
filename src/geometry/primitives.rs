// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Canonical value primitives: Point, Vector, Interval, Plane

use crate::units::Units;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A located point. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub units: Units,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, units: Units) -> Self {
        Self { x, y, z, units }
    }

    pub fn from_position(p: Point3<f64>, units: Units) -> Self {
        Self::new(p.x, p.y, p.z, units)
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.position() - other.position()).norm()
    }
}

/// A free direction. Deliberately a distinct type from [`Point`]: a
/// vector has no location and never scales through the UoR factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub units: Units,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64, units: Units) -> Self {
        Self { x, y, z, units }
    }

    pub fn from_direction(v: Vector3<f64>, units: Units) -> Self {
        Self::new(v.x, v.y, v.z, units)
    }

    pub fn direction(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// A parameter range. Reversed intervals (start > end) are legal and
/// meaningful; they encode sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The curve-domain convention: parametrized from zero to length.
    pub fn from_length(length: f64) -> Self {
        Self::new(0.0, length)
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).abs()
    }
}

/// An oriented plane frame: origin plus an orthonormal (xdir, ydir,
/// normal) triad with normal = xdir x ydir up to sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point,
    pub normal: Vector,
    pub xdir: Vector,
    pub ydir: Vector,
    pub units: Units,
}

impl Plane {
    pub fn new(origin: Point, normal: Vector, xdir: Vector, ydir: Vector) -> Self {
        let units = origin.units;
        Self {
            origin,
            normal,
            xdir,
            ydir,
            units,
        }
    }

    /// Frame from raw nalgebra parts. Directions are normalized; ydir
    /// is re-orthogonalized against xdir so the triad stays orthonormal
    /// even for slightly skewed native input.
    pub fn from_frame(
        origin: Point3<f64>,
        xdir: Vector3<f64>,
        ydir: Vector3<f64>,
        units: Units,
    ) -> Self {
        let x = xdir.normalize();
        let n = x.cross(&ydir).normalize();
        let y = n.cross(&x);
        Self {
            origin: Point::from_position(origin, units),
            normal: Vector::from_direction(n, units),
            xdir: Vector::from_direction(x, units),
            ydir: Vector::from_direction(y, units),
            units,
        }
    }

    /// The world ground plane at `origin`.
    pub fn world_xy(origin: Point3<f64>, units: Units) -> Self {
        Self {
            origin: Point::from_position(origin, units),
            normal: Vector::new(0.0, 0.0, 1.0, units),
            xdir: Vector::new(1.0, 0.0, 0.0, units),
            ydir: Vector::new(0.0, 1.0, 0.0, units),
            units,
        }
    }

    /// Evaluate the plane at local (u, v) coordinates.
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        self.origin.position() + self.xdir.direction() * u + self.ydir.direction() * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0, 0.0, Units::Meters);
        let b = Point::new(3.0, 4.0, 0.0, Units::Meters);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_interval_is_legal() {
        let i = Interval::new(5.0, 1.0);
        assert_eq!(i.length(), 4.0);
        assert!(i.start > i.end);
    }

    #[test]
    fn test_plane_frame_orthonormal() {
        // Deliberately skewed ydir
        let p = Plane::from_frame(
            Point3::origin(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.3, 1.0, 0.0),
            Units::Meters,
        );
        let x = p.xdir.direction();
        let y = p.ydir.direction();
        let n = p.normal.direction();
        assert!(x.dot(&y).abs() < 1e-12);
        assert!((x.cross(&y) - n).norm() < 1e-12);
        assert!((n.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_point_at() {
        let p = Plane::world_xy(Point3::new(1.0, 2.0, 3.0), Units::Meters);
        let q = p.point_at(2.0, -1.0);
        assert_eq!(q, Point3::new(3.0, 1.0, 3.0));
    }
}
