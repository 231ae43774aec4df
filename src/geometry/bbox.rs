// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Canonical bounding box
//!
//! Every curve, surface and mesh result carries one of these as a
//! denormalized summary. Area and volume are always precomputed from
//! the three size intervals, never left for lazy computation.

use super::primitives::{Interval, Plane};
use crate::units::Units;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub base_plane: Plane,
    pub x_size: Interval,
    pub y_size: Interval,
    pub z_size: Interval,
    pub area: f64,
    pub volume: f64,
    pub units: Units,
}

impl BoundingBox {
    pub fn new(
        base_plane: Plane,
        x_size: Interval,
        y_size: Interval,
        z_size: Interval,
        units: Units,
    ) -> Self {
        let dx = x_size.length();
        let dy = y_size.length();
        let dz = z_size.length();
        Self {
            base_plane,
            x_size,
            y_size,
            z_size,
            area: 2.0 * (dx * dy + dy * dz + dz * dx),
            volume: dx * dy * dz,
            units,
        }
    }

    /// World-axis-aligned box spanning `min`..`max`, based at the min
    /// corner on the world ground plane.
    pub fn world_aligned(min: Point3<f64>, max: Point3<f64>, units: Units) -> Self {
        Self::new(
            Plane::world_xy(min, units),
            Interval::new(0.0, max.x - min.x),
            Interval::new(0.0, max.y - min.y),
            Interval::new(0.0, max.z - min.z),
            units,
        )
    }

    /// World-aligned box of a point cloud. Empty input collapses to a
    /// zero box at the origin.
    pub fn from_points<'a, I>(points: I, units: Units) -> Self
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = match iter.next() {
            Some(p) => p,
            None => return Self::world_aligned(Point3::origin(), Point3::origin(), units),
        };
        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Self::world_aligned(min, max, units)
    }

    /// Box of flattened x,y,z triples (the wire layout of polylines,
    /// meshes and control-point arrays).
    pub fn from_flat_coords(coords: &[f64], units: Units) -> Self {
        Self::from_points(
            coords
                .chunks_exact(3)
                .map(|c| Point3::new(c[0], c[1], c[2])),
            units,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_volume_precomputed() {
        let b = BoundingBox::world_aligned(
            Point3::origin(),
            Point3::new(2.0, 3.0, 4.0),
            Units::Meters,
        );
        assert!((b.volume - 24.0).abs() < 1e-12);
        assert!((b.area - 52.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_points() {
        let b = BoundingBox::from_points(
            vec![
                Point3::new(1.0, 2.0, 3.0),
                Point3::new(-1.0, 5.0, 0.0),
                Point3::new(0.0, 0.0, 7.0),
            ],
            Units::Millimeters,
        );
        assert_eq!(b.base_plane.origin.x, -1.0);
        assert_eq!(b.x_size.end, 2.0);
        assert_eq!(b.y_size.end, 5.0);
        assert_eq!(b.z_size.end, 7.0);
    }

    #[test]
    fn test_empty_points_collapse() {
        let b = BoundingBox::from_points(std::iter::empty(), Units::Meters);
        assert_eq!(b.volume, 0.0);
    }
}
