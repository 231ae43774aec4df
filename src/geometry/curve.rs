// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Canonical curve types
//!
//! Angles are measured in each curve's plane frame, counter-clockwise
//! about the plane normal. Arc sweep direction is an explicit signed
//! field; negating a plane normal never flips a sweep. Every curve
//! carries a `domain` interval running from 0 to its length and a
//! world-aligned `bbox`.

use super::bbox::BoundingBox;
use super::nurbs::NurbsCurve;
use super::primitives::{Interval, Plane, Point};
use crate::units::Units;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Sample density for conic bounding boxes.
const BBOX_SAMPLES: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub units: Units,
    pub length: f64,
    pub domain: Interval,
    pub bbox: BoundingBox,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        let units = start.units;
        let length = start.distance_to(&end);
        let bbox = BoundingBox::from_points([start.position(), end.position()], units);
        Self {
            start,
            end,
            units,
            length,
            domain: Interval::from_length(length),
            bbox,
        }
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub plane: Plane,
    pub radius: f64,
    pub units: Units,
    pub length: f64,
    pub domain: Interval,
    pub bbox: BoundingBox,
}

impl Circle {
    /// `radius` must be positive; degenerate input is downgraded to a
    /// Point before this constructor is reached.
    pub fn new(plane: Plane, radius: f64, units: Units) -> Self {
        let length = TAU * radius;
        let bbox = BoundingBox::from_points(
            (0..BBOX_SAMPLES).map(|i| {
                let t = TAU * i as f64 / BBOX_SAMPLES as f64;
                plane.point_at(radius * t.cos(), radius * t.sin())
            }),
            units,
        );
        Self {
            plane,
            radius,
            units,
            length,
            domain: Interval::from_length(length),
            bbox,
        }
    }

    /// The seam point at angle zero; circles are closed, so start and
    /// end coincide.
    pub fn seam_point(&self) -> Point3<f64> {
        self.plane.point_at(self.radius, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arc {
    pub plane: Plane,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Signed sweep in radians; positive is counter-clockwise about
    /// the plane normal. `end_angle == start_angle + sweep`.
    pub sweep: f64,
    pub start_point: Point,
    pub mid_point: Point,
    pub end_point: Point,
    pub units: Units,
    pub length: f64,
    pub domain: Interval,
    pub bbox: BoundingBox,
}

impl Arc {
    pub fn new(plane: Plane, radius: f64, start_angle: f64, sweep: f64, units: Units) -> Self {
        let at = |angle: f64| plane.point_at(radius * angle.cos(), radius * angle.sin());
        let end_angle = start_angle + sweep;
        let start_point = Point::from_position(at(start_angle), units);
        let mid_point = Point::from_position(at(start_angle + sweep / 2.0), units);
        let end_point = Point::from_position(at(end_angle), units);
        let length = radius * sweep.abs();
        let bbox = BoundingBox::from_points(
            (0..=BBOX_SAMPLES).map(|i| at(start_angle + sweep * i as f64 / BBOX_SAMPLES as f64)),
            units,
        );
        Self {
            plane,
            radius,
            start_angle,
            end_angle,
            sweep,
            start_point,
            mid_point,
            end_point,
            units,
            length,
            domain: Interval::from_length(length),
            bbox,
        }
    }

    pub fn reversed(&self) -> Self {
        Self::new(
            self.plane,
            self.radius,
            self.end_angle,
            -self.sweep,
            self.units,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
    pub plane: Plane,
    pub first_radius: f64,
    pub second_radius: f64,
    pub units: Units,
    /// Ramanujan approximation of the perimeter.
    pub length: f64,
    pub domain: Interval,
    pub bbox: BoundingBox,
}

impl Ellipse {
    /// `first_radius != second_radius` by contract; equal radii are
    /// classified as Circle upstream.
    pub fn new(plane: Plane, first_radius: f64, second_radius: f64, units: Units) -> Self {
        let (a, b) = (first_radius, second_radius);
        let h = 3.0 * a + b;
        let k = a + 3.0 * b;
        let length = std::f64::consts::PI * (3.0 * (a + b) - (h * k).sqrt());
        let bbox = BoundingBox::from_points(
            (0..BBOX_SAMPLES).map(|i| {
                let t = TAU * i as f64 / BBOX_SAMPLES as f64;
                plane.point_at(a * t.cos(), b * t.sin())
            }),
            units,
        );
        Self {
            plane,
            first_radius,
            second_radius,
            units,
            length,
            domain: Interval::from_length(length),
            bbox,
        }
    }

    pub fn seam_point(&self) -> Point3<f64> {
        self.plane.point_at(self.first_radius, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Flattened x,y,z triples. A closed polyline does not repeat its
    /// first vertex; closure is the flag, not a duplicated point.
    pub value: Vec<f64>,
    pub closed: bool,
    pub units: Units,
    pub length: f64,
    pub domain: Interval,
    pub bbox: BoundingBox,
}

impl Polyline {
    pub fn new(value: Vec<f64>, closed: bool, units: Units) -> Self {
        let pts: Vec<Point3<f64>> = value
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let mut length = 0.0;
        for pair in pts.windows(2) {
            length += (pair[1] - pair[0]).norm();
        }
        if closed && pts.len() > 2 {
            length += (pts[0] - pts[pts.len() - 1]).norm();
        }
        let bbox = BoundingBox::from_points(pts, units);
        Self {
            value,
            closed,
            units,
            length,
            domain: Interval::from_length(length),
            bbox,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.value.len() / 3
    }

    pub fn vertex(&self, i: usize) -> Point3<f64> {
        Point3::new(self.value[3 * i], self.value[3 * i + 1], self.value[3 * i + 2])
    }

    pub fn reversed(&self) -> Self {
        let mut value = Vec::with_capacity(self.value.len());
        for c in self.value.chunks_exact(3).rev() {
            value.extend_from_slice(c);
        }
        Self::new(value, self.closed, self.units)
    }
}

/// The closed set of canonical curve kinds a polycurve segment (or a
/// standalone curve result) can be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Curve {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Nurbs(NurbsCurve),
}

impl Curve {
    pub fn type_name(&self) -> &'static str {
        match self {
            Curve::Line(_) => "Line",
            Curve::Arc(_) => "Arc",
            Curve::Circle(_) => "Circle",
            Curve::Ellipse(_) => "Ellipse",
            Curve::Polyline(_) => "Polyline",
            Curve::Nurbs(_) => "NurbsCurve",
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(c) => c.length,
            Curve::Arc(c) => c.length,
            Curve::Circle(c) => c.length,
            Curve::Ellipse(c) => c.length,
            Curve::Polyline(c) => c.length,
            Curve::Nurbs(c) => c.length,
        }
    }

    pub fn units(&self) -> Units {
        match self {
            Curve::Line(c) => c.units,
            Curve::Arc(c) => c.units,
            Curve::Circle(c) => c.units,
            Curve::Ellipse(c) => c.units,
            Curve::Polyline(c) => c.units,
            Curve::Nurbs(c) => c.units,
        }
    }

    /// First point of the curve; for closed conics this is the seam.
    pub fn start_pos(&self) -> Point3<f64> {
        match self {
            Curve::Line(c) => c.start.position(),
            Curve::Arc(c) => c.start_point.position(),
            Curve::Circle(c) => c.seam_point(),
            Curve::Ellipse(c) => c.seam_point(),
            Curve::Polyline(c) => c.vertex(0),
            Curve::Nurbs(c) => c.start_pos(),
        }
    }

    pub fn end_pos(&self) -> Point3<f64> {
        match self {
            Curve::Line(c) => c.end.position(),
            Curve::Arc(c) => c.end_point.position(),
            Curve::Circle(c) => c.seam_point(),
            Curve::Ellipse(c) => c.seam_point(),
            Curve::Polyline(c) => {
                if c.closed {
                    c.vertex(0)
                } else {
                    c.vertex(c.vertex_count() - 1)
                }
            }
            Curve::Nurbs(c) => c.end_pos(),
        }
    }

    /// Orientation flip. Closed conics are direction-agnostic for
    /// chaining purposes and return themselves unchanged.
    pub fn reversed(&self) -> Curve {
        match self {
            Curve::Line(c) => Curve::Line(c.reversed()),
            Curve::Arc(c) => Curve::Arc(c.reversed()),
            Curve::Circle(c) => Curve::Circle(c.clone()),
            Curve::Ellipse(c) => Curve::Ellipse(c.clone()),
            Curve::Polyline(c) => Curve::Polyline(c.reversed()),
            Curve::Nurbs(c) => Curve::Nurbs(c.reversed()),
        }
    }

    pub fn bbox(&self) -> &BoundingBox {
        match self {
            Curve::Line(c) => &c.bbox,
            Curve::Arc(c) => &c.bbox,
            Curve::Circle(c) => &c.bbox,
            Curve::Ellipse(c) => &c.bbox,
            Curve::Polyline(c) => &c.bbox,
            Curve::Nurbs(c) => &c.bbox,
        }
    }
}

/// An ordered, endpoint-continuous sequence of curve segments.
/// Continuity is enforced by the chain assembler, not assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polycurve {
    pub segments: Vec<Curve>,
    pub closed: bool,
    pub units: Units,
    pub length: f64,
    pub domain: Interval,
    pub bbox: BoundingBox,
}

impl Polycurve {
    pub fn new(segments: Vec<Curve>, closed: bool, units: Units) -> Self {
        let length: f64 = segments.iter().map(Curve::length).sum();
        // Union of the world-aligned segment boxes
        let bbox = BoundingBox::from_points(
            segments.iter().flat_map(|s| {
                let b = s.bbox();
                let min = b.base_plane.origin.position();
                let max = Point3::new(
                    min.x + b.x_size.length(),
                    min.y + b.y_size.length(),
                    min.z + b.z_size.length(),
                );
                [min, max]
            }),
            units,
        );
        Self {
            segments,
            closed,
            units,
            length,
            domain: Interval::from_length(length),
            bbox,
        }
    }
}
