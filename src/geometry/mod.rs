// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Canonical geometry model
//!
//! The application-agnostic, serializable shapes every host converter
//! targets. Entities are created fresh per conversion call and owned by
//! their creator until handed to the serialization boundary.

mod bbox;
mod curve;
mod mesh;
mod nurbs;
mod primitives;

pub use bbox::BoundingBox;
pub use curve::{Arc, Circle, Curve, Ellipse, Line, Polycurve, Polyline};
pub use mesh::Mesh;
pub use nurbs::{NurbsCurve, NurbsSurface, DISPLAY_SEGMENTS};
pub use primitives::{Interval, Plane, Point, Vector};

use serde::{Deserialize, Serialize};

/// The closed set of canonical results a conversion can produce, one
/// variant per concrete wire type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryElement {
    Point(Point),
    Vector(Vector),
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    NurbsCurve(NurbsCurve),
    Polycurve(Polycurve),
    NurbsSurface(NurbsSurface),
    Mesh(Mesh),
    Box(BoundingBox),
}

impl GeometryElement {
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryElement::Point(_) => "Point",
            GeometryElement::Vector(_) => "Vector",
            GeometryElement::Line(_) => "Line",
            GeometryElement::Arc(_) => "Arc",
            GeometryElement::Circle(_) => "Circle",
            GeometryElement::Ellipse(_) => "Ellipse",
            GeometryElement::Polyline(_) => "Polyline",
            GeometryElement::NurbsCurve(_) => "NurbsCurve",
            GeometryElement::Polycurve(_) => "Polycurve",
            GeometryElement::NurbsSurface(_) => "NurbsSurface",
            GeometryElement::Mesh(_) => "Mesh",
            GeometryElement::Box(_) => "Box",
        }
    }

    /// The derived bounding box, for kinds that carry one.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        match self {
            GeometryElement::Point(_) | GeometryElement::Vector(_) => None,
            GeometryElement::Line(c) => Some(&c.bbox),
            GeometryElement::Arc(c) => Some(&c.bbox),
            GeometryElement::Circle(c) => Some(&c.bbox),
            GeometryElement::Ellipse(c) => Some(&c.bbox),
            GeometryElement::Polyline(c) => Some(&c.bbox),
            GeometryElement::NurbsCurve(c) => Some(&c.bbox),
            GeometryElement::Polycurve(c) => Some(&c.bbox),
            GeometryElement::NurbsSurface(s) => Some(&s.bbox),
            GeometryElement::Mesh(m) => Some(&m.bbox),
            GeometryElement::Box(b) => Some(b),
        }
    }

    /// View a curve-kind element as a [`Curve`] segment.
    pub fn into_curve(self) -> Option<Curve> {
        match self {
            GeometryElement::Line(c) => Some(Curve::Line(c)),
            GeometryElement::Arc(c) => Some(Curve::Arc(c)),
            GeometryElement::Circle(c) => Some(Curve::Circle(c)),
            GeometryElement::Ellipse(c) => Some(Curve::Ellipse(c)),
            GeometryElement::Polyline(c) => Some(Curve::Polyline(c)),
            GeometryElement::NurbsCurve(c) => Some(Curve::Nurbs(c)),
            _ => None,
        }
    }
}

impl From<Curve> for GeometryElement {
    fn from(curve: Curve) -> Self {
        match curve {
            Curve::Line(c) => GeometryElement::Line(c),
            Curve::Arc(c) => GeometryElement::Arc(c),
            Curve::Circle(c) => GeometryElement::Circle(c),
            Curve::Ellipse(c) => GeometryElement::Ellipse(c),
            Curve::Polyline(c) => GeometryElement::Polyline(c),
            Curve::Nurbs(c) => GeometryElement::NurbsCurve(c),
        }
    }
}
