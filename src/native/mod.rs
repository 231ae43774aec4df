// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Native-entity model
//!
//! A closed enum over the host-entity kinds the interchange layer
//! understands, extracted to plain numeric data. Coordinates are in
//! host units of resolution (UoR); directions are unit vectors and do
//! not scale. Dispatch over these kinds is an exhaustive match, not a
//! chain of dynamic type tests.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Every native entity kind with extracted geometric data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NativeEntity {
    Point(NativePoint),
    Line(NativeLine),
    LineString(NativeLineString),
    Shape(NativeShape),
    Arc(NativeArc),
    ComplexChain(NativeComplexChain),
    ComplexShape(NativeComplexShape),
    BsplineCurve(NativeBsplineCurve),
    BsplineSurface(NativeBsplineSurface),
    MeshElement(NativeMeshElement),
    Range(NativeRange),
    /// Annotation element; carries no convertible geometry.
    TextNode(NativeTextNode),
}

impl NativeEntity {
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeEntity::Point(_) => "Point",
            NativeEntity::Line(_) => "Line",
            NativeEntity::LineString(_) => "LineString",
            NativeEntity::Shape(_) => "Shape",
            NativeEntity::Arc(_) => "Arc",
            NativeEntity::ComplexChain(_) => "ComplexChain",
            NativeEntity::ComplexShape(_) => "ComplexShape",
            NativeEntity::BsplineCurve(_) => "BsplineCurve",
            NativeEntity::BsplineSurface(_) => "BsplineSurface",
            NativeEntity::MeshElement(_) => "MeshElement",
            NativeEntity::Range(_) => "Range",
            NativeEntity::TextNode(_) => "TextNode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativePoint {
    pub position: Point3<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeLine {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

/// Open run of vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeLineString {
    pub points: Vec<Point3<f64>>,
}

/// Closed planar outline. Hosts commonly repeat the first vertex as
/// the last; the converter strips that duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeShape {
    pub points: Vec<Point3<f64>>,
}

/// The host arc/ellipse primitive. One native kind that classifies
/// into four canonical shapes depending on measured properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeArc {
    pub center: Point3<f64>,
    /// Unit direction of the primary (major) axis at zero rotation.
    pub x_axis: Vector3<f64>,
    /// Unit direction of the secondary axis.
    pub y_axis: Vector3<f64>,
    /// Primary semi-axis, UoR.
    pub primary_radius: f64,
    /// Secondary semi-axis, UoR.
    pub secondary_radius: f64,
    /// Net rotation of the major axis within the arc plane, radians.
    pub rotation_angle: f64,
    /// Parametric start angle, radians.
    pub start_angle: f64,
    /// Signed sweep, radians; a full ellipse sweeps +/- 2*pi.
    pub sweep_angle: f64,
}

impl NativeArc {
    /// Effective axis directions with the major-axis rotation applied.
    pub fn rotated_axes(&self) -> (Vector3<f64>, Vector3<f64>) {
        let (s, c) = self.rotation_angle.sin_cos();
        let major = self.x_axis * c + self.y_axis * s;
        let minor = self.y_axis * c - self.x_axis * s;
        (major, minor)
    }

    /// Point on the (possibly elliptical) arc at parameter angle, UoR.
    pub fn point_at(&self, angle: f64) -> Point3<f64> {
        let (major, minor) = self.rotated_axes();
        self.center
            + major * (self.primary_radius * angle.cos())
            + minor * (self.secondary_radius * angle.sin())
    }
}

/// Compound open curve: an unordered bag of component segments as the
/// host hands them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeComplexChain {
    pub components: Vec<NativeEntity>,
}

/// Compound closed outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeComplexShape {
    pub components: Vec<NativeEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeBsplineCurve {
    /// Host order = degree + 1.
    pub order: usize,
    pub poles: Vec<Point3<f64>>,
    pub knots: Vec<f64>,
    /// Absent for non-rational curves; hosts treat "no weights" as a
    /// distinct, cheaper path.
    pub weights: Option<Vec<f64>>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeBsplineSurface {
    pub order_u: usize,
    pub order_v: usize,
    pub num_poles_u: usize,
    pub num_poles_v: usize,
    /// Row-major (u-major) pole grid.
    pub poles: Vec<Point3<f64>>,
    pub weights: Option<Vec<f64>>,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
    pub closed_u: bool,
    pub closed_v: bool,
}

/// Indexed face-vertex mesh. `point_index` is 1-based with 0 as the
/// loop terminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeMeshElement {
    pub points: Vec<Point3<f64>>,
    pub point_index: Vec<i32>,
}

/// Axis-aligned extent block, UoR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRange {
    pub low: Point3<f64>,
    pub high: Point3<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeTextNode {
    pub origin: Point3<f64>,
}
