// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Curve classification and conversion
//!
//! A single native arc/ellipse primitive maps to four canonical shapes
//! depending on measured properties. Classification order matters:
//! axis ratio before closedness, closedness before rotation. A closed,
//! rotated, non-unit-ratio curve reduces to NURBS, never to Ellipse.

use super::primitives::{plane_to_canonical, point_to_canonical, point_to_native};
use crate::error::ConvertError;
use crate::geometry::{
    Arc, Circle, Ellipse, GeometryElement, Line, NurbsCurve, Point, Polyline,
};
use crate::native::{NativeArc, NativeLine, NativeLineString, NativeShape};
use crate::units::ScaleContext;
use nalgebra::Point3;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Relative tolerance on the secondary/primary axis ratio.
const RATIO_TOL: f64 = 1e-6;
/// Tolerance on angles (major-axis rotation, full-sweep detection).
const ANGLE_TOL: f64 = 1e-9;

fn endpoint_tol_uor(ctx: &ScaleContext) -> f64 {
    ctx.tolerance * ctx.uor_per_unit
}

/// Classify and convert the native arc/ellipse primitive.
pub fn arc_to_canonical(
    arc: &NativeArc,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    // No extractable curve vector: downgrade to a point, not an error.
    if arc.primary_radius.abs() <= f64::EPSILON || arc.secondary_radius.abs() <= f64::EPSILON {
        return Ok(GeometryElement::Point(point_to_canonical(&arc.center, ctx)));
    }
    if arc.sweep_angle.abs() <= ANGLE_TOL {
        return Ok(GeometryElement::Point(point_to_canonical(
            &arc.point_at(arc.start_angle),
            ctx,
        )));
    }

    let ratio = arc.secondary_radius / arc.primary_radius;
    let circular = (ratio - 1.0).abs() <= RATIO_TOL;
    let start = arc.point_at(arc.start_angle);
    let end = arc.point_at(arc.start_angle + arc.sweep_angle);
    let ends_coincide = (end - start).norm() <= endpoint_tol_uor(ctx);

    if circular {
        let (major, minor) = arc.rotated_axes();
        let plane = plane_to_canonical(&arc.center, &major, &minor, ctx);
        let radius = ctx.to_canonical(arc.primary_radius);
        if ends_coincide {
            return Ok(GeometryElement::Circle(Circle::new(plane, radius, ctx.units)));
        }
        return Ok(GeometryElement::Arc(Arc::new(
            plane,
            radius,
            arc.start_angle,
            arc.sweep_angle,
            ctx.units,
        )));
    }

    let full_sweep = arc.sweep_angle.abs() >= TAU - ANGLE_TOL;
    if arc.rotation_angle.abs() <= ANGLE_TOL && full_sweep {
        let plane = plane_to_canonical(&arc.center, &arc.x_axis, &arc.y_axis, ctx);
        return Ok(GeometryElement::Ellipse(Ellipse::new(
            plane,
            ctx.to_canonical(arc.primary_radius),
            ctx.to_canonical(arc.secondary_radius),
            ctx.units,
        )));
    }

    // Rotated and/or partial elliptical arcs have no plane-based
    // primitive; emit the implicit rational B-spline form.
    Ok(GeometryElement::NurbsCurve(conic_to_nurbs(arc, ctx)?))
}

/// Rational quadratic B-spline form of a (possibly rotated, possibly
/// partial) elliptical arc. The sweep is split into spans of at most a
/// quarter turn; each span is one rational Bezier segment whose middle
/// pole sits on the tangent intersection with weight cos(span/2).
pub fn conic_to_nurbs(arc: &NativeArc, ctx: &ScaleContext) -> Result<NurbsCurve, ConvertError> {
    let center = point_to_canonical(&arc.center, ctx).position();
    let (major, minor) = arc.rotated_axes();
    let r1 = ctx.to_canonical(arc.primary_radius);
    let r2 = ctx.to_canonical(arc.secondary_radius);
    let at = |u: f64, v: f64| center + major * (r1 * u) + minor * (r2 * v);

    let sweep = arc.sweep_angle;
    if sweep.abs() <= ANGLE_TOL {
        return Err(ConvertError::InvalidGeometry("zero-sweep conic".into()));
    }
    let spans = (sweep.abs() / FRAC_PI_2 - 1e-12).ceil().max(1.0) as usize;
    let dt = sweep / spans as f64;
    let w_mid = (dt / 2.0).cos();

    let mut points = Vec::with_capacity((2 * spans + 1) * 3);
    let mut weights = Vec::with_capacity(2 * spans + 1);
    let push = |points: &mut Vec<f64>, p: Point3<f64>| points.extend_from_slice(&[p.x, p.y, p.z]);

    let t0 = arc.start_angle;
    push(&mut points, at(t0.cos(), t0.sin()));
    weights.push(1.0);
    for i in 0..spans {
        let ta = t0 + dt * i as f64;
        let tb = ta + dt;
        let tm = (ta + tb) / 2.0;
        push(&mut points, at(tm.cos() / w_mid, tm.sin() / w_mid));
        weights.push(w_mid);
        push(&mut points, at(tb.cos(), tb.sin()));
        weights.push(1.0);
    }

    let mut knots = Vec::with_capacity(2 * spans + 4);
    knots.extend_from_slice(&[0.0, 0.0, 0.0]);
    for j in 1..spans {
        let k = j as f64 / spans as f64;
        knots.extend_from_slice(&[k, k]);
    }
    knots.extend_from_slice(&[1.0, 1.0, 1.0]);

    let closed = sweep.abs() >= TAU - ANGLE_TOL;
    NurbsCurve::new(points, knots, weights, 2, closed, ctx.units)
}

pub fn line_to_canonical(line: &NativeLine, ctx: &ScaleContext) -> GeometryElement {
    if (line.end - line.start).norm() <= endpoint_tol_uor(ctx) {
        return GeometryElement::Point(point_to_canonical(&line.start, ctx));
    }
    GeometryElement::Line(Line::new(
        point_to_canonical(&line.start, ctx),
        point_to_canonical(&line.end, ctx),
    ))
}

pub fn linestring_to_canonical(
    ls: &NativeLineString,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    match ls.points.len() {
        0 => Err(ConvertError::InvalidGeometry("empty line string".into())),
        1 => Ok(GeometryElement::Point(point_to_canonical(&ls.points[0], ctx))),
        _ => Ok(GeometryElement::Polyline(Polyline::new(
            flatten_canonical(&ls.points, ctx),
            false,
            ctx.units,
        ))),
    }
}

/// Closed outline; a trailing vertex that duplicates the first is
/// stripped so closure stays implicit.
pub fn shape_to_canonical(
    shape: &NativeShape,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    if shape.points.len() < 3 {
        return Err(ConvertError::InvalidGeometry(format!(
            "shape with {} vertices",
            shape.points.len()
        )));
    }
    let mut pts: &[Point3<f64>] = &shape.points;
    if (pts[pts.len() - 1] - pts[0]).norm() <= endpoint_tol_uor(ctx) {
        pts = &pts[..pts.len() - 1];
    }
    Ok(GeometryElement::Polyline(Polyline::new(
        flatten_canonical(pts, ctx),
        true,
        ctx.units,
    )))
}

fn flatten_canonical(points: &[Point3<f64>], ctx: &ScaleContext) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        let c = point_to_canonical(p, ctx);
        out.extend_from_slice(&[c.x, c.y, c.z]);
    }
    out
}

// ---- reverse path: canonical -> native ----

pub fn line_to_native(line: &Line, ctx: &ScaleContext) -> NativeLine {
    NativeLine {
        start: point_to_native(&line.start, ctx),
        end: point_to_native(&line.end, ctx),
    }
}

pub fn circle_to_native(circle: &Circle, ctx: &ScaleContext) -> NativeArc {
    let radius = ctx.to_native(circle.radius, circle.units);
    NativeArc {
        center: point_to_native(&circle.plane.origin, ctx),
        x_axis: circle.plane.xdir.direction(),
        y_axis: circle.plane.ydir.direction(),
        primary_radius: radius,
        secondary_radius: radius,
        rotation_angle: 0.0,
        start_angle: 0.0,
        sweep_angle: TAU,
    }
}

pub fn arc_to_native(arc: &Arc, ctx: &ScaleContext) -> NativeArc {
    let radius = ctx.to_native(arc.radius, arc.units);
    NativeArc {
        center: point_to_native(&arc.plane.origin, ctx),
        x_axis: arc.plane.xdir.direction(),
        y_axis: arc.plane.ydir.direction(),
        primary_radius: radius,
        secondary_radius: radius,
        rotation_angle: 0.0,
        start_angle: arc.start_angle,
        sweep_angle: arc.sweep,
    }
}

pub fn ellipse_to_native(ellipse: &Ellipse, ctx: &ScaleContext) -> NativeArc {
    NativeArc {
        center: point_to_native(&ellipse.plane.origin, ctx),
        x_axis: ellipse.plane.xdir.direction(),
        y_axis: ellipse.plane.ydir.direction(),
        primary_radius: ctx.to_native(ellipse.first_radius, ellipse.units),
        secondary_radius: ctx.to_native(ellipse.second_radius, ellipse.units),
        rotation_angle: 0.0,
        start_angle: 0.0,
        sweep_angle: TAU,
    }
}

/// Closed polylines become shapes with the host's explicit closing
/// vertex; open ones become line strings.
pub fn polyline_to_native(
    polyline: &Polyline,
    ctx: &ScaleContext,
) -> crate::native::NativeEntity {
    let scale = |i: usize| {
        let p = Point::new(
            polyline.value[3 * i],
            polyline.value[3 * i + 1],
            polyline.value[3 * i + 2],
            polyline.units,
        );
        point_to_native(&p, ctx)
    };
    let mut points: Vec<Point3<f64>> = (0..polyline.vertex_count()).map(scale).collect();
    if polyline.closed {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        crate::native::NativeEntity::Shape(NativeShape { points })
    } else {
        crate::native::NativeEntity::LineString(NativeLineString { points })
    }
}
