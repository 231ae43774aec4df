// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! NURBS reconstruction between host pole/knot/weight arrays and the
//! canonical rational form
//!
//! Host contract: `order = degree + 1` and `knots.len() == poles.len()
//! + order` for both open and closed curves. A closed native curve
//! does not repeat its seam pole; the canonical form always wants an
//! explicit closing pole matching the first, so one pole (and one knot
//! extending the final span) is appended on the way in and stripped on
//! the way out.

use super::primitives::{point_to_canonical, point_to_native};
use crate::error::ConvertError;
use crate::geometry::{GeometryElement, NurbsCurve, NurbsSurface, Point};
use crate::native::{NativeBsplineCurve, NativeBsplineSurface};
use crate::units::ScaleContext;

pub fn bspline_curve_to_canonical(
    curve: &NativeBsplineCurve,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    if curve.order < 2 {
        return Err(ConvertError::InvalidGeometry(format!(
            "b-spline order {} below 2",
            curve.order
        )));
    }
    let degree = curve.order - 1;
    if curve.poles.is_empty() {
        return Err(ConvertError::InvalidGeometry("b-spline with no poles".into()));
    }
    // Degenerate: a single pole has no curve vector
    if curve.poles.len() == 1 {
        return Ok(GeometryElement::Point(point_to_canonical(&curve.poles[0], ctx)));
    }
    if let Some(w) = &curve.weights {
        if w.len() != curve.poles.len() {
            return Err(ConvertError::InvalidGeometry(format!(
                "weight count {} != pole count {}",
                w.len(),
                curve.poles.len()
            )));
        }
    }

    let mut points = Vec::with_capacity((curve.poles.len() + 1) * 3);
    for p in &curve.poles {
        let c = point_to_canonical(p, ctx);
        points.extend_from_slice(&[c.x, c.y, c.z]);
    }
    // Non-rational input gets explicit unit weights; rational-ness is
    // decided by the data, not by mere presence of the array.
    let mut weights = match &curve.weights {
        Some(w) => w.clone(),
        None => vec![1.0; curve.poles.len()],
    };
    let mut knots = curve.knots.clone();

    if curve.closed {
        let seam = [points[0], points[1], points[2]];
        points.extend_from_slice(&seam);
        weights.push(weights[0]);
        let last = *knots.last().ok_or_else(|| {
            ConvertError::InvalidGeometry("b-spline with empty knot vector".into())
        })?;
        let prev = knots[knots.len().saturating_sub(2)];
        let step = if last > prev { last - prev } else { 1.0 };
        knots.push(last + step);
    }

    Ok(GeometryElement::NurbsCurve(NurbsCurve::new(
        points,
        knots,
        weights,
        degree,
        curve.closed,
        ctx.units,
    )?))
}

pub fn nurbs_to_native(
    curve: &NurbsCurve,
    ctx: &ScaleContext,
) -> Result<NativeBsplineCurve, ConvertError> {
    let mut count = curve.pole_count();
    let mut knots = curve.knots.clone();
    if curve.closed {
        // Strip the explicit seam pole and its appended knot
        count -= 1;
        knots.pop();
    }
    let poles = (0..count)
        .map(|i| {
            let p = Point::new(
                curve.points[3 * i],
                curve.points[3 * i + 1],
                curve.points[3 * i + 2],
                curve.units,
            );
            point_to_native(&p, ctx)
        })
        .collect();

    // Uniform weights take the host's cheaper non-rational path
    let uniform = curve
        .weights
        .windows(2)
        .all(|w| (w[0] - w[1]).abs() <= 1e-12);
    let weights = if uniform {
        None
    } else {
        Some(curve.weights[..count].to_vec())
    };

    Ok(NativeBsplineCurve {
        order: curve.degree + 1,
        poles,
        knots,
        weights,
        closed: curve.closed,
    })
}

pub fn bspline_surface_to_canonical(
    surface: &NativeBsplineSurface,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    if surface.order_u < 2 || surface.order_v < 2 {
        return Err(ConvertError::InvalidGeometry(
            "b-spline surface order below 2".into(),
        ));
    }
    let count = surface.num_poles_u * surface.num_poles_v;
    if surface.poles.len() != count {
        return Err(ConvertError::InvalidGeometry(format!(
            "surface pole count {} != {}x{}",
            surface.poles.len(),
            surface.num_poles_u,
            surface.num_poles_v
        )));
    }
    if let Some(w) = &surface.weights {
        if w.len() != count {
            return Err(ConvertError::InvalidGeometry(format!(
                "surface weight count {} != pole count {}",
                w.len(),
                count
            )));
        }
    }

    let mut point_data = Vec::with_capacity(count * 4);
    for (i, p) in surface.poles.iter().enumerate() {
        let c = point_to_canonical(p, ctx);
        let w = surface.weights.as_ref().map(|w| w[i]).unwrap_or(1.0);
        point_data.extend_from_slice(&[c.x, c.y, c.z, w]);
    }

    Ok(GeometryElement::NurbsSurface(NurbsSurface::new(
        point_data,
        surface.num_poles_u,
        surface.num_poles_v,
        surface.knots_u.clone(),
        surface.knots_v.clone(),
        surface.order_u - 1,
        surface.order_v - 1,
        surface.closed_u,
        surface.closed_v,
        ctx.units,
    )?))
}

pub fn surface_to_native(
    surface: &NurbsSurface,
    ctx: &ScaleContext,
) -> Result<NativeBsplineSurface, ConvertError> {
    let mut poles = Vec::with_capacity(surface.count_u * surface.count_v);
    let mut weights = Vec::with_capacity(surface.count_u * surface.count_v);
    for chunk in surface.point_data.chunks_exact(4) {
        let p = Point::new(chunk[0], chunk[1], chunk[2], surface.units);
        poles.push(point_to_native(&p, ctx));
        weights.push(chunk[3]);
    }
    let uniform = weights.windows(2).all(|w| (w[0] - w[1]).abs() <= 1e-12);

    Ok(NativeBsplineSurface {
        order_u: surface.degree_u + 1,
        order_v: surface.degree_v + 1,
        num_poles_u: surface.count_u,
        num_poles_v: surface.count_v,
        poles,
        weights: if uniform { None } else { Some(weights) },
        knots_u: surface.knots_u.clone(),
        knots_v: surface.knots_v.clone(),
        closed_u: surface.closed_u,
        closed_v: surface.closed_v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Units;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn ctx() -> ScaleContext {
        ScaleContext::new(1000.0, Units::Millimeters)
    }

    fn open_native() -> NativeBsplineCurve {
        NativeBsplineCurve {
            order: 3,
            poles: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1000.0, 2000.0, 0.0),
                Point3::new(2000.0, 0.0, 0.0),
            ],
            knots: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            weights: None,
            closed: false,
        }
    }

    #[test]
    fn test_weight_defaulting() {
        let out = bspline_curve_to_canonical(&open_native(), &ctx()).unwrap();
        match out {
            GeometryElement::NurbsCurve(n) => {
                assert_eq!(n.weights, vec![1.0, 1.0, 1.0]);
                assert_eq!(n.weights.len(), n.pole_count());
                assert!(!n.rational);
                assert_eq!(n.degree, 2);
            }
            other => panic!("expected NurbsCurve, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_closed_curve_appends_seam_pole() {
        let native = NativeBsplineCurve {
            order: 2,
            poles: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1000.0, 0.0, 0.0),
                Point3::new(1000.0, 1000.0, 0.0),
                Point3::new(0.0, 1000.0, 0.0),
            ],
            knots: vec![0.0, 0.0, 0.25, 0.5, 0.75, 1.0],
            weights: None,
            closed: true,
        };
        let out = bspline_curve_to_canonical(&native, &ctx()).unwrap();
        match out {
            GeometryElement::NurbsCurve(n) => {
                // pole count = native + 1, weights match, knots keep the
                // open-convention count
                assert_eq!(n.pole_count(), 5);
                assert_eq!(n.weights.len(), 5);
                assert_eq!(n.knots.len(), 5 + n.degree + 1);
                assert_relative_eq!((n.pole(0) - n.pole(4)).norm(), 0.0);
                assert!(n.closed);
            }
            other => panic!("expected NurbsCurve, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_display_polyline_is_best_effort() {
        let out = bspline_curve_to_canonical(&open_native(), &ctx()).unwrap();
        if let GeometryElement::NurbsCurve(n) = out {
            let display = n.display_value.expect("display polyline expected");
            assert_eq!(display.vertex_count(), crate::geometry::DISPLAY_SEGMENTS + 1);
            // end vertices interpolate the pole ends
            assert_relative_eq!(display.vertex(0).x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(display.vertex(100).x, 2.0, epsilon = 1e-9);
        } else {
            panic!("expected NurbsCurve");
        }
    }

    #[test]
    fn test_single_pole_degenerates_to_point() {
        let native = NativeBsplineCurve {
            order: 2,
            poles: vec![Point3::new(500.0, 0.0, 0.0)],
            knots: vec![0.0, 1.0],
            weights: None,
            closed: false,
        };
        assert!(matches!(
            bspline_curve_to_canonical(&native, &ctx()).unwrap(),
            GeometryElement::Point(_)
        ));
    }

    #[test]
    fn test_uniform_weights_go_native_as_none() {
        let out = bspline_curve_to_canonical(&open_native(), &ctx()).unwrap();
        if let GeometryElement::NurbsCurve(n) = out {
            let native = nurbs_to_native(&n, &ctx()).unwrap();
            assert!(native.weights.is_none());
            assert_eq!(native.order, 3);
            assert_eq!(native.poles.len(), 3);
        } else {
            panic!("expected NurbsCurve");
        }
    }

    #[test]
    fn test_rational_roundtrip_keeps_weights() {
        let native = NativeBsplineCurve {
            weights: Some(vec![1.0, 0.5, 1.0]),
            ..open_native()
        };
        let out = bspline_curve_to_canonical(&native, &ctx()).unwrap();
        if let GeometryElement::NurbsCurve(n) = out {
            assert!(n.rational);
            let back = nurbs_to_native(&n, &ctx()).unwrap();
            assert_eq!(back.weights, Some(vec![1.0, 0.5, 1.0]));
            assert_relative_eq!((back.poles[1] - native.poles[1]).norm(), 0.0, epsilon = 1e-9);
        } else {
            panic!("expected NurbsCurve");
        }
    }

    #[test]
    fn test_closed_roundtrip_strips_seam() {
        let native = NativeBsplineCurve {
            order: 2,
            poles: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1000.0, 0.0, 0.0),
                Point3::new(500.0, 1000.0, 0.0),
            ],
            knots: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            weights: None,
            closed: true,
        };
        let out = bspline_curve_to_canonical(&native, &ctx()).unwrap();
        if let GeometryElement::NurbsCurve(n) = out {
            let back = nurbs_to_native(&n, &ctx()).unwrap();
            assert_eq!(back.poles.len(), 3);
            assert_eq!(back.knots.len(), 5);
            assert!(back.closed);
        } else {
            panic!("expected NurbsCurve");
        }
    }

    #[test]
    fn test_surface_roundtrip() {
        let native = NativeBsplineSurface {
            order_u: 2,
            order_v: 2,
            num_poles_u: 2,
            num_poles_v: 2,
            poles: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1000.0, 0.0),
                Point3::new(1000.0, 0.0, 0.0),
                Point3::new(1000.0, 1000.0, 500.0),
            ],
            weights: None,
            knots_u: vec![0.0, 0.0, 1.0, 1.0],
            knots_v: vec![0.0, 0.0, 1.0, 1.0],
            closed_u: false,
            closed_v: false,
        };
        let out = bspline_surface_to_canonical(&native, &ctx()).unwrap();
        if let GeometryElement::NurbsSurface(s) = out {
            assert!(!s.rational);
            assert_eq!(s.point_data.len(), 16);
            let back = surface_to_native(&s, &ctx()).unwrap();
            assert_eq!(back, native);
        } else {
            panic!("expected NurbsSurface");
        }
    }
}
