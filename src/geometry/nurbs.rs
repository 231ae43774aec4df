// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Canonical rational B-spline curve and surface
//!
//! Control points travel flattened on the wire (3 reals per pole for
//! curves, 4 including the weight for surfaces). Weights are always
//! explicit: a non-rational curve stores 1.0 per pole rather than an
//! absent array. Closed curves duplicate the first pole as the last.

use super::bbox::BoundingBox;
use super::curve::Polyline;
use super::primitives::Interval;
use crate::error::ConvertError;
use crate::units::Units;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Fixed resolution of the best-effort display polyline.
pub const DISPLAY_SEGMENTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurbsCurve {
    /// Flattened x,y,z control-point triples.
    pub points: Vec<f64>,
    pub knots: Vec<f64>,
    /// One weight per pole; all 1.0 when non-rational.
    pub weights: Vec<f64>,
    pub degree: usize,
    pub rational: bool,
    pub closed: bool,
    pub units: Units,
    pub length: f64,
    pub domain: Interval,
    /// Dense piecewise-linear approximation for viewers that cannot
    /// evaluate the parametric form. Best-effort; `None` never affects
    /// correctness of the parametric data.
    pub display_value: Option<Polyline>,
    pub bbox: BoundingBox,
}

impl NurbsCurve {
    pub fn new(
        points: Vec<f64>,
        knots: Vec<f64>,
        weights: Vec<f64>,
        degree: usize,
        closed: bool,
        units: Units,
    ) -> Result<Self, ConvertError> {
        if points.len() % 3 != 0 {
            return Err(ConvertError::InvalidGeometry(
                "control point array length not a multiple of 3".into(),
            ));
        }
        let count = points.len() / 3;
        if degree < 1 || count < degree + 1 {
            return Err(ConvertError::InvalidGeometry(format!(
                "degree {} needs at least {} poles, got {}",
                degree,
                degree + 1,
                count
            )));
        }
        if knots.len() != count + degree + 1 {
            return Err(ConvertError::InvalidGeometry(format!(
                "knot count {} != poles {} + degree {} + 1",
                knots.len(),
                count,
                degree
            )));
        }
        if weights.len() != count {
            return Err(ConvertError::InvalidGeometry(format!(
                "weight count {} != pole count {}",
                weights.len(),
                count
            )));
        }
        let rational = weights.iter().any(|w| (w - 1.0).abs() > 1e-12);
        let bbox = BoundingBox::from_flat_coords(&points, units);

        let mut curve = Self {
            points,
            knots,
            weights,
            degree,
            rational,
            closed,
            units,
            length: 0.0,
            domain: Interval::from_length(0.0),
            display_value: None,
            bbox,
        };
        // Best-effort side computations; failure must not fail the
        // parent conversion, so the error is discarded here.
        curve.display_value = curve.tessellate(DISPLAY_SEGMENTS).ok();
        curve.length = curve
            .display_value
            .as_ref()
            .map(|p| p.length)
            .unwrap_or(0.0);
        curve.domain = Interval::from_length(curve.length);
        Ok(curve)
    }

    pub fn pole_count(&self) -> usize {
        self.points.len() / 3
    }

    pub fn pole(&self, i: usize) -> Point3<f64> {
        Point3::new(self.points[3 * i], self.points[3 * i + 1], self.points[3 * i + 2])
    }

    /// The native parameter range [knots[p], knots[n-p-1]], as opposed
    /// to `domain` which is the canonical 0..length convention.
    pub fn knot_domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.knots.len() - self.degree - 1],
        )
    }

    fn find_span(&self, t: f64) -> usize {
        let n = self.pole_count() - 1;
        let p = self.degree;
        if t >= self.knots[n + 1] {
            return n;
        }
        if t <= self.knots[p] {
            return p;
        }
        let mut low = p;
        let mut high = n + 1;
        let mut mid = (low + high) / 2;
        while t < self.knots[mid] || t >= self.knots[mid + 1] {
            if t < self.knots[mid] {
                high = mid;
            } else {
                low = mid;
            }
            mid = (low + high) / 2;
        }
        mid
    }

    fn basis_functions(&self, span: usize, t: f64) -> Vec<f64> {
        let p = self.degree;
        let mut n_vals = vec![0.0; p + 1];
        let mut left = vec![0.0; p + 1];
        let mut right = vec![0.0; p + 1];

        n_vals[0] = 1.0;
        for j in 1..=p {
            left[j] = t - self.knots[span + 1 - j];
            right[j] = self.knots[span + j] - t;
            let mut saved = 0.0;
            for r in 0..j {
                let temp = n_vals[r] / (right[r + 1] + left[j - r]);
                n_vals[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            n_vals[j] = saved;
        }
        n_vals
    }

    /// Evaluate at native parameter `t` (homogeneous de Boor).
    pub fn evaluate(&self, t: f64) -> Point3<f64> {
        let span = self.find_span(t);
        let basis = self.basis_functions(span, t);
        let p = self.degree;

        let mut wx = 0.0;
        let mut wy = 0.0;
        let mut wz = 0.0;
        let mut w_sum = 0.0;
        for i in 0..=p {
            let idx = span - p + i;
            let cp = self.pole(idx);
            let bw = basis[i] * self.weights[idx];
            wx += cp.x * bw;
            wy += cp.y * bw;
            wz += cp.z * bw;
            w_sum += bw;
        }
        Point3::new(wx / w_sum, wy / w_sum, wz / w_sum)
    }

    pub fn start_pos(&self) -> Point3<f64> {
        let (t0, t1) = self.knot_domain();
        if t1 > t0 {
            self.evaluate(t0)
        } else {
            self.pole(0)
        }
    }

    pub fn end_pos(&self) -> Point3<f64> {
        let (t0, t1) = self.knot_domain();
        if t1 > t0 {
            self.evaluate(t1)
        } else {
            self.pole(self.pole_count() - 1)
        }
    }

    /// Uniform tessellation over the knot domain.
    pub fn tessellate(&self, segments: usize) -> Result<Polyline, ConvertError> {
        let (t0, t1) = self.knot_domain();
        if !(t1 - t0).is_finite() || t1 <= t0 || segments == 0 {
            return Err(ConvertError::InvalidGeometry(
                "degenerate knot domain".into(),
            ));
        }
        let mut value = Vec::with_capacity((segments + 1) * 3);
        for i in 0..=segments {
            let t = t0 + (t1 - t0) * i as f64 / segments as f64;
            let p = self.evaluate(t);
            if !p.coords.iter().all(|c| c.is_finite()) {
                return Err(ConvertError::InvalidGeometry(
                    "non-finite tessellation sample".into(),
                ));
            }
            value.extend_from_slice(&[p.x, p.y, p.z]);
        }
        Ok(Polyline::new(value, false, self.units))
    }

    /// Orientation flip: poles and weights reverse, the knot vector is
    /// mirrored over its domain.
    pub fn reversed(&self) -> Self {
        let mut points = Vec::with_capacity(self.points.len());
        for c in self.points.chunks_exact(3).rev() {
            points.extend_from_slice(c);
        }
        let weights: Vec<f64> = self.weights.iter().rev().copied().collect();
        let k_min = self.knots[0];
        let k_max = self.knots[self.knots.len() - 1];
        let knots: Vec<f64> = self.knots.iter().rev().map(|k| k_min + k_max - k).collect();
        Self::new(points, knots, weights, self.degree, self.closed, self.units)
            .unwrap_or_else(|_| self.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurbsSurface {
    /// Row-major (u-major) flattened pole grid, 4 reals per pole:
    /// x, y, z, weight.
    pub point_data: Vec<f64>,
    pub count_u: usize,
    pub count_v: usize,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
    pub degree_u: usize,
    pub degree_v: usize,
    pub rational: bool,
    pub closed_u: bool,
    pub closed_v: bool,
    pub units: Units,
    pub bbox: BoundingBox,
}

impl NurbsSurface {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        point_data: Vec<f64>,
        count_u: usize,
        count_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        degree_u: usize,
        degree_v: usize,
        closed_u: bool,
        closed_v: bool,
        units: Units,
    ) -> Result<Self, ConvertError> {
        if point_data.len() != count_u * count_v * 4 {
            return Err(ConvertError::InvalidGeometry(format!(
                "surface pole data length {} != {}x{}x4",
                point_data.len(),
                count_u,
                count_v
            )));
        }
        if knots_u.len() != count_u + degree_u + 1 || knots_v.len() != count_v + degree_v + 1 {
            return Err(ConvertError::InvalidGeometry(
                "surface knot counts do not match pole counts".into(),
            ));
        }
        let rational = point_data
            .chunks_exact(4)
            .any(|p| (p[3] - 1.0).abs() > 1e-12);
        let bbox = BoundingBox::from_points(
            point_data.chunks_exact(4).map(|p| Point3::new(p[0], p[1], p[2])),
            units,
        );
        Ok(Self {
            point_data,
            count_u,
            count_v,
            knots_u,
            knots_v,
            degree_u,
            degree_v,
            rational,
            closed_u,
            closed_v,
            units,
            bbox,
        })
    }

    pub fn pole(&self, u: usize, v: usize) -> (Point3<f64>, f64) {
        let i = (u * self.count_v + v) * 4;
        (
            Point3::new(self.point_data[i], self.point_data[i + 1], self.point_data[i + 2]),
            self.point_data[i + 3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_nurbs() -> NurbsCurve {
        NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0],
            1,
            false,
            Units::Meters,
        )
        .unwrap()
    }

    #[test]
    fn test_degree_one_line() {
        let c = line_nurbs();
        assert!(!c.rational);
        let p = c.evaluate(0.5);
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(c.length, 10.0, epsilon = 1e-9);
        assert_eq!(c.domain, Interval::new(0.0, c.length));
    }

    #[test]
    fn test_display_polyline_present() {
        let c = line_nurbs();
        let display = c.display_value.as_ref().unwrap();
        assert_eq!(display.vertex_count(), DISPLAY_SEGMENTS + 1);
        assert!(!display.closed);
    }

    #[test]
    fn test_rational_quarter_circle() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let c = NurbsCurve::new(
            vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![1.0, w, 1.0],
            2,
            false,
            Units::Meters,
        )
        .unwrap();
        assert!(c.rational);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let p = c.evaluate(t);
            assert_relative_eq!((p.x * p.x + p.y * p.y).sqrt(), 1.0, epsilon = 1e-7);
        }
        // Quarter of a unit circle
        assert_relative_eq!(c.length, std::f64::consts::FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn test_knot_count_validation() {
        let err = NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            1,
            false,
            Units::Meters,
        );
        assert!(matches!(err, Err(ConvertError::InvalidGeometry(_))));
    }

    #[test]
    fn test_reversed_swaps_endpoints() {
        let c = NurbsCurve::new(
            vec![0.0, 0.0, 0.0, 5.0, 5.0, 0.0, 10.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            2,
            false,
            Units::Meters,
        )
        .unwrap();
        let r = c.reversed();
        assert_relative_eq!((r.start_pos() - c.end_pos()).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!((r.end_pos() - c.start_pos()).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.length, c.length, epsilon = 1e-9);
    }

    #[test]
    fn test_surface_pole_grid() {
        let mut data = Vec::new();
        for u in 0..2 {
            for v in 0..3 {
                data.extend_from_slice(&[u as f64, v as f64, 0.0, 1.0]);
            }
        }
        let s = NurbsSurface::new(
            data,
            2,
            3,
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            1,
            2,
            false,
            false,
            Units::Meters,
        )
        .unwrap();
        assert!(!s.rational);
        let (p, w) = s.pole(1, 2);
        assert_eq!(p, Point3::new(1.0, 2.0, 0.0));
        assert_eq!(w, 1.0);
        assert_relative_eq!(s.bbox.y_size.length(), 2.0);
    }
}
