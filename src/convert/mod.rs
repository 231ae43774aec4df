// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Conversion dispatch
//!
//! One native entity in, one canonical element out (or an error), and
//! the reverse. Dispatch is an exhaustive match over the closed entity
//! enums. Each conversion stamps its result with units and a derived
//! bounding box; nothing is partially applied.

mod bbox;
mod chain;
mod curve;
mod mesh;
mod nurbs;
mod primitives;

pub use bbox::{box_to_native, range_to_canonical};
pub use chain::{assemble, Assembly};
pub use curve::{
    arc_to_canonical, arc_to_native, circle_to_native, conic_to_nurbs, ellipse_to_native,
    line_to_canonical, line_to_native, linestring_to_canonical, polyline_to_native,
    shape_to_canonical,
};
pub use mesh::{mesh_to_canonical, mesh_to_native};
pub use nurbs::{
    bspline_curve_to_canonical, bspline_surface_to_canonical, nurbs_to_native, surface_to_native,
};
pub use primitives::{
    interval_to_canonical, interval_to_native, plane_to_canonical, plane_to_native,
    point_to_canonical, point_to_native, vector_to_canonical, vector_to_native,
};

use crate::error::ConvertError;
use crate::geometry::{Curve, GeometryElement, Polycurve};
use crate::native::{NativeComplexChain, NativeComplexShape, NativeEntity, NativePoint};
use crate::units::ScaleContext;

/// A conversion result plus anything the conversion had to leave
/// behind. `dropped` is non-empty only for compound entities whose
/// chain assembly could not place every segment.
#[derive(Debug, Clone)]
pub struct Converted {
    pub element: GeometryElement,
    pub dropped: Vec<Curve>,
}

impl Converted {
    fn clean(element: GeometryElement) -> Self {
        Self {
            element,
            dropped: Vec::new(),
        }
    }
}

/// Convert one native entity, reporting dropped chain segments.
pub fn convert_entity(
    entity: &NativeEntity,
    ctx: &ScaleContext,
) -> Result<Converted, ConvertError> {
    match entity {
        NativeEntity::Point(p) => Ok(Converted::clean(GeometryElement::Point(
            point_to_canonical(&p.position, ctx),
        ))),
        NativeEntity::Line(l) => Ok(Converted::clean(line_to_canonical(l, ctx))),
        NativeEntity::LineString(ls) => linestring_to_canonical(ls, ctx).map(Converted::clean),
        NativeEntity::Shape(s) => shape_to_canonical(s, ctx).map(Converted::clean),
        NativeEntity::Arc(a) => arc_to_canonical(a, ctx).map(Converted::clean),
        NativeEntity::ComplexChain(c) => compound_to_canonical(&c.components, ctx),
        NativeEntity::ComplexShape(c) => compound_to_canonical(&c.components, ctx),
        NativeEntity::BsplineCurve(b) => bspline_curve_to_canonical(b, ctx).map(Converted::clean),
        NativeEntity::BsplineSurface(b) => {
            bspline_surface_to_canonical(b, ctx).map(Converted::clean)
        }
        NativeEntity::MeshElement(m) => mesh_to_canonical(m, ctx).map(Converted::clean),
        NativeEntity::Range(r) => Ok(Converted::clean(GeometryElement::Box(
            range_to_canonical(r, ctx),
        ))),
        NativeEntity::TextNode(_) => Err(ConvertError::UnsupportedType("TextNode")),
    }
}

/// Convert one native entity to exactly one canonical element.
pub fn to_canonical(
    entity: &NativeEntity,
    ctx: &ScaleContext,
) -> Result<GeometryElement, ConvertError> {
    convert_entity(entity, ctx).map(|c| c.element)
}

/// Entry point for host dispatchers that pass an optional unit
/// override alongside the entity.
pub fn to_canonical_with_override(
    entity: &NativeEntity,
    ctx: &ScaleContext,
    units_override: Option<&str>,
) -> Result<GeometryElement, ConvertError> {
    match units_override {
        Some(name) => to_canonical(entity, &ctx.with_units_override(name)?),
        None => to_canonical(entity, ctx),
    }
}

fn compound_to_canonical(
    components: &[NativeEntity],
    ctx: &ScaleContext,
) -> Result<Converted, ConvertError> {
    let mut segments = Vec::with_capacity(components.len());
    for component in components {
        match to_canonical(component, ctx)? {
            // Degenerate components downgrade to points and carry no
            // chainable geometry; they are excluded before assembly.
            GeometryElement::Point(_) => continue,
            element => match element.into_curve() {
                Some(curve) => segments.push(curve),
                None => {
                    return Err(ConvertError::InvalidGeometry(format!(
                        "compound entity contains a non-curve component ({})",
                        component.type_name()
                    )))
                }
            },
        }
    }
    let assembly = assemble(segments, ctx.tolerance);
    Ok(Converted {
        element: GeometryElement::Polycurve(Polycurve::new(
            assembly.segments,
            assembly.closed,
            ctx.units,
        )),
        dropped: assembly.dropped,
    })
}

/// Convert one canonical element back to exactly one native entity.
pub fn to_native(
    element: &GeometryElement,
    ctx: &ScaleContext,
) -> Result<NativeEntity, ConvertError> {
    match element {
        GeometryElement::Point(p) => Ok(NativeEntity::Point(NativePoint {
            position: point_to_native(p, ctx),
        })),
        GeometryElement::Vector(_) => Err(ConvertError::UnsupportedType("Vector")),
        GeometryElement::Line(l) => Ok(NativeEntity::Line(line_to_native(l, ctx))),
        GeometryElement::Arc(a) => Ok(NativeEntity::Arc(arc_to_native(a, ctx))),
        GeometryElement::Circle(c) => Ok(NativeEntity::Arc(circle_to_native(c, ctx))),
        GeometryElement::Ellipse(e) => Ok(NativeEntity::Arc(ellipse_to_native(e, ctx))),
        GeometryElement::Polyline(p) => Ok(polyline_to_native(p, ctx)),
        GeometryElement::NurbsCurve(n) => {
            Ok(NativeEntity::BsplineCurve(nurbs_to_native(n, ctx)?))
        }
        GeometryElement::Polycurve(pc) => polycurve_to_native(pc, ctx),
        GeometryElement::NurbsSurface(s) => {
            Ok(NativeEntity::BsplineSurface(surface_to_native(s, ctx)?))
        }
        GeometryElement::Mesh(m) => Ok(NativeEntity::MeshElement(mesh_to_native(m, ctx)?)),
        GeometryElement::Box(b) => Ok(NativeEntity::Range(box_to_native(b, ctx))),
    }
}

fn polycurve_to_native(
    polycurve: &Polycurve,
    ctx: &ScaleContext,
) -> Result<NativeEntity, ConvertError> {
    let components = polycurve
        .segments
        .iter()
        .map(|segment| to_native(&GeometryElement::from(segment.clone()), ctx))
        .collect::<Result<Vec<_>, _>>()?;
    if polycurve.closed {
        Ok(NativeEntity::ComplexShape(NativeComplexShape { components }))
    } else {
        Ok(NativeEntity::ComplexChain(NativeComplexChain { components }))
    }
}
