// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Dispatcher-level behavior tests: classification boundaries, chain
//! assembly order-independence, mesh face decoding, and extent-derived
//! bounding boxes.

use approx::assert_relative_eq;
use geobridge::convert::{convert_entity, to_canonical};
use geobridge::native::{
    NativeArc, NativeComplexShape, NativeEntity, NativeLine, NativeMeshElement, NativeRange,
};
use geobridge::{convert_batch, GeometryElement, ScaleContext, Units};
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

fn ctx() -> ScaleContext {
    ScaleContext::new(1000.0, Units::Millimeters)
}

fn base_arc() -> NativeArc {
    NativeArc {
        center: Point3::origin(),
        x_axis: Vector3::x(),
        y_axis: Vector3::y(),
        primary_radius: 3000.0,
        secondary_radius: 3000.0,
        rotation_angle: 0.0,
        start_angle: 0.0,
        sweep_angle: TAU,
    }
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> NativeEntity {
    NativeEntity::Line(NativeLine {
        start: Point3::new(x0, y0, 0.0),
        end: Point3::new(x1, y1, 0.0),
    })
}

#[test]
fn test_classifier_covers_all_four_outcomes() {
    let c = ctx();

    assert!(matches!(
        to_canonical(&NativeEntity::Arc(base_arc()), &c).unwrap(),
        GeometryElement::Circle(_)
    ));
    assert!(matches!(
        to_canonical(
            &NativeEntity::Arc(NativeArc {
                sweep_angle: 1.0,
                ..base_arc()
            }),
            &c
        )
        .unwrap(),
        GeometryElement::Arc(_)
    ));
    assert!(matches!(
        to_canonical(
            &NativeEntity::Arc(NativeArc {
                secondary_radius: 1500.0,
                ..base_arc()
            }),
            &c
        )
        .unwrap(),
        GeometryElement::Ellipse(_)
    ));
    assert!(matches!(
        to_canonical(
            &NativeEntity::Arc(NativeArc {
                secondary_radius: 1500.0,
                rotation_angle: 0.5,
                ..base_arc()
            }),
            &c
        )
        .unwrap(),
        GeometryElement::NurbsCurve(_)
    ));
}

#[test]
fn test_ratio_boundary_flips_circle_to_ellipse() {
    let c = ctx();
    // Inside the ratio tolerance: still circular
    let near = NativeArc {
        secondary_radius: 3000.0 * (1.0 + 1e-8),
        ..base_arc()
    };
    assert!(matches!(
        to_canonical(&NativeEntity::Arc(near), &c).unwrap(),
        GeometryElement::Circle(_)
    ));
    // Outside it: full-sweep unrotated, so Ellipse
    let far = NativeArc {
        secondary_radius: 3000.0 * (1.0 + 1e-4),
        ..base_arc()
    };
    assert!(matches!(
        to_canonical(&NativeEntity::Arc(far), &c).unwrap(),
        GeometryElement::Ellipse(_)
    ));
}

#[test]
fn test_endpoint_tolerance_controls_arc_vs_circle() {
    // A sweep just short of a full turn whose endpoint gap is smaller
    // than the working tolerance still classifies as Circle.
    let gap_angle = 1e-9;
    let near_closed = NativeArc {
        sweep_angle: TAU - gap_angle,
        ..base_arc()
    };
    assert!(matches!(
        to_canonical(&NativeEntity::Arc(near_closed), &ctx()).unwrap(),
        GeometryElement::Circle(_)
    ));

    // Tighten the tolerance until the same gap reads as open.
    let tight = ctx().with_tolerance(1e-12);
    assert!(matches!(
        to_canonical(
            &NativeEntity::Arc(NativeArc {
                sweep_angle: TAU - 1e-7,
                ..base_arc()
            }),
            &tight
        )
        .unwrap(),
        GeometryElement::Arc(_)
    ));
}

#[test]
fn test_chain_assembly_order_independent() {
    // Closed triangle split into three segments; every input order
    // must assemble into the same closed three-segment polycurve.
    let a = line(0.0, 0.0, 1000.0, 0.0);
    let b = line(1000.0, 0.0, 1000.0, 1000.0);
    let c = line(1000.0, 1000.0, 0.0, 0.0);
    let orders: [[&NativeEntity; 3]; 6] = [
        [&a, &b, &c],
        [&a, &c, &b],
        [&b, &a, &c],
        [&b, &c, &a],
        [&c, &a, &b],
        [&c, &b, &a],
    ];
    let context = ctx();
    for order in orders {
        let compound = NativeEntity::ComplexShape(NativeComplexShape {
            components: order.into_iter().cloned().collect(),
        });
        let out = convert_entity(&compound, &context).unwrap();
        assert!(out.dropped.is_empty());
        match out.element {
            GeometryElement::Polycurve(pc) => {
                assert!(pc.closed, "triangle must close regardless of input order");
                assert_eq!(pc.segments.len(), 3);
                assert_relative_eq!(pc.length, 2.0 + 2.0_f64.sqrt(), epsilon = 1e-9);
            }
            other => panic!("expected Polycurve, got {}", other.type_name()),
        }
    }
}

#[test]
fn test_chain_assembly_flips_reversed_segment() {
    // Middle segment stored backwards; the assembler must reverse it
    // rather than drop it.
    let compound = NativeEntity::ComplexShape(NativeComplexShape {
        components: vec![
            line(0.0, 0.0, 1000.0, 0.0),
            line(1000.0, 1000.0, 1000.0, 0.0), // reversed
            line(1000.0, 1000.0, 0.0, 0.0),
        ],
    });
    let out = convert_entity(&compound, &ctx()).unwrap();
    assert!(out.dropped.is_empty());
    match out.element {
        GeometryElement::Polycurve(pc) => {
            assert!(pc.closed);
            assert_eq!(pc.segments.len(), 3);
        }
        other => panic!("expected Polycurve, got {}", other.type_name()),
    }
}

#[test]
fn test_disjoint_segment_surfaces_as_dropped() {
    let compound = NativeEntity::ComplexShape(NativeComplexShape {
        components: vec![
            line(0.0, 0.0, 1000.0, 0.0),
            line(1000.0, 0.0, 1000.0, 1000.0),
            line(90_000.0, 90_000.0, 95_000.0, 95_000.0), // nowhere near
        ],
    });
    let out = convert_entity(&compound, &ctx()).unwrap();
    assert_eq!(out.dropped.len(), 1);
    match out.element {
        GeometryElement::Polycurve(pc) => assert_eq!(pc.segments.len(), 2),
        other => panic!("expected Polycurve, got {}", other.type_name()),
    }

    // And the batch layer aggregates the count.
    let outcome = convert_batch(std::slice::from_ref(&compound), &ctx());
    assert_eq!(outcome.dropped_segments, 1);
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_mesh_face_decoding_vectors() {
    let context = ctx();
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1000.0, 0.0, 0.0),
        Point3::new(1000.0, 1000.0, 0.0),
        Point3::new(0.0, 1000.0, 0.0),
    ];

    // Triangle: native [1,2,3,0] -> canonical [3, 0, 1, 2]
    let tri = NativeEntity::MeshElement(NativeMeshElement {
        points: points.clone(),
        point_index: vec![1, 2, 3, 0],
    });
    match to_canonical(&tri, &context).unwrap() {
        GeometryElement::Mesh(m) => assert_eq!(m.faces, vec![3, 0, 1, 2]),
        other => panic!("expected Mesh, got {}", other.type_name()),
    }

    // Quad: native [1,2,3,4,0] -> canonical [4, 0, 1, 2, 3]
    let quad = NativeEntity::MeshElement(NativeMeshElement {
        points,
        point_index: vec![1, 2, 3, 4, 0],
    });
    match to_canonical(&quad, &context).unwrap() {
        GeometryElement::Mesh(m) => {
            assert_eq!(m.faces, vec![4, 0, 1, 2, 3]);
            assert_eq!(m.vertex_count(), 4);
            assert_relative_eq!(m.vertices[3], 1.0); // second vertex, canonical units
        }
        other => panic!("expected Mesh, got {}", other.type_name()),
    }
}

#[test]
fn test_mesh_rejects_out_of_range_index() {
    let bad = NativeEntity::MeshElement(NativeMeshElement {
        points: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1000.0, 0.0, 0.0),
            Point3::new(1000.0, 1000.0, 0.0),
        ],
        point_index: vec![1, 2, 7, 0],
    });
    assert!(to_canonical(&bad, &ctx()).is_err());
}

#[test]
fn test_flat_range_gets_world_xy_plane() {
    let flat = NativeEntity::Range(NativeRange {
        low: Point3::new(0.0, 0.0, 0.0),
        high: Point3::new(4000.0, 2000.0, 0.0),
    });
    match to_canonical(&flat, &ctx()).unwrap() {
        GeometryElement::Box(b) => {
            let n = b.base_plane.normal.direction();
            assert_relative_eq!((n - Vector3::z()).norm(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(b.x_size.length(), 4.0);
            assert_relative_eq!(b.y_size.length(), 2.0);
            assert_relative_eq!(b.volume, 0.0);
        }
        other => panic!("expected Box, got {}", other.type_name()),
    }
}

#[test]
fn test_solid_range_volume_and_area_precomputed() {
    let solid = NativeEntity::Range(NativeRange {
        low: Point3::new(0.0, 0.0, 0.0),
        high: Point3::new(2000.0, 3000.0, 4000.0),
    });
    match to_canonical(&solid, &ctx()).unwrap() {
        GeometryElement::Box(b) => {
            assert_relative_eq!(b.volume, 24.0);
            assert_relative_eq!(b.area, 52.0);
        }
        other => panic!("expected Box, got {}", other.type_name()),
    }
}

#[test]
fn test_degenerate_line_downgrades_not_errors() {
    let degenerate = line(500.0, 500.0, 500.0, 500.0);
    match to_canonical(&degenerate, &ctx()).unwrap() {
        GeometryElement::Point(p) => {
            assert_relative_eq!(p.x, 0.5);
            assert_relative_eq!(p.y, 0.5);
        }
        other => panic!("expected Point, got {}", other.type_name()),
    }
}

#[test]
fn test_batch_mixed_success_and_failure() {
    let entities = vec![
        line(0.0, 0.0, 1000.0, 0.0),
        NativeEntity::TextNode(geobridge::native::NativeTextNode {
            origin: Point3::origin(),
        }),
        NativeEntity::Arc(base_arc()),
    ];
    let outcome = convert_batch(&entities, &ctx());
    assert_eq!(outcome.elements.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].index, 1);
    assert!(!outcome.all_failed());
}
