// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Geobridge geometry interchange layer
//!
//! Converts native CAD/BIM geometric entities (lines, arcs, ellipses,
//! polylines, compound chains, B-spline curves/surfaces, meshes) into
//! a single canonical, serializable geometry model and back, within
//! stated precision. Hosts extract entities to plain numeric data
//! ([`native::NativeEntity`]); the dispatcher classifies and converts
//! each one into a [`geometry::GeometryElement`] stamped with units
//! and a derived bounding box.

pub mod batch;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod native;
pub mod units;

pub use batch::{convert_batch, BatchOutcome};
pub use convert::{to_canonical, to_canonical_with_override, to_native, Assembly, Converted};
pub use error::ConvertError;
pub use geometry::GeometryElement;
pub use native::NativeEntity;
pub use units::{ScaleContext, Units};
