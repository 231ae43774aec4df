// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Conversion error taxonomy

use thiserror::Error;

/// Errors that abort a single entity conversion.
///
/// Degenerate geometry is not an error: a zero-length line or
/// zero-radius arc downgrades to a canonical `Point`. Chain assembly
/// leftovers are surfaced on the result (`Assembly::dropped`), not
/// raised. Best-effort side computations (display polylines) discard
/// their failure at the call site.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The unit string has no known scale factor. Fatal for the
    /// containing conversion, never retried.
    #[error("unsupported units: {0}")]
    UnsupportedUnit(String),

    /// The dispatcher received a native or canonical kind with no
    /// registered conversion. Sibling entities in a batch are
    /// unaffected.
    #[error("no conversion registered for {0}")]
    UnsupportedType(&'static str),

    /// Native data that violates its own structural contract, e.g. a
    /// B-spline whose knot count does not match its pole count.
    #[error("invalid native geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
