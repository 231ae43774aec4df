// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Geobridge Contributors

//! Unit vocabulary and host scale normalization
//!
//! Hosts store coordinates in integer-backed "units of resolution"
//! (UoR). A [`ScaleContext`] carries the UoR-per-unit factor queried
//! once per open document, together with the document's working units;
//! it is passed explicitly into every conversion call instead of
//! living in ambient global state.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed unit vocabulary of the canonical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "yd")]
    Yards,
    #[serde(rename = "mi")]
    Miles,
}

impl Units {
    /// Scale factor from this unit to meters.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Units::Millimeters => 0.001,
            Units::Centimeters => 0.01,
            Units::Meters => 1.0,
            Units::Kilometers => 1000.0,
            Units::Inches => 0.0254,
            Units::Feet => 0.3048,
            Units::Yards => 0.9144,
            Units::Miles => 1609.344,
        }
    }

    /// Scale factor converting a value in this unit to `other`.
    pub fn factor_to(self, other: Units) -> f64 {
        self.meters_per_unit() / other.meters_per_unit()
    }

    /// Short wire-format name ("mm", "ft", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Units::Millimeters => "mm",
            Units::Centimeters => "cm",
            Units::Meters => "m",
            Units::Kilometers => "km",
            Units::Inches => "in",
            Units::Feet => "ft",
            Units::Yards => "yd",
            Units::Miles => "mi",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Units {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetres" => Ok(Units::Millimeters),
            "cm" | "centimeter" | "centimeters" | "centimetres" => Ok(Units::Centimeters),
            "m" | "meter" | "meters" | "metres" => Ok(Units::Meters),
            "km" | "kilometer" | "kilometers" | "kilometres" => Ok(Units::Kilometers),
            "in" | "inch" | "inches" => Ok(Units::Inches),
            "ft" | "foot" | "feet" => Ok(Units::Feet),
            "yd" | "yard" | "yards" => Ok(Units::Yards),
            "mi" | "mile" | "miles" => Ok(Units::Miles),
            other => Err(ConvertError::UnsupportedUnit(other.to_string())),
        }
    }
}

/// Default endpoint-matching tolerance for chain assembly, in working
/// units.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Per-document scale state.
///
/// `uor_per_unit` is the host's units-of-resolution per working unit,
/// queried once when the document opens and cached here. Conversions
/// never recompute it per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleContext {
    pub uor_per_unit: f64,
    pub units: Units,
    pub tolerance: f64,
}

impl ScaleContext {
    pub fn new(uor_per_unit: f64, units: Units) -> Self {
        Self {
            uor_per_unit,
            units,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the working units from an override string, keeping the
    /// cached UoR factor. Unknown strings fail the conversion.
    pub fn with_units_override(&self, name: &str) -> Result<Self, ConvertError> {
        let units = Units::from_str(name)?;
        Ok(Self { units, ..*self })
    }

    /// Host UoR value -> canonical value in the context units.
    pub fn to_canonical(&self, value_uor: f64) -> f64 {
        value_uor / self.uor_per_unit
    }

    /// Canonical value in `units` -> host UoR value. The unit-name
    /// factor is resolved first, then the UoR multiplier applied.
    pub fn to_native(&self, value: f64, units: Units) -> f64 {
        value * units.factor_to(self.units) * self.uor_per_unit
    }
}
