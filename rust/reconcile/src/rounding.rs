// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point rounding of corner coordinates
//!
//! Corners are rounded before the tolerance test to strip floating-point noise
//! left by the transform. At 6 decimals this moves a value by at most 5e-7,
//! far below the default 5e-3 tolerance.

use nalgebra::Point3;

/// How ties are broken when rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoundingMode {
    /// Banker's rounding (2.5 -> 2, 3.5 -> 4)
    #[default]
    HalfEven,
    /// Ties move away from zero (2.5 -> 3, -2.5 -> -3)
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Parse the names accepted by `IFC_RECONCILE_ROUNDING`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "half-even" | "even" | "bankers" => Some(Self::HalfEven),
            "half-away" | "half-away-from-zero" | "away" => Some(Self::HalfAwayFromZero),
            _ => None,
        }
    }
}

/// Round `value` to `decimals` places.
///
/// Values too large to scale (the scaled value overflows) are returned as-is,
/// as are NaN and infinities. So is every value when `decimals` does not fit
/// an `i32` exponent.
#[inline]
pub fn round_to(value: f64, decimals: u32, mode: RoundingMode) -> f64 {
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = match mode {
        RoundingMode::HalfEven => scaled.round_ties_even(),
        RoundingMode::HalfAwayFromZero => scaled.round(),
    };
    rounded / factor
}

/// Round every coordinate of a point
#[inline]
pub fn round_point(point: &Point3<f64>, decimals: u32, mode: RoundingMode) -> Point3<f64> {
    point.map(|c| round_to(c, decimals, mode))
}
