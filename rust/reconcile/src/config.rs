// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation settings, optionally loaded from environment variables.

use crate::error::{Error, Result};
use crate::rounding::RoundingMode;

/// Default per-axis tolerance: 5 mm in meters. CAD bounding boxes are loose.
pub const DEFAULT_TOLERANCE: f64 = 5e-3;

/// Default number of decimals corners are rounded to.
pub const DEFAULT_DECIMALS: u32 = 6;

/// Decimal places beyond this are below f64 resolution for typical coordinates.
const MAX_DECIMALS: u32 = 15;

/// Reconciliation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReconcileConfig {
    /// Per-axis tolerance. A corner matches when every axis delta is strictly less.
    pub tolerance: f64,
    /// Decimal places corners are rounded to before comparison; `None` skips rounding.
    pub decimals: Option<u32>,
    /// Tie-breaking rule for rounding.
    pub rounding: RoundingMode,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            decimals: Some(DEFAULT_DECIMALS),
            rounding: RoundingMode::HalfEven,
        }
    }
}

impl ReconcileConfig {
    /// Load configuration from environment variables.
    ///
    /// - `IFC_RECONCILE_TOLERANCE`: per-axis tolerance (default 0.005)
    /// - `IFC_RECONCILE_DECIMALS`: rounding places, or `none` (default 6)
    /// - `IFC_RECONCILE_ROUNDING`: `half-even` or `half-away` (default half-even)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            tolerance: lookup("IFC_RECONCILE_TOLERANCE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.tolerance),
            decimals: match lookup("IFC_RECONCILE_DECIMALS") {
                Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
                Some(v) => v.trim().parse().ok().or(defaults.decimals),
                None => defaults.decimals,
            },
            rounding: lookup("IFC_RECONCILE_ROUNDING")
                .and_then(|v| RoundingMode::parse(&v))
                .unwrap_or(defaults.rounding),
        }
    }

    /// Set the per-axis tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the rounding places; `None` compares unrounded corners
    pub fn with_decimals(mut self, decimals: Option<u32>) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the tie-breaking rule
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Reject settings under which nothing could ever match.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if let Some(decimals) = self.decimals {
            if decimals > MAX_DECIMALS {
                return Err(Error::InvalidConfig(format!(
                    "decimals must be at most {}, got {}",
                    MAX_DECIMALS, decimals
                )));
            }
        }
        Ok(())
    }
}
