//! Duration gap and immunization.
//!
//! ## Formula
//!
//! ```text
//! Gap = D_A - (L / A) × D_L
//! ```
//!
//! A portfolio is immunized against small parallel shifts when its duration
//! matches the investment horizon.

use serde::{Deserialize, Serialize};
use tenor_core::error::{ensure_finite, ensure_finite_result};
use tenor_core::{TenorError, TenorResult};

/// Largest absolute gap, in years, still reported as immunized.
pub const IMMUNIZATION_TOLERANCE: f64 = 0.1;

/// Outcome of an immunization check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImmunizationStatus {
    /// True when `|gap|` is below the tolerance.
    pub is_immunized: bool,
    /// `current_duration - target_horizon`.
    pub gap: f64,
}

impl ImmunizationStatus {
    /// Human readable guidance for the gap.
    pub fn recommendation(&self) -> &'static str {
        if self.is_immunized {
            "duration matches the horizon"
        } else if self.gap > 0.0 {
            "shorten duration to match the horizon"
        } else {
            "lengthen duration to match the horizon"
        }
    }
}

/// Leverage-adjusted duration gap.
///
/// # Arguments
///
/// * `assets_duration` - Duration of the assets
/// * `liabilities_duration` - Duration of the liabilities
/// * `assets_value` - Market value of the assets
/// * `liabilities_value` - Market value of the liabilities
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] for a non-finite input and
/// [`TenorError::ComputationError`] when the gap itself is not finite, as
/// happens with zero assets.
pub fn duration_gap(
    assets_duration: f64,
    liabilities_duration: f64,
    assets_value: f64,
    liabilities_value: f64,
) -> TenorResult<f64> {
    let d_a = ensure_finite("assets_duration", assets_duration)?;
    let d_l = ensure_finite("liabilities_duration", liabilities_duration)?;
    let a = ensure_finite("assets_value", assets_value)?;
    let l = ensure_finite("liabilities_value", liabilities_value)?;

    let gap = d_a - (l / a) * d_l;
    if !gap.is_finite() {
        log::debug!("duration gap undefined for assets {a}, liabilities {l}");
    }
    ensure_finite_result("duration gap", gap)
}

/// Compares a portfolio duration with a target horizon using the default
/// tolerance of 0.1 years.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] for a non-finite input.
///
/// # Example
///
/// ```rust
/// use tenor_analytics::immunization::immunization_check;
///
/// let status = immunization_check(5.0, 5.05).unwrap();
/// assert!(status.is_immunized);
/// ```
pub fn immunization_check(
    target_horizon: f64,
    current_duration: f64,
) -> TenorResult<ImmunizationStatus> {
    immunization_check_with_tolerance(target_horizon, current_duration, IMMUNIZATION_TOLERANCE)
}

/// [`immunization_check`] with an explicit tolerance.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] for a non-finite input or a
/// tolerance that is not positive.
pub fn immunization_check_with_tolerance(
    target_horizon: f64,
    current_duration: f64,
    tolerance: f64,
) -> TenorResult<ImmunizationStatus> {
    let target = ensure_finite("target_horizon", target_horizon)?;
    let current = ensure_finite("current_duration", current_duration)?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(TenorError::invalid_parameter(
            "tolerance",
            format!("must be positive and finite, got {tolerance}"),
        ));
    }

    let gap = current - target;
    Ok(ImmunizationStatus {
        is_immunized: gap.abs() < tolerance,
        gap,
    })
}
