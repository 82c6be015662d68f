//! Price change under a parallel yield shock.
//!
//! The bond is re-priced exactly at the shifted yield and the result is set
//! against the first-order (duration) and second-order (duration plus
//! convexity) estimates.
//!
//! ## Formula
//!
//! ```text
//! Δy               = bps / 10 000
//! duration_approx  = P × (-D_mod × Δy)
//! with_convexity   = P × (-D_mod × Δy + ½ × C × Δy²)
//! ```

use serde::{Deserialize, Serialize};
use tenor_core::error::ensure_finite;
use tenor_core::{BondParams, TenorResult};

use crate::convexity::price_change_with_convexity;
use crate::duration::{compute_duration, price_change_from_duration};
use crate::pricing::price;
use crate::BASIS_POINTS_PER_UNIT;

/// Exact and approximated price change for one yield shock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    /// Shock applied, in basis points.
    pub yield_change_bps: f64,
    /// Price before the shock.
    pub old_price: f64,
    /// Exact price at the shocked yield.
    pub new_price: f64,
    /// `new_price - old_price`.
    pub dollar_change: f64,
    /// `dollar_change / old_price × 100`.
    pub percent_change: f64,
    /// First-order estimate of the dollar change.
    pub duration_approx: f64,
    /// Second-order estimate of the dollar change.
    pub with_convexity: f64,
}

impl PriceChange {
    /// Absolute error of the duration-only estimate.
    pub fn duration_error(&self) -> f64 {
        (self.duration_approx - self.dollar_change).abs()
    }

    /// Absolute error of the duration plus convexity estimate.
    pub fn convexity_error(&self) -> f64 {
        (self.with_convexity - self.dollar_change).abs()
    }
}

/// Paired up and down shocks of the same size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetricShock {
    /// Yield raised by the shock.
    pub up: PriceChange,
    /// Yield lowered by the shock.
    pub down: PriceChange,
    /// `down.dollar_change + up.dollar_change`; positive for positively
    /// convex bonds.
    pub convexity_gain: f64,
}

/// Re-prices `params` after a parallel yield shift of `yield_change_bps`.
///
/// A zero shift returns `new_price == old_price` exactly.
///
/// # Errors
///
/// Returns [`tenor_core::TenorError::InvalidParameter`] if the shift is not
/// finite, and [`tenor_core::TenorError::ComputationError`] if either price
/// cannot be computed.
///
/// # Example
///
/// ```rust
/// use tenor_analytics::price_change::price_change;
/// use tenor_core::BondParams;
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
/// let change = price_change(&bond, 100.0).unwrap();
/// assert!(change.new_price < change.old_price);
/// assert!(change.convexity_error() < change.duration_error());
/// ```
pub fn price_change(params: &BondParams, yield_change_bps: f64) -> TenorResult<PriceChange> {
    let bps = ensure_finite("yield_change_bps", yield_change_bps)?;
    let analytics = compute_duration(params)?;
    let old_price = analytics.price;

    let dy = bps / BASIS_POINTS_PER_UNIT;
    let shocked = params.with_ytm(params.ytm() + dy)?;
    let new_price = if dy == 0.0 { old_price } else { price(&shocked)? };
    let dollar_change = new_price - old_price;

    log::debug!("{bps:+}bp shock on {params}: {old_price:.6} -> {new_price:.6}");

    Ok(PriceChange {
        yield_change_bps: bps,
        old_price,
        new_price,
        dollar_change,
        percent_change: dollar_change / old_price * 100.0,
        duration_approx: price_change_from_duration(analytics.modified_duration, old_price, dy),
        with_convexity: price_change_with_convexity(
            analytics.modified_duration,
            analytics.convexity,
            old_price,
            dy,
        ),
    })
}

/// Applies `+bps` and `-bps` and reports the asymmetry.
///
/// # Errors
///
/// Same conditions as [`price_change`].
pub fn symmetric_shock(params: &BondParams, bps: f64) -> TenorResult<SymmetricShock> {
    let magnitude = ensure_finite("bps", bps)?.abs();
    let up = price_change(params, magnitude)?;
    let down = price_change(params, -magnitude)?;
    Ok(SymmetricShock {
        up,
        down,
        convexity_gain: down.dollar_change + up.dollar_change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn par_bond() -> BondParams {
        BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap()
    }

    #[test]
    fn test_hundred_bp_shock() {
        let change = price_change(&par_bond(), 100.0).unwrap();

        assert_relative_eq!(change.dollar_change, -74.387, epsilon = 1e-3);
        assert_relative_eq!(change.duration_approx, -77.946, epsilon = 1e-3);
        assert_relative_eq!(change.with_convexity, -74.264, epsilon = 1e-3);
        assert_relative_eq!(change.percent_change, -7.4387, epsilon = 1e-4);
        // Bounded by the linear estimate
        assert!(change.dollar_change.abs() <= change.old_price * 7.794_581_2 * 0.01);
    }

    #[test]
    fn test_zero_shift_is_exact() {
        let bond = BondParams::new(1000.0, 0.037, 13.0, 0.061, 4).unwrap();
        let change = price_change(&bond, 0.0).unwrap();

        assert_eq!(change.new_price, change.old_price);
        assert_eq!(change.dollar_change, 0.0);
        assert_eq!(change.percent_change, 0.0);
    }

    #[test]
    fn test_convexity_improves_small_shocks() {
        for bps in [-25.0, -10.0, -1.0, 1.0, 10.0, 25.0] {
            let change = price_change(&par_bond(), bps).unwrap();
            assert!(
                change.convexity_error() < change.duration_error(),
                "{bps}bp: {change:?}"
            );
        }
    }

    #[test]
    fn test_direction() {
        assert!(price_change(&par_bond(), 50.0).unwrap().dollar_change < 0.0);
        assert!(price_change(&par_bond(), -50.0).unwrap().dollar_change > 0.0);
    }

    #[test]
    fn test_non_finite_shift_rejected() {
        let err = price_change(&par_bond(), f64::NAN).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_shock_below_discount_floor() {
        // -25000bp at annual frequency leaves 1 + y ≤ 0
        let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 1).unwrap();
        assert!(price_change(&bond, -25_000.0)
            .unwrap_err()
            .is_computation_error());
    }

    #[test]
    fn test_symmetric_shock() {
        let shock = symmetric_shock(&par_bond(), -100.0).unwrap();

        assert_eq!(shock.up.yield_change_bps, 100.0);
        assert_eq!(shock.down.yield_change_bps, -100.0);
        assert!(shock.convexity_gain > 0.0);
        assert!(shock.down.dollar_change > -shock.up.dollar_change);
    }
}
