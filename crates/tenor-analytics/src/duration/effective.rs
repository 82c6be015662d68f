//! Effective and key rate duration.
//!
//! Both measures re-price the bond with its yield bumped down and up by the
//! same amount and take a central difference. For a plain bullet bond they
//! converge to the analytical modified duration as the bump shrinks.
//!
//! ## Formula
//!
//! ```text
//! D_eff = (P₋ - P₊) / (2 × P₀ × Δy)
//! ```
//!
//! where:
//! - P₋ = price when yield decreases by Δy
//! - P₊ = price when yield increases by Δy
//! - P₀ = current price
//! - Δy = yield bump size

use tenor_core::error::ensure_finite_result;
use tenor_core::{BondParams, TenorError, TenorResult};

use crate::pricing::price;

/// Default bump for key rate duration (1 basis point).
pub const KEY_RATE_BUMP: f64 = 0.0001;

/// Default bump for effective duration (100 basis points).
pub const EFFECTIVE_DURATION_BUMP: f64 = 0.01;

/// Smallest bump accepted by the finite-difference measures.
pub const MIN_BUMP_SIZE: f64 = 1e-12;

/// Prices at the base yield and at the yield bumped down and up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BumpedPrices {
    pub base: f64,
    pub down: f64,
    pub up: f64,
    pub bump: f64,
}

impl BumpedPrices {
    /// Re-prices `params` at `ytm - bump` and `ytm + bump`.
    pub(crate) fn compute(params: &BondParams, bump: f64) -> TenorResult<Self> {
        validate_bump(bump)?;
        let base = check_base_price(price(params)?)?;
        let down = price(&params.with_ytm(params.ytm() - bump)?)?;
        let up = price(&params.with_ytm(params.ytm() + bump)?)?;
        Ok(Self {
            base,
            down,
            up,
            bump,
        })
    }

    pub(crate) fn duration(&self) -> TenorResult<f64> {
        ensure_finite_result(
            "effective duration",
            (self.down - self.up) / (2.0 * self.base * self.bump),
        )
    }
}

/// Rejects a base price that cannot be divided by: zero, subnormal or non-finite.
pub(crate) fn check_base_price(base: f64) -> TenorResult<f64> {
    if base == 0.0 || !base.is_normal() {
        return Err(TenorError::computation(format!("base price {base} is unusable")));
    }
    Ok(base)
}

/// Rejects bumps that are non-finite or too small to difference.
pub(crate) fn validate_bump(bump: f64) -> TenorResult<f64> {
    if !bump.is_finite() {
        return Err(TenorError::invalid_parameter("bump", "must be finite"));
    }
    if bump < MIN_BUMP_SIZE {
        return Err(TenorError::invalid_parameter(
            "bump",
            format!("must be at least {MIN_BUMP_SIZE:e}, got {bump}"),
        ));
    }
    Ok(bump)
}

/// Calculate effective duration from three prices.
///
/// # Arguments
///
/// * `price_up` - Price when yield increases by bump size
/// * `price_down` - Price when yield decreases by bump size
/// * `price_base` - Current/base price
/// * `bump_size` - Yield bump size (as decimal, e.g., 0.0001 for 1bp)
///
/// # Errors
///
/// Returns an error if the base price is zero or the bump is not usable.
pub fn effective_duration_from_prices(
    price_up: f64,
    price_down: f64,
    price_base: f64,
    bump_size: f64,
) -> TenorResult<f64> {
    check_base_price(price_base)?;
    validate_bump(bump_size)?;
    ensure_finite_result(
        "effective duration",
        (price_down - price_up) / (2.0 * price_base * bump_size),
    )
}

/// Sensitivity to a small yield bump, by default one basis point.
///
/// For a single flat-yield bond this is a parallel bump; the name follows the
/// convention of reporting the one-basis-point measure as a key rate duration.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] for a non-finite bump or one
/// below [`MIN_BUMP_SIZE`], and [`TenorError::ComputationError`] if any of
/// the three prices cannot be computed.
pub fn key_rate_duration(params: &BondParams, bump: f64) -> TenorResult<f64> {
    let prices = BumpedPrices::compute(params, bump)?;
    let duration = prices.duration()?;
    log::trace!("key rate duration {duration:.6} at bump {bump} for {params}");
    Ok(duration)
}

/// Effective duration with a wider bump, by default 100 basis points.
///
/// # Errors
///
/// Same conditions as [`key_rate_duration`].
pub fn effective_duration(params: &BondParams, bump: f64) -> TenorResult<f64> {
    let prices = BumpedPrices::compute(params, bump)?;
    let duration = prices.duration()?;
    log::trace!("effective duration {duration:.6} at bump {bump} for {params}");
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::compute_duration;
    use approx::assert_relative_eq;

    fn par_bond() -> BondParams {
        BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap()
    }

    #[test]
    fn test_effective_duration_from_prices() {
        // If mod dur ≈ 5, then for +10bps: ΔP ≈ -5 × 100 × 0.001 = -0.5
        let dur = effective_duration_from_prices(99.5, 100.5, 100.0, 0.001).unwrap();
        assert_relative_eq!(dur, 5.0, epsilon = 0.01);
    }

    #[test]
    fn test_effective_duration_zero_price_error() {
        let result = effective_duration_from_prices(99.5, 100.5, 0.0, 0.001);
        assert!(result.unwrap_err().is_computation_error());
    }

    #[test]
    fn test_effective_duration_zero_bump_error() {
        let result = effective_duration_from_prices(99.5, 100.5, 100.0, 0.0);
        assert!(result.unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_key_rate_close_to_modified() {
        let bond = par_bond();
        let analytic = compute_duration(&bond).unwrap().modified_duration;
        let krd = key_rate_duration(&bond, KEY_RATE_BUMP).unwrap();
        assert_relative_eq!(krd, analytic, epsilon = 1e-4);
    }

    #[test]
    fn test_key_rate_converges() {
        let bond = BondParams::new(1000.0, 0.06, 20.0, 0.045, 2).unwrap();
        let analytic = compute_duration(&bond).unwrap().modified_duration;

        let errors: Vec<f64> = [0.01, 0.001, 0.0001]
            .iter()
            .map(|&bump| (key_rate_duration(&bond, bump).unwrap() - analytic).abs())
            .collect();

        assert!(errors[1] < errors[0]);
        assert!(errors[2] < errors[1]);
    }

    #[test]
    fn test_effective_duration_default_bump() {
        let bond = par_bond();
        let eff = effective_duration(&bond, EFFECTIVE_DURATION_BUMP).unwrap();
        let analytic = compute_duration(&bond).unwrap().modified_duration;
        // A 100bp bump is coarse but still within a few hundredths
        assert_relative_eq!(eff, analytic, epsilon = 0.05);
    }

    #[test]
    fn test_tiny_face_value_is_priced() {
        // A face of 1e-9 prices around 1e-9, well clear of the subnormal range
        let bond = BondParams::new(1e-9, 0.05, 10.0, 0.05, 2).unwrap();
        let krd = key_rate_duration(&bond, KEY_RATE_BUMP).unwrap();
        let analytic = compute_duration(&bond).unwrap().modified_duration;
        assert_relative_eq!(krd, analytic, epsilon = 1e-4);
    }

    #[test]
    fn test_unusable_base_price() {
        assert!(check_base_price(0.0).unwrap_err().is_computation_error());
        assert!(check_base_price(f64::NAN).is_err());
        assert!(check_base_price(1e-310).is_err());
        assert_eq!(check_base_price(1e-9).unwrap(), 1e-9);
    }

    #[test]
    fn test_bad_bumps_rejected() {
        let bond = par_bond();
        for bump in [0.0, -0.0001, 1e-13, f64::NAN, f64::INFINITY] {
            let err = key_rate_duration(&bond, bump).unwrap_err();
            assert!(err.is_invalid_parameter(), "bump {bump} accepted");
        }
        assert!(effective_duration(&bond, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_bump_past_discount_floor_is_computation_error() {
        // ytm - bump = -2.5 leaves a negative discount base at semi-annual
        let bond = BondParams::new(1000.0, 0.05, 10.0, 0.5, 2).unwrap();
        let err = effective_duration(&bond, 3.0).unwrap_err();
        assert!(err.is_computation_error());
    }
}
