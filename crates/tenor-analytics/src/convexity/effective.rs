//! Effective convexity by central second difference.

use tenor_core::error::ensure_finite_result;
use tenor_core::{BondParams, TenorResult};

use crate::duration::{check_base_price, validate_bump, BumpedPrices};

/// Default bump for effective convexity (100 basis points).
pub const EFFECTIVE_CONVEXITY_BUMP: f64 = 0.01;

/// Calculate effective convexity from three prices.
///
/// # Arguments
///
/// * `price_up` - Price when yield increases by bump size
/// * `price_down` - Price when yield decreases by bump size
/// * `price_base` - Current/base price
/// * `bump_size` - Yield bump size (as decimal)
///
/// # Errors
///
/// Returns an error if the base price is zero or the bump is not usable.
pub fn effective_convexity_from_prices(
    price_up: f64,
    price_down: f64,
    price_base: f64,
    bump_size: f64,
) -> TenorResult<f64> {
    check_base_price(price_base)?;
    validate_bump(bump_size)?;
    ensure_finite_result(
        "effective convexity",
        (price_down + price_up - 2.0 * price_base) / (price_base * bump_size.powi(2)),
    )
}

/// Effective convexity of a bond, re-priced at `ytm ± bump`.
///
/// # Errors
///
/// Returns [`tenor_core::TenorError::InvalidParameter`] for an unusable bump
/// and [`tenor_core::TenorError::ComputationError`] if any price cannot be computed.
pub fn effective_convexity(params: &BondParams, bump: f64) -> TenorResult<f64> {
    let BumpedPrices {
        base, down, up, ..
    } = BumpedPrices::compute(params, bump)?;
    effective_convexity_from_prices(up, down, base, bump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::compute_duration;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_convexity_from_prices() {
        // (101 + 99.1 - 200) / (100 × 0.0001) = 10
        let conv = effective_convexity_from_prices(99.1, 101.0, 100.0, 0.01).unwrap();
        assert_relative_eq!(conv, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_effective_convexity_zero_price_error() {
        assert!(effective_convexity_from_prices(99.0, 101.0, 0.0, 0.01).is_err());
    }

    #[test]
    fn test_matches_analytical() {
        let bond = BondParams::new(100.0, 0.075, 5.0, 0.075, 2).unwrap();
        let analytic = compute_duration(&bond).unwrap().convexity;
        let eff = effective_convexity(&bond, 0.001).unwrap();
        assert_relative_eq!(eff, analytic, max_relative = 1e-3);
        assert_relative_eq!(analytic, 20.57, epsilon = 0.01);
    }

    #[test]
    fn test_tiny_face_value_accepted() {
        let bond = BondParams::new(1e-9, 0.05, 10.0, 0.05, 2).unwrap();
        let conv = effective_convexity(&bond, EFFECTIVE_CONVEXITY_BUMP).unwrap();
        assert!(conv > 0.0);
    }

    #[test]
    fn test_rejects_bad_bump() {
        let bond = BondParams::new(100.0, 0.05, 5.0, 0.05, 2).unwrap();
        assert!(effective_convexity(&bond, 0.0)
            .unwrap_err()
            .is_invalid_parameter());
    }
}
