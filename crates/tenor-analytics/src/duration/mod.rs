//! Duration calculations for fixed income instruments.
//!
//! Duration measures the sensitivity of a bond's price to changes in yield.
//!
//! - **Macaulay Duration**: Weighted average time to receive cash flows
//! - **Modified Duration**: Price sensitivity measure (-∂P/∂y × 1/P)
//! - **Dollar Duration**: Modified duration scaled by price / 100
//! - **Effective / Key Rate Duration**: Central-difference estimates
//!
//! ## Formulas
//!
//! ```text
//! D_mac = Σ(t_i × PV(CF_i)) / P
//! D_mod = D_mac / (1 + y/f)
//! C     = Σ(t_i × (t_i + 1/f) × PV(CF_i)) / (P × (1 + y/f)²)
//! ```

mod effective;

pub use effective::*;

use serde::{Deserialize, Serialize};
use tenor_core::error::ensure_finite_result;
use tenor_core::{BondParams, CashFlow, TenorError, TenorResult};

use crate::config::EngineConfig;
use crate::parallel::maybe_parallel_map;
use crate::pricing::{cash_flows, discount_base};

/// Complete duration analytics for one bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationResults {
    /// Sum of all discounted cash flows.
    pub price: f64,
    /// Weighted average time to cash flows, in years.
    pub macaulay_duration: f64,
    /// Percentage price sensitivity to a unit change in yield.
    pub modified_duration: f64,
    /// `modified_duration × price / 100`.
    pub dollar_duration: f64,
    /// Analytical convexity.
    pub convexity: f64,
    /// Discounted schedule, one row per period in ascending order.
    pub cash_flows: Vec<CashFlow>,
}

impl DurationResults {
    /// Estimate price change for a given yield shift.
    ///
    /// Uses duration + convexity approximation:
    /// ΔP ≈ P × (-D_mod × Δy + ½ × C × Δy²)
    pub fn estimate_price_change(&self, yield_change: f64) -> f64 {
        crate::convexity::price_change_with_convexity(
            self.modified_duration,
            self.convexity,
            self.price,
            yield_change,
        )
    }

    /// The convexity adjustment ½ × C × Δy², as a fraction of price.
    pub fn convexity_adjustment(&self, yield_change: f64) -> f64 {
        0.5 * self.convexity * yield_change.powi(2)
    }

    /// Sum of the undiscounted payments.
    pub fn total_payments(&self) -> f64 {
        self.cash_flows.iter().map(CashFlow::payment).sum()
    }
}

/// Computes price, durations and convexity in a single pass over the schedule.
///
/// # Errors
///
/// Returns [`TenorError::ComputationError`] if the discount base is not
/// positive, if the price is zero or not finite, or if any derived metric is
/// not finite.
///
/// # Example
///
/// ```rust
/// use tenor_analytics::duration::compute_duration;
/// use tenor_core::BondParams;
///
/// let zero = BondParams::new(1000.0, 0.0, 5.0, 0.04, 1).unwrap();
/// let results = compute_duration(&zero).unwrap();
/// assert!((results.macaulay_duration - 5.0).abs() < 1e-12);
/// ```
pub fn compute_duration(params: &BondParams) -> TenorResult<DurationResults> {
    let base = discount_base(params)?;
    let frequency = f64::from(params.frequency());

    let mut schedule = Vec::with_capacity(params.total_periods() as usize);
    let mut price = 0.0;
    let mut weighted_sum = 0.0;
    let mut convexity_sum = 0.0;

    for cf in cash_flows(params, base) {
        let t = cf.time();
        price += cf.present_value();
        weighted_sum += cf.weighted_pv();
        convexity_sum += t * (t + 1.0 / frequency) * cf.present_value();
        schedule.push(cf);
    }

    if !price.is_finite() || price == 0.0 {
        log::debug!("price {price} leaves duration undefined for {params}");
        return Err(TenorError::computation(format!(
            "price is {price}; duration is undefined"
        )));
    }

    let macaulay = ensure_finite_result("macaulay duration", weighted_sum / price)?;
    let modified = modified_from_macaulay(macaulay, params.ytm(), params.frequency());
    let dollar_duration = modified * price / 100.0;
    let convexity = ensure_finite_result("convexity", convexity_sum / (price * base.powi(2)))?;

    log::trace!(
        "{params}: price={price:.6} mac={macaulay:.6} mod={modified:.6} conv={convexity:.6}"
    );

    Ok(DurationResults {
        price,
        macaulay_duration: macaulay,
        modified_duration: ensure_finite_result("modified duration", modified)?,
        dollar_duration: ensure_finite_result("dollar duration", dollar_duration)?,
        convexity,
        cash_flows: schedule,
    })
}

/// Computes duration analytics for several bonds, preserving input order.
///
/// # Errors
///
/// Returns the first error encountered, in input order.
pub fn compare_bonds(bonds: &[BondParams]) -> TenorResult<Vec<DurationResults>> {
    compare_bonds_with_config(bonds, &EngineConfig::default())
}

/// Like [`compare_bonds`], parallelised according to `config` when the
/// `parallel` feature is enabled.
///
/// # Errors
///
/// Returns the first error encountered, in input order.
pub fn compare_bonds_with_config(
    bonds: &[BondParams],
    config: &EngineConfig,
) -> TenorResult<Vec<DurationResults>> {
    maybe_parallel_map(bonds, config, compute_duration)
        .into_iter()
        .collect()
}

/// Convert Macaulay duration to modified duration.
///
/// # Arguments
///
/// * `macaulay` - Macaulay duration
/// * `ytm` - Yield to maturity (as decimal)
/// * `frequency` - Compounding frequency per year
pub fn modified_from_macaulay(macaulay: f64, ytm: f64, frequency: u32) -> f64 {
    macaulay / (1.0 + ytm / f64::from(frequency))
}

/// Calculate approximate price change using modified duration.
///
/// # Arguments
///
/// * `mod_duration` - Modified duration
/// * `price` - Current price
/// * `yield_change` - Change in yield (as decimal, e.g., 0.01 for 100bps)
pub fn price_change_from_duration(mod_duration: f64, price: f64, yield_change: f64) -> f64 {
    price * (-mod_duration * yield_change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price;
    use approx::assert_relative_eq;

    fn par_bond() -> BondParams {
        BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap()
    }

    #[test]
    fn test_par_bond_scenario() {
        let results = compute_duration(&par_bond()).unwrap();

        assert_relative_eq!(results.price, 1000.0, max_relative = 1e-9);
        assert_relative_eq!(results.macaulay_duration, 7.989, epsilon = 1e-3);
        assert_relative_eq!(results.modified_duration, 7.794, epsilon = 1e-3);
        assert_relative_eq!(results.dollar_duration, 77.946, epsilon = 1e-3);
        assert!(results.convexity > 0.0);
        assert_relative_eq!(results.convexity, 73.629, epsilon = 1e-3);
        assert_eq!(results.cash_flows.len(), 20);
    }

    #[test]
    fn test_zero_coupon_scenario() {
        let zero = BondParams::new(1000.0, 0.0, 5.0, 0.04, 1).unwrap();
        let results = compute_duration(&zero).unwrap();

        assert_relative_eq!(results.macaulay_duration, 5.0, epsilon = 1e-12);
        assert_relative_eq!(results.modified_duration, 4.808, epsilon = 1e-3);
        // Zero coupon convexity = t × (t + 1) / (1 + y)²
        assert_relative_eq!(results.convexity, 30.0 / 1.04_f64.powi(2), epsilon = 1e-9);
    }

    #[test]
    fn test_two_year_semi_annual() {
        let bond = BondParams::new(100.0, 0.05, 2.0, 0.05, 2).unwrap();
        let results = compute_duration(&bond).unwrap();

        assert_relative_eq!(results.macaulay_duration, 1.928, epsilon = 1e-3);
        assert_relative_eq!(results.modified_duration, 1.881, epsilon = 1e-3);
    }

    #[test]
    fn test_invariants_hold() {
        let bond = BondParams::new(1000.0, 0.07, 15.0, 0.043, 4).unwrap();
        let r = compute_duration(&bond).unwrap();

        let weighted: f64 = r.cash_flows.iter().map(CashFlow::weighted_pv).sum();
        let pv: f64 = r.cash_flows.iter().map(CashFlow::present_value).sum();

        assert_relative_eq!(r.price, pv, max_relative = 1e-12);
        assert_relative_eq!(r.macaulay_duration, weighted / r.price, max_relative = 1e-12);
        assert_relative_eq!(
            r.modified_duration,
            r.macaulay_duration / (1.0 + 0.043 / 4.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            r.dollar_duration,
            r.modified_duration * r.price / 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_price_matches_pricing_kernel_exactly() {
        for params in [
            par_bond(),
            BondParams::new(1000.0, 0.0, 30.0, 0.061, 2).unwrap(),
            BondParams::new(250.0, 0.031, 7.0, 0.029, 12).unwrap(),
        ] {
            let results = compute_duration(&params).unwrap();
            assert_eq!(results.price, price(&params).unwrap());
        }
    }

    #[test]
    fn test_cash_flows_ascending() {
        let r = compute_duration(&par_bond()).unwrap();
        for (i, cf) in r.cash_flows.iter().enumerate() {
            assert_eq!(cf.period() as usize, i + 1);
        }
        assert!(r.cash_flows.last().unwrap().is_final());
        assert_relative_eq!(r.total_payments(), 1500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_macaulay_bounded_by_maturity() {
        for coupon in [0.0, 0.01, 0.05, 0.12] {
            let bond = BondParams::new(1000.0, coupon, 20.0, 0.06, 2).unwrap();
            let r = compute_duration(&bond).unwrap();
            assert!(r.macaulay_duration <= 20.0 + 1e-12);
        }
    }

    #[test]
    fn test_overflowing_discount_is_computation_error() {
        // (1 + 1e200)^2 overflows, so the only cash flow discounts to zero
        let bond = BondParams::new(1000.0, 0.0, 2.0, 1e200, 1).unwrap();
        let err = compute_duration(&bond).unwrap_err();
        assert!(err.is_computation_error());
    }

    #[test]
    fn test_undefined_discount_base() {
        let bond = BondParams::new(1000.0, 0.05, 10.0, -1.0, 1).unwrap();
        assert!(compute_duration(&bond).unwrap_err().is_computation_error());
    }

    #[test]
    fn test_compare_bonds_preserves_order() {
        let bonds = vec![
            BondParams::new(1000.0, 0.04, 5.0, 0.045, 2).unwrap(),
            BondParams::new(1000.0, 0.05, 10.0, 0.045, 2).unwrap(),
            BondParams::new(1000.0, 0.06, 30.0, 0.045, 2).unwrap(),
        ];
        let results = compare_bonds(&bonds).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].modified_duration < results[1].modified_duration);
        assert!(results[1].modified_duration < results[2].modified_duration);
        assert_eq!(results[1], compute_duration(&bonds[1]).unwrap());
    }

    #[test]
    fn test_modified_from_macaulay() {
        // D_mod = 5.0 / (1 + 0.06/2) = 5.0 / 1.03 ≈ 4.854
        assert_relative_eq!(modified_from_macaulay(5.0, 0.06, 2), 4.854, epsilon = 0.001);
    }

    #[test]
    fn test_price_change_from_duration() {
        // Price should drop by approximately 5% for 100bp yield increase
        assert_relative_eq!(price_change_from_duration(5.0, 100.0, 0.01), -5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_price_change() {
        let r = compute_duration(&par_bond()).unwrap();
        let estimate = r.estimate_price_change(0.01);
        assert_relative_eq!(estimate, -74.264, epsilon = 1e-3);
        assert!(r.convexity_adjustment(0.01) > 0.0);
    }
}
