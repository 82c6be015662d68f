//! Bond pricing at a flat yield.
//!
//! ## Formula
//!
//! ```text
//! P = Σ C / (1 + y/f)^t  +  F / (1 + y/f)^N      t = 1..N
//! ```
//!
//! where C = F × c / f is the periodic coupon and N = years × f.
//!
//! The schedule walk in this module is the only place cash flows are
//! discounted. [`price`] and [`crate::duration::compute_duration`] both fold
//! over it in period order, so they agree to the last bit.

use tenor_core::error::ensure_finite_result;
use tenor_core::{BondParams, CashFlow, CashFlowType, TenorError, TenorResult};

/// Prices a bond at its own yield to maturity.
///
/// # Errors
///
/// Returns [`TenorError::ComputationError`] if the periodic yield is at or
/// below -100% (the discount base `1 + y/f` is not positive) or if the
/// resulting price is zero or not finite.
///
/// # Example
///
/// ```rust
/// use tenor_analytics::pricing::price;
/// use tenor_core::BondParams;
///
/// let par = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
/// assert!((price(&par).unwrap() - 1000.0).abs() < 1e-6);
/// ```
pub fn price(params: &BondParams) -> TenorResult<f64> {
    let base = discount_base(params)?;
    let price = ensure_finite_result("price", present_value(params, base))?;
    if price == 0.0 {
        log::debug!("price underflowed to zero for {params}");
        return Err(TenorError::computation("price is 0"));
    }
    Ok(price)
}

/// Validated one-period growth factor `1 + ytm / frequency`.
pub(crate) fn discount_base(params: &BondParams) -> TenorResult<f64> {
    let base = params.discount_base();
    if base.is_finite() && base > 0.0 {
        Ok(base)
    } else {
        log::debug!("discount base {base} undefined for {params}");
        Err(TenorError::computation(format!(
            "periodic yield {} leaves a non-positive discount base {base}",
            params.periodic_ytm()
        )))
    }
}

/// Walks the discounted schedule for periods 1..=N.
///
/// `base` must be positive; callers go through [`discount_base`] or construct
/// it from a yield known to be above -100% per period.
pub(crate) fn cash_flows(params: &BondParams, base: f64) -> impl Iterator<Item = CashFlow> + '_ {
    let total = params.total_periods();
    let coupon = params.periodic_coupon();
    let frequency = params.frequency();

    (1..=total).map(move |period| {
        let (payment, flow_type) = if period == total {
            let kind = if params.is_zero_coupon() {
                CashFlowType::Principal
            } else {
                CashFlowType::CouponAndPrincipal
            };
            (coupon + params.face_value(), kind)
        } else {
            (coupon, CashFlowType::Coupon)
        };
        let discount_factor = base.powi(period as i32);
        CashFlow::new(period, frequency, payment, discount_factor, flow_type)
    })
}

/// Sum of discounted cash flows at the given discount base.
pub(crate) fn present_value(params: &BondParams, base: f64) -> f64 {
    cash_flows(params, base).fold(0.0, |acc, cf| acc + cf.present_value())
}

/// Discount base for an arbitrary yield on the bond's payment frequency.
pub(crate) fn base_for_yield(params: &BondParams, ytm: f64) -> f64 {
    1.0 + ytm / f64::from(params.frequency())
}
