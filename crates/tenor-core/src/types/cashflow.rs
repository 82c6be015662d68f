//! Discounted cash flow rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity with no coupon attached
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::Principal => "Principal",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// One period of a bond's discounted cash-flow schedule.
///
/// Produced by the duration engine; never mutated after construction.
///
/// # Example
///
/// ```rust
/// use tenor_core::{CashFlow, CashFlowType};
///
/// let cf = CashFlow::new(3, 2, 25.0, 1.05, CashFlowType::Coupon);
/// assert_eq!(cf.time(), 1.5);
/// assert!((cf.weighted_pv() - 1.5 * cf.present_value()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    period: u32,
    time: f64,
    payment: f64,
    present_value: f64,
    weighted_pv: f64,
    flow_type: CashFlowType,
}

impl CashFlow {
    /// Creates a cash flow for `period` of a bond paying `frequency` times a year.
    ///
    /// `discount_factor` is the growth factor `(1 + y/f)^period`; the present
    /// value is `payment / discount_factor`.
    #[must_use]
    pub fn new(
        period: u32,
        frequency: u32,
        payment: f64,
        discount_factor: f64,
        flow_type: CashFlowType,
    ) -> Self {
        let time = f64::from(period) / f64::from(frequency);
        let present_value = payment / discount_factor;
        Self {
            period,
            time,
            payment,
            present_value,
            weighted_pv: time * present_value,
            flow_type,
        }
    }

    /// Period index, starting at 1.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Years from valuation to payment.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Undiscounted amount paid.
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Payment discounted at the flat yield.
    pub fn present_value(&self) -> f64 {
        self.present_value
    }

    /// `time × present_value`, the Macaulay duration weight.
    pub fn weighted_pv(&self) -> f64 {
        self.weighted_pv
    }

    /// Kind of payment.
    pub fn flow_type(&self) -> CashFlowType {
        self.flow_type
    }

    /// Returns true if principal is repaid in this period.
    pub fn is_final(&self) -> bool {
        matches!(
            self.flow_type,
            CashFlowType::Principal | CashFlowType::CouponAndPrincipal
        )
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} t={:.4} {:.4} ({}) pv={:.4}",
            self.period, self.time, self.payment, self.flow_type, self.present_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cash_flow_fields() {
        let df = 1.025_f64.powi(4);
        let cf = CashFlow::new(4, 2, 25.0, df, CashFlowType::Coupon);

        assert_eq!(cf.period(), 4);
        assert_relative_eq!(cf.time(), 2.0);
        assert_relative_eq!(cf.payment(), 25.0);
        assert_relative_eq!(cf.present_value(), 25.0 / df);
        assert_relative_eq!(cf.weighted_pv(), 2.0 * 25.0 / df);
        assert!(!cf.is_final());
    }

    #[test]
    fn test_final_flow() {
        let cf = CashFlow::new(20, 2, 1025.0, 1.0, CashFlowType::CouponAndPrincipal);
        assert!(cf.is_final());
        assert_eq!(cf.flow_type().to_string(), "Coupon+Principal");

        let zero = CashFlow::new(5, 1, 1000.0, 1.0, CashFlowType::Principal);
        assert!(zero.is_final());
    }
}
