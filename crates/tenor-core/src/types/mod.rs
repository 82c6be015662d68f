//! Domain types for the duration engine.
//!
//! - [`BondParams`]: Validated plain-vanilla bond description
//! - [`CashFlow`]: One discounted period of a bond's schedule
//! - [`YieldCurvePoint`]: A single observed point of a yield curve

mod bond_params;
mod cashflow;
mod curve_point;

pub use bond_params::{BondParams, MAX_PERIODS, PERIOD_ALIGNMENT_TOLERANCE};
pub use cashflow::{CashFlow, CashFlowType};
pub use curve_point::YieldCurvePoint;
