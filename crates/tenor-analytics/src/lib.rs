//! # Tenor Analytics
//!
//! Duration engine for plain-vanilla fixed-coupon bonds evaluated at a flat
//! yield to maturity.
//!
//! - **Pricing**: present value of the coupon schedule and redemption
//! - **Duration**: Macaulay, modified and dollar duration in a single pass
//! - **Convexity**: analytical and effective (finite difference)
//! - **Price change**: exact re-pricing against duration and convexity estimates
//! - **Curves**: lazily generated price-yield curves
//! - **Sensitivity**: key-rate and effective duration by central differences
//! - **Portfolio**: weighted duration, duration gap and immunization checks
//! - **Term structure**: par-bond durations along an observed treasury curve
//!
//! ## Usage
//!
//! ```rust
//! use tenor_analytics::prelude::*;
//!
//! let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
//! let results = compute_duration(&bond).unwrap();
//!
//! assert!((results.price - 1000.0).abs() < 1e-6);
//! assert!((results.macaulay_duration - 7.989).abs() < 1e-3);
//!
//! let shock = price_change(&bond, 100.0).unwrap();
//! assert!(shock.dollar_change < 0.0);
//! ```
//!
//! Every function is pure: no shared state is read or written, so all of them
//! may be called concurrently.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod convexity;
pub mod curve;
pub mod duration;
pub mod engine;
pub mod immunization;
pub mod parallel;
pub mod portfolio;
pub mod price_change;
pub mod pricing;
pub mod term_structure;

pub use tenor_core::{TenorError, TenorResult};

/// Basis points per unit of yield.
pub const BASIS_POINTS_PER_UNIT: f64 = 10_000.0;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tenor_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use tenor_core::prelude::*;

    pub use crate::config::EngineConfig;
    pub use crate::convexity::{effective_convexity, price_change_with_convexity};
    pub use crate::curve::{generate_curve, CurvePoint, PriceYieldCurve};
    pub use crate::duration::{
        compare_bonds, compute_duration, effective_duration, key_rate_duration,
        modified_from_macaulay, price_change_from_duration, DurationResults,
    };
    pub use crate::engine::DurationEngine;
    pub use crate::immunization::{duration_gap, immunization_check, ImmunizationStatus};
    pub use crate::portfolio::{
        aggregate_portfolio, portfolio_duration, PortfolioEntry, PortfolioSummary,
    };
    pub use crate::price_change::{price_change, symmetric_shock, PriceChange, SymmetricShock};
    pub use crate::pricing::price;
    pub use crate::term_structure::{
        duration_term_structure, treasury_bond_params, CurveShape, CurveShapeReport,
        TermStructurePoint,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_exposes_engine() {
        let bond = BondParams::new(100.0, 0.05, 2.0, 0.05, 2).unwrap();
        let engine = DurationEngine::default();
        let results = engine.analyze(&bond).unwrap();
        assert_eq!(results.cash_flows.len(), 4);
    }
}
