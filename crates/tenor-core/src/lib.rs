//! # Tenor Core
//!
//! Core types and the error taxonomy for the Tenor duration engine.
//!
//! This crate provides the building blocks shared by the analytics engine and
//! its consumers:
//!
//! - **Types**: [`BondParams`], a validated plain-vanilla bond description,
//!   [`CashFlow`] rows of a discounted schedule, and [`YieldCurvePoint`]
//!   market observations.
//! - **Errors**: [`TenorError`] separating rejected inputs from numerical
//!   failures.
//!
//! ## Design Philosophy
//!
//! - **Validated once**: a `BondParams` value cannot hold an invalid field, so
//!   the pricing kernel never re-checks its inputs.
//! - **Immutable values**: every computation returns fresh results.
//!
//! ## Example
//!
//! ```rust
//! use tenor_core::prelude::*;
//!
//! let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
//! assert_eq!(bond.total_periods(), 20);
//! assert!((bond.periodic_coupon() - 25.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{TenorError, TenorResult};
    pub use crate::types::{BondParams, CashFlow, CashFlowType, YieldCurvePoint};
}

// Re-export commonly used types at crate root
pub use error::{TenorError, TenorResult};
pub use types::{BondParams, CashFlow, CashFlowType, YieldCurvePoint};
