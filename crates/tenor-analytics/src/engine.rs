//! Configured entry point to the duration engine.
//!
//! [`DurationEngine`] bundles an [`EngineConfig`] with every analytic in the
//! crate so callers that load settings once (the command line, a service)
//! do not have to thread bump sizes and curve windows through each call.
//!
//! # Example
//!
//! ```rust
//! use tenor_analytics::prelude::*;
//!
//! let engine = DurationEngine::new(EngineConfig::new().with_curve(0.02, 8)).unwrap();
//! let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
//!
//! assert_eq!(engine.curve(&bond).unwrap().count(), 9);
//! ```

use tenor_core::{BondParams, TenorResult, YieldCurvePoint};

use crate::config::EngineConfig;
use crate::convexity::effective_convexity;
use crate::curve::{generate_curve, PriceYieldCurve};
use crate::duration::{
    compare_bonds_with_config, compute_duration, effective_duration, key_rate_duration,
    DurationResults,
};
use crate::immunization::{duration_gap, immunization_check_with_tolerance, ImmunizationStatus};
use crate::portfolio::{
    aggregate_portfolio, portfolio_duration_with_config, PortfolioEntry, PortfolioSummary,
};
use crate::price_change::{price_change, symmetric_shock, PriceChange, SymmetricShock};
use crate::pricing::price;
use crate::term_structure::{duration_term_structure, CurveShape, CurveShapeReport, TermStructurePoint};

/// Duration engine with configured defaults.
#[derive(Debug, Clone, Default)]
pub struct DurationEngine {
    config: EngineConfig,
}

impl DurationEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`tenor_core::TenorError::InvalidParameter`] if any setting is
    /// out of range.
    pub fn new(config: EngineConfig) -> TenorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Price at the bond's own yield.
    pub fn price(&self, params: &BondParams) -> TenorResult<f64> {
        price(params)
    }

    /// Full duration analytics.
    pub fn analyze(&self, params: &BondParams) -> TenorResult<DurationResults> {
        compute_duration(params)
    }

    /// Price change for a shock in basis points.
    pub fn price_change(&self, params: &BondParams, bps: f64) -> TenorResult<PriceChange> {
        price_change(params, bps)
    }

    /// Paired ±bps shock.
    pub fn symmetric_shock(&self, params: &BondParams, bps: f64) -> TenorResult<SymmetricShock> {
        symmetric_shock(params, bps)
    }

    /// Price-yield curve using the configured window and resolution.
    pub fn curve(&self, params: &BondParams) -> TenorResult<PriceYieldCurve> {
        generate_curve(params, self.config.curve_yield_range, self.config.curve_steps)
    }

    /// Key rate duration at the configured bump.
    pub fn key_rate_duration(&self, params: &BondParams) -> TenorResult<f64> {
        key_rate_duration(params, self.config.key_rate_bump)
    }

    /// Effective duration at the configured bump.
    pub fn effective_duration(&self, params: &BondParams) -> TenorResult<f64> {
        effective_duration(params, self.config.effective_bump)
    }

    /// Effective convexity at the configured bump.
    pub fn effective_convexity(&self, params: &BondParams) -> TenorResult<f64> {
        effective_convexity(params, self.config.effective_bump)
    }

    /// Analytics for several bonds in input order.
    pub fn compare(&self, bonds: &[BondParams]) -> TenorResult<Vec<DurationResults>> {
        compare_bonds_with_config(bonds, &self.config)
    }

    /// Weighted portfolio duration.
    pub fn portfolio_duration(&self, entries: &[PortfolioEntry]) -> TenorResult<f64> {
        portfolio_duration_with_config(entries, &self.config)
    }

    /// Portfolio breakdown.
    pub fn aggregate_portfolio(&self, entries: &[PortfolioEntry]) -> TenorResult<PortfolioSummary> {
        aggregate_portfolio(entries, &self.config)
    }

    /// Leverage-adjusted duration gap.
    pub fn duration_gap(
        &self,
        assets_duration: f64,
        liabilities_duration: f64,
        assets_value: f64,
        liabilities_value: f64,
    ) -> TenorResult<f64> {
        duration_gap(assets_duration, liabilities_duration, assets_value, liabilities_value)
    }

    /// Immunization check at the configured tolerance.
    pub fn immunization_check(
        &self,
        target_horizon: f64,
        current_duration: f64,
    ) -> TenorResult<ImmunizationStatus> {
        immunization_check_with_tolerance(
            target_horizon,
            current_duration,
            self.config.immunization_tolerance,
        )
    }

    /// Par-bond durations along a treasury curve.
    pub fn term_structure(&self, points: &[YieldCurvePoint]) -> TenorResult<Vec<TermStructurePoint>> {
        duration_term_structure(points)
    }

    /// Curve shape classification.
    pub fn curve_shape(&self, points: &[YieldCurvePoint]) -> TenorResult<CurveShapeReport> {
        CurveShape::classify(points)
    }
}
