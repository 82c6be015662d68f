//! CLI command implementations.

pub mod analyze;
pub mod compare;
pub mod config;
pub mod curve;
pub mod gap;
pub mod immunize;
pub mod portfolio;
pub mod sensitivity;
pub mod shock;
pub mod treasury;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use gap::GapArgs;
pub use immunize::ImmunizeArgs;
pub use portfolio::PortfolioArgs;
pub use sensitivity::SensitivityArgs;
pub use shock::ShockArgs;
pub use treasury::TreasuryArgs;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use serde::de::DeserializeOwned;
use tenor_analytics::engine::DurationEngine;
use tenor_core::BondParams;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::settings::Settings;

/// State shared by every command.
pub struct Context {
    /// Resolved output format.
    pub format: OutputFormat,
    /// Suppress headers and informational lines.
    pub quiet: bool,
    /// Loaded settings.
    pub settings: Settings,
    /// Where the settings came from (or will be written).
    pub config_path: PathBuf,
    /// Engine built from `settings.engine`.
    pub engine: DurationEngine,
}

impl Context {
    /// Decimal places for durations and convexity.
    pub fn precision(&self) -> u32 {
        self.settings.output.precision
    }
}

/// Bond terms shared by the single-bond commands.
#[derive(Args, Debug, Clone)]
pub struct BondArgs {
    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long, allow_negative_numbers = true)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(short = 'm', long)]
    pub years: f64,

    /// Yield to maturity (as percentage). Defaults to the coupon rate.
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_value: Option<f64>,

    /// Face value
    #[arg(long, default_value = "1000")]
    pub face: f64,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly, 12=Monthly
    #[arg(long, default_value = "2")]
    pub frequency: u32,
}

impl BondArgs {
    /// Validates the arguments and builds bond terms.
    pub fn to_params(&self) -> anyhow::Result<BondParams> {
        let coupon = validate_coupon(self.coupon)?;
        let ytm = validate_yield(self.yield_value.unwrap_or(coupon))?;
        let frequency = validate_frequency(self.frequency)?;

        BondParams::new(self.face, coupon / 100.0, self.years, ytm / 100.0, frequency)
            .context("invalid bond terms")
    }
}

/// Validates a coupon rate.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&coupon) {
        return Err(CliError::InvalidCoupon(coupon));
    }
    Ok(coupon)
}

/// Validates a yield value.
pub fn validate_yield(yield_value: f64) -> CliResult<f64> {
    if !(-10.0..=100.0).contains(&yield_value) {
        return Err(CliError::InvalidYield(yield_value));
    }
    Ok(yield_value)
}

/// Validates a coupon frequency.
pub fn validate_frequency(frequency: u32) -> CliResult<u32> {
    match frequency {
        1 | 2 | 4 | 12 => Ok(frequency),
        other => Err(CliError::InvalidFrequency(other)),
    }
}

/// Reads and deserialises a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::input(path, e))?;
    let value = serde_json::from_str(&content).map_err(|e| CliError::input(path, e))?;
    tracing::debug!(path = %path.display(), "read input file");
    Ok(value)
}
