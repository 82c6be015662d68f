//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{
    AnalyzeArgs, CompareArgs, ConfigArgs, CurveArgs, GapArgs, ImmunizeArgs, PortfolioArgs,
    SensitivityArgs, ShockArgs, TreasuryArgs,
};

/// Tenor - bond duration and convexity analytics
#[derive(Parser)]
#[command(name = "tenor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(long, global = true, env = "TENOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a bond and compute duration, convexity and numeric durations
    Analyze(AnalyzeArgs),

    /// Re-price a bond after a parallel yield shock
    Shock(ShockArgs),

    /// Generate a price-yield curve
    Curve(CurveArgs),

    /// Price changes across a ladder of yield shocks
    Sensitivity(SensitivityArgs),

    /// Compare several bonds side by side
    Compare(CompareArgs),

    /// Weighted duration of a portfolio
    Portfolio(PortfolioArgs),

    /// Duration gap between assets and liabilities
    Gap(GapArgs),

    /// Check whether a duration matches an investment horizon
    Immunize(ImmunizeArgs),

    /// Durations and shape of a treasury curve
    Treasury(TreasuryArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Minimal => "minimal",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Minimal.to_string(), "minimal");
    }
}
