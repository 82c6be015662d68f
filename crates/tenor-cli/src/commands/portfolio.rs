//! Portfolio command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_analytics::immunization::ImmunizationStatus;
use tenor_analytics::portfolio::{PortfolioEntry, PortfolioSummary};

use crate::cli::OutputFormat;
use crate::commands::immunize::status_rows;
use crate::commands::{read_json, Context};
use crate::output::{format_decimal, print_json, print_key_values, print_section, KeyValue};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// JSON file holding an array of `{ "params": {...}, "weight": w }`
    pub file: PathBuf,

    /// Investment horizon in years; reports immunization against it
    #[arg(long)]
    pub target: Option<f64>,
}

#[derive(Serialize)]
struct PortfolioReport<'a> {
    #[serde(flatten)]
    summary: &'a PortfolioSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    immunization: Option<ImmunizationStatus>,
}

#[derive(Serialize, Tabled)]
struct HoldingRow {
    #[tabled(rename = "Holding")]
    label: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Modified Dur.")]
    modified_duration: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, ctx: &Context) -> Result<()> {
    let entries: Vec<PortfolioEntry> = read_json(&args.file)?;
    let summary = ctx.engine.aggregate_portfolio(&entries)?;
    let immunization = args
        .target
        .map(|target| ctx.engine.immunization_check(target, summary.weighted_duration))
        .transpose()?;
    tracing::info!(
        holdings = summary.position_count(),
        duration = summary.weighted_duration,
        "aggregated portfolio"
    );

    if ctx.format == OutputFormat::Json {
        return print_json(&PortfolioReport {
            summary: &summary,
            immunization,
        });
    }

    let dp = ctx.precision();
    let holdings: Vec<HoldingRow> = summary
        .holdings
        .iter()
        .enumerate()
        .map(|(i, h)| HoldingRow {
            label: h.label.clone().unwrap_or_else(|| format!("#{}", i + 1)),
            weight: format_decimal(h.weight, 4),
            price: format_decimal(h.price, 2),
            modified_duration: format_decimal(h.modified_duration, dp),
            contribution: format_decimal(h.duration_contribution, dp),
        })
        .collect();

    if ctx.format == OutputFormat::Table {
        print_section("Holdings", &holdings, ctx.format, ctx.quiet)?;
    }

    let mut rows = vec![
        KeyValue::new("Positions", summary.position_count().to_string()),
        KeyValue::number("Total Weight", summary.total_weight, 4),
        KeyValue::number("Portfolio Duration", summary.weighted_duration, dp),
        KeyValue::number("Weighted Macaulay", summary.weighted_macaulay, dp),
        KeyValue::number("Weighted Convexity", summary.weighted_convexity, dp),
    ];
    if let Some(normalized) = summary.normalized_duration() {
        rows.push(KeyValue::number("Normalized Duration", normalized, dp));
    }
    if let (Some(target), Some(status)) = (args.target, immunization.as_ref()) {
        rows.extend(status_rows(target, status, dp));
    }
    print_key_values("Portfolio Summary", &rows, ctx.format, ctx.quiet)
}
