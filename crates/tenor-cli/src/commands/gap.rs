//! Gap command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_json, print_key_values, KeyValue};

/// Arguments for the gap command.
#[derive(Args, Debug)]
pub struct GapArgs {
    /// Duration of the assets (years)
    #[arg(long)]
    pub assets_duration: f64,

    /// Duration of the liabilities (years)
    #[arg(long)]
    pub liabilities_duration: f64,

    /// Market value of the assets
    #[arg(long)]
    pub assets_value: f64,

    /// Market value of the liabilities
    #[arg(long)]
    pub liabilities_value: f64,
}

#[derive(Serialize)]
struct GapReport {
    duration_gap: f64,
    leverage: f64,
    exposure: &'static str,
}

fn exposure(gap: f64) -> &'static str {
    if gap > 0.0 {
        "equity falls when rates rise"
    } else if gap < 0.0 {
        "equity rises when rates rise"
    } else {
        "equity insensitive to parallel shifts"
    }
}

/// Execute the gap command.
pub fn execute(args: GapArgs, ctx: &Context) -> Result<()> {
    let gap = ctx.engine.duration_gap(
        args.assets_duration,
        args.liabilities_duration,
        args.assets_value,
        args.liabilities_value,
    )?;
    let report = GapReport {
        duration_gap: gap,
        leverage: args.liabilities_value / args.assets_value,
        exposure: exposure(gap),
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&report);
    }

    let dp = ctx.precision();
    let rows = vec![
        KeyValue::number("Duration Gap", report.duration_gap, dp),
        KeyValue::number("Liabilities / Assets", report.leverage, dp),
        KeyValue::new("Exposure", report.exposure),
    ];
    print_key_values("Duration Gap", &rows, ctx.format, ctx.quiet)
}
