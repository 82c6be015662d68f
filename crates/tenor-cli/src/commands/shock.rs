//! Shock command implementation.
//!
//! Re-prices a bond after a parallel yield shift and compares the exact
//! change with the duration and convexity estimates.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_analytics::price_change::PriceChange;

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context};
use crate::output::{
    format_decimal, format_signed, print_json, print_key_values, print_section, KeyValue,
};

/// Arguments for the shock command.
#[derive(Args, Debug)]
pub struct ShockArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Yield change in basis points
    #[arg(short, long, default_value = "100", allow_negative_numbers = true)]
    pub bps: f64,

    /// Apply the shock in both directions
    #[arg(long)]
    pub symmetric: bool,
}

/// One row of a shock table.
#[derive(Serialize, Tabled)]
pub struct ShockRow {
    #[tabled(rename = "Shock (bps)")]
    pub shock: String,
    #[tabled(rename = "New Price")]
    pub new_price: String,
    #[tabled(rename = "Change")]
    pub change: String,
    #[tabled(rename = "Change %")]
    pub percent: String,
    #[tabled(rename = "Duration Est.")]
    pub duration_estimate: String,
    #[tabled(rename = "Dur+Conv Est.")]
    pub convexity_estimate: String,
}

impl ShockRow {
    /// Formats one price change.
    pub fn from_change(change: &PriceChange) -> Self {
        Self {
            shock: format_signed(change.yield_change_bps, 0),
            new_price: format_decimal(change.new_price, 2),
            change: format_signed(change.dollar_change, 2),
            percent: format_signed(change.percent_change, 3),
            duration_estimate: format_signed(change.duration_approx, 2),
            convexity_estimate: format_signed(change.with_convexity, 2),
        }
    }
}

/// Execute the shock command.
pub fn execute(args: ShockArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.to_params()?;

    if args.symmetric {
        let shock = ctx.engine.symmetric_shock(&params, args.bps)?;
        if ctx.format == OutputFormat::Json {
            return print_json(&shock);
        }
        let rows = [ShockRow::from_change(&shock.up), ShockRow::from_change(&shock.down)];
        print_section("Symmetric Shock", &rows, ctx.format, ctx.quiet)?;
        if ctx.format == OutputFormat::Table {
            println!("Convexity gain: {}", format_signed(shock.convexity_gain, 4));
        }
        return Ok(());
    }

    let change = ctx.engine.price_change(&params, args.bps)?;
    if ctx.format == OutputFormat::Json {
        return print_json(&change);
    }

    let rows = vec![
        KeyValue::new("Yield Change", format!("{} bps", format_signed(change.yield_change_bps, 1))),
        KeyValue::number("Old Price", change.old_price, 2),
        KeyValue::number("New Price", change.new_price, 2),
        KeyValue::new("Dollar Change", format_signed(change.dollar_change, 4)),
        KeyValue::new("Percent Change", format!("{}%", format_signed(change.percent_change, 4))),
        KeyValue::new("Duration Estimate", format_signed(change.duration_approx, 4)),
        KeyValue::new("Duration + Convexity", format_signed(change.with_convexity, 4)),
        KeyValue::number("Duration Error", change.duration_error(), 4),
        KeyValue::number("Convexity Error", change.convexity_error(), 4),
    ];
    print_key_values("Price Change", &rows, ctx.format, ctx.quiet)
}
