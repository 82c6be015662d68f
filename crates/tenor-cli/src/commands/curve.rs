//! Curve command implementation.
//!
//! Prints the price-yield curve of a bond together with the duration
//! tangent line.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_analytics::curve::{generate_curve, CurvePoint};

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context};
use crate::output::{format_decimal, format_percent, print_json, print_section};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Half-width of the yield window in percent (default from config)
    #[arg(long)]
    pub range: Option<f64>,

    /// Number of intervals (default from config)
    #[arg(long)]
    pub steps: Option<usize>,
}

#[derive(Serialize, Tabled)]
struct CurveRow {
    #[tabled(rename = "Yield")]
    #[serde(rename = "yield")]
    yield_rate: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Duration Approx.")]
    duration_approx_price: String,
    #[tabled(rename = "Convexity Gap")]
    gap: String,
}

impl From<&CurvePoint> for CurveRow {
    fn from(point: &CurvePoint) -> Self {
        Self {
            yield_rate: format_percent(point.yield_rate, 2),
            price: format_decimal(point.price, 2),
            duration_approx_price: format_decimal(point.duration_approx_price, 2),
            gap: format_decimal(point.convexity_gap(), 4),
        }
    }
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.to_params()?;
    let config = ctx.engine.config();
    let range = args
        .range
        .map_or(config.curve_yield_range, |pct| pct / 100.0);
    let steps = args.steps.unwrap_or(config.curve_steps);

    let points: Vec<CurvePoint> = generate_curve(&params, range, steps)?.collect();
    tracing::debug!(points = points.len(), "generated price-yield curve");

    match ctx.format {
        OutputFormat::Json => print_json(&points),
        OutputFormat::Minimal => {
            for p in &points {
                println!("{},{}", p.yield_rate, p.price);
            }
            Ok(())
        }
        format => {
            let rows = points_as_rows(&points, format == OutputFormat::Csv);
            print_section("Price-Yield Curve", &rows, format, ctx.quiet)
        }
    }
}

/// CSV keeps full precision; tables are rounded.
fn points_as_rows(points: &[CurvePoint], raw: bool) -> Vec<CurveRow> {
    points
        .iter()
        .map(|p| {
            if raw {
                CurveRow {
                    yield_rate: p.yield_rate.to_string(),
                    price: p.price.to_string(),
                    duration_approx_price: p.duration_approx_price.to_string(),
                    gap: p.convexity_gap().to_string(),
                }
            } else {
                CurveRow::from(p)
            }
        })
        .collect()
}
