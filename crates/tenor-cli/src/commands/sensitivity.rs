//! Sensitivity command implementation.
//!
//! Applies a ladder of parallel shocks to one bond.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::shock::ShockRow;
use crate::commands::{BondArgs, Context};
use crate::output::{print_json, print_section};

/// Arguments for the sensitivity command.
#[derive(Args, Debug)]
pub struct SensitivityArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Shocks in basis points, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = vec![-100.0, -50.0, -25.0, 25.0, 50.0, 100.0]
    )]
    pub shocks: Vec<f64>,
}

/// Execute the sensitivity command.
pub fn execute(args: SensitivityArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.to_params()?;
    let changes = args
        .shocks
        .iter()
        .map(|&bps| ctx.engine.price_change(&params, bps))
        .collect::<Result<Vec<_>, _>>()?;

    if ctx.format == OutputFormat::Json {
        return print_json(&changes);
    }

    let rows: Vec<ShockRow> = changes.iter().map(ShockRow::from_change).collect();
    print_section("Price Sensitivity", &rows, ctx.format, ctx.quiet)
}
