//! Immunize command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use tenor_analytics::immunization::{immunization_check_with_tolerance, ImmunizationStatus};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_signed, print_json, print_key_values, KeyValue};

/// Arguments for the immunize command.
#[derive(Args, Debug)]
pub struct ImmunizeArgs {
    /// Investment horizon (years)
    #[arg(long)]
    pub horizon: f64,

    /// Current portfolio duration (years)
    #[arg(long)]
    pub duration: f64,

    /// Largest gap still treated as immunized (default from config)
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Rows describing an immunization status.
pub fn status_rows(target: f64, status: &ImmunizationStatus, dp: u32) -> Vec<KeyValue> {
    vec![
        KeyValue::number("Target Horizon", target, 2),
        KeyValue::new("Duration Gap", format_signed(status.gap, dp)),
        KeyValue::new(
            "Immunized",
            if status.is_immunized { "yes" } else { "no" },
        ),
        KeyValue::new("Recommendation", status.recommendation()),
    ]
}

/// Execute the immunize command.
pub fn execute(args: ImmunizeArgs, ctx: &Context) -> Result<()> {
    let status = match args.tolerance {
        Some(tolerance) => immunization_check_with_tolerance(args.horizon, args.duration, tolerance)?,
        None => ctx.engine.immunization_check(args.horizon, args.duration)?,
    };

    match ctx.format {
        OutputFormat::Json => print_json(&status),
        OutputFormat::Table => {
            print_key_values(
                "Immunization",
                &status_rows(args.horizon, &status, ctx.precision()),
                ctx.format,
                ctx.quiet,
            )?;
            if !ctx.quiet {
                let verdict = if status.is_immunized {
                    "Portfolio is immunized".green()
                } else {
                    "Portfolio is not immunized".yellow()
                };
                println!("{verdict}");
            }
            Ok(())
        }
        _ => print_key_values(
            "Immunization",
            &status_rows(args.horizon, &status, ctx.precision()),
            ctx.format,
            ctx.quiet,
        ),
    }
}
