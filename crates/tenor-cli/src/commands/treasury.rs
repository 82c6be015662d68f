//! Treasury command implementation.
//!
//! Reads an observed treasury curve and reports par-bond durations at each
//! tenor plus the curve shape.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_analytics::term_structure::{CurveShapeReport, TermStructurePoint};
use tenor_core::YieldCurvePoint;

use crate::cli::OutputFormat;
use crate::commands::{read_json, Context};
use crate::error::{CliError, CliResult};
use crate::output::{
    format_bps, format_decimal, print_json, print_key_values, print_section, KeyValue, Notice,
};

/// Arguments for the treasury command.
#[derive(Args, Debug)]
pub struct TreasuryArgs {
    /// Curve file: JSON array or CSV with `maturity,years,rate` columns (rates in percent)
    pub file: PathBuf,
}

#[derive(Serialize)]
struct TreasuryReport {
    points: Vec<TermStructurePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<CurveShapeReport>,
}

#[derive(Serialize, Tabled)]
struct TenorRow {
    #[tabled(rename = "Tenor")]
    maturity: String,
    #[tabled(rename = "Yield")]
    rate: String,
    #[tabled(rename = "Macaulay")]
    macaulay: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Dollar Dur.")]
    dollar: String,
}

/// Reads curve points from JSON or, for `.csv` files, CSV.
pub fn read_curve(path: &Path) -> CliResult<Vec<YieldCurvePoint>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return read_json(path);
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| CliError::input(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<YieldCurvePoint>, _>>()
        .map_err(|e| CliError::input(path, e))
}

/// Execute the treasury command.
pub fn execute(args: TreasuryArgs, ctx: &Context) -> Result<()> {
    let curve = read_curve(&args.file)?;
    let points = ctx.engine.term_structure(&curve)?;
    // Shape needs 2Y and 10Y; a partial curve still gets its durations
    let shape = match ctx.engine.curve_shape(&curve) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::debug!(error = %e, "curve shape unavailable");
            None
        }
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&TreasuryReport { points, shape });
    }

    let dp = ctx.precision();
    let rows: Vec<TenorRow> = points
        .iter()
        .map(|p| TenorRow {
            maturity: p.maturity.clone(),
            rate: format!("{}%", format_decimal(p.rate, 2)),
            macaulay: format_decimal(p.macaulay_duration, dp),
            modified: format_decimal(p.modified_duration, dp),
            dollar: format_decimal(p.dollar_duration, dp),
        })
        .collect();

    print_section("Duration Term Structure", &rows, ctx.format, ctx.quiet)?;

    if ctx.format != OutputFormat::Table {
        return Ok(());
    }
    match shape {
        Some(report) => {
            let mut shape_rows = vec![
                KeyValue::new("Shape", report.shape.to_string()),
                KeyValue::new("Description", report.shape.description()),
                KeyValue::new("2s10s Spread", format_bps(report.spread_2s10s_bp)),
            ];
            if let Some(spread) = report.spread_3m30y_bp {
                shape_rows.push(KeyValue::new("3m30y Spread", format_bps(spread)));
            }
            print_key_values("Curve Shape", &shape_rows, ctx.format, ctx.quiet)
        }
        None => {
            if !ctx.quiet {
                Notice::Warning.print("Curve shape needs 2Y and 10Y points");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_curve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        std::fs::write(&path, "maturity,years,rate\n2Y,2,4.25\n10Y,10,4.22\n").unwrap();

        let curve = read_curve(&path).unwrap();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[1], YieldCurvePoint::new("10Y", 10.0, 4.22));
    }

    #[test]
    fn test_read_json_curve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.json");
        std::fs::write(&path, r#"[{"maturity":"3M","years":0.25,"rate":5.24}]"#).unwrap();

        assert_eq!(read_curve(&path).unwrap()[0].maturity, "3M");
    }
}
