//! Compare command implementation.
//!
//! Computes duration analytics for several bonds side by side. Without an
//! input file a short, medium and long bond at a common 4.5% yield are
//! compared.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use tenor_analytics::duration::DurationResults;
use tenor_core::{BondParams, TenorResult};

use crate::cli::OutputFormat;
use crate::commands::{read_json, Context};
use crate::output::{format_decimal, format_percent, print_json, print_section};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// JSON file holding an array of bonds (optionally with a `label`)
    pub file: Option<PathBuf>,
}

/// A bond with an optional display name.
///
/// Accepts the bond fields at the top level next to `label`.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct LabeledBond {
    /// Display name.
    pub label: Option<String>,
    /// Bond terms.
    pub params: BondParams,
}

impl TryFrom<serde_json::Value> for LabeledBond {
    type Error = String;

    fn try_from(mut value: serde_json::Value) -> Result<Self, Self::Error> {
        let label = value
            .as_object_mut()
            .and_then(|fields| fields.remove("label"))
            .and_then(|label| label.as_str().map(str::to_owned));
        let params = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Ok(Self { label, params })
    }
}

#[derive(Serialize)]
struct Comparison<'a> {
    label: String,
    params: &'a BondParams,
    #[serde(flatten)]
    results: &'a DurationResults,
}

#[derive(Serialize, Tabled)]
struct CompareRow {
    #[tabled(rename = "Bond")]
    label: String,
    #[tabled(rename = "Years")]
    years: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "YTM")]
    ytm: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Macaulay")]
    macaulay: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Dollar Dur.")]
    dollar: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
}

fn default_bonds() -> TenorResult<Vec<LabeledBond>> {
    [
        ("Short-Term (5Y)", 0.04, 5.0),
        ("Medium-Term (10Y)", 0.05, 10.0),
        ("Long-Term (30Y)", 0.06, 30.0),
    ]
    .into_iter()
    .map(|(label, coupon, years)| {
        Ok(LabeledBond {
            label: Some(label.to_string()),
            params: BondParams::new(1000.0, coupon, years, 0.045, 2)?,
        })
    })
    .collect()
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let bonds: Vec<LabeledBond> = match &args.file {
        Some(path) => read_json(path)?,
        None => default_bonds()?,
    };
    let params: Vec<BondParams> = bonds.iter().map(|b| b.params).collect();
    let results = ctx.engine.compare(&params)?;

    let labels: Vec<String> = bonds
        .iter()
        .enumerate()
        .map(|(i, b)| b.label.clone().unwrap_or_else(|| format!("Bond {}", i + 1)))
        .collect();

    if ctx.format == OutputFormat::Json {
        let report: Vec<Comparison<'_>> = labels
            .iter()
            .zip(&params)
            .zip(&results)
            .map(|((label, params), results)| Comparison {
                label: label.clone(),
                params,
                results,
            })
            .collect();
        return print_json(&report);
    }

    let dp = ctx.precision();
    let rows: Vec<CompareRow> = labels
        .into_iter()
        .zip(&params)
        .zip(&results)
        .map(|((label, p), r)| CompareRow {
            label,
            years: format_decimal(p.years_to_maturity(), 2),
            coupon: format_percent(p.coupon_rate(), 2),
            ytm: format_percent(p.ytm(), 2),
            price: format_decimal(r.price, 2),
            macaulay: format_decimal(r.macaulay_duration, dp),
            modified: format_decimal(r.modified_duration, dp),
            dollar: format_decimal(r.dollar_duration, dp),
            convexity: format_decimal(r.convexity, dp),
        })
        .collect();

    print_section("Bond Comparison", &rows, ctx.format, ctx.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bonds() {
        let bonds = default_bonds().unwrap();
        assert_eq!(bonds.len(), 3);
        assert!(bonds.iter().all(|b| b.params.ytm() == 0.045));
    }

    #[test]
    fn test_labeled_bond_json() {
        let json = r#"[
            {"label": "A", "faceValue": 1000, "couponRate": 0.05, "yearsToMaturity": 10, "ytm": 0.05, "frequency": 2},
            {"face_value": 100, "coupon_rate": 0.0, "years_to_maturity": 5, "ytm": 0.04, "frequency": 1}
        ]"#;
        let bonds: Vec<LabeledBond> = serde_json::from_str(json).unwrap();
        assert_eq!(bonds[0].label.as_deref(), Some("A"));
        assert_eq!(bonds[1].label, None);
        assert_eq!(bonds[1].params.total_periods(), 5);
    }
}
