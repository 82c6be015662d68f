//! Analyze command implementation.
//!
//! Prices a bond and reports duration, convexity and their numeric
//! counterparts.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenor_analytics::duration::DurationResults;
use tenor_core::{BondParams, CashFlow};

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context};
use crate::output::{format_decimal, print_json, print_key_values, print_section, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Show cashflows
    #[arg(long)]
    pub cashflows: bool,
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    params: &'a BondParams,
    #[serde(flatten)]
    results: &'a DurationResults,
    key_rate_duration: f64,
    effective_duration: f64,
    effective_convexity: f64,
}

#[derive(Serialize, Tabled)]
struct CashflowRow {
    #[tabled(rename = "Period")]
    period: u32,
    #[tabled(rename = "Time (y)")]
    time: String,
    #[tabled(rename = "Type")]
    flow_type: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Present Value")]
    present_value: String,
    #[tabled(rename = "Time x PV")]
    weighted_pv: String,
}

impl CashflowRow {
    fn from_cash_flow(cf: &CashFlow) -> Self {
        Self {
            period: cf.period(),
            time: format_decimal(cf.time(), 4),
            flow_type: cf.flow_type().to_string(),
            payment: format_decimal(cf.payment(), 2),
            present_value: format_decimal(cf.present_value(), 2),
            weighted_pv: format_decimal(cf.weighted_pv(), 2),
        }
    }
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.to_params()?;
    let results = ctx.engine.analyze(&params)?;
    let key_rate_duration = ctx.engine.key_rate_duration(&params)?;
    let effective_duration = ctx.engine.effective_duration(&params)?;
    let effective_convexity = ctx.engine.effective_convexity(&params)?;
    tracing::info!(%params, price = results.price, "analyzed bond");

    if ctx.format == OutputFormat::Json {
        return print_json(&AnalyzeReport {
            params: &params,
            results: &results,
            key_rate_duration,
            effective_duration,
            effective_convexity,
        });
    }

    let dp = ctx.precision();
    let rows = vec![
        KeyValue::number("Face Value", params.face_value(), 2),
        KeyValue::percent("Coupon", params.coupon_rate(), 3),
        KeyValue::number("Years to Maturity", params.years_to_maturity(), 2),
        KeyValue::percent("Yield to Maturity", params.ytm(), 3),
        KeyValue::new("Frequency", params.frequency().to_string()),
        KeyValue::number("Price", results.price, 2),
        KeyValue::number("Macaulay Duration", results.macaulay_duration, dp),
        KeyValue::number("Modified Duration", results.modified_duration, dp),
        KeyValue::number("Dollar Duration", results.dollar_duration, dp),
        KeyValue::number("Convexity", results.convexity, dp),
        KeyValue::number("Key Rate Duration", key_rate_duration, dp),
        KeyValue::number("Effective Duration", effective_duration, dp),
        KeyValue::number("Effective Convexity", effective_convexity, dp),
    ];
    print_key_values("Bond Analytics", &rows, ctx.format, ctx.quiet)?;

    if args.cashflows {
        let flows: Vec<CashflowRow> = results
            .cash_flows
            .iter()
            .map(CashflowRow::from_cash_flow)
            .collect();
        print_section("Cashflow Schedule", &flows, ctx.format, ctx.quiet)?;
    }

    Ok(())
}
