//! Output formatting utilities.
//!
//! Every command reports through [`print_section`] or [`print_key_values`],
//! so all four output formats behave the same way: `table` prints a title
//! unless `--quiet` is set, `json` pretty-prints the rows, `csv` writes a
//! header line, and `minimal` writes one compact line per row.

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints a titled block of rows in `format`.
pub fn print_section<T: Serialize + Tabled>(
    title: &str,
    rows: &[T],
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if !quiet {
                println!("\n{}", title.bold().underline());
            }
            if rows.is_empty() {
                println!("(no rows)");
            } else {
                let table = Table::new(rows)
                    .with(Style::rounded())
                    .with(Modify::new(Columns::first()).with(Alignment::left()))
                    .to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => print_json(rows)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            rows.iter().try_for_each(|row| writer.serialize(row))?;
            writer.flush()?;
        }
        OutputFormat::Minimal => {
            for row in rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }
    }
    Ok(())
}

/// Like [`print_section`], but `minimal` prints `key=value` lines.
pub fn print_key_values(
    title: &str,
    rows: &[KeyValue],
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    if format != OutputFormat::Minimal {
        return print_section(title, rows, format, quiet);
    }
    for row in rows {
        println!("{}={}", row.key, row.value);
    }
    Ok(())
}

/// Prints a serialisable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Rounds a value half-away-from-zero to `dp` places for display.
///
/// Values outside the decimal range (including NaN) fall back to float
/// formatting.
pub fn format_decimal(value: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.prec$}",
            d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
            prec = dp as usize
        ),
        None => format!("{value:.prec$}", prec = dp as usize),
    }
}

/// Formats a decimal fraction as a percentage string.
pub fn format_percent(value: f64, dp: u32) -> String {
    format!("{}%", format_decimal(value * 100.0, dp))
}

/// Formats a basis point amount.
pub fn format_bps(value: f64) -> String {
    format!("{} bps", format_decimal(value, 1))
}

/// Formats a signed amount with an explicit `+`.
pub fn format_signed(value: f64, dp: u32) -> String {
    let text = format_decimal(value, dp);
    if value > 0.0 {
        format!("+{text}")
    } else {
        text
    }
}

/// One-line status message. Warnings and errors go to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A change was applied.
    Success,
    /// Something was skipped or looks wrong.
    Warning,
    /// The command failed.
    Error,
}

impl Notice {
    /// Prints `message` behind the notice marker.
    pub fn print(self, message: &str) {
        match self {
            Self::Success => println!("{} {message}", "✓".green()),
            Self::Warning => eprintln!("{} {message}", "⚠".yellow()),
            Self::Error => eprintln!("{} {message}", "✗".red()),
        }
    }
}

/// A labelled value in a two-column report.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Value rounded to `dp` places.
    pub fn number(key: impl Into<String>, value: f64, dp: u32) -> Self {
        Self::new(key, format_decimal(value, dp))
    }

    /// Decimal fraction shown as a percentage.
    pub fn percent(key: impl Into<String>, value: f64, dp: u32) -> Self {
        Self::new(key, format_percent(value, dp))
    }
}
