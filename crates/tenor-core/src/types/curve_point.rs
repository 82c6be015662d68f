//! Yield curve observations supplied by market-data callers.

use serde::{Deserialize, Serialize};

/// A single point of an observed yield curve.
///
/// Rates are quoted in percent, the way constant-maturity series are
/// published (4.25 means 4.25%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCurvePoint {
    /// Tenor label such as `"3M"` or `"10Y"`.
    pub maturity: String,
    /// Tenor in years.
    pub years: f64,
    /// Yield in percent.
    pub rate: f64,
}

impl YieldCurvePoint {
    /// Creates a curve point.
    pub fn new(maturity: impl Into<String>, years: f64, rate: f64) -> Self {
        Self {
            maturity: maturity.into(),
            years,
            rate,
        }
    }

    /// Yield as a decimal fraction.
    pub fn rate_decimal(&self) -> f64 {
        self.rate / 100.0
    }

    /// Returns true if this point carries the given tenor label (case-insensitive).
    pub fn is_tenor(&self, label: &str) -> bool {
        self.maturity.eq_ignore_ascii_case(label)
    }
}
