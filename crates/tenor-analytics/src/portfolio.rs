//! Portfolio-level duration aggregation.
//!
//! ## Formula
//!
//! ```text
//! D_P = Σ w_i × D_mod,i
//! ```
//!
//! Weights are used as given and are not normalised; a portfolio whose
//! weights do not sum to one reports a proportionally scaled duration.

use serde::{Deserialize, Serialize};
use tenor_core::error::{ensure_finite, ensure_finite_result};
use tenor_core::{BondParams, TenorError, TenorResult};

use crate::config::EngineConfig;
use crate::duration::{compute_duration, DurationResults};
use crate::parallel::maybe_parallel_map;

/// A bond held in a portfolio with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Optional identifier shown in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Bond terms.
    pub params: BondParams,
    /// Portfolio weight, typically a fraction of market value.
    pub weight: f64,
}

impl PortfolioEntry {
    /// Create a new entry.
    pub fn new(params: BondParams, weight: f64) -> Self {
        Self {
            label: None,
            params,
            weight,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Analytics for one portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingAnalytics {
    /// Entry label, if any.
    pub label: Option<String>,
    /// Weight as supplied.
    pub weight: f64,
    /// Bond price.
    pub price: f64,
    /// Bond modified duration.
    pub modified_duration: f64,
    /// `weight × modified_duration`.
    pub duration_contribution: f64,
}

/// Aggregated portfolio risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Σ weights.
    pub total_weight: f64,
    /// Σ w × modified duration.
    pub weighted_duration: f64,
    /// Σ w × Macaulay duration.
    pub weighted_macaulay: f64,
    /// Σ w × convexity.
    pub weighted_convexity: f64,
    /// Per-entry breakdown, in input order.
    pub holdings: Vec<HoldingAnalytics>,
}

impl PortfolioSummary {
    /// Number of entries.
    pub fn position_count(&self) -> usize {
        self.holdings.len()
    }

    /// Weighted duration divided by total weight, or `None` when the weights
    /// sum to zero.
    pub fn normalized_duration(&self) -> Option<f64> {
        (self.total_weight.abs() > 1e-10).then(|| self.weighted_duration / self.total_weight)
    }
}

fn check_weights(entries: &[PortfolioEntry]) -> TenorResult<()> {
    for (i, entry) in entries.iter().enumerate() {
        ensure_finite("weight", entry.weight).map_err(|_| {
            TenorError::invalid_parameter(
                "weight",
                format!("entry {i} has non-finite weight {}", entry.weight),
            )
        })?;
    }
    Ok(())
}

fn analyze_entries(
    entries: &[PortfolioEntry],
    config: &EngineConfig,
) -> TenorResult<Vec<DurationResults>> {
    check_weights(entries)?;
    maybe_parallel_map(entries, config, |entry| compute_duration(&entry.params))
        .into_iter()
        .collect()
}

/// Weighted sum of modified durations.
///
/// An empty portfolio has duration 0.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] for a non-finite weight and
/// propagates any error from the per-bond analytics.
///
/// # Example
///
/// ```rust
/// use tenor_analytics::portfolio::{portfolio_duration, PortfolioEntry};
/// use tenor_core::BondParams;
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
/// let d = portfolio_duration(&[PortfolioEntry::new(bond, 1.0)]).unwrap();
/// assert!((d - 7.7946).abs() < 1e-4);
/// ```
pub fn portfolio_duration(entries: &[PortfolioEntry]) -> TenorResult<f64> {
    portfolio_duration_with_config(entries, &EngineConfig::default())
}

/// [`portfolio_duration`] with explicit parallelism settings.
///
/// # Errors
///
/// Same conditions as [`portfolio_duration`].
pub fn portfolio_duration_with_config(
    entries: &[PortfolioEntry],
    config: &EngineConfig,
) -> TenorResult<f64> {
    let analytics = analyze_entries(entries, config)?;
    let total = entries
        .iter()
        .zip(&analytics)
        .map(|(entry, r)| entry.weight * r.modified_duration)
        .sum();
    ensure_finite_result("portfolio duration", total)
}

/// Full portfolio breakdown.
///
/// # Errors
///
/// Same conditions as [`portfolio_duration`].
pub fn aggregate_portfolio(
    entries: &[PortfolioEntry],
    config: &EngineConfig,
) -> TenorResult<PortfolioSummary> {
    let analytics = analyze_entries(entries, config)?;

    let mut summary = PortfolioSummary {
        total_weight: 0.0,
        weighted_duration: 0.0,
        weighted_macaulay: 0.0,
        weighted_convexity: 0.0,
        holdings: Vec::with_capacity(entries.len()),
    };

    for (entry, r) in entries.iter().zip(analytics) {
        let contribution = entry.weight * r.modified_duration;
        summary.total_weight += entry.weight;
        summary.weighted_duration += contribution;
        summary.weighted_macaulay += entry.weight * r.macaulay_duration;
        summary.weighted_convexity += entry.weight * r.convexity;
        summary.holdings.push(HoldingAnalytics {
            label: entry.label.clone(),
            weight: entry.weight,
            price: r.price,
            modified_duration: r.modified_duration,
            duration_contribution: contribution,
        });
    }

    ensure_finite_result("portfolio duration", summary.weighted_duration)?;
    log::debug!(
        "portfolio of {} entries: weighted duration {:.6}",
        summary.position_count(),
        summary.weighted_duration
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(coupon: f64, years: f64, weight: f64) -> PortfolioEntry {
        PortfolioEntry::new(
            BondParams::new(1000.0, coupon, years, 0.05, 2).unwrap(),
            weight,
        )
    }

    #[test]
    fn test_weighted_sum() {
        let entries = vec![entry(0.05, 10.0, 0.6), entry(0.05, 2.0, 0.4)];
        let d10 = compute_duration(&entries[0].params).unwrap().modified_duration;
        let d2 = compute_duration(&entries[1].params).unwrap().modified_duration;

        let d = portfolio_duration(&entries).unwrap();
        assert_relative_eq!(d, 0.6 * d10 + 0.4 * d2, epsilon = 1e-12);
    }

    #[test]
    fn test_weights_not_normalised() {
        let single = portfolio_duration(&[entry(0.05, 10.0, 1.0)]).unwrap();
        let doubled = portfolio_duration(&[entry(0.05, 10.0, 2.0)]).unwrap();
        assert_relative_eq!(doubled, 2.0 * single, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_portfolio() {
        assert_eq!(portfolio_duration(&[]).unwrap(), 0.0);
        let summary = aggregate_portfolio(&[], &EngineConfig::default()).unwrap();
        assert_eq!(summary.position_count(), 0);
        assert_eq!(summary.normalized_duration(), None);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        for weight in [f64::NAN, f64::INFINITY] {
            let err = portfolio_duration(&[entry(0.05, 10.0, weight)]).unwrap_err();
            assert!(err.is_invalid_parameter());
        }
    }

    #[test]
    fn test_aggregate_matches_portfolio_duration() {
        let entries = vec![
            entry(0.03, 5.0, 0.25).with_label("5Y"),
            entry(0.05, 10.0, 0.5).with_label("10Y"),
            entry(0.06, 30.0, 0.25),
        ];
        let summary = aggregate_portfolio(&entries, &EngineConfig::sequential()).unwrap();

        assert_relative_eq!(
            summary.weighted_duration,
            portfolio_duration(&entries).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(summary.total_weight, 1.0);
        assert_relative_eq!(
            summary.normalized_duration().unwrap(),
            summary.weighted_duration,
            epsilon = 1e-12
        );
        assert_eq!(summary.holdings[0].label.as_deref(), Some("5Y"));
        assert_eq!(summary.holdings[2].label, None);
    }

    #[test]
    fn test_parallel_config_same_result() {
        let entries: Vec<_> = (1..=40)
            .map(|y| entry(0.04, f64::from(y), 1.0 / 40.0))
            .collect();
        let sequential =
            portfolio_duration_with_config(&entries, &EngineConfig::sequential()).unwrap();
        let parallel =
            portfolio_duration_with_config(&entries, &EngineConfig::new().with_threshold(2))
                .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_entry_json() {
        let json = r#"{"params":{"faceValue":1000,"couponRate":0.05,"yearsToMaturity":10,"ytm":0.05,"frequency":2},"weight":0.5}"#;
        let parsed: PortfolioEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.weight, 0.5);
        assert_eq!(parsed.label, None);
    }
}
