//! Durations along an observed treasury curve.
//!
//! Each curve point is treated as a par bond (coupon equal to yield) with a
//! face of 1000 paying semi-annually. Bills shorter than one semi-annual
//! period are modelled as a single payment at maturity.
//!
//! Curve shape follows the 2s10s spread, in percentage points:
//!
//! ```text
//! s < 0          Inverted
//! |s| < 0.25     Flat
//! s > 1.0        Steep
//! otherwise      Normal
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tenor_core::error::ensure_finite;
use tenor_core::{BondParams, TenorError, TenorResult, YieldCurvePoint};

use crate::duration::compute_duration;

/// Face value used for treasury instruments.
pub const TREASURY_FACE_VALUE: f64 = 1000.0;

/// Coupon frequency used for treasury notes and bonds.
pub const TREASURY_FREQUENCY: u32 = 2;

const FLAT_THRESHOLD: f64 = 0.25;
const STEEP_THRESHOLD: f64 = 1.0;

/// Builds treasury bond terms from percent-quoted coupon and yield.
///
/// Maturities shorter than half a year whose reciprocal is a whole number
/// (1M, 3M) become a single-period instrument with `frequency = 1 / years`.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] if the resulting terms fail
/// validation, e.g. a maturity that is not a whole number of periods.
pub fn treasury_bond_params(years: f64, coupon_pct: f64, yield_pct: f64) -> TenorResult<BondParams> {
    let years = ensure_finite("years", years)?;
    let frequency = single_period_frequency(years).unwrap_or(TREASURY_FREQUENCY);
    BondParams::new(
        TREASURY_FACE_VALUE,
        coupon_pct / 100.0,
        years,
        yield_pct / 100.0,
        frequency,
    )
}

fn single_period_frequency(years: f64) -> Option<u32> {
    if years <= 0.0 || years >= 1.0 / f64::from(TREASURY_FREQUENCY) {
        return None;
    }
    let per_year = 1.0 / years;
    let rounded = per_year.round();
    ((per_year - rounded).abs() <= 1e-9 && rounded <= f64::from(u32::MAX)).then(|| rounded as u32)
}

/// Durations for one point of the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructurePoint {
    /// Tenor label.
    pub maturity: String,
    /// Tenor in years.
    pub years: f64,
    /// Yield in percent.
    pub rate: f64,
    /// Par bond price.
    pub price: f64,
    /// Macaulay duration.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Dollar duration.
    pub dollar_duration: f64,
}

/// Par-bond durations for every curve point, sorted by maturity.
///
/// # Errors
///
/// Returns the first error raised by [`treasury_bond_params`] or
/// [`compute_duration`].
pub fn duration_term_structure(points: &[YieldCurvePoint]) -> TenorResult<Vec<TermStructurePoint>> {
    let mut sorted: Vec<&YieldCurvePoint> = points.iter().collect();
    sorted.sort_by(|a, b| a.years.total_cmp(&b.years));

    sorted
        .into_iter()
        .map(|point| {
            let params = treasury_bond_params(point.years, point.rate, point.rate)?;
            let results = compute_duration(&params)?;
            Ok(TermStructurePoint {
                maturity: point.maturity.clone(),
                years: point.years,
                rate: point.rate,
                price: results.price,
                macaulay_duration: results.macaulay_duration,
                modified_duration: results.modified_duration,
                dollar_duration: results.dollar_duration,
            })
        })
        .collect()
}

/// Classification of the curve by its 2s10s spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveShape {
    /// Upward sloping.
    Normal,
    /// 2s10s within ±25bp.
    Flat,
    /// 10Y below 2Y.
    Inverted,
    /// 2s10s above 100bp.
    Steep,
}

impl CurveShape {
    /// Classifies a 2s10s spread given in percentage points.
    pub fn from_spread(spread_pct: f64) -> Self {
        if spread_pct < 0.0 {
            Self::Inverted
        } else if spread_pct.abs() < FLAT_THRESHOLD {
            Self::Flat
        } else if spread_pct > STEEP_THRESHOLD {
            Self::Steep
        } else {
            Self::Normal
        }
    }

    /// Classifies an observed curve.
    ///
    /// # Errors
    ///
    /// Returns [`TenorError::InvalidParameter`] if the curve has no 2Y or no
    /// 10Y point, or if either rate is not finite.
    pub fn classify(points: &[YieldCurvePoint]) -> TenorResult<CurveShapeReport> {
        let two = required_rate(points, "2Y")?;
        let ten = required_rate(points, "10Y")?;
        let spread = ten - two;

        let short_long = match (find(points, "3M"), find(points, "30Y")) {
            (Some(short), Some(long)) if short.rate.is_finite() && long.rate.is_finite() => {
                Some((long.rate - short.rate) * 100.0)
            }
            _ => None,
        };

        let shape = Self::from_spread(spread);
        log::debug!("2s10s {spread:.3}pp -> {shape}");
        Ok(CurveShapeReport {
            shape,
            spread_2s10s_bp: spread * 100.0,
            spread_3m30y_bp: short_long,
        })
    }

    /// Short description of the shape.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Normal => "long yields moderately above short yields",
            Self::Flat => "little difference between short and long yields",
            Self::Inverted => "short yields above long yields",
            Self::Steep => "long yields well above short yields",
        }
    }
}

impl fmt::Display for CurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "Normal",
            Self::Flat => "Flat",
            Self::Inverted => "Inverted",
            Self::Steep => "Steep",
        };
        write!(f, "{name}")
    }
}

/// Shape classification with the spreads it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveShapeReport {
    /// Classified shape.
    pub shape: CurveShape,
    /// 10Y minus 2Y, in basis points.
    pub spread_2s10s_bp: f64,
    /// 30Y minus 3M, in basis points, when both points are present.
    pub spread_3m30y_bp: Option<f64>,
}

fn find<'a>(points: &'a [YieldCurvePoint], label: &str) -> Option<&'a YieldCurvePoint> {
    points.iter().find(|p| p.is_tenor(label))
}

fn required_rate(points: &[YieldCurvePoint], label: &str) -> TenorResult<f64> {
    let point = find(points, label).ok_or_else(|| {
        TenorError::invalid_parameter("curve", format!("missing {label} point"))
    })?;
    ensure_finite(label, point.rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> Vec<YieldCurvePoint> {
        [
            ("1M", 1.0 / 12.0, 5.32),
            ("3M", 0.25, 5.24),
            ("6M", 0.5, 5.08),
            ("1Y", 1.0, 4.72),
            ("2Y", 2.0, 4.25),
            ("3Y", 3.0, 4.10),
            ("5Y", 5.0, 4.05),
            ("7Y", 7.0, 4.12),
            ("10Y", 10.0, 4.22),
            ("20Y", 20.0, 4.52),
            ("30Y", 30.0, 4.42),
        ]
        .into_iter()
        .map(|(m, y, r)| YieldCurvePoint::new(m, y, r))
        .collect()
    }

    #[test]
    fn test_treasury_params() {
        let note = treasury_bond_params(10.0, 4.22, 4.22).unwrap();
        assert_eq!(note.frequency(), 2);
        assert_eq!(note.total_periods(), 20);
        assert_relative_eq!(note.coupon_rate(), 0.0422, epsilon = 1e-15);

        let bill = treasury_bond_params(1.0 / 12.0, 5.32, 5.32).unwrap();
        assert_eq!(bill.frequency(), 12);
        assert_eq!(bill.total_periods(), 1);

        let three_month = treasury_bond_params(0.25, 5.24, 5.24).unwrap();
        assert_eq!(three_month.frequency(), 4);

        assert!(treasury_bond_params(0.3, 5.0, 5.0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_term_structure() {
        let mut points = curve();
        points.reverse();
        let structure = duration_term_structure(&points).unwrap();

        assert_eq!(structure.len(), 11);
        assert_eq!(structure[0].maturity, "1M");
        assert_eq!(structure[10].maturity, "30Y");
        for p in &structure {
            assert_relative_eq!(p.price, 1000.0, max_relative = 1e-9);
            assert!(p.macaulay_duration <= p.years + 1e-12);
        }
        // Single payment bills have Macaulay equal to maturity
        assert_relative_eq!(structure[1].macaulay_duration, 0.25, epsilon = 1e-12);
        assert!(structure.windows(2).all(|w| w[0].macaulay_duration < w[1].macaulay_duration));
    }

    #[test]
    fn test_classify_sample_curve() {
        let report = CurveShape::classify(&curve()).unwrap();
        // 4.22 - 4.25 = -3bp
        assert_eq!(report.shape, CurveShape::Inverted);
        assert_relative_eq!(report.spread_2s10s_bp, -3.0, epsilon = 1e-9);
        assert_relative_eq!(report.spread_3m30y_bp.unwrap(), -82.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_spread() {
        assert_eq!(CurveShape::from_spread(-0.01), CurveShape::Inverted);
        assert_eq!(CurveShape::from_spread(0.0), CurveShape::Flat);
        assert_eq!(CurveShape::from_spread(0.2), CurveShape::Flat);
        assert_eq!(CurveShape::from_spread(0.5), CurveShape::Normal);
        assert_eq!(CurveShape::from_spread(1.0), CurveShape::Normal);
        assert_eq!(CurveShape::from_spread(1.5), CurveShape::Steep);
    }

    #[test]
    fn test_classify_missing_points() {
        let only_long = vec![YieldCurvePoint::new("10Y", 10.0, 4.0)];
        assert!(CurveShape::classify(&only_long).unwrap_err().is_invalid_parameter());

        let no_bills = vec![
            YieldCurvePoint::new("2Y", 2.0, 3.0),
            YieldCurvePoint::new("10Y", 10.0, 4.5),
        ];
        let report = CurveShape::classify(&no_bills).unwrap();
        assert_eq!(report.shape, CurveShape::Steep);
        assert_eq!(report.spread_3m30y_bp, None);
    }

    #[test]
    fn test_shape_serde() {
        assert_eq!(serde_json::to_string(&CurveShape::Inverted).unwrap(), "\"inverted\"");
        assert_eq!(CurveShape::Steep.to_string(), "Steep");
    }
}
