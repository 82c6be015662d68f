//! Price-yield curve generation.
//!
//! The curve is produced lazily: [`PriceYieldCurve`] is an iterator over
//! evenly spaced yields, re-pricing the bond at each one and pairing the exact
//! price with the tangent-line estimate from modified duration. Cloning the
//! iterator (or calling [`PriceYieldCurve::reset`]) restarts it.

use serde::{Deserialize, Serialize};
use tenor_core::{BondParams, TenorError, TenorResult};

use crate::duration::compute_duration;
use crate::pricing::{base_for_yield, present_value};

/// Default half-width of the yield window (±400 basis points).
pub const DEFAULT_YIELD_RANGE: f64 = 0.04;

/// Default number of intervals; the curve has one more point than this.
pub const DEFAULT_CURVE_STEPS: usize = 50;

/// Lowest yield a curve will start from.
pub const MIN_CURVE_YIELD: f64 = 0.001;

/// One point on a price-yield curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Yield as a decimal fraction.
    #[serde(rename = "yield")]
    pub yield_rate: f64,
    /// Exact price at this yield.
    pub price: f64,
    /// `P₀ × (1 - D_mod × (y - y₀))`.
    pub duration_approx_price: f64,
}

impl CurvePoint {
    /// Gap between the exact price and the duration line. Non-negative for a
    /// positively convex bond.
    pub fn convexity_gap(&self) -> f64 {
        self.price - self.duration_approx_price
    }
}

/// Lazy, finite iterator over a price-yield curve.
#[derive(Debug, Clone)]
pub struct PriceYieldCurve {
    params: BondParams,
    base_price: f64,
    modified_duration: f64,
    min_yield: f64,
    max_yield: f64,
    step: f64,
    steps: usize,
    next: usize,
}

impl PriceYieldCurve {
    /// Lowest yield on the curve.
    pub fn min_yield(&self) -> f64 {
        self.min_yield
    }

    /// Highest yield on the curve.
    pub fn max_yield(&self) -> f64 {
        self.max_yield
    }

    /// Price at the bond's own yield.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Rewinds the iterator to the first point.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    fn point_at(&self, index: usize) -> CurvePoint {
        let yield_rate = if index == self.steps {
            self.max_yield
        } else {
            self.min_yield + self.step * index as f64
        };
        let price = present_value(&self.params, base_for_yield(&self.params, yield_rate));
        CurvePoint {
            yield_rate,
            price,
            duration_approx_price: self.base_price
                * (1.0 - self.modified_duration * (yield_rate - self.params.ytm())),
        }
    }
}

impl Iterator for PriceYieldCurve {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<CurvePoint> {
        if self.next > self.steps {
            return None;
        }
        let point = self.point_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PriceYieldCurve {}

impl std::iter::FusedIterator for PriceYieldCurve {}

/// Builds a price-yield curve of `steps + 1` points.
///
/// The window is `[max(0.001, ytm - yield_range), ytm + yield_range]`.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] for a non-finite or non-positive
/// range, zero steps, or a window lying entirely below the 0.001 floor, and
/// [`TenorError::ComputationError`] if the bond cannot be priced at its own
/// yield.
///
/// # Example
///
/// ```rust
/// use tenor_analytics::curve::generate_curve;
/// use tenor_core::BondParams;
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
/// let curve = generate_curve(&bond, 0.04, 50).unwrap();
/// assert_eq!(curve.len(), 51);
/// ```
pub fn generate_curve(
    params: &BondParams,
    yield_range: f64,
    steps: usize,
) -> TenorResult<PriceYieldCurve> {
    if !yield_range.is_finite() || yield_range <= 0.0 {
        return Err(TenorError::invalid_parameter(
            "yield_range",
            format!("must be positive and finite, got {yield_range}"),
        ));
    }
    if steps == 0 {
        return Err(TenorError::invalid_parameter("steps", "must be at least 1"));
    }

    let min_yield = (params.ytm() - yield_range).max(MIN_CURVE_YIELD);
    let max_yield = params.ytm() + yield_range;
    if max_yield < min_yield {
        return Err(TenorError::invalid_parameter(
            "yield_range",
            format!("window ends at {max_yield}, below the {MIN_CURVE_YIELD} floor"),
        ));
    }

    let analytics = compute_duration(params)?;
    log::debug!(
        "curve for {params}: {steps} steps over [{min_yield:.4}, {max_yield:.4}]"
    );

    Ok(PriceYieldCurve {
        params: *params,
        base_price: analytics.price,
        modified_duration: analytics.modified_duration,
        min_yield,
        max_yield,
        step: (max_yield - min_yield) / steps as f64,
        steps,
        next: 0,
    })
}
