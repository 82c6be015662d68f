//! Configuration for the duration engine.

use serde::{Deserialize, Serialize};
use tenor_core::{TenorError, TenorResult};

use crate::curve::{DEFAULT_CURVE_STEPS, DEFAULT_YIELD_RANGE};
use crate::duration::{validate_bump, EFFECTIVE_DURATION_BUMP, KEY_RATE_BUMP};
use crate::immunization::IMMUNIZATION_TOLERANCE;

/// Defaults used by [`DurationEngine`](crate::engine::DurationEngine).
///
/// Missing fields take their default when deserialised, so a partial TOML or
/// JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-width of the price-yield curve window, as a decimal.
    pub curve_yield_range: f64,

    /// Number of intervals on the price-yield curve.
    pub curve_steps: usize,

    /// Bump for key rate duration, as a decimal.
    pub key_rate_bump: f64,

    /// Bump for effective duration and convexity, as a decimal.
    pub effective_bump: f64,

    /// Largest absolute duration gap still reported as immunized.
    pub immunization_tolerance: f64,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum batch size to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            curve_yield_range: DEFAULT_YIELD_RANGE,
            curve_steps: DEFAULT_CURVE_STEPS,
            key_rate_bump: KEY_RATE_BUMP,
            effective_bump: EFFECTIVE_DURATION_BUMP,
            immunization_tolerance: IMMUNIZATION_TOLERANCE,
            parallel: true,
            parallel_threshold: 100,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the price-yield curve window and resolution.
    #[must_use]
    pub fn with_curve(mut self, yield_range: f64, steps: usize) -> Self {
        self.curve_yield_range = yield_range;
        self.curve_steps = steps;
        self
    }

    /// Sets the key rate duration bump.
    #[must_use]
    pub fn with_key_rate_bump(mut self, bump: f64) -> Self {
        self.key_rate_bump = bump;
        self
    }

    /// Sets the effective duration and convexity bump.
    #[must_use]
    pub fn with_effective_bump(mut self, bump: f64) -> Self {
        self.effective_bump = bump;
        self
    }

    /// Sets the immunization tolerance.
    #[must_use]
    pub fn with_immunization_tolerance(mut self, tolerance: f64) -> Self {
        self.immunization_tolerance = tolerance;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks every numeric setting.
    ///
    /// # Errors
    ///
    /// Returns [`TenorError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> TenorResult<()> {
        if !self.curve_yield_range.is_finite() || self.curve_yield_range <= 0.0 {
            return Err(TenorError::invalid_parameter(
                "curve_yield_range",
                "must be positive and finite",
            ));
        }
        if self.curve_steps == 0 {
            return Err(TenorError::invalid_parameter("curve_steps", "must be at least 1"));
        }
        validate_bump(self.key_rate_bump)
            .map_err(|e| TenorError::invalid_parameter("key_rate_bump", e.to_string()))?;
        validate_bump(self.effective_bump)
            .map_err(|e| TenorError::invalid_parameter("effective_bump", e.to_string()))?;
        if !self.immunization_tolerance.is_finite() || self.immunization_tolerance <= 0.0 {
            return Err(TenorError::invalid_parameter(
                "immunization_tolerance",
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}
