//! Error types for the Tenor engine.
//!
//! Two failure classes exist: inputs rejected before any arithmetic runs, and
//! numerical failures detected after the fact. Neither is ever reported as a
//! silent `NaN`.

use thiserror::Error;

/// A specialized Result type for Tenor operations.
pub type TenorResult<T> = Result<T, TenorError>;

/// The main error type for Tenor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TenorError {
    /// An input was rejected before computation.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A computation produced an undefined result (zero price, non-finite value).
    #[error("Computation error: {reason}")]
    ComputationError {
        /// Description of what went wrong.
        reason: String,
    },
}

impl TenorError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a computation error.
    #[must_use]
    pub fn computation(reason: impl Into<String>) -> Self {
        Self::ComputationError {
            reason: reason.into(),
        }
    }

    /// Returns true if the error was raised while validating inputs.
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns true if the error was raised by a failed computation.
    #[must_use]
    pub fn is_computation_error(&self) -> bool {
        matches!(self, Self::ComputationError { .. })
    }
}

/// Rejects NaN and infinite inputs.
///
/// # Errors
///
/// Returns [`TenorError::InvalidParameter`] naming `name` when `value` is not finite.
pub fn ensure_finite(name: &str, value: f64) -> TenorResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TenorError::invalid_parameter(
            name,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Rejects a computed value that is NaN or infinite.
///
/// # Errors
///
/// Returns [`TenorError::ComputationError`] describing `what` when `value` is not finite.
pub fn ensure_finite_result(what: &str, value: f64) -> TenorResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TenorError::computation(format!(
            "{what} is not finite ({value})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TenorError::invalid_parameter("frequency", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `frequency`: must be positive"
        );

        let err = TenorError::computation("price is zero");
        assert!(err.to_string().contains("price is zero"));
    }

    #[test]
    fn test_error_classification() {
        assert!(TenorError::invalid_parameter("ytm", "nan").is_invalid_parameter());
        assert!(TenorError::computation("overflow").is_computation_error());
        assert!(!TenorError::computation("overflow").is_invalid_parameter());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("ytm", 0.05).unwrap(), 0.05);
        assert!(ensure_finite("ytm", f64::NAN).unwrap_err().is_invalid_parameter());
        assert!(ensure_finite("ytm", f64::INFINITY).is_err());
        assert!(ensure_finite_result("price", f64::NEG_INFINITY)
            .unwrap_err()
            .is_computation_error());
    }
}
