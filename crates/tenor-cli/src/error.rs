//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid coupon rate.
    #[error("Invalid coupon rate: {0}. Must be between 0 and 100.")]
    InvalidCoupon(f64),

    /// Invalid yield.
    #[error("Invalid yield: {0}. Must be between -10 and 100.")]
    InvalidYield(f64),

    /// Unsupported coupon frequency.
    #[error("Invalid frequency: {0}. Use 1, 2, 4, or 12.")]
    InvalidFrequency(u32),

    /// Unknown configuration key.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file could not be interpreted.
    #[error("Could not read {path}: {reason}")]
    Input {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates an input error for `path`.
    pub fn input(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Input {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
