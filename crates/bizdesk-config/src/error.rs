//! Error types for configuration loading.

use thiserror::Error;

/// Primary error type for configuration loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable held a value outside its accepted set.
    #[error("invalid value for {variable}")]
    InvalidValue {
        /// Variable that failed to parse.
        variable: &'static str,
        /// Offending raw value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
