//! errors.rs - Custom error types for the inputguard-core library.
//!
//! Sanitization itself is total and never produces one of these. They cover the
//! surrounding concerns: loading and validating table configurations, compiling
//! them into regexes, and (de)serializing values for the headless helpers.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `inputguard-core`.
///
/// `#[non_exhaustive]` so new variants can be added without breaking downstream
/// matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SanitizerError {
    #[error("Failed to compile pattern for stage '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Token '{0}': length ({1}) exceeds maximum allowed ({2})")]
    TokenLengthExceeded(String, usize, usize),

    #[error("Invalid sanitizer configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to serialize value: {0}")]
    Serialization(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl From<serde_json::Error> for SanitizerError {
    fn from(err: serde_json::Error) -> Self {
        SanitizerError::Serialization(err.to_string())
    }
}
