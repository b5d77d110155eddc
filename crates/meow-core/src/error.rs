//! Unified error types for Meow

use thiserror::Error;

/// Unified error type for all Meow operations
#[derive(Error, Debug)]
pub enum MeowError {
    // Event errors
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value for parameter {key}: {value:?}")]
    InvalidParameter { key: String, value: String },

    // Card errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeowError {
    /// True when the error was caused by the caller's input rather than by
    /// this system or its configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimezone(_) | Self::MissingParameter(_) | Self::InvalidParameter { .. }
        )
    }
}

/// Result type alias using MeowError
pub type Result<T> = std::result::Result<T, MeowError>;
