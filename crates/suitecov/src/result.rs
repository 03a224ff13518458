//! Result and error types for Suitecov.

use thiserror::Error;

/// Result type for Suitecov operations
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Errors that can occur while collecting or reporting coverage
#[derive(Debug, Error)]
pub enum CoverageError {
    /// Configuration error (unknown option, malformed filter file)
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid state error (operation called in wrong lifecycle state)
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// `start` called while a collection window is already open
    #[error("Collection window already open for '{open}', cannot start '{requested}'")]
    WindowAlreadyOpen {
        /// Label of the open window
        open: String,
        /// Label that was requested
        requested: String,
    },

    /// `stop` called with no open collection window
    #[error("No open collection window to stop")]
    NoOpenWindow,

    /// Report generation error
    #[error("Report generation failed for {target}: {message}")]
    Report {
        /// Report target
        target: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CoverageError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a report generation error
    #[must_use]
    pub fn report(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Report {
            target: target.into(),
            message: message.into(),
        }
    }
}
