//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Malformed suite trace
    #[error("Invalid trace {path}: {message}")]
    Trace {
        /// Trace file
        path: String,
        /// Error message
        message: String,
    },

    /// One or more replayed units failed
    #[error("{failed} of {total} units failed")]
    UnitFailures {
        /// Failed units
        failed: usize,
        /// Units run
        total: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Coverage library error
    #[error("Coverage error: {0}")]
    Coverage(#[from] suitecov::CoverageError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a trace error
    #[must_use]
    pub fn trace(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Trace {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
