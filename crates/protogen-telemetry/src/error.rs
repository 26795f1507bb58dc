//! Errors raised while installing the log subscriber.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons logging could not be set up.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level string or a directive is not a valid filter.
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// The rejected filter text.
        filter: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("log subscriber already installed: {0}")]
    AlreadyInstalled(String),

    /// The directory for a file target could not be created.
    #[error("cannot create log directory {}: {source}", .path.display())]
    LogDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
