//! Error types for the app contract.

use thiserror::Error;

use crate::lifecycle::AppState;

/// Errors returned by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A configuration call arrived before the one that must precede it.
    #[error("{operation} called out of order (state: {state})")]
    OutOfOrder {
        /// The rejected operation.
        operation: &'static str,
        /// State at the time of the call.
        state: AppState,
    },

    /// Initialization was requested before configuration completed.
    #[error("app is not configured (state: {state})")]
    NotConfigured {
        /// State at the time of the call.
        state: AppState,
    },

    /// Initialization was requested a second time.
    #[error("app is already initialized")]
    AlreadyInitialized,

    /// The app has been shut down.
    #[error("app has been destroyed")]
    Destroyed,

    /// The manifest is malformed.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// The embedded web host could not be started.
    #[error("web host error: {0}")]
    WebHost(String),
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Outcome of a failed sanity check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sanity check failed: {}", .problems.join("; "))]
pub struct SanityError {
    /// Human-readable description of each problem found.
    pub problems: Vec<String>,
}
