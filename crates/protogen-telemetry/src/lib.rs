//! Protogen Telemetry - Logging setup for protogen hosts.
//!
//! Library crates only emit `tracing` events; the host binary calls
//! [`setup_logging`] once at startup to install a subscriber.
//!
//! # Example
//!
//! ```rust,no_run
//! use protogen_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), protogen_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("protogen_app=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("Host starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
