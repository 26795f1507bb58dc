#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Layered configuration for protogen apps and hosts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use protogen_config::Config;
//!
//! let config = Config::load(Some(std::path::Path::new("protogen.toml"))).unwrap();
//! println!("Rendering at {} fps", config.app.framerate);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`PROTOGEN_*`)
//! 2. **Config file** (`--config` or `PROTOGEN_CONFIG`)
//! 3. **Embedded defaults** (`defaults.toml` compiled into binary)
//!
//! # Design
//!
//! This crate has **no dependencies on other internal protogen crates**.
//! Conversion from config types to domain types happens at the integration
//! boundary via bridge modules.

/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Layered configuration merging.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl Config {
    /// Load configuration from defaults, an optional file and the process
    /// environment.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is malformed, an override does
    /// not parse, or the final configuration fails validation.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        loader::load(path, &env::collect_env_vars())
    }

    /// Load configuration with an explicit set of environment variables.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with_env<S: BuildHasher>(
        path: Option<&Path>,
        env_vars: &HashMap<String, String, S>,
    ) -> ConfigResult<Self> {
        loader::load(path, env_vars)
    }

    /// Parse a TOML document layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the document is malformed or invalid.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        loader::load_str(content)
    }

    /// Check the configuration against the validation rules.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> ConfigResult<()> {
        validate::validate(self)
    }
}
