//! Layered loading.
//!
//! 1. Parse the embedded `defaults.toml` → base
//! 2. Merge the config file, if any
//! 3. Apply `PROTOGEN_*` environment overrides
//! 4. Deserialize the merged tree → [`Config`]
//! 5. Validate

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{CONFIG_PATH_VAR, apply_env_overrides};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
pub(crate) const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load configuration with the full precedence chain.
///
/// `path` names the config file; when `None`, the file named by
/// `PROTOGEN_CONFIG` in `env_vars` is used, and when that is also absent only
/// defaults and overrides apply. A named file must exist.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is unreadable or malformed, an
/// override does not parse, or the merged configuration fails validation.
pub fn load<S: BuildHasher>(
    path: Option<&Path>,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<Config> {
    let mut merged = parse_defaults()?;

    let file = path
        .map(Path::to_path_buf)
        .or_else(|| env_vars.get(CONFIG_PATH_VAR).map(PathBuf::from));
    if let Some(file) = file {
        let overlay = read_file(&file)?;
        deep_merge(&mut merged, &overlay);
        info!(path = %file.display(), "loaded config file");
    }

    let applied = apply_env_overrides(&mut merged, env_vars)?;
    if applied > 0 {
        debug!(count = applied, "applied environment overrides");
    }

    finish(merged, "<merged config>")
}

/// Parse a TOML document layered over the defaults, without consulting the
/// environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the document is malformed or the result fails
/// validation.
pub fn load_str(content: &str) -> ConfigResult<Config> {
    let mut merged = parse_defaults()?;
    let overlay: toml::Value = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: "<string>".to_owned(),
        source: e,
    })?;
    deep_merge(&mut merged, &overlay);
    finish(merged, "<string>")
}

fn parse_defaults() -> ConfigResult<toml::Value> {
    toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
        path: "<embedded defaults>".to_owned(),
        source: e,
    })
}

fn finish(merged: toml::Value, origin: &str) -> ConfigResult<Config> {
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: origin.to_owned(),
                source: e,
            })?;
    validate::validate(&config)?;
    Ok(config)
}

fn read_file(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::InvalidValue {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let val: toml::Value = toml::from_str(DEFAULTS_TOML).unwrap();
        let table = val.as_table().unwrap();
        for section in ["app", "render", "web", "logging"] {
            assert!(table.contains_key(section), "missing [{section}]");
        }
    }

    #[test]
    fn test_defaults_match_default_impl() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_without_file_or_env() {
        let config = load(None, &HashMap::new()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_named_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/protogen.toml")), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
