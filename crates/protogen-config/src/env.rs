//! Environment variable overrides.
//!
//! `PROTOGEN_*` variables are the highest-precedence layer: they replace
//! whatever the defaults or the config file set.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Variable naming the config file to load when none is given explicitly.
pub const CONFIG_PATH_VAR: &str = "PROTOGEN_CONFIG";

/// How an override's string value becomes a TOML value.
#[derive(Debug, Clone, Copy)]
enum Kind {
    Str,
    Float,
    Port,
}

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    section: &'static str,
    key: &'static str,
    kind: Kind,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "PROTOGEN_APP_ID",
        section: "app",
        key: "id",
        kind: Kind::Str,
    },
    EnvMapping {
        var_name: "PROTOGEN_FRAMERATE",
        section: "app",
        key: "framerate",
        kind: Kind::Float,
    },
    EnvMapping {
        var_name: "PROTOGEN_RENDER_STYLE",
        section: "render",
        key: "style",
        kind: Kind::Str,
    },
    EnvMapping {
        var_name: "PROTOGEN_WEB_MODE",
        section: "web",
        key: "mode",
        kind: Kind::Str,
    },
    EnvMapping {
        var_name: "PROTOGEN_WEB_BIND",
        section: "web",
        key: "bind_address",
        kind: Kind::Str,
    },
    EnvMapping {
        var_name: "PROTOGEN_WEB_PORT",
        section: "web",
        key: "port",
        kind: Kind::Port,
    },
    EnvMapping {
        var_name: "PROTOGEN_LOG_LEVEL",
        section: "logging",
        key: "level",
        kind: Kind::Str,
    },
    EnvMapping {
        var_name: "PROTOGEN_LOG_FORMAT",
        section: "logging",
        key: "format",
        kind: Kind::Str,
    },
];

/// Snapshot the process environment, keeping only `PROTOGEN_*` variables.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("PROTOGEN_"))
        .collect()
}

/// Apply every recognised override present in `env_vars` to `merged`.
///
/// Returns the number of overrides applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvOverride`] if a numeric variable does not parse.
pub fn apply_env_overrides<S: BuildHasher>(
    merged: &mut toml::Value,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<usize> {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };
        let value = coerce(mapping, raw)?;

        debug!(
            var = mapping.var_name,
            field = %format!("{}.{}", mapping.section, mapping.key),
            "applying env var override"
        );

        let Some(root) = merged.as_table_mut() else {
            continue;
        };
        let section = root
            .entry(mapping.section)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
        if let Some(table) = section.as_table_mut() {
            table.insert(mapping.key.to_owned(), value);
            count = count.saturating_add(1);
        }
    }

    Ok(count)
}

fn coerce(mapping: &EnvMapping, raw: &str) -> ConfigResult<toml::Value> {
    let raw = raw.trim();
    let err = |message: String| ConfigError::EnvOverride {
        var_name: mapping.var_name.to_owned(),
        message,
    };
    match mapping.kind {
        Kind::Str => Ok(toml::Value::String(raw.to_owned())),
        Kind::Float => raw
            .parse::<f64>()
            .map(toml::Value::Float)
            .map_err(|e| err(format!("expected a number, got '{raw}': {e}"))),
        Kind::Port => raw
            .parse::<u16>()
            .map(|p| toml::Value::Integer(i64::from(p)))
            .map_err(|e| err(format!("expected a port number, got '{raw}': {e}"))),
    }
}
