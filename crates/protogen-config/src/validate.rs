//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges.

use std::net::IpAddr;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Highest framerate a host is asked to sustain.
pub const MAX_FRAMERATE: f32 = 240.0;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Routes the face app serves itself; the static mount must not cover them.
pub const RESERVED_ROUTES: &[&str] = &[
    "/home",
    "/hello",
    "/hello/website",
    "/attributes",
    "/attributes/:id",
];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_app(config)?;
    validate_web(config)?;
    validate_logging(config)?;
    Ok(())
}

/// Whether `id` is a usable app identifier: non-empty, lowercase ASCII
/// alphanumerics and hyphens, not starting or ending with a hyphen.
#[must_use]
pub fn is_valid_app_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_app(config: &Config) -> ConfigResult<()> {
    let app = &config.app;

    if !is_valid_app_id(&app.id) {
        return Err(invalid(
            "app.id",
            format!(
                "'{}' must be non-empty lowercase alphanumerics and hyphens",
                app.id
            ),
        ));
    }

    if !app.framerate.is_finite() || app.framerate <= 0.0 || app.framerate > MAX_FRAMERATE {
        return Err(invalid(
            "app.framerate",
            format!(
                "{} is out of range; must be greater than 0 and at most {MAX_FRAMERATE}",
                app.framerate
            ),
        ));
    }

    for (field, value) in [
        ("app.thumbnail", &app.thumbnail),
        ("app.main_page", &app.main_page),
        ("app.home_page", &app.home_page),
        ("app.static_files_path", &app.static_files_path),
    ] {
        if !value.starts_with('/') {
            return Err(invalid(field, format!("'{value}' must start with '/'")));
        }
    }

    validate_static_mount(&app.static_files_path)?;

    let dir = &app.static_files_directory;
    if dir.is_empty() || dir.starts_with('/') || dir.split(['/', '\\']).any(|s| s == "..") {
        return Err(invalid(
            "app.static_files_directory",
            format!("'{dir}' must be a non-empty relative path inside the resources directory"),
        ));
    }

    Ok(())
}

fn validate_static_mount(path: &str) -> ConfigResult<()> {
    const FIELD: &str = "app.static_files_path";

    if path == "/" || path.ends_with('/') {
        return Err(invalid(FIELD, format!("'{path}' must not be '/' or end with '/'")));
    }
    if path
        .split('/')
        .skip(1)
        .any(|s| s.is_empty() || s.starts_with(':') || s.starts_with('*'))
    {
        return Err(invalid(
            FIELD,
            format!("'{path}' must consist of non-empty literal segments"),
        ));
    }
    if let Some(route) = RESERVED_ROUTES.iter().find(|r| mount_covers(path, r)) {
        return Err(invalid(FIELD, format!("'{path}' overlaps the app route '{route}'")));
    }
    Ok(())
}

/// Whether serving everything under `mount` would capture `route`.
fn mount_covers(mount: &str, route: &str) -> bool {
    let mut route_segments = route.split('/').filter(|s| !s.is_empty());
    mount.split('/').filter(|s| !s.is_empty()).all(|m| {
        route_segments
            .next()
            .is_some_and(|r| r == m || r.starts_with(':'))
    })
}

fn validate_web(config: &Config) -> ConfigResult<()> {
    config
        .web
        .bind_address
        .parse::<IpAddr>()
        .map_err(|e| invalid("web.bind_address", format!("'{}': {e}", config.web.bind_address)))?;
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let level = &config.logging.level;
    // Bare words are levels or targets; only `target=level` values are checked.
    for directive in level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let Some((_, lvl)) = directive.rsplit_once('=') else {
            continue;
        };
        if !LEVELS.contains(&lvl.trim().to_ascii_lowercase().as_str()) {
            return Err(invalid(
                "logging.level",
                format!("unknown level '{lvl}' in '{level}'; expected one of {LEVELS:?}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_app_id_rules() {
        assert!(is_valid_app_id("protogen-face"));
        assert!(is_valid_app_id("face2"));
        assert!(!is_valid_app_id(""));
        assert!(!is_valid_app_id("Face"));
        assert!(!is_valid_app_id("face_app"));
        assert!(!is_valid_app_id("-face"));
        assert!(!is_valid_app_id("face-"));
    }

    #[test]
    fn test_framerate_bounds() {
        for bad in [0.0, -1.0, 241.0, f32::NAN, f32::INFINITY] {
            let mut config = Config::default();
            config.app.framerate = bad;
            assert!(validate(&config).is_err(), "{bad} accepted");
        }
        let mut config = Config::default();
        config.app.framerate = 240.0;
        validate(&config).unwrap();
    }

    #[test]
    fn test_paths_must_be_absolute_urls() {
        let mut config = Config::default();
        config.app.home_page = "home".into();
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "app.home_page"));
    }

    #[test]
    fn test_static_directory_must_stay_inside_resources() {
        let mut config = Config::default();
        config.app.static_files_directory = "../etc".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bind_address_must_parse() {
        let mut config = Config::default();
        config.web.bind_address = "localhost".into();
        assert!(validate(&config).is_err());
        config.web.bind_address = "127.0.0.1".into();
        validate(&config).unwrap();
    }

    #[test]
    fn test_log_level_directives() {
        let mut config = Config::default();
        config.logging.level = "warn,protogen_app=debug".into();
        validate(&config).unwrap();
        config.logging.level = "protogen_app=loud".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_target_only_directives_are_accepted() {
        let mut config = Config::default();
        for level in ["info,hyper", "protogen_app", "debug,tower_http=warn,axum"] {
            config.logging.level = level.into();
            validate(&config).unwrap();
        }
    }

    #[test]
    fn test_static_mount_rejects_root_and_app_routes() {
        for bad in ["/", "/home", "/hello", "/hello/website", "/attributes", "/attributes/x", "/static/"] {
            let mut config = Config::default();
            config.app.static_files_path = bad.into();
            let err = validate(&config).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "app.static_files_path"),
                "{bad} accepted"
            );
        }

        let mut config = Config::default();
        config.app.static_files_path = "/home/assets".into();
        validate(&config).unwrap();
    }
}
