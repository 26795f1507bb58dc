//! End-to-end loading through files and environment overrides.

use std::collections::HashMap;
use std::io::Write;

use protogen_config::{Config, ConfigError, RenderStyleConfig, WebModeConfig};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn file_overlay_deep_merges_with_defaults() {
    let file = write_config(
        r#"
[app]
name = "Visor"

[web]
port = 8080
"#,
    );

    let config = Config::load_with_env(Some(file.path()), &HashMap::new()).unwrap();
    assert_eq!(config.app.name, "Visor");
    assert_eq!(config.app.id, "protogen-face");
    assert_eq!(config.web.port, 8080);
    assert_eq!(config.web.bind_address, "0.0.0.0");
    assert_eq!(config.web.mode, WebModeConfig::SelfHosted);
}

#[test]
fn env_overrides_beat_the_file() {
    let file = write_config("[render]\nstyle = \"face\"\n[app]\nframerate = 60.0\n");
    let env = HashMap::from([
        ("PROTOGEN_RENDER_STYLE".to_owned(), "flat".to_owned()),
        ("PROTOGEN_WEB_MODE".to_owned(), "host_mounted".to_owned()),
    ]);

    let config = Config::load_with_env(Some(file.path()), &env).unwrap();
    assert_eq!(config.render.style, RenderStyleConfig::Flat);
    assert_eq!(config.web.mode, WebModeConfig::HostMounted);
    assert!((config.app.framerate - 60.0).abs() < f32::EPSILON);
}

#[test]
fn config_path_can_come_from_env() {
    let file = write_config("[app]\nid = \"from-env-file\"\n");
    let env = HashMap::from([(
        "PROTOGEN_CONFIG".to_owned(),
        file.path().display().to_string(),
    )]);

    let config = Config::load_with_env(None, &env).unwrap();
    assert_eq!(config.app.id, "from-env-file");
}

#[test]
fn malformed_file_reports_its_path() {
    let file = write_config("[app\nid = ");
    let err = Config::load_with_env(Some(file.path()), &HashMap::new()).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => {
            assert_eq!(path, file.path().display().to_string());
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_id_is_rejected() {
    let err = Config::from_toml_str("[app]\nid = \"Not Valid\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "app.id"));
}

#[test]
fn invalid_framerate_from_env_is_rejected() {
    let env = HashMap::from([("PROTOGEN_FRAMERATE".to_owned(), "0".to_owned())]);
    let err = Config::load_with_env(None, &env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "app.framerate"));
}

#[test]
fn unknown_mode_fails_to_deserialize() {
    let err = Config::from_toml_str("[web]\nmode = \"broadcast\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}
