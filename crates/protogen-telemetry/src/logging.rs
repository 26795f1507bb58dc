//! Logging configuration and setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{TelemetryError, TelemetryResult};

fn init_err<E: std::fmt::Display>(e: E) -> TelemetryError {
    TelemetryError::AlreadyInstalled(e.to_string())
}

fn filter_err(filter: &str, e: impl std::fmt::Display) -> TelemetryError {
    TelemetryError::InvalidFilter {
        filter: filter.to_owned(),
        message: e.to_string(),
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format with colors (default).
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for structured logging.
    Json,
}

/// Log output target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to stdout.
    Stdout,
    /// Log to stderr.
    #[default]
    Stderr,
    /// Append to a single, never-rotated file.
    File {
        /// Directory the file lives in; created if missing.
        directory: PathBuf,
        /// File name inside `directory`.
        file_name: String,
    },
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
    /// Log target.
    #[serde(default)]
    pub target: LogTarget,
    /// Directive overrides (e.g., `protogen_app=debug`).
    #[serde(default)]
    pub directives: Vec<String>,
    /// Whether to use ANSI colors.
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            directives: Vec::new(),
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Log to `directory/file_name` instead of a terminal.
    #[must_use]
    pub fn with_file(mut self, directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        self.target = LogTarget::File {
            directory: directory.into(),
            file_name: file_name.into(),
        };
        // Disable ANSI colors for file output
        self.ansi = false;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Build the env filter from config.
    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.level).map_err(|e| filter_err(&self.level, e))?;

        for directive in &self.directives {
            let parsed: Directive = directive.parse().map_err(|e| filter_err(directive, e))?;
            filter = filter.add_directive(parsed);
        }

        Ok(filter)
    }
}

/// Set up logging with the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log directory cannot
/// be created, or a global subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;

    match &config.target {
        LogTarget::Stdout => install(filter, config, std::io::stdout),
        LogTarget::Stderr => install(filter, config, std::io::stderr),
        LogTarget::File {
            directory,
            file_name,
        } => {
            std::fs::create_dir_all(directory).map_err(|source| TelemetryError::LogDirectory {
                path: directory.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            install(filter, config, appender)
        },
    }
}

fn install<W>(filter: EnvFilter, config: &LogConfig, writer: W) -> TelemetryResult<()>
where
    W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer).with_thread_names(true))
            .try_init()
            .map_err(init_err),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(config.ansi)
                    .with_thread_names(true),
            )
            .try_init()
            .map_err(init_err),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.ansi)
                    .with_thread_names(true),
            )
            .try_init()
            .map_err(init_err),
    }
}

/// Set up default logging (info level, stderr, pretty format).
///
/// # Errors
///
/// Returns an error if logging cannot be initialized.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.ansi);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .with_directive("protogen_app=trace");

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["protogen_app=trace"]);
    }

    #[test]
    fn test_file_target_disables_ansi() {
        let config = LogConfig::new("info").with_file("/tmp/logs", "host.log");
        assert!(!config.ansi);
        assert!(matches!(config.target, LogTarget::File { ref file_name, .. } if file_name == "host.log"));
    }

    #[test]
    fn test_log_config_serialization() {
        let config = LogConfig::new("warn").with_format(LogFormat::Compact);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"level\":\"warn\""));
        assert!(json.contains("\"format\":\"compact\""));

        let parsed: LogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_build_filter() {
        let config = LogConfig::new("debug").with_directive("protogen=trace");
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_invalid() {
        let config = LogConfig::new("debug").with_directive("[invalid=syntax");
        let err = config.build_filter().unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::InvalidFilter { ref filter, .. } if filter == "[invalid=syntax"
        ));
    }

    #[test]
    fn test_unwritable_log_directory_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let config = LogConfig::new("info").with_file(blocker.join("logs"), "host.log");

        let err = setup_logging(&config).unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::LogDirectory { ref path, .. } if *path == blocker.join("logs")
        ));
        assert!(err.to_string().contains("cannot create log directory"));
    }

    #[test]
    fn test_file_target_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");
        let config = LogConfig::new("info").with_file(&logs, "host.log");

        // The global subscriber may already be taken by another test; the
        // directory is created before that matters.
        let _ = setup_logging(&config);
        assert!(logs.is_dir());
    }
}
