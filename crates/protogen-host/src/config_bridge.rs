//! Conversion from configuration to telemetry types.

use std::path::Path;

use protogen_config::{Config, LogFormatConfig};
use protogen_telemetry::{LogConfig, LogFormat};

/// Build the logging setup from the `[logging]` section.
///
/// A `log_file` sends output to that file instead of stderr.
pub(crate) fn to_log_config(config: &Config, log_file: Option<&Path>) -> LogConfig {
    let format = match config.logging.format {
        LogFormatConfig::Pretty => LogFormat::Pretty,
        LogFormatConfig::Compact => LogFormat::Compact,
        LogFormatConfig::Json => LogFormat::Json,
    };
    let log = LogConfig::new(config.logging.level.clone()).with_format(format);

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map_or_else(|| "protogen-host.log".into(), |name| name.to_string_lossy());
            log.with_file(directory, file_name)
        },
        None => log,
    }
}
