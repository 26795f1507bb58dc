//! Protogen Host - Reference host for the protogen face app.
//!
//! Loads configuration, creates the app, drives it through configuration,
//! initialization and a fixed number of frames, then destroys it. A sine-wave
//! demo sensor stands in for the voice sensor.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config_bridge;
mod sensor;

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use protogen_app::{ProtogenApp, WebHost, WebHostConfig};
use protogen_config::{Config, WebModeConfig};
use protogen_core::{RecordingCanvas, Resolution, SharedProvider};
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use sensor::SineProportion;

/// How long to wait for a web server to bind before reporting it.
const BIND_TIMEOUT: Duration = Duration::from_secs(5);

/// Period of the demo sensor's sweep.
const SENSOR_PERIOD: Duration = Duration::from_secs(2);

/// Protogen Host - run the face app against a recording canvas
#[derive(Parser)]
#[command(name = "protogen-host")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PROTOGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the app's read-only assets
    #[arg(long, default_value = ".")]
    resources: PathBuf,

    /// Directory the app may write user data to
    #[arg(long, default_value = ".")]
    user_data: PathBuf,

    /// Display width in pixels
    #[arg(long, default_value_t = 128)]
    width: u32,

    /// Display height in pixels
    #[arg(long, default_value_t = 32)]
    height: u32,

    /// Number of frames to render before exiting
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Override the configured web mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    SelfHosted,
    HostMounted,
    Disabled,
}

impl From<ModeArg> for WebModeConfig {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::SelfHosted => Self::SelfHosted,
            ModeArg::HostMounted => Self::HostMounted,
            ModeArg::Disabled => Self::Disabled,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(mode) = cli.mode {
        config.web.mode = mode.into();
    }
    if let Some(level) = &cli.log_level {
        level.clone_into(&mut config.logging.level);
    }
    config.validate().context("invalid configuration")?;

    let log_config = config_bridge::to_log_config(&config, cli.log_file.as_deref());
    if let Err(e) = protogen_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
        if let Err(e) = protogen_telemetry::setup_default_logging() {
            eprintln!("Falling back to stderr logging failed: {e}");
        }
    }

    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let resolution = Resolution::new(cli.width, cli.height);
    ensure!(
        !resolution.is_empty(),
        "display resolution {resolution} has no pixels"
    );
    let mut app = protogen_face::create_app(config).context("failed to create app")?;

    let sensor: SharedProvider = Arc::new(SineProportion::new(SENSOR_PERIOD));
    app.set_proportion_provider(Some(sensor));

    app.set_resources_directory(&cli.resources)?;
    app.set_user_data_directory(&cli.user_data)?;
    app.set_device_resolution(resolution)?;

    app.sanity_check()?;
    app.initialize().context("failed to initialize app")?;
    app.set_active(true);

    let mounted = mount_endpoints(app.as_ref(), config, &cli.resources)?;
    report_web(app.as_ref(), mounted.as_ref());

    render_frames(app.as_ref(), resolution, cli.frames);

    drop(mounted);
    protogen_face::destroy_app(app);
    info!("Host finished");
    Ok(())
}

/// Serve the app's endpoint list from the host's own server, if it has one.
///
/// Uses the `[web]` bind address and port.
fn mount_endpoints(
    app: &dyn ProtogenApp,
    config: &Config,
    resources: &Path,
) -> Result<Option<WebHost>> {
    let endpoints = app.server_endpoints();
    if endpoints.is_empty() {
        return Ok(None);
    }

    let manifest = app.manifest();
    manifest.check_static_mount(&endpoints)?;
    info!(count = endpoints.len(), "Mounting app endpoints");
    let router = endpoints.into_router().nest_service(
        &manifest.static_files_path,
        ServeDir::new(manifest.static_dir(resources)),
    );
    let bind_address = config
        .web
        .bind_address
        .parse::<IpAddr>()
        .with_context(|| format!("invalid bind address '{}'", config.web.bind_address))?;
    let host = WebHost::spawn(
        WebHostConfig {
            bind_address,
            port: config.web.port,
        },
        router,
    )?;
    Ok(Some(host))
}

fn report_web(app: &dyn ProtogenApp, mounted: Option<&WebHost>) {
    let port = match mounted {
        Some(host) => host.wait_until_bound(BIND_TIMEOUT),
        None => app.web_port(),
    };
    match port {
        Some(port) => info!(port, "App web surface available"),
        None if mounted.is_some() => warn!("Host web server failed to bind"),
        None => debug!(status = %app.web_status(), "No web port"),
    }
}

fn render_frames(app: &dyn ProtogenApp, resolution: Resolution, frames: u32) {
    let interval = Duration::from_secs_f32(1.0 / app.framerate());
    let mut canvas = RecordingCanvas::new(resolution);

    for frame in 0..frames {
        canvas.clear();
        app.render(&mut canvas);
        debug!(frame, commands = canvas.commands().len(), "Frame rendered");
        std::thread::sleep(interval);
    }
    info!(frames, "Rendering finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["protogen-host"]);
        assert_eq!(cli.width, 128);
        assert_eq!(cli.height, 32);
        assert_eq!(cli.frames, 30);
        assert!(cli.mode.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_cli_mode_override() {
        let cli = Cli::parse_from(["protogen-host", "--mode", "host-mounted", "--frames", "2"]);
        assert!(matches!(
            cli.mode.map(WebModeConfig::from),
            Some(WebModeConfig::HostMounted)
        ));
        assert_eq!(cli.frames, 2);
    }

    #[test]
    fn test_empty_display_is_refused() {
        let cli = Cli::parse_from(["protogen-host", "--width", "0", "--frames", "1"]);
        let err = run(&cli, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("has no pixels"), "{err}");
    }
}
