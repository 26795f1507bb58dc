//! Configuration struct definitions.
//!
//! Every section derives `Default` with the same values as the embedded
//! `defaults.toml`, so a partially specified file still deserializes.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// App identity and declared capabilities.
    pub app: AppConfig,
    /// Rendering options.
    pub render: RenderConfig,
    /// Embedded web surface.
    pub web: WebConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// `[app]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Build identifier, published as the `id` attribute.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// URL path of the thumbnail image.
    pub thumbnail: String,
    /// URL path of the main web page.
    pub main_page: String,
    /// URL of the home/info page.
    pub home_page: String,
    /// URL root the static files are served under.
    pub static_files_path: String,
    /// Directory, relative to the resources directory, holding static files.
    pub static_files_directory: String,
    /// Frames per second the host should render at.
    pub framerate: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id: "protogen-face".to_owned(),
            name: "Protogen Face".to_owned(),
            description: "A protogen face whose mouth follows the wearer's voice.".to_owned(),
            thumbnail: "/static/thumbnail.png".to_owned(),
            main_page: "/static/index.html".to_owned(),
            home_page: "/home".to_owned(),
            static_files_path: "/static".to_owned(),
            static_files_directory: "static".to_owned(),
            framerate: 30.0,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Face layout.
    pub style: RenderStyleConfig,
}

/// Face layout names accepted in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyleConfig {
    /// Single colour fill.
    Flat,
    /// Face without the indicator.
    Face,
    /// Face with the indicator line.
    #[default]
    FaceIndicator,
}

/// `[web]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// How the web surface is exposed.
    pub mode: WebModeConfig,
    /// Address the self-hosted server binds to.
    pub bind_address: String,
    /// Port the self-hosted server binds to; 0 picks an ephemeral port.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            mode: WebModeConfig::default(),
            bind_address: "0.0.0.0".to_owned(),
            port: 0,
        }
    }
}

/// Web surface modes accepted in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebModeConfig {
    /// The app runs its own server on a background thread.
    #[default]
    SelfHosted,
    /// The app hands its endpoints to the host's server.
    HostMounted,
    /// No web surface.
    Disabled,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter level or directive string (e.g. `"info"`, `"protogen_app=debug"`).
    pub level: String,
    /// Output format.
    pub format: LogFormatConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormatConfig::default(),
        }
    }
}

/// Log output formats accepted in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    /// Multi-line human-readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// Structured JSON.
    Json,
}
