//! Conversion from configuration types to domain types.

use std::net::IpAddr;

use protogen_app::{AppError, AppId, AppManifest, AppResult, WebHostConfig, WebMode};
use protogen_config::{AppConfig, Config, RenderStyleConfig, WebConfig, WebModeConfig};
use protogen_render::RenderStyle;

/// Build the manifest from the `[app]` section.
///
/// # Errors
///
/// Returns [`AppError::InvalidManifest`] if the id or declared values are
/// invalid.
pub fn manifest_from_config(app: &AppConfig) -> AppResult<AppManifest> {
    let manifest = AppManifest {
        id: AppId::new(app.id.clone())?,
        name: app.name.clone(),
        description: app.description.clone(),
        thumbnail: app.thumbnail.clone(),
        main_page: app.main_page.clone(),
        home_page: app.home_page.clone(),
        static_files_path: app.static_files_path.clone(),
        static_files_directory: app.static_files_directory.clone(),
        framerate: app.framerate,
    };
    manifest.validate()?;
    Ok(manifest)
}

/// Map the configured face layout.
#[must_use]
pub fn render_style(style: RenderStyleConfig) -> RenderStyle {
    match style {
        RenderStyleConfig::Flat => RenderStyle::Flat,
        RenderStyleConfig::Face => RenderStyle::Face,
        RenderStyleConfig::FaceIndicator => RenderStyle::FaceWithIndicator,
    }
}

/// Map the `[web]` section.
///
/// # Errors
///
/// Returns [`AppError::WebHost`] if the bind address does not parse.
pub fn web_mode(web: &WebConfig) -> AppResult<WebMode> {
    Ok(match web.mode {
        WebModeConfig::SelfHosted => {
            let bind_address: IpAddr = web.bind_address.parse().map_err(|e| {
                AppError::WebHost(format!("invalid bind address '{}': {e}", web.bind_address))
            })?;
            WebMode::SelfHosted(WebHostConfig {
                bind_address,
                port: web.port,
            })
        },
        WebModeConfig::HostMounted => WebMode::HostMounted,
        WebModeConfig::Disabled => WebMode::Disabled,
    })
}

/// Everything the face app needs from a [`Config`].
///
/// # Errors
///
/// Returns the first conversion error.
pub fn from_config(config: &Config) -> AppResult<(AppManifest, RenderStyle, WebMode)> {
    Ok((
        manifest_from_config(&config.app)?,
        render_style(config.render.style),
        web_mode(&config.web)?,
    ))
}
