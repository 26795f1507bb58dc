//! The face app.

use std::path::{Path, PathBuf};

use axum::Router;
use protogen_app::{
    AppManifest, AppResult, AppState, ConfigStep, Endpoints, Lifecycle, ProtogenApp,
    SanityError, WebHost, WebHostStatus, WebMode, attribute_endpoints,
};
use protogen_config::Config;
use protogen_core::{AttributeStore, Canvas, Resolution, SharedProvider};
use protogen_render::{RenderEngine, RenderStyle};
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::bridge;
use crate::pages::page_endpoints;

/// A protogen face whose mouth follows a proportion sensor.
///
/// Serves its pages and attribute store either from its own background
/// server or through the host, depending on its [`WebMode`].
pub struct FaceApp {
    manifest: AppManifest,
    web_mode: WebMode,
    lifecycle: Lifecycle,
    attributes: AttributeStore,
    engine: RenderEngine,
    provider: Option<SharedProvider>,
    resources_dir: Option<PathBuf>,
    user_data_dir: Option<PathBuf>,
    resolution: Option<Resolution>,
    web_host: Option<WebHost>,
}

impl std::fmt::Debug for FaceApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceApp")
            .field("id", &self.manifest.id)
            .field("state", self.lifecycle.state())
            .field("web_mode", &self.web_mode)
            .field("style", &self.engine.style())
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl FaceApp {
    /// Create an app and publish its identity attributes.
    ///
    /// # Errors
    ///
    /// Returns [`protogen_app::AppError::InvalidManifest`] if the manifest is
    /// invalid or its static mount overlaps one of the app's pages.
    pub fn new(manifest: AppManifest, style: RenderStyle, web_mode: WebMode) -> AppResult<Self> {
        manifest.validate()?;
        let attributes = AttributeStore::new();
        manifest.check_static_mount(&app_endpoints(&attributes))?;
        manifest.publish(&attributes);
        info!(id = %manifest.id, style = %style, "Face app created");

        Ok(Self {
            manifest,
            web_mode,
            lifecycle: Lifecycle::new(),
            attributes,
            engine: RenderEngine::new(style),
            provider: None,
            resources_dir: None,
            user_data_dir: None,
            resolution: None,
            web_host: None,
        })
    }

    /// Create an app from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not convert to a valid
    /// manifest or web mode.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let (manifest, style, web_mode) = bridge::from_config(config)?;
        Self::new(manifest, style, web_mode)
    }

    /// The configured web mode.
    #[must_use]
    pub fn web_mode(&self) -> WebMode {
        self.web_mode
    }

    /// The last resolution the host set.
    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// The resources directory, once set.
    #[must_use]
    pub fn resources_directory(&self) -> Option<&Path> {
        self.resources_dir.as_deref()
    }

    /// The user data directory, once set.
    #[must_use]
    pub fn user_data_directory(&self) -> Option<&Path> {
        self.user_data_dir.as_deref()
    }

    fn endpoints(&self) -> Endpoints {
        app_endpoints(&self.attributes)
    }

    fn static_dir(&self) -> Option<PathBuf> {
        self.resources_dir
            .as_deref()
            .map(|resources| self.manifest.static_dir(resources))
    }

    fn self_hosted_router(&self) -> Router {
        let router = self.endpoints().into_router();
        match self.static_dir() {
            Some(dir) => router.nest_service(&self.manifest.static_files_path, ServeDir::new(dir)),
            None => router,
        }
    }

    fn start_web(&mut self) -> AppResult<()> {
        match self.web_mode {
            WebMode::SelfHosted(config) => {
                let host = WebHost::spawn(config, self.self_hosted_router())?;
                self.web_host = Some(host);
            },
            WebMode::HostMounted => {
                info!(
                    count = self.endpoints().len(),
                    "Endpoints available for the host to mount"
                );
            },
            WebMode::Disabled => debug!("Web surface disabled"),
        }
        Ok(())
    }
}

impl ProtogenApp for FaceApp {
    fn manifest(&self) -> &AppManifest {
        &self.manifest
    }

    fn state(&self) -> AppState {
        self.lifecycle.state().clone()
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn set_resources_directory(&mut self, path: &Path) -> AppResult<()> {
        self.lifecycle.record_step(ConfigStep::ResourcesDirectory)?;
        debug!(path = %path.display(), "Resources directory set");
        self.resources_dir = Some(path.to_path_buf());
        Ok(())
    }

    fn set_user_data_directory(&mut self, path: &Path) -> AppResult<()> {
        self.lifecycle.record_step(ConfigStep::UserDataDirectory)?;
        debug!(path = %path.display(), "User data directory set");
        self.user_data_dir = Some(path.to_path_buf());
        Ok(())
    }

    fn set_device_resolution(&mut self, resolution: Resolution) -> AppResult<()> {
        self.lifecycle.record_step(ConfigStep::DeviceResolution)?;
        debug!(resolution = %resolution, "Device resolution set");
        self.resolution = Some(resolution);
        Ok(())
    }

    fn sanity_check(&self) -> Result<(), SanityError> {
        if matches!(self.web_mode, WebMode::SelfHosted(_))
            && let Some(dir) = self.static_dir()
            && !dir.is_dir()
        {
            warn!(path = %dir.display(), "Static files directory missing");
        }
        self.lifecycle.sanity_check()
    }

    fn initialize(&mut self) -> AppResult<()> {
        self.lifecycle.begin_initialize()?;
        match self.start_web() {
            Ok(()) => {
                self.lifecycle.finish_initialize(Ok(()));
                Ok(())
            },
            Err(e) => {
                self.lifecycle.finish_initialize(Err(e.to_string()));
                Err(e)
            },
        }
    }

    fn set_active(&mut self, active: bool) {
        self.lifecycle.set_active(active);
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        self.engine.render(canvas, self.provider.as_deref());
    }

    fn web_status(&self) -> WebHostStatus {
        self.web_host
            .as_ref()
            .map_or(WebHostStatus::NotStarted, WebHost::status)
    }

    fn server_endpoints(&self) -> Endpoints {
        match self.web_mode {
            WebMode::HostMounted => self.endpoints(),
            WebMode::SelfHosted(_) | WebMode::Disabled => Endpoints::new(),
        }
    }

    fn set_proportion_provider(&mut self, provider: Option<SharedProvider>) {
        debug!(connected = provider.is_some(), "Proportion provider changed");
        self.provider = provider;
    }

    fn shutdown(&mut self) {
        if let Some(host) = self.web_host.as_mut() {
            host.stop();
        }
        if self.lifecycle.mark_destroyed() {
            info!(id = %self.manifest.id, "Face app destroyed");
        }
    }
}

impl Drop for FaceApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn app_endpoints(attributes: &AttributeStore) -> Endpoints {
    let mut endpoints = page_endpoints();
    endpoints.extend(attribute_endpoints(attributes));
    endpoints
}

/// Create a face app from configuration, ready for the host to configure.
///
/// # Errors
///
/// Returns an error if the configuration does not describe a valid app.
pub fn create_app(config: &Config) -> AppResult<Box<dyn ProtogenApp>> {
    Ok(Box::new(FaceApp::from_config(config)?))
}

/// Shut down and release an app created by [`create_app`].
pub fn destroy_app(mut app: Box<dyn ProtogenApp>) {
    app.shutdown();
}
