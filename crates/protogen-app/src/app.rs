//! The contract between a host and a loaded app.

use std::path::Path;

use protogen_core::{AttributeStore, Canvas, Resolution, SharedProvider};

use crate::endpoint::Endpoints;
use crate::error::{AppResult, SanityError};
use crate::lifecycle::AppState;
use crate::manifest::AppManifest;
use crate::web::{WebHostConfig, WebHostStatus};

/// How an app exposes its web surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebMode {
    /// The app runs its own server on a background thread.
    SelfHosted(WebHostConfig),
    /// The app hands its endpoints to the host through
    /// [`ProtogenApp::server_endpoints`] and runs no server itself.
    HostMounted,
    /// No web surface.
    Disabled,
}

impl Default for WebMode {
    fn default() -> Self {
        Self::SelfHosted(WebHostConfig::default())
    }
}

/// A visual app a protogen host can load.
///
/// The host owns the app exclusively and drives it in this order:
///
/// 1. [`set_resources_directory`](Self::set_resources_directory),
///    [`set_user_data_directory`](Self::set_user_data_directory),
///    [`set_device_resolution`](Self::set_device_resolution)
/// 2. [`sanity_check`](Self::sanity_check)
/// 3. [`initialize`](Self::initialize)
/// 4. [`render`](Self::render) at [`framerate`](Self::framerate), with
///    [`set_active`](Self::set_active) signals in between
/// 5. [`shutdown`](Self::shutdown), or dropping the app
pub trait ProtogenApp: Send {
    /// The app's declared capabilities.
    fn manifest(&self) -> &AppManifest;

    /// Current lifecycle state.
    fn state(&self) -> AppState;

    /// The app's metadata store.
    fn attributes(&self) -> &AttributeStore;

    /// Where read-only assets live. First configuration call.
    ///
    /// # Errors
    ///
    /// Returns an error if called out of order or after shutdown.
    fn set_resources_directory(&mut self, path: &Path) -> AppResult<()>;

    /// Where the app may persist user data. Second configuration call.
    ///
    /// # Errors
    ///
    /// Returns an error if called out of order or after shutdown.
    fn set_user_data_directory(&mut self, path: &Path) -> AppResult<()>;

    /// The display size. Third configuration call; may be repeated later when
    /// the host's display changes.
    ///
    /// # Errors
    ///
    /// Returns an error if called out of order or after shutdown.
    fn set_device_resolution(&mut self, resolution: Resolution) -> AppResult<()>;

    /// Report whether the app is fit to initialize.
    ///
    /// # Errors
    ///
    /// Returns every problem found.
    fn sanity_check(&self) -> Result<(), SanityError>;

    /// Start the app, including its web surface.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is incomplete, initialization was
    /// already attempted, or the app was shut down.
    fn initialize(&mut self) -> AppResult<()>;

    /// Foreground/background signal. Never blocks rendering.
    fn set_active(&mut self, active: bool);

    /// Draw one frame. Allowed in any state; never blocks.
    fn render(&self, canvas: &mut dyn Canvas);

    /// Frames per second the host should call [`render`](Self::render) at.
    fn framerate(&self) -> f32 {
        self.manifest().framerate
    }

    /// Resolutions the app can draw for a given device.
    fn supported_resolutions(&self, device: Resolution) -> Vec<Resolution> {
        vec![device]
    }

    /// Detailed state of the self-hosted web server.
    fn web_status(&self) -> WebHostStatus;

    /// Port of the self-hosted web server; `None` until bound.
    fn web_port(&self) -> Option<u16> {
        self.web_status().port()
    }

    /// Endpoints for the host to mount. Empty unless the app runs in
    /// [`WebMode::HostMounted`].
    fn server_endpoints(&self) -> Endpoints {
        Endpoints::new()
    }

    /// Attach or detach the sensor driving the render.
    fn set_proportion_provider(&mut self, provider: Option<SharedProvider>);

    /// Stop background work and release resources. Idempotent.
    fn shutdown(&mut self);
}
