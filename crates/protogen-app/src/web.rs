//! Background web server owned by an app.
//!
//! [`WebHost::spawn`] starts one named OS thread running a current-thread
//! Tokio runtime that serves an `axum` router. The handle owns the thread and
//! its [`CancellationToken`]; [`WebHost::stop`] (also run on drop) cancels the
//! serve loop and joins the thread, so the worker never outlives its owner.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};

/// Name of the worker thread.
pub const WORKER_THREAD_NAME: &str = "protogen-web";

/// Where the worker listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebHostConfig {
    /// Address to bind.
    pub bind_address: IpAddr,
    /// Port to bind; 0 picks an ephemeral port.
    pub port: u16,
}

impl Default for WebHostConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 0,
        }
    }
}

impl WebHostConfig {
    /// Loopback on an ephemeral port.
    #[must_use]
    pub fn loopback() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        }
    }

    fn socket_addr(self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Observable state of the worker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WebHostStatus {
    /// No worker has been started.
    #[default]
    NotStarted,
    /// The worker is starting and has not bound yet.
    Binding,
    /// Serving on the given port.
    Listening {
        /// The bound port.
        port: u16,
    },
    /// Startup failed; no port will ever be bound.
    Failed(String),
    /// The worker was stopped.
    Stopped,
}

impl WebHostStatus {
    /// The bound port, if the worker is serving.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self {
            Self::Listening { port } => Some(*port),
            _ => None,
        }
    }

    fn is_pending(&self) -> bool {
        matches!(self, Self::NotStarted | Self::Binding)
    }
}

impl fmt::Display for WebHostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Binding => write!(f, "binding"),
            Self::Listening { port } => write!(f, "listening on port {port}"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Status shared between the worker thread and the handle.
#[derive(Debug, Default)]
struct StatusCell {
    status: Mutex<WebHostStatus>,
    changed: Condvar,
}

impl StatusCell {
    fn get(&self) -> WebHostStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, status: WebHostStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
        self.changed.notify_all();
    }

    /// Replace the status only if `keep` rejects the current one.
    fn set_unless(&self, status: WebHostStatus, keep: impl Fn(&WebHostStatus) -> bool) {
        let mut guard = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if !keep(&guard) {
            *guard = status;
            self.changed.notify_all();
        }
    }

    fn wait_settled(&self, timeout: Duration) -> WebHostStatus {
        let guard = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .changed
            .wait_timeout_while(guard, timeout, |s| s.is_pending())
            .unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }
}

/// Handle to the background web server.
pub struct WebHost {
    status: Arc<StatusCell>,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl fmt::Debug for WebHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebHost")
            .field("status", &self.status())
            .field("running", &self.handle.is_some())
            .finish()
    }
}

impl WebHost {
    /// Start serving `router` on a background thread.
    ///
    /// Returns as soon as the thread is running; binding happens on the
    /// worker. A bind failure is reported through [`WebHost::status`], not
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::WebHost`] if the thread cannot be spawned.
    pub fn spawn(config: WebHostConfig, router: Router) -> AppResult<Self> {
        let status = Arc::new(StatusCell::default());
        status.set(WebHostStatus::Binding);
        let token = CancellationToken::new();

        let worker_status = Arc::clone(&status);
        let worker_token = token.clone();
        let router = router.layer(TraceLayer::new_for_http());

        let handle = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || run_worker(config, router, &worker_status, &worker_token))
            .map_err(|e| AppError::WebHost(format!("failed to spawn web worker: {e}")))?;

        debug!(addr = %config.socket_addr(), "Web worker spawned");
        Ok(Self {
            status,
            token,
            handle: Some(handle),
        })
    }

    /// Current status. Never blocks on the worker.
    #[must_use]
    pub fn status(&self) -> WebHostStatus {
        self.status.get()
    }

    /// The bound port, or `None` if not (yet) serving.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.status().port()
    }

    /// Block until the worker has bound or failed, or `timeout` elapses.
    #[must_use]
    pub fn wait_until_bound(&self, timeout: Duration) -> Option<u16> {
        self.status.wait_settled(timeout).port()
    }

    /// Stop serving and join the worker. Idempotent.
    pub fn stop(&mut self) {
        self.token.cancel();
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            error!("Web worker panicked");
            self.status.set(WebHostStatus::Failed("web worker panicked".to_owned()));
            return;
        }
        self.status
            .set_unless(WebHostStatus::Stopped, |s| matches!(s, WebHostStatus::Failed(_)));
        info!("Web worker stopped");
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(config: WebHostConfig, router: Router, status: &StatusCell, token: &CancellationToken) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to build web worker runtime");
            status.set(WebHostStatus::Failed(format!("runtime: {e}")));
            return;
        },
    };

    runtime.block_on(async {
        let addr = config.socket_addr();
        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(addr = %addr, error = %e, "Failed to bind web server");
                status.set(WebHostStatus::Failed(format!("bind {addr}: {e}")));
                return;
            },
        };
        let port = match listener.local_addr() {
            Ok(local) => local.port(),
            Err(e) => {
                error!(error = %e, "Failed to read bound address");
                status.set(WebHostStatus::Failed(format!("local address: {e}")));
                return;
            },
        };

        info!(addr = %addr, port, "Web server listening");
        status.set(WebHostStatus::Listening { port });

        let shutdown = token.clone();
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
        {
            warn!(error = %e, "Web server exited with error");
        }
    });

    status.set_unless(WebHostStatus::Stopped, |s| matches!(s, WebHostStatus::Failed(_)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_port() {
        assert_eq!(WebHostStatus::Listening { port: 8080 }.port(), Some(8080));
        assert_eq!(WebHostStatus::Binding.port(), None);
        assert_eq!(WebHostStatus::Failed("x".into()).port(), None);
    }

    #[test]
    fn test_default_config_binds_everywhere() {
        let config = WebHostConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:0");
    }

    #[test]
    fn test_wait_settled_times_out_while_pending() {
        let cell = StatusCell::default();
        cell.set(WebHostStatus::Binding);
        assert_eq!(cell.wait_settled(Duration::from_millis(20)), WebHostStatus::Binding);
    }

    #[test]
    fn test_set_unless_keeps_failure() {
        let cell = StatusCell::default();
        cell.set(WebHostStatus::Failed("bind".into()));
        cell.set_unless(WebHostStatus::Stopped, |s| matches!(s, WebHostStatus::Failed(_)));
        assert_eq!(cell.get(), WebHostStatus::Failed("bind".into()));
    }
}
