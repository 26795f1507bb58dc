//! Test fixtures for common types.

use std::path::Path;
use std::time::{Duration, Instant};

use protogen_config::{Config, WebModeConfig};
use protogen_core::Resolution;
use tempfile::TempDir;

/// Contents of `static/index.html` in [`resource_dir`].
pub const TEST_INDEX_HTML: &str = "<!doctype html><title>Protogen Face</title><h1>Protogen Face</h1>";

/// Contents of `static/thumbnail.png` in [`resource_dir`]: a PNG signature
/// followed by filler bytes.
pub const TEST_THUMBNAIL: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

/// A typical visor panel size.
#[must_use]
pub fn test_resolution() -> Resolution {
    Resolution::new(128, 32)
}

/// Create a resources directory holding `static/index.html` and
/// `static/thumbnail.png`.
///
/// # Panics
///
/// Panics if the temporary directory cannot be populated.
#[must_use]
pub fn resource_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp resources dir");
    write_static_files(dir.path());
    dir
}

fn write_static_files(root: &Path) {
    let static_dir = root.join("static");
    std::fs::create_dir_all(&static_dir).expect("create static dir");
    std::fs::write(static_dir.join("index.html"), TEST_INDEX_HTML).expect("write index.html");
    std::fs::write(static_dir.join("thumbnail.png"), TEST_THUMBNAIL).expect("write thumbnail");
}

/// Default configuration with the given web mode, bound to loopback on an
/// ephemeral port.
#[must_use]
pub fn test_config(mode: WebModeConfig) -> Config {
    let mut config = Config::default();
    config.web.mode = mode;
    config.web.bind_address = "127.0.0.1".to_owned();
    config.web.port = 0;
    config
}

/// Poll `port` until it yields a value or `timeout` elapses.
pub fn wait_for_port(mut port: impl FnMut() -> Option<u16>, timeout: Duration) -> Option<u16> {
    let deadline = Instant::now().checked_add(timeout)?;
    loop {
        if let Some(p) = port() {
            return Some(p);
        }
        if Instant::now() >= deadline {
            return None;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
