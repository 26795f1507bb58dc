//! Protogen App - The contract between a protogen host and its apps.
//!
//! This crate provides:
//! - The [`ProtogenApp`] trait a host drives
//! - The [`Lifecycle`] state machine enforcing host call ordering
//! - [`AppManifest`], an app's declared capabilities
//! - Framework-neutral [`Endpoints`] and the attribute routes
//! - [`WebHost`], a background `axum` server owned by its app
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use protogen_app::{Endpoint, EndpointResponse, Endpoints, HttpMethod, WebHost, WebHostConfig};
//!
//! # fn main() -> protogen_app::AppResult<()> {
//! let endpoints = Endpoints::new()
//!     .with(Endpoint::new(HttpMethod::Get, "/hello", |_| EndpointResponse::text("Hello!")));
//!
//! let mut host = WebHost::spawn(WebHostConfig::loopback(), endpoints.into_router())?;
//! let port = host.wait_until_bound(Duration::from_secs(5));
//! println!("serving on {port:?}");
//! host.stop();
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod endpoint;
pub mod lifecycle;
pub mod prelude;
pub mod routes;
pub mod web;

mod app;
mod error;
mod manifest;

pub use app::{ProtogenApp, WebMode};
pub use endpoint::{
    Endpoint, EndpointHandler, EndpointRequest, EndpointResponse, Endpoints, HttpMethod,
};
pub use error::{AppError, AppResult, SanityError};
pub use lifecycle::{AppState, ConfigStep, Lifecycle};
pub use manifest::{AppId, AppManifest};
pub use routes::attribute_endpoints;
pub use web::{WebHost, WebHostConfig, WebHostStatus};
