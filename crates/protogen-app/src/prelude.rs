//! Prelude module - commonly used types for convenient import.
//!
//! Use `use protogen_app::prelude::*;` to import all essential types.

// Errors
pub use crate::{AppError, AppResult, SanityError};

// Contract
pub use crate::{AppId, AppManifest, AppState, ProtogenApp, WebMode};

// Web surface
pub use crate::{Endpoint, EndpointRequest, EndpointResponse, Endpoints, HttpMethod};
pub use crate::{WebHost, WebHostConfig, WebHostStatus};
