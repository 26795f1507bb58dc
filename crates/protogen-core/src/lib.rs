//! Protogen Core - Shared vocabulary between a protogen host and its apps.
//!
//! This crate provides:
//! - Geometry and colour values ([`Resolution`], [`Point`], [`Color`])
//! - The drawing capability an app renders into ([`Canvas`]) and a
//!   [`RecordingCanvas`] that captures the issued commands
//! - The sensor abstraction ([`ProportionProvider`]) with stock providers
//! - The permissioned metadata store ([`AttributeStore`])
//!
//! # Example
//!
//! ```
//! use protogen_core::{AccessLevel, AttributeError, AttributeStore};
//!
//! let store = AttributeStore::new();
//! store.admin_set("name", "Protogen Face", AccessLevel::Read);
//!
//! assert_eq!(store.get("name").unwrap(), "Protogen Face");
//! assert!(matches!(
//!     store.set("name", "renamed"),
//!     Err(AttributeError::PermissionDenied { .. })
//! ));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod attributes;
pub mod prelude;

mod canvas;
mod proportion;
mod types;

pub use attributes::{AccessLevel, Attribute, AttributeError, AttributeResult, AttributeStore};
pub use canvas::{Canvas, DrawCommand, DrawMode, RecordingCanvas};
pub use proportion::{FixedProportion, ProportionProvider, SharedProportion, SharedProvider};
pub use types::{Color, Point, Resolution};
