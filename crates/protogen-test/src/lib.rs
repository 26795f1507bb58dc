//! Protogen Test - Shared test utilities for the protogen crates.
//!
//! This crate provides mock implementations and fixtures that can be used
//! across multiple protogen crates as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! protogen-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use protogen_test::{MockProportion, test_resolution};
//!
//! let sensor = MockProportion::new([0.0, 0.5, 1.0]);
//! let mut canvas = RecordingCanvas::new(test_resolution());
//! engine.render(&mut canvas, Some(&sensor));
//! assert_eq!(sensor.call_count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
