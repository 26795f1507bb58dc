//! Protogen Render - Turns a sensor reading into canvas drawing commands.
//!
//! The engine is pure: it performs no I/O, never blocks and has no error path.
//! Malformed readings (out of range or NaN) are clamped before use.
//!
//! # Example
//!
//! ```
//! use protogen_core::{Canvas, DrawCommand, FixedProportion, RecordingCanvas, Resolution};
//! use protogen_render::{RenderEngine, RenderStyle, palette};
//!
//! let engine = RenderEngine::new(RenderStyle::Face);
//! let mut canvas = RecordingCanvas::new(Resolution::new(128, 32));
//!
//! engine.render(&mut canvas, None);
//! assert_eq!(
//!     canvas.commands(),
//!     &[DrawCommand::Fill { color: palette::DISCONNECTED }]
//! );
//!
//! canvas.clear();
//! engine.render(&mut canvas, Some(&FixedProportion(0.5)));
//! assert!(canvas.commands().len() > 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod math;
pub mod palette;

mod engine;

pub use engine::{RenderEngine, RenderStyle};
