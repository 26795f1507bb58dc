//! Prelude module - commonly used types for convenient import.
//!
//! Use `use protogen_core::prelude::*;` to import all essential types.

// Values
pub use crate::{Color, Point, Resolution};

// Drawing
pub use crate::{Canvas, DrawCommand, DrawMode, RecordingCanvas};

// Sensors
pub use crate::{FixedProportion, ProportionProvider, SharedProportion, SharedProvider};

// Metadata
pub use crate::{AccessLevel, Attribute, AttributeError, AttributeResult, AttributeStore};
