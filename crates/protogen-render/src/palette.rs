//! Fixed colours used by the face styles.

use protogen_core::Color;

/// Whole-canvas fill when no sensor is connected.
pub const DISCONNECTED: Color = Color::rgb(127, 0, 0);

/// Background behind the face.
pub const BACKGROUND: Color = Color::rgb(4, 4, 12);

/// Eye fill.
pub const EYE: Color = Color::rgb(0, 200, 255);

/// Cheek outline.
pub const CHEEK: Color = Color::rgb(255, 80, 160);

/// Proportion indicator line.
pub const INDICATOR: Color = Color::rgb(255, 255, 255);

/// Mouth colour for a given channel value.
#[must_use]
pub const fn mouth(channel: u8) -> Color {
    Color::rgb(0, channel, 0)
}
