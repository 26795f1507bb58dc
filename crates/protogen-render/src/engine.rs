//! The render engine.

use std::fmt;

use protogen_core::{Canvas, DrawMode, Point, ProportionProvider, Resolution};
use serde::{Deserialize, Serialize};

use crate::math::{clamp_proportion, indicator_angle, lerp, mouth_channel};
use crate::palette;

/// Which face layout to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// A single fill whose green channel follows the reading.
    Flat,
    /// Eyes, cheeks and a mouth that opens with the reading.
    Face,
    /// [`RenderStyle::Face`] plus a rotating indicator line.
    #[default]
    #[serde(rename = "face_indicator")]
    FaceWithIndicator,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Face => write!(f, "face"),
            Self::FaceWithIndicator => write!(f, "face_indicator"),
        }
    }
}

/// Maps a proportion reading to canvas drawing commands.
///
/// Stateless apart from its style: identical readings and canvas sizes always
/// produce identical command sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderEngine {
    style: RenderStyle,
}

impl RenderEngine {
    /// Create an engine drawing the given style.
    #[must_use]
    pub const fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// The style this engine draws.
    #[must_use]
    pub const fn style(&self) -> RenderStyle {
        self.style
    }

    /// Draw one frame.
    ///
    /// Without a provider the whole canvas is filled with
    /// [`palette::DISCONNECTED`]. With one, the reading is pulled exactly once.
    pub fn render(&self, canvas: &mut dyn Canvas, provider: Option<&dyn ProportionProvider>) {
        let Some(provider) = provider else {
            canvas.fill(palette::DISCONNECTED);
            return;
        };

        let p = clamp_proportion(provider.proportion());
        match self.style {
            RenderStyle::Flat => canvas.fill(palette::mouth(mouth_channel(p))),
            RenderStyle::Face => draw_face(canvas, p),
            RenderStyle::FaceWithIndicator => {
                draw_face(canvas, p);
                draw_indicator(canvas, p);
            },
        }
    }
}

/// Canvas dimensions as floats, for relative geometry.
#[derive(Debug, Clone, Copy)]
struct Frame {
    w: f64,
    h: f64,
}

impl Frame {
    fn of(resolution: Resolution) -> Self {
        Self {
            w: f64::from(resolution.width),
            h: f64::from(resolution.height),
        }
    }

    fn point(self, fx: f64, fy: f64) -> Point {
        Point::new(px(self.w * fx), px(self.h * fy))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn px(v: f64) -> i32 {
    // Float-to-int `as` saturates and maps NaN to zero.
    v.floor() as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn radius(v: f64) -> u32 {
    v.floor().max(0.0) as u32
}

fn draw_face(canvas: &mut dyn Canvas, p: f64) {
    let frame = Frame::of(canvas.resolution());
    canvas.fill(palette::BACKGROUND);

    let eye_rx = radius(frame.w * 0.08);
    let eye_ry = radius(frame.h * 0.12);
    for fx in [0.25, 0.75] {
        canvas.ellipse(frame.point(fx, 0.3), eye_rx, eye_ry, palette::EYE, DrawMode::Fill);
    }

    let cheek_rx = radius(frame.w * 0.04);
    let cheek_ry = radius(frame.h * 0.06);
    for fx in [0.12, 0.88] {
        canvas.ellipse(
            frame.point(fx, 0.55),
            cheek_rx,
            cheek_ry,
            palette::CHEEK,
            DrawMode::Outline,
        );
    }

    // Half the mouth opening, as a fraction of the height.
    let half = lerp(0.01, 0.125, p);
    let cy = 0.75;
    let mouth = [
        frame.point(0.3, cy),
        frame.point(0.4, cy - half),
        frame.point(0.6, cy - half),
        frame.point(0.7, cy),
        frame.point(0.6, cy + half),
        frame.point(0.4, cy + half),
    ];
    canvas.polygon(&mouth, palette::mouth(mouth_channel(p)), DrawMode::Fill);
}

fn draw_indicator(canvas: &mut dyn Canvas, p: f64) {
    let frame = Frame::of(canvas.resolution());
    let (cx, cy) = (frame.w * 0.5, frame.h * 0.3);
    let r = frame.w.min(frame.h) * 0.2;
    let angle = indicator_angle(p);

    // Zero points straight up, growing clockwise.
    let pivot = Point::new(px(cx), px(cy));
    let tip = Point::new(px(cx + r * angle.sin()), px(cy - r * angle.cos()));
    canvas.line(pivot, tip, palette::INDICATOR);
}
