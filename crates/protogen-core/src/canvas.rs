//! The drawing capability apps render into.
//!
//! The host owns the real canvas and its rasterizer; an app only sees the
//! [`Canvas`] trait for the duration of one render call.

use crate::types::{Color, Point, Resolution};

/// Whether a closed shape is filled or only outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Fill the interior with the colour.
    #[default]
    Fill,
    /// Draw only the outline.
    Outline,
}

/// A drawing surface addressed by pixel coordinates.
///
/// Implementations are provided by the host. Coordinates outside the surface
/// are clipped by the implementation, never rejected.
pub trait Canvas {
    /// The size of the surface.
    fn resolution(&self) -> Resolution;

    /// Fill the whole surface with a colour.
    fn fill(&mut self, color: Color);

    /// Draw a straight line between two points.
    fn line(&mut self, from: Point, to: Point, color: Color);

    /// Draw a closed polygon through the given vertices.
    fn polygon(&mut self, points: &[Point], color: Color, mode: DrawMode);

    /// Draw an axis-aligned ellipse.
    fn ellipse(
        &mut self,
        center: Point,
        radius_x: u32,
        radius_y: u32,
        color: Color,
        mode: DrawMode,
    );
}

/// One recorded canvas primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// [`Canvas::fill`].
    Fill {
        /// Fill colour.
        color: Color,
    },
    /// [`Canvas::line`].
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line colour.
        color: Color,
    },
    /// [`Canvas::polygon`].
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Shape colour.
        color: Color,
        /// Fill or outline.
        mode: DrawMode,
    },
    /// [`Canvas::ellipse`].
    Ellipse {
        /// Centre of the ellipse.
        center: Point,
        /// Horizontal radius.
        radius_x: u32,
        /// Vertical radius.
        radius_y: u32,
        /// Shape colour.
        color: Color,
        /// Fill or outline.
        mode: DrawMode,
    },
}

impl DrawCommand {
    /// The colour the command draws with.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Fill { color }
            | Self::Line { color, .. }
            | Self::Polygon { color, .. }
            | Self::Ellipse { color, .. } => *color,
        }
    }
}

/// A [`Canvas`] that records every command instead of rasterizing.
///
/// Used by tests to compare frames and by the reference host, which has no
/// LED hardware behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingCanvas {
    resolution: Resolution,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty recording canvas of the given size.
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far, in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Consume the canvas, returning the recorded commands.
    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Forget all recorded commands, keeping the size.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill { color });
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn polygon(&mut self, points: &[Point], color: Color, mode: DrawMode) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            mode,
        });
    }

    fn ellipse(
        &mut self,
        center: Point,
        radius_x: u32,
        radius_y: u32,
        color: Color,
        mode: DrawMode,
    ) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            color,
            mode,
        });
    }
}
