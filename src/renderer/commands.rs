//! Draw command definitions recorded by the paint context.

use crate::widgets::{Color, Rect};

/// A single draw operation in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle with a solid colour, already clipped.
    FillRect {
        rect: Rect,
        color: Color,
    },
}

impl DrawCommand {
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::FillRect { rect, .. } => *rect,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::FillRect { color, .. } => *color,
        }
    }
}
