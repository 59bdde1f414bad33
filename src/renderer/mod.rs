pub mod commands;

pub use commands::DrawCommand;

use crate::widgets::{Color, Rect};

/// Drawing surface handed to widgets during a paint pass.
///
/// All rectangles are in absolute screen coordinates.
pub trait DrawTarget {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Restrict subsequent drawing to `rect`, intersected with the current clip.
    fn push_clip(&mut self, rect: Rect) {
        let _ = rect;
    }

    fn pop_clip(&mut self) {}
}

/// Records draw commands for a frame.
///
/// Fills are intersected with the clip stack as they arrive, so the recorded
/// list is what would actually reach the display.
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
    /// Clip stack for clipping children to container bounds
    clip_stack: Vec<Rect>,
    /// Fills dropped because they were fully clipped
    culled: usize,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            clip_stack: Vec::with_capacity(4),
            culled: 0,
        }
    }

    /// Clear all buffers for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.culled = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn culled(&self) -> usize {
        self.culled
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }
}

impl DrawTarget for PaintContext {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let visible = match self.current_clip() {
            Some(clip) => rect.intersection(&clip),
            None if rect.width > 0 && rect.height > 0 => Some(rect),
            None => None,
        };
        match visible {
            Some(rect) => self.commands.push(DrawCommand::FillRect { rect, color }),
            None => self.culled += 1,
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = match self.current_clip() {
            // Disjoint clips collapse to an empty rect so everything inside is culled
            Some(current) => rect
                .intersection(&current)
                .unwrap_or(Rect::new(rect.x, rect.y, 0, 0)),
            None => rect,
        };
        self.clip_stack.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}
