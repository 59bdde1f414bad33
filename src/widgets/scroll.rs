//! Scroll offsets, scroll limits and the axis policy of scrollable containers.

use crate::layout::Size;

use super::widget::Dim;

/// Axes along which dragging scrolls the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Drags never scroll
    None,
    /// Vertical scrolling only
    Vertical,
    /// Horizontal scrolling only
    Horizontal,
    /// Bidirectional scrolling (default)
    #[default]
    Both,
}

impl ScrollMode {
    /// Returns true if vertical scrolling is enabled
    pub fn allows_vertical(&self) -> bool {
        matches!(self, ScrollMode::Vertical | ScrollMode::Both)
    }

    /// Returns true if horizontal scrolling is enabled
    pub fn allows_horizontal(&self) -> bool {
        matches!(self, ScrollMode::Horizontal | ScrollMode::Both)
    }
}

/// Content coordinate aligned with the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollOffset {
    pub x: Dim,
    pub y: Dim,
}

impl ScrollOffset {
    pub const fn new(x: Dim, y: Dim) -> Self {
        Self { x, y }
    }

    /// Move by a drag delta on the axes `mode` enables.
    ///
    /// Only the lower bound is enforced here; the upper bound belongs to the
    /// limit pass that follows.
    pub fn apply_drag(&mut self, mode: ScrollMode, delta_x: Dim, delta_y: Dim) {
        if mode.allows_vertical() {
            self.y = self.y.saturating_add(delta_y).max(0);
        }
        if mode.allows_horizontal() {
            self.x = self.x.saturating_add(delta_x).max(0);
        }
    }

    /// Clamp into `[0, limit]` on both axes. Returns true if anything moved.
    pub fn clamp_to(&mut self, limits: ScrollLimits) -> bool {
        let clamped = ScrollOffset {
            x: self.x.clamp(0, limits.max_x),
            y: self.y.clamp(0, limits.max_y),
        };
        let changed = clamped != *self;
        *self = clamped;
        changed
    }
}

/// Largest valid scroll offset per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollLimits {
    pub max_x: Dim,
    pub max_y: Dim,
}

impl ScrollLimits {
    pub const fn new(max_x: Dim, max_y: Dim) -> Self {
        Self { max_x, max_y }
    }

    /// Limits for content of size `extent` seen through a viewport of size `viewport`.
    ///
    /// An axis where the content fits gets a limit of exactly zero.
    pub fn compute(extent: Size, viewport: Size) -> Self {
        Self {
            max_x: (extent.width - viewport.width).max(0),
            max_y: (extent.height - viewport.height).max(0),
        }
    }

    /// Check if content overflows vertically
    pub fn can_scroll_vertical(&self) -> bool {
        self.max_y > 0
    }

    /// Check if content overflows horizontally
    pub fn can_scroll_horizontal(&self) -> bool {
        self.max_x > 0
    }
}
