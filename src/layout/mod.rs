//! Size type and content extent measurement.

use crate::widgets::{Dim, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: Dim,
    pub height: Dim,
}

impl Size {
    pub const fn new(width: Dim, height: Dim) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Far extent of a set of child rectangles, measured from the content origin.
///
/// Each rect contributes its right and bottom edge. Nothing is culled, so a
/// child lying entirely outside the viewport still extends the content. Edges
/// left of or above the origin never pull the extent below zero.
pub fn content_extent<I>(children: I) -> Size
where
    I: IntoIterator<Item = Rect>,
{
    children
        .into_iter()
        .fold(Size::zero(), |extent, rect| Size {
            width: extent.width.max(rect.right()),
            height: extent.height.max(rect.bottom()),
        })
}
