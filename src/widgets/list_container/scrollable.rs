//! Scroll limit calculation and drag-to-scroll for the list container.

use crate::layout::content_extent;
use crate::tree::{Tree, WidgetId};
use crate::widgets::scroll::ScrollLimits;

use super::ListContainer;

impl ListContainer {
    /// Derive the scroll limits from the children and clamp the offset into them.
    ///
    /// Children are re-queried on every call. The offset is only ever moved
    /// toward the valid range, so repeated calls without geometry changes are
    /// no-ops.
    pub(super) fn recompute_limits(&mut self, tree: &mut Tree, id: WidgetId) -> ScrollLimits {
        let extent = content_extent(tree.child_rects(id));
        let viewport = tree.inner_size(id);
        let limits = ScrollLimits::compute(extent, viewport);

        if limits != self.limits {
            log::debug!(
                "List container {:?}: content {}x{} in viewport {}x{}, limits {:?} -> {:?}",
                id,
                extent.width,
                extent.height,
                viewport.width,
                viewport.height,
                self.limits,
                limits
            );
            self.limits = limits;
        }

        let mut offset = tree.scroll(id);
        let before = offset;
        if offset.clamp_to(limits) {
            log::debug!(
                "List container {:?}: clamped scroll {:?} -> {:?}",
                id,
                before,
                offset
            );
            tree.set_scroll(id, offset);
        }

        limits
    }

    /// Apply one drag sample on the enabled axes, then re-run the limit pass.
    pub(super) fn apply_drag(&mut self, tree: &mut Tree, id: WidgetId, delta_x: i32, delta_y: i32) {
        let mut offset = tree.scroll(id);
        offset.apply_drag(self.mode, delta_x, delta_y);
        log::trace!(
            "List container {:?}: drag ({}, {}) in {:?} mode -> {:?}",
            id,
            delta_x,
            delta_y,
            self.mode,
            offset
        );
        tree.set_scroll(id, offset);

        self.recompute_limits(tree, id);
    }
}
