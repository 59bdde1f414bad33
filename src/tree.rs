//! Arena-based widget storage.
//!
//! The Tree owns every widget together with the framework-level state the
//! widgets share: geometry relative to the parent's content origin, padding,
//! scroll offset, colour table, flags and the dirty mark used for redraws.
//!
//! ## Key Features
//!
//! - **Generational Indices**: WidgetId contains index + generation so a stale
//!   handle to a removed widget is detected instead of aliasing a new one.
//!
//! - **Dense Storage**: Nodes stored contiguously, swap-removed on unregister.
//!
//! - **Ordered Children**: Each node keeps its children in creation order.
//!   Later children are drawn on top and win hit tests.
//!
//! - **Typed Access**: Widgets are stored as `Box<dyn Widget>` with a kind tag;
//!   `with_typed_mut` checks the tag before handing out the concrete type.

use std::collections::HashSet;

use crate::error::WidgetError;
use crate::layout::Size;
use crate::widgets::scroll::ScrollOffset;
use crate::widgets::{Color, Dim, Padding, Rect, Widget, WidgetFlags, WidgetKind};

/// Unique identifier for a widget in the tree.
///
/// Uses a generational index design:
/// - `index`: Position in the sparse array (reusable after removal)
/// - `generation`: Version counter that increments when a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId {
    index: u32,
    generation: u32,
}

impl WidgetId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Concrete widget types that can be looked up through the tree.
pub trait TypedWidget: Widget + Sized {
    const KIND: WidgetKind;
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

struct Node {
    /// The widget; `None` while it is extracted for dispatch
    widget: Option<Box<dyn Widget>>,
    kind: WidgetKind,
    parent: Option<WidgetId>,
    /// Child widget IDs in creation order
    children: Vec<WidgetId>,
    /// Position and size relative to the parent's content origin
    rect: Rect,
    padding: Padding,
    /// Content offset applied to this widget's children
    scroll: ScrollOffset,
    colors: Vec<Color>,
    flags: WidgetFlags,
    is_dirty: bool,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

#[derive(Default)]
pub struct Tree {
    dense: Vec<Node>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
    /// Top-level widgets in creation order
    roots: Vec<WidgetId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget under `parent` (or as a top-level widget) at `rect`.
    ///
    /// The widget's default flags, colours and padding are applied and the new
    /// widget is marked dirty.
    pub fn register(
        &mut self,
        widget: Box<dyn Widget>,
        parent: Option<WidgetId>,
        rect: Rect,
    ) -> Result<WidgetId, WidgetError> {
        if let Some(parent_id) = parent {
            let parent_dense = self
                .get_dense_index(parent_id)
                .ok_or(WidgetError::StaleHandle(parent_id))?;
            let parent_node = &self.dense[parent_dense];
            if !parent_node.flags.contains(WidgetFlags::ALLOW_CHILDREN) {
                log::warn!(
                    "Rejecting {} child of {:?}: {} does not allow children",
                    widget.kind(),
                    parent_id,
                    parent_node.kind
                );
                return Err(WidgetError::ChildrenNotAllowed(parent_node.kind));
            }
        }

        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            let old_gen = self.sparse_generation(idx);
            (idx, old_gen.wrapping_add(1))
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            (idx, 0)
        };
        let id = WidgetId::new(sparse_index, generation);

        self.dense.push(Node {
            kind: widget.kind(),
            flags: widget.flags(),
            colors: widget.default_colors().to_vec(),
            padding: widget.default_padding(),
            widget: Some(widget),
            parent,
            children: Vec::new(),
            rect,
            scroll: ScrollOffset::default(),
            is_dirty: false,
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index: self.dense.len() - 1,
            generation,
        });

        match parent.and_then(|p| self.get_dense_index(p)) {
            Some(parent_dense) => self.dense[parent_dense].children.push(id),
            None => self.roots.push(id),
        }

        self.invalidate(id);
        Ok(id)
    }

    /// Remove a widget and all of its descendants.
    pub fn unregister(&mut self, id: WidgetId) {
        if !self.contains(id) {
            return;
        }

        for child in self.children(id).to_vec() {
            self.unregister(child);
        }

        // The parent's content changed, so it needs a redraw
        match self.parent(id) {
            Some(parent_id) => {
                self.invalidate(parent_id);
                if let Some(parent) = self.node_mut(parent_id) {
                    parent.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        // Look the slot up again: removing children may have moved it
        let dense_index = match self.get_dense_index(id) {
            Some(idx) => idx,
            None => return,
        };
        let last_dense_index = self.dense.len() - 1;
        self.dense.swap_remove(dense_index);

        // Fix up the moved node's sparse entry (if we didn't remove the last element)
        if dense_index != last_dense_index {
            let moved_sparse_idx = self.dense[dense_index].sparse_index;
            if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                entry.dense_index = dense_index;
            }
        }

        // Keep the generation in the free slot so the next allocation bumps it
        self.sparse[id.index as usize] = Some(SparseEntry {
            dense_index: usize::MAX,
            generation: id.generation,
        });
        self.free_indices.push(id.index);
    }

    fn sparse_generation(&self, index: u32) -> u32 {
        self.sparse[index as usize]
            .as_ref()
            .map(|e| e.generation)
            .unwrap_or(0)
    }

    /// Get the dense array index for a WidgetId, validating generation.
    fn get_dense_index(&self, id: WidgetId) -> Option<usize> {
        self.sparse
            .get(id.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == id.generation && e.dense_index != usize::MAX)
            .map(|e| e.dense_index)
    }

    fn node(&self, id: WidgetId) -> Option<&Node> {
        let idx = self.get_dense_index(id)?;
        Some(&self.dense[idx])
    }

    fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        let idx = self.get_dense_index(id)?;
        Some(&mut self.dense[idx])
    }

    /// Check if a widget is registered.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get_dense_index(id).is_some()
    }

    /// Get the number of registered widgets.
    pub fn widget_count(&self) -> usize {
        self.dense.len()
    }

    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Access a widget via a closure.
    pub fn with_widget<R>(&self, id: WidgetId, f: impl FnOnce(&dyn Widget) -> R) -> Option<R> {
        self.node(id)
            .and_then(|n| n.widget.as_deref())
            .map(f)
    }

    /// Mutate a widget via a closure.
    ///
    /// The widget is temporarily extracted from the tree during the closure
    /// execution, so the closure gets both the widget and the rest of the tree.
    pub fn with_widget_mut<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut Tree) -> R,
    ) -> Result<R, WidgetError> {
        let node = self.node_mut(id).ok_or(WidgetError::StaleHandle(id))?;
        let mut widget = node.widget.take().ok_or(WidgetError::Busy(id))?;

        let result = f(&mut *widget, self);

        // The closure may have removed the widget itself
        if let Some(node) = self.node_mut(id) {
            node.widget = Some(widget);
        }
        Ok(result)
    }

    /// Like `with_widget_mut`, but checks the widget is a `W` first.
    pub fn with_typed_mut<W: TypedWidget, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut W, &mut Tree) -> R,
    ) -> Result<R, WidgetError> {
        let found = self.kind(id).ok_or(WidgetError::StaleHandle(id))?;
        if found != W::KIND {
            return Err(WidgetError::WrongKind {
                id,
                expected: W::KIND,
                found,
            });
        }
        self.with_widget_mut(id, |widget, tree| {
            widget
                .as_any_mut()
                .downcast_mut::<W>()
                .map(|typed| f(typed, tree))
        })?
        .ok_or(WidgetError::WrongKind {
            id,
            expected: W::KIND,
            found,
        })
    }

    /// Read a `W` through the tree after checking its kind.
    pub fn with_typed<W: TypedWidget, R>(
        &self,
        id: WidgetId,
        f: impl FnOnce(&W) -> R,
    ) -> Result<R, WidgetError> {
        let found = self.kind(id).ok_or(WidgetError::StaleHandle(id))?;
        let wrong_kind = WidgetError::WrongKind {
            id,
            expected: W::KIND,
            found,
        };
        if found != W::KIND {
            return Err(wrong_kind);
        }
        self.with_widget(id, |widget| widget.as_any().downcast_ref::<W>().map(f))
            .ok_or(WidgetError::Busy(id))?
            .ok_or(wrong_kind)
    }

    /// Get the parent of a widget.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a widget in creation order.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Top-level widgets in creation order.
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Rects of a widget's children, relative to its content origin.
    pub fn child_rects(&self, id: WidgetId) -> impl Iterator<Item = Rect> + '_ {
        self.children(id)
            .iter()
            .filter_map(move |&child| self.rect(child))
    }

    /// Position and size relative to the parent's content origin.
    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.node(id).map(|n| n.rect)
    }

    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        let changed = match self.node_mut(id) {
            Some(node) if node.rect != rect => {
                node.rect = rect;
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate(id);
            // The old area must be repainted by whoever is behind it
            if let Some(parent) = self.parent(id) {
                self.invalidate(parent);
            }
        }
    }

    pub fn set_position(&mut self, id: WidgetId, x: Dim, y: Dim) {
        if let Some(rect) = self.rect(id) {
            self.set_rect(id, Rect { x, y, ..rect });
        }
    }

    pub fn set_size(&mut self, id: WidgetId, width: Dim, height: Dim) {
        if let Some(rect) = self.rect(id) {
            self.set_rect(
                id,
                Rect {
                    width,
                    height,
                    ..rect
                },
            );
        }
    }

    pub fn padding(&self, id: WidgetId) -> Padding {
        self.node(id).map(|n| n.padding).unwrap_or_default()
    }

    pub fn set_padding(&mut self, id: WidgetId, padding: impl Into<Padding>) {
        let padding = padding.into();
        if let Some(node) = self.node_mut(id) {
            node.padding = padding;
        }
        self.invalidate(id);
    }

    /// Content-area size: widget size minus padding, never negative.
    pub fn inner_size(&self, id: WidgetId) -> Size {
        self.node(id)
            .map(|n| Rect::from_size(n.rect.size()).inset(n.padding).size())
            .unwrap_or_default()
    }

    /// Screen rectangle of a widget.
    ///
    /// Each ancestor contributes its own position and padding, shifted back by
    /// its scroll offset.
    pub fn absolute_rect(&self, id: WidgetId) -> Option<Rect> {
        let node = self.node(id)?;
        let mut rect = node.rect;
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.node(parent_id)?;
            rect = rect.offset(
                parent
                    .rect
                    .x
                    .saturating_add(parent.padding.left)
                    .saturating_sub(parent.scroll.x),
                parent
                    .rect
                    .y
                    .saturating_add(parent.padding.top)
                    .saturating_sub(parent.scroll.y),
            );
            current = parent.parent;
        }
        Some(rect)
    }

    /// Screen rectangle of a widget's content area.
    pub fn inner_rect(&self, id: WidgetId) -> Option<Rect> {
        let padding = self.padding(id);
        self.absolute_rect(id).map(|rect| rect.inset(padding))
    }

    /// Deepest widget under a screen point.
    ///
    /// Children are only hit inside their parent's content area; later
    /// siblings are on top of earlier ones.
    pub fn widget_at(&self, x: Dim, y: Dim) -> Option<WidgetId> {
        self.roots
            .iter()
            .rev()
            .find_map(|&root| self.widget_at_recursive(root, x, y))
    }

    fn widget_at_recursive(&self, id: WidgetId, x: Dim, y: Dim) -> Option<WidgetId> {
        if !self.absolute_rect(id)?.contains(x, y) {
            return None;
        }
        let in_content = self
            .inner_rect(id)
            .map(|inner| inner.contains(x, y))
            .unwrap_or(false);
        if in_content {
            for &child in self.children(id).iter().rev() {
                if let Some(hit) = self.widget_at_recursive(child, x, y) {
                    return Some(hit);
                }
            }
        }
        Some(id)
    }

    pub fn scroll(&self, id: WidgetId) -> ScrollOffset {
        self.node(id).map(|n| n.scroll).unwrap_or_default()
    }

    /// Store a scroll offset, invalidating the widget if it moved.
    pub fn set_scroll(&mut self, id: WidgetId, scroll: ScrollOffset) {
        let changed = match self.node_mut(id) {
            Some(node) if node.scroll != scroll => {
                node.scroll = scroll;
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate(id);
        }
    }

    pub fn set_scroll_x(&mut self, id: WidgetId, x: Dim) {
        let scroll = self.scroll(id);
        self.set_scroll(id, ScrollOffset { x, ..scroll });
    }

    pub fn set_scroll_y(&mut self, id: WidgetId, y: Dim) {
        let scroll = self.scroll(id);
        self.set_scroll(id, ScrollOffset { y, ..scroll });
    }

    pub fn inc_scroll_x(&mut self, id: WidgetId, delta: Dim) {
        let scroll = self.scroll(id);
        self.set_scroll_x(id, scroll.x.saturating_add(delta));
    }

    pub fn inc_scroll_y(&mut self, id: WidgetId, delta: Dim) {
        let scroll = self.scroll(id);
        self.set_scroll_y(id, scroll.y.saturating_add(delta));
    }

    pub fn color(&self, id: WidgetId, index: usize) -> Option<Color> {
        self.node(id).and_then(|n| n.colors.get(index).copied())
    }

    /// Set an entry of the widget's colour table.
    /// Returns false if the widget has no colour at `index`.
    pub fn set_color(&mut self, id: WidgetId, index: usize, color: Color) -> bool {
        let stored = match self.node_mut(id).and_then(|n| n.colors.get_mut(index)) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        };
        if stored {
            self.invalidate(id);
        }
        stored
    }

    pub fn flags(&self, id: WidgetId) -> WidgetFlags {
        self.node(id).map(|n| n.flags).unwrap_or_default()
    }

    pub fn set_flag(&mut self, id: WidgetId, flag: WidgetFlags, enabled: bool) {
        if let Some(node) = self.node_mut(id) {
            node.flags.set(flag, enabled);
        }
    }

    /// Mark a widget as needing a redraw.
    ///
    /// Spreads to the parent of `INVALIDATE_PARENT` widgets and to children
    /// flagged `INVALIDATE_WITH_PARENT`. Links are followed even from widgets
    /// that were already dirty; each widget is visited at most once per call.
    pub fn invalidate(&mut self, id: WidgetId) {
        let mut visited = HashSet::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(dense_idx) = self.get_dense_index(current) else {
                continue;
            };
            let node = &mut self.dense[dense_idx];
            node.is_dirty = true;

            if node.flags.contains(WidgetFlags::INVALIDATE_PARENT) {
                pending.extend(node.parent);
            }
            let children = node.children.clone();
            pending.extend(
                children
                    .into_iter()
                    .filter(|&child| self.flags(child).contains(WidgetFlags::INVALIDATE_WITH_PARENT)),
            );
        }
    }

    /// Check if a widget is dirty.
    pub fn is_dirty(&self, id: WidgetId) -> bool {
        self.node(id).map(|n| n.is_dirty).unwrap_or(false)
    }

    pub fn has_dirty(&self) -> bool {
        self.dense.iter().any(|n| n.is_dirty)
    }

    /// Clear the dirty marks, returning the widgets that were dirty.
    pub fn take_dirty(&mut self) -> Vec<WidgetId> {
        let mut dirty = Vec::new();
        for node in &mut self.dense {
            if node.is_dirty {
                node.is_dirty = false;
                let generation = self.sparse[node.sparse_index as usize]
                    .as_ref()
                    .map(|e| e.generation)
                    .unwrap_or(0);
                dirty.push(WidgetId::new(node.sparse_index, generation));
            }
        }
        dirty
    }
}
