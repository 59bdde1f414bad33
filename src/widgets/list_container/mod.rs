//! List container: hosts arbitrary children and scrolls them by dragging.
//!
//! The container never lays out its children. They keep whatever rect they
//! were registered with; the container only measures how far they reach and
//! lets the user drag the viewport across that area.

mod scrollable;

use std::any::Any;

use crate::error::{assert_handle, WidgetError};
use crate::renderer::DrawTarget;
use crate::tree::{Tree, TypedWidget, WidgetId};

use super::scroll::{ScrollLimits, ScrollMode, ScrollOffset};
use super::widget::{
    Color, Event, EventResponse, Padding, Rect, Widget, WidgetFlags, WidgetKind,
};

/// Padding every list container starts with.
pub const DEFAULT_PADDING: i32 = 3;

/// Indices into the list container's colour table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContainerColor {
    Background = 0,
}

impl ListContainerColor {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Default colours in the order of `ListContainerColor`.
static DEFAULT_COLORS: [Color; 1] = [Color::TRANSPARENT];

#[derive(Debug, Default)]
pub struct ListContainer {
    mode: ScrollMode,
    /// Derived on every limit pass, never set directly
    limits: ScrollLimits,
}

/// Create a list container builder with the default `Both` mode.
pub fn list_container() -> ListContainer {
    ListContainer::new()
}

impl ListContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial scroll mode.
    pub fn mode(mut self, mode: ScrollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Register the container in `tree`, under `parent` or as a top-level widget.
    pub fn create(
        self,
        tree: &mut Tree,
        parent: Option<WidgetId>,
        rect: Rect,
    ) -> Result<WidgetId, WidgetError> {
        tree.register(Box::new(self), parent, rect)
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        self.mode
    }

    /// Limits computed by the most recent limit pass.
    pub fn limits(&self) -> ScrollLimits {
        self.limits
    }
}

impl TypedWidget for ListContainer {
    const KIND: WidgetKind = WidgetKind::ListContainer;
}

impl Widget for ListContainer {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ListContainer
    }

    fn flags(&self) -> WidgetFlags {
        WidgetFlags::ALLOW_CHILDREN | WidgetFlags::INVALIDATE_PARENT
    }

    fn default_colors(&self) -> &'static [Color] {
        &DEFAULT_COLORS
    }

    fn default_padding(&self) -> Padding {
        Padding::all(DEFAULT_PADDING)
    }

    fn paint(&mut self, tree: &mut Tree, id: WidgetId, target: &mut dyn DrawTarget) {
        self.recompute_limits(tree, id);

        let Some(rect) = tree.absolute_rect(id) else {
            return;
        };
        let background = tree
            .color(id, ListContainerColor::Background.index())
            .unwrap_or_default();
        target.fill_rect(rect, background);
    }

    fn event(&mut self, tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
        match *event {
            // Claim the gesture so ancestors never see it
            Event::TouchDown { .. } => EventResponse::Handled,
            Event::TouchMove { .. } => {
                // TODO: release the gesture to the parent once the offset sits
                // on a limit, so nested list containers can take over.
                if let Some((delta_x, delta_y)) = event.drag_delta() {
                    self.apply_drag(tree, id, delta_x, delta_y);
                }
                EventResponse::Handled
            }
            Event::TouchUp { .. } => EventResponse::Ignored,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Change which axes respond to dragging. Applies from the next drag or draw.
pub fn set_mode(tree: &mut Tree, id: WidgetId, mode: ScrollMode) {
    assert_handle(tree.with_typed_mut::<ListContainer, _>(id, |container, _| {
        container.mode = mode;
    }));
    tree.invalidate(id);
}

pub fn mode(tree: &Tree, id: WidgetId) -> ScrollMode {
    assert_handle(tree.with_typed::<ListContainer, _>(id, |container| container.mode))
}

/// Set an entry of the colour table.
///
/// A transparent background links the container to its parent's redraws,
/// since whatever the parent draws shows through. Any other background
/// removes the link. Returns false if the colour was not stored.
pub fn set_color(tree: &mut Tree, id: WidgetId, index: ListContainerColor, color: Color) -> bool {
    assert_handle(tree.with_typed::<ListContainer, _>(id, |_| ()));

    let stored = tree.set_color(id, index.index(), color);
    if stored && index == ListContainerColor::Background {
        tree.set_flag(
            id,
            WidgetFlags::INVALIDATE_WITH_PARENT,
            color.is_transparent(),
        );
    }
    stored
}

pub fn color(tree: &Tree, id: WidgetId, index: ListContainerColor) -> Color {
    assert_handle(tree.with_typed::<ListContainer, _>(id, |_| ()));
    tree.color(id, index.index()).unwrap_or_default()
}

pub fn scroll_offset(tree: &Tree, id: WidgetId) -> ScrollOffset {
    assert_handle(tree.with_typed::<ListContainer, _>(id, |_| ()));
    tree.scroll(id)
}

/// Limits from the most recent limit pass.
pub fn max_scroll(tree: &Tree, id: WidgetId) -> ScrollLimits {
    assert_handle(tree.with_typed::<ListContainer, _>(id, |container| container.limits))
}

/// Re-derive the scroll limits from the current children and clamp the offset.
pub fn recompute_limits(tree: &mut Tree, id: WidgetId) -> ScrollLimits {
    assert_handle(tree.with_typed_mut::<ListContainer, _>(id, |container, tree| {
        container.recompute_limits(tree, id)
    }))
}

/// Apply one drag sample ("previous minus current" per axis).
pub fn apply_drag(tree: &mut Tree, id: WidgetId, delta_x: i32, delta_y: i32) {
    assert_handle(tree.with_typed_mut::<ListContainer, _>(id, |container, tree| {
        container.apply_drag(tree, id, delta_x, delta_y)
    }));
}

/// Move the viewport to `offset`, clamped into the current limits.
pub fn scroll_to(tree: &mut Tree, id: WidgetId, offset: ScrollOffset) -> ScrollOffset {
    assert_handle(tree.with_typed_mut::<ListContainer, _>(id, |container, tree| {
        tree.set_scroll(id, offset);
        container.recompute_limits(tree, id);
        tree.scroll(id)
    }))
}
