pub mod error;
pub mod layout;
pub mod renderer;
pub mod tree;
pub mod widgets;

use std::cell::{Cell, RefCell};

use renderer::DrawTarget;
use tree::{Tree, WidgetId};
use widgets::{Color, Dim, Event, EventResponse, Rect};

pub mod prelude {
    pub use crate::error::WidgetError;
    pub use crate::layout::Size;
    pub use crate::renderer::{DrawCommand, DrawTarget, PaintContext};
    pub use crate::tree::{Tree, WidgetId};
    pub use crate::widgets::list_container;
    pub use crate::widgets::{
        panel, Color, Dim, Event, EventResponse, ListContainer, ListContainerColor, Padding,
        Panel, Rect, ScrollLimits, ScrollMode, ScrollOffset, Widget,
    };
    pub use crate::{Gui, GuiConfig};
}

pub struct GuiConfig {
    pub width: Dim,
    pub height: Dim,
    pub background_color: Color,
    /// Deliver pointer input to widgets
    pub touch: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 272,
            background_color: Color::rgb(0.1, 0.1, 0.15),
            touch: true,
        }
    }
}

/// Pointer gesture in progress: the widget that claimed it and the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTouch {
    owner: WidgetId,
    x: Dim,
    y: Dim,
}

/// Owns the widget tree and routes draw requests and pointer input into it.
///
/// Everything runs on one thread. The tree is only reachable through
/// [`Gui::protect`], which hands out `&mut Tree` for the duration of a
/// closure; widget code receives that borrow and never locks on its own.
pub struct Gui {
    config: GuiConfig,
    tree: RefCell<Tree>,
    active_touch: Cell<Option<ActiveTouch>>,
}

impl Gui {
    pub fn new() -> Self {
        Self::with_config(GuiConfig::default())
    }

    pub fn with_config(config: GuiConfig) -> Self {
        log::info!(
            "Creating GUI: {}x{}, touch {}",
            config.width,
            config.height,
            if config.touch { "enabled" } else { "disabled" }
        );
        Self {
            config,
            tree: RefCell::new(Tree::new()),
            active_touch: Cell::new(None),
        }
    }

    pub fn width(mut self, width: Dim) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: Dim) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn touch(mut self, enabled: bool) -> Self {
        self.config.touch = enabled;
        self
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Install the `env_logger` backend. Safe to call more than once.
    pub fn init_logging() {
        let _ = env_logger::try_init();
    }

    /// Run `f` with exclusive access to the widget tree.
    ///
    /// The access ends when `f` returns or unwinds. Entering again from inside
    /// `f` is a contract violation and panics.
    pub fn protect<R>(&self, f: impl FnOnce(&mut Tree) -> R) -> R {
        let mut tree = match self.tree.try_borrow_mut() {
            Ok(tree) => tree,
            Err(_) => panic!("GUI protected region entered while already held"),
        };
        f(&mut tree)
    }

    /// Widget currently owning the pointer gesture.
    pub fn touch_owner(&self) -> Option<WidgetId> {
        self.active_touch.get().map(|t| t.owner)
    }

    /// Paint the whole tree, parents before children, and clear the dirty set.
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let screen = Rect::new(0, 0, self.config.width, self.config.height);
        self.protect(|tree| {
            target.push_clip(screen);
            target.fill_rect(screen, self.config.background_color);
            for root in tree.roots().to_vec() {
                paint_recursive(tree, root, target);
            }
            target.pop_clip();

            let redrawn = tree.take_dirty();
            log::trace!("Frame drawn, {} widgets were dirty", redrawn.len());
        });
    }

    /// Pointer pressed at screen position (`x`, `y`).
    ///
    /// The deepest widget under the point is offered the gesture first, then
    /// its ancestors in turn. The first one to handle it owns the gesture
    /// until `touch_up`.
    pub fn touch_down(&self, x: Dim, y: Dim) -> EventResponse {
        self.active_touch.set(None);
        if !self.config.touch {
            return EventResponse::Ignored;
        }

        self.protect(|tree| {
            let mut candidate = tree.widget_at(x, y);
            while let Some(id) = candidate {
                let (rel_x, rel_y) = relative_to(tree, id, x, y);
                let event = Event::TouchDown { x: rel_x, y: rel_y };
                if dispatch(tree, id, &event) == EventResponse::Handled {
                    log::trace!("Touch gesture claimed by {:?} at ({}, {})", id, x, y);
                    self.active_touch.set(Some(ActiveTouch { owner: id, x, y }));
                    return EventResponse::Handled;
                }
                candidate = tree.parent(id);
            }
            EventResponse::Ignored
        })
    }

    /// Pointer moved to (`x`, `y`) while pressed.
    pub fn touch_move(&self, x: Dim, y: Dim) -> EventResponse {
        let Some(active) = self.active_touch.get() else {
            return EventResponse::Ignored;
        };

        self.protect(|tree| {
            if !tree.contains(active.owner) {
                self.active_touch.set(None);
                return EventResponse::Ignored;
            }

            let (rel_x, rel_y) = relative_to(tree, active.owner, x, y);
            let (prev_x, prev_y) = relative_to(tree, active.owner, active.x, active.y);
            let event = Event::TouchMove {
                x: rel_x,
                y: rel_y,
                prev_x,
                prev_y,
            };
            self.active_touch.set(Some(ActiveTouch { x, y, ..active }));
            dispatch(tree, active.owner, &event)
        })
    }

    /// Pointer released at (`x`, `y`). Ends the gesture.
    pub fn touch_up(&self, x: Dim, y: Dim) -> EventResponse {
        let Some(active) = self.active_touch.take() else {
            return EventResponse::Ignored;
        };

        self.protect(|tree| {
            if !tree.contains(active.owner) {
                return EventResponse::Ignored;
            }
            let (rel_x, rel_y) = relative_to(tree, active.owner, x, y);
            dispatch(tree, active.owner, &Event::TouchUp { x: rel_x, y: rel_y })
        })
    }
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

fn paint_recursive(tree: &mut Tree, id: WidgetId, target: &mut dyn DrawTarget) {
    if let Err(err) = tree.with_widget_mut(id, |widget, tree| widget.paint(tree, id, target)) {
        log::warn!("Skipping paint of {:?}: {}", id, err);
        return;
    }

    let children = tree.children(id).to_vec();
    if children.is_empty() {
        return;
    }
    // Limits and offset are settled by the parent's paint, so child rects are final
    let Some(content) = tree.inner_rect(id) else {
        return;
    };
    target.push_clip(content);
    for child in children {
        paint_recursive(tree, child, target);
    }
    target.pop_clip();
}

fn dispatch(tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
    tree.with_widget_mut(id, |widget, tree| widget.event(tree, id, event))
        .unwrap_or(EventResponse::Ignored)
}

/// Convert a screen point into coordinates relative to the widget's top-left corner.
fn relative_to(tree: &Tree, id: WidgetId, x: Dim, y: Dim) -> (Dim, Dim) {
    let origin = tree.absolute_rect(id).unwrap_or_default();
    (x.saturating_sub(origin.x), y.saturating_sub(origin.y))
}
