use std::any::Any;
use std::fmt;

use bitflags::bitflags;

use crate::layout::Size;
use crate::renderer::DrawTarget;
use crate::tree::{Tree, WidgetId};

/// Signed pixel coordinate or length.
pub type Dim = i32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Fully transparent colours let whatever is behind the widget show through.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: Dim,
    pub y: Dim,
    pub width: Dim,
    pub height: Dim,
}

impl Rect {
    pub fn new(x: Dim, y: Dim, width: Dim, height: Dim) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> Dim {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> Dim {
        self.y.saturating_add(self.height)
    }

    pub fn offset(&self, dx: Dim, dy: Dim) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Shrink by padding on each side. Width and height never go negative.
    pub fn inset(&self, padding: Padding) -> Self {
        Self {
            x: self.x.saturating_add(padding.left),
            y: self.y.saturating_add(padding.top),
            width: self.width.saturating_sub(padding.horizontal()).max(0),
            height: self.height.saturating_sub(padding.vertical()).max(0),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlapping area of two rects, `None` if they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Rect::new(
            x,
            y,
            self.right().min(other.right()).saturating_sub(x),
            self.bottom().min(other.bottom()).saturating_sub(y),
        ))
    }

    pub fn contains(&self, x: Dim, y: Dim) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: Dim,
    pub right: Dim,
    pub bottom: Dim,
    pub left: Dim,
}

impl Padding {
    pub fn all(value: Dim) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: Dim, vertical: Dim) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> Dim {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> Dim {
        self.top.saturating_add(self.bottom)
    }
}

impl From<Dim> for Padding {
    fn from(v: Dim) -> Self {
        Padding::all(v)
    }
}

/// `[vertical, horizontal]`: CSS-style 2-value shorthand.
impl From<[Dim; 2]> for Padding {
    fn from(v: [Dim; 2]) -> Self {
        Padding::symmetric(v[1], v[0])
    }
}

/// `[top, right, bottom, left]`: CSS-style 4-value shorthand.
impl From<[Dim; 4]> for Padding {
    fn from(v: [Dim; 4]) -> Self {
        Padding {
            top: v[0],
            right: v[1],
            bottom: v[2],
            left: v[3],
        }
    }
}

/// Pointer events, with coordinates relative to the receiving widget's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Pointer pressed; starts a gesture
    TouchDown { x: Dim, y: Dim },
    /// Pointer moved while pressed
    TouchMove {
        x: Dim,
        y: Dim,
        /// Position of the previous sample
        prev_x: Dim,
        prev_y: Dim,
    },
    /// Pointer released; ends the gesture
    TouchUp { x: Dim, y: Dim },
}

impl Event {
    pub fn coords(&self) -> (Dim, Dim) {
        match *self {
            Event::TouchDown { x, y } | Event::TouchMove { x, y, .. } | Event::TouchUp { x, y } => {
                (x, y)
            }
        }
    }

    /// Movement since the previous sample as "previous minus current".
    pub fn drag_delta(&self) -> Option<(Dim, Dim)> {
        match *self {
            Event::TouchMove {
                x,
                y,
                prev_x,
                prev_y,
            } => Some((prev_x.saturating_sub(x), prev_y.saturating_sub(y))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

/// Type tag of a widget stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Panel,
    ListContainer,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetKind::Panel => f.write_str("PANEL"),
            WidgetKind::ListContainer => f.write_str("LIST_CONTAINER"),
        }
    }
}

bitflags! {
    /// Per-widget behaviour flags
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct WidgetFlags: u8 {
        /// Widget may have children
        const ALLOW_CHILDREN         = 0b001;
        /// Invalidating the widget also invalidates its parent
        const INVALIDATE_PARENT      = 0b010;
        /// Invalidating the parent also invalidates this widget
        const INVALIDATE_WITH_PARENT = 0b100;
    }
}

pub trait Widget: Any {
    fn kind(&self) -> WidgetKind;

    /// Flags applied to every instance at registration.
    fn flags(&self) -> WidgetFlags {
        WidgetFlags::empty()
    }

    /// Initial colour table, indexed by the widget's colour enum.
    fn default_colors(&self) -> &'static [Color] {
        &[]
    }

    /// Padding applied at registration, before the widget is shown.
    fn default_padding(&self) -> Padding {
        Padding::default()
    }

    /// Draw the widget itself. Children are painted by the caller afterwards.
    fn paint(&mut self, tree: &mut Tree, id: WidgetId, target: &mut dyn DrawTarget);

    fn event(&mut self, tree: &mut Tree, id: WidgetId, event: &Event) -> EventResponse {
        let _ = (tree, id, event);
        EventResponse::Ignored
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
