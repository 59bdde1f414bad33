pub mod list_container;
pub mod panel;
pub mod scroll;
pub mod widget;

pub use list_container::{list_container, ListContainer, ListContainerColor};
pub use panel::{panel, Panel};
pub use scroll::{ScrollLimits, ScrollMode, ScrollOffset};
pub use widget::{
    Color, Dim, Event, EventResponse, Padding, Rect, Widget, WidgetFlags, WidgetKind,
};
