//! Plain filled rectangle, the simplest content a container can host.

use std::any::Any;

use crate::error::WidgetError;
use crate::renderer::DrawTarget;
use crate::tree::{Tree, TypedWidget, WidgetId};

use super::widget::{Color, Rect, Widget, WidgetKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    color: Color,
}

pub fn panel(color: Color) -> Panel {
    Panel::new(color)
}

impl Panel {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn create(
        self,
        tree: &mut Tree,
        parent: Option<WidgetId>,
        rect: Rect,
    ) -> Result<WidgetId, WidgetError> {
        tree.register(Box::new(self), parent, rect)
    }
}

impl TypedWidget for Panel {
    const KIND: WidgetKind = WidgetKind::Panel;
}

impl Widget for Panel {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }

    fn paint(&mut self, tree: &mut Tree, id: WidgetId, target: &mut dyn DrawTarget) {
        if let Some(rect) = tree.absolute_rect(id) {
            target.fill_rect(rect, self.color);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
