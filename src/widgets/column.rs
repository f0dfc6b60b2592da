use std::time::Duration;

use crate::invalidation::{ChangeFlags, WidgetId};
use crate::layout::{Constraints, CrossAxisAlignment, Size};
use crate::renderer::PaintContext;

use super::widget::{Event, EventResponse, Padding, Rect, Widget};

/// Stacks children top to bottom.
///
/// Children always get their natural height; the column's own height is the
/// sum of those plus spacing and margins.
pub struct Column {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    children: Vec<Box<dyn Widget>>,
    spacing: f32,
    margins: Padding,
    cross_axis_alignment: CrossAxisAlignment,
    bounds: Rect,
    /// Child positions relative to the column origin, from the last layout
    child_offsets: Vec<(f32, f32)>,
}

impl Column {
    pub fn new() -> Self {
        Self::with_children(Vec::new())
    }

    pub fn with_children(children: Vec<Box<dyn Widget>>) -> Self {
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            children,
            spacing: 0.0,
            margins: Padding::default(),
            cross_axis_alignment: CrossAxisAlignment::Stretch,
            bounds: Rect::default(),
            child_offsets: Vec::new(),
        }
    }

    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self
    }

    pub fn push(&mut self, widget: Box<dyn Widget>) {
        self.children.push(widget);
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn margins(mut self, margins: impl Into<Padding>) -> Self {
        self.margins = margins.into();
        self
    }

    pub fn cross_axis_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_axis_alignment = alignment;
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn total_spacing(&self) -> f32 {
        if self.children.len() > 1 {
            self.spacing * (self.children.len() - 1) as f32
        } else {
            0.0
        }
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn size_hint(&self) -> Size {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for child in &self.children {
            let hint = child.size_hint();
            width = width.max(hint.width);
            height += hint.height;
        }
        Size::new(
            width + self.margins.horizontal(),
            height + self.total_spacing() + self.margins.vertical(),
        )
    }

    fn advance_animations(&mut self, elapsed: Duration) -> bool {
        let mut any_animating = false;
        for child in &mut self.children {
            any_animating |= child.advance_animations(elapsed);
        }
        any_animating
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let inner_max_width = (constraints.max_width - self.margins.horizontal()).max(0.0);
        let inner_width = if inner_max_width.is_finite() {
            inner_max_width
        } else {
            self.size_hint().width - self.margins.horizontal()
        };

        let child_constraints = match self.cross_axis_alignment {
            CrossAxisAlignment::Stretch => {
                Constraints::new(inner_width, 0.0, inner_width, f32::INFINITY)
            }
            _ => Constraints::new(0.0, 0.0, inner_width, f32::INFINITY),
        };

        let mut child_sizes = Vec::with_capacity(self.children.len());
        let mut max_width = 0.0f32;
        let mut total_height = 0.0f32;
        for child in &mut self.children {
            let size = child.layout(child_constraints);
            max_width = max_width.max(size.width);
            total_height += size.height;
            child_sizes.push(size);
        }
        total_height += self.total_spacing();

        let size = constraints.constrain(Size::new(
            max_width + self.margins.horizontal(),
            total_height + self.margins.vertical(),
        ));
        self.bounds.width = size.width;
        self.bounds.height = size.height;

        let content_width = (size.width - self.margins.horizontal()).max(0.0);
        self.child_offsets.clear();
        let mut y = self.margins.top;
        for child_size in &child_sizes {
            let x = self.margins.left
                + match self.cross_axis_alignment {
                    CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => 0.0,
                    CrossAxisAlignment::Center => (content_width - child_size.width) / 2.0,
                    CrossAxisAlignment::End => content_width - child_size.width,
                };
            self.child_offsets.push((x, y));
            y += child_size.height + self.spacing;
        }

        let (x, y) = (self.bounds.x, self.bounds.y);
        self.set_origin(x, y);
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        for child in &self.children {
            child.paint(ctx);
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        // Every child sees every event so hover and press state stay coherent
        let mut response = EventResponse::Ignored;
        for child in &mut self.children {
            if child.event(event) == EventResponse::Handled {
                response = EventResponse::Handled;
            }
        }
        response
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        for (child, (dx, dy)) in self.children.iter_mut().zip(&self.child_offsets) {
            child.set_origin(x + dx, y + dy);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.widget_id
    }

    fn mark_dirty(&mut self, flags: ChangeFlags) {
        self.dirty_flags |= flags;
    }

    fn needs_layout(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_LAYOUT)
            || self.children.iter().any(|child| child.needs_layout())
    }

    fn needs_paint(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_PAINT)
            || self.children.iter().any(|child| child.needs_paint())
    }

    fn clear_dirty(&mut self) {
        self.dirty_flags = ChangeFlags::empty();
        for child in &mut self.children {
            child.clear_dirty();
        }
    }
}

pub fn column() -> Column {
    Column::new()
}

#[macro_export]
macro_rules! column {
    ($($child:expr),* $(,)?) => {
        {
            let mut c = $crate::widgets::Column::new();
            $(
                c = c.child($child);
            )*
            c
        }
    };
}
