use std::time::Duration;

use crate::invalidation::{ChangeFlags, WidgetId};
use crate::layout::{Constraints, HeightBounds, Policy, Size, SizePolicy};
use crate::renderer::PaintContext;

use super::widget::{Event, EventResponse, Rect, Widget};

/// A clipping viewport around a single child.
///
/// The child is always laid out at its natural height; the viewport's own
/// height is bounded by [`HeightBounds`] and anything outside it is clipped.
/// When the child is taller than the viewport, scroll events move it.
pub struct ContentArea {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    content: Option<Box<dyn Widget>>,
    height_bounds: HeightBounds,
    size_policy: SizePolicy,
    content_size: Size,
    scroll_offset: f32,
    bounds: Rect,
}

impl ContentArea {
    pub fn new() -> Self {
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            content: None,
            height_bounds: HeightBounds::OPEN,
            size_policy: SizePolicy::new(Policy::Expanding, Policy::Fixed),
            content_size: Size::zero(),
            scroll_offset: 0.0,
            bounds: Rect::default(),
        }
    }

    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }

    pub fn content(&self) -> Option<&dyn Widget> {
        self.content.as_deref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Attach `content`, handing back whatever was attached before.
    pub fn set_content(&mut self, content: Box<dyn Widget>) -> Option<Box<dyn Widget>> {
        self.scroll_offset = 0.0;
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        self.content.replace(content)
    }

    /// Detach and return the current content.
    pub fn take_content(&mut self) -> Option<Box<dyn Widget>> {
        self.scroll_offset = 0.0;
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        self.content.take()
    }

    pub fn min_height(&self) -> f32 {
        self.height_bounds.min
    }

    pub fn max_height(&self) -> f32 {
        self.height_bounds.max
    }

    pub fn set_min_height(&mut self, height: f32) {
        if self.height_bounds.min != height {
            self.height_bounds.min = height;
            self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT;
        }
    }

    pub fn set_max_height(&mut self, height: f32) {
        if self.height_bounds.max != height {
            self.height_bounds.max = height;
            self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT;
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn max_scroll(&self) -> f32 {
        (self.content_size.height - self.bounds.height).max(0.0)
    }

    fn position_content(&mut self) {
        let (x, y) = (self.bounds.x, self.bounds.y - self.scroll_offset);
        if let Some(content) = self.content.as_mut() {
            content.set_origin(x, y);
        }
    }
}

impl Default for ContentArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ContentArea {
    fn size_hint(&self) -> Size {
        let natural = self
            .content
            .as_ref()
            .map(|content| content.size_hint())
            .unwrap_or_default();
        Size::new(natural.width, self.height_bounds.clamp(natural.height))
    }

    fn size_policy(&self) -> SizePolicy {
        self.size_policy
    }

    fn advance_animations(&mut self, elapsed: Duration) -> bool {
        self.content
            .as_mut()
            .is_some_and(|content| content.advance_animations(elapsed))
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let hint = self.size_hint();
        let width = self.size_policy.resolve_width(hint.width, &constraints);

        self.content_size = match self.content.as_mut() {
            Some(content) => {
                let child_constraints = Constraints::new(width, 0.0, width, f32::INFINITY);
                content.layout(child_constraints)
            }
            None => Size::zero(),
        };

        let bounded = constraints.with_height_bounds(self.height_bounds);
        let height = self
            .size_policy
            .resolve_height(self.height_bounds.clamp(self.content_size.height), &bounded);

        self.bounds.width = width;
        self.bounds.height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.position_content();
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        Size::new(width, height)
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let Some(content) = self.content.as_ref() else {
            return;
        };
        ctx.push_clip(self.bounds);
        content.paint(ctx);
        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        if let Some((x, y)) = event.coords() {
            if !self.bounds.contains(x, y) {
                return EventResponse::Ignored;
            }
        }

        if let Some(content) = self.content.as_mut() {
            if content.event(event) == EventResponse::Handled {
                return EventResponse::Handled;
            }
        }

        if let Event::Scroll { delta_y, .. } = event {
            let max_scroll = self.max_scroll();
            if max_scroll > 0.0 {
                let offset = (self.scroll_offset + delta_y).clamp(0.0, max_scroll);
                if offset != self.scroll_offset {
                    self.scroll_offset = offset;
                    self.position_content();
                    self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
                }
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.position_content();
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
            || self.content.as_ref().is_some_and(|c| c.needs_layout())
    }

    fn needs_paint(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_PAINT)
            || self.content.as_ref().is_some_and(|c| c.needs_paint())
    }

    fn clear_dirty(&mut self) {
        self.dirty_flags = ChangeFlags::empty();
        if let Some(content) = self.content.as_mut() {
            content.clear_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Color;

    /// Leaf with a fixed natural size that paints one rect.
    struct Block {
        id: WidgetId,
        size: Size,
        bounds: Rect,
        dirty_flags: ChangeFlags,
    }

    impl Block {
        fn new(width: f32, height: f32) -> Self {
            Self {
                id: WidgetId::next(),
                size: Size::new(width, height),
                bounds: Rect::default(),
                dirty_flags: ChangeFlags::empty(),
            }
        }
    }

    impl Widget for Block {
        fn size_hint(&self) -> Size {
            self.size
        }
        fn layout(&mut self, constraints: Constraints) -> Size {
            let size = constraints.constrain(self.size);
            self.bounds.width = size.width;
            self.bounds.height = size.height;
            size
        }
        fn paint(&self, ctx: &mut PaintContext) {
            ctx.draw_rect(self.bounds, Color::WHITE);
        }
        fn set_origin(&mut self, x: f32, y: f32) {
            self.bounds.x = x;
            self.bounds.y = y;
        }
        fn bounds(&self) -> Rect {
            self.bounds
        }
        fn id(&self) -> WidgetId {
            self.id
        }
        crate::widgets::impl_dirty_flags!();
    }

    fn area_with_block(max_height: f32) -> ContentArea {
        let mut area = ContentArea::new();
        area.set_max_height(max_height);
        area.set_content(Box::new(Block::new(50.0, 160.0)));
        area
    }

    #[test]
    fn test_size_hint_respects_max_height() {
        let area = area_with_block(0.0);
        assert_eq!(area.size_hint().height, 0.0);

        let area = area_with_block(100.0);
        assert_eq!(area.size_hint().height, 100.0);

        let area = area_with_block(f32::INFINITY);
        assert_eq!(area.size_hint().height, 160.0);
    }

    #[test]
    fn test_layout_clips_to_max_height() {
        let mut area = area_with_block(60.0);
        let size = area.layout(Constraints::loose(Size::new(200.0, 500.0)));
        assert_eq!(size, Size::new(200.0, 60.0));
        assert_eq!(area.content().map(|c| c.bounds().height), Some(160.0));
    }

    #[test]
    fn test_zero_height_paints_nothing() {
        let mut area = area_with_block(0.0);
        area.layout(Constraints::loose(Size::new(200.0, 500.0)));
        area.set_origin(0.0, 40.0);
        let mut ctx = PaintContext::new();
        area.paint(&mut ctx);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_visible_content_is_clipped() {
        let mut area = area_with_block(60.0);
        area.layout(Constraints::loose(Size::new(200.0, 500.0)));
        area.set_origin(0.0, 40.0);
        let mut ctx = PaintContext::new();
        area.paint(&mut ctx);
        assert_eq!(ctx.commands().len(), 1);
        assert_eq!(
            ctx.commands()[0].clip(),
            Some(Rect::new(0.0, 40.0, 200.0, 60.0))
        );
    }

    #[test]
    fn test_set_content_returns_previous() {
        let mut area = ContentArea::new();
        assert!(area.set_content(Box::new(Block::new(10.0, 10.0))).is_none());
        let previous = area.set_content(Box::new(Block::new(20.0, 30.0)));
        assert_eq!(previous.map(|p| p.size_hint()), Some(Size::new(10.0, 10.0)));
        assert_eq!(area.size_hint(), Size::new(20.0, 30.0));

        assert!(area.take_content().is_some());
        assert!(!area.has_content());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut area = area_with_block(60.0);
        area.layout(Constraints::loose(Size::new(200.0, 500.0)));
        area.set_origin(0.0, 0.0);

        let scroll = |delta_y| Event::Scroll {
            x: 10.0,
            y: 10.0,
            delta_y,
        };
        assert_eq!(area.event(&scroll(30.0)), EventResponse::Handled);
        assert_eq!(area.scroll_offset(), 30.0);
        assert_eq!(area.content().map(|c| c.bounds().y), Some(-30.0));

        area.event(&scroll(1000.0));
        assert_eq!(area.scroll_offset(), 100.0);
        area.event(&scroll(-1000.0));
        assert_eq!(area.scroll_offset(), 0.0);
    }
}
