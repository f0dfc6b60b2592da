use crate::invalidation::{ChangeFlags, WidgetId};
use crate::layout::{Constraints, Size};
use crate::renderer::{measure_text, PaintContext};

use super::widget::{Color, Padding, Rect, Widget};

/// Horizontal placement of text inside a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Single-line text on an optional background.
pub struct Label {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    text: String,
    font_size: f32,
    text_color: Color,
    background: Color,
    padding: Padding,
    align: TextAlign,
    text_size: Size,
    bounds: Rect,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            text: text.into(),
            font_size: 14.0,
            text_color: Color::WHITE,
            background: Color::TRANSPARENT,
            padding: Padding::all(2.0),
            align: TextAlign::Left,
            text_size: Size::zero(),
            bounds: Rect::default(),
        }
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
    }
}

impl Widget for Label {
    fn size_hint(&self) -> Size {
        let measured = measure_text(&self.text, self.font_size, None);
        Size::new(
            measured.width + self.padding.horizontal(),
            measured.height + self.padding.vertical(),
        )
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        self.text_size = measure_text(&self.text, self.font_size, None);
        let size = constraints.constrain(Size::new(
            self.text_size.width + self.padding.horizontal(),
            self.text_size.height + self.padding.vertical(),
        ));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.background.a > 0.0 {
            ctx.draw_rect(self.bounds, self.background);
        }

        let content = self.bounds.inset(self.padding);
        let free = (content.width - self.text_size.width).max(0.0);
        let x = match self.align {
            TextAlign::Left => content.x,
            TextAlign::Center => content.x + free / 2.0,
            TextAlign::Right => content.x + free,
        };
        let text_rect = Rect::new(
            x,
            content.y,
            self.text_size.width.min(content.width),
            content.height,
        );
        ctx.draw_text(&self.text, text_rect, self.text_color, self.font_size);
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.widget_id
    }

    super::impl_dirty_flags!();
}

/// Create a label widget
pub fn label(text: impl Into<String>) -> Label {
    Label::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;

    #[test]
    fn test_size_hint_includes_padding() {
        let label = label("7").font_size(10.0).padding(4.0);
        assert!((label.size_hint().height - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_paint_background_then_text() {
        let mut label = label("3")
            .background(Color::from_hex(0x336699))
            .align(TextAlign::Center);
        label.layout(Constraints::tight(Size::new(100.0, 30.0)));
        label.set_origin(0.0, 10.0);

        let mut ctx = PaintContext::new();
        label.paint(&mut ctx);
        let commands = ctx.commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::Rect { .. }));
        assert_eq!(commands[0].rect(), Rect::new(0.0, 10.0, 100.0, 30.0));
        assert!(matches!(&commands[1], DrawCommand::Text { text, .. } if text == "3"));
    }

    #[test]
    fn test_set_text_marks_layout() {
        let mut label = label("a");
        label.layout(Constraints::unbounded());
        assert!(!label.needs_layout());
        label.set_text("b");
        assert!(label.needs_layout());
        assert_eq!(label.text(), "b");
    }
}
