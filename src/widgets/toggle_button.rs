use std::time::Duration;

use crate::animation::{Animatable, AnimationState, Transition};
use crate::invalidation::{ChangeFlags, WidgetId};
use crate::layout::{Constraints, Policy, Size, SizePolicy};
use crate::renderer::{measure_text, PaintContext};

use super::widget::{Color, Event, EventResponse, MouseButton, Padding, Rect, Widget};

/// Arrow edge length relative to the font size
const ARROW_SCALE: f32 = 0.6;
/// Space between arrow and text relative to the font size
const ARROW_GAP_SCALE: f32 = 0.4;

/// Which way the indicator arrow points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What a pointer event did to the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Primary button went down on the button. Checked state is unchanged.
    Pressed,
    /// Press released over the button; checked state has flipped if checkable.
    Clicked,
    /// Press released elsewhere; checked state is unchanged.
    Cancelled,
}

/// A flat header button with an arrow beside its text.
///
/// The button is checkable: a full click (press and release over the button)
/// flips `checked`. Observers learn about the press before the flip through
/// [`ToggleAction::Pressed`].
pub struct ToggleButton {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    text: String,
    checkable: bool,
    checked: bool,
    arrow: ArrowDirection,
    font_size: f32,
    padding: Padding,
    text_color: Color,
    background: Color,
    hover_background: Color,
    pressed: bool,
    hovered: bool,
    hover: AnimationState<f32>,
    bounds: Rect,
}

impl ToggleButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            text: text.into(),
            checkable: false,
            checked: false,
            arrow: ArrowDirection::Right,
            font_size: 14.0,
            padding: Padding::symmetric(8.0, 6.0),
            text_color: Color::WHITE,
            background: Color::TRANSPARENT,
            hover_background: Color::rgba(1.0, 1.0, 1.0, 0.08),
            pressed: false,
            hovered: false,
            hover: AnimationState::new(0.0, Transition::default()),
            bounds: Rect::default(),
        }
    }

    pub fn checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    pub fn arrow(mut self, arrow: ArrowDirection) -> Self {
        self.arrow = arrow;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
    }

    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state directly. Ignored for non-checkable buttons.
    pub fn set_checked(&mut self, checked: bool) {
        if !self.checkable || self.checked == checked {
            return;
        }
        self.checked = checked;
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn arrow_direction(&self) -> ArrowDirection {
        self.arrow
    }

    pub fn set_arrow_direction(&mut self, arrow: ArrowDirection) {
        if self.arrow != arrow {
            self.arrow = arrow;
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Feed a pointer event and report what it did to the button.
    pub fn handle_event(&mut self, event: &Event) -> Option<ToggleAction> {
        match event {
            Event::MouseMove { x, y } => {
                self.set_hovered(self.bounds.contains(*x, *y));
                None
            }
            Event::MouseLeave => {
                self.set_hovered(false);
                None
            }
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } if self.bounds.contains(*x, *y) => {
                self.pressed = true;
                self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
                Some(ToggleAction::Pressed)
            }
            Event::MouseUp {
                x,
                y,
                button: MouseButton::Left,
            } if self.pressed => {
                self.pressed = false;
                self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
                if self.bounds.contains(*x, *y) {
                    if self.checkable {
                        self.checked = !self.checked;
                    }
                    Some(ToggleAction::Clicked)
                } else {
                    Some(ToggleAction::Cancelled)
                }
            }
            _ => None,
        }
    }

    fn set_hovered(&mut self, hovered: bool) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        self.hover.animate_to(if hovered { 1.0 } else { 0.0 });
    }

    fn arrow_size(&self) -> f32 {
        self.font_size * ARROW_SCALE
    }

    fn current_background(&self) -> Color {
        Color::lerp(&self.background, &self.hover_background, *self.hover.current())
    }
}

impl Widget for ToggleButton {
    fn size_hint(&self) -> Size {
        let text = measure_text(&self.text, self.font_size, None);
        let arrow = self.arrow_size();
        Size::new(
            self.padding.horizontal() + arrow + self.font_size * ARROW_GAP_SCALE + text.width,
            self.padding.vertical() + text.height.max(arrow),
        )
    }

    fn size_policy(&self) -> SizePolicy {
        SizePolicy::new(Policy::Expanding, Policy::Fixed)
    }

    fn advance_animations(&mut self, elapsed: Duration) -> bool {
        if !self.hover.is_animating() {
            return false;
        }
        if self.hover.advance(elapsed).is_changed() {
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
        self.hover.is_animating()
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let hint = self.size_hint();
        let policy = self.size_policy();
        let size = Size::new(
            policy.resolve_width(hint.width, &constraints),
            policy.resolve_height(hint.height, &constraints),
        );
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let background = self.current_background();
        if background.a > 0.0 {
            ctx.draw_rect(self.bounds, background);
        }

        let content = self.bounds.inset(self.padding);
        let arrow = self.arrow_size();
        let arrow_rect = Rect::new(
            content.x,
            content.y + (content.height - arrow) / 2.0,
            arrow,
            arrow,
        );
        ctx.draw_arrow(arrow_rect, self.arrow, self.text_color);

        let text_x = arrow_rect.x + arrow + self.font_size * ARROW_GAP_SCALE;
        let text_rect = Rect::new(
            text_x,
            content.y,
            (content.x + content.width - text_x).max(0.0),
            content.height,
        );
        ctx.draw_text(&self.text, text_rect, self.text_color, self.font_size);
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match self.handle_event(event) {
            Some(_) => EventResponse::Handled,
            None => EventResponse::Ignored,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out(button: ToggleButton) -> ToggleButton {
        let mut button = button;
        button.layout(Constraints::loose(Size::new(300.0, 100.0)));
        button.set_origin(0.0, 0.0);
        button
    }

    fn down(x: f32, y: f32) -> Event {
        Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    fn up(x: f32, y: f32) -> Event {
        Event::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_size_hint_height() {
        let button = ToggleButton::new("Title")
            .font_size(20.0)
            .padding(Padding::symmetric(12.0, 8.0));
        assert!((button.size_hint().height - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_layout_expands_horizontally() {
        let button = laid_out(ToggleButton::new("Title"));
        assert_eq!(button.bounds().width, 300.0);
    }

    #[test]
    fn test_click_flips_checked() {
        let mut button = laid_out(ToggleButton::new("Title").checkable(true));
        assert_eq!(button.handle_event(&down(5.0, 5.0)), Some(ToggleAction::Pressed));
        assert!(!button.is_checked());
        assert!(button.is_pressed());
        assert_eq!(button.handle_event(&up(5.0, 5.0)), Some(ToggleAction::Clicked));
        assert!(button.is_checked());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut button = laid_out(ToggleButton::new("Title").checkable(true));
        button.handle_event(&down(5.0, 5.0));
        assert_eq!(
            button.handle_event(&up(5.0, 500.0)),
            Some(ToggleAction::Cancelled)
        );
        assert!(!button.is_checked());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut button = laid_out(ToggleButton::new("Title").checkable(true));
        assert_eq!(button.handle_event(&down(5.0, 500.0)), None);
        assert_eq!(button.handle_event(&up(5.0, 5.0)), None);
        assert!(!button.is_checked());
    }

    #[test]
    fn test_not_checkable_does_not_check() {
        let mut button = laid_out(ToggleButton::new("Title"));
        button.set_checked(true);
        assert!(!button.is_checked());
        button.handle_event(&down(5.0, 5.0));
        assert_eq!(button.handle_event(&up(5.0, 5.0)), Some(ToggleAction::Clicked));
        assert!(!button.is_checked());
    }

    #[test]
    fn test_hover_animates_background() {
        let mut button = laid_out(
            ToggleButton::new("Title")
                .background(Color::BLACK)
                .hover_background(Color::WHITE),
        );
        button.handle_event(&Event::MouseMove { x: 5.0, y: 5.0 });
        assert!(button.is_hovered());
        assert!(button.advance_animations(Duration::from_millis(10)));
        while button.advance_animations(Duration::from_millis(50)) {}
        assert_eq!(button.current_background(), Color::WHITE);

        button.handle_event(&Event::MouseLeave);
        assert!(!button.is_hovered());
    }

    #[test]
    fn test_paint_emits_arrow_and_text() {
        let button = laid_out(ToggleButton::new("Title").arrow(ArrowDirection::Down));
        let mut ctx = PaintContext::new();
        button.paint(&mut ctx);
        assert!(ctx.commands().iter().any(|cmd| matches!(
            cmd,
            crate::renderer::DrawCommand::Arrow {
                direction: ArrowDirection::Down,
                ..
            }
        )));
        assert_eq!(ctx.texts().collect::<Vec<_>>(), vec!["Title"]);
    }
}
