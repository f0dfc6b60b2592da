//! Backend-independent painting.
//!
//! Widgets paint into a [`PaintContext`], which records a flat list of
//! [`DrawCommand`]s in window coordinates. A backend (GPU, software
//! rasterizer, test harness) consumes the list after each frame.

mod commands;
mod text_measurer;

pub use commands::DrawCommand;
pub use text_measurer::{measure_text, TextMeasurer, LINE_HEIGHT_FACTOR};

use crate::widgets::{ArrowDirection, Color, Rect};

#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
    /// Clip stack for clipping children to container bounds
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new PaintContext with pre-allocated capacity to avoid per-frame allocations
    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            clip_stack: Vec::with_capacity(4),
        }
    }

    /// Clear all buffers for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Text runs recorded so far, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        if let Some(clip) = self.visible_clip(rect) {
            self.commands.push(DrawCommand::Rect { rect, color, clip });
        }
    }

    pub fn draw_text(&mut self, text: &str, rect: Rect, color: Color, font_size: f32) {
        if let Some(clip) = self.visible_clip(rect) {
            self.commands.push(DrawCommand::Text {
                text: text.to_string(),
                rect,
                color,
                font_size,
                clip,
            });
        }
    }

    pub fn draw_arrow(&mut self, rect: Rect, direction: ArrowDirection, color: Color) {
        if let Some(clip) = self.visible_clip(rect) {
            self.commands.push(DrawCommand::Arrow {
                rect,
                direction,
                color,
                clip,
            });
        }
    }

    /// Push a clip region onto the stack.
    /// Everything drawn after this is clipped to the given bounds.
    pub fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
    }

    /// Pop a clip region from the stack
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    /// Intersection of all clip regions in the stack, `None` if the stack is empty.
    pub fn current_clip(&self) -> Option<Rect> {
        let mut iter = self.clip_stack.iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, rect| acc.intersection(rect)))
    }

    /// Returns `None` when `rect` is entirely clipped away, otherwise the clip
    /// to record alongside it.
    fn visible_clip(&self, rect: Rect) -> Option<Option<Rect>> {
        match self.current_clip() {
            None => Some(None),
            Some(clip) if clip.intersects(&rect) => Some(Some(clip)),
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_without_clip() {
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(ctx.commands().len(), 1);
        assert_eq!(ctx.commands()[0].clip(), None);
    }

    #[test]
    fn test_clip_intersection_is_recorded() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        ctx.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        ctx.draw_text("hi", Rect::new(60.0, 60.0, 10.0, 10.0), Color::WHITE, 14.0);
        assert_eq!(
            ctx.commands()[0].clip(),
            Some(Rect::new(50.0, 50.0, 50.0, 50.0))
        );
        ctx.pop_clip();
        ctx.pop_clip();
        assert_eq!(ctx.current_clip(), None);
    }

    #[test]
    fn test_fully_clipped_draws_are_dropped() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 40.0, 100.0, 0.0));
        ctx.draw_text("hidden", Rect::new(0.0, 40.0, 50.0, 20.0), Color::WHITE, 14.0);
        ctx.draw_rect(Rect::new(0.0, 40.0, 50.0, 20.0), Color::BLACK);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_texts_and_clear() {
        let mut ctx = PaintContext::with_capacity(4);
        ctx.draw_text("a", Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE, 14.0);
        ctx.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        ctx.draw_text("b", Rect::new(0.0, 5.0, 5.0, 5.0), Color::WHITE, 14.0);
        assert_eq!(ctx.texts().collect::<Vec<_>>(), vec!["a", "b"]);
        ctx.clear();
        assert!(ctx.commands().is_empty());
    }
}
