//! Draw command definitions for the display list.

use crate::widgets::{ArrowDirection, Color, Rect};

/// A single draw operation in window coordinates.
///
/// `clip` is the intersection of every clip region active when the command
/// was recorded, or `None` when nothing was clipping.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle.
    Rect {
        rect: Rect,
        color: Color,
        clip: Option<Rect>,
    },

    /// Draw a single run of text.
    Text {
        /// The text string to render
        text: String,
        /// The bounding rectangle for the text
        rect: Rect,
        /// The text color
        color: Color,
        /// The font size in logical pixels
        font_size: f32,
        clip: Option<Rect>,
    },

    /// Draw a filled triangular arrow inside `rect`, pointing in `direction`.
    Arrow {
        rect: Rect,
        direction: ArrowDirection,
        color: Color,
        clip: Option<Rect>,
    },
}

impl DrawCommand {
    /// Bounds of the primitive, before clipping.
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::Rect { rect, .. }
            | DrawCommand::Text { rect, .. }
            | DrawCommand::Arrow { rect, .. } => *rect,
        }
    }

    /// Active clip when the command was recorded.
    pub fn clip(&self) -> Option<Rect> {
        match self {
            DrawCommand::Rect { clip, .. }
            | DrawCommand::Text { clip, .. }
            | DrawCommand::Arrow { clip, .. } => *clip,
        }
    }

    /// The three corners of an arrow, in the order (tip, base_a, base_b).
    pub fn arrow_points(rect: Rect, direction: ArrowDirection) -> [(f32, f32); 3] {
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        match direction {
            ArrowDirection::Right => [(x + w, y + h / 2.0), (x, y), (x, y + h)],
            ArrowDirection::Left => [(x, y + h / 2.0), (x + w, y), (x + w, y + h)],
            ArrowDirection::Down => [(x + w / 2.0, y + h), (x, y), (x + w, y)],
            ArrowDirection::Up => [(x + w / 2.0, y), (x, y + h), (x + w, y + h)],
        }
    }
}
