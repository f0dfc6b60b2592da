pub mod collapsible_box;
pub mod column;
pub mod content_area;
pub mod label;
pub mod toggle_button;
pub mod widget;

/// Macro to implement common dirty flag methods for simple widgets.
///
/// Containers keep a custom implementation because they recurse to children.
macro_rules! impl_dirty_flags {
    () => {
        fn mark_dirty(&mut self, flags: crate::invalidation::ChangeFlags) {
            self.dirty_flags |= flags;
        }
        fn needs_layout(&self) -> bool {
            self.dirty_flags
                .contains(crate::invalidation::ChangeFlags::NEEDS_LAYOUT)
        }
        fn needs_paint(&self) -> bool {
            self.dirty_flags
                .contains(crate::invalidation::ChangeFlags::NEEDS_PAINT)
        }
        fn clear_dirty(&mut self) {
            self.dirty_flags = crate::invalidation::ChangeFlags::empty();
        }
    };
}
pub(crate) use impl_dirty_flags;

pub use collapsible_box::{
    collapsible_box, AnimatedProperty, CollapsibleBox, CollapsibleConfig, TITLE_SUFFIX,
};
pub use column::{column, Column};
pub use content_area::ContentArea;
pub use label::{label, Label, TextAlign};
pub use toggle_button::{ArrowDirection, ToggleAction, ToggleButton};
pub use widget::{Color, Event, EventResponse, MouseButton, Padding, Rect, Widget};
