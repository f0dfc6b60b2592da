//! A header button that animates a content area open and closed.
//!
//! The box is a vertical stack of a checkable [`ToggleButton`] and a
//! clipping [`ContentArea`]. Three height properties are animated in one
//! [`ParallelAnimationGroup`]:
//!
//! | index | property | start | end |
//! |---|---|---|---|
//! | 0 | box minimum height | collapsed | collapsed + content |
//! | 1 | box maximum height | collapsed | collapsed + content |
//! | 2 | content maximum height | 0 | content |
//!
//! Expanding plays the group forward, collapsing plays it backward. The
//! start and end values are computed once, when content is attached.
//!
//! ```
//! use collapsible::prelude::*;
//!
//! let mut section = CollapsibleBox::new("Details", 250);
//! section.set_content_layout(column().child(label("line 1")).child(label("line 2")));
//! assert!(!section.is_expanded());
//!
//! section.set_fold(false);
//! assert!(section.is_expanded());
//! assert_eq!(section.arrow_direction(), ArrowDirection::Down);
//! ```

use std::time::Duration;

use crate::animation::{Direction, ParallelAnimationGroup, PropertyAnimation, TimingFunction};
use crate::invalidation::{ChangeFlags, WidgetId};
use crate::layout::{Constraints, HeightBounds, Policy, Size, SizePolicy};
use crate::renderer::PaintContext;

use super::content_area::ContentArea;
use super::toggle_button::{ArrowDirection, ToggleAction, ToggleButton};
use super::widget::{Color, Event, EventResponse, Padding, Rect, Widget};

/// Appended to every title to tell the user the header is clickable.
pub const TITLE_SUFFIX: &str = " (点击展开/折叠)";

/// Property driven by one animation in the box's group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    /// Minimum height of the whole box
    MinimumHeight,
    /// Maximum height of the whole box
    MaximumHeight,
    /// Maximum height of the content area
    ContentMaximumHeight,
}

/// Appearance and timing of a [`CollapsibleBox`]
#[derive(Debug, Clone)]
pub struct CollapsibleConfig {
    /// Duration shared by all three height animations
    pub animation_duration_ms: u32,
    pub timing: TimingFunction,
    pub header_font_size: f32,
    pub header_padding: Padding,
    pub header_text_color: Color,
    pub header_background: Color,
    pub header_hover_background: Color,
}

impl CollapsibleConfig {
    pub fn animation_duration(mut self, duration_ms: u32) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn header_font_size(mut self, size: f32) -> Self {
        self.header_font_size = size;
        self
    }

    pub fn header_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.header_padding = padding.into();
        self
    }

    pub fn header_text_color(mut self, color: Color) -> Self {
        self.header_text_color = color;
        self
    }

    pub fn header_background(mut self, color: Color) -> Self {
        self.header_background = color;
        self
    }

    pub fn header_hover_background(mut self, color: Color) -> Self {
        self.header_hover_background = color;
        self
    }
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 250,
            timing: TimingFunction::Linear,
            header_font_size: 14.0,
            header_padding: Padding::symmetric(8.0, 6.0),
            header_text_color: Color::WHITE,
            header_background: Color::TRANSPARENT,
            header_hover_background: Color::rgba(1.0, 1.0, 1.0, 0.08),
        }
    }
}

/// Return `title` with [`TITLE_SUFFIX`] appended, unless it already ends with it.
pub fn suffixed_title(title: &str) -> String {
    if title.ends_with(TITLE_SUFFIX) {
        title.to_string()
    } else {
        format!("{title}{TITLE_SUFFIX}")
    }
}

pub struct CollapsibleBox {
    widget_id: WidgetId,
    dirty_flags: ChangeFlags,
    toggle: ToggleButton,
    content_area: ContentArea,
    /// The box's own min/max height, driven by animations 0 and 1
    height_bounds: HeightBounds,
    animation: ParallelAnimationGroup<AnimatedProperty>,
    animation_duration_ms: u32,
    /// Start/end values have been computed from attached content
    animations_programmed: bool,
    /// The group has taken control of the height properties
    animations_applied: bool,
    bounds: Rect,
}

impl CollapsibleBox {
    pub fn new(title: &str, animation_duration_ms: u32) -> Self {
        Self::with_config(
            title,
            CollapsibleConfig::default().animation_duration(animation_duration_ms),
        )
    }

    pub fn with_config(title: &str, config: CollapsibleConfig) -> Self {
        let toggle = ToggleButton::new(suffixed_title(title))
            .checkable(true)
            .arrow(ArrowDirection::Right)
            .font_size(config.header_font_size)
            .padding(config.header_padding)
            .text_color(config.header_text_color)
            .background(config.header_background)
            .hover_background(config.header_hover_background);

        let mut content_area = ContentArea::new()
            .with_size_policy(SizePolicy::new(Policy::Expanding, Policy::Fixed));
        content_area.set_min_height(0.0);
        content_area.set_max_height(0.0);

        let mut animation = ParallelAnimationGroup::new();
        for property in [
            AnimatedProperty::MinimumHeight,
            AnimatedProperty::MaximumHeight,
            AnimatedProperty::ContentMaximumHeight,
        ] {
            let mut anim = PropertyAnimation::new(0.0f32);
            anim.set_timing(config.timing.clone());
            animation.add_animation(property, anim);
        }

        Self {
            widget_id: WidgetId::next(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            toggle,
            content_area,
            height_bounds: HeightBounds::OPEN,
            animation,
            animation_duration_ms: config.animation_duration_ms,
            animations_programmed: false,
            animations_applied: false,
            bounds: Rect::default(),
        }
    }

    pub fn title(&self) -> &str {
        self.toggle.text()
    }

    pub fn animation_duration_ms(&self) -> u32 {
        self.animation_duration_ms
    }

    /// True when the header is checked, i.e. the box is (or is becoming) open.
    pub fn is_expanded(&self) -> bool {
        self.toggle.is_checked()
    }

    pub fn arrow_direction(&self) -> ArrowDirection {
        self.toggle.arrow_direction()
    }

    pub fn animation_direction(&self) -> Direction {
        self.animation.direction()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn animation(&self) -> &ParallelAnimationGroup<AnimatedProperty> {
        &self.animation
    }

    pub fn toggle_button(&self) -> &ToggleButton {
        &self.toggle
    }

    pub fn content_area(&self) -> &ContentArea {
        &self.content_area
    }

    pub fn content(&self) -> Option<&dyn Widget> {
        self.content_area.content()
    }

    pub fn min_height(&self) -> f32 {
        self.height_bounds.min
    }

    pub fn max_height(&self) -> f32 {
        self.height_bounds.max
    }

    /// Attach `content` below the header and program the height animations.
    ///
    /// Returns the previously attached content, if any. Animation values are
    /// derived from the natural heights at the time of this call and are not
    /// recomputed when the content later changes size.
    pub fn set_content_layout(&mut self, content: impl Widget + 'static) -> Option<Box<dyn Widget>> {
        // Measured before the swap: the visible content share belongs to the old child
        let collapsed_height = self.size_hint().height - self.content_area.size_hint().height;

        let previous = self.content_area.set_content(Box::new(content));
        if previous.is_some() {
            log::debug!(
                "collapsible box {:?}: replacing content",
                self.widget_id
            );
        }

        let content_height = self
            .content_area
            .content()
            .map(|content| content.size_hint().height)
            .unwrap_or_default();

        let duration = self.animation_duration_ms;
        for anim in self.animation.animations_mut() {
            anim.set_duration(duration);
            anim.set_start_value(collapsed_height);
            anim.set_end_value(collapsed_height + content_height);
        }

        // The content area tracks the child alone, not the whole box
        let last = self.animation.animation_count().saturating_sub(1);
        if let Some(content_anim) = self.animation.animation_at_mut(last) {
            content_anim.set_duration(duration);
            content_anim.set_start_value(0.0);
            content_anim.set_end_value(content_height);
        }

        log::debug!(
            "collapsible box {:?}: collapsed height {}, content height {}",
            self.widget_id,
            collapsed_height,
            content_height
        );

        self.animations_programmed = true;
        if !self.animations_applied && self.toggle.is_checked() {
            // Unfolded before there was anything to show: land on the open end
            self.animation.set_direction(Direction::Forward);
            self.animation.set_current_time(self.animation.duration_ms() as f32);
            self.apply_animation_values();
        } else if self.animations_applied {
            self.apply_animation_values();
        }
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        previous
    }

    /// Fold (`true`) or unfold (`false`) the box.
    ///
    /// Does nothing if the box is already in the requested state. Otherwise
    /// the transition is started from the current checked state and only then
    /// is the checked state committed.
    pub fn set_fold(&mut self, fold: bool) {
        if self.toggle.is_checked() != fold {
            return;
        }
        self.start_transition();
        self.toggle.set_checked(!fold);
    }

    /// Flip between folded and unfolded, as a click on the header does.
    pub fn toggle(&mut self) {
        self.set_fold(self.is_expanded());
    }

    /// Point the arrow and the animation towards the opposite of the current
    /// checked state, then start (or turn around) the group.
    fn start_transition(&mut self) {
        let expanding = !self.toggle.is_checked();
        self.play_towards(expanding);
    }

    /// True when the animation already heads towards the checked state.
    fn follows_checked(&self) -> bool {
        let expected = if self.toggle.is_checked() {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.animation.direction() == expected
    }

    /// Point the arrow and animation at the current checked state.
    fn settle_to_checked(&mut self) {
        let expanded = self.toggle.is_checked();
        self.play_towards(expanded);
    }

    fn play_towards(&mut self, expanded: bool) {
        let (arrow, direction) = if expanded {
            (ArrowDirection::Down, Direction::Forward)
        } else {
            (ArrowDirection::Right, Direction::Backward)
        };
        log::debug!(
            "collapsible box {:?}: {}",
            self.widget_id,
            if expanded { "expanding" } else { "collapsing" }
        );

        self.toggle.set_arrow_direction(arrow);
        self.animation.set_direction(direction);
        self.animation.start();
        self.apply_animation_values();
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
    }

    fn apply_animation_values(&mut self) {
        if !self.animations_programmed {
            return;
        }
        self.animations_applied = true;
        for (property, value) in self.animation.values() {
            match property {
                AnimatedProperty::MinimumHeight => self.height_bounds.min = value,
                AnimatedProperty::MaximumHeight => self.height_bounds.max = value,
                AnimatedProperty::ContentMaximumHeight => {
                    self.content_area.set_max_height(value)
                }
            }
        }
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
    }
}

impl Widget for CollapsibleBox {
    fn size_hint(&self) -> Size {
        let header = self.toggle.size_hint();
        let content = self.content_area.size_hint();
        Size::new(
            header.width.max(content.width),
            header.height + content.height,
        )
    }

    fn size_policy(&self) -> SizePolicy {
        SizePolicy::new(Policy::Expanding, Policy::Preferred)
    }

    fn advance_animations(&mut self, elapsed: Duration) -> bool {
        let mut any_animating = false;
        if self.animation.is_running() {
            self.animation.advance(elapsed);
            self.apply_animation_values();
            log::trace!(
                "collapsible box {:?}: t={}ms height {}..{}",
                self.widget_id,
                self.animation.current_time_ms(),
                self.height_bounds.min,
                self.height_bounds.max
            );
            any_animating |= self.animation.is_running();
        }
        any_animating |= self.toggle.advance_animations(elapsed);
        any_animating |= self.content_area.advance_animations(elapsed);
        any_animating
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        let bounded = constraints.with_height_bounds(self.height_bounds);
        let hint = self.size_hint();
        let width = self.size_policy().resolve_width(hint.width, &bounded);

        let child_constraints = Constraints::new(width, 0.0, width, f32::INFINITY);
        let header = self.toggle.layout(child_constraints);
        let content = self.content_area.layout(child_constraints);

        let height = (header.height + content.height)
            .max(bounded.min_height)
            .min(bounded.max_height);

        self.bounds.width = width;
        self.bounds.height = height;
        let (x, y) = (self.bounds.x, self.bounds.y);
        self.set_origin(x, y);
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        Size::new(width, height)
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.push_clip(self.bounds);
        self.toggle.paint(ctx);
        self.content_area.paint(ctx);
        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match self.toggle.handle_event(event) {
            Some(ToggleAction::Pressed) => {
                self.start_transition();
                EventResponse::Handled
            }
            Some(ToggleAction::Clicked | ToggleAction::Cancelled) => {
                // A set_fold during the press may have committed already
                if !self.follows_checked() {
                    self.settle_to_checked();
                }
                self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
                EventResponse::Handled
            }
            None => self.content_area.event(event),
        }
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.toggle.set_origin(x, y);
        let header_height = self.toggle.bounds().height;
        self.content_area.set_origin(x, y + header_height);
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
            || self.toggle.needs_layout()
            || self.content_area.needs_layout()
    }

    fn needs_paint(&self) -> bool {
        self.dirty_flags.contains(ChangeFlags::NEEDS_PAINT)
            || self.toggle.needs_paint()
            || self.content_area.needs_paint()
    }

    fn clear_dirty(&mut self) {
        self.dirty_flags = ChangeFlags::empty();
        self.toggle.clear_dirty();
        self.content_area.clear_dirty();
    }
}

/// Create a collapsible box with the default 250 ms animation
pub fn collapsible_box(title: &str) -> CollapsibleBox {
    CollapsibleBox::new(title, CollapsibleConfig::default().animation_duration_ms)
}
