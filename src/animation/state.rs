use std::time::Duration;

use super::{Animatable, Transition};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// Retargetable tween: each `animate_to` starts from the current value.
///
/// Used for small state-driven effects such as hover highlights, where the
/// target changes at arbitrary times.
pub struct AnimationState<T: Animatable> {
    current: T,
    target: T,
    start: T,
    /// Milliseconds since the last retarget
    elapsed_ms: f32,
    transition: Transition,
}

impl<T: Animatable> AnimationState<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            elapsed_ms: f32::INFINITY,
            transition,
        }
    }

    /// Start animating to a new target value
    pub fn animate_to(&mut self, new_target: T) {
        // Don't restart if we're already animating to this target
        if new_target == self.target {
            return;
        }
        self.start = self.current.clone();
        self.target = new_target;
        self.elapsed_ms = 0.0;
    }

    /// Advance the animation by `elapsed` and report whether the value changed
    pub fn advance(&mut self, elapsed: Duration) -> AdvanceResult<T> {
        if !self.is_animating() {
            return AdvanceResult::NoChange;
        }

        self.elapsed_ms += elapsed.as_secs_f32() * 1000.0;
        let active_ms = (self.elapsed_ms - self.transition.delay_ms).max(0.0);
        if active_ms <= 0.0 {
            // Still in delay period
            return AdvanceResult::NoChange;
        }

        let t = if self.transition.duration_ms <= 0.0 {
            1.0
        } else {
            (active_ms / self.transition.duration_ms).min(1.0)
        };
        let new_value = T::lerp(&self.start, &self.target, self.transition.timing.evaluate(t));

        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed_ms < self.transition.delay_ms + self.transition.duration_ms
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.elapsed_ms = f32::INFINITY;
    }
}
