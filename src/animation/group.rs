use std::time::Duration;

use super::property::{Playback, State};
use super::{Animatable, Direction, PropertyAnimation};

/// Plays several property animations in lockstep.
///
/// Each animation is tagged with the property `K` it drives. The group owns
/// a single clock and direction; children are sampled at
/// `min(group_time, child_duration)`, so the group lasts as long as its
/// longest child.
#[derive(Debug, Clone)]
pub struct ParallelAnimationGroup<K: Copy, T: Animatable = f32> {
    animations: Vec<(K, PropertyAnimation<T>)>,
    playback: Playback,
}

impl<K: Copy, T: Animatable> ParallelAnimationGroup<K, T> {
    pub fn new() -> Self {
        Self {
            animations: Vec::new(),
            playback: Playback::default(),
        }
    }

    pub fn add_animation(&mut self, property: K, animation: PropertyAnimation<T>) {
        self.animations.push((property, animation));
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn animation_at(&self, index: usize) -> Option<&PropertyAnimation<T>> {
        self.animations.get(index).map(|(_, anim)| anim)
    }

    pub fn animation_at_mut(&mut self, index: usize) -> Option<&mut PropertyAnimation<T>> {
        self.animations.get_mut(index).map(|(_, anim)| anim)
    }

    pub fn property_at(&self, index: usize) -> Option<K> {
        self.animations.get(index).map(|(property, _)| *property)
    }

    pub fn animations_mut(&mut self) -> impl Iterator<Item = &mut PropertyAnimation<T>> {
        self.animations.iter_mut().map(|(_, anim)| anim)
    }

    /// Longest child duration in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.animations
            .iter()
            .map(|(_, anim)| anim.duration_ms())
            .max()
            .unwrap_or(0)
    }

    pub fn direction(&self) -> Direction {
        self.playback.direction
    }

    /// Change direction. A running group turns around from where it is.
    pub fn set_direction(&mut self, direction: Direction) {
        self.playback.direction = direction;
    }

    pub fn state(&self) -> State {
        self.playback.state
    }

    pub fn is_running(&self) -> bool {
        self.playback.state == State::Running
    }

    pub fn current_time_ms(&self) -> f32 {
        self.playback.current_ms
    }

    /// Jump the shared clock to `time_ms`, clamped to the group duration.
    /// The run state is left alone.
    pub fn set_current_time(&mut self, time_ms: f32) {
        self.playback.current_ms = time_ms.clamp(0.0, self.duration_ms() as f32);
        self.sync_children();
    }

    /// Start from the edge matching the direction, or resume if already running.
    pub fn start(&mut self) {
        let duration = self.duration_ms() as f32;
        self.playback.start(duration);
        self.sync_children();
    }

    pub fn stop(&mut self) {
        self.playback.state = State::Stopped;
    }

    /// Advance the shared clock. Returns true while the group keeps running.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let duration = self.duration_ms() as f32;
        let running = self.playback.advance(elapsed, duration);
        self.sync_children();
        running
    }

    /// Current value of every animation, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (K, T)> + '_ {
        self.animations
            .iter()
            .map(|(property, anim)| (*property, anim.current_value()))
    }

    fn sync_children(&mut self) {
        let time = self.playback.current_ms;
        for (_, anim) in &mut self.animations {
            anim.set_current_time(time);
        }
    }
}

impl<K: Copy, T: Animatable> Default for ParallelAnimationGroup<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
