use std::time::Duration;

use super::{Animatable, TimingFunction};

/// Playback direction of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Current time moves from 0 towards the duration (start -> end)
    #[default]
    Forward,
    /// Current time moves from the duration towards 0 (end -> start)
    Backward,
}

/// Run state of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Stopped,
    Running,
}

/// Clock position shared by single animations and groups.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Playback {
    pub(crate) direction: Direction,
    pub(crate) state: State,
    pub(crate) current_ms: f32,
}

impl Playback {
    /// Start from the edge matching the direction, or keep going if already running.
    pub(crate) fn start(&mut self, duration_ms: f32) {
        if self.state == State::Running {
            return;
        }
        self.current_ms = match self.direction {
            Direction::Forward => 0.0,
            Direction::Backward => duration_ms,
        };
        self.state = State::Running;
        if duration_ms <= 0.0 {
            self.state = State::Stopped;
        }
    }

    /// Move the clock by `elapsed`. Returns true while still running.
    pub(crate) fn advance(&mut self, elapsed: Duration, duration_ms: f32) -> bool {
        if self.state != State::Running {
            return false;
        }
        let delta = elapsed.as_secs_f32() * 1000.0;
        match self.direction {
            Direction::Forward => {
                self.current_ms += delta;
                if self.current_ms >= duration_ms {
                    self.current_ms = duration_ms;
                    self.state = State::Stopped;
                }
            }
            Direction::Backward => {
                self.current_ms -= delta;
                if self.current_ms <= 0.0 {
                    self.current_ms = 0.0;
                    self.state = State::Stopped;
                }
            }
        }
        self.state == State::Running
    }

    pub(crate) fn progress(&self, duration_ms: f32) -> f32 {
        if duration_ms <= 0.0 {
            return match self.direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            };
        }
        (self.current_ms / duration_ms).clamp(0.0, 1.0)
    }
}

/// An interpolator from a start value to an end value over a fixed duration.
///
/// The clock only moves when [`advance`](Self::advance) is called, so the
/// owner decides where time comes from (a frame timer, a test, ...).
#[derive(Debug, Clone)]
pub struct PropertyAnimation<T: Animatable> {
    start_value: T,
    end_value: T,
    duration_ms: u32,
    timing: TimingFunction,
    playback: Playback,
}

impl<T: Animatable> PropertyAnimation<T> {
    /// Create an animation that holds `value` until programmed otherwise.
    pub fn new(value: T) -> Self {
        Self {
            start_value: value.clone(),
            end_value: value,
            duration_ms: 0,
            timing: TimingFunction::Linear,
            playback: Playback::default(),
        }
    }

    pub fn start_value(&self) -> &T {
        &self.start_value
    }

    pub fn end_value(&self) -> &T {
        &self.end_value
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn set_start_value(&mut self, value: T) {
        self.start_value = value;
    }

    pub fn set_end_value(&mut self, value: T) {
        self.end_value = value;
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
        self.playback.current_ms = self.playback.current_ms.min(duration_ms as f32);
    }

    pub fn set_timing(&mut self, timing: TimingFunction) {
        self.timing = timing;
    }

    pub fn direction(&self) -> Direction {
        self.playback.direction
    }

    /// Change direction. A running animation turns around in place.
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

    /// Jump to a position on the timeline without changing the run state.
    pub fn set_current_time(&mut self, time_ms: f32) {
        self.playback.current_ms = time_ms.clamp(0.0, self.duration_ms as f32);
    }

    /// Start playback, or keep the current position if already running.
    pub fn start(&mut self) {
        self.playback.start(self.duration_ms as f32);
    }

    pub fn stop(&mut self) {
        self.playback.state = State::Stopped;
    }

    /// Advance the clock. Returns true while the animation keeps running.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.playback.advance(elapsed, self.duration_ms as f32)
    }

    /// Interpolated value at the current time.
    pub fn current_value(&self) -> T {
        let t = self.playback.progress(self.duration_ms as f32);
        T::lerp(&self.start_value, &self.end_value, self.timing.evaluate(t))
    }
}
