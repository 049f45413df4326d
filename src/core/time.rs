//! Time sources and frame timing
//!
//! The world never reads the wall clock directly except through a
//! [`TimeSource`]. Hosts normally use [`MonotonicClock`]; tests and headless
//! tools drive a [`ManualClock`] so time is fully reproducible.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic clock reporting seconds since an arbitrary fixed origin.
pub trait TimeSource {
    /// Seconds elapsed since the source's origin. Never decreases.
    fn now_seconds(&self) -> f64;
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually advanced time source.
///
/// Clones share the same underlying counter, so a test can keep one handle
/// while the world owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `seconds`. Negative values are ignored.
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Move time forward by a [`Duration`].
    pub fn advance_by(&self, duration: Duration) {
        self.advance(duration.as_secs_f64());
    }
}

impl TimeSource for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}

/// Produces the per-frame `delta_time` handed to `World::update`.
///
/// Deltas are capped at `max_delta` so a stalled frame (window drag,
/// debugger pause) does not teleport wandering entities.
pub struct FrameTimer<T: TimeSource = MonotonicClock> {
    source: T,
    last_frame: f64,
    delta: f32,
    max_delta: f32,
    frame_count: u64,
}

impl FrameTimer<MonotonicClock> {
    /// Create a frame timer over the wall clock.
    pub fn new() -> Self {
        Self::with_source(MonotonicClock::new())
    }
}

impl Default for FrameTimer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameTimer<T> {
    /// Default cap on a single frame's delta, in seconds.
    pub const DEFAULT_MAX_DELTA: f32 = 0.25;

    pub fn with_source(source: T) -> Self {
        let last_frame = source.now_seconds();
        Self {
            source,
            last_frame,
            delta: 0.0,
            max_delta: Self::DEFAULT_MAX_DELTA,
            frame_count: 0,
        }
    }

    /// Override the delta cap.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }

    /// Call once per frame; returns the capped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = self.source.now_seconds();
        let raw = (now - self.last_frame).max(0.0) as f32;
        self.last_frame = now;
        self.delta = raw.min(self.max_delta);
        self.frame_count += 1;
        self.delta
    }

    /// Delta of the most recent tick, in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Total number of ticks.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(2.5);
        assert_eq!(clock.now_seconds(), 2.5);
    }

    #[test]
    fn test_manual_clock_ignores_negative() {
        let clock = ManualClock::new();
        clock.advance(1.0);
        clock.advance(-5.0);
        assert_eq!(clock.now_seconds(), 1.0);
    }

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now_seconds();
        let b = clock.now_seconds();
        assert!(b >= a);
    }

    #[test]
    fn test_frame_timer_delta() {
        let clock = ManualClock::new();
        let mut timer = FrameTimer::with_source(clock.clone());
        clock.advance(0.016);
        let dt = timer.tick();
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_frame_timer_caps_stalls() {
        let clock = ManualClock::new();
        let mut timer = FrameTimer::with_source(clock.clone());
        clock.advance_by(Duration::from_secs(3));
        assert_eq!(timer.tick(), FrameTimer::<ManualClock>::DEFAULT_MAX_DELTA);
    }
}
