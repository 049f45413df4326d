//! Day/night clock.

use std::time::Duration;

use super::config::DayNightConfig;
use crate::core::{Error, Result};

/// Time of day at and after which it is night.
pub const NIGHT_PIVOT: f32 = 0.5;

/// Outcome of a manual day/night toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayNightToggle {
    /// Whether it is now night.
    pub is_night: bool,
    /// How long the host may take to present the change.
    pub transition: Duration,
}

/// Tracks the time-of-day scalar `t` (0 = full day, 1 = full night) and the
/// optional automatic cycle.
///
/// Time is measured in seconds from a [`crate::core::time::TimeSource`]; the
/// clock itself never reads the system time.
#[derive(Clone, Debug)]
pub struct DayNightClock {
    /// Current time of day, in `[0.0, 1.0]`.
    time_of_day: f32,
    is_night: bool,
    auto_cycle: bool,
    /// Real seconds per full cycle.
    cycle_duration: f32,
    /// Timestamp of the last auto-cycle advance.
    last_update: f64,
    transition: Duration,
}

impl DayNightClock {
    /// Create a clock at full day with the cycle stopped.
    pub fn new(cycle_duration: f32) -> Result<Self> {
        validate_cycle_duration(cycle_duration)?;
        Ok(Self {
            time_of_day: 0.0,
            is_night: false,
            auto_cycle: false,
            cycle_duration,
            last_update: 0.0,
            transition: Duration::from_secs(1),
        })
    }

    /// Create a clock from configuration, stamped at `now` seconds.
    pub fn from_config(config: &DayNightConfig, now: f64) -> Result<Self> {
        config.validate()?;
        let mut clock = Self::new(config.cycle_duration)?;
        clock.set(config.start_time);
        clock.auto_cycle = config.auto_cycle;
        clock.last_update = now;
        clock.transition = Duration::from_secs_f32(config.transition_seconds);
        Ok(clock)
    }

    /// Current time of day.
    #[inline]
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.is_night
    }

    /// Whether the automatic cycle is running.
    #[inline]
    pub fn auto_cycle(&self) -> bool {
        self.auto_cycle
    }

    #[inline]
    pub fn cycle_duration(&self) -> f32 {
        self.cycle_duration
    }

    /// Change the cycle length. The current time of day is kept.
    pub fn set_cycle_duration(&mut self, cycle_duration: f32) -> Result<()> {
        validate_cycle_duration(cycle_duration)?;
        self.cycle_duration = cycle_duration;
        Ok(())
    }

    /// Jump to time of day `t`, clamped to `[0, 1]`.
    pub fn set(&mut self, t: f32) {
        self.time_of_day = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.is_night = self.time_of_day >= NIGHT_PIVOT;
    }

    /// Flip between day and night, snapping to full day (`0.0`) or full
    /// night (`1.0`).
    pub fn toggle_day_night(&mut self) -> DayNightToggle {
        self.is_night = !self.is_night;
        self.time_of_day = if self.is_night { 1.0 } else { 0.0 };
        log::debug!("Day/night toggled: night={}", self.is_night);
        DayNightToggle { is_night: self.is_night, transition: self.transition }
    }

    /// Start or stop the automatic cycle. Elapsed time is measured from `now`.
    pub fn toggle_cycle(&mut self, now: f64) -> bool {
        self.auto_cycle = !self.auto_cycle;
        self.last_update = now;
        log::debug!("Day/night auto-cycle: {}", self.auto_cycle);
        self.auto_cycle
    }

    /// Advance the cycle by `elapsed` seconds. No-op while the cycle is
    /// stopped. Returns whether the time of day was advanced.
    pub fn advance(&mut self, elapsed: f64) -> bool {
        if !self.auto_cycle {
            return false;
        }
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        let t = (self.time_of_day as f64 + elapsed / self.cycle_duration as f64).rem_euclid(1.0);
        let t = t as f32;
        // Rounding to f32 can land exactly on 1.0
        self.time_of_day = if t >= 1.0 { 0.0 } else { t };
        self.is_night = self.time_of_day >= NIGHT_PIVOT;
        true
    }

    /// Advance using the time elapsed since the previous tick.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.auto_cycle {
            return false;
        }
        let elapsed = now - self.last_update;
        self.last_update = now;
        self.advance(elapsed)
    }
}

fn validate_cycle_duration(cycle_duration: f32) -> Result<()> {
    if cycle_duration.is_finite() && cycle_duration > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "cycle_duration must be positive, got {cycle_duration}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
