//! Animated water plane.
//!
//! A flat grid at the water level, larger than the terrain so its edges are
//! never visible. Every vertex bobs on its own sine wave with a random phase,
//! amplitude and angular speed.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::core::{Error, Result};

/// Water plane shape and wave ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Grid cells per side.
    pub segments: u32,
    /// Plane edge length as a multiple of the world size.
    pub extent_factor: f32,
    pub amplitude_min: f32,
    pub amplitude_max: f32,
    /// Wave angular speed range, radians per second.
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            segments: 32,
            extent_factor: 2.0,
            amplitude_min: 0.1,
            amplitude_max: 0.2,
            speed_min: 0.016,
            speed_max: 0.048,
        }
    }
}

impl WaterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(Error::invalid_config("water needs at least one segment"));
        }
        if !(self.extent_factor.is_finite() && self.extent_factor > 0.0) {
            return Err(Error::invalid_config(format!(
                "water extent_factor must be positive, got {}",
                self.extent_factor
            )));
        }
        if !(self.amplitude_min >= 0.0 && self.amplitude_min <= self.amplitude_max)
            || !(self.speed_min >= 0.0 && self.speed_min <= self.speed_max)
        {
            return Err(Error::invalid_config("water amplitude/speed ranges are invalid"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Wave {
    angle: f32,
    amplitude: f32,
    speed: f32,
}

/// The water plane's animated vertex grid.
#[derive(Clone, Debug)]
pub struct WaterSurface {
    level: f32,
    extent: f32,
    segments: u32,
    waves: Vec<Wave>,
}

impl WaterSurface {
    /// Build a `(segments + 1)²` vertex grid centred on the origin at `level`.
    pub fn new<R: Rng + ?Sized>(config: &WaterConfig, world_size: f32, level: f32, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let side = config.segments as usize + 1;
        let waves = (0..side * side)
            .map(|_| Wave {
                angle: rng.r#gen::<f32>() * TAU,
                amplitude: config.amplitude_min + rng.r#gen::<f32>() * (config.amplitude_max - config.amplitude_min),
                speed: config.speed_min + rng.r#gen::<f32>() * (config.speed_max - config.speed_min),
            })
            .collect();
        Ok(Self {
            level,
            extent: world_size * config.extent_factor,
            segments: config.segments,
            waves,
        })
    }

    /// Advance every wave by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for wave in &mut self.waves {
            wave.angle = (wave.angle + wave.speed * dt) % TAU;
        }
    }

    /// Resting height of the plane.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Edge length of the plane.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn vertex_count(&self) -> usize {
        self.waves.len()
    }

    /// Vertical displacement of each vertex, row-major by X.
    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.waves.iter().map(|w| w.angle.sin() * w.amplitude)
    }

    /// World-space vertex positions, row-major by X.
    pub fn positions(&self) -> Vec<Vec3> {
        let side = self.segments as usize + 1;
        let step = self.extent / self.segments as f32;
        let half = self.extent * 0.5;
        self.offsets()
            .enumerate()
            .map(|(i, offset)| {
                let x = -half + (i / side) as f32 * step;
                let z = -half + (i % side) as f32 * step;
                Vec3::new(x, self.level + offset, z)
            })
            .collect()
    }
}
