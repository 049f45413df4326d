//! Environment configuration: every day and night constant in one place.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::math::Lerp;

/// Linear RGB from a `0xRRGGBB` literal.
pub const fn rgb_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// ---------------------------------------------------------------------------
// DayNight pair
// ---------------------------------------------------------------------------

/// A value at full day (`t = 0`) and full night (`t = 1`).
///
/// Read either as a ramp ([`at`](Self::at), linear in `t`) or as a hard
/// switch ([`pick`](Self::pick)), depending on the parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayNight<T> {
    pub day: T,
    pub night: T,
}

impl<T: Copy> DayNight<T> {
    pub const fn new(day: T, night: T) -> Self {
        Self { day, night }
    }

    /// Day value while it is day, night value otherwise.
    #[inline]
    pub fn pick(&self, is_day: bool) -> T {
        if is_day { self.day } else { self.night }
    }
}

impl<T: Lerp + Copy> DayNight<T> {
    /// Linear blend from the day value to the night value.
    #[inline]
    pub fn at(&self, t: f32) -> T {
        self.day.lerp(&self.night, t)
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Clock parameters.
    pub day_night: DayNightConfig,
    /// Sun, moon, ambient and hemisphere lights.
    pub lights: LightConfig,
    /// Sky dome gradients.
    pub sky: SkyConfig,
    /// Exponential-squared fog presets.
    pub fog: FogConfig,
    /// Terrain surface material.
    pub terrain_material: MaterialConfig,
    /// Water surface material.
    pub water_material: MaterialConfig,
    /// Star field.
    pub stars: StarConfig,
    /// Moon disc.
    pub moon: MoonConfig,
    /// Water color shimmer.
    pub water_shimmer: WaterShimmerConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            day_night: DayNightConfig::default(),
            lights: LightConfig::default(),
            sky: SkyConfig::default(),
            fog: FogConfig::default(),
            terrain_material: MaterialConfig::terrain(),
            water_material: MaterialConfig::water(),
            stars: StarConfig::default(),
            moon: MoonConfig::default(),
            water_shimmer: WaterShimmerConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Reject configurations the clock or derivation cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.day_night.validate()?;
        for density in [self.fog.density.day, self.fog.density.night] {
            if !(density.is_finite() && density >= 0.0) {
                return Err(Error::invalid_config(format!(
                    "fog density must be non-negative, got {density}"
                )));
            }
        }
        if !(self.stars.min_radius > 0.0 && self.stars.min_radius <= self.stars.max_radius) {
            return Err(Error::invalid_config(format!(
                "star shell radii must satisfy 0 < min <= max, got {}..{}",
                self.stars.min_radius, self.stars.max_radius
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Day/night clock parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightConfig {
    /// Real seconds for one full day-to-day cycle. Must be positive.
    pub cycle_duration: f32,
    /// Initial time of day (0 = day, 1 = night).
    pub start_time: f32,
    /// Whether the automatic cycle starts enabled.
    pub auto_cycle: bool,
    /// Transition hint returned by a manual toggle, in seconds.
    pub transition_seconds: f32,
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            cycle_duration: 60.0,
            start_time: 0.0,
            auto_cycle: false,
            transition_seconds: 1.0,
        }
    }
}

impl DayNightConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.cycle_duration.is_finite() && self.cycle_duration > 0.0) {
            return Err(Error::invalid_config(format!(
                "cycle_duration must be positive, got {}",
                self.cycle_duration
            )));
        }
        if !(0.0..=1.0).contains(&self.start_time) {
            return Err(Error::invalid_config(format!(
                "start_time must be in [0, 1], got {}",
                self.start_time
            )));
        }
        if !(self.transition_seconds.is_finite() && self.transition_seconds >= 0.0) {
            return Err(Error::invalid_config("transition_seconds must be non-negative"));
        }
        Ok(())
    }
}

/// Slow sinusoidal variation of a light's intensity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breathing {
    pub base: f32,
    pub amplitude: f32,
    /// Angular rate in radians per second.
    pub rate: f32,
}

impl Breathing {
    #[inline]
    pub fn sample(&self, seconds: f64) -> f32 {
        self.base + (seconds * self.rate as f64).sin() as f32 * self.amplitude
    }
}

/// Scene lights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub sun_color: [f32; 3],
    /// Sun intensity ramp.
    pub sun_intensity: DayNight<f32>,
    pub sun_position: [f32; 3],
    /// Breathing applied while the sun is visible.
    pub sun_breathing: Breathing,

    pub moon_color: [f32; 3],
    /// Moonlight intensity ramp.
    pub moon_intensity: DayNight<f32>,
    pub moon_position: [f32; 3],
    /// Breathing applied while the moonlight is visible.
    pub moon_breathing: Breathing,

    /// Ambient intensity ramp.
    pub ambient_intensity: DayNight<f32>,
    /// Ambient color, switched at the pivot.
    pub ambient_color: DayNight<[f32; 3]>,

    /// Hemisphere intensity ramp.
    pub hemisphere_intensity: DayNight<f32>,
    pub hemisphere_sky_color: [f32; 3],
    pub hemisphere_ground_color: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            sun_color: rgb_hex(0xffffaa),
            sun_intensity: DayNight::new(1.5, 0.0),
            sun_position: [100.0, 100.0, 50.0],
            sun_breathing: Breathing { base: 1.1, amplitude: 0.1, rate: 0.05 },

            moon_color: rgb_hex(0xb0c4de),
            moon_intensity: DayNight::new(0.0, 0.6),
            moon_position: [-100.0, 100.0, 50.0],
            moon_breathing: Breathing { base: 0.3, amplitude: 0.05, rate: 0.025 },

            ambient_intensity: DayNight::new(0.7, 0.1),
            ambient_color: DayNight::new(rgb_hex(0xd6e6ff), rgb_hex(0x102040)),

            hemisphere_intensity: DayNight::new(0.5, 0.1),
            hemisphere_sky_color: rgb_hex(0x0088ff),
            hemisphere_ground_color: rgb_hex(0x00ff88),
        }
    }
}

/// Sky dome gradient colors, zenith and horizon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub top_color: DayNight<[f32; 3]>,
    pub bottom_color: DayNight<[f32; 3]>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            top_color: DayNight::new(rgb_hex(0x0077ff), rgb_hex(0x000010)),
            bottom_color: DayNight::new(rgb_hex(0xffffff), rgb_hex(0x0a1025)),
        }
    }
}

/// Fog presets, switched at the pivot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub color: DayNight<[f32; 3]>,
    pub density: DayNight<f32>,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: DayNight::new(rgb_hex(0xafc5d3), rgb_hex(0x101824)),
            density: DayNight::new(0.003, 0.004),
        }
    }
}

/// Surface material tint. Color and env-map intensity switch at the pivot;
/// roughness ramps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub color: DayNight<[f32; 3]>,
    pub roughness: DayNight<f32>,
    pub env_map_intensity: DayNight<f32>,
}

impl MaterialConfig {
    pub fn terrain() -> Self {
        Self {
            color: DayNight::new(rgb_hex(0x2a6b30), rgb_hex(0x0e2712)),
            roughness: DayNight::new(0.8, 0.5),
            env_map_intensity: DayNight::new(1.0, 0.3),
        }
    }

    pub fn water() -> Self {
        Self {
            color: DayNight::new([0.0, 0.47, 0.75], [0.02, 0.05, 0.2]),
            roughness: DayNight::new(0.1, 0.05),
            env_map_intensity: DayNight::new(1.0, 1.0),
        }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self::terrain()
    }
}

/// Star field parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// Opacity ramp, clamped to `max_opacity`.
    pub opacity: DayNight<f32>,
    pub max_opacity: f32,
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Chance per star per frame of picking a new twinkle brightness.
    pub twinkle_chance: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            opacity: DayNight::new(0.0, 1.5),
            max_opacity: 1.0,
            count: 2000,
            min_radius: 400.0,
            max_radius: 500.0,
            twinkle_chance: 0.01,
        }
    }
}

/// Moon disc parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    /// Emissive brightness ramp.
    pub brightness: DayNight<f32>,
    /// Orbit semi-axes on X and Z.
    pub orbit_radius: [f32; 2],
    pub orbit_height: f32,
    /// Orbit angular rate in radians per second.
    pub orbit_rate: f32,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            brightness: DayNight::new(0.0, 1.2),
            orbit_radius: [200.0, 300.0],
            orbit_height: 150.0,
            orbit_rate: 0.01,
        }
    }
}

/// Per-channel sinusoidal drift of the water color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterShimmerConfig {
    pub base: DayNight<[f32; 3]>,
    pub amplitude: DayNight<[f32; 3]>,
    /// Per-channel frequency multipliers.
    pub channel_rates: [f32; 3],
    /// Shimmer phase advance per second.
    pub rate: f32,
}

impl Default for WaterShimmerConfig {
    fn default() -> Self {
        Self {
            base: DayNight::new([0.016, 0.47, 0.65], [0.05, 0.1, 0.3]),
            amplitude: DayNight::new([0.01, 0.02, 0.05], [0.01, 0.01, 0.03]),
            channel_rates: [1.0, 0.8, 0.6],
            rate: 0.5,
        }
    }
}
