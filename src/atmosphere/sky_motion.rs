//! Continuous sky animation driven by elapsed seconds: the moon's orbit,
//! slow breathing of the sun and moon lights, and the water color shimmer.
//!
//! None of this changes the derived environment; it is layered on top when
//! the environment is applied to a renderer.

use super::config::EnvironmentConfig;
use super::state::EnvironmentParameters;

/// Animated sky values for one moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyMotion {
    /// Moon disc position, present while the disc is visible.
    pub moon_position: Option<[f32; 3]>,
    /// Breathing sun intensity, present while the sun is visible.
    pub sun_intensity: Option<f32>,
    /// Breathing moonlight intensity, present while the moonlight is visible.
    pub moon_light_intensity: Option<f32>,
    /// Shimmering water color.
    pub water_color: [f32; 3],
}

/// Moon disc position on its elliptical orbit at `seconds`.
pub fn compute_moon_position(seconds: f64, config: &EnvironmentConfig) -> [f32; 3] {
    let moon = &config.moon;
    let angle = seconds * moon.orbit_rate as f64;
    [
        moon.orbit_radius[0] * angle.cos() as f32,
        moon.orbit_height,
        -moon.orbit_radius[1] * angle.sin() as f32,
    ]
}

/// Water color at `seconds`, around the day or night base color.
pub fn compute_water_shimmer(seconds: f64, is_day: bool, config: &EnvironmentConfig) -> [f32; 3] {
    let shimmer = &config.water_shimmer;
    let base = shimmer.base.pick(is_day);
    let amplitude = shimmer.amplitude.pick(is_day);
    let phase = seconds * shimmer.rate as f64;
    std::array::from_fn(|i| {
        base[i] + (phase * shimmer.channel_rates[i] as f64).sin() as f32 * amplitude[i]
    })
}

/// Evaluate every animated sky value for `params` at `seconds`.
pub fn compute_sky_motion(
    params: &EnvironmentParameters,
    seconds: f64,
    config: &EnvironmentConfig,
) -> SkyMotion {
    let lights = &config.lights;
    SkyMotion {
        moon_position: params.moon.visible.then(|| compute_moon_position(seconds, config)),
        sun_intensity: params.sun.visible.then(|| lights.sun_breathing.sample(seconds)),
        moon_light_intensity: params
            .moon_light
            .visible
            .then(|| lights.moon_breathing.sample(seconds)),
        water_color: compute_water_shimmer(seconds, params.is_day, config),
    }
}
