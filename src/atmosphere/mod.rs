//! Day/night environment.
//!
//! A single time-of-day scalar (0 = full day, 1 = full night) drives every
//! environment render parameter: sky domes, lights, fog, star opacity, moon
//! brightness and surface material tints. [`derive`] computes them as a pure
//! function; [`EnvironmentSystem`] owns the clock and keeps the derived
//! parameters current.

pub mod config;
pub mod fog;
pub mod sky_motion;
pub mod stars;
pub mod state;
pub mod time;

// Re-exports
pub use config::{
    rgb_hex, Breathing, DayNight, DayNightConfig, EnvironmentConfig, FogConfig, LightConfig,
    MaterialConfig, MoonConfig, SkyConfig, StarConfig, WaterShimmerConfig,
};
pub use sky_motion::SkyMotion;
pub use stars::{Star, StarField};
pub use state::{
    EnvironmentParameters, EnvironmentUniform, FogState, HemisphereState, LightState,
    MaterialState, MoonDiscState, SkyState,
};
pub use time::{DayNightClock, DayNightToggle, NIGHT_PIVOT};

use rand::Rng;

use crate::core::Result;

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Compute every environment parameter for time of day `t`.
///
/// `t` is clamped into `[0, 1]`. Intensities and roughness ramp linearly
/// with `t`; colors, fog presets, dome visibility and the terrain env-map
/// intensity switch at [`NIGHT_PIVOT`].
pub fn derive(t: f32, config: &EnvironmentConfig) -> EnvironmentParameters {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let is_day = t < NIGHT_PIVOT;
    let lights = &config.lights;

    let sky = SkyState {
        day_visible: is_day,
        night_visible: !is_day,
        blend: t,
        top_color: config.sky.top_color.pick(is_day),
        bottom_color: config.sky.bottom_color.pick(is_day),
    };

    // The sun ramp runs over the whole range; past the pivot it is hidden.
    let sun = LightState {
        visible: is_day,
        intensity: lights.sun_intensity.at(t),
        color: lights.sun_color,
    };
    let moon_light = LightState {
        visible: true,
        intensity: lights.moon_intensity.at(t),
        color: lights.moon_color,
    };
    let ambient = LightState {
        visible: true,
        intensity: lights.ambient_intensity.at(t),
        color: lights.ambient_color.pick(is_day),
    };
    let hemisphere = HemisphereState {
        intensity: lights.hemisphere_intensity.at(t),
        sky_color: lights.hemisphere_sky_color,
        ground_color: lights.hemisphere_ground_color,
    };

    let fog = FogState {
        color: config.fog.color.pick(is_day),
        density: config.fog.density.pick(is_day),
    };

    let star_opacity = config.stars.opacity.at(t).min(config.stars.max_opacity);
    let moon = MoonDiscState {
        visible: true,
        brightness: config.moon.brightness.at(t),
    };

    EnvironmentParameters {
        time_of_day: t,
        is_day,
        sky,
        sun,
        moon_light,
        ambient,
        hemisphere,
        fog,
        star_opacity,
        moon,
        terrain_material: material(&config.terrain_material, t, is_day),
        water_material: material(&config.water_material, t, is_day),
    }
}

fn material(config: &MaterialConfig, t: f32, is_day: bool) -> MaterialState {
    MaterialState {
        color: config.color.pick(is_day),
        roughness: config.roughness.at(t),
        env_map_intensity: config.env_map_intensity.pick(is_day),
    }
}

// ---------------------------------------------------------------------------
// EnvironmentSystem
// ---------------------------------------------------------------------------

/// Owns the day/night clock and the parameters derived from it.
///
/// Parameters are recomputed whenever the clock changes, never per frame
/// otherwise.
pub struct EnvironmentSystem {
    config: EnvironmentConfig,
    clock: DayNightClock,
    params: EnvironmentParameters,
    stars: StarField,
}

impl EnvironmentSystem {
    /// Create a new environment from the given configuration. `now` stamps
    /// the clock; `rng` lays out the star field.
    pub fn new<R: Rng + ?Sized>(config: EnvironmentConfig, now: f64, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let clock = DayNightClock::from_config(&config.day_night, now)?;
        let params = derive(clock.time_of_day(), &config);
        let stars = StarField::generate(&config.stars, rng);
        log::debug!(
            "Environment ready: t={:.2}, cycle {}s, {} stars",
            clock.time_of_day(),
            clock.cycle_duration(),
            stars.len()
        );
        Ok(Self { config, clock, params, stars })
    }

    /// Advance the auto-cycle to `now`. Returns whether the parameters changed.
    pub fn update(&mut self, now: f64) -> bool {
        let advanced = self.clock.tick(now);
        if advanced {
            self.recompute();
        }
        advanced
    }

    /// Current environment parameters.
    #[inline]
    pub fn params(&self) -> &EnvironmentParameters {
        &self.params
    }

    /// Build a GPU-ready uniform from the current parameters.
    pub fn uniform(&self) -> EnvironmentUniform {
        EnvironmentUniform::pack(
            &self.params,
            self.config.lights.sun_position,
            self.config.lights.moon_position,
        )
    }

    /// Immutable reference to the configuration.
    #[inline]
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &DayNightClock {
        &self.clock
    }

    #[inline]
    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    /// Snap to full day or full night and recompute.
    pub fn toggle_day_night(&mut self) -> DayNightToggle {
        let toggle = self.clock.toggle_day_night();
        self.recompute();
        toggle
    }

    /// Start or stop the auto-cycle.
    pub fn toggle_cycle(&mut self, now: f64) -> bool {
        self.clock.toggle_cycle(now)
    }

    /// Set time of day and immediately recompute.
    pub fn set_time(&mut self, t: f32) {
        self.clock.set(t);
        self.recompute();
    }

    /// Change the auto-cycle length.
    pub fn set_cycle_duration(&mut self, cycle_duration: f32) -> Result<()> {
        self.clock.set_cycle_duration(cycle_duration)
    }

    /// Continuous sky animation at `seconds`.
    pub fn sky_motion(&self, seconds: f64) -> SkyMotion {
        sky_motion::compute_sky_motion(&self.params, seconds, &self.config)
    }

    /// Let the star field twinkle for one frame.
    pub fn twinkle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.stars
            .twinkle(self.params.star_opacity, self.config.stars.twinkle_chance, rng)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn recompute(&mut self) {
        self.params = derive(self.clock.time_of_day(), &self.config);
        log::trace!(
            "Environment recomputed: t={:.3} day={}",
            self.params.time_of_day,
            self.params.is_day
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldRng;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_full_day() {
        let p = derive(0.0, &EnvironmentConfig::default());
        assert!(p.is_day);
        assert!(p.sky.day_visible && !p.sky.night_visible);
        assert!(p.sun.visible);
        assert_eq!(p.sun.intensity, 1.5);
        assert_eq!(p.moon_light.intensity, 0.0);
        assert!(p.moon_light.visible);
        assert_eq!(p.ambient.intensity, 0.7);
        assert_eq!(p.ambient.color, rgb_hex(0xd6e6ff));
        assert_eq!(p.hemisphere.intensity, 0.5);
        assert_eq!(p.fog.color, rgb_hex(0xafc5d3));
        assert_eq!(p.fog.density, 0.003);
        assert_eq!(p.star_opacity, 0.0);
        assert_eq!(p.moon.brightness, 0.0);
        assert_eq!(p.terrain_material.color, rgb_hex(0x2a6b30));
        assert_eq!(p.terrain_material.roughness, 0.8);
        assert_eq!(p.terrain_material.env_map_intensity, 1.0);
        assert_eq!(p.water_material.color, [0.0, 0.47, 0.75]);
        assert_eq!(p.water_material.roughness, 0.1);
    }

    #[test]
    fn test_full_night() {
        let p = derive(1.0, &EnvironmentConfig::default());
        assert!(!p.is_day);
        assert!(!p.sky.day_visible && p.sky.night_visible);
        assert!(!p.sun.visible);
        assert!(approx(p.sun.intensity, 0.0));
        assert!(approx(p.moon_light.intensity, 0.6));
        assert!(approx(p.ambient.intensity, 0.1));
        assert_eq!(p.ambient.color, rgb_hex(0x102040));
        assert!(approx(p.hemisphere.intensity, 0.1));
        assert_eq!(p.fog.density, 0.004);
        assert_eq!(p.star_opacity, 1.0);
        assert!(approx(p.moon.brightness, 1.2));
        assert_eq!(p.terrain_material.color, rgb_hex(0x0e2712));
        assert!(approx(p.terrain_material.roughness, 0.5));
        assert_eq!(p.terrain_material.env_map_intensity, 0.3);
        assert_eq!(p.water_material.color, [0.02, 0.05, 0.2]);
        assert!(approx(p.water_material.roughness, 0.05));
    }

    #[test]
    fn test_pivot_switch() {
        let config = EnvironmentConfig::default();
        let before = derive(0.49, &config);
        let after = derive(0.51, &config);

        assert!(before.sky.day_visible && !before.sky.night_visible);
        assert!(!after.sky.day_visible && after.sky.night_visible);
        assert!(before.sun.visible && !after.sun.visible);
        assert_ne!(before.fog, after.fog);
        assert_ne!(before.ambient.color, after.ambient.color);

        // Ramped values stay continuous across the pivot
        assert!((before.ambient.intensity - after.ambient.intensity).abs() < 0.02);
        assert!((before.moon_light.intensity - after.moon_light.intensity).abs() < 0.02);
    }

    #[test]
    fn test_sun_literal_at_pivot() {
        let p = derive(0.5, &EnvironmentConfig::default());
        assert!(!p.sun.visible);
        assert!(approx(p.sun.intensity, 0.75));
    }

    #[test]
    fn test_star_opacity_clamped() {
        let config = EnvironmentConfig::default();
        assert!(approx(derive(0.4, &config).star_opacity, 0.6));
        assert_eq!(derive(0.8, &config).star_opacity, 1.0);
    }

    #[test]
    fn test_derive_idempotent() {
        let config = EnvironmentConfig::default();
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert_eq!(derive(t, &config), derive(t, &config));
        }
    }

    #[test]
    fn test_out_of_range_clamped() {
        let config = EnvironmentConfig::default();
        assert_eq!(derive(-0.5, &config), derive(0.0, &config));
        assert_eq!(derive(3.0, &config), derive(1.0, &config));
        assert_eq!(derive(f32::NAN, &config), derive(0.0, &config));
    }

    #[test]
    fn test_system_toggle_recomputes() {
        let mut rng = WorldRng::default();
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 0.0, &mut rng.0).unwrap();
        assert!(sys.params().is_day);
        let toggle = sys.toggle_day_night();
        assert!(toggle.is_night);
        assert_eq!(sys.params().time_of_day, 1.0);
        assert!(!sys.params().sun.visible);
    }

    #[test]
    fn test_system_update_paused() {
        let mut rng = WorldRng::default();
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 0.0, &mut rng.0).unwrap();
        assert!(!sys.update(30.0));
        assert_eq!(sys.params().time_of_day, 0.0);
    }

    #[test]
    fn test_system_update_cycles() {
        let mut rng = WorldRng::default();
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 0.0, &mut rng.0).unwrap();
        sys.toggle_cycle(0.0);
        assert!(sys.update(45.0));
        assert!(approx(sys.params().time_of_day, 0.75));
        assert!(!sys.params().is_day);
        assert!(sys.clock().is_night());
    }

    #[test]
    fn test_system_rejects_bad_config() {
        let mut config = EnvironmentConfig::default();
        config.day_night.cycle_duration = -1.0;
        let mut rng = WorldRng::default();
        assert!(EnvironmentSystem::new(config, 0.0, &mut rng.0).is_err());
    }

    #[test]
    fn test_uniform_from_system() {
        let mut rng = WorldRng::default();
        let sys = EnvironmentSystem::new(EnvironmentConfig::default(), 0.0, &mut rng.0).unwrap();
        let u = sys.uniform();
        assert_eq!(u.sun_intensity, sys.params().sun.intensity);
        assert_eq!(u.sun_position, [100.0, 100.0, 50.0]);
    }
}
