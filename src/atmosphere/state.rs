//! Environment render parameters and GPU uniform.

use bytemuck::{Pod, Zeroable};

// ---------------------------------------------------------------------------
// CPU-side state
// ---------------------------------------------------------------------------

/// Sky dome state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyState {
    pub day_visible: bool,
    pub night_visible: bool,
    /// Day-to-night blend factor (equals the time of day).
    pub blend: f32,
    /// Gradient color at the zenith of the visible dome.
    pub top_color: [f32; 3],
    /// Gradient color at the horizon of the visible dome.
    pub bottom_color: [f32; 3],
}

/// A light's visibility, strength and color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightState {
    pub visible: bool,
    pub intensity: f32,
    pub color: [f32; 3],
}

/// Sky/ground hemisphere light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HemisphereState {
    pub intensity: f32,
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
}

/// Exponential-squared fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogState {
    pub color: [f32; 3],
    pub density: f32,
}

/// Surface material tint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialState {
    pub color: [f32; 3],
    pub roughness: f32,
    pub env_map_intensity: f32,
}

/// Moon disc in the sky.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonDiscState {
    pub visible: bool,
    /// Emissive brightness.
    pub brightness: f32,
}

/// Every environment render parameter for one time of day.
///
/// Produced by [`super::derive`]; a pure function of the time of day and
/// the configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentParameters {
    pub time_of_day: f32,
    pub is_day: bool,
    pub sky: SkyState,
    pub sun: LightState,
    pub moon_light: LightState,
    pub ambient: LightState,
    pub hemisphere: HemisphereState,
    pub fog: FogState,
    pub star_opacity: f32,
    pub moon: MoonDiscState,
    pub terrain_material: MaterialState,
    pub water_material: MaterialState,
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// GPU-ready environment uniform buffer.
///
/// All `vec3` fields are padded to 16-byte alignment for WGSL compatibility.
/// Hidden lights are packed with zero intensity.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct EnvironmentUniform {
    // -- Sun (16 + 16 = 32 bytes) --
    pub sun_position: [f32; 3],
    pub sun_intensity: f32,
    pub sun_color: [f32; 3],
    pub time_of_day: f32,

    // -- Moon light (16 + 16 = 32 bytes) --
    pub moon_position: [f32; 3],
    pub moon_intensity: f32,
    pub moon_color: [f32; 3],
    pub moon_brightness: f32,

    // -- Ambient + hemisphere (16 * 3 = 48 bytes) --
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub hemisphere_sky_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub hemisphere_ground_color: [f32; 3],
    pub star_opacity: f32,

    // -- Sky (16 + 16 = 32 bytes) --
    pub sky_top_color: [f32; 3],
    pub sky_blend: f32,
    pub sky_bottom_color: [f32; 3],
    pub _pad0: f32,

    // -- Fog (16 bytes) --
    pub fog_color: [f32; 3],
    pub fog_density: f32,

    // -- Terrain material (16 + 16 = 32 bytes) --
    pub terrain_color: [f32; 3],
    pub terrain_roughness: f32,
    pub terrain_env_map_intensity: f32,
    pub _pad1: [f32; 3],

    // -- Water material (16 + 16 = 32 bytes) --
    pub water_color: [f32; 3],
    pub water_roughness: f32,
    pub water_env_map_intensity: f32,
    pub _pad2: [f32; 3],
}

impl EnvironmentUniform {
    /// Pack parameters together with the light positions they shine from.
    pub fn pack(p: &EnvironmentParameters, sun_position: [f32; 3], moon_position: [f32; 3]) -> Self {
        let shown = |light: &LightState| if light.visible { light.intensity } else { 0.0 };
        Self {
            sun_position,
            sun_intensity: shown(&p.sun),
            sun_color: p.sun.color,
            time_of_day: p.time_of_day,
            moon_position,
            moon_intensity: shown(&p.moon_light),
            moon_color: p.moon_light.color,
            moon_brightness: if p.moon.visible { p.moon.brightness } else { 0.0 },
            ambient_color: p.ambient.color,
            ambient_intensity: shown(&p.ambient),
            hemisphere_sky_color: p.hemisphere.sky_color,
            hemisphere_intensity: p.hemisphere.intensity,
            hemisphere_ground_color: p.hemisphere.ground_color,
            star_opacity: p.star_opacity,
            sky_top_color: p.sky.top_color,
            sky_blend: p.sky.blend,
            sky_bottom_color: p.sky.bottom_color,
            _pad0: 0.0,
            fog_color: p.fog.color,
            fog_density: p.fog.density,
            terrain_color: p.terrain_material.color,
            terrain_roughness: p.terrain_material.roughness,
            terrain_env_map_intensity: p.terrain_material.env_map_intensity,
            _pad1: [0.0; 3],
            water_color: p.water_material.color,
            water_roughness: p.water_material.roughness,
            water_env_map_intensity: p.water_material.env_map_intensity,
            _pad2: [0.0; 3],
        }
    }
}

impl Default for EnvironmentUniform {
    fn default() -> Self {
        Self::zeroed()
    }
}
