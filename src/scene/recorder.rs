//! A render target that remembers what it was told.

use std::collections::HashMap;

use super::{EntityTransform, LightSlot, MaterialSlot, RenderTarget};
use crate::atmosphere::{
    FogState, HemisphereState, LightState, MaterialState, MoonDiscState, SkyState, Star,
};
use crate::entity::EntityId;
use crate::terrain::TerrainMesh;

/// Last value received for every [`RenderTarget`] call.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    pub sky: Option<SkyState>,
    pub lights: HashMap<LightSlot, LightState>,
    pub hemisphere: Option<HemisphereState>,
    pub fog: Option<FogState>,
    pub materials: HashMap<MaterialSlot, MaterialState>,
    pub star_opacity: Option<f32>,
    pub moon_disc: Option<MoonDiscState>,
    pub moon_position: Option<[f32; 3]>,
    pub water_color: Option<[f32; 3]>,
    pub water_offsets: Vec<f32>,
    pub transforms: HashMap<EntityId, EntityTransform>,
    pub visibility: HashMap<EntityId, bool>,
    pub terrain_triangles: usize,
    pub star_count: usize,
    pub star_updates: usize,
    pub grass_instances: usize,
    /// Times static grass was handed over.
    pub grass_attaches: usize,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn light(&self, slot: LightSlot) -> Option<&LightState> {
        self.lights.get(&slot)
    }

    pub fn material(&self, slot: MaterialSlot) -> Option<&MaterialState> {
        self.materials.get(&slot)
    }

    /// Entities last reported visible.
    pub fn visible_count(&self) -> usize {
        self.visibility.values().filter(|v| **v).count()
    }
}

impl RenderTarget for RecordingTarget {
    fn set_sky(&mut self, sky: &SkyState) {
        self.sky = Some(*sky);
    }

    fn set_light(&mut self, slot: LightSlot, light: &LightState) {
        self.lights.insert(slot, *light);
    }

    fn set_hemisphere(&mut self, hemisphere: &HemisphereState) {
        self.hemisphere = Some(*hemisphere);
    }

    fn set_fog(&mut self, fog: &FogState) {
        self.fog = Some(*fog);
    }

    fn set_material(&mut self, slot: MaterialSlot, material: &MaterialState) {
        self.materials.insert(slot, *material);
    }

    fn set_star_opacity(&mut self, opacity: f32) {
        self.star_opacity = Some(opacity);
    }

    fn set_moon_disc(&mut self, moon: &MoonDiscState) {
        self.moon_disc = Some(*moon);
    }

    fn set_light_intensity(&mut self, slot: LightSlot, intensity: f32) {
        if let Some(light) = self.lights.get_mut(&slot) {
            light.intensity = intensity;
        }
    }

    fn set_moon_position(&mut self, position: [f32; 3]) {
        self.moon_position = Some(position);
    }

    fn set_water_color(&mut self, color: [f32; 3]) {
        self.water_color = Some(color);
    }

    fn set_entity_transform(&mut self, id: EntityId, transform: &EntityTransform) {
        self.transforms.insert(id, *transform);
    }

    fn set_entity_visible(&mut self, id: EntityId, visible: bool) {
        self.visibility.insert(id, visible);
    }

    fn set_water_offsets(&mut self, offsets: &[f32]) {
        self.water_offsets.clear();
        self.water_offsets.extend_from_slice(offsets);
    }

    fn attach_terrain(&mut self, mesh: &TerrainMesh) {
        self.terrain_triangles = mesh.triangle_count();
    }

    fn attach_stars(&mut self, stars: &[Star]) {
        self.star_count = stars.len();
    }

    fn update_stars(&mut self, _stars: &[Star]) {
        self.star_updates += 1;
    }

    fn attach_grass(&mut self, instances: &[EntityTransform]) {
        self.grass_instances = instances.len();
        self.grass_attaches += 1;
    }
}
