//! Renderer boundary.
//!
//! The world never owns meshes, lights or materials. It pushes values into a
//! [`RenderTarget`] supplied by the host, through the functions in this
//! module. [`RecordingTarget`] keeps the last value of every call and serves
//! headless hosts and tests.

pub mod recorder;
pub mod transform;

pub use recorder::RecordingTarget;
pub use transform::EntityTransform;

use crate::atmosphere::{
    EnvironmentParameters, FogState, HemisphereState, LightState, MaterialState, MoonDiscState,
    SkyMotion, SkyState, Star,
};
use crate::entity::{EntityId, EntitySet, GrassField};
use crate::terrain::TerrainMesh;

/// Lights the environment drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightSlot {
    Sun,
    Moon,
    Ambient,
}

/// Surfaces whose material the environment tints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Terrain,
    Water,
}

/// Everything the world can ask of a renderer.
pub trait RenderTarget {
    fn set_sky(&mut self, sky: &SkyState);
    fn set_light(&mut self, slot: LightSlot, light: &LightState);
    fn set_hemisphere(&mut self, hemisphere: &HemisphereState);
    fn set_fog(&mut self, fog: &FogState);
    fn set_material(&mut self, slot: MaterialSlot, material: &MaterialState);
    fn set_star_opacity(&mut self, opacity: f32);
    fn set_moon_disc(&mut self, moon: &MoonDiscState);

    /// Overrides only the intensity set by [`RenderTarget::set_light`].
    fn set_light_intensity(&mut self, slot: LightSlot, intensity: f32);
    fn set_moon_position(&mut self, position: [f32; 3]);
    fn set_water_color(&mut self, color: [f32; 3]);

    fn set_entity_transform(&mut self, _id: EntityId, _transform: &EntityTransform) {}
    fn set_entity_visible(&mut self, _id: EntityId, _visible: bool) {}
    /// Per-vertex water displacement, row-major by X.
    fn set_water_offsets(&mut self, _offsets: &[f32]) {}

    fn attach_terrain(&mut self, _mesh: &TerrainMesh) {}
    fn attach_stars(&mut self, _stars: &[Star]) {}
    /// Static grass instances, one transform per blade.
    fn attach_grass(&mut self, _instances: &[EntityTransform]) {}
    /// Star colors changed since they were attached.
    fn update_stars(&mut self, _stars: &[Star]) {}
}

/// Push every derived environment value to the renderer.
pub fn apply_environment<R: RenderTarget + ?Sized>(params: &EnvironmentParameters, target: &mut R) {
    target.set_sky(&params.sky);
    target.set_light(LightSlot::Sun, &params.sun);
    target.set_light(LightSlot::Moon, &params.moon_light);
    target.set_light(LightSlot::Ambient, &params.ambient);
    target.set_hemisphere(&params.hemisphere);
    target.set_fog(&params.fog);
    target.set_material(MaterialSlot::Terrain, &params.terrain_material);
    target.set_material(MaterialSlot::Water, &params.water_material);
    target.set_star_opacity(params.star_opacity);
    target.set_moon_disc(&params.moon);
}

/// Layer the continuous sky animation over an applied environment.
pub fn apply_sky_motion<R: RenderTarget + ?Sized>(motion: &SkyMotion, target: &mut R) {
    if let Some(position) = motion.moon_position {
        target.set_moon_position(position);
    }
    if let Some(intensity) = motion.sun_intensity {
        target.set_light_intensity(LightSlot::Sun, intensity);
    }
    if let Some(intensity) = motion.moon_light_intensity {
        target.set_light_intensity(LightSlot::Moon, intensity);
    }
    target.set_water_color(motion.water_color);
}

/// Instance transforms for every grass blade, in placement order.
pub fn grass_instances(grass: &GrassField) -> Vec<EntityTransform> {
    grass.blades().iter().map(EntityTransform::from_blade).collect()
}

/// Push transform and visibility for every entity.
pub fn sync_entities<R: RenderTarget + ?Sized>(entities: &EntitySet, target: &mut R) {
    for entity in entities.iter() {
        target.set_entity_visible(entity.id, entity.visible);
        if entity.visible {
            target.set_entity_transform(entity.id, &EntityTransform::from_entity(entity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::{derive, sky_motion::compute_sky_motion, EnvironmentConfig};
    use crate::entity::{EntityKind, GrassBlade};
    use glam::Vec3;

    #[test]
    fn test_apply_environment_copies_params() {
        let config = EnvironmentConfig::default();
        let params = derive(0.8, &config);
        let mut target = RecordingTarget::default();
        apply_environment(&params, &mut target);
        assert_eq!(target.sky, Some(params.sky));
        assert_eq!(target.light(LightSlot::Sun), Some(&params.sun));
        assert_eq!(target.light(LightSlot::Moon), Some(&params.moon_light));
        assert_eq!(target.fog, Some(params.fog));
        assert_eq!(target.material(MaterialSlot::Water), Some(&params.water_material));
        assert_eq!(target.star_opacity, Some(params.star_opacity));
    }

    #[test]
    fn test_applying_twice_is_stable() {
        let config = EnvironmentConfig::default();
        let mut a = RecordingTarget::default();
        let mut b = RecordingTarget::default();
        apply_environment(&derive(0.3, &config), &mut a);
        apply_environment(&derive(0.3, &config), &mut b);
        apply_environment(&derive(0.3, &config), &mut b);
        assert_eq!(a.sky, b.sky);
        assert_eq!(a.fog, b.fog);
        assert_eq!(a.light(LightSlot::Ambient), b.light(LightSlot::Ambient));
    }

    #[test]
    fn test_sky_motion_skips_hidden_sun() {
        let config = EnvironmentConfig::default();
        let params = derive(0.9, &config);
        let mut target = RecordingTarget::default();
        apply_environment(&params, &mut target);
        apply_sky_motion(&compute_sky_motion(&params, 10.0, &config), &mut target);
        // Hidden sun keeps its derived intensity
        assert_eq!(target.light(LightSlot::Sun).map(|l| l.intensity), Some(params.sun.intensity));
        assert!(target.moon_position.is_some());
        assert!(target.water_color.is_some());
    }

    #[test]
    fn test_sync_entities_hidden_skip_transform() {
        let mut set = EntitySet::new();
        set.spawn(EntityKind::House, Vec3::new(1.0, 0.0, 1.0));
        set.spawn(EntityKind::House, Vec3::ZERO).visible = false;
        let mut target = RecordingTarget::default();
        sync_entities(&set, &mut target);
        assert_eq!(target.visibility.get(&0), Some(&true));
        assert_eq!(target.visibility.get(&1), Some(&false));
        assert!(target.transforms.contains_key(&0));
        assert!(!target.transforms.contains_key(&1));
    }

    #[test]
    fn test_grass_instances_follow_blades() {
        let mut grass = GrassField::new();
        for x in [3.0, -7.0] {
            grass.push(GrassBlade {
                position: Vec3::new(x, 0.5, 1.0),
                rotation: Vec3::new(0.05, 1.0, -0.05),
                height_scale: 0.9,
            });
        }
        let instances = grass_instances(&grass);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].position.x, -7.0);
        assert_eq!(instances[0].scale.y, 0.9);
    }
}
