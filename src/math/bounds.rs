//! Square world extent on the horizontal plane

use crate::core::types::Vec3;

/// Square horizontal extent `[min, max]` shared by the X and Z axes.
///
/// The world is centred on the origin, so `min == -max` for every bounds
/// produced by [`WorldBounds::from_world_size`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldBounds {
    pub min: f32,
    pub max: f32,
}

impl WorldBounds {
    /// Create bounds from explicit min and max
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Bounds of a world `world_size` units across, centred on the origin
    pub fn from_world_size(world_size: f32) -> Self {
        let half = world_size * 0.5;
        Self { min: -half, max: half }
    }

    /// Edge length
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Check if an XZ point lies inside (edges inclusive)
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min && x <= self.max && z >= self.min && z <= self.max
    }

    /// Bounds shrunk by `margin` on every side. Never inverts.
    pub fn shrink(&self, margin: f32) -> Self {
        let center = (self.min + self.max) * 0.5;
        Self {
            min: (self.min + margin).min(center),
            max: (self.max - margin).max(center),
        }
    }

    /// Clamp a position's X and Z into the bounds, leaving Y untouched
    pub fn clamp_position(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min, self.max),
            p.y,
            p.z.clamp(self.min, self.max),
        )
    }
}
