//! Entity transforms as a renderer consumes them.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::entity::{GrassBlade, PlacedEntity};

/// World transform of a placed entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for EntityTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl EntityTransform {
    /// Transform at the entity's render position. Euler angles are applied
    /// in X, Y, Z order.
    pub fn from_entity(entity: &PlacedEntity) -> Self {
        let r = entity.rotation;
        Self {
            position: entity.render_position(),
            rotation: Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            scale: entity.scale,
        }
    }

    /// Instance transform of a grass blade; only the height is scaled.
    pub fn from_blade(blade: &GrassBlade) -> Self {
        let r = blade.rotation;
        Self {
            position: blade.position,
            rotation: Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            scale: Vec3::new(1.0, blade.height_scale, 1.0),
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
