//! Static grass blades.
//!
//! Blades never move once placed, so they are kept apart from
//! [`super::EntitySet`] and handed to the renderer once as an instance list.

use glam::Vec3;

/// One grass blade instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrassBlade {
    pub position: Vec3,
    /// Euler tilt/yaw/tilt in radians.
    pub rotation: Vec3,
    /// Vertical stretch of the blade mesh.
    pub height_scale: f32,
}

/// Every grass blade in the world, in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrassField {
    blades: Vec<GrassBlade>,
}

impl GrassField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { blades: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, blade: GrassBlade) {
        self.blades.push(blade);
    }

    pub fn len(&self) -> usize {
        self.blades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blades.is_empty()
    }

    pub fn blades(&self) -> &[GrassBlade] {
        &self.blades
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut field = GrassField::with_capacity(2);
        assert!(field.is_empty());
        for x in [1.0, 2.0] {
            field.push(GrassBlade {
                position: Vec3::new(x, 0.0, 0.0),
                rotation: Vec3::ZERO,
                height_scale: 1.0,
            });
        }
        assert_eq!(field.len(), 2);
        assert_eq!(field.blades()[1].position.x, 2.0);
    }
}
