//! Star field: points on a spherical shell around the scene that twinkle
//! while visible.

use rand::Rng;

use super::config::StarConfig;

/// One star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// All stars in the sky.
#[derive(Clone, Debug, Default)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Scatter `config.count` stars uniformly over directions, at radii
    /// between `min_radius` and `max_radius`. Colors are near-white.
    pub fn generate<R: Rng + ?Sized>(config: &StarConfig, rng: &mut R) -> Self {
        let stars = (0..config.count)
            .map(|_| {
                let theta = rng.gen_range(0.0..std::f32::consts::TAU);
                let phi = (2.0 * rng.r#gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
                let radius = config.min_radius + rng.r#gen::<f32>() * (config.max_radius - config.min_radius);

                let position = [
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                ];
                let color = [
                    0.9 + rng.r#gen::<f32>() * 0.1,
                    0.9 + rng.r#gen::<f32>() * 0.1,
                    0.9 + rng.r#gen::<f32>() * 0.1,
                ];
                Star { position, color }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Re-roll the brightness of a random few stars. Only runs while the
    /// field is visible (`opacity > 0`). Returns how many stars changed.
    pub fn twinkle<R: Rng + ?Sized>(&mut self, opacity: f32, chance: f32, rng: &mut R) -> usize {
        if opacity <= 0.0 {
            return 0;
        }
        let mut changed = 0;
        for star in &mut self.stars {
            if rng.r#gen::<f32>() < chance {
                let level = 0.7 + rng.r#gen::<f32>() * 0.3;
                star.color = [level; 3];
                changed += 1;
            }
        }
        changed
    }
}
