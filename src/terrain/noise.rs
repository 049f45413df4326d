//! Continuous 2D noise fields for height synthesis.
//!
//! The default field is lattice noise: a pseudo-random value is hashed at
//! every integer lattice point (an integer mix fed through `sin`), and the
//! four corners of a cell are blended with eased cosine interpolation. A
//! seeded Perlin field from the `noise` crate is available as an alternative
//! source.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::math::{cosine_interpolate, smoothstep};

/// Lattice period. Indices wrap every 256 cells.
const LATTICE_MASK: i32 = 255;

/// Which noise function drives terrain synthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseSource {
    /// Hash-to-sine lattice noise (seedless, fully deterministic).
    LatticeSine,
    /// Perlin gradient noise with an explicit seed.
    Perlin { seed: u32 },
}

impl Default for NoiseSource {
    fn default() -> Self {
        NoiseSource::LatticeSine
    }
}

/// A deterministic scalar field over the XZ plane with values in `[-1, 1]`.
#[derive(Clone)]
pub struct NoiseField {
    source: NoiseSource,
    perlin: Option<Perlin>,
}

impl NoiseField {
    pub fn new(source: NoiseSource) -> Self {
        let perlin = match source {
            NoiseSource::LatticeSine => None,
            NoiseSource::Perlin { seed } => Some(Perlin::new(seed)),
        };
        Self { source, perlin }
    }

    pub fn source(&self) -> NoiseSource {
        self.source
    }

    /// Sample the field at `(x, z)`.
    #[inline]
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        match &self.perlin {
            Some(perlin) => (perlin.get([x as f64, z as f64]) as f32).clamp(-1.0, 1.0),
            None => lattice_noise(x, z),
        }
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("source", &self.source).finish()
    }
}

/// Lattice noise at `(x, z)`.
///
/// Cells are indexed with `floor`, so negative coordinates behave exactly
/// like positive ones. The X axis is smoothstep-eased before the cosine
/// blend; the Z axis uses the cosine blend alone.
pub fn lattice_noise(x: f32, z: f32) -> f32 {
    let x0 = x.floor();
    let z0 = z.floor();
    let fx = x - x0;
    let fz = z - z0;
    let ix = x0 as i32;
    let iz = z0 as i32;

    let bottom_left = lattice_value(ix, iz);
    let bottom_right = lattice_value(ix.wrapping_add(1), iz);
    let top_left = lattice_value(ix, iz.wrapping_add(1));
    let top_right = lattice_value(ix.wrapping_add(1), iz.wrapping_add(1));

    let tx = smoothstep(fx);
    cosine_interpolate(
        cosine_interpolate(bottom_left, bottom_right, tx),
        cosine_interpolate(top_left, top_right, tx),
        fz,
    )
}

/// Pseudo-random value in `[-1, 1]` for a lattice point.
///
/// The period mask is applied per corner (after any `+1`), so the seam where
/// indices wrap is as smooth as every other cell edge.
#[inline]
fn lattice_value(ix: i32, iz: i32) -> f32 {
    lattice_hash(ix & LATTICE_MASK, iz & LATTICE_MASK)
}

/// 32-bit multiply/rotate/xor mix mapped onto a full turn and through `sin`.
fn lattice_hash(ix: i32, iz: i32) -> f32 {
    const HALF_WORD: u32 = 16;
    let mut a = ix as u32;
    let mut b = iz as u32;
    a = a.wrapping_mul(3_284_157_443);
    b ^= a.rotate_left(HALF_WORD);
    b = b.wrapping_mul(1_911_520_717);
    a ^= b.rotate_left(HALF_WORD);
    a = a.wrapping_mul(2_048_419_325);
    // [0, 2^32) -> [0, 2π)
    let angle = a as f64 * (std::f64::consts::PI / 2_147_483_648.0);
    angle.sin() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_noise_deterministic() {
        for i in -20..20 {
            let x = i as f32 * 0.37;
            let z = i as f32 * -1.13;
            assert_eq!(lattice_noise(x, z), lattice_noise(x, z));
        }
    }

    #[test]
    fn test_lattice_noise_range() {
        for i in -50..50 {
            for j in -50..50 {
                let v = lattice_noise(i as f32 * 0.173, j as f32 * 0.291);
                assert!((-1.0..=1.0).contains(&v), "noise({i}, {j}) = {v} out of range");
            }
        }
    }

    #[test]
    fn test_lattice_noise_not_constant() {
        let a = lattice_noise(0.5, 0.5);
        let b = lattice_noise(3.5, 7.5);
        let c = lattice_noise(-4.5, 2.5);
        assert!(a != b || b != c, "noise should vary across cells");
    }

    #[test]
    fn test_continuous_across_cell_edges() {
        let eps = 1e-4;
        for edge in [-3.0_f32, -1.0, 0.0, 1.0, 2.0, 7.0] {
            for z in [-2.3_f32, 0.4, 5.9] {
                let below = lattice_noise(edge - eps, z);
                let above = lattice_noise(edge + eps, z);
                assert!(
                    (below - above).abs() < 1e-2,
                    "seam at x={edge}, z={z}: {below} vs {above}"
                );
                let below_z = lattice_noise(z, edge - eps);
                let above_z = lattice_noise(z, edge + eps);
                assert!(
                    (below_z - above_z).abs() < 1e-2,
                    "seam at z={edge}, x={z}: {below_z} vs {above_z}"
                );
            }
        }
    }

    #[test]
    fn test_continuous_across_lattice_wrap() {
        let eps = 1e-3;
        let below = lattice_noise(256.0 - eps, 0.3);
        let above = lattice_noise(256.0 + eps, 0.3);
        assert!((below - above).abs() < 1e-2);
    }

    #[test]
    fn test_matches_lattice_at_integer_points() {
        // At lattice points the blend weights collapse onto one corner.
        let v = lattice_noise(3.0, -2.0);
        assert!((v - lattice_value(3, -2)).abs() < 1e-6);
    }

    #[test]
    fn test_field_uses_selected_source() {
        let lattice = NoiseField::new(NoiseSource::LatticeSine);
        assert_eq!(lattice.sample(1.3, 2.7), lattice_noise(1.3, 2.7));

        let perlin = NoiseField::new(NoiseSource::Perlin { seed: 7 });
        let again = NoiseField::new(NoiseSource::Perlin { seed: 7 });
        assert_eq!(perlin.sample(1.3, 2.7), again.sample(1.3, 2.7));
        assert!((-1.0..=1.0).contains(&perlin.sample(0.25, 0.75)));
    }

    #[test]
    fn test_perlin_seeds_differ() {
        let a = NoiseField::new(NoiseSource::Perlin { seed: 1 });
        let b = NoiseField::new(NoiseSource::Perlin { seed: 2 });
        let differs = (0..10).any(|i| {
            let p = i as f32 * 0.31 + 0.17;
            a.sample(p, p * 0.5) != b.sample(p, p * 0.5)
        });
        assert!(differs);
    }
}
