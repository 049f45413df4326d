//! Layered-noise height synthesis

use serde::{Deserialize, Serialize};

use super::heightmap::HeightMap;
use super::noise::{NoiseField, NoiseSource};
use crate::core::{Error, Result};

/// One noise layer: frequency multiplier applied to normalized coordinates,
/// and the amplitude its output is scaled by.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f32,
    pub amplitude: f32,
}

impl Octave {
    pub const fn new(frequency: f32, amplitude: f32) -> Self {
        Self { frequency, amplitude }
    }
}

/// Parameters controlling terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Noise function sampled by every octave.
    pub noise: NoiseSource,
    /// Noise layers, summed. Large rolling shapes first, surface roughness last.
    pub octaves: Vec<Octave>,
    /// Sign-preserving power applied to the octave sum.
    pub contrast_exponent: f32,
    /// Elevation of the spawn plateau at the world centre.
    pub plateau_height: f32,
    /// Radial distance (in `2 * |(nx, nz)|` units) where the plateau blend ends.
    pub plateau_radius: f32,
    /// Radius of the exactly flat core inside the plateau.
    pub flat_radius: f32,
    /// Lowest allowed terrain elevation.
    pub floor: f32,
    /// Height of the separate water plane. Not applied to the grid.
    pub water_level: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            noise: NoiseSource::LatticeSine,
            octaves: vec![
                Octave::new(1.5, 20.0), // mountains and valleys
                Octave::new(3.0, 10.0), // hills
                Octave::new(8.0, 5.0),  // bumps
                Octave::new(20.0, 1.5), // surface roughness
            ],
            contrast_exponent: 0.8,
            plateau_height: 5.0,
            plateau_radius: 0.2,
            flat_radius: 0.05,
            floor: 0.0,
            water_level: -2.5,
        }
    }
}

impl TerrainParams {
    /// Reject parameter sets that cannot produce a usable height map.
    pub fn validate(&self) -> Result<()> {
        if self.octaves.is_empty() {
            return Err(Error::invalid_config("terrain needs at least one octave"));
        }
        if self
            .octaves
            .iter()
            .any(|o| !o.frequency.is_finite() || !o.amplitude.is_finite())
        {
            return Err(Error::invalid_config("octave frequency/amplitude must be finite"));
        }
        if !(self.contrast_exponent.is_finite() && self.contrast_exponent > 0.0) {
            return Err(Error::invalid_config(format!(
                "contrast_exponent must be positive, got {}",
                self.contrast_exponent
            )));
        }
        if !(self.flat_radius >= 0.0 && self.flat_radius < self.plateau_radius) {
            return Err(Error::invalid_config(format!(
                "flat_radius ({}) must be in [0, plateau_radius ({}))",
                self.flat_radius, self.plateau_radius
            )));
        }
        if !self.plateau_height.is_finite() || !self.floor.is_finite() {
            return Err(Error::invalid_config("plateau_height and floor must be finite"));
        }
        Ok(())
    }
}

/// Procedural terrain generator summing noise octaves
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: NoiseField,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given parameters
    pub fn new(params: TerrainParams) -> Result<Self> {
        params.validate()?;
        let noise = NoiseField::new(params.noise);
        Ok(Self { params, noise })
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Elevation at normalized coordinates `nx, nz ∈ [-0.5, 0.5]`.
    pub fn height_at_normalized(&self, nx: f32, nz: f32) -> f32 {
        let p = &self.params;

        let mut height: f32 = p
            .octaves
            .iter()
            .map(|o| self.noise.sample(nx * o.frequency, nz * o.frequency) * o.amplitude)
            .sum();

        height = height.abs().powf(p.contrast_exponent).copysign(height);

        // Spawn plateau: exactly flat inside flat_radius, blending back to
        // the raw terrain at plateau_radius.
        let dist = (nx * nx + nz * nz).sqrt() * 2.0;
        if dist < p.plateau_radius {
            let blend = ((dist - p.flat_radius) / (p.plateau_radius - p.flat_radius))
                .clamp(0.0, 1.0);
            height = p.plateau_height + (height - p.plateau_height) * blend;
        }

        height.max(p.floor)
    }

    /// Build the full height grid for a world `world_size` units across.
    pub fn generate(&self, map_size: usize, world_size: f32) -> Result<HeightMap> {
        HeightMap::generate(self, map_size, world_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_params_default() {
        let params = TerrainParams::default();
        assert_eq!(params.octaves.len(), 4);
        assert_eq!(params.octaves[0], Octave::new(1.5, 20.0));
        assert_eq!(params.contrast_exponent, 0.8);
        assert_eq!(params.plateau_height, 5.0);
        assert_eq!(params.floor, 0.0);
        assert_eq!(params.water_level, -2.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_octaves() {
        let params = TerrainParams { octaves: vec![], ..Default::default() };
        assert!(matches!(TerrainGenerator::new(params), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_plateau() {
        let params = TerrainParams {
            flat_radius: 0.3,
            plateau_radius: 0.2,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_center_is_plateau() {
        let generator = TerrainGenerator::new(TerrainParams::default()).unwrap();
        assert_eq!(generator.height_at_normalized(0.0, 0.0), 5.0);
        assert_eq!(generator.height_at_normalized(0.01, -0.01), 5.0);
    }

    #[test]
    fn test_height_never_below_floor() {
        let generator = TerrainGenerator::new(TerrainParams::default()).unwrap();
        for i in 0..=40 {
            for j in 0..=40 {
                let nx = i as f32 / 40.0 - 0.5;
                let nz = j as f32 / 40.0 - 0.5;
                assert!(generator.height_at_normalized(nx, nz) >= 0.0);
            }
        }
    }

    #[test]
    fn test_height_consistency() {
        let generator = TerrainGenerator::new(TerrainParams::default()).unwrap();
        let positions = [(0.3, 0.1), (-0.4, 0.2), (0.45, -0.45), (-0.25, -0.05)];

        for (nx, nz) in positions {
            let h1 = generator.height_at_normalized(nx, nz);
            let h2 = generator.height_at_normalized(nx, nz);
            assert_eq!(h1, h2, "Height should be consistent at ({}, {})", nx, nz);
        }
    }

    #[test]
    fn test_plateau_blend_is_seamless() {
        let generator = TerrainGenerator::new(TerrainParams::default()).unwrap();
        // dist = |n| * 2, so the plateau edge sits at |n| = 0.1
        let edge = 0.1 / std::f32::consts::SQRT_2;
        let inside = generator.height_at_normalized(edge - 1e-4, edge - 1e-4);
        let outside = generator.height_at_normalized(edge + 1e-4, edge + 1e-4);
        assert!((inside - outside).abs() < 0.05, "{inside} vs {outside}");
    }

    #[test]
    fn test_perlin_source_differs_from_lattice() {
        let lattice = TerrainGenerator::new(TerrainParams::default()).unwrap();
        let perlin = TerrainGenerator::new(TerrainParams {
            noise: NoiseSource::Perlin { seed: 12345 },
            ..Default::default()
        })
        .unwrap();
        let differs = (0..20).any(|i| {
            let n = -0.5 + i as f32 * 0.05;
            lattice.height_at_normalized(n, 0.4) != perlin.height_at_normalized(n, 0.4)
        });
        assert!(differs);
    }
}
