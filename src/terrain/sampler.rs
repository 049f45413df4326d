//! Height queries against a generated [`HeightMap`]

use glam::Vec3;

use super::heightmap::HeightMap;
use crate::math::WorldBounds;

/// Anything that can answer ground-height queries over a bounded area.
///
/// Placement and entity behaviors only need this much of the terrain, which
/// keeps them testable against a flat stand-in.
pub trait HeightSource {
    /// Ground height at world `(x, z)`. Total: outside the map returns `0.0`.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Horizontal extent the source covers.
    fn bounds(&self) -> WorldBounds;
}

/// Bilinear sampler over a height map.
#[derive(Clone, Debug)]
pub struct TerrainSampler {
    map: HeightMap,
    bounds: WorldBounds,
}

impl TerrainSampler {
    pub fn new(map: HeightMap) -> Self {
        let bounds = WorldBounds::from_world_size(map.world_size());
        Self { map, bounds }
    }

    pub fn heightmap(&self) -> &HeightMap {
        &self.map
    }

    /// Ground height at world `(x, z)`.
    ///
    /// Positions whose interpolation cell would reach past the last grid
    /// index return `0.0`. That includes the far edge itself.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let n = self.map.size();
        let ws = self.map.world_size();
        let last = (n - 1) as f32;

        let gx = (x + ws * 0.5) / ws * last;
        let gz = (z + ws * 0.5) / ws * last;
        if !gx.is_finite() || !gz.is_finite() {
            return 0.0;
        }

        let fx0 = gx.floor();
        let fz0 = gz.floor();
        if fx0 < 0.0 || fz0 < 0.0 || fx0 + 1.0 > last || fz0 + 1.0 > last {
            return 0.0;
        }

        let ix = fx0 as usize;
        let iz = fz0 as usize;
        let fx = gx - fx0;
        let fz = gz - fz0;

        let h00 = self.map.get(ix, iz);
        let h10 = self.map.get(ix + 1, iz);
        let h01 = self.map.get(ix, iz + 1);
        let h11 = self.map.get(ix + 1, iz + 1);

        let near = h00 + (h10 - h00) * fx;
        let far = h01 + (h11 - h01) * fx;
        near + (far - near) * fz
    }

    /// Ground point at `(x, z)`.
    pub fn ground(&self, x: f32, z: f32) -> Vec3 {
        Vec3::new(x, self.height_at(x, z), z)
    }

    /// Horizontal extent of the map.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Steepness at `(x, z)` as the magnitude of the central-difference
    /// height gradient, sampled one grid cell apart.
    pub fn slope_at(&self, x: f32, z: f32) -> f32 {
        let step = self.cell_size();
        let dx = (self.height_at(x + step, z) - self.height_at(x - step, z)) / (2.0 * step);
        let dz = (self.height_at(x, z + step) - self.height_at(x, z - step)) / (2.0 * step);
        (dx * dx + dz * dz).sqrt()
    }

    /// Clamp a horizontal position into the map and snap it to the ground.
    pub fn clamp_to_bounds(&self, position: Vec3) -> Vec3 {
        let clamped = self.bounds.clamp_position(position);
        self.ground(clamped.x, clamped.z)
    }

    /// World units between neighbouring grid samples.
    pub fn cell_size(&self) -> f32 {
        self.map.world_size() / (self.map.size() - 1) as f32
    }
}

impl HeightSource for TerrainSampler {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        TerrainSampler::height_at(self, x, z)
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{TerrainGenerator, TerrainParams};

    fn sampler(map_size: usize) -> TerrainSampler {
        let generator = TerrainGenerator::new(TerrainParams::default()).unwrap();
        TerrainSampler::new(generator.generate(map_size, 200.0).unwrap())
    }

    fn ramp() -> TerrainSampler {
        // 5x5 grid over 40m: grid step 10m, height = ix * 2
        let cells = (0..25).map(|i| (i / 5) as f32 * 2.0).collect();
        TerrainSampler::new(HeightMap::from_cells(5, 40.0, cells).unwrap())
    }

    #[test]
    fn test_center_plateau_exact() {
        assert_eq!(sampler(200).height_at(0.0, 0.0), 5.0);
    }

    #[test]
    fn test_far_edge_is_out_of_bounds() {
        let s = sampler(200);
        assert_eq!(s.height_at(100.0, 100.0), 0.0);
        assert_eq!(s.height_at(100.0, 0.0), 0.0);
        assert_eq!(s.height_at(500.0, -20.0), 0.0);
        assert_eq!(s.height_at(-100.1, 0.0), 0.0);
    }

    #[test]
    fn test_near_edge_is_in_bounds() {
        let s = sampler(200);
        // gx = 0, ix + 1 = 1 <= 199
        assert_eq!(s.height_at(-100.0, -100.0), s.heightmap().get(0, 0));
    }

    #[test]
    fn test_non_finite_query() {
        let s = ramp();
        assert_eq!(s.height_at(f32::NAN, 0.0), 0.0);
        assert_eq!(s.height_at(0.0, f32::INFINITY), 0.0);
    }

    #[test]
    fn test_bilinear_on_ramp() {
        let s = ramp();
        // x = -20 -> gx = 0; x = -15 -> gx = 0.5
        assert_eq!(s.height_at(-20.0, -20.0), 0.0);
        assert!((s.height_at(-15.0, -20.0) - 1.0).abs() < 1e-6);
        assert!((s.height_at(-15.0, -3.0) - 1.0).abs() < 1e-6);
        assert!((s.height_at(-10.0, -3.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_slope_on_ramp() {
        let s = ramp();
        // 2m rise per 10m run along X, flat along Z
        assert!((s.slope_at(-2.0, -5.0) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_continuity_between_samples() {
        let s = sampler(128);
        for i in 0..50 {
            let x = -90.0 + i as f32 * 3.7;
            let z = 80.0 - i as f32 * 3.1;
            let a = s.height_at(x, z);
            let b = s.height_at(x + 1e-3, z + 1e-3);
            assert!((a - b).abs() < 0.05, "jump at ({x}, {z}): {a} vs {b}");
        }
    }

    #[test]
    fn test_clamp_to_bounds() {
        let s = ramp();
        let p = s.clamp_to_bounds(Vec3::new(-50.0, 99.0, -3.0));
        assert_eq!(p.x, -20.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_bounds_match_world() {
        let b = sampler(16).bounds();
        assert_eq!(b.min, -100.0);
        assert_eq!(b.max, 100.0);
    }
}
