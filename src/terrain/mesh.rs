//! Renderable terrain surface
//!
//! A regular grid of `(segments + 1)²` vertices spanning the world, each
//! snapped to the sampled ground height, with smooth normals and vertex
//! colors from the surface bands.

use glam::Vec3;

use super::biome::vertex_color;
use super::sampler::TerrainSampler;

/// Vertex data for the terrain surface, triangle list.
#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build the surface with `segments` quads per side.
    pub fn build(sampler: &TerrainSampler, segments: u32) -> Self {
        let segments = segments.max(1) as usize;
        let n = segments + 1;
        let bounds = sampler.bounds();
        let step = bounds.size() / segments as f32;

        let mut positions = Vec::with_capacity(n * n);
        let mut normals = Vec::with_capacity(n * n);
        let mut indices = Vec::with_capacity(segments * segments * 6);

        for j in 0..n {
            for i in 0..n {
                let x = bounds.min + i as f32 * step;
                let z = bounds.min + j as f32 * step;
                positions.push([x, sampler.height_at(x, z), z]);
                normals.push(surface_normal(sampler, x, z, step).to_array());
            }
        }

        // Slope is the rise to the next vertex in buffer order; the final
        // vertex has none.
        let colors = (0..positions.len())
            .map(|v| {
                let y = positions[v][1];
                let slope = positions.get(v + 1).map_or(0.0, |next| (next[1] - y).abs());
                vertex_color(y, slope)
            })
            .collect();

        for j in 0..segments {
            for i in 0..segments {
                let a = (j * n + i) as u32;
                let b = a + 1;
                let c = a + n as u32;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        log::debug!(
            "Built terrain mesh: {} vertices, {} triangles",
            positions.len(),
            indices.len() / 3
        );

        Self { positions, normals, colors, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn surface_normal(sampler: &TerrainSampler, x: f32, z: f32, step: f32) -> Vec3 {
    let dx = sampler.height_at(x + step, z) - sampler.height_at(x - step, z);
    let dz = sampler.height_at(x, z + step) - sampler.height_at(x, z - step);
    Vec3::new(-dx, 2.0 * step, -dz).normalize_or(Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HeightMap;

    fn flat(height: f32) -> TerrainSampler {
        TerrainSampler::new(HeightMap::from_cells(3, 20.0, vec![height; 9]).unwrap())
    }

    #[test]
    fn test_counts() {
        let mesh = TerrainMesh::build(&flat(3.0), 4);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.colors.len(), 25);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_spans_world() {
        let mesh = TerrainMesh::build(&flat(3.0), 4);
        assert_eq!(mesh.positions[0][0], -10.0);
        assert_eq!(mesh.positions[24][0], 10.0);
        assert_eq!(mesh.positions[24][2], 10.0);
    }

    #[test]
    fn test_interior_normals_up_on_flat_ground() {
        let mesh = TerrainMesh::build(&flat(3.0), 8);
        // vertex (2, 2) is well inside the sampled area
        let n = mesh.normals[2 * 9 + 2];
        assert!((n[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_colors_follow_height() {
        let mesh = TerrainMesh::build(&flat(3.0), 8);
        assert_eq!(mesh.colors[2 * 9 + 2], vertex_color(3.0, 0.0));
    }
}
