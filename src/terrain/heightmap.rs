//! Immutable elevation grid

use rayon::prelude::*;

use super::generator::TerrainGenerator;
use crate::core::{Error, Result};

/// Square grid of elevation samples covering `[-world_size/2, world_size/2]`
/// on both horizontal axes.
///
/// Stored as a flat `Vec` indexed `[ix * size + iz]`. Built once; there is
/// no API to modify it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    size: usize,
    world_size: f32,
    cells: Vec<f32>,
}

impl HeightMap {
    /// Generate a `map_size × map_size` grid.
    ///
    /// Grid index `i` maps to normalized coordinate `i / (map_size - 1) - 0.5`,
    /// the same mapping [`super::TerrainSampler`] uses in reverse. Rows are
    /// computed in parallel; every cell is independent, so the result does
    /// not depend on scheduling.
    pub fn generate(generator: &TerrainGenerator, map_size: usize, world_size: f32) -> Result<Self> {
        if map_size < 2 {
            return Err(Error::invalid_config(format!(
                "map_size must be at least 2, got {map_size}"
            )));
        }
        if !(world_size.is_finite() && world_size > 0.0) {
            return Err(Error::invalid_config(format!(
                "world_size must be positive, got {world_size}"
            )));
        }

        let start = std::time::Instant::now();
        let last = (map_size - 1) as f32;
        let mut cells = vec![0.0_f32; map_size * map_size];

        cells
            .par_chunks_mut(map_size)
            .enumerate()
            .for_each(|(ix, row)| {
                let nx = ix as f32 / last - 0.5;
                for (iz, cell) in row.iter_mut().enumerate() {
                    let nz = iz as f32 / last - 0.5;
                    *cell = generator.height_at_normalized(nx, nz);
                }
            });

        let map = Self { size: map_size, world_size, cells };
        let (min_h, max_h) = map.height_range();
        log::info!(
            "Generated {}x{} height map over {}m in {:.1}ms (height {:.2}..{:.2})",
            map_size,
            map_size,
            world_size,
            start.elapsed().as_secs_f64() * 1000.0,
            min_h,
            max_h
        );
        Ok(map)
    }

    /// Build a height map from raw row-major samples.
    pub fn from_cells(size: usize, world_size: f32, cells: Vec<f32>) -> Result<Self> {
        if size < 2 || cells.len() != size * size {
            return Err(Error::invalid_config(format!(
                "expected {}x{} cells, got {}",
                size,
                size,
                cells.len()
            )));
        }
        if !(world_size.is_finite() && world_size > 0.0) {
            return Err(Error::invalid_config(format!(
                "world_size must be positive, got {world_size}"
            )));
        }
        Ok(Self { size, world_size, cells })
    }

    /// Samples per side
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// World extent covered, in world units
    #[inline]
    pub fn world_size(&self) -> f32 {
        self.world_size
    }

    /// Sample at grid index. Caller guarantees `ix, iz < size`.
    #[inline]
    pub fn get(&self, ix: usize, iz: usize) -> f32 {
        self.cells[ix * self.size + iz]
    }

    /// All samples, row-major by X.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Lowest and highest sample.
    pub fn height_range(&self) -> (f32, f32) {
        self.cells.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::generator::TerrainParams;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(TerrainParams::default()).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = HeightMap::generate(&generator(), 64, 200.0).unwrap();
        let b = HeightMap::generate(&generator(), 64, 200.0).unwrap();
        assert_eq!(a.cells().len(), 64 * 64);
        assert!(a
            .cells()
            .iter()
            .zip(b.cells())
            .all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn test_rejects_tiny_map() {
        assert!(matches!(
            HeightMap::generate(&generator(), 1, 200.0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_world() {
        assert!(HeightMap::generate(&generator(), 16, 0.0).is_err());
        assert!(HeightMap::generate(&generator(), 16, f32::NAN).is_err());
    }

    #[test]
    fn test_floor_and_layering() {
        let map = HeightMap::generate(&generator(), 100, 200.0).unwrap();
        let (min_h, max_h) = map.height_range();
        assert!(min_h >= 0.0);
        assert!(max_h > 5.0, "terrain should rise above the plateau somewhere");
    }

    #[test]
    fn test_from_cells_validates_len() {
        assert!(HeightMap::from_cells(3, 10.0, vec![0.0; 8]).is_err());
        let map = HeightMap::from_cells(2, 10.0, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(map.get(1, 0), 3.0);
        assert_eq!(map.get(0, 1), 2.0);
    }
}
