//! Procedural terrain generation

pub mod noise;
pub use noise::{NoiseField, NoiseSource};

pub mod generator;
pub use generator::{Octave, TerrainGenerator, TerrainParams};

pub mod heightmap;
pub use heightmap::HeightMap;

pub mod sampler;
pub use sampler::{HeightSource, TerrainSampler};

pub mod biome;
pub use biome::SurfaceBand;

pub mod mesh;
pub use mesh::TerrainMesh;
