//! Top-level world configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atmosphere::EnvironmentConfig;
use crate::core::rng::DEFAULT_SEED;
use crate::core::{Error, Result};
use crate::generation::PopulationConfig;
use crate::terrain::TerrainParams;
use crate::water::WaterConfig;

/// Everything needed to build a [`super::World`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every random choice (placement, stars, water, wandering).
    pub seed: u64,
    /// Height samples per side.
    pub map_size: usize,
    /// World edge length in world units.
    pub world_size: f32,
    /// Grid cells per side of the rendered terrain mesh.
    pub mesh_segments: u32,
    pub terrain: TerrainParams,
    pub environment: EnvironmentConfig,
    pub population: PopulationConfig,
    pub water: WaterConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            map_size: 200,
            world_size: 200.0,
            mesh_segments: 200,
            terrain: TerrainParams::default(),
            environment: EnvironmentConfig::default(),
            population: PopulationConfig::default(),
            water: WaterConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Check every section. Called by `World::new`.
    pub fn validate(&self) -> Result<()> {
        if self.map_size < 2 {
            return Err(Error::invalid_config(format!(
                "map_size must be at least 2, got {}",
                self.map_size
            )));
        }
        if !(self.world_size.is_finite() && self.world_size > 0.0) {
            return Err(Error::invalid_config(format!(
                "world_size must be positive, got {}",
                self.world_size
            )));
        }
        if self.mesh_segments == 0 {
            return Err(Error::invalid_config("mesh_segments must be positive"));
        }
        self.terrain.validate()?;
        self.environment.validate()?;
        self.population.validate()?;
        self.water.validate()
    }

    /// Read and validate a config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("Loaded world config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
