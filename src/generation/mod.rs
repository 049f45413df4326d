//! World population pipeline: places scenery and curated content on the
//! terrain.
//!
//! The pipeline runs in a fixed order so a seed always yields the same world:
//! 1. Trees, rocks and grass clusters (rejection sampling)
//! 2. Flowers (rejection sampling with minimum spacing)
//! 3. NPCs, houses, animals and portals (fixed sites)

pub mod config;
pub mod curated;
pub mod populator;

pub use config::{GrassClusterRule, PopulationConfig, ScatterRule};
pub use populator::scatter;

use serde::Serialize;

use crate::core::{Result, RngStream, WorldRng};
use crate::entity::{EntitySet, GrassField};
use crate::terrain::HeightSource;

/// How many entities of each kind were placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PopulationReport {
    pub trees: usize,
    pub rocks: usize,
    pub grass: usize,
    pub flowers: usize,
    pub npcs: usize,
    pub houses: usize,
    pub animals: usize,
    pub portals: usize,
}

impl PopulationReport {
    pub fn total(&self) -> usize {
        self.trees
            + self.rocks
            + self.grass
            + self.flowers
            + self.npcs
            + self.houses
            + self.animals
            + self.portals
    }
}

/// Everything a populator placed.
#[derive(Clone, Debug, Default)]
pub struct Population {
    pub entities: EntitySet,
    pub grass: GrassField,
    pub report: PopulationReport,
}

/// Places every entity of a world from its population config and seed.
pub struct Populator {
    config: PopulationConfig,
    seed: u64,
}

impl Populator {
    pub fn new(config: PopulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, seed })
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    /// Populate `terrain`. Infeasible rules yield fewer entities, never an
    /// error.
    pub fn populate<H>(&self, terrain: &H) -> Population
    where
        H: HeightSource + ?Sized,
    {
        let start = std::time::Instant::now();
        let mut rng = WorldRng::for_stream(self.seed, RngStream::Population);
        let rng = &mut rng.0;
        let mut entities = EntitySet::new();
        let mut grass = GrassField::with_capacity(self.config.grass.total_blades);
        let mut report = PopulationReport::default();
        let c = &self.config;

        report.trees = populator::place_trees(&c.trees, terrain, rng, &mut entities);
        report.rocks = populator::place_rocks(&c.rocks, terrain, rng, &mut entities);
        report.grass = populator::place_grass(&c.grass, terrain, rng, &mut grass);
        report.flowers = populator::place_flowers(&c.flowers, terrain, rng, &mut entities);

        if c.curated {
            report.npcs = curated::place_npcs(terrain, rng, &mut entities);
            report.houses = curated::place_houses(terrain, &mut entities);
            report.animals = curated::place_animals(terrain, rng, &mut entities);
            report.portals = curated::place_portals(terrain, &mut entities);
        }

        log::info!(
            "Populated world in {:.1}ms: {} trees, {} rocks, {} grass blades, {} flowers, {} curated",
            start.elapsed().as_secs_f64() * 1000.0,
            report.trees,
            report.rocks,
            report.grass,
            report.flowers,
            report.npcs + report.houses + report.animals + report.portals,
        );
        Population { entities, grass, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityCategory;
    use crate::math::WorldBounds;

    /// Gentle bowl: zero at the centre, rising outward.
    struct Bowl;

    impl HeightSource for Bowl {
        fn height_at(&self, x: f32, z: f32) -> f32 {
            (x * x + z * z).sqrt() * 0.05
        }

        fn bounds(&self) -> WorldBounds {
            WorldBounds::from_world_size(200.0)
        }
    }

    #[test]
    fn test_populate_counts_match_entities() {
        let populator = Populator::new(PopulationConfig::default(), 42).unwrap();
        let Population { entities, grass, report } = populator.populate(&Bowl);
        assert_eq!(report.total(), entities.len() + grass.len());
        assert_eq!(report.grass, grass.len());
        assert_eq!(report.trees, entities.count(EntityCategory::Tree));
        assert_eq!(report.portals, 3);
        assert_eq!(report.npcs, 6);
        assert!(report.trees <= 100);
        assert_eq!(report.rocks, 60);
    }

    #[test]
    fn test_populate_is_deterministic() {
        let populator = Populator::new(PopulationConfig::default(), 7).unwrap();
        let a = populator.populate(&Bowl);
        let b = populator.populate(&Bowl);
        assert_eq!(a.entities.as_slice(), b.entities.as_slice());
        assert_eq!(a.grass, b.grass);
    }

    #[test]
    fn test_seed_changes_layout() {
        let a = Populator::new(PopulationConfig::default(), 1).unwrap().populate(&Bowl);
        let b = Populator::new(PopulationConfig::default(), 2).unwrap().populate(&Bowl);
        assert_ne!(a.entities.get(0).map(|e| e.position), b.entities.get(0).map(|e| e.position));
    }

    #[test]
    fn test_empty_config() {
        let population = Populator::new(PopulationConfig::empty(), 1).unwrap().populate(&Bowl);
        assert!(population.entities.is_empty());
        assert!(population.grass.is_empty());
        assert_eq!(population.report.total(), 0);
    }

    #[test]
    fn test_rejects_invalid_rule() {
        let mut config = PopulationConfig::default();
        config.flowers.max_attempts = 0;
        assert!(Populator::new(config, 1).is_err());
    }
}
