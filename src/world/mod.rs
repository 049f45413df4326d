//! The explorable world: terrain, environment, water and placed entities
//! behind one owned struct driven by the host's frame loop.

pub mod config;

pub use config::WorldConfig;

use glam::Vec3;

use crate::atmosphere::fog::compute_fog_factor;
use crate::atmosphere::{DayNightToggle, EnvironmentParameters, EnvironmentSystem};
use crate::core::time::{MonotonicClock, TimeSource};
use crate::core::{Result, RngStream, WorldRng};
use crate::entity::behavior::{self, FrameContext};
use crate::entity::{EntityCategory, EntitySet, GrassField, PlacedEntity, MAIN_ZONE};
use crate::generation::{Population, PopulationReport, Populator};
use crate::math::WorldBounds;
use crate::scene::{self, RenderTarget};
use crate::terrain::{HeightMap, TerrainGenerator, TerrainMesh, TerrainSampler};
use crate::water::WaterSurface;

/// A fully generated world.
///
/// `T` supplies wall-clock seconds for the day/night auto-cycle; every other
/// animation runs on the `dt` passed to [`World::update`].
pub struct World<T: TimeSource = MonotonicClock> {
    config: WorldConfig,
    time: T,
    terrain: TerrainSampler,
    mesh: TerrainMesh,
    environment: EnvironmentSystem,
    entities: EntitySet,
    grass: GrassField,
    population: PopulationReport,
    water: WaterSurface,
    behavior_rng: WorldRng,
    star_rng: WorldRng,
    stars_changed: bool,
    current_zone: String,
    /// Seconds accumulated from `update` deltas.
    elapsed: f64,
}

impl World<MonotonicClock> {
    /// Generate a world on the wall clock.
    pub fn new(config: WorldConfig) -> Result<Self> {
        Self::with_time_source(config, MonotonicClock::new())
    }
}

impl<T: TimeSource> World<T> {
    /// Generate a world whose auto-cycle reads `time`.
    pub fn with_time_source(config: WorldConfig, time: T) -> Result<Self> {
        config.validate()?;
        let start = std::time::Instant::now();
        let seed = config.seed;

        let generator = TerrainGenerator::new(config.terrain.clone())?;
        let map = HeightMap::generate(&generator, config.map_size, config.world_size)?;
        let terrain = TerrainSampler::new(map);
        let mesh = TerrainMesh::build(&terrain, config.mesh_segments);

        let mut star_rng = WorldRng::for_stream(seed, RngStream::Stars);
        let environment =
            EnvironmentSystem::new(config.environment.clone(), time.now_seconds(), &mut star_rng.0)?;

        let Population { entities, grass, report: population } =
            Populator::new(config.population.clone(), seed)?.populate(&terrain);

        let mut water_rng = WorldRng::for_stream(seed, RngStream::Water);
        let water = WaterSurface::new(
            &config.water,
            config.world_size,
            config.terrain.water_level,
            &mut water_rng.0,
        )?;

        log::info!(
            "World ready in {:.1}ms: {}m across, {} entities, {} grass blades, {} terrain triangles",
            start.elapsed().as_secs_f64() * 1000.0,
            config.world_size,
            entities.len(),
            grass.len(),
            mesh.triangle_count()
        );

        Ok(Self {
            config,
            time,
            terrain,
            mesh,
            environment,
            entities,
            grass,
            population,
            water,
            behavior_rng: WorldRng::for_stream(seed, RngStream::Behavior),
            star_rng,
            stars_changed: false,
            current_zone: MAIN_ZONE.to_string(),
            elapsed: 0.0,
        })
    }

    // -----------------------------------------------------------------------
    // Terrain
    // -----------------------------------------------------------------------

    /// Ground height at `(x, z)`; `0.0` outside the height map.
    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.terrain.height_at(x, z)
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        self.terrain.bounds()
    }

    pub fn terrain(&self) -> &TerrainSampler {
        &self.terrain
    }

    pub fn terrain_mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    // -----------------------------------------------------------------------
    // Day/night
    // -----------------------------------------------------------------------

    /// Snap to full day or full night. Returns whether it is now night.
    pub fn toggle_day_night(&mut self) -> bool {
        self.toggle_day_night_with_hint().is_night
    }

    /// Like [`World::toggle_day_night`], also returning the suggested
    /// transition duration.
    pub fn toggle_day_night_with_hint(&mut self) -> DayNightToggle {
        let toggle = self.environment.toggle_day_night();
        log::info!("Switched to {}", if toggle.is_night { "night" } else { "day" });
        toggle
    }

    /// Start or stop the automatic cycle. Returns whether it is running.
    pub fn toggle_day_night_cycle(&mut self) -> bool {
        let active = self.environment.toggle_cycle(self.time.now_seconds());
        log::info!("Day/night cycle {}", if active { "started" } else { "stopped" });
        active
    }

    pub fn time_of_day(&self) -> f32 {
        self.environment.clock().time_of_day()
    }

    pub fn is_night(&self) -> bool {
        self.environment.clock().is_night()
    }

    /// Current environment render parameters.
    pub fn environment(&self) -> &EnvironmentParameters {
        self.environment.params()
    }

    /// How much of a point `distance` units from the viewer is lost to the
    /// current fog, in `[0, 1]`.
    pub fn fog_factor(&self, distance: f32) -> f32 {
        compute_fog_factor(distance, &self.environment.params().fog)
    }

    pub fn environment_system(&self) -> &EnvironmentSystem {
        &self.environment
    }

    /// Jump to time of day `t` (clamped to `[0, 1]`).
    pub fn set_time_of_day(&mut self, t: f32) {
        self.environment.set_time(t);
    }

    /// Change the auto-cycle length in seconds.
    pub fn set_cycle_duration(&mut self, seconds: f32) -> Result<()> {
        self.environment.set_cycle_duration(seconds)
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance one frame of `dt` seconds.
    ///
    /// The auto-cycle advances by wall-clock time since its last update;
    /// entities, water and sky animation advance by `dt`. Negative or
    /// non-finite deltas count as zero.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.environment.update(self.time.now_seconds());
        self.elapsed += dt as f64;

        let ctx = FrameContext {
            terrain: &self.terrain,
            dt,
            elapsed: self.elapsed,
        };
        behavior::update_all(
            self.entities.as_mut_slice(),
            &self.current_zone,
            &ctx,
            &mut self.behavior_rng.0,
        );

        self.water.update(dt);
        if self.environment.twinkle(&mut self.star_rng.0) > 0 {
            self.stars_changed = true;
        }
    }

    /// Seconds accumulated from frame deltas.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    // -----------------------------------------------------------------------
    // Entities
    // -----------------------------------------------------------------------

    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    /// Static grass blades.
    pub fn grass(&self) -> &GrassField {
        &self.grass
    }

    pub fn population(&self) -> &PopulationReport {
        &self.population
    }

    /// First NPC in the current zone within reach of a sphere of `radius`.
    pub fn npc_at_position(&self, position: Vec3, radius: f32) -> Option<&PlacedEntity> {
        self.entities
            .interactable_at(EntityCategory::Npc, &self.current_zone, position, radius)
    }

    /// First portal in the current zone within reach of a sphere of `radius`.
    pub fn portal_at_position(&self, position: Vec3, radius: f32) -> Option<&PlacedEntity> {
        self.entities
            .interactable_at(EntityCategory::Portal, &self.current_zone, position, radius)
    }

    /// Hide the current zone's entities and show `zone`'s. Scenery stays.
    /// Returns `false` when already in `zone`.
    pub fn transport_to_world(&mut self, zone: &str) -> bool {
        if zone == self.current_zone {
            return false;
        }
        self.entities.switch_zone(&self.current_zone, zone);
        log::info!("Transported from '{}' to '{}'", self.current_zone, zone);
        self.current_zone = zone.to_string();
        true
    }

    pub fn current_zone(&self) -> &str {
        &self.current_zone
    }

    pub fn water(&self) -> &WaterSurface {
        &self.water
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Renderer
    // -----------------------------------------------------------------------

    /// Hand static geometry to a renderer. Call once per target.
    pub fn attach<R: RenderTarget + ?Sized>(&self, target: &mut R) {
        target.attach_terrain(&self.mesh);
        target.attach_stars(self.environment.stars().stars());
        target.attach_grass(&scene::grass_instances(&self.grass));
    }

    /// Push the current environment, sky animation, water and entity
    /// transforms to a renderer.
    pub fn apply<R: RenderTarget + ?Sized>(&mut self, target: &mut R) {
        scene::apply_environment(self.environment.params(), target);
        scene::apply_sky_motion(&self.environment.sky_motion(self.elapsed), target);
        if self.stars_changed {
            target.update_stars(self.environment.stars().stars());
            self.stars_changed = false;
        }
        let offsets: Vec<f32> = self.water.offsets().collect();
        target.set_water_offsets(&offsets);
        scene::sync_entities(&self.entities, target);
    }
}
