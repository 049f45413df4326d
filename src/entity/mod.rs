//! Placed world entities.
//!
//! Every tree, rock, flower, NPC, animal, house and portal is a
//! [`PlacedEntity`] record whose kind-specific state lives in the
//! [`EntityKind`] variant. Dynamic kinds are stepped by the functions in
//! [`behavior`]. Grass blades are static instances in a [`GrassField`].

pub mod behavior;
pub mod grass;

pub use grass::{GrassBlade, GrassField};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Zone every curated entity starts in, and the zone the player spawns in.
pub const MAIN_ZONE: &str = "main";

/// Stable entity handle, assigned in spawn order.
pub type EntityId = u32;

// ---------------------------------------------------------------------------
// Kind tags
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeSpecies {
    Pine,
    Oak,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RockShape {
    /// Low-detail dodecahedron
    Dodecahedron,
    /// Subdivided dodecahedron
    RoundedDodecahedron,
    Icosahedron,
}

impl RockShape {
    pub const ALL: [RockShape; 3] = [
        RockShape::Dodecahedron,
        RockShape::RoundedDodecahedron,
        RockShape::Icosahedron,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcRole {
    Villager,
    Trader,
    Elder,
}

impl NpcRole {
    /// Body color
    pub fn color(&self) -> u32 {
        match self {
            NpcRole::Villager => 0x8d5524,
            NpcRole::Trader => 0x3b5998,
            NpcRole::Elder => 0x800080,
        }
    }

    /// Standing height in world units
    pub fn height(&self) -> f32 {
        match self {
            NpcRole::Villager => 1.8,
            NpcRole::Trader => 1.9,
            NpcRole::Elder => 1.7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalSpecies {
    Deer,
    Rabbit,
    Fox,
}

impl AnimalSpecies {
    /// Fraction of the remaining distance covered per frame.
    pub fn speed(&self) -> f32 {
        match self {
            AnimalSpecies::Deer => 0.02,
            AnimalSpecies::Rabbit => 0.04,
            AnimalSpecies::Fox => 0.03,
        }
    }

    /// Maximum distance a wander target may lie from the spawn point.
    pub fn wander_radius(&self) -> f32 {
        match self {
            AnimalSpecies::Deer => 10.0,
            AnimalSpecies::Rabbit => 5.0,
            AnimalSpecies::Fox => 15.0,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            AnimalSpecies::Deer => 0x8b4513,
            AnimalSpecies::Rabbit => 0xa9a9a9,
            AnimalSpecies::Fox => 0xd2691e,
        }
    }
}

/// Coarse entity category, for counting and proximity filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Tree,
    Rock,
    Flower,
    Npc,
    Animal,
    House,
    Portal,
}

// ---------------------------------------------------------------------------
// Kind-specific state
// ---------------------------------------------------------------------------

/// Flower bobbing animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowerBob {
    pub amplitude: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
    pub phase: f32,
    /// Current vertical offset from the ground position.
    pub offset: f32,
}

/// Animal wander state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wander {
    pub spawn: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub radius: f32,
    /// Seconds since the target was last chosen.
    pub timer: f32,
}

/// Portal travel and pulse state.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub target_zone: String,
    pub color: u32,
    pub description: String,
    pub interaction_radius: f32,
    /// Spin of the visual ring, radians.
    pub ring_angle: f32,
    /// Current intensity of the portal's point light.
    pub light_intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Tree { species: TreeSpecies },
    Rock { shape: RockShape },
    Flower { color: u32, bob: FlowerBob },
    Npc { role: NpcRole, interaction_radius: f32 },
    Animal { species: AnimalSpecies, wander: Wander },
    House,
    Portal(Portal),
}

impl EntityKind {
    pub fn category(&self) -> EntityCategory {
        match self {
            EntityKind::Tree { .. } => EntityCategory::Tree,
            EntityKind::Rock { .. } => EntityCategory::Rock,
            EntityKind::Flower { .. } => EntityCategory::Flower,
            EntityKind::Npc { .. } => EntityCategory::Npc,
            EntityKind::Animal { .. } => EntityCategory::Animal,
            EntityKind::House => EntityCategory::House,
            EntityKind::Portal(_) => EntityCategory::Portal,
        }
    }
}

// ---------------------------------------------------------------------------
// PlacedEntity
// ---------------------------------------------------------------------------

/// A single entity placed on the terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec3,
    /// Euler rotation in radians; `y` is yaw.
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Zone the entity belongs to. `None` marks scenery present in every zone.
    pub zone: Option<String>,
    pub visible: bool,
}

impl PlacedEntity {
    pub fn new(id: EntityId, kind: EntityKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            zone: None,
            visible: true,
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation.y = yaw;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn in_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    #[inline]
    pub fn category(&self) -> EntityCategory {
        self.kind.category()
    }

    /// Whether the entity takes part in `zone` (scenery always does).
    pub fn is_in_zone(&self, zone: &str) -> bool {
        self.zone.as_deref().is_none_or(|z| z == zone)
    }

    /// Reach for proximity queries, for kinds the player can interact with.
    pub fn interaction_radius(&self) -> Option<f32> {
        match &self.kind {
            EntityKind::Npc { interaction_radius, .. } => Some(*interaction_radius),
            EntityKind::Portal(portal) => Some(portal.interaction_radius),
            _ => None,
        }
    }

    /// Position the renderer should draw at, including cosmetic offsets.
    pub fn render_position(&self) -> Vec3 {
        match &self.kind {
            EntityKind::Flower { bob, .. } => self.position + Vec3::Y * bob.offset,
            _ => self.position,
        }
    }
}

// ---------------------------------------------------------------------------
// EntitySet
// ---------------------------------------------------------------------------

/// All placed entities, in spawn order.
#[derive(Clone, Debug, Default)]
pub struct EntitySet {
    entities: Vec<PlacedEntity>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity built from its kind and position. Returns it for
    /// further setup.
    pub fn spawn(&mut self, kind: EntityKind, position: Vec3) -> &mut PlacedEntity {
        let id = self.entities.len() as EntityId;
        self.entities.push(PlacedEntity::new(id, kind, position));
        let last = self.entities.len() - 1;
        &mut self.entities[last]
    }

    pub fn get(&self, id: EntityId) -> Option<&PlacedEntity> {
        self.entities.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedEntity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedEntity> {
        self.entities.iter_mut()
    }

    pub fn as_slice(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn as_mut_slice(&mut self) -> &mut [PlacedEntity] {
        &mut self.entities
    }

    pub fn of_category(&self, category: EntityCategory) -> impl Iterator<Item = &PlacedEntity> {
        self.entities.iter().filter(move |e| e.category() == category)
    }

    pub fn count(&self, category: EntityCategory) -> usize {
        self.of_category(category).count()
    }

    /// First entity of `category` in `zone` whose interaction sphere
    /// overlaps a sphere of `radius` around `position`.
    ///
    /// Matches when `distance <= radius + interaction_radius`; candidates
    /// are checked in spawn order.
    pub fn interactable_at(
        &self,
        category: EntityCategory,
        zone: &str,
        position: Vec3,
        radius: f32,
    ) -> Option<&PlacedEntity> {
        self.entities.iter().find(|e| {
            e.category() == category
                && e.zone.as_deref() == Some(zone)
                && e.interaction_radius()
                    .is_some_and(|reach| position.distance(e.position) <= radius + reach)
        })
    }

    /// Hide every zoned entity in `from` and show every zoned entity in `to`.
    /// Scenery is untouched.
    pub fn switch_zone(&mut self, from: &str, to: &str) {
        for entity in &mut self.entities {
            match entity.zone.as_deref() {
                Some(z) if z == from => entity.visible = false,
                Some(z) if z == to => entity.visible = true,
                _ => {}
            }
        }
    }
}
