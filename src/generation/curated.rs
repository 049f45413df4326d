//! Hand-authored content: villagers, houses, wildlife and portals.
//!
//! Positions are fixed; only the ground height is queried, plus a random
//! starting yaw for characters.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::entity::{
    AnimalSpecies, EntityKind, EntitySet, NpcRole, Portal, Wander, MAIN_ZONE,
};
use crate::terrain::HeightSource;

pub const NPC_INTERACTION_RADIUS: f32 = 5.0;
pub const PORTAL_INTERACTION_RADIUS: f32 = 3.5;
/// Portals hover this far above the ground.
pub const PORTAL_ELEVATION: f32 = 3.0;
/// Portal light intensity before the first pulse.
pub const PORTAL_BASE_LIGHT: f32 = 2.0;

pub const NPC_SITES: [(f32, f32, NpcRole); 6] = [
    (15.0, 15.0, NpcRole::Villager),
    (-20.0, 25.0, NpcRole::Trader),
    (5.0, -15.0, NpcRole::Elder),
    (-15.0, -20.0, NpcRole::Villager),
    (30.0, -5.0, NpcRole::Trader),
    (-10.0, 40.0, NpcRole::Elder),
];

/// A house footprint: position, yaw and uniform scale.
#[derive(Clone, Copy, Debug)]
pub struct HouseSite {
    pub x: f32,
    pub z: f32,
    pub yaw: f32,
    pub scale: f32,
}

pub const HOUSE_SITES: [HouseSite; 4] = [
    HouseSite { x: 20.0, z: 20.0, yaw: PI * 0.25, scale: 1.2 },
    HouseSite { x: -25.0, z: 30.0, yaw: PI * 1.5, scale: 1.0 },
    HouseSite { x: 5.0, z: -20.0, yaw: PI * 0.8, scale: 1.3 },
    HouseSite { x: -15.0, z: -25.0, yaw: PI * 0.1, scale: 0.9 },
];

pub const ANIMAL_SITES: [(f32, f32, AnimalSpecies); 6] = [
    (30.0, 30.0, AnimalSpecies::Deer),
    (-10.0, 15.0, AnimalSpecies::Rabbit),
    (25.0, -20.0, AnimalSpecies::Fox),
    (-30.0, -25.0, AnimalSpecies::Deer),
    (15.0, 40.0, AnimalSpecies::Rabbit),
    (-35.0, 10.0, AnimalSpecies::Fox),
];

/// A portal to another zone.
#[derive(Clone, Copy, Debug)]
pub struct PortalSite {
    pub x: f32,
    pub z: f32,
    pub target_zone: &'static str,
    pub color: u32,
    pub description: &'static str,
}

pub const PORTAL_SITES: [PortalSite; 3] = [
    PortalSite {
        x: 50.0,
        z: 0.0,
        target_zone: "desert",
        color: 0xffcc00,
        description: "A shimmering golden portal that radiates heat. Desert world awaits.",
    },
    PortalSite {
        x: 0.0,
        z: 50.0,
        target_zone: "snow",
        color: 0x00ccff,
        description: "A cool blue portal with snowflakes hovering around it. Winter wonderland.",
    },
    PortalSite {
        x: -50.0,
        z: 0.0,
        target_zone: "lava",
        color: 0xff3300,
        description: "A blazing red portal that pulses with heat. Volcanic landscape.",
    },
];

pub fn place_npcs<H, R>(terrain: &H, rng: &mut R, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    for &(x, z, role) in &NPC_SITES {
        let kind = EntityKind::Npc { role, interaction_radius: NPC_INTERACTION_RADIUS };
        let npc = entities.spawn(kind, Vec3::new(x, terrain.height_at(x, z), z));
        npc.rotation.y = rng.r#gen::<f32>() * TAU;
        npc.zone = Some(MAIN_ZONE.into());
    }
    NPC_SITES.len()
}

pub fn place_houses<H>(terrain: &H, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
{
    for site in &HOUSE_SITES {
        let house = entities.spawn(EntityKind::House, Vec3::new(site.x, terrain.height_at(site.x, site.z), site.z));
        house.rotation.y = site.yaw;
        house.scale = Vec3::splat(site.scale);
        house.zone = Some(MAIN_ZONE.into());
    }
    HOUSE_SITES.len()
}

pub fn place_animals<H, R>(terrain: &H, rng: &mut R, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    for &(x, z, species) in &ANIMAL_SITES {
        let spawn = Vec3::new(x, terrain.height_at(x, z), z);
        let wander = Wander {
            spawn,
            target: spawn,
            speed: species.speed(),
            radius: species.wander_radius(),
            timer: 0.0,
        };
        let animal = entities.spawn(EntityKind::Animal { species, wander }, spawn);
        animal.rotation.y = rng.r#gen::<f32>() * TAU;
        animal.zone = Some(MAIN_ZONE.into());
    }
    ANIMAL_SITES.len()
}

/// Portals stand upright, [`PORTAL_ELEVATION`] above the ground.
pub fn place_portals<H>(terrain: &H, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
{
    for site in &PORTAL_SITES {
        let y = terrain.height_at(site.x, site.z) + PORTAL_ELEVATION;
        let portal = Portal {
            target_zone: site.target_zone.to_string(),
            color: site.color,
            description: site.description.to_string(),
            interaction_radius: PORTAL_INTERACTION_RADIUS,
            ring_angle: 0.0,
            light_intensity: PORTAL_BASE_LIGHT,
        };
        let entity = entities.spawn(EntityKind::Portal(portal), Vec3::new(site.x, y, site.z));
        entity.rotation.x = FRAC_PI_2;
        entity.zone = Some(MAIN_ZONE.into());
    }
    PORTAL_SITES.len()
}
