//! Per-frame updates for dynamic entity kinds.

use glam::Vec3;
use rand::Rng;

use super::{EntityKind, FlowerBob, PlacedEntity, Portal, Wander};
use crate::terrain::HeightSource;

/// Seconds between wander target changes.
pub const WANDER_INTERVAL: f32 = 5.0;
/// Horizontal distance at which an animal counts as arrived.
pub const ARRIVAL_DISTANCE: f32 = 0.1;
/// NPC idle turn rate, radians per second.
pub const NPC_TURN_RATE: f32 = 0.2;
/// Flower sway turn rate, radians per second.
pub const FLOWER_SWAY_RATE: f32 = 0.2;
/// Portal ring spin, radians per second.
pub const PORTAL_SPIN_RATE: f32 = 0.5;
pub const PORTAL_PULSE_BASE: f32 = 1.5;
pub const PORTAL_PULSE_AMPLITUDE: f32 = 0.5;
/// Portal pulse angular frequency, radians per second.
pub const PORTAL_PULSE_RATE: f64 = 2.0;

/// Everything a behavior may read while stepping one frame.
pub struct FrameContext<'a, H: HeightSource + ?Sized> {
    pub terrain: &'a H,
    /// Frame delta in seconds.
    pub dt: f32,
    /// Seconds since the world started.
    pub elapsed: f64,
}

/// Step every entity taking part in `zone`.
pub fn update_all<H, R>(
    entities: &mut [PlacedEntity],
    zone: &str,
    ctx: &FrameContext<'_, H>,
    rng: &mut R,
) where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    for entity in entities.iter_mut().filter(|e| e.is_in_zone(zone)) {
        update_entity(entity, ctx, rng);
    }
}

/// Step one entity by its kind. Static kinds are left untouched.
pub fn update_entity<H, R>(entity: &mut PlacedEntity, ctx: &FrameContext<'_, H>, rng: &mut R)
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    match &mut entity.kind {
        EntityKind::Animal { wander, .. } => {
            update_animal(&mut entity.position, &mut entity.rotation, wander, ctx, rng);
        }
        EntityKind::Npc { .. } => entity.rotation.y += NPC_TURN_RATE * ctx.dt,
        EntityKind::Portal(portal) => update_portal(portal, ctx),
        EntityKind::Flower { bob, .. } => {
            update_flower(bob, ctx.elapsed);
            entity.rotation.y += FLOWER_SWAY_RATE * ctx.dt;
        }
        EntityKind::Tree { .. } | EntityKind::Rock { .. } | EntityKind::House => {}
    }
}

/// Wander: every [`WANDER_INTERVAL`] pick a new target around the spawn
/// point, then close a fixed fraction of the remaining distance each frame.
fn update_animal<H, R>(
    position: &mut Vec3,
    rotation: &mut Vec3,
    wander: &mut Wander,
    ctx: &FrameContext<'_, H>,
    rng: &mut R,
) where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    wander.timer += ctx.dt;
    if wander.timer > WANDER_INTERVAL {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = rng.r#gen::<f32>() * wander.radius;
        let bounds = ctx.terrain.bounds();
        let x = (wander.spawn.x + angle.cos() * distance).clamp(bounds.min, bounds.max);
        let z = (wander.spawn.z + angle.sin() * distance).clamp(bounds.min, bounds.max);
        wander.target = Vec3::new(x, ctx.terrain.height_at(x, z), z);
        wander.timer = 0.0;
        log::trace!("Animal retargeted to ({x:.1}, {z:.1})");
    }

    let dx = wander.target.x - position.x;
    let dz = wander.target.z - position.z;
    if (dx * dx + dz * dz).sqrt() > ARRIVAL_DISTANCE {
        position.x += dx * wander.speed;
        position.z += dz * wander.speed;
        position.y = ctx.terrain.height_at(position.x, position.z);
        rotation.y = dz.atan2(dx) + std::f32::consts::FRAC_PI_2;
    }
}

fn update_portal<H: HeightSource + ?Sized>(portal: &mut Portal, ctx: &FrameContext<'_, H>) {
    portal.ring_angle += PORTAL_SPIN_RATE * ctx.dt;
    portal.light_intensity =
        PORTAL_PULSE_BASE + (ctx.elapsed * PORTAL_PULSE_RATE).sin() as f32 * PORTAL_PULSE_AMPLITUDE;
}

fn update_flower(bob: &mut FlowerBob, elapsed: f64) {
    bob.offset = (elapsed * bob.speed as f64 + bob.phase as f64).sin() as f32 * bob.amplitude;
}
