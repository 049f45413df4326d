//! Rejection-sampled scatter placement for scenery.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use super::config::{GrassClusterRule, ScatterRule};
use crate::entity::{EntityKind, EntitySet, FlowerBob, GrassBlade, GrassField, RockShape, TreeSpecies};
use crate::terrain::HeightSource;

/// Flower bloom colors.
pub const FLOWER_COLORS: [u32; 6] = [0xff69b4, 0xff1493, 0xffd700, 0xff4500, 0x9370db, 0x00bfff];

const FLOWER_BOB_AMPLITUDE: f32 = 0.05;

/// Draw up to `rule.count` ground points by rejection sampling.
///
/// Each draw is uniform over the bounds shrunk by `edge_margin`. A draw is
/// rejected when it falls inside `exclusion_radius` of the centre, lies
/// closer than `min_spacing` (XZ) to an accepted point, or has ground below
/// `min_height`. Stops after `max_attempts` draws.
pub fn scatter<H, R>(rule: &ScatterRule, terrain: &H, rng: &mut R) -> Vec<Vec3>
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut points = Vec::with_capacity(rule.count);
    if rule.count == 0 {
        return points;
    }

    let area = terrain.bounds().shrink(rule.edge_margin);
    let spacing_sq = rule.min_spacing * rule.min_spacing;
    let exclusion_sq = rule.exclusion_radius * rule.exclusion_radius;
    let mut attempts = 0;

    while points.len() < rule.count && attempts < rule.max_attempts {
        attempts += 1;
        let x = area.min + rng.r#gen::<f32>() * area.size();
        let z = area.min + rng.r#gen::<f32>() * area.size();

        if x * x + z * z < exclusion_sq {
            continue;
        }
        if spacing_sq > 0.0
            && points.iter().any(|p: &Vec3| {
                let dx = p.x - x;
                let dz = p.z - z;
                dx * dx + dz * dz < spacing_sq
            })
        {
            continue;
        }
        let y = terrain.height_at(x, z);
        if rule.min_height.is_some_and(|min| y < min) {
            continue;
        }
        points.push(Vec3::new(x, y, z));
    }

    if points.len() < rule.count {
        log::debug!(
            "Scatter placed {}/{} points in {} attempts",
            points.len(),
            rule.count,
            attempts
        );
    }
    points
}

/// Pine or oak, random yaw, uniform scale 0.8-1.4.
pub fn place_trees<H, R>(rule: &ScatterRule, terrain: &H, rng: &mut R, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    let points = scatter(rule, terrain, rng);
    for &p in &points {
        let species = if rng.gen_bool(0.5) { TreeSpecies::Pine } else { TreeSpecies::Oak };
        let scale = 0.8 + rng.r#gen::<f32>() * 0.6;
        let yaw = rng.r#gen::<f32>() * TAU;
        let tree = entities.spawn(EntityKind::Tree { species }, p);
        tree.scale = Vec3::splat(scale);
        tree.rotation.y = yaw;
    }
    points.len()
}

/// Random shape and tilt on every axis; scale 0.3-1.8 squashed to 80% height.
pub fn place_rocks<H, R>(rule: &ScatterRule, terrain: &H, rng: &mut R, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    let points = scatter(rule, terrain, rng);
    for &p in &points {
        let shape = RockShape::ALL[rng.gen_range(0..RockShape::ALL.len())];
        let rotation = Vec3::new(rng.r#gen::<f32>() * PI, rng.r#gen::<f32>() * PI, rng.r#gen::<f32>() * PI);
        let scale = 0.3 + rng.r#gen::<f32>() * 1.5;
        let rock = entities.spawn(EntityKind::Rock { shape }, p);
        rock.rotation = rotation;
        rock.scale = Vec3::new(scale, scale * 0.8, scale);
    }
    points.len()
}

/// Colored flowers with an individual bob speed and phase.
pub fn place_flowers<H, R>(rule: &ScatterRule, terrain: &H, rng: &mut R, entities: &mut EntitySet) -> usize
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    let points = scatter(rule, terrain, rng);
    for &p in &points {
        let color = FLOWER_COLORS[rng.gen_range(0..FLOWER_COLORS.len())];
        let yaw = rng.r#gen::<f32>() * TAU;
        let bob = FlowerBob {
            amplitude: FLOWER_BOB_AMPLITUDE,
            speed: 1.0 + rng.r#gen::<f32>() * 0.5,
            phase: rng.r#gen::<f32>() * TAU,
            offset: 0.0,
        };
        entities.spawn(EntityKind::Flower { color, bob }, p).rotation.y = yaw;
    }
    points.len()
}

/// Grass clusters over the whole world.
///
/// Cluster centres use one draw each (skipped inside the exclusion radius);
/// blades are spread uniformly in angle and radius around the centre.
pub fn place_grass<H, R>(rule: &GrassClusterRule, terrain: &H, rng: &mut R, grass: &mut GrassField) -> usize
where
    H: HeightSource + ?Sized,
    R: Rng + ?Sized,
{
    let bounds = terrain.bounds();
    let per_cluster = rule.blades_per_cluster();
    let exclusion_sq = rule.exclusion_radius * rule.exclusion_radius;
    let mut placed = 0;

    for _ in 0..rule.clusters {
        let cx = bounds.min + rng.r#gen::<f32>() * bounds.size();
        let cz = bounds.min + rng.r#gen::<f32>() * bounds.size();
        let radius = rule.radius_min + rng.r#gen::<f32>() * (rule.radius_max - rule.radius_min);
        if cx * cx + cz * cz < exclusion_sq {
            continue;
        }

        for _ in 0..per_cluster {
            if placed >= rule.total_blades {
                break;
            }
            let angle = rng.r#gen::<f32>() * TAU;
            let r = rng.r#gen::<f32>() * radius;
            let x = cx + angle.cos() * r;
            let z = cz + angle.sin() * r;
            let y = terrain.height_at(x, z);
            if y < rule.min_height {
                continue;
            }

            let yaw = rng.r#gen::<f32>() * PI;
            let tilt_x = (rng.r#gen::<f32>() - 0.5) * 2.0 * rule.max_tilt;
            let tilt_z = (rng.r#gen::<f32>() - 0.5) * 2.0 * rule.max_tilt;
            let height = rule.height_scale_min
                + rng.r#gen::<f32>() * (rule.height_scale_max - rule.height_scale_min);

            grass.push(GrassBlade {
                position: Vec3::new(x, y, z),
                rotation: Vec3::new(tilt_x, yaw, tilt_z),
                height_scale: height,
            });
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldRng;
    use crate::entity::EntityCategory;
    use crate::math::WorldBounds;

    /// Ground sloping down along X: height = -x / 10.
    struct Tilted;

    impl HeightSource for Tilted {
        fn height_at(&self, x: f32, _z: f32) -> f32 {
            -x / 10.0
        }

        fn bounds(&self) -> WorldBounds {
            WorldBounds::from_world_size(200.0)
        }
    }

    #[test]
    fn test_scatter_respects_spacing() {
        let mut rng = WorldRng::from_seed_u64(3);
        let rule = ScatterRule::flowers();
        let points = scatter(&rule, &Tilted, &mut rng.0);
        assert!(!points.is_empty());
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let d = ((a.x - b.x).powi(2) + (a.z - b.z).powi(2)).sqrt();
                assert!(d >= rule.min_spacing, "points {a} and {b} are {d} apart");
            }
        }
    }

    #[test]
    fn test_scatter_respects_margin_and_exclusion() {
        let mut rng = WorldRng::from_seed_u64(5);
        let rule = ScatterRule {
            count: 200,
            max_attempts: 2000,
            edge_margin: 10.0,
            exclusion_radius: 30.0,
            ..Default::default()
        };
        for p in scatter(&rule, &Tilted, &mut rng.0) {
            assert!(p.x.abs() <= 90.0 && p.z.abs() <= 90.0);
            assert!((p.x * p.x + p.z * p.z).sqrt() >= 30.0);
            assert_eq!(p.y, -p.x / 10.0);
        }
    }

    #[test]
    fn test_scatter_land_only() {
        let mut rng = WorldRng::from_seed_u64(9);
        let rule = ScatterRule { count: 50, max_attempts: 500, min_height: Some(0.0), ..Default::default() };
        let points = scatter(&rule, &Tilted, &mut rng.0);
        assert_eq!(points.len(), 50);
        // Height >= 0 means x <= 0
        assert!(points.iter().all(|p| p.x <= 0.0));
    }

    #[test]
    fn test_scatter_infeasible_terminates() {
        let mut rng = WorldRng::from_seed_u64(1);
        let rule = ScatterRule { count: 1000, max_attempts: 1000, min_spacing: 80.0, ..Default::default() };
        let points = scatter(&rule, &Tilted, &mut rng.0);
        assert!(!points.is_empty());
        assert!(points.len() < 20);
    }

    #[test]
    fn test_scatter_is_reproducible() {
        let rule = ScatterRule::rocks();
        let a = scatter(&rule, &Tilted, &mut WorldRng::from_seed_u64(11).0);
        let b = scatter(&rule, &Tilted, &mut WorldRng::from_seed_u64(11).0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_place_rocks_shapes_and_scale() {
        let mut rng = WorldRng::from_seed_u64(2);
        let mut set = EntitySet::new();
        let n = place_rocks(&ScatterRule::rocks(), &Tilted, &mut rng.0, &mut set);
        assert_eq!(n, 60);
        for rock in set.of_category(EntityCategory::Rock) {
            assert!((0.3..=1.8).contains(&rock.scale.x));
            assert!((rock.scale.y - rock.scale.x * 0.8).abs() < 1e-6);
            assert!(rock.zone.is_none());
        }
    }

    #[test]
    fn test_place_grass_skips_deep_ground() {
        let mut rng = WorldRng::from_seed_u64(4);
        let mut field = GrassField::new();
        let rule = GrassClusterRule::default();
        let n = place_grass(&rule, &Tilted, &mut rng.0, &mut field);
        assert_eq!(n, field.len());
        assert!(n > 0 && n <= rule.total_blades);
        for blade in field.blades() {
            assert!(blade.position.y >= -1.0);
            assert!(blade.rotation.x.abs() <= 0.1 + 1e-6);
            assert!((0.7..=1.3).contains(&blade.height_scale));
        }
    }

    #[test]
    fn test_place_flowers_palette() {
        let mut rng = WorldRng::from_seed_u64(8);
        let mut set = EntitySet::new();
        place_flowers(&ScatterRule::flowers(), &Tilted, &mut rng.0, &mut set);
        for flower in set.iter() {
            let EntityKind::Flower { color, bob } = &flower.kind else {
                panic!("expected flower");
            };
            assert!(FLOWER_COLORS.contains(color));
            assert!((1.0..=1.5).contains(&bob.speed));
        }
    }
}
