//! End-to-end checks over a full-size world.

use glam::Vec3;

use wayfarer::atmosphere::{derive, EnvironmentConfig};
use wayfarer::core::time::ManualClock;
use wayfarer::core::WorldRng;
use wayfarer::entity::EntityCategory;
use wayfarer::generation::{scatter, ScatterRule};
use wayfarer::terrain::{HeightMap, TerrainGenerator, TerrainParams, TerrainSampler};
use wayfarer::{World, WorldConfig};

fn sampler(map_size: usize, world_size: f32) -> TerrainSampler {
    wayfarer::core::logging::init_for_tests();
    let generator = TerrainGenerator::new(TerrainParams::default()).unwrap();
    TerrainSampler::new(HeightMap::generate(&generator, map_size, world_size).unwrap())
}

#[test]
fn test_reference_world_heights() {
    let terrain = sampler(200, 200.0);
    assert_eq!(terrain.height_at(0.0, 0.0), 5.0);
    // Far corner maps to index 199, whose neighbour 200 is off the grid
    assert_eq!(terrain.height_at(100.0, 100.0), 0.0);
    // Near corner is the first cell and stays in range
    let near = terrain.height_at(-100.0, -100.0);
    assert_eq!(near, terrain.heightmap().get(0, 0));
}

#[test]
fn test_generation_is_bit_exact() {
    let a = sampler(200, 200.0);
    let b = sampler(200, 200.0);
    let same = a
        .heightmap()
        .cells()
        .iter()
        .zip(b.heightmap().cells())
        .all(|(x, y)| x.to_bits() == y.to_bits());
    assert!(same);
}

#[test]
fn test_height_is_continuous_and_floored() {
    let terrain = sampler(200, 200.0);
    let eps = 0.01;
    for i in 0..60 {
        for j in 0..60 {
            let x = -99.0 + i as f32 * 3.27;
            let z = -99.0 + j as f32 * 3.27;
            if x + eps >= 99.4 {
                continue;
            }
            let h = terrain.height_at(x, z);
            assert!(h >= 0.0, "height {h} below floor at ({x}, {z})");
            let dh = (terrain.height_at(x + eps, z) - h).abs();
            assert!(dh < 0.5, "seam at ({x}, {z}): {dh}");
        }
    }
}

#[test]
fn test_day_night_cycle_round_trip() {
    let clock = ManualClock::new();
    let config = WorldConfig { map_size: 48, mesh_segments: 16, ..Default::default() };
    let mut world = World::with_time_source(config, clock.clone()).unwrap();
    world.set_time_of_day(0.3);
    world.toggle_day_night_cycle();
    for _ in 0..60 {
        clock.advance(1.0);
        world.update(1.0);
    }
    assert!((world.time_of_day() - 0.3).abs() < 1e-4);
}

#[test]
fn test_derive_pivot_and_idempotence() {
    let config = EnvironmentConfig::default();
    assert_eq!(derive(0.42, &config), derive(0.42, &config));

    let before = derive(0.49, &config);
    let after = derive(0.51, &config);
    assert_ne!(before.fog, after.fog);
    assert_ne!(before.ambient.color, after.ambient.color);

    let day = derive(0.0, &config);
    let night = derive(1.0, &config);
    assert_eq!(day.moon_light.intensity, 0.0);
    assert_eq!(night.sun.intensity, 0.0);
    assert!(day.sun.intensity > night.sun.intensity);
    assert!(night.moon_light.intensity > 0.0);
}

#[test]
fn test_flower_spacing_on_real_terrain() {
    let terrain = sampler(200, 200.0);
    let rule = ScatterRule::flowers();
    for seed in 0..5 {
        let points = scatter(&rule, &terrain, &mut WorldRng::from_seed_u64(seed).0);
        for (i, a) in points.iter().enumerate() {
            assert!(a.x.abs() <= 95.0 && a.z.abs() <= 95.0);
            for b in &points[i + 1..] {
                let d = Vec3::new(a.x - b.x, 0.0, a.z - b.z).length();
                assert!(d >= rule.min_spacing);
            }
        }
    }
}

#[test]
fn test_loaded_tree_override_keeps_spawn_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    std::fs::write(
        &path,
        r#"{ "map_size": 100, "mesh_segments": 16,
             "population": { "trees": { "count": 300, "max_attempts": 300 } } }"#,
    )
    .unwrap();
    let config = WorldConfig::load(&path).unwrap();
    let world = World::with_time_source(config, ManualClock::new()).unwrap();
    let trees: Vec<_> = world.entities().of_category(EntityCategory::Tree).collect();
    assert!(trees.len() > 100);
    for tree in trees {
        assert!(tree.position.y >= 0.0);
        assert!(Vec3::new(tree.position.x, 0.0, tree.position.z).length() >= 15.0);
    }
}

#[test]
fn test_default_world_population() {
    let world = World::with_time_source(WorldConfig::default(), ManualClock::new()).unwrap();
    let entities = world.entities();
    assert_eq!(entities.count(EntityCategory::Rock), 60);
    assert_eq!(entities.count(EntityCategory::Npc), 6);
    assert_eq!(entities.count(EntityCategory::House), 4);
    assert_eq!(entities.count(EntityCategory::Animal), 6);
    assert_eq!(entities.count(EntityCategory::Portal), 3);
    for tree in entities.of_category(EntityCategory::Tree) {
        assert!(tree.position.y >= 0.0);
        assert!(Vec3::new(tree.position.x, 0.0, tree.position.z).length() >= 15.0);
    }
}

#[test]
fn test_same_seed_same_world() {
    let config = WorldConfig { map_size: 64, mesh_segments: 16, seed: 1234, ..Default::default() };
    let a = World::with_time_source(config.clone(), ManualClock::new()).unwrap();
    let b = World::with_time_source(config, ManualClock::new()).unwrap();
    assert_eq!(a.entities().as_slice(), b.entities().as_slice());
}
