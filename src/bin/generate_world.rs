//! Headless world generator: builds a world, runs it for a number of frames
//! with the day/night cycle on, and writes a JSON summary.
//!
//! Usage: cargo run --release --bin generate_world -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   World config JSON (default: built-in defaults)
//!   --seed <SEED>     Random seed (overrides the config)
//!   --size <METERS>   World size in meters (overrides the config)
//!   --map <N>         Height samples per side (overrides the config)
//!   --frames <N>      Frames to simulate at 60 fps (default: 600)
//!   --out <PATH>      Write the summary here instead of stdout

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use wayfarer::core::time::{FrameTimer, ManualClock, TimeSource};
use wayfarer::entity::EntityCategory;
use wayfarer::scene::RecordingTarget;
use wayfarer::{World, WorldConfig};

const FRAME_DT: f64 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> wayfarer::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => WorldConfig::load(&PathBuf::from(path))?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = parse_u64_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(size) = parse_f32_arg(&args, "--size") {
        config.world_size = size;
    }
    if let Some(map) = parse_usize_arg(&args, "--map") {
        config.map_size = map;
    }
    let frames = parse_usize_arg(&args, "--frames").unwrap_or(600);
    let out = parse_str_arg(&args, "--out").map(PathBuf::from);

    println!("=== Wayfarer World Generator ===");
    println!("Seed:   {}", config.seed);
    println!("Size:   {}m x {}m", config.world_size, config.world_size);
    println!("Map:    {} x {} samples", config.map_size, config.map_size);
    println!("Frames: {}", frames);
    println!();

    let clock = ManualClock::new();
    let start = Instant::now();
    let mut world = World::with_time_source(config, clock.clone())?;
    let build_time = start.elapsed();

    let mut target = RecordingTarget::new();
    world.attach(&mut target);
    world.toggle_day_night_cycle();

    let mut timer = FrameTimer::with_source(clock.clone());
    let start = Instant::now();
    for _ in 0..frames {
        clock.advance(FRAME_DT);
        world.update(timer.tick());
        world.apply(&mut target);
    }
    let sim_time = start.elapsed();

    let (min_h, max_h) = world.terrain().heightmap().height_range();
    let env = world.environment();
    let entities = world.entities();
    let summary = json!({
        "seed": world.config().seed,
        "world_size": world.config().world_size,
        "map_size": world.config().map_size,
        "terrain": {
            "min_height": min_h,
            "max_height": max_h,
            "spawn_height": world.height_at(0.0, 0.0),
            "triangles": target.terrain_triangles,
        },
        "population": world.population(),
        "animals_moved": entities
            .of_category(EntityCategory::Animal)
            .filter(|e| match &e.kind {
                wayfarer::entity::EntityKind::Animal { wander, .. } => e.position != wander.spawn,
                _ => false,
            })
            .count(),
        "environment": {
            "simulated_seconds": clock.now_seconds(),
            "time_of_day": world.time_of_day(),
            "is_night": world.is_night(),
            "sun_intensity": env.sun.intensity,
            "moon_intensity": env.moon_light.intensity,
            "fog_density": env.fog.density,
            "fog_at_world_edge": world.fog_factor(world.config().world_size * 0.5),
            "star_opacity": env.star_opacity,
            "stars": target.star_count,
        },
        "grass_instances": target.grass_instances,
        "water_vertices": world.water().vertex_count(),
        "timing_ms": {
            "build": build_time.as_secs_f64() * 1000.0,
            "simulate": sim_time.as_secs_f64() * 1000.0,
        },
    });

    let text = serde_json::to_string_pretty(&summary)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, text)?;
            println!("Summary: {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
