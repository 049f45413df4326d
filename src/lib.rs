//! Wayfarer - procedural terrain and day/night environment core for a 3D
//! exploration game

pub mod core;
pub mod math;
pub mod terrain;
pub mod atmosphere;
pub mod water;
pub mod entity;
pub mod generation;
pub mod scene;
pub mod world;

pub use crate::core::{Error, Result};
pub use world::{World, WorldConfig};
