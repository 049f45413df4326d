//! Mathematical utilities and data structures

pub mod bounds;
pub mod interp;

pub use bounds::WorldBounds;
pub use interp::{cosine_interpolate, smoothstep, Lerp};
