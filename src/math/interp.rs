//! Interpolation helpers used by terrain noise and environment blending.

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Hermite smoothstep of `t` (expected in `[0, 1]`).
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Cosine interpolation between `a` and `b`.
///
/// Zero slope at both ends, so neighbouring lattice cells join without a
/// visible crease.
#[inline]
pub fn cosine_interpolate(a: f32, b: f32, t: f32) -> f32 {
    let f = (1.0 - (t * std::f32::consts::PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}
