//! Fog evaluation.

use crate::atmosphere::state::FogState;

/// Exponential-squared fog factor for a point `distance` units from the
/// viewer.
///
/// Returns a value in `[0.0, 1.0]` where 0 = no fog and 1 = fully fogged.
pub fn compute_fog_factor(distance: f32, fog: &FogState) -> f32 {
    if fog.density <= 0.0 || distance <= 0.0 {
        return 0.0;
    }
    let d = fog.density * distance;
    (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
}
