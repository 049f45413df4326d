//! Surface bands based on elevation and slope

use serde::{Deserialize, Serialize};

/// Surface band a terrain vertex falls into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceBand {
    Underwater,
    Shore,
    Lowland,
    Hills,
    Mountain,
}

impl SurfaceBand {
    /// Classify an elevation.
    pub fn classify(height: f32) -> Self {
        if height < -1.0 {
            SurfaceBand::Underwater
        } else if height < 1.0 {
            SurfaceBand::Shore
        } else if height < 5.0 {
            SurfaceBand::Lowland
        } else if height < 12.0 {
            SurfaceBand::Hills
        } else {
            SurfaceBand::Mountain
        }
    }
}

/// Fraction of snow cover on a peak, ramping in from 15m to 25m.
pub fn snow_amount(height: f32) -> f32 {
    ((height - 15.0) / 10.0).clamp(0.0, 1.0)
}

/// Vertex color for a surface at `height` with local rise `slope` to the
/// next vertex.
pub fn vertex_color(height: f32, slope: f32) -> [f32; 3] {
    match SurfaceBand::classify(height) {
        SurfaceBand::Underwater => [0.1, 0.2 + slope * 0.2, 0.5],
        SurfaceBand::Shore => [0.4, 0.55, 0.3],
        SurfaceBand::Lowland => [0.15 + slope * 0.05, 0.35 - slope * 0.05, 0.1],
        SurfaceBand::Hills => [0.2 + slope * 0.1, 0.3 - slope * 0.05, 0.1],
        SurfaceBand::Mountain => {
            // Rocky gray fading to white peaks
            let grey = 0.05 * slope + 0.5 * snow_amount(height);
            [0.3 + grey, 0.35 + grey, 0.3 + grey]
        }
    }
}
