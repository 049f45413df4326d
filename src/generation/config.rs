//! Population configuration.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{Error, Result};

/// One rejection-sampled scatter pass.
///
/// Inside a [`PopulationConfig`] a partially written rule keeps its kind's
/// preset for every field it leaves out. A standalone rule must be complete.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterRule {
    /// Points wanted.
    pub count: usize,
    /// Total draws allowed before giving up with fewer points.
    pub max_attempts: usize,
    /// Inset from every world edge.
    pub edge_margin: f32,
    /// Points closer than this to the world centre are rejected.
    pub exclusion_radius: f32,
    /// Minimum XZ distance between accepted points of this rule.
    pub min_spacing: f32,
    /// Points whose ground height is below this are rejected.
    pub min_height: Option<f32>,
}

impl Default for ScatterRule {
    fn default() -> Self {
        Self {
            count: 0,
            max_attempts: 0,
            edge_margin: 0.0,
            exclusion_radius: 0.0,
            min_spacing: 0.0,
            min_height: None,
        }
    }
}

impl ScatterRule {
    /// Trees: one draw per tree, kept off the spawn area and out of water.
    pub fn trees() -> Self {
        Self {
            count: 100,
            max_attempts: 100,
            exclusion_radius: 15.0,
            min_height: Some(0.0),
            ..Default::default()
        }
    }

    /// Rocks: anywhere, one draw each.
    pub fn rocks() -> Self {
        Self { count: 60, max_attempts: 60, ..Default::default() }
    }

    /// Flowers: spread out, away from the edges.
    pub fn flowers() -> Self {
        Self {
            count: 30,
            max_attempts: 1000,
            edge_margin: 5.0,
            min_spacing: 8.0,
            ..Default::default()
        }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if self.count > 0 && self.max_attempts == 0 {
            return Err(Error::invalid_config(format!(
                "{name}: max_attempts must be positive when count is {}",
                self.count
            )));
        }
        let distances = [self.edge_margin, self.exclusion_radius, self.min_spacing];
        if distances.iter().any(|d| !(d.is_finite() && *d >= 0.0)) {
            return Err(Error::invalid_config(format!(
                "{name}: margins and radii must be finite and non-negative"
            )));
        }
        if self.min_height.is_some_and(|h| !h.is_finite()) {
            return Err(Error::invalid_config(format!("{name}: min_height must be finite")));
        }
        Ok(())
    }
}

/// Fields present in a settings file, layered over a preset rule.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScatterRuleOverride {
    count: Option<usize>,
    max_attempts: Option<usize>,
    edge_margin: Option<f32>,
    exclusion_radius: Option<f32>,
    min_spacing: Option<f32>,
    /// Absent keeps the preset; `null` lifts the height limit.
    #[serde(default, deserialize_with = "present")]
    min_height: Option<Option<f32>>,
}

impl ScatterRuleOverride {
    fn apply(self, preset: ScatterRule) -> ScatterRule {
        ScatterRule {
            count: self.count.unwrap_or(preset.count),
            max_attempts: self.max_attempts.unwrap_or(preset.max_attempts),
            edge_margin: self.edge_margin.unwrap_or(preset.edge_margin),
            exclusion_radius: self.exclusion_radius.unwrap_or(preset.exclusion_radius),
            min_spacing: self.min_spacing.unwrap_or(preset.min_spacing),
            min_height: self.min_height.unwrap_or(preset.min_height),
        }
    }
}

/// Distinguishes an explicit `null` from a missing key.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn trees_rule<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<ScatterRule, D::Error> {
    ScatterRuleOverride::deserialize(deserializer).map(|o| o.apply(ScatterRule::trees()))
}

fn rocks_rule<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<ScatterRule, D::Error> {
    ScatterRuleOverride::deserialize(deserializer).map(|o| o.apply(ScatterRule::rocks()))
}

fn flowers_rule<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<ScatterRule, D::Error> {
    ScatterRuleOverride::deserialize(deserializer).map(|o| o.apply(ScatterRule::flowers()))
}

/// Grass is placed in round clusters rather than scattered blade by blade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassClusterRule {
    /// Blades across all clusters; each cluster gets `total_blades / clusters`.
    pub total_blades: usize,
    pub clusters: usize,
    /// Clusters centred closer than this to the world centre are skipped.
    pub exclusion_radius: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Blades below this ground height are skipped.
    pub min_height: f32,
    /// Maximum X/Z tilt either way, radians.
    pub max_tilt: f32,
    pub height_scale_min: f32,
    pub height_scale_max: f32,
}

impl Default for GrassClusterRule {
    fn default() -> Self {
        Self {
            total_blades: 10_000,
            clusters: 50,
            exclusion_radius: 15.0,
            radius_min: 5.0,
            radius_max: 15.0,
            min_height: -1.0,
            max_tilt: 0.1,
            height_scale_min: 0.7,
            height_scale_max: 1.3,
        }
    }
}

impl GrassClusterRule {
    /// Blades attempted per cluster.
    pub fn blades_per_cluster(&self) -> usize {
        self.total_blades.checked_div(self.clusters).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius_min >= 0.0 && self.radius_min <= self.radius_max) {
            return Err(Error::invalid_config(format!(
                "grass: cluster radius range {}..{} is invalid",
                self.radius_min, self.radius_max
            )));
        }
        if !(self.height_scale_min > 0.0 && self.height_scale_min <= self.height_scale_max) {
            return Err(Error::invalid_config("grass: height scale range is invalid"));
        }
        if !(self.max_tilt.is_finite() && self.max_tilt >= 0.0) || !self.min_height.is_finite() {
            return Err(Error::invalid_config("grass: tilt and min_height must be finite"));
        }
        Ok(())
    }
}

/// Everything the populator places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    #[serde(deserialize_with = "trees_rule")]
    pub trees: ScatterRule,
    #[serde(deserialize_with = "rocks_rule")]
    pub rocks: ScatterRule,
    #[serde(deserialize_with = "flowers_rule")]
    pub flowers: ScatterRule,
    pub grass: GrassClusterRule,
    /// Place the hand-authored NPCs, houses, animals and portals.
    pub curated: bool,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            trees: ScatterRule::trees(),
            rocks: ScatterRule::rocks(),
            flowers: ScatterRule::flowers(),
            grass: GrassClusterRule::default(),
            curated: true,
        }
    }
}

impl PopulationConfig {
    /// Nothing at all; useful for terrain-only worlds.
    pub fn empty() -> Self {
        Self {
            trees: ScatterRule::default(),
            rocks: ScatterRule::default(),
            flowers: ScatterRule::default(),
            grass: GrassClusterRule { total_blades: 0, clusters: 0, ..Default::default() },
            curated: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.trees.validate("trees")?;
        self.rocks.validate("rocks")?;
        self.flowers.validate("flowers")?;
        self.grass.validate()
    }
}
