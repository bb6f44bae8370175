//! Configuration constants and defaults for character attrition.
//!
//! The [`AttritionConfig`] struct bundles every tunable of the random
//! attrition phase so that callers (the round cycle, tests) can override
//! defaults. It is embedded directly in the simulation's YAML config under
//! the `attrition` key.

use serde::Deserialize;

/// Configuration for the random attrition applied to every living
/// character once per round.
///
/// Each of the three effects is rolled independently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttritionConfig {
    /// Chance of losing satiety this round (default: 0.3).
    #[serde(default = "default_hunger_chance")]
    pub hunger_chance: f64,

    /// Smallest satiety loss (default: 5).
    #[serde(default = "default_hunger_loss_min")]
    pub hunger_loss_min: u32,

    /// Largest satiety loss (default: 20).
    #[serde(default = "default_hunger_loss_max")]
    pub hunger_loss_max: u32,

    /// Satiety below which starvation damage applies (default: 20).
    #[serde(default = "default_starvation_threshold")]
    pub starvation_threshold: u32,

    /// Smallest starvation damage (default: 5).
    #[serde(default = "default_starvation_damage_min")]
    pub starvation_damage_min: u32,

    /// Largest starvation damage (default: 10).
    #[serde(default = "default_starvation_damage_max")]
    pub starvation_damage_max: u32,

    /// Chance that one level of magic potion wears off (default: 0.2).
    #[serde(default = "default_potion_fade_chance")]
    pub potion_fade_chance: f64,

    /// Chance of a minor injury unrelated to hunger (default: 0.1).
    #[serde(default = "default_injury_chance")]
    pub injury_chance: f64,

    /// Smallest minor injury (default: 1).
    #[serde(default = "default_injury_min")]
    pub injury_min: u32,

    /// Largest minor injury (default: 5).
    #[serde(default = "default_injury_max")]
    pub injury_max: u32,
}

impl Default for AttritionConfig {
    fn default() -> Self {
        Self {
            hunger_chance: default_hunger_chance(),
            hunger_loss_min: default_hunger_loss_min(),
            hunger_loss_max: default_hunger_loss_max(),
            starvation_threshold: default_starvation_threshold(),
            starvation_damage_min: default_starvation_damage_min(),
            starvation_damage_max: default_starvation_damage_max(),
            potion_fade_chance: default_potion_fade_chance(),
            injury_chance: default_injury_chance(),
            injury_min: default_injury_min(),
            injury_max: default_injury_max(),
        }
    }
}

impl AttritionConfig {
    /// A configuration under which nothing ever happens.
    pub const fn inert() -> Self {
        Self {
            hunger_chance: 0.0,
            hunger_loss_min: 0,
            hunger_loss_max: 0,
            starvation_threshold: 0,
            starvation_damage_min: 0,
            starvation_damage_max: 0,
            potion_fade_chance: 0.0,
            injury_chance: 0.0,
            injury_min: 0,
            injury_max: 0,
        }
    }
}

const fn default_hunger_chance() -> f64 {
    0.3
}

const fn default_hunger_loss_min() -> u32 {
    5
}

const fn default_hunger_loss_max() -> u32 {
    20
}

const fn default_starvation_threshold() -> u32 {
    20
}

const fn default_starvation_damage_min() -> u32 {
    5
}

const fn default_starvation_damage_max() -> u32 {
    10
}

const fn default_potion_fade_chance() -> f64 {
    0.2
}

const fn default_injury_chance() -> f64 {
    0.1
}

const fn default_injury_min() -> u32 {
    1
}

const fn default_injury_max() -> u32 {
    5
}
