//! Tunables of the pack hierarchy.
//!
//! Embedded in the simulation's YAML config under the `pack` key.

use serde::Deserialize;

/// Configuration for reproduction, howling and the seasonal routine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackConfig {
    /// Chance that a complete pack breeds in a season (default: 0.3).
    #[serde(default = "default_reproduction_chance")]
    pub reproduction_chance: f64,

    /// Smallest litter (default: 1).
    #[serde(default = "default_litter_min")]
    pub litter_min: u32,

    /// Largest litter (default: 7).
    #[serde(default = "default_litter_max")]
    pub litter_max: u32,

    /// Largest deviation of a pup's strength from the parents' mean
    /// (default: 5).
    #[serde(default = "default_strength_jitter")]
    pub strength_jitter: u32,

    /// Chance that a foreign pack answers a belonging howl with hostility
    /// (default: 0.5).
    #[serde(default = "default_hostility_chance")]
    pub hostility_chance: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            reproduction_chance: default_reproduction_chance(),
            litter_min: default_litter_min(),
            litter_max: default_litter_max(),
            strength_jitter: default_strength_jitter(),
            hostility_chance: default_hostility_chance(),
        }
    }
}

const fn default_reproduction_chance() -> f64 {
    0.3
}

const fn default_litter_min() -> u32 {
    1
}

const fn default_litter_max() -> u32 {
    7
}

const fn default_strength_jitter() -> u32 {
    5
}

const fn default_hostility_chance() -> f64 {
    0.5
}
