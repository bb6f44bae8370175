//! Configuration loading and typed config structures for the Gallia
//! simulation.
//!
//! The canonical configuration lives in `gallia-config.yaml` at the project
//! root. Every section and every field has a default, so an empty file is a
//! valid configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use gallia_agents::{AttritionConfig, PairingStrategy};
use gallia_pack::PackConfig;
use gallia_world::DEFAULT_SPAWN_PROBABILITY;

/// Environment variable overriding `world.seed`.
pub const SEED_ENV: &str = "GALLIA_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `gallia-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed, round count and round mode.
    #[serde(default)]
    pub world: WorldConfig,

    /// Battle matchmaking.
    #[serde(default)]
    pub combat: CombatConfig,

    /// Per-round random attrition.
    #[serde(default)]
    pub attrition: AttritionConfig,

    /// Food spawning.
    #[serde(default)]
    pub food: FoodConfig,

    /// Clan leader actions.
    #[serde(default)]
    pub leader: LeaderConfig,

    /// Lycanthrope colony.
    #[serde(default)]
    pub pack: PackConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `GALLIA_SEED`, when set to an integer, overrides `world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Whether rounds move fighters to the battlefield and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    /// Clan fighters march to the battlefield each round and the survivors
    /// march home.
    #[default]
    War,
    /// Nobody is deployed; only those already on a battlefield or in an
    /// enclosure fight.
    Interval,
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility (default: 42).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Rounds to run (default: 10).
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Round flavour (default: war).
    #[serde(default)]
    pub mode: RoundMode,

    /// Attach the starting lycanthrope colony (default: true).
    #[serde(default = "default_colony")]
    pub colony: bool,
}

impl WorldConfig {
    /// Apply the `GALLIA_SEED` override. An unparsable value is ignored
    /// with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(SEED_ENV) {
            match raw.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(_) => warn!(value = %raw, "Ignoring unparsable GALLIA_SEED"),
            }
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            rounds: default_rounds(),
            mode: RoundMode::default(),
            colony: default_colony(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_rounds() -> u32 {
    10
}

const fn default_colony() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Combat
// ---------------------------------------------------------------------------

/// Battle configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CombatConfig {
    /// How faction pools are paired (default: random).
    #[serde(default)]
    pub pairing: PairingStrategy,
}

// ---------------------------------------------------------------------------
// Food
// ---------------------------------------------------------------------------

/// Food spawning configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodConfig {
    /// Chance per stocking place per round of a new fresh item
    /// (default: 0.45).
    #[serde(default = "default_spawn_probability")]
    pub spawn_probability: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            spawn_probability: default_spawn_probability(),
        }
    }
}

const fn default_spawn_probability() -> f64 {
    DEFAULT_SPAWN_PROBABILITY
}

// ---------------------------------------------------------------------------
// Leader
// ---------------------------------------------------------------------------

/// Clan leader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderConfig {
    /// Actions per leader per round, passing included (default: 3).
    #[serde(default = "default_max_actions")]
    pub max_actions: u32,

    /// Health restored to each resident by a heal (default: 20).
    #[serde(default = "default_heal_amount")]
    pub heal_amount: u32,

    /// Doses each fighter drinks when potion is handed out (default: 1).
    #[serde(default = "default_potion_doses")]
    pub potion_doses: u32,

    /// Doses in a freshly brewed cauldron (default: 10).
    #[serde(default = "default_cauldron_doses")]
    pub cauldron_doses: u32,
}

impl Default for LeaderConfig {
    fn default() -> Self {
        Self {
            max_actions: default_max_actions(),
            heal_amount: default_heal_amount(),
            potion_doses: default_potion_doses(),
            cauldron_doses: default_cauldron_doses(),
        }
    }
}

const fn default_max_actions() -> u32 {
    3
}

const fn default_heal_amount() -> u32 {
    20
}

const fn default_potion_doses() -> u32 {
    1
}

const fn default_cauldron_doses() -> u32 {
    10
}
