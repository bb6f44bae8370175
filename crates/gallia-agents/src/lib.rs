//! Character logic for the Gallia simulation.
//!
//! This crate holds everything that operates on a single character, or a
//! pair of them, without knowing about places or rounds. It sits between
//! `gallia-types` (the data) and `gallia-world` / `gallia-core` (where
//! characters live and how rounds advance).
//!
//! # Modules
//!
//! - [`chance`] -- Panic-free random draws over configured probabilities
//! - [`combat`] -- Damage formulas, the duel, faction battles and skirmishes
//! - [`config`] -- Tunables of the attrition phase ([`AttritionConfig`])
//! - [`error`] -- Error types for character operations ([`AgentError`])
//! - [`potion`] -- Brewing and drinking the magic potion
//! - [`roster`] -- Role stat templates, name pools and recruitment
//! - [`vitals`] -- Healing, eating and per-round attrition

pub mod chance;
pub mod combat;
pub mod config;
pub mod error;
pub mod potion;
pub mod roster;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use combat::{PairingStrategy, duel, faction_battle, skirmish, strike_damage};
pub use config::AttritionConfig;
pub use error::AgentError;
pub use potion::{DrinkOutcome, PotionThreshold, brew, brew_as, drink, standard_potion};
pub use roster::recruit;
pub use vitals::{AttritionEffect, MealOutcome, apply_attrition, eat, heal, wound};
