//! Shared type definitions for the Gallia simulation.
//!
//! This crate is the single source of truth for the data types used across
//! the Gallia workspace. It holds no randomness and no orchestration.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe `u64` wrappers for entity identifiers and the
//!   [`IdGenerator`] that issues them
//! - [`enums`] -- Factions, roles, capabilities, place kinds, freshness,
//!   food kinds, ingredients, lycanthrope enumerations
//! - [`structs`] -- Characters, clan leaders, food, potions, lycanthropes,
//!   combat records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AgeCategory, Capability, CounterKind, Faction, FoodKind, Freshness, Gender, HowlKind,
    Ingredient, PlaceKind, Role, Sex,
};
pub use ids::{CharacterId, IdGenerator, LycanId, PackId, PlaceId};
pub use structs::{
    Character, CharacterStats, ClanLeader, CombatResult, CombatSide, DuelTurn, Food, Lycanthrope,
    MAX_HUNGER, POTION_STRENGTH_PER_LEVEL, Potion, Rank,
};
