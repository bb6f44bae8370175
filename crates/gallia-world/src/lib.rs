//! Places, admission policies, and food for the Gallia simulation.
//!
//! This crate models where characters live: typed places with entry rules,
//! their food stocks, and the arena holding them all.
//!
//! # Modules
//!
//! - [`error`] -- Error types for place-map operations
//! - [`food`] -- Random food spawning and freshness decay across the map
//! - [`place`] -- [`Place`] with its admission policy, residents, food stock,
//!   cauldron and counter
//! - [`place_map`] -- [`PlaceMap`], the arena of places keyed by id
//! - [`starting_world`] -- Default six-place starting map

pub mod error;
pub mod food;
pub mod place;
pub mod place_map;
pub mod starting_world;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use food::{DEFAULT_SPAWN_PROBABILITY, FoodEvent, degrade_food, spawn_food};
pub use place::{AdmissionRejected, FeedingEvent, Place, RejectionReason};
pub use place_map::PlaceMap;
pub use starting_world::{StartingPlaceIds, create_starting_world};
