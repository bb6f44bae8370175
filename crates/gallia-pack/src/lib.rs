//! Lycanthrope pack hierarchy for the Gallia simulation.
//!
//! Wolves live in a [`Colony`] arena. Packs are ranked ladders from a
//! male/female alpha couple down to omega; members climb by dominance
//! contests, breed through the alpha couple, answer each other's howls,
//! and may eventually turn human for good.
//!
//! # Modules
//!
//! - [`colony`] -- [`Colony`] arena, [`Pack`], alpha couples and
//!   succession
//! - [`config`] -- Breeding and howling tunables ([`PackConfig`])
//! - [`dominance`] -- Dominance contests between pack-mates
//! - [`error`] -- Error types for colony operations ([`PackError`])
//! - [`howl`] -- Howls and the echoes or hostility they provoke
//! - [`level`] -- The level score that decides contests
//! - [`lifecycle`] -- Litters and transformation into a human
//! - [`season`] -- The seasonal routine tying it all together
//! - [`starting_colony`] -- Default two-pack starting colony

pub mod colony;
pub mod config;
pub mod dominance;
pub mod error;
pub mod howl;
pub mod level;
pub mod lifecycle;
pub mod season;
pub mod starting_colony;

// Re-export primary types at crate root.
pub use colony::{AlphaCouple, Colony, Pack, Succession};
pub use config::PackConfig;
pub use dominance::{ContestOutcome, ContestRecord, ContestRejection};
pub use error::PackError;
pub use howl::{Howl, Reaction};
pub use level::compute_level;
pub use lifecycle::{TransformOutcome, transformation_chance};
pub use season::{Litter, SeasonReport, Transformation};
pub use starting_colony::create_starting_colony;
