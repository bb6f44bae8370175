//! Error types for the gallia-agents crate.
//!
//! Operations on a single character that can be refused return typed
//! errors rather than panicking. Expected battle outcomes (a duel that
//! cannot start, an empty pool) are not errors and are reported through
//! return values instead.

use gallia_types::{CharacterId, FoodKind, Ingredient};

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgentError {
    /// The character is dead and cannot act or be acted upon.
    #[error("character {0} is dead")]
    Dead(CharacterId),

    /// The character has been petrified by a potion overdose.
    #[error("character {0} is petrified")]
    Petrified(CharacterId),

    /// The character's faction does not eat this food.
    #[error("character {character} does not eat {food:?}")]
    NotEdible {
        /// The character offered the food.
        character: CharacterId,
        /// The food offered.
        food: FoodKind,
    },

    /// The potion has no dose left.
    #[error("the potion is empty")]
    EmptyPotion,

    /// A required potion ingredient is missing from the brew.
    #[error("missing potion ingredient: {0:?}")]
    MissingIngredient(Ingredient),

    /// The character cannot perform the requested action.
    #[error("character {character} lacks the capability to {action}")]
    Incapable {
        /// The character asked to act.
        character: CharacterId,
        /// What was asked.
        action: &'static str,
    },
}
