//! Error types for the `gallia-world` crate.
//!
//! A refused admission is an expected outcome and is reported by
//! [`Place::add_character`](crate::place::Place::add_character) as an
//! [`AdmissionRejected`](crate::place::AdmissionRejected) value that hands
//! the character back. [`WorldError`] covers lookups through the
//! [`PlaceMap`](crate::place_map::PlaceMap), where the map keeps ownership
//! of the character.

use gallia_types::{CharacterId, PlaceId};

use crate::place::RejectionReason;

/// Errors that can occur during place-map operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    /// A place was not found in the map.
    #[error("place not found: {0}")]
    PlaceNotFound(PlaceId),

    /// A place with this id is already in the map.
    #[error("duplicate place: {0}")]
    DuplicatePlace(PlaceId),

    /// The character is not a resident of the place.
    #[error("character {character} is not in place {place}")]
    CharacterNotFound {
        /// The character looked for.
        character: CharacterId,
        /// The place searched.
        place: PlaceId,
    },

    /// The destination refused the character; it stayed where it was.
    #[error("character {character} was refused by place {place}: {reason}")]
    Rejected {
        /// The character that tried to move.
        character: CharacterId,
        /// The place that refused it.
        place: PlaceId,
        /// Why it was refused.
        reason: RejectionReason,
    },
}
