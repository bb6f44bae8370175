//! Error types for the `gallia-pack` crate.
//!
//! Refused contests and a missing successor are expected outcomes and come
//! back as values ([`ContestOutcome`](crate::dominance::ContestOutcome),
//! [`Succession`](crate::colony::Succession)). [`PackError`] covers unknown
//! handles and invalid construction, such as an alpha couple of one sex.

use gallia_types::{LycanId, PackId, Sex};

/// Errors that can occur during colony operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// No lycanthrope with this id lives in the colony.
    #[error("lycanthrope not found: {0}")]
    UnknownLycan(LycanId),

    /// No pack with this id exists in the colony.
    #[error("pack not found: {0}")]
    UnknownPack(PackId),

    /// An alpha slot was offered a lycanthrope of the wrong sex.
    #[error("lycanthrope {lycan} cannot fill the {expected:?} alpha slot")]
    WrongSex {
        /// The candidate.
        lycan: LycanId,
        /// The sex the slot requires.
        expected: Sex,
    },

    /// The lycanthrope has turned human and left the hierarchy for good.
    #[error("lycanthrope {0} is human")]
    Human(LycanId),

    /// The lycanthrope already runs with a pack.
    #[error("lycanthrope {lycan} already belongs to pack {pack}")]
    AlreadyPacked {
        /// The lycanthrope.
        lycan: LycanId,
        /// Its current pack.
        pack: PackId,
    },

    /// The lycanthrope belongs to no pack.
    #[error("lycanthrope {0} is not in a pack")]
    NotPacked(LycanId),

    /// The pack lacks a male or female alpha.
    #[error("pack {0} has no complete alpha couple")]
    IncompleteCouple(PackId),
}
