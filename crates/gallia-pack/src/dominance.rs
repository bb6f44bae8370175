//! Dominance contests between two members of the same pack.
//!
//! ## Flow
//!
//! 1. Refuse the contest outright (same individual, a human involved, not
//!    packed together, target is the female alpha, a non-male challenging
//!    the male alpha, or an alpha challenging down the ladder)
//! 2. Repel the challenger if `target.strength > challenger.strength *
//!    (1 + challenger.impetuosity)`: challenger dominance -1
//! 3. Otherwise the challenger wins iff its level is higher or the target
//!    is omega
//!    - win: ranks swap, dominance +2 / -1, a deposed male alpha hands his
//!      slot to the challenger
//!    - loss: dominance -2 / +1, ranks unchanged

use serde::Serialize;
use tracing::debug;

use gallia_types::{LycanId, Rank, Sex};

use crate::colony::Colony;
use crate::error::PackError;
use crate::level::compute_level;

/// Dominance gained by a winning challenger.
pub const WIN_GAIN: i32 = 2;

/// Dominance lost by a defeated target.
pub const WIN_TARGET_LOSS: i32 = 1;

/// Dominance lost by a defeated challenger.
pub const LOSS_PENALTY: i32 = 2;

/// Dominance gained by a target that held.
pub const LOSS_TARGET_GAIN: i32 = 1;

/// Dominance lost by a repelled challenger.
pub const REPEL_PENALTY: i32 = 1;

/// Why a contest never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContestRejection {
    /// A lycanthrope cannot challenge itself.
    SameIndividual,
    /// One of the two has turned human.
    Human,
    /// The two do not run with the same pack.
    NotPackedTogether,
    /// The female alpha cannot be challenged.
    ProtectedFemaleAlpha,
    /// Only a male may challenge the male alpha.
    MaleAlphaNeedsMale,
    /// Alphas hold rank 0 and never challenge down the ladder.
    ChallengerIsAlpha,
}

/// How a dominance contest ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContestOutcome {
    /// The contest never started.
    Rejected(ContestRejection),
    /// The target was too strong to attack.
    Repelled,
    /// The challenger won and took the target's rank.
    Won {
        /// The target was the male alpha and lost his slot.
        deposed_alpha: bool,
    },
    /// The target held its rank.
    Lost,
}

/// One contest, as recorded in a season report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContestRecord {
    /// Who attacked.
    pub challenger: LycanId,
    /// Who was attacked.
    pub target: LycanId,
    /// How it ended.
    pub outcome: ContestOutcome,
}

impl Colony {
    /// Check whether `challenger` may challenge `target` at all.
    fn contest_rejection(
        &self,
        challenger: LycanId,
        target: LycanId,
    ) -> Result<Option<ContestRejection>, PackError> {
        if challenger == target {
            return Ok(Some(ContestRejection::SameIndividual));
        }
        let c = self.require(challenger)?;
        let t = self.require(target)?;
        if c.is_human || t.is_human {
            return Ok(Some(ContestRejection::Human));
        }
        let pack_id = match (c.pack, t.pack) {
            (Some(a), Some(b)) if a == b => a,
            _ => return Ok(Some(ContestRejection::NotPackedTogether)),
        };
        let couple = self.require_pack(pack_id)?.couple();
        if couple.female() == Some(target) {
            return Ok(Some(ContestRejection::ProtectedFemaleAlpha));
        }
        if couple.male() == Some(target) && c.sex != Sex::Male {
            return Ok(Some(ContestRejection::MaleAlphaNeedsMale));
        }
        if couple.contains(challenger) {
            return Ok(Some(ContestRejection::ChallengerIsAlpha));
        }
        Ok(None)
    }

    /// Run a dominance contest.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] or [`PackError::UnknownPack`] for
    /// unknown handles. Refused contests are an outcome, not an error.
    pub fn try_dominate(
        &mut self,
        challenger: LycanId,
        target: LycanId,
    ) -> Result<ContestOutcome, PackError> {
        if let Some(rejection) = self.contest_rejection(challenger, target)? {
            debug!(
                challenger = %challenger,
                target = %target,
                reason = ?rejection,
                "Contest refused"
            );
            return Ok(ContestOutcome::Rejected(rejection));
        }

        let c = self.require(challenger)?;
        let t = self.require(target)?;
        let reach = f64::from(c.strength) * (1.0 + c.impetuosity);
        if f64::from(t.strength) > reach {
            let c = self.require_mut(challenger)?;
            c.dominance = c.dominance.saturating_sub(REPEL_PENALTY);
            debug!(challenger = %challenger, target = %target, "Challenger repelled");
            return Ok(ContestOutcome::Repelled);
        }

        let wins = compute_level(c) > compute_level(t) || t.rank == Rank::OMEGA;
        let (challenger_rank, target_rank) = (c.rank, t.rank);
        let pack_id = c.pack.ok_or(PackError::NotPacked(challenger))?;

        if !wins {
            let c = self.require_mut(challenger)?;
            c.dominance = c.dominance.saturating_sub(LOSS_PENALTY);
            let t = self.require_mut(target)?;
            t.dominance = t.dominance.saturating_add(LOSS_TARGET_GAIN);
            debug!(challenger = %challenger, target = %target, "Challenger lost");
            return Ok(ContestOutcome::Lost);
        }

        let c = self.require_mut(challenger)?;
        c.rank = target_rank;
        c.dominance = c.dominance.saturating_add(WIN_GAIN);
        let t = self.require_mut(target)?;
        t.rank = challenger_rank;
        t.dominance = t.dominance.saturating_sub(WIN_TARGET_LOSS);

        let pack = self.require_pack_mut(pack_id)?;
        let deposed_alpha = pack.couple().male() == Some(target);
        if deposed_alpha {
            pack.replace_alpha(Sex::Male, challenger);
        }

        debug!(
            challenger = %challenger,
            target = %target,
            new_rank = target_rank.label(),
            deposed_alpha,
            "Challenger won"
        );
        Ok(ContestOutcome::Won { deposed_alpha })
    }
}
