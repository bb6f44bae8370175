//! One season of colony life.
//!
//! ## Order
//!
//! 1. Every wolf ages one bracket
//! 2. Every packed non-alpha may, with probability equal to its
//!    impetuosity, challenge the nearest pack-mate ranked above it
//! 3. Every pack with a complete alpha couple may breed
//! 4. Every wolf tries to turn human

use std::cmp::Reverse;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use gallia_agents::chance;
use gallia_types::{IdGenerator, LycanId, PackId};

use crate::colony::{Colony, Succession};
use crate::config::PackConfig;
use crate::dominance::ContestRecord;
use crate::error::PackError;
use crate::lifecycle::TransformOutcome;

/// A litter born this season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Litter {
    /// The breeding pack.
    pub pack: PackId,
    /// The pups, in birth order.
    pub pups: Vec<LycanId>,
}

/// A lycanthrope that turned human this season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transformation {
    /// Who turned.
    pub lycan: LycanId,
    /// How its alpha slot was refilled, if it held one.
    pub succession: Option<Succession>,
}

/// Everything that happened in a season.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonReport {
    /// Wolves that aged.
    pub aged: usize,
    /// Dominance contests, in the order fought.
    pub contests: Vec<ContestRecord>,
    /// Litters born.
    pub litters: Vec<Litter>,
    /// Wolves that turned human.
    pub transformations: Vec<Transformation>,
}

impl Colony {
    /// The pack-mate `challenger` would challenge: the nearest rank above
    /// its own, preferring its own sex, then the earliest joiner.
    pub fn challenge_target(&self, challenger: LycanId) -> Option<LycanId> {
        let c = self.lycan(challenger)?;
        let pack = self.pack(c.pack?)?;
        pack.members()
            .iter()
            .filter_map(|id| self.lycan(*id))
            .filter(|l| l.id != challenger && !l.is_human && l.rank < c.rank)
            // Nearest rank first, own sex before the other.
            .max_by_key(|l| {
                let joined = position(pack.members(), l.id);
                (l.rank, l.sex == c.sex, Reverse(joined))
            })
            .map(|l| l.id)
    }

    /// Run one season.
    ///
    /// # Errors
    ///
    /// Returns a [`PackError`] only if the colony's handles are
    /// inconsistent.
    pub fn run_season(
        &mut self,
        config: &PackConfig,
        rng: &mut impl Rng,
        ids: &mut IdGenerator,
    ) -> Result<SeasonReport, PackError> {
        let mut report = SeasonReport::default();

        // 1. Aging
        for id in self.wolf_ids() {
            self.age(id)?;
            report.aged = report.aged.saturating_add(1);
        }

        // 2. Contests, against the ranks as they stand after earlier ones
        for pack_id in self.pack_ids() {
            let members = self.require_pack(pack_id)?.members().to_vec();
            for challenger in members {
                let Some(c) = self.lycan(challenger) else {
                    continue;
                };
                let is_alpha = self.require_pack(pack_id)?.couple().contains(challenger);
                if c.is_human || is_alpha || !chance::roll(rng, c.impetuosity) {
                    continue;
                }
                let Some(target) = self.challenge_target(challenger) else {
                    continue;
                };
                let outcome = self.try_dominate(challenger, target)?;
                report.contests.push(ContestRecord {
                    challenger,
                    target,
                    outcome,
                });
            }
        }

        // 3. Breeding
        for pack_id in self.pack_ids() {
            let complete = self.require_pack(pack_id)?.couple().is_complete();
            if complete && chance::roll(rng, config.reproduction_chance) {
                let pups = self.reproduce(pack_id, config, rng, ids)?;
                report.litters.push(Litter {
                    pack: pack_id,
                    pups,
                });
            }
        }

        // 4. Transformation
        for id in self.wolf_ids() {
            if let TransformOutcome::BecameHuman { succession } =
                self.try_transform_to_human(id, rng)?
            {
                report.transformations.push(Transformation {
                    lycan: id,
                    succession,
                });
            }
        }

        info!(
            aged = report.aged,
            contests = report.contests.len(),
            litters = report.litters.len(),
            transformations = report.transformations.len(),
            wolves = self.wolves(),
            "Season complete"
        );
        Ok(report)
    }

    fn wolf_ids(&self) -> Vec<LycanId> {
        self.lycans()
            .filter(|l| !l.is_human)
            .map(|l| l.id)
            .collect()
    }
}

fn position(members: &[LycanId], id: LycanId) -> usize {
    members.iter().position(|m| *m == id).unwrap_or(usize::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gallia_types::{AgeCategory, Rank};

    use super::*;
    use crate::colony::tests::colony_with_pack;

    #[test]
    fn target_is_nearest_rank_above() {
        let (mut colony, _, _, [male, _, young_male, young_female]) = colony_with_pack();
        // Both omegas: the only ranks above are the alphas.
        assert_eq!(colony.challenge_target(young_male), Some(male));
        colony.lycan_mut(young_female).unwrap().rank = Rank::from_index(5);
        assert_eq!(colony.challenge_target(young_male), Some(young_female));
        assert_eq!(colony.challenge_target(male), None);
    }

    #[test]
    fn inert_season_only_ages() {
        let (mut colony, mut ids, _, [_, _, young_male, _]) = colony_with_pack();
        for id in colony.lycan_ids() {
            colony.lycan_mut(id).unwrap().impetuosity = 0.0;
        }
        let config = PackConfig {
            reproduction_chance: 0.0,
            ..PackConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(13);
        let report = colony.run_season(&config, &mut rng, &mut ids).unwrap();
        assert_eq!(report.aged, 4);
        assert!(report.contests.is_empty());
        assert!(report.litters.is_empty());
        assert_eq!(colony.lycan(young_male).unwrap().age, AgeCategory::Adult);
        for t in &report.transformations {
            assert!(colony.lycan(t.lycan).unwrap().is_human);
        }
    }

    #[test]
    fn certain_breeding_produces_a_litter() {
        let (mut colony, mut ids, pack, _) = colony_with_pack();
        let config = PackConfig {
            reproduction_chance: 1.0,
            ..PackConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(8);
        let report = colony.run_season(&config, &mut rng, &mut ids).unwrap();
        assert_eq!(report.litters.len(), 1);
        assert_eq!(report.litters[0].pack, pack);
        assert!(!report.litters[0].pups.is_empty());
    }
}
