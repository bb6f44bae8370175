//! Births and departures: litters of the alpha couple and the one-way
//! transformation back into a human.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use gallia_agents::chance;
use gallia_types::{AgeCategory, IdGenerator, LycanId, PackId, Sex};

use crate::colony::{Colony, Succession};
use crate::config::PackConfig;
use crate::error::PackError;
use crate::level::compute_level;

/// Lowest chance of transforming, however low the level.
pub const MIN_TRANSFORM_CHANCE: f64 = 0.01;

/// Highest chance of transforming, however high the level.
pub const MAX_TRANSFORM_CHANCE: f64 = 0.5;

/// Level that maps to a chance of 1 before clamping.
pub const TRANSFORM_LEVEL_SCALE: f64 = 20.0;

/// Outcome of a transformation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransformOutcome {
    /// Still a wolf.
    Stayed,
    /// Turned human for good and left its pack.
    BecameHuman {
        /// Refilling of the alpha slot it held, if any.
        succession: Option<Succession>,
    },
}

/// Chance that a lycanthrope of this level turns human when it tries.
pub fn transformation_chance(level: f64) -> f64 {
    (level / TRANSFORM_LEVEL_SCALE).clamp(MIN_TRANSFORM_CHANCE, MAX_TRANSFORM_CHANCE)
}

impl Colony {
    /// Breed the alpha couple of `pack`: a litter of young omegas whose
    /// strength is the parents' mean within the configured jitter.
    ///
    /// Returns the pups' ids in birth order.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownPack`], [`PackError::IncompleteCouple`]
    /// when an alpha slot is vacant, or [`PackError::UnknownLycan`].
    pub fn reproduce(
        &mut self,
        pack: PackId,
        config: &PackConfig,
        rng: &mut impl Rng,
        ids: &mut IdGenerator,
    ) -> Result<Vec<LycanId>, PackError> {
        let founders = self.require_pack(pack)?;
        let couple = *founders.couple();
        let pack_name = founders.name.clone();
        let (Some(father), Some(mother)) = (couple.male(), couple.female()) else {
            return Err(PackError::IncompleteCouple(pack));
        };
        let mean = self
            .require(father)?
            .strength
            .saturating_add(self.require(mother)?.strength)
            / 2;

        let litter = chance::pick_between(rng, config.litter_min, config.litter_max);
        let mut pups = Vec::new();
        for _ in 0..litter {
            let sex = if rng.random_bool(0.5) {
                Sex::Male
            } else {
                Sex::Female
            };
            let strength = chance::pick_between(
                rng,
                mean.saturating_sub(config.strength_jitter),
                mean.saturating_add(config.strength_jitter),
            );
            let impetuosity = rng.random_range(0.0..=1.0);
            let number = pups.len().saturating_add(1);
            let pup = self.spawn(
                ids,
                format!("{pack_name} pup {number}"),
                sex,
                AgeCategory::Young,
                strength,
                impetuosity,
            );
            self.join_pack(pup, pack)?;
            pups.push(pup);
        }

        info!(pack = %pack, litter = pups.len(), "Litter born");
        Ok(pups)
    }

    /// Roll for a lycanthrope to turn human, with a chance scaled by its
    /// level. A transformed alpha is replaced by succession.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] or [`PackError::Human`] if it
    /// already turned.
    pub fn try_transform_to_human(
        &mut self,
        lycan: LycanId,
        rng: &mut impl Rng,
    ) -> Result<TransformOutcome, PackError> {
        let member = self.require(lycan)?;
        if member.is_human {
            return Err(PackError::Human(lycan));
        }
        if !chance::roll(rng, transformation_chance(compute_level(member))) {
            return Ok(TransformOutcome::Stayed);
        }

        let succession = if member.is_packed() {
            self.leave_pack(lycan)?
        } else {
            None
        };
        self.require_mut(lycan)?.is_human = true;
        info!(lycan = %lycan, "Turned human");
        Ok(TransformOutcome::BecameHuman { succession })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gallia_types::Rank;

    use super::*;
    use crate::colony::tests::colony_with_pack;

    #[test]
    fn chance_is_clamped() {
        assert!((transformation_chance(0.0) - MIN_TRANSFORM_CHANCE).abs() < 1e-12);
        assert!((transformation_chance(100.0) - MAX_TRANSFORM_CHANCE).abs() < 1e-12);
        assert!((transformation_chance(5.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn litter_joins_at_omega() {
        let (mut colony, mut ids, pack, [male, female, ..]) = colony_with_pack();
        let mut rng = SmallRng::seed_from_u64(21);
        let config = PackConfig::default();
        let pups = colony.reproduce(pack, &config, &mut rng, &mut ids).unwrap();
        assert!((1..=7).contains(&pups.len()));
        let strength = |id| colony.lycan(id).unwrap().strength;
        let mean = (strength(male) + strength(female)) / 2;
        for pup in &pups {
            let l = colony.lycan(*pup).unwrap();
            assert_eq!(l.age, AgeCategory::Young);
            assert_eq!(l.rank, Rank::OMEGA);
            assert_eq!(l.pack, Some(pack));
            assert!(l.strength.abs_diff(mean) <= config.strength_jitter);
        }
        assert_eq!(colony.pack(pack).unwrap().members().len(), 4 + pups.len());
    }

    #[test]
    fn incomplete_couple_cannot_breed() {
        let (mut colony, mut ids, pack, [_, female, ..]) = colony_with_pack();
        colony.leave_pack(female).unwrap();
        let successor = colony.pack(pack).unwrap().couple().female().unwrap();
        colony.leave_pack(successor).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            colony.reproduce(pack, &PackConfig::default(), &mut rng, &mut ids),
            Err(PackError::IncompleteCouple(pack))
        );
    }

    #[test]
    fn transformed_alpha_is_replaced() {
        let (mut colony, _, pack, [male, _, young_male, _]) = colony_with_pack();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut outcome = TransformOutcome::Stayed;
        for _ in 0..200 {
            outcome = colony.try_transform_to_human(male, &mut rng).unwrap();
            if outcome != TransformOutcome::Stayed {
                break;
            }
        }
        assert_eq!(
            outcome,
            TransformOutcome::BecameHuman {
                succession: Some(Succession::Promoted {
                    pack,
                    successor: young_male
                })
            }
        );
        let former = colony.lycan(male).unwrap();
        assert!(former.is_human);
        assert!(former.pack.is_none());
        assert!(!colony.pack(pack).unwrap().has_member(male));
        assert_eq!(
            colony.try_transform_to_human(male, &mut rng),
            Err(PackError::Human(male))
        );
    }
}
