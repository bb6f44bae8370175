//! Howling: a signal broadcast to the whole colony, and the reactions it
//! provokes.
//!
//! Every non-human lycanthrope other than the emitter hears a howl. Only
//! an original belonging howl provokes reactions:
//!
//! - a member of the emitter's pack echoes it once; echoes provoke nothing
//! - a member of another pack answers with hostility, with the configured
//!   chance
//!
//! Humans and unpacked listeners never react.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use gallia_agents::chance;
use gallia_types::{HowlKind, LycanId};

use crate::colony::Colony;
use crate::error::PackError;

/// One howl and who heard it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Howl {
    /// Who howled.
    pub emitter: LycanId,
    /// What it meant.
    pub kind: HowlKind,
    /// Whether this repeats a pack-mate's belonging howl.
    pub echo: bool,
    /// Every lycanthrope that heard it, in id order.
    pub heard_by: Vec<LycanId>,
}

/// A listener's reaction to a howl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reaction {
    /// Repeat the belonging howl for the pack.
    Echo,
    /// Answer a foreign pack with hostility.
    Hostility,
}

impl Colony {
    /// How `listener` reacts to `howl`, if at all.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] for an unknown listener or
    /// emitter.
    pub fn hear(
        &self,
        listener: LycanId,
        howl: &Howl,
        hostility_chance: f64,
        rng: &mut impl Rng,
    ) -> Result<Option<Reaction>, PackError> {
        let heard = self.require(listener)?;
        let emitter = self.require(howl.emitter)?;
        if listener == howl.emitter
            || heard.is_human
            || howl.echo
            || howl.kind != HowlKind::Belonging
        {
            return Ok(None);
        }
        let Some(own_pack) = heard.pack else {
            return Ok(None);
        };
        if emitter.pack == Some(own_pack) {
            return Ok(Some(Reaction::Echo));
        }
        Ok(chance::roll(rng, hostility_chance).then_some(Reaction::Hostility))
    }

    /// Broadcast a howl and every reaction it sets off.
    ///
    /// Returns the howls in the order they sounded, the original first.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] for an unknown emitter or
    /// [`PackError::Human`] if the emitter turned human.
    pub fn yell(
        &self,
        emitter: LycanId,
        kind: HowlKind,
        hostility_chance: f64,
        rng: &mut impl Rng,
    ) -> Result<Vec<Howl>, PackError> {
        if self.require(emitter)?.is_human {
            return Err(PackError::Human(emitter));
        }

        let mut pending = VecDeque::from([(emitter, kind, false)]);
        let mut howls = Vec::new();

        while let Some((from, kind, echo)) = pending.pop_front() {
            let heard_by: Vec<LycanId> = self
                .lycans()
                .filter(|l| l.id != from && !l.is_human)
                .map(|l| l.id)
                .collect();
            let howl = Howl {
                emitter: from,
                kind,
                echo,
                heard_by,
            };
            for &listener in &howl.heard_by {
                match self.hear(listener, &howl, hostility_chance, rng)? {
                    Some(Reaction::Echo) => {
                        pending.push_back((listener, HowlKind::Belonging, true));
                    }
                    Some(Reaction::Hostility) => {
                        pending.push_back((listener, HowlKind::Hostility, false));
                    }
                    None => {}
                }
            }
            debug!(emitter = %from, kind = ?kind, echo, listeners = howl.heard_by.len(), "Howl");
            howls.push(howl);
        }

        Ok(howls)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gallia_types::{AgeCategory, Sex};

    use super::*;
    use crate::colony::tests::colony_with_pack;

    #[test]
    fn belonging_is_echoed_once_by_each_pack_mate() {
        let (colony, _, _, [male, female, young_male, young_female]) = colony_with_pack();
        let mut rng = SmallRng::seed_from_u64(2);
        let howls = colony.yell(male, HowlKind::Belonging, 0.5, &mut rng).unwrap();
        assert_eq!(howls.len(), 4);
        assert!(!howls[0].echo);
        let echoers: Vec<LycanId> = howls[1..].iter().map(|h| h.emitter).collect();
        assert_eq!(echoers, vec![female, young_male, young_female]);
        assert!(howls[1..].iter().all(|h| h.echo));
    }

    #[test]
    fn other_kinds_provoke_nothing() {
        let (colony, _, _, [male, ..]) = colony_with_pack();
        let mut rng = SmallRng::seed_from_u64(2);
        let howls = colony.yell(male, HowlKind::Dominance, 1.0, &mut rng).unwrap();
        assert_eq!(howls.len(), 1);
        assert_eq!(howls[0].heard_by.len(), 3);
    }

    #[test]
    fn foreign_pack_answers_with_hostility() {
        let (mut colony, mut ids, _, [male, ..]) = colony_with_pack();
        let rival_m = colony.spawn(&mut ids, "Moonmane", Sex::Male, AgeCategory::Adult, 50, 0.5);
        let rival_f = colony.spawn(&mut ids, "Starbrow", Sex::Female, AgeCategory::Adult, 50, 0.5);
        let loner = colony.spawn(&mut ids, "Nessus", Sex::Male, AgeCategory::Adult, 50, 0.5);
        colony.found_pack(&mut ids, "Rivals", rival_m, rival_f).unwrap();

        let mut rng = SmallRng::seed_from_u64(2);
        let howls = colony.yell(male, HowlKind::Belonging, 1.0, &mut rng).unwrap();
        let hostile: Vec<LycanId> = howls
            .iter()
            .filter(|h| h.kind == HowlKind::Hostility)
            .map(|h| h.emitter)
            .collect();
        assert_eq!(hostile, vec![rival_m, rival_f]);
        assert!(howls.iter().all(|h| h.emitter != loner));
        // Original, three echoes, two hostile answers.
        assert_eq!(howls.len(), 6);
    }

    #[test]
    fn humans_neither_howl_nor_listen() {
        let (mut colony, _, _, [male, female, ..]) = colony_with_pack();
        colony.lycan_mut(female).unwrap().is_human = true;
        let mut rng = SmallRng::seed_from_u64(2);
        let howls = colony.yell(male, HowlKind::Belonging, 0.5, &mut rng).unwrap();
        assert!(!howls[0].heard_by.contains(&female));
        assert_eq!(
            colony.yell(female, HowlKind::Belonging, 0.5, &mut rng),
            Err(PackError::Human(female))
        );
    }
}
