//! Final outcome of a run: survivors and casualties per clan, and the
//! winner.

use std::collections::BTreeMap;

use serde::Serialize;

use gallia_types::Faction;

use crate::round::Simulation;

/// Survivors and casualties of one clan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactionTally {
    /// Members still alive.
    pub survivors: usize,
    /// Members swept from the map since the start.
    pub casualties: usize,
}

/// How the run ended for the clans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// One clan has strictly more survivors than every other.
    Winner(Faction),
    /// No clan stands strictly above the others.
    Tie,
}

/// The final report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Rounds played.
    pub rounds: u32,
    /// Tally per clan.
    pub factions: BTreeMap<Faction, FactionTally>,
    /// Who won.
    pub verdict: Verdict,
    /// Wolves still in the colony, if one is attached.
    pub wolves: Option<usize>,
}

impl Outcome {
    /// Decide the winner from per-clan tallies.
    pub fn decide(factions: &BTreeMap<Faction, FactionTally>) -> Verdict {
        let mut best: Option<(Faction, usize)> = None;
        let mut tied = false;
        for (faction, tally) in factions {
            match best {
                Some((_, top)) if tally.survivors == top => tied = true,
                Some((_, top)) if tally.survivors < top => {}
                _ => {
                    best = Some((*faction, tally.survivors));
                    tied = false;
                }
            }
        }
        match best {
            Some((faction, _)) if !tied => Verdict::Winner(faction),
            _ => Verdict::Tie,
        }
    }
}

/// Compute the outcome of `sim` as it stands.
pub fn outcome(sim: &Simulation) -> Outcome {
    let factions: BTreeMap<Faction, FactionTally> = sim
        .tally()
        .into_iter()
        .map(|(faction, (survivors, casualties))| {
            (
                faction,
                FactionTally {
                    survivors,
                    casualties,
                },
            )
        })
        .collect();
    let verdict = Outcome::decide(&factions);
    Outcome {
        rounds: sim.round(),
        factions,
        verdict,
        wolves: sim.colony.as_ref().map(gallia_pack::Colony::wolves),
    }
}
