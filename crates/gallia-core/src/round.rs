//! Round cycle: the phase loop that drives the Gallia simulation.
//!
//! Each round runs through these phases, strictly in order, on one random
//! stream:
//!
//! 1. **Deploy** (war mode) -- every living fighter of every clan place
//!    marches to the battlefield, tagged with its origin.
//! 2. **Battle** -- Gauls against Romans on every battlefield, then a
//!    skirmish for creatures and leftovers, then a skirmish in every
//!    enclosure. The dead are swept.
//! 3. **Return** (war mode) -- survivors march back to their origin.
//! 4. **Attrition** -- hunger, fading potion and minor injuries. The dead
//!    are swept.
//! 5. **Food spawn** and 6. **Food decay**.
//! 7. **Leaders** -- every chief acts up to `leader.max_actions` times.
//!    Anyone the actions killed is swept.
//! 8. **Season** -- the lycanthrope colony lives one season, if attached.
//! 9. **Counters** -- clan places that lost someone this round lose
//!    [`COUNTER_LOSS`] points, the others gain [`COUNTER_GAIN`].
//!
//! The cycle is deterministic given the same seed, the same starting world
//! and the same leader answers.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use gallia_agents::{AttritionEffect, apply_attrition, faction_battle, skirmish};
use gallia_pack::{Colony, PackError, SeasonReport};
use gallia_types::{Character, CharacterId, CombatResult, Faction, PlaceId, PlaceKind};
use gallia_world::{FoodEvent, PlaceMap, WorldError};

use crate::actions::{self, LeaderOutcome};
use crate::config::{RoundMode, SimulationConfig};
use crate::context::SimContext;
use crate::leader::{DecisionError, Destination, LeaderAction, LeaderActionSource, LeaderPrompt};

/// Counter points a clan place loses in a round with casualties.
pub const COUNTER_LOSS: i32 = 5;

/// Counter points a clan place gains in a round without casualties.
pub const COUNTER_GAIN: i32 = 2;

/// Kinds of place a clan lives in and fights from.
pub const CLAN_PLACE_KINDS: [PlaceKind; 4] = [
    PlaceKind::GaulishVillage,
    PlaceKind::RomanCamp,
    PlaceKind::RomanCity,
    PlaceKind::MixedTown,
];

/// Errors that can occur during a round.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    /// A place-map operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A colony operation failed.
    #[error("pack error: {source}")]
    Pack {
        /// The underlying pack error.
        #[from]
        source: PackError,
    },

    /// The leader action source failed.
    #[error("decision error: {source}")]
    Decision {
        /// The underlying decision error.
        #[from]
        source: DecisionError,
    },
}

// ---------------------------------------------------------------------------
// Round records
// ---------------------------------------------------------------------------

/// How a character died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cause {
    /// Killed in a duel.
    Battle,
    /// Starvation or a minor injury.
    Attrition,
    /// Petrified by potion handed out by a leader.
    LeaderAction,
}

/// A character swept from the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Casualty {
    /// Who died.
    pub character: CharacterId,
    /// Its name.
    pub name: String,
    /// Its faction.
    pub faction: Faction,
    /// Where it died.
    pub place: PlaceId,
    /// The place it was deployed from, if deployed.
    pub origin: Option<PlaceId>,
    /// How it died.
    pub cause: Cause,
}

impl Casualty {
    fn of(character: &Character, place: PlaceId, cause: Cause) -> Self {
        Self {
            character: character.id,
            name: character.name.clone(),
            faction: character.faction,
            place,
            origin: character.origin,
            cause,
        }
    }

    /// The place that mourns it: its origin if deployed, else where it
    /// died.
    pub fn home(&self) -> PlaceId {
        self.origin.unwrap_or(self.place)
    }
}

/// Duels fought and dead swept by [`Simulation::conduct_battles`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    /// Every duel, in the order fought.
    pub duels: Vec<CombatResult>,
    /// Everyone who died.
    pub casualties: Vec<Casualty>,
}

/// Survivors marched home by [`Simulation::return_survivors`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReturnReport {
    /// Characters back home.
    pub returned: Vec<CharacterId>,
    /// Characters that could not go home and stayed on the battlefield.
    pub stranded: Vec<CharacterId>,
}

/// Attrition effects on one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttritionRecord {
    /// Who was affected.
    pub character: CharacterId,
    /// Where.
    pub place: PlaceId,
    /// What happened, in order.
    pub effects: Vec<AttritionEffect>,
}

/// Result of [`Simulation::randomly_modify_characters`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttritionReport {
    /// Characters with at least one effect.
    pub records: Vec<AttritionRecord>,
    /// Characters the attrition killed.
    pub casualties: Vec<Casualty>,
}

/// One chief's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderTurn {
    /// The chief's place.
    pub place: PlaceId,
    /// The chief's name.
    pub chief: String,
    /// Outcomes in the order chosen, at most `leader.max_actions`.
    pub outcomes: Vec<LeaderOutcome>,
}

/// A counter moved at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterChange {
    /// The place.
    pub place: PlaceId,
    /// Requested shift.
    pub delta: i32,
    /// Value afterwards.
    pub value: u32,
}

/// Summary of a single round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// The round that was played, starting at 1.
    pub round: u32,
    /// Characters deployed to the battlefield.
    pub deployed: Vec<CharacterId>,
    /// Battles.
    pub battles: BattleReport,
    /// Survivors marched home.
    pub returns: ReturnReport,
    /// Attrition.
    pub attrition: AttritionReport,
    /// Food spawned and aged.
    pub food: Vec<FoodEvent>,
    /// Leader turns.
    pub leaders: Vec<LeaderTurn>,
    /// Characters killed by leader actions.
    pub leader_casualties: Vec<Casualty>,
    /// The colony's season, if a colony is attached.
    pub season: Option<SeasonReport>,
    /// Counter changes.
    pub counters: Vec<CounterChange>,
    /// Living characters at the end of the round.
    pub characters_alive: usize,
    /// Living clan fighters at the end of the round.
    pub fighters_alive: usize,
    /// Living clan members at the end of the round, fighters or not.
    pub clan_alive: usize,
}

impl RoundSummary {
    /// Every casualty of the round, battles first.
    pub fn casualties(&self) -> impl Iterator<Item = &Casualty> {
        self.battles
            .casualties
            .iter()
            .chain(&self.attrition.casualties)
            .chain(&self.leader_casualties)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// The mutable simulation state passed through the round cycle.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Every place and everyone in it.
    pub map: PlaceMap,
    /// The lycanthrope colony, if attached.
    pub colony: Option<Colony>,
    /// Random stream and id counter.
    pub ctx: SimContext,
    /// Tunables.
    pub config: SimulationConfig,
    round: u32,
    casualties: Vec<Casualty>,
}

impl Simulation {
    /// Start a simulation on `map`, with no colony.
    pub const fn new(map: PlaceMap, ctx: SimContext, config: SimulationConfig) -> Self {
        Self {
            map,
            colony: None,
            ctx,
            config,
            round: 0,
            casualties: Vec::new(),
        }
    }

    /// Attach a lycanthrope colony, which then lives one season per round.
    #[must_use]
    pub fn with_colony(mut self, colony: Colony) -> Self {
        self.colony = Some(colony);
        self
    }

    /// Rounds played so far.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Everyone swept from the map since the start, in order.
    pub fn casualties(&self) -> &[Casualty] {
        &self.casualties
    }

    /// Residents across every place.
    pub fn total_characters(&self) -> usize {
        self.map.total_characters()
    }

    /// Living, belligerent, fight-capable members of a clan faction,
    /// wherever they are.
    pub fn fighters_alive(&self) -> usize {
        self.map
            .places()
            .flat_map(|p| p.characters())
            .filter(|c| c.faction.is_clan() && c.is_combatant())
            .count()
    }

    /// Living members of a clan faction, wherever they are.
    pub fn clan_alive(&self) -> usize {
        self.map
            .places()
            .flat_map(|p| p.living_characters())
            .filter(|c| c.faction.is_clan())
            .count()
    }

    fn clan_place_ids(&self) -> Vec<PlaceId> {
        self.map
            .places()
            .filter(|p| CLAN_PLACE_KINDS.contains(&p.kind))
            .map(|p| p.id)
            .collect()
    }

    /// Execute one complete round and return what happened.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError`] if the place map or colony is inconsistent,
    /// or if the leader source fails.
    pub fn run_round(
        &mut self,
        leaders: &mut dyn LeaderActionSource,
    ) -> Result<RoundSummary, RoundError> {
        self.round = self.round.saturating_add(1);
        let round = self.round;
        let war = self.config.world.mode == RoundMode::War;
        info!(round, mode = ?self.config.world.mode, "Round started");

        // --- Phase 1: Deploy ---
        let deployed = if war {
            self.deploy_to_battlefield()?
        } else {
            Vec::new()
        };

        // --- Phase 2: Battle ---
        let battles = self.conduct_battles();

        // --- Phase 3: Return ---
        let returns = if war {
            self.return_survivors()
        } else {
            ReturnReport::default()
        };

        // --- Phase 4: Attrition ---
        let attrition = self.randomly_modify_characters();

        // --- Phases 5-6: Food ---
        let mut food = self.spawn_food();
        food.extend(self.degrade_food());

        // --- Phase 7: Leaders ---
        let leaders = self.leader_phase(leaders)?;
        let leader_casualties = self.sweep_dead(Cause::LeaderAction);

        // --- Phase 8: Season ---
        let season = self.run_season()?;

        // --- Phase 9: Counters ---
        let mourning: BTreeSet<PlaceId> = battles
            .casualties
            .iter()
            .chain(&attrition.casualties)
            .chain(&leader_casualties)
            .map(Casualty::home)
            .collect();
        let counters = self.adjust_counters(&mourning);

        self.casualties.extend(battles.casualties.iter().cloned());
        self.casualties.extend(attrition.casualties.iter().cloned());
        self.casualties.extend(leader_casualties.iter().cloned());

        let summary = RoundSummary {
            round,
            deployed,
            battles,
            returns,
            attrition,
            food,
            leaders,
            leader_casualties,
            season,
            counters,
            characters_alive: self.map.places().map(|p| p.living_characters().count()).sum(),
            fighters_alive: self.fighters_alive(),
            clan_alive: self.clan_alive(),
        };

        info!(
            round,
            duels = summary.battles.duels.len(),
            casualties = summary.casualties().count(),
            alive = summary.characters_alive,
            fighters = summary.fighters_alive,
            "Round complete"
        );
        Ok(summary)
    }

    /// Send every living fighter of every clan place to the first
    /// battlefield, tagged with its origin. Without a battlefield nobody
    /// moves.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::World`] if the map is inconsistent.
    pub fn deploy_to_battlefield(&mut self) -> Result<Vec<CharacterId>, RoundError> {
        let Some(field) = self.map.ids_of_kind(PlaceKind::Battlefield).first().copied() else {
            debug!("No battlefield, nobody deployed");
            return Ok(Vec::new());
        };
        let mut deployed = Vec::new();
        for place in self.clan_place_ids() {
            let moved = self.map.deploy(place, field, Character::is_combatant)?;
            debug!(place = %place, count = moved.len(), "Deployed");
            deployed.extend(moved);
        }
        info!(battlefield = %field, deployed = deployed.len(), "Fighters deployed");
        Ok(deployed)
    }

    /// Fight every battle on the map and sweep the dead.
    ///
    /// On a battlefield, Gauls and Romans fight a pooled battle, then
    /// creatures and whoever is left skirmish. In an enclosure, the
    /// creatures skirmish.
    pub fn conduct_battles(&mut self) -> BattleReport {
        let pairing = self.config.combat.pairing;
        let mut report = BattleReport::default();

        for place in self.map.places_mut() {
            let duels = match place.kind {
                PlaceKind::Battlefield => {
                    let fighters = place.characters_mut();
                    let mut duels = faction_battle(
                        fighters,
                        Faction::Gaulish,
                        Faction::Roman,
                        pairing,
                        &mut self.ctx.rng,
                    );
                    duels.extend(skirmish(fighters));
                    duels
                }
                PlaceKind::Enclosure => skirmish(place.characters_mut()),
                _ => continue,
            };
            for duel in &duels {
                debug!(
                    place = %place.id,
                    attacker = %duel.attacker.name,
                    defender = %duel.defender.name,
                    winner = ?duel.winner(),
                    "Duel"
                );
            }
            report.duels.extend(duels);
            report.casualties.extend(
                place
                    .remove_dead_characters()
                    .iter()
                    .map(|c| Casualty::of(c, place.id, Cause::Battle)),
            );
        }

        for casualty in &report.casualties {
            info!(character = %casualty.name, faction = ?casualty.faction, "Fell in battle");
        }
        report
    }

    /// March every survivor with an origin tag from the battlefields back
    /// home. A survivor whose origin is gone or refuses it stays where it
    /// is, untagged.
    pub fn return_survivors(&mut self) -> ReturnReport {
        let mut report = ReturnReport::default();
        for field in self.map.ids_of_kind(PlaceKind::Battlefield) {
            let travellers: Vec<(CharacterId, PlaceId)> = self
                .map
                .get(field)
                .map(|p| {
                    p.living_characters()
                        .filter_map(|c| c.origin.map(|origin| (c.id, origin)))
                        .collect()
                })
                .unwrap_or_default();

            for (character, origin) in travellers {
                let now_at = match self.map.move_character(character, field, origin) {
                    Ok(()) => {
                        report.returned.push(character);
                        origin
                    }
                    Err(err) => {
                        warn!(
                            character = %character,
                            origin = %origin,
                            error = %err,
                            "Survivor stranded"
                        );
                        report.stranded.push(character);
                        field
                    }
                };
                if let Some(c) = self.map.get_mut(now_at).and_then(|p| p.character_mut(character)) {
                    c.origin = None;
                }
            }
        }
        debug!(
            returned = report.returned.len(),
            stranded = report.stranded.len(),
            "Survivors returned"
        );
        report
    }

    /// Roll attrition for every living character and sweep the dead.
    pub fn randomly_modify_characters(&mut self) -> AttritionReport {
        let mut report = AttritionReport::default();
        for place in self.map.places_mut() {
            let place_id = place.id;
            for character in place.characters_mut() {
                let effects = apply_attrition(character, &self.config.attrition, &mut self.ctx.rng);
                if !effects.is_empty() {
                    report.records.push(AttritionRecord {
                        character: character.id,
                        place: place_id,
                        effects,
                    });
                }
            }
            report.casualties.extend(
                place
                    .remove_dead_characters()
                    .iter()
                    .map(|c| Casualty::of(c, place_id, Cause::Attrition)),
            );
        }
        for casualty in &report.casualties {
            info!(character = %casualty.name, place = %casualty.place, "Died of attrition");
        }
        report
    }

    /// Remove every dead resident from the map, recording `cause`.
    fn sweep_dead(&mut self, cause: Cause) -> Vec<Casualty> {
        let mut swept = Vec::new();
        for place in self.map.places_mut() {
            let place_id = place.id;
            swept.extend(
                place
                    .remove_dead_characters()
                    .iter()
                    .map(|c| Casualty::of(c, place_id, cause)),
            );
        }
        for casualty in &swept {
            info!(character = %casualty.name, place = %casualty.place, cause = ?cause, "Swept");
        }
        swept
    }

    /// Roll for fresh food in every place that stocks it.
    pub fn spawn_food(&mut self) -> Vec<FoodEvent> {
        gallia_world::spawn_food(
            &mut self.map,
            self.config.food.spawn_probability,
            &mut self.ctx.rng,
        )
    }

    /// Age every food item by one step.
    pub fn degrade_food(&mut self) -> Vec<FoodEvent> {
        gallia_world::degrade_food(&mut self.map)
    }

    /// Offer every chief up to `leader.max_actions` actions. A pass ends
    /// the chief's turn; a refused action still uses its slot.
    fn leader_phase(
        &mut self,
        source: &mut dyn LeaderActionSource,
    ) -> Result<Vec<LeaderTurn>, RoundError> {
        let max_actions = self.config.leader.max_actions;
        let destinations: Vec<Destination> = self
            .map
            .places()
            .filter(|p| matches!(p.kind, PlaceKind::Battlefield | PlaceKind::Enclosure))
            .map(|p| Destination {
                id: p.id,
                name: p.name.clone(),
                kind: p.kind,
            })
            .collect();

        let mut turns = Vec::new();
        for place_id in self.map.ids() {
            let Some(chief) = self
                .map
                .get(place_id)
                .and_then(|p| p.chief())
                .map(|c| c.name.clone())
            else {
                continue;
            };

            let mut outcomes = Vec::new();
            let mut taken: u32 = 0;
            while taken < max_actions {
                let action = {
                    let place = self
                        .map
                        .get(place_id)
                        .ok_or(WorldError::PlaceNotFound(place_id))?;
                    let prompt = LeaderPrompt {
                        round: self.round,
                        place,
                        actions_taken: taken,
                        actions_left: max_actions.saturating_sub(taken),
                        destinations: &destinations,
                    };
                    source.choose(&prompt)?
                };
                taken = taken.saturating_add(1);
                let outcome = actions::execute(
                    &mut self.map,
                    place_id,
                    action,
                    &self.config.leader,
                    &mut self.ctx,
                )?;
                outcomes.push(outcome);
                if action == LeaderAction::Pass {
                    break;
                }
            }

            info!(place = %place_id, chief = %chief, actions = outcomes.len(), "Leader turn");
            turns.push(LeaderTurn {
                place: place_id,
                chief,
                outcomes,
            });
        }
        Ok(turns)
    }

    /// Live one season of the attached colony, if any.
    fn run_season(&mut self) -> Result<Option<SeasonReport>, RoundError> {
        let Some(colony) = self.colony.as_mut() else {
            return Ok(None);
        };
        let report = colony.run_season(&self.config.pack, &mut self.ctx.rng, &mut self.ctx.ids)?;
        Ok(Some(report))
    }

    /// Shift every clan place's counter: down for places in `mourning`,
    /// up for the others.
    fn adjust_counters(&mut self, mourning: &BTreeSet<PlaceId>) -> Vec<CounterChange> {
        let mut changes = Vec::new();
        for place in self.map.places_mut() {
            if !CLAN_PLACE_KINDS.contains(&place.kind) {
                continue;
            }
            let delta = if mourning.contains(&place.id) {
                COUNTER_LOSS.saturating_neg()
            } else {
                COUNTER_GAIN
            };
            let value = place.adjust_counter(delta);
            changes.push(CounterChange {
                place: place.id,
                delta,
                value,
            });
        }
        changes
    }

    /// Survivors and casualties per clan faction so far.
    pub fn tally(&self) -> BTreeMap<Faction, (usize, usize)> {
        let mut tally: BTreeMap<Faction, (usize, usize)> =
            Faction::CLANS.iter().map(|f| (*f, (0, 0))).collect();
        for c in self.map.places().flat_map(|p| p.living_characters()) {
            if let Some(entry) = tally.get_mut(&c.faction) {
                entry.0 = entry.0.saturating_add(1);
            }
        }
        for casualty in &self.casualties {
            if let Some(entry) = tally.get_mut(&casualty.faction) {
                entry.1 = entry.1.saturating_add(1);
            }
        }
        tally
    }
}
