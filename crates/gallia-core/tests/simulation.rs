//! End-to-end tests for the round cycle and the runner.
//!
//! These build small worlds by hand, or the default starting world, and
//! drive them through [`run_simulation`] with scripted leaders.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use gallia_agents::AttritionConfig;
use gallia_core::config::{RoundMode, SimulationConfig};
use gallia_core::context::SimContext;
use gallia_core::leader::{LeaderAction, PassingLeader, ScriptedLeader};
use gallia_core::report::Verdict;
use gallia_core::round::{RoundSummary, Simulation};
use gallia_core::runner::{EndReason, NoOpObserver, RoundObserver, RunControl, run_simulation};
use gallia_pack::create_starting_colony;
use gallia_types::{
    Character, CharacterStats, Faction, Gender, IdGenerator, PlaceId, PlaceKind, Role,
};
use gallia_world::{Place, PlaceMap, RejectionReason, create_starting_world};

fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.attrition = AttritionConfig::inert();
    config.food.spawn_probability = 0.0;
    config
}

fn fighter(ids: &mut IdGenerator, name: &str, role: Role, belligerence: u32) -> Character {
    Character::new(
        ids.next_id(),
        name,
        Gender::Male,
        role,
        CharacterStats {
            height_cm: 170,
            age: 30,
            strength: 50,
            endurance: 40,
            health: 100,
            belligerence,
        },
    )
}

/// One Gaul against one Roman, each in its own place, and a battlefield.
fn one_on_one(gaul_belligerence: u32) -> Simulation {
    let mut ids = IdGenerator::new();
    let village_id: PlaceId = ids.next_id();
    let camp_id: PlaceId = ids.next_id();
    let field_id: PlaceId = ids.next_id();

    let mut village = Place::new(village_id, "Armorica", PlaceKind::GaulishVillage, 1000);
    village
        .add_character(fighter(&mut ids, "Asterix", Role::Warrior, gaul_belligerence))
        .unwrap();
    let mut camp = Place::new(camp_id, "Babaorum", PlaceKind::RomanCamp, 1000);
    camp.add_character(fighter(&mut ids, "Caius", Role::Legionary, 50))
        .unwrap();

    let mut map = PlaceMap::new();
    map.insert(village).unwrap();
    map.insert(camp).unwrap();
    map.insert(Place::new(field_id, "Plain", PlaceKind::Battlefield, 5000))
        .unwrap();
    Simulation::new(map, SimContext::with_ids(7, ids), quiet_config())
}

fn starting_simulation(seed: u64) -> Simulation {
    let mut config = SimulationConfig::default();
    config.world.seed = seed;
    let mut ids = IdGenerator::new();
    let (map, _) = create_starting_world(&mut ids).unwrap();
    let (colony, _) = create_starting_colony(&mut ids).unwrap();
    Simulation::new(map, SimContext::with_ids(seed, ids), config).with_colony(colony)
}

#[test]
fn one_on_one_ends_with_exactly_one_dead() {
    let mut sim = one_on_one(50);
    let result = run_simulation(&mut sim, 1, &mut PassingLeader::new(), &mut NoOpObserver).unwrap();

    assert_eq!(result.rounds_played, 1);
    assert_eq!(sim.casualties().len(), 1);
    assert_eq!(sim.total_characters(), 1);

    let summary = result.final_summary.unwrap();
    assert_eq!(summary.battles.duels.len(), 1);
    assert_eq!(summary.returns.returned.len(), 1);

    let dead = sim.casualties()[0].faction;
    let winner = if dead == Faction::Gaulish {
        Faction::Roman
    } else {
        Faction::Gaulish
    };
    assert_eq!(result.outcome.verdict, Verdict::Winner(winner));
    assert_eq!(result.outcome.factions[&dead].casualties, 1);
    assert_eq!(result.outcome.factions[&winner].survivors, 1);
}

#[test]
fn peaceful_gaul_means_nobody_dies() {
    let mut sim = one_on_one(0);
    let result = run_simulation(&mut sim, 3, &mut PassingLeader::new(), &mut NoOpObserver).unwrap();

    assert_eq!(result.end_reason, EndReason::RoundsCompleted);
    assert_eq!(result.rounds_played, 3);
    assert!(sim.casualties().is_empty());
    assert_eq!(sim.total_characters(), 2);
    assert_eq!(result.outcome.verdict, Verdict::Tie);
}

#[test]
fn same_seed_same_run() {
    let mut first = starting_simulation(1234);
    let mut second = starting_simulation(1234);
    let mut summaries = (Vec::new(), Vec::new());

    for _ in 0..5 {
        summaries.0.push(first.run_round(&mut PassingLeader::new()).unwrap());
        summaries.1.push(second.run_round(&mut PassingLeader::new()).unwrap());
    }

    assert_eq!(summaries.0, summaries.1);
    assert_eq!(first.map, second.map);
    assert_eq!(first.colony, second.colony);
    assert_eq!(first.casualties(), second.casualties());
}

#[test]
fn every_round_has_a_season_when_a_colony_is_attached() {
    let mut sim = starting_simulation(5);
    let summary = sim.run_round(&mut PassingLeader::new()).unwrap();
    let season = summary.season.unwrap();
    assert_eq!(season.aged, 10);
    assert!(gallia_core::report::outcome(&sim).wolves.is_some());
}

#[test]
fn scripted_leaders_act_on_the_starting_world() {
    let mut sim = starting_simulation(11);
    sim.config.world.mode = RoundMode::Interval;
    let mut leader = ScriptedLeader::new([LeaderAction::HealTeam, LeaderAction::Pass]);
    let summary = sim.run_round(&mut leader).unwrap();

    // Four clan places have a chief; the first takes the script, the rest pass.
    assert_eq!(summary.leaders.len(), 4);
    assert_eq!(summary.leaders[0].outcomes.len(), 2);
    assert!(summary.leaders[1..].iter().all(|turn| turn.outcomes.len() == 1));
    assert_eq!(leader.remaining(), 0);
}

#[test]
fn enclosure_capacity_is_enforced() {
    let mut ids = IdGenerator::new();
    let mut pen = Place::new(ids.next_id(), "Pen", PlaceKind::Enclosure, 100).with_capacity(1);
    pen.add_character(fighter(&mut ids, "Chiron", Role::Centaur, 50))
        .unwrap();

    let rejected = pen
        .add_character(fighter(&mut ids, "Nessus", Role::Centaur, 50))
        .unwrap_err();
    assert_eq!(rejected.reason, RejectionReason::Full);
    assert_eq!(rejected.character.name, "Nessus");
    assert_eq!(pen.number_of_characters(), 1);

    let refused = pen
        .add_character(fighter(&mut ids, "Brutus", Role::Legionary, 50))
        .unwrap_err();
    assert_eq!(refused.reason, RejectionReason::NotAdmitted);
}

struct StopAfter {
    rounds: u32,
    seen: u32,
}

impl RoundObserver for StopAfter {
    fn on_round(&mut self, _summary: &RoundSummary, _sim: &Simulation) -> RunControl {
        self.seen += 1;
        if self.seen >= self.rounds {
            RunControl::Stop
        } else {
            RunControl::Continue
        }
    }
}

#[test]
fn observer_can_stop_the_run() {
    let mut sim = one_on_one(0);
    let mut observer = StopAfter { rounds: 2, seen: 0 };
    let result = run_simulation(&mut sim, 10, &mut PassingLeader::new(), &mut observer).unwrap();
    assert_eq!(result.end_reason, EndReason::ObserverStop);
    assert_eq!(result.rounds_played, 2);
    assert_eq!(sim.round(), 2);
}

#[test]
fn extinction_ends_the_run_early() {
    let mut sim = one_on_one(50);
    sim.config.attrition = AttritionConfig {
        injury_chance: 1.0,
        injury_min: 1000,
        injury_max: 1000,
        ..AttritionConfig::inert()
    };
    let result =
        run_simulation(&mut sim, 10, &mut PassingLeader::new(), &mut NoOpObserver).unwrap();
    assert_eq!(result.end_reason, EndReason::Extinction);
    assert_eq!(result.rounds_played, 1);
    assert_eq!(result.outcome.verdict, Verdict::Tie);
}

#[test]
fn pacifist_clans_play_every_round() {
    let mut sim = one_on_one(0);
    for place in sim.map.places_mut() {
        for character in place.characters_mut() {
            character.belligerence = 0;
        }
    }
    let result = run_simulation(&mut sim, 5, &mut PassingLeader::new(), &mut NoOpObserver).unwrap();

    assert_eq!(result.end_reason, EndReason::RoundsCompleted);
    assert_eq!(result.rounds_played, 5);
    let summary = result.final_summary.unwrap();
    assert_eq!(summary.fighters_alive, 0);
    assert_eq!(summary.clan_alive, 2);
}

#[test]
fn summaries_serialize_to_json() {
    let mut sim = starting_simulation(3);
    let result = run_simulation(&mut sim, 2, &mut PassingLeader::new(), &mut NoOpObserver).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["rounds_played"], 2);
    assert!(json["final_summary"]["counters"].is_array());
    assert!(json["outcome"]["factions"].is_object());
}
