//! Recruitment: stat templates per role and a per-culture name pool.
//!
//! A recruit's stats are the role's template, each value jittered by up to
//! [`JITTER_PCT`] percent. Names are drawn without replacement from the
//! pool of the recruit's culture; once a pool is exhausted a numbered
//! variant of a pool name is used instead.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use gallia_types::{Character, CharacterStats, Faction, Gender, IdGenerator, Role};

use crate::chance;

/// Maximum deviation of a recruit's stats from the role template, in percent.
pub const JITTER_PCT: u32 = 10;

// -----------------------------------------------------------------------
// Name pools
// -----------------------------------------------------------------------

const GAULISH_NAMES: &[&str] = &[
    "Asterix", "Obelix", "Getafix", "Vitalstatistix", "Cacofonix", "Fulliautomatix",
    "Unhygienix", "Geriatrix", "Dogmatix", "Justforkix", "Cetautomatix", "Ordralfabetix",
    "Agecanonix", "Assurancetourix", "Abraracourcix", "Panoramix", "Tragicomix", "Alambix",
];

const GAULISH_FEMALE_NAMES: &[&str] = &[
    "Bacteria", "Impedimenta", "Panacea", "Falbala", "Iélosubmarine", "Mrs Geriatrix",
];

const ROMAN_NAMES: &[&str] = &[
    "Caius Bonus", "Marcus Ubiquitus", "Crismus Bonus", "Tullius Octopus", "Caius Flebitus",
    "Gracchus Armisurplus", "Julius Pompilius", "Nefarius Purpus", "Magnumopus",
    "Claudius Cornedbeefus", "Felix Caveus", "Sendervictorius", "Caius Fatuous", "Ignoramus",
    "Lucius Fastidius",
];

const ROMAN_FEMALE_NAMES: &[&str] = &[
    "Livia", "Cornelia", "Octavia", "Flavia", "Aurelia", "Claudia",
];

const CREATURE_NAMES: &[&str] = &[
    "Fenris", "Lupa", "Chiron", "Nessus", "Pholus", "Silverhorn", "Moonmane", "Greyfang",
    "Ashpelt", "Starbrow",
];

fn pool_for(role: Role, gender: Gender) -> &'static [&'static str] {
    match (role.native_faction(), gender) {
        (Faction::Gaulish, Gender::Male) => GAULISH_NAMES,
        (Faction::Gaulish, Gender::Female) => GAULISH_FEMALE_NAMES,
        (Faction::Roman, Gender::Male) => ROMAN_NAMES,
        (Faction::Roman, Gender::Female) => ROMAN_FEMALE_NAMES,
        (Faction::Wild, _) => CREATURE_NAMES,
    }
}

/// Pick a name from the role's pool that is not in `taken`.
///
/// Falls back to `"<pool name> <n>"` with the smallest free `n` once every
/// pool name is taken.
pub fn pick_name(
    rng: &mut impl Rng,
    role: Role,
    gender: Gender,
    taken: &BTreeSet<String>,
) -> String {
    let pool = pool_for(role, gender);
    let available: Vec<&str> = pool
        .iter()
        .filter(|&&name| !taken.contains(name))
        .copied()
        .collect();

    if let Some(name) = chance::pick_index(rng, available.len()).and_then(|i| available.get(i)) {
        return String::from(*name);
    }

    let base = chance::pick_index(rng, pool.len())
        .and_then(|i| pool.get(i))
        .copied()
        .unwrap_or("Recruit");
    let mut suffix: u32 = 2;
    loop {
        let candidate = format!("{base} {suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix = suffix.saturating_add(1);
    }
}

// -----------------------------------------------------------------------
// Stat templates
// -----------------------------------------------------------------------

/// Baseline stats of a freshly recruited character of `role`.
pub const fn template(role: Role) -> CharacterStats {
    let (height_cm, age, strength, endurance, health, belligerence) = match role {
        Role::Warrior => (150, 30, 50, 40, 100, 70),
        Role::Druid => (165, 70, 20, 30, 80, 10),
        Role::Blacksmith => (160, 40, 45, 45, 100, 40),
        Role::Innkeeper => (155, 45, 25, 30, 90, 15),
        Role::Merchant => (150, 45, 20, 25, 85, 10),
        Role::Legionary => (170, 25, 45, 45, 100, 60),
        Role::Prefect => (175, 45, 25, 30, 85, 20),
        Role::General => (178, 50, 50, 50, 110, 65),
        Role::Lycanthrope => (185, 20, 60, 40, 120, 80),
        Role::Centaur => (210, 60, 55, 55, 130, 50),
        Role::Unicorn => (160, 100, 30, 60, 150, 5),
    };
    CharacterStats {
        height_cm,
        age,
        strength,
        endurance,
        health,
        belligerence,
    }
}

fn jitter(rng: &mut impl Rng, base: u32) -> u32 {
    let spread = base.saturating_mul(JITTER_PCT) / 100;
    chance::pick_between(rng, base.saturating_sub(spread), base.saturating_add(spread))
}

/// Role template with every stat jittered; health never below 1.
pub fn roll_stats(rng: &mut impl Rng, role: Role) -> CharacterStats {
    let base = template(role);
    CharacterStats {
        height_cm: jitter(rng, base.height_cm),
        age: jitter(rng, base.age),
        strength: jitter(rng, base.strength),
        endurance: jitter(rng, base.endurance),
        health: jitter(rng, base.health).max(1),
        belligerence: jitter(rng, base.belligerence),
    }
}

/// Recruit a new character of `role` with a fresh id, a name not in
/// `taken`, random gender and jittered template stats.
pub fn recruit(
    ids: &mut IdGenerator,
    rng: &mut impl Rng,
    role: Role,
    taken: &BTreeSet<String>,
) -> Character {
    let gender = if rng.random_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };
    let name = pick_name(rng, role, gender, taken);
    let stats = roll_stats(rng, role);
    let character = Character::new(ids.next_id(), name, gender, role, stats);

    debug!(
        id = %character.id,
        name = %character.name,
        role = ?role,
        "Recruited character"
    );

    character
}
