//! Core entity structs for the Gallia simulation.
//!
//! Characters, clan leaders, food, potions, lycanthropes with their rank
//! ladder, and the combat record produced by a duel. Logic operating on
//! these types lives in the downstream crates; the constructors and simple
//! predicates defined here never touch randomness.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::{
    AgeCategory, Capability, Faction, FoodKind, Freshness, Gender, Ingredient, Role, Sex,
};
use crate::ids::{CharacterId, LycanId, PackId, PlaceId};

/// Strength bonus granted by each level of active magic potion.
pub const POTION_STRENGTH_PER_LEVEL: u32 = 10;

/// Upper bound of the hunger (satiety) gauge.
pub const MAX_HUNGER: u32 = 100;

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// Starting statistics of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Height in centimetres.
    pub height_cm: u32,
    /// Age in years.
    pub age: u32,
    /// Raw strength.
    pub strength: u32,
    /// Endurance, subtracted from an opponent's strength in a duel.
    pub endurance: u32,
    /// Starting health, which also becomes the maximum health.
    pub health: u32,
    /// Willingness to fight. Zero means non-combatant.
    pub belligerence: u32,
}

/// A villager, legionary or fantastic creature.
///
/// The role tag replaces a hierarchy of character subtypes: everything a
/// character can do is derived from [`Role::capabilities`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Current faction. May be reassigned; places do not re-check it.
    pub faction: Faction,
    /// Role tag.
    pub role: Role,
    /// Height in centimetres.
    pub height_cm: u32,
    /// Age in years.
    pub age: u32,
    /// Raw strength.
    pub strength: u32,
    /// Endurance.
    pub endurance: u32,
    /// Current health, `0..=max_health`. Zero means dead.
    pub health: u32,
    /// Health at creation, the ceiling for every heal.
    pub max_health: u32,
    /// Satiety gauge, `0..=MAX_HUNGER`. Low means starving.
    pub hunger: u32,
    /// Willingness to fight.
    pub belligerence: u32,
    /// Active magic potion level. Wears off over time.
    pub potion_level: u32,
    /// Doses drunk over the character's whole life.
    pub potion_doses_total: u32,
    /// Turned to stone by an overdose of potion.
    pub petrified: bool,
    /// Place the character was deployed from, if deployed.
    pub origin: Option<PlaceId>,
}

impl Character {
    /// Create a character of the given role in its native faction.
    ///
    /// The character starts sated, without potion, and with
    /// `max_health == stats.health`.
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        gender: Gender,
        role: Role,
        stats: CharacterStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            gender,
            faction: role.native_faction(),
            role,
            height_cm: stats.height_cm,
            age: stats.age,
            strength: stats.strength,
            endurance: stats.endurance,
            health: stats.health,
            max_health: stats.health,
            hunger: MAX_HUNGER,
            belligerence: stats.belligerence,
            potion_level: 0,
            potion_doses_total: 0,
            petrified: false,
            origin: None,
        }
    }

    /// Override the faction (a turncoat, a creature tamed by a clan).
    #[must_use]
    pub const fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    /// Whether the character still has health left.
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Whether the character carries the given capability.
    pub fn can(&self, capability: Capability) -> bool {
        self.role.has(capability)
    }

    /// Whether the character is a fantastic creature.
    pub const fn is_creature(&self) -> bool {
        self.role.is_creature()
    }

    /// Whether the character enters battle pools: alive, belligerent,
    /// fight-capable and not petrified.
    pub fn is_combatant(&self) -> bool {
        self.is_alive() && self.belligerence > 0 && !self.petrified && self.can(Capability::Fight)
    }

    /// Strength used in duels: raw strength plus the active potion bonus.
    pub const fn effective_strength(&self) -> u32 {
        self.strength
            .saturating_add(self.potion_level.saturating_mul(POTION_STRENGTH_PER_LEVEL))
    }

    /// Whether the satiety gauge is below full.
    pub const fn is_hungry(&self) -> bool {
        self.hunger < MAX_HUNGER
    }
}

/// Chief of a clan place. Not part of the place's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanLeader {
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Age in years.
    pub age: u32,
    /// Clan the leader commands.
    pub faction: Faction,
}

// ---------------------------------------------------------------------------
// Consumables
// ---------------------------------------------------------------------------

/// A food item in a place's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    /// What it is.
    pub kind: FoodKind,
    /// How spoiled it is.
    pub freshness: Freshness,
}

impl Food {
    /// A freshly gathered item.
    pub const fn fresh(kind: FoodKind) -> Self {
        Self {
            kind,
            freshness: Freshness::Fresh,
        }
    }

    /// Move one step down the freshness ladder.
    pub const fn degrade(&mut self) {
        self.freshness = self.freshness.degrade();
    }

    /// Satiety restored at the current freshness.
    pub const fn nutrition(&self) -> u32 {
        self.kind.nutrition().saturating_mul(self.freshness.nutrition_pct()) / 100
    }

    /// Whether the item is rotten.
    pub const fn is_rotten(&self) -> bool {
        matches!(self.freshness, Freshness::Rotten)
    }
}

/// A cauldron of magic potion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    /// Doses left.
    pub doses: u32,
    /// What went into it.
    pub ingredients: BTreeSet<Ingredient>,
}

impl Potion {
    /// Whether no dose is left.
    pub const fn is_empty(&self) -> bool {
        self.doses == 0
    }
}

// ---------------------------------------------------------------------------
// Lycanthropes
// ---------------------------------------------------------------------------

/// Position on a pack's rank ladder. Index 0 is alpha, the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    /// Symbolic labels, highest first.
    pub const LADDER: [&'static str; 24] = [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi",
        "chi", "psi", "omega",
    ];

    /// The top rank.
    pub const ALPHA: Self = Self(0);

    /// The bottom rank.
    pub const OMEGA: Self = Self(23);

    /// Build a rank from a ladder index, clamping to omega.
    pub const fn from_index(index: u8) -> Self {
        if index > Self::OMEGA.0 {
            Self::OMEGA
        } else {
            Self(index)
        }
    }

    /// Ladder index (0 = alpha).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Symbolic label of the rank.
    pub fn label(self) -> &'static str {
        Self::LADDER.get(usize::from(self.0)).copied().unwrap_or("omega")
    }

    /// Number of steps between this rank and omega.
    pub const fn steps_above_omega(self) -> u8 {
        Self::OMEGA.0.saturating_sub(self.0)
    }

    /// The rank directly above, if any.
    pub const fn above(self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(index) => Some(Self(index)),
            None => None,
        }
    }
}

/// A member of a lycanthrope colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lycanthrope {
    /// Unique identifier.
    pub id: LycanId,
    /// Display name.
    pub name: String,
    /// Biological sex.
    pub sex: Sex,
    /// Age bracket.
    pub age: AgeCategory,
    /// Raw strength.
    pub strength: u32,
    /// Cumulative contest score. Changed only by dominance contests.
    pub dominance: i32,
    /// Propensity to pick fights, `0.0..=1.0`.
    pub impetuosity: f64,
    /// Position on the pack's ladder.
    pub rank: Rank,
    /// Pack the lycanthrope currently runs with. A handle, not ownership.
    pub pack: Option<PackId>,
    /// Transformed back into a human for good.
    pub is_human: bool,
}

impl Lycanthrope {
    /// Create an unpacked lycanthrope at omega rank with zero dominance.
    ///
    /// Impetuosity is clamped into `0.0..=1.0`.
    pub fn new(
        id: LycanId,
        name: impl Into<String>,
        sex: Sex,
        age: AgeCategory,
        strength: u32,
        impetuosity: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            sex,
            age,
            strength,
            dominance: 0,
            impetuosity: impetuosity.clamp(0.0, 1.0),
            rank: Rank::OMEGA,
            pack: None,
            is_human: false,
        }
    }

    /// Whether the lycanthrope belongs to a pack.
    pub const fn is_packed(&self) -> bool {
        self.pack.is_some()
    }
}

// ---------------------------------------------------------------------------
// Combat records
// ---------------------------------------------------------------------------

/// One strike in a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelTurn {
    /// Who struck.
    pub striker: CharacterId,
    /// Damage dealt by the strike.
    pub damage: u32,
    /// Health of the struck party after the strike.
    pub target_health: u32,
}

/// One party's view of a finished duel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSide {
    /// Character ID.
    pub id: CharacterId,
    /// Character name at the time of the duel.
    pub name: String,
    /// Faction at the time of the duel.
    pub faction: Faction,
    /// Total damage this party dealt.
    pub damage_dealt: u32,
    /// Health after the duel.
    pub health_after: u32,
    /// Whether this party died.
    pub died: bool,
}

/// Record of a finished duel. Used for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    /// The party that struck first.
    pub attacker: CombatSide,
    /// The party that struck second.
    pub defender: CombatSide,
    /// Every strike, in order.
    pub turns: Vec<DuelTurn>,
}

impl CombatResult {
    /// ID of the surviving party.
    pub const fn winner(&self) -> Option<CharacterId> {
        match (self.attacker.died, self.defender.died) {
            (false, true) => Some(self.attacker.id),
            (true, false) => Some(self.defender.id),
            _ => None,
        }
    }
}
