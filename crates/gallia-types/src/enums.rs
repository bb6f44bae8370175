//! Enumeration types for the Gallia simulation.
//!
//! Factions, roles and their capabilities, place kinds, the food
//! freshness ladder, food kinds with their diet table, potion ingredients,
//! and the lycanthrope enumerations (sex, age category, howl kinds).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// Gender of a character or clan leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// The side a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Villagers of the unconquered Gaulish village.
    Gaulish,
    /// Legionaries, prefects and generals of Rome.
    Roman,
    /// Fantastic creatures that answer to no clan.
    Wild,
}

impl Faction {
    /// The two factions that field clans and fight pooled battles.
    pub const CLANS: [Self; 2] = [Self::Gaulish, Self::Roman];

    /// Whether this faction fields clans (has villages, camps, chiefs).
    pub const fn is_clan(self) -> bool {
        matches!(self, Self::Gaulish | Self::Roman)
    }
}

/// Something a character is able to do.
///
/// Behaviour keys on capabilities rather than on the concrete role, so a
/// new role only has to declare which capabilities it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Takes part in battles.
    Fight,
    /// Brews magic potion for the clan.
    BrewPotion,
    /// Tends the wounded.
    Heal,
    /// Buys and sells.
    Trade,
    /// Gives orders to troops.
    Command,
}

/// The role tag of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Gaulish warrior.
    Warrior,
    /// Gaulish druid, keeper of the potion recipe.
    Druid,
    /// Gaulish blacksmith.
    Blacksmith,
    /// Gaulish innkeeper.
    Innkeeper,
    /// Gaulish fishmonger or merchant.
    Merchant,
    /// Roman legionary.
    Legionary,
    /// Roman prefect.
    Prefect,
    /// Roman general.
    General,
    /// Werewolf.
    Lycanthrope,
    /// Centaur.
    Centaur,
    /// Unicorn.
    Unicorn,
}

impl Role {
    /// Capabilities carried by this role.
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Warrior | Self::Legionary | Self::Lycanthrope | Self::Centaur => {
                &[Capability::Fight]
            }
            Self::Druid => &[Capability::BrewPotion, Capability::Heal],
            Self::Blacksmith => &[Capability::Fight, Capability::Trade],
            Self::Innkeeper | Self::Merchant => &[Capability::Trade],
            Self::Prefect => &[Capability::Command],
            Self::General => &[Capability::Fight, Capability::Command],
            Self::Unicorn => &[Capability::Heal],
        }
    }

    /// Whether this role carries the given capability.
    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Whether the role is a fantastic creature.
    pub const fn is_creature(self) -> bool {
        matches!(self, Self::Lycanthrope | Self::Centaur | Self::Unicorn)
    }

    /// The faction a character of this role is normally born into.
    pub const fn native_faction(self) -> Faction {
        match self {
            Self::Warrior | Self::Druid | Self::Blacksmith | Self::Innkeeper | Self::Merchant => {
                Faction::Gaulish
            }
            Self::Legionary | Self::Prefect | Self::General => Faction::Roman,
            Self::Lycanthrope | Self::Centaur | Self::Unicorn => Faction::Wild,
        }
    }
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

/// The kind of a place. Each kind carries its own admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlaceKind {
    /// The Gaulish village.
    GaulishVillage,
    /// A fortified Roman camp.
    RomanCamp,
    /// A Roman city.
    RomanCity,
    /// A Gallo-Roman town open to both clans.
    MixedTown,
    /// Where the clans meet to fight.
    Battlefield,
    /// A pen for fantastic creatures, with a fixed capacity.
    Enclosure,
}

impl PlaceKind {
    /// What the place's auxiliary percentage counter measures, if anything.
    pub const fn counter(self) -> Option<CounterKind> {
        match self {
            Self::GaulishVillage => Some(CounterKind::Resistance),
            Self::RomanCamp => Some(CounterKind::Morale),
            Self::RomanCity => Some(CounterKind::Commerce),
            Self::MixedTown => Some(CounterKind::Peacefulness),
            Self::Battlefield | Self::Enclosure => None,
        }
    }

    /// Whether food may spawn and be stocked here.
    pub const fn stocks_food(self) -> bool {
        !matches!(self, Self::Battlefield)
    }
}

/// Meaning of a place's auxiliary counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    /// Village resistance against Rome.
    Resistance,
    /// Camp morale.
    Morale,
    /// City commerce.
    Commerce,
    /// Town peacefulness.
    Peacefulness,
}

// ---------------------------------------------------------------------------
// Food
// ---------------------------------------------------------------------------

/// Spoilage state of a food item.
///
/// The ladder only moves downward: FRESH, then OKAY, then ROTTEN, where it
/// stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Freshness {
    /// Just gathered.
    Fresh,
    /// Still edible.
    Okay,
    /// Spoiled. Eating it hurts.
    Rotten,
}

impl Freshness {
    /// The next step down the ladder. `Rotten` is terminal.
    #[must_use]
    pub const fn degrade(self) -> Self {
        match self {
            Self::Fresh => Self::Okay,
            Self::Okay | Self::Rotten => Self::Rotten,
        }
    }

    /// Share of the nominal nutrition still available, in percent.
    pub const fn nutrition_pct(self) -> u32 {
        match self {
            Self::Fresh => 100,
            Self::Okay => 75,
            Self::Rotten => 50,
        }
    }
}

/// Kinds of food found in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    /// Roast wild boar.
    Boar,
    /// Fish, of varying freshness.
    Fish,
    /// Lobster.
    Lobster,
    /// Honey.
    Honey,
    /// Strawberries.
    Strawberries,
    /// Carrots.
    Carrots,
    /// Beetroot.
    Beetroot,
    /// Wine.
    Wine,
    /// Mead.
    Mead,
    /// Mistletoe, cut with a golden sickle. Not eaten.
    Mistletoe,
}

impl FoodKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Boar,
        Self::Fish,
        Self::Lobster,
        Self::Honey,
        Self::Strawberries,
        Self::Carrots,
        Self::Beetroot,
        Self::Wine,
        Self::Mead,
        Self::Mistletoe,
    ];

    /// Nominal satiety restored when eaten fresh.
    pub const fn nutrition(self) -> u32 {
        match self {
            Self::Boar => 30,
            Self::Lobster => 20,
            Self::Fish => 15,
            Self::Wine | Self::Mead => 12,
            Self::Honey => 10,
            Self::Strawberries | Self::Carrots | Self::Beetroot => 8,
            Self::Mistletoe => 0,
        }
    }

    /// Whether a member of `faction` eats this kind.
    pub const fn is_edible_by(self, faction: Faction) -> bool {
        match self {
            Self::Boar => matches!(faction, Faction::Gaulish | Faction::Wild),
            Self::Fish | Self::Strawberries | Self::Carrots => true,
            Self::Lobster | Self::Wine => matches!(faction, Faction::Roman),
            Self::Honey => matches!(faction, Faction::Gaulish | Faction::Roman),
            Self::Beetroot | Self::Mead => matches!(faction, Faction::Gaulish),
            Self::Mistletoe => false,
        }
    }

    /// The potion ingredient this food can stand in for.
    pub const fn ingredient(self) -> Option<Ingredient> {
        match self {
            Self::Mistletoe => Some(Ingredient::Mistletoe),
            Self::Lobster => Some(Ingredient::Lobster),
            Self::Strawberries => Some(Ingredient::Strawberries),
            Self::Beetroot => Some(Ingredient::Beetroot),
            Self::Honey => Some(Ingredient::Honey),
            Self::Mead => Some(Ingredient::Mead),
            Self::Carrots => Some(Ingredient::Carrots),
            Self::Fish => Some(Ingredient::Fish),
            Self::Boar | Self::Wine => None,
        }
    }
}

/// Magic potion ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ingredient {
    /// Mistletoe.
    Mistletoe,
    /// Lobster.
    Lobster,
    /// Strawberries.
    Strawberries,
    /// Beetroot juice.
    Beetroot,
    /// Rock oil.
    RockOil,
    /// Salt.
    Salt,
    /// Honey.
    Honey,
    /// Mead.
    Mead,
    /// Carrots.
    Carrots,
    /// Fresh fish.
    Fish,
    /// Unicorn milk.
    UnicornMilk,
}

// ---------------------------------------------------------------------------
// Lycanthropes
// ---------------------------------------------------------------------------

/// Biological sex of a lycanthrope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// Age bracket of a lycanthrope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    /// Pup or juvenile.
    Young,
    /// In its prime.
    Adult,
    /// Past its prime.
    Old,
}

impl AgeCategory {
    /// Weight of the age bracket in the computed level.
    ///
    /// Adults weigh most, the old next, the young least.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Young => 1.0,
            Self::Old => 2.0,
            Self::Adult => 3.0,
        }
    }

    /// The next bracket. `Old` is terminal.
    #[must_use]
    pub const fn older(self) -> Self {
        match self {
            Self::Young => Self::Adult,
            Self::Adult | Self::Old => Self::Old,
        }
    }
}

/// Meaning carried by a howl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HowlKind {
    /// "I belong to this pack."
    Belonging,
    /// Asserting dominance over a pack-mate.
    Dominance,
    /// Acknowledging a pack-mate's dominance.
    Submission,
    /// Warning before a fight.
    Aggressivity,
    /// Territorial answer to a foreign pack.
    Hostility,
}
