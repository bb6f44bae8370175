//! A place: its residents, food stock, cauldron and auxiliary counter.
//!
//! Every place kind carries an admission policy, checked only when a
//! character enters. Residents are never re-validated afterwards, so a
//! character whose faction changes keeps its place.
//!
//! | Kind | Admits |
//! |---|---|
//! | `GaulishVillage` | Gauls and fantastic creatures |
//! | `RomanCamp`, `RomanCity` | Romans and fantastic creatures |
//! | `MixedTown` | Gauls and Romans |
//! | `Battlefield` | anyone |
//! | `Enclosure` | fantastic creatures, up to the capacity |
//!
//! A place owns its characters by value. Removing a character hands it
//! back to the caller; a refused admission does the same through
//! [`AdmissionRejected`].

use std::fmt;

use serde::Serialize;

use gallia_agents::vitals::{self, MealOutcome};
use gallia_types::{
    Character, CharacterId, ClanLeader, CounterKind, Faction, Food, FoodKind, Freshness, PlaceId,
    PlaceKind, Potion,
};

/// Counter value of a freshly built place.
pub const DEFAULT_COUNTER: u32 = 50;

/// Upper bound of every counter.
pub const MAX_COUNTER: u32 = 100;

/// Why a character was refused entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    /// The character is dead.
    Dead,
    /// The place's policy does not admit this faction or role.
    NotAdmitted,
    /// The place is at capacity.
    Full,
    /// A character with the same id is already here.
    Duplicate,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Dead => "dead characters are not admitted",
            Self::NotAdmitted => "not admitted by this kind of place",
            Self::Full => "place is full",
            Self::Duplicate => "already a resident",
        };
        f.write_str(text)
    }
}

/// A refused admission. Carries the character back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} refused: {reason}", .character.name)]
pub struct AdmissionRejected {
    /// Why the place refused the character.
    pub reason: RejectionReason,
    /// The character, returned unchanged.
    pub character: Box<Character>,
}

/// What feeding did to one hungry resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedingEvent {
    /// The character ate one item from the stock.
    Ate {
        /// Who ate.
        character: CharacterId,
        /// What was eaten.
        food: FoodKind,
        /// How fresh it was.
        freshness: Freshness,
        /// The meal's effect.
        meal: MealOutcome,
    },
    /// Nothing in stock suited the character's diet.
    Unfed {
        /// Who went hungry.
        character: CharacterId,
    },
}

/// A place in Gallia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    /// Unique identifier.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// Kind, which decides the admission policy and the counter's meaning.
    pub kind: PlaceKind,
    /// Area in square metres.
    pub area_m2: u32,
    chief: Option<ClanLeader>,
    characters: Vec<Character>,
    foods: Vec<Food>,
    cauldron: Option<Potion>,
    counter: u32,
    capacity: Option<usize>,
}

impl Place {
    /// Create an empty place without chief, cauldron or capacity limit.
    pub fn new(id: PlaceId, name: impl Into<String>, kind: PlaceKind, area_m2: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            area_m2,
            chief: None,
            characters: Vec::new(),
            foods: Vec::new(),
            cauldron: None,
            counter: DEFAULT_COUNTER,
            capacity: None,
        }
    }

    /// Give the place a chief.
    #[must_use]
    pub fn with_chief(mut self, chief: ClanLeader) -> Self {
        self.chief = Some(chief);
        self
    }

    /// Limit the number of residents.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    // -------------------------------------------------------------------
    // Admission
    // -------------------------------------------------------------------

    /// Whether the kind's policy admits this faction and role, ignoring
    /// occupancy.
    pub fn policy_admits(&self, character: &Character) -> bool {
        let creature = character.is_creature();
        match self.kind {
            PlaceKind::GaulishVillage => character.faction == Faction::Gaulish || creature,
            PlaceKind::RomanCamp | PlaceKind::RomanCity => {
                character.faction == Faction::Roman || creature
            }
            PlaceKind::MixedTown => character.faction.is_clan(),
            PlaceKind::Battlefield => true,
            PlaceKind::Enclosure => creature,
        }
    }

    /// Check whether `character` may enter now.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectionReason`] that would refuse it.
    pub fn check_admission(&self, character: &Character) -> Result<(), RejectionReason> {
        if !character.is_alive() {
            return Err(RejectionReason::Dead);
        }
        if self.contains(character.id) {
            return Err(RejectionReason::Duplicate);
        }
        if !self.policy_admits(character) {
            return Err(RejectionReason::NotAdmitted);
        }
        if self.is_full() {
            return Err(RejectionReason::Full);
        }
        Ok(())
    }

    /// Whether `character` may enter now.
    pub fn can_admit(&self, character: &Character) -> bool {
        self.check_admission(character).is_ok()
    }

    /// Whether the place has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.characters.len() >= capacity)
    }

    /// Admit a character.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionRejected`] holding the character if the place
    /// refuses it.
    pub fn add_character(&mut self, character: Character) -> Result<(), AdmissionRejected> {
        match self.check_admission(&character) {
            Ok(()) => {
                self.characters.push(character);
                Ok(())
            }
            Err(reason) => Err(AdmissionRejected {
                reason,
                character: Box::new(character),
            }),
        }
    }

    /// Put back a character that was just removed from here, bypassing the
    /// policy that admitted it in the first place.
    pub(crate) fn restore_character(&mut self, character: Character) {
        self.characters.push(character);
    }

    /// Remove a resident, handing it back.
    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        let index = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(index))
    }

    /// Remove every dead resident, returning them in roster order.
    pub fn remove_dead_characters(&mut self) -> Vec<Character> {
        let (living, dead): (Vec<Character>, Vec<Character>) =
            std::mem::take(&mut self.characters)
                .into_iter()
                .partition(Character::is_alive);
        self.characters = living;
        dead
    }

    /// Remove every living resident matching `predicate`, in roster order.
    pub fn drain_where(&mut self, mut predicate: impl FnMut(&Character) -> bool) -> Vec<Character> {
        let (taken, kept): (Vec<Character>, Vec<Character>) =
            std::mem::take(&mut self.characters)
                .into_iter()
                .partition(|c| c.is_alive() && predicate(c));
        self.characters = kept;
        taken
    }

    // -------------------------------------------------------------------
    // Residents
    // -------------------------------------------------------------------

    /// All residents in roster order, dead ones included until swept.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Mutable access to the residents. The roster length cannot change
    /// through this slice.
    pub fn characters_mut(&mut self) -> &mut [Character] {
        &mut self.characters
    }

    /// Residents with health left.
    pub fn living_characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| c.is_alive())
    }

    /// Number of residents.
    pub fn number_of_characters(&self) -> usize {
        self.characters.len()
    }

    /// Whether a character with this id lives here.
    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.iter().any(|c| c.id == id)
    }

    /// Look up a resident.
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up a resident mutably.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Heal every living resident by `amount`, clamped to each one's
    /// maximum. Returns the total health restored.
    pub fn heal_all(&mut self, amount: u32) -> u32 {
        self.characters
            .iter_mut()
            .map(|c| vitals::heal(c, amount))
            .fold(0, u32::saturating_add)
    }

    /// Feed every hungry living resident.
    ///
    /// Each one eats the first item in stock that its diet allows; eaten
    /// items leave the stock. Residents that find nothing are reported as
    /// [`FeedingEvent::Unfed`].
    pub fn feed_all(&mut self) -> Vec<FeedingEvent> {
        let mut events = Vec::new();
        for character in &mut self.characters {
            if !character.is_alive() || !character.is_hungry() {
                continue;
            }
            let Some(index) = self.foods.iter().position(|f| vitals::would_eat(character, f))
            else {
                events.push(FeedingEvent::Unfed {
                    character: character.id,
                });
                continue;
            };
            let food = self.foods.remove(index);
            match vitals::eat(character, &food) {
                Ok(meal) => events.push(FeedingEvent::Ate {
                    character: character.id,
                    food: food.kind,
                    freshness: food.freshness,
                    meal,
                }),
                Err(_) => {
                    // `would_eat` already vetted the pair; keep the food.
                    self.foods.insert(index, food);
                    events.push(FeedingEvent::Unfed {
                        character: character.id,
                    });
                }
            }
        }
        events
    }

    // -------------------------------------------------------------------
    // Food
    // -------------------------------------------------------------------

    /// Add an item to the stock.
    pub fn add_food(&mut self, food: Food) {
        self.foods.push(food);
    }

    /// Remove the first item of `kind` from the stock.
    pub fn remove_food(&mut self, kind: FoodKind) -> Option<Food> {
        let index = self.foods.iter().position(|f| f.kind == kind)?;
        Some(self.foods.remove(index))
    }

    /// Whether an item of `kind` is in stock.
    pub fn has_food(&self, kind: FoodKind) -> bool {
        self.foods.iter().any(|f| f.kind == kind)
    }

    /// The stock in arrival order.
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Degrade every item one freshness step. Returns how many items are
    /// rotten afterwards.
    pub fn degrade_foods(&mut self) -> usize {
        for food in &mut self.foods {
            food.degrade();
        }
        self.foods.iter().filter(|f| f.is_rotten()).count()
    }

    // -------------------------------------------------------------------
    // Chief, cauldron, counter
    // -------------------------------------------------------------------

    /// The chief, if any.
    pub const fn chief(&self) -> Option<&ClanLeader> {
        self.chief.as_ref()
    }

    /// Replace the chief.
    pub fn set_chief(&mut self, chief: Option<ClanLeader>) {
        self.chief = chief;
    }

    /// The cauldron, if one is on the fire.
    pub const fn cauldron(&self) -> Option<&Potion> {
        self.cauldron.as_ref()
    }

    /// Take the cauldron off the fire, leaving none.
    pub const fn take_cauldron(&mut self) -> Option<Potion> {
        self.cauldron.take()
    }

    /// Put a potion in the cauldron, returning whatever was there.
    pub fn set_cauldron(&mut self, potion: Potion) -> Option<Potion> {
        self.cauldron.replace(potion)
    }

    /// Maximum number of residents, if limited.
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Current counter value, `0..=MAX_COUNTER`.
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// What the counter measures here, if anything.
    pub const fn counter_kind(&self) -> Option<CounterKind> {
        self.kind.counter()
    }

    /// Shift the counter by `delta`, clamped into `0..=MAX_COUNTER`.
    /// Returns the new value.
    pub fn adjust_counter(&mut self, delta: i32) -> u32 {
        let magnitude = delta.unsigned_abs();
        self.counter = if delta.is_negative() {
            self.counter.saturating_sub(magnitude)
        } else {
            self.counter.saturating_add(magnitude).min(MAX_COUNTER)
        };
        self.counter
    }
}
