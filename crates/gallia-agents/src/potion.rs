//! Magic potion brewing and drinking.
//!
//! A potion is brewed from an ingredient set that must contain the
//! standard recipe. Each dose drunk raises the drinker's active potion
//! level (a combat bonus that wears off during attrition) and the lifetime
//! dose count. Lifetime thresholds are irreversible:
//!
//! | Lifetime doses | Effect |
//! |---|---|
//! | crossing [`FORTIFY_THRESHOLD`] | permanent strength and endurance boost |
//! | crossing [`PETRIFY_THRESHOLD`] | petrified: health, strength, endurance forced to 0 |
//!
//! A potion brewed with unicorn milk also restores the drinker's health.

use std::collections::BTreeSet;

use serde::Serialize;

use gallia_types::{Capability, Character, Ingredient, Potion};

use crate::error::AgentError;

/// Lifetime doses at which the drinker is permanently fortified.
pub const FORTIFY_THRESHOLD: u32 = 10;

/// Lifetime doses at which the drinker turns to stone.
pub const PETRIFY_THRESHOLD: u32 = 20;

/// Permanent strength and endurance gained when fortified.
pub const FORTIFY_BONUS: u32 = 20;

/// Ingredients every brew must contain.
pub const STANDARD_RECIPE: [Ingredient; 6] = [
    Ingredient::Mistletoe,
    Ingredient::Lobster,
    Ingredient::Strawberries,
    Ingredient::Beetroot,
    Ingredient::RockOil,
    Ingredient::Salt,
];

/// An irreversible threshold crossed while drinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PotionThreshold {
    /// Permanent strength and endurance boost.
    Fortified,
    /// Turned to stone.
    Petrified,
}

/// What drinking did to the drinker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkOutcome {
    /// Doses actually drunk (the potion may hold fewer than requested).
    pub doses_drunk: u32,
    /// Active potion level afterwards.
    pub level_after: u32,
    /// Thresholds crossed by this drink, in order.
    pub thresholds: Vec<PotionThreshold>,
    /// Health restored by unicorn milk.
    pub health_restored: u32,
}

/// Brew a potion from the given ingredients.
///
/// # Errors
///
/// Returns [`AgentError::MissingIngredient`] naming the first standard
/// ingredient that is absent.
pub fn brew(
    ingredients: impl IntoIterator<Item = Ingredient>,
    doses: u32,
) -> Result<Potion, AgentError> {
    let ingredients: BTreeSet<Ingredient> = ingredients.into_iter().collect();
    if let Some(missing) = STANDARD_RECIPE
        .iter()
        .find(|ingredient| !ingredients.contains(ingredient))
    {
        return Err(AgentError::MissingIngredient(*missing));
    }
    Ok(Potion { doses, ingredients })
}

/// Brew the standard recipe, as a druid does from memory.
pub fn standard_potion(doses: u32) -> Potion {
    Potion {
        doses,
        ingredients: STANDARD_RECIPE.into_iter().collect(),
    }
}

/// Have `brewer` prepare a cauldron from the standard recipe plus `extra`.
///
/// # Errors
///
/// Returns [`AgentError::Incapable`] if the brewer does not know the
/// recipe, or [`AgentError::Dead`] if the brewer is dead.
pub fn brew_as(
    brewer: &Character,
    extra: impl IntoIterator<Item = Ingredient>,
    doses: u32,
) -> Result<Potion, AgentError> {
    if !brewer.is_alive() {
        return Err(AgentError::Dead(brewer.id));
    }
    if !brewer.can(Capability::BrewPotion) {
        return Err(AgentError::Incapable {
            character: brewer.id,
            action: "brew potion",
        });
    }
    brew(STANDARD_RECIPE.into_iter().chain(extra), doses)
}

/// Drink up to `doses` doses from `potion`.
///
/// # Errors
///
/// Returns [`AgentError::Dead`], [`AgentError::Petrified`] or
/// [`AgentError::EmptyPotion`]. Nothing is consumed on error.
pub fn drink(
    character: &mut Character,
    potion: &mut Potion,
    doses: u32,
) -> Result<DrinkOutcome, AgentError> {
    if !character.is_alive() {
        return Err(AgentError::Dead(character.id));
    }
    if character.petrified {
        return Err(AgentError::Petrified(character.id));
    }
    if potion.is_empty() {
        return Err(AgentError::EmptyPotion);
    }

    let doses_drunk = doses.min(potion.doses);
    potion.doses = potion.doses.saturating_sub(doses_drunk);

    let before = character.potion_doses_total;
    let after = before.saturating_add(doses_drunk);
    character.potion_doses_total = after;
    character.potion_level = character.potion_level.saturating_add(doses_drunk);

    let mut thresholds = Vec::new();
    let mut health_restored = 0;

    if before < FORTIFY_THRESHOLD && after >= FORTIFY_THRESHOLD {
        character.strength = character.strength.saturating_add(FORTIFY_BONUS);
        character.endurance = character.endurance.saturating_add(FORTIFY_BONUS);
        thresholds.push(PotionThreshold::Fortified);
    }

    if before < PETRIFY_THRESHOLD && after >= PETRIFY_THRESHOLD {
        character.health = 0;
        character.strength = 0;
        character.endurance = 0;
        character.potion_level = 0;
        character.petrified = true;
        thresholds.push(PotionThreshold::Petrified);
    } else if potion.ingredients.contains(&Ingredient::UnicornMilk) {
        health_restored = crate::vitals::heal(character, character.max_health);
    }

    Ok(DrinkOutcome {
        doses_drunk,
        level_after: character.potion_level,
        thresholds,
        health_restored,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gallia_types::{CharacterId, CharacterStats, Gender, Role};

    use super::*;

    fn make(role: Role) -> Character {
        Character::new(
            CharacterId(3),
            "Getafix",
            Gender::Male,
            role,
            CharacterStats {
                height_cm: 160,
                age: 70,
                strength: 30,
                endurance: 30,
                health: 80,
                belligerence: 10,
            },
        )
    }

    #[test]
    fn brew_requires_standard_recipe() {
        let err = brew([Ingredient::Mistletoe, Ingredient::Lobster], 5);
        assert_eq!(err, Err(AgentError::MissingIngredient(Ingredient::Strawberries)));
        let potion = brew(STANDARD_RECIPE, 5).unwrap();
        assert_eq!(potion.doses, 5);
    }

    #[test]
    fn only_druids_brew() {
        assert!(brew_as(&make(Role::Druid), [], 3).is_ok());
        assert!(matches!(
            brew_as(&make(Role::Warrior), [], 3),
            Err(AgentError::Incapable { .. })
        ));
    }

    #[test]
    fn drinking_consumes_doses_and_raises_level() {
        let mut c = make(Role::Warrior);
        let mut potion = standard_potion(3);
        let outcome = drink(&mut c, &mut potion, 2).unwrap();
        assert_eq!(outcome.doses_drunk, 2);
        assert_eq!(outcome.level_after, 2);
        assert_eq!(potion.doses, 1);
        // Only one dose left.
        let outcome = drink(&mut c, &mut potion, 5).unwrap();
        assert_eq!(outcome.doses_drunk, 1);
        assert_eq!(drink(&mut c, &mut potion, 1), Err(AgentError::EmptyPotion));
    }

    #[test]
    fn crossing_ten_doses_fortifies_permanently() {
        let mut c = make(Role::Warrior);
        c.potion_doses_total = 9;
        let mut potion = standard_potion(1);
        let outcome = drink(&mut c, &mut potion, 1).unwrap();
        assert_eq!(outcome.thresholds, vec![PotionThreshold::Fortified]);
        assert_eq!(c.strength, 50);
        assert_eq!(c.endurance, 50);
    }

    #[test]
    fn crossing_twenty_doses_petrifies() {
        let mut c = make(Role::Warrior);
        c.potion_doses_total = 19;
        let mut potion = standard_potion(4);
        let outcome = drink(&mut c, &mut potion, 1).unwrap();
        assert_eq!(outcome.thresholds, vec![PotionThreshold::Petrified]);
        assert!(c.petrified);
        assert_eq!(c.health, 0);
        assert_eq!(c.strength, 0);
        assert_eq!(c.endurance, 0);
        // Irreversible: a stone cannot drink again.
        assert!(drink(&mut c, &mut potion, 1).is_err());
        assert_eq!(potion.doses, 3);
    }

    #[test]
    fn unicorn_milk_restores_health() {
        let mut c = make(Role::Warrior);
        c.health = 20;
        let mut potion = brew(
            STANDARD_RECIPE.into_iter().chain([Ingredient::UnicornMilk]),
            1,
        )
        .unwrap();
        let outcome = drink(&mut c, &mut potion, 1).unwrap();
        assert_eq!(outcome.health_restored, 60);
        assert_eq!(c.health, c.max_health);
    }
}
