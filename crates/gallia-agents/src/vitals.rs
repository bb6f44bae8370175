//! Vital mechanics applied to characters: healing, eating, and the random
//! attrition of each round.
//!
//! - Healing never raises health above `max_health` and never revives.
//! - Eating raises satiety by the food's nutrition at its freshness;
//!   rotten food also costs [`ROTTEN_FOOD_DAMAGE`] health.
//! - Attrition rolls three independent effects per character: satiety
//!   loss (with starvation damage below a threshold), potion wearing off,
//!   and a minor injury.
//!
//! All arithmetic saturates. Health reaching zero is death; nothing here
//! mutates a dead character.

use rand::Rng;
use serde::Serialize;

use gallia_types::{Character, Food, MAX_HUNGER};

use crate::chance;
use crate::config::AttritionConfig;
use crate::error::AgentError;

/// Health lost when eating rotten food.
pub const ROTTEN_FOOD_DAMAGE: u32 = 10;

/// What a meal did to the character who ate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealOutcome {
    /// Satiety actually gained (after clamping to the gauge).
    pub satiety_gained: u32,
    /// Health lost to rotten food.
    pub health_lost: u32,
}

/// One effect of the attrition phase on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttritionEffect {
    /// Satiety dropped.
    HungerLost {
        /// Points of satiety lost.
        amount: u32,
        /// Satiety afterwards.
        hunger_after: u32,
    },
    /// Satiety fell below the starvation threshold and health suffered.
    Starvation {
        /// Health lost.
        damage: u32,
    },
    /// One level of magic potion wore off.
    PotionWoreOff {
        /// Potion level afterwards.
        level_after: u32,
    },
    /// A minor injury unrelated to hunger.
    MinorInjury {
        /// Health lost.
        damage: u32,
    },
    /// The character died of the above.
    Died,
}

/// Heal a living character by up to `amount`, clamped to `max_health`.
///
/// Returns the health actually restored. Dead characters are not healed.
pub fn heal(character: &mut Character, amount: u32) -> u32 {
    if !character.is_alive() {
        return 0;
    }
    let before = character.health;
    character.health = character.health.saturating_add(amount).min(character.max_health);
    character.health.saturating_sub(before)
}

/// Apply damage, flooring health at zero.
///
/// Returns `true` if this damage killed the character.
pub const fn wound(character: &mut Character, damage: u32) -> bool {
    let was_alive = character.health > 0;
    character.health = character.health.saturating_sub(damage);
    was_alive && character.health == 0
}

/// Whether the character would eat this food right now: alive, hungry,
/// and the food is in the faction's diet.
pub fn would_eat(character: &Character, food: &Food) -> bool {
    character.is_alive() && character.is_hungry() && food.kind.is_edible_by(character.faction)
}

/// Feed one food item to a character.
///
/// # Errors
///
/// Returns [`AgentError::Dead`] for a dead character and
/// [`AgentError::NotEdible`] if the faction does not eat this kind.
pub fn eat(character: &mut Character, food: &Food) -> Result<MealOutcome, AgentError> {
    if !character.is_alive() {
        return Err(AgentError::Dead(character.id));
    }
    if !food.kind.is_edible_by(character.faction) {
        return Err(AgentError::NotEdible {
            character: character.id,
            food: food.kind,
        });
    }

    let before = character.hunger;
    character.hunger = character.hunger.saturating_add(food.nutrition()).min(MAX_HUNGER);
    let satiety_gained = character.hunger.saturating_sub(before);

    let health_lost = if food.is_rotten() {
        let before = character.health;
        // A rotten meal never kills outright: it leaves at least 1 health.
        character.health = character.health.saturating_sub(ROTTEN_FOOD_DAMAGE).max(1);
        before.saturating_sub(character.health)
    } else {
        0
    };

    Ok(MealOutcome {
        satiety_gained,
        health_lost,
    })
}

/// Roll one round of attrition for a living character.
///
/// Returns the effects that happened, in order. Dead characters are left
/// untouched and yield no effects.
pub fn apply_attrition(
    character: &mut Character,
    config: &AttritionConfig,
    rng: &mut impl Rng,
) -> Vec<AttritionEffect> {
    let mut effects = Vec::new();
    if !character.is_alive() {
        return effects;
    }

    // 1. Satiety loss, with starvation damage when it falls too low
    if chance::roll(rng, config.hunger_chance) {
        let amount = chance::pick_between(rng, config.hunger_loss_min, config.hunger_loss_max);
        character.hunger = character.hunger.saturating_sub(amount);
        effects.push(AttritionEffect::HungerLost {
            amount,
            hunger_after: character.hunger,
        });

        if character.hunger < config.starvation_threshold {
            let damage = chance::pick_between(
                rng,
                config.starvation_damage_min,
                config.starvation_damage_max,
            );
            let died = wound(character, damage);
            effects.push(AttritionEffect::Starvation { damage });
            if died {
                effects.push(AttritionEffect::Died);
                return effects;
            }
        }
    }

    // 2. Potion wearing off
    if character.potion_level > 0 && chance::roll(rng, config.potion_fade_chance) {
        character.potion_level = character.potion_level.saturating_sub(1);
        effects.push(AttritionEffect::PotionWoreOff {
            level_after: character.potion_level,
        });
    }

    // 3. Minor injury
    if chance::roll(rng, config.injury_chance) {
        let damage = chance::pick_between(rng, config.injury_min, config.injury_max);
        let died = wound(character, damage);
        effects.push(AttritionEffect::MinorInjury { damage });
        if died {
            effects.push(AttritionEffect::Died);
        }
    }

    effects
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gallia_types::{CharacterId, CharacterStats, FoodKind, Gender, Role};

    use super::*;

    fn warrior() -> Character {
        Character::new(
            CharacterId(1),
            "Asterix",
            Gender::Male,
            Role::Warrior,
            CharacterStats {
                height_cm: 120,
                age: 35,
                strength: 40,
                endurance: 40,
                health: 100,
                belligerence: 80,
            },
        )
    }

    #[test]
    fn heal_is_clamped_to_max_health() {
        let mut c = warrior();
        c.health = 90;
        assert_eq!(heal(&mut c, 50), 10);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn heal_does_not_revive() {
        let mut c = warrior();
        c.health = 0;
        assert_eq!(heal(&mut c, 50), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn wound_floors_at_zero_and_reports_death_once() {
        let mut c = warrior();
        assert!(wound(&mut c, 500));
        assert_eq!(c.health, 0);
        assert!(!wound(&mut c, 5));
    }

    #[test]
    fn eating_fresh_food_restores_satiety() {
        let mut c = warrior();
        c.hunger = 50;
        let outcome = eat(&mut c, &Food::fresh(FoodKind::Boar)).unwrap();
        assert_eq!(outcome.satiety_gained, 30);
        assert_eq!(outcome.health_lost, 0);
        assert_eq!(c.hunger, 80);
    }

    #[test]
    fn eating_is_clamped_to_full() {
        let mut c = warrior();
        c.hunger = 95;
        let outcome = eat(&mut c, &Food::fresh(FoodKind::Boar)).unwrap();
        assert_eq!(outcome.satiety_gained, 5);
        assert_eq!(c.hunger, MAX_HUNGER);
    }

    #[test]
    fn rotten_food_costs_health() {
        let mut c = warrior();
        c.hunger = 10;
        let mut fish = Food::fresh(FoodKind::Fish);
        fish.degrade();
        fish.degrade();
        let outcome = eat(&mut c, &fish).unwrap();
        assert_eq!(outcome.health_lost, ROTTEN_FOOD_DAMAGE);
        assert_eq!(c.health, 90);
    }

    #[test]
    fn gauls_refuse_wine() {
        let mut c = warrior();
        c.hunger = 10;
        let err = eat(&mut c, &Food::fresh(FoodKind::Wine));
        assert!(matches!(err, Err(AgentError::NotEdible { .. })));
        assert!(!would_eat(&c, &Food::fresh(FoodKind::Wine)));
        assert!(would_eat(&c, &Food::fresh(FoodKind::Boar)));
    }

    #[test]
    fn inert_attrition_changes_nothing() {
        let mut c = warrior();
        let before = c.clone();
        let mut rng = SmallRng::seed_from_u64(7);
        let effects = apply_attrition(&mut c, &AttritionConfig::inert(), &mut rng);
        assert!(effects.is_empty());
        assert_eq!(c, before);
    }

    #[test]
    fn certain_hunger_loss_below_threshold_starves() {
        let mut c = warrior();
        c.hunger = 10;
        let config = AttritionConfig {
            hunger_chance: 1.0,
            hunger_loss_min: 5,
            hunger_loss_max: 5,
            starvation_threshold: 20,
            starvation_damage_min: 7,
            starvation_damage_max: 7,
            ..AttritionConfig::inert()
        };
        let mut rng = SmallRng::seed_from_u64(11);
        let effects = apply_attrition(&mut c, &config, &mut rng);
        assert_eq!(
            effects,
            vec![
                AttritionEffect::HungerLost {
                    amount: 5,
                    hunger_after: 5
                },
                AttritionEffect::Starvation { damage: 7 },
            ]
        );
        assert_eq!(c.health, 93);
    }

    #[test]
    fn potion_fades_only_when_active() {
        let config = AttritionConfig {
            potion_fade_chance: 1.0,
            ..AttritionConfig::inert()
        };
        let mut rng = SmallRng::seed_from_u64(5);
        let mut sober = warrior();
        assert!(apply_attrition(&mut sober, &config, &mut rng).is_empty());

        let mut boosted = warrior();
        boosted.potion_level = 2;
        let effects = apply_attrition(&mut boosted, &config, &mut rng);
        assert_eq!(effects, vec![AttritionEffect::PotionWoreOff { level_after: 1 }]);
    }

    #[test]
    fn fatal_injury_reports_death() {
        let mut c = warrior();
        c.health = 3;
        let config = AttritionConfig {
            injury_chance: 1.0,
            injury_min: 5,
            injury_max: 5,
            ..AttritionConfig::inert()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let effects = apply_attrition(&mut c, &config, &mut rng);
        assert_eq!(effects.last(), Some(&AttritionEffect::Died));
        assert_eq!(c.health, 0);
    }
}
