//! Combat mechanics: the two-party duel and the matchmaking that feeds it.
//!
//! ## Damage
//!
//! Each direction of a duel deals a fixed damage per strike:
//!
//! ```text
//! damage = round(max(1, (strength - endurance) * 5))
//! ```
//!
//! When that degenerates to the floor of 1 (the striker is no stronger
//! than the defender is tough), it is recomputed with a softened formula so
//! that two sturdy characters do not trade single points forever:
//!
//! ```text
//! damage = round(max(1, (strength - endurance / 2) * 1.75))
//! ```
//!
//! Strength is the striker's effective strength (potion included).
//!
//! ## Duel flow
//!
//! 1. Refuse to start if either party is dead (no-op, `None`)
//! 2. Compute both damages once
//! 3. Alternate strictly, attacker first, until one party reaches 0 health
//!
//! ## Matchmaking
//!
//! - [`faction_battle`] pools the living combatants of two factions and
//!   pairs them until one pool is empty.
//! - [`skirmish`] runs pairwise sequential encounters for mixed creature /
//!   faction fights, where pooling by faction makes no sense.

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use gallia_types::{Character, CombatResult, CombatSide, DuelTurn, Faction};

use crate::chance;

/// Multiplier of the primary damage formula.
const PRIMARY_FACTOR: f64 = 5.0;

/// Multiplier of the softened damage formula.
const SOFTENED_FACTOR: f64 = 1.75;

/// Smallest damage a strike can deal.
pub const MIN_DAMAGE: u32 = 1;

/// How opponents are drawn from the two pools of a faction battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    /// Draw one fighter uniformly at random from each pool.
    #[default]
    Random,
    /// Always pair the first remaining fighter of each pool.
    Indexed,
}

// ---------------------------------------------------------------------------
// Damage
// ---------------------------------------------------------------------------

/// Round a non-negative damage value to a whole number, never below
/// [`MIN_DAMAGE`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_damage(raw: f64) -> u32 {
    let floored = raw.max(f64::from(MIN_DAMAGE));
    // `as` saturates on overflow and the value is at least 1.
    floored.round() as u32
}

/// Primary damage formula: `round(max(1, (strength - endurance) * 5))`.
pub fn primary_damage(strength: u32, endurance: u32) -> u32 {
    round_damage((f64::from(strength) - f64::from(endurance)) * PRIMARY_FACTOR)
}

/// Softened damage formula: `round(max(1, (strength - endurance / 2) * 1.75))`.
pub fn softened_damage(strength: u32, endurance: u32) -> u32 {
    round_damage((f64::from(strength) - f64::from(endurance) / 2.0) * SOFTENED_FACTOR)
}

/// Damage dealt per strike by a striker of `strength` against a target of
/// `endurance`, falling back to the softened formula when the primary one
/// degenerates to the floor.
pub fn strike_damage(strength: u32, endurance: u32) -> u32 {
    let damage = primary_damage(strength, endurance);
    if damage == MIN_DAMAGE {
        softened_damage(strength, endurance)
    } else {
        damage
    }
}

// ---------------------------------------------------------------------------
// Duel
// ---------------------------------------------------------------------------

/// Fight a duel to the death between two characters.
///
/// Returns `None` without touching either party if one of them is already
/// dead. Otherwise strikes alternate, attacker first, until one party's
/// health reaches exactly 0.
pub fn duel(attacker: &mut Character, defender: &mut Character) -> Option<CombatResult> {
    if !attacker.is_alive() || !defender.is_alive() {
        return None;
    }

    let attacker_damage = strike_damage(attacker.effective_strength(), defender.endurance);
    let defender_damage = strike_damage(defender.effective_strength(), attacker.endurance);

    let mut turns = Vec::new();
    let mut dealt_by_attacker: u32 = 0;
    let mut dealt_by_defender: u32 = 0;

    loop {
        let landed = attacker_damage.min(defender.health);
        defender.health = defender.health.saturating_sub(attacker_damage);
        dealt_by_attacker = dealt_by_attacker.saturating_add(landed);
        turns.push(DuelTurn {
            striker: attacker.id,
            damage: attacker_damage,
            target_health: defender.health,
        });
        if defender.health == 0 {
            break;
        }

        let landed = defender_damage.min(attacker.health);
        attacker.health = attacker.health.saturating_sub(defender_damage);
        dealt_by_defender = dealt_by_defender.saturating_add(landed);
        turns.push(DuelTurn {
            striker: defender.id,
            damage: defender_damage,
            target_health: attacker.health,
        });
        if attacker.health == 0 {
            break;
        }
    }

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        turns = turns.len(),
        attacker_health = attacker.health,
        defender_health = defender.health,
        "Duel resolved"
    );

    Some(CombatResult {
        attacker: side(attacker, dealt_by_attacker),
        defender: side(defender, dealt_by_defender),
        turns,
    })
}

fn side(character: &Character, damage_dealt: u32) -> CombatSide {
    CombatSide {
        id: character.id,
        name: character.name.clone(),
        faction: character.faction,
        damage_dealt,
        health_after: character.health,
        died: !character.is_alive(),
    }
}

// ---------------------------------------------------------------------------
// Matchmaking
// ---------------------------------------------------------------------------

/// Borrow two distinct elements of a slice mutably.
///
/// Returns `None` if the indices are equal or out of bounds.
pub fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> Option<(&mut T, &mut T)> {
    if first == second {
        return None;
    }
    if first < second {
        let (left, right) = items.split_at_mut_checked(second)?;
        Some((left.get_mut(first)?, right.first_mut()?))
    } else {
        let (left, right) = items.split_at_mut_checked(first)?;
        let second_ref = left.get_mut(second)?;
        Some((right.first_mut()?, second_ref))
    }
}

/// Indices of the living combatants of `faction`, in roster order.
fn pool_of(fighters: &[Character], faction: Faction) -> Vec<usize> {
    fighters
        .iter()
        .enumerate()
        .filter(|(_, c)| c.faction == faction && c.is_combatant())
        .map(|(index, _)| index)
        .collect()
}

fn draw(pool: &[usize], strategy: PairingStrategy, rng: &mut impl Rng) -> Option<usize> {
    match strategy {
        PairingStrategy::Indexed => (!pool.is_empty()).then_some(0),
        PairingStrategy::Random => chance::pick_index(rng, pool.len()),
    }
}

/// Fight a pooled battle between two factions.
///
/// Living, belligerent, fight-capable members of `side_a` and `side_b` form
/// two pools. One fighter is drawn from each pool per duel (the `side_a`
/// fighter strikes first), the dead are dropped from their pool, and the
/// battle continues until a pool is empty.
pub fn faction_battle(
    fighters: &mut [Character],
    side_a: Faction,
    side_b: Faction,
    strategy: PairingStrategy,
    rng: &mut impl Rng,
) -> Vec<CombatResult> {
    let mut results = Vec::new();
    if side_a == side_b {
        return results;
    }

    let mut pool_a = pool_of(fighters, side_a);
    let mut pool_b = pool_of(fighters, side_b);

    while let (Some(slot_a), Some(slot_b)) = (
        draw(&pool_a, strategy, rng),
        draw(&pool_b, strategy, rng),
    ) {
        let (Some(&index_a), Some(&index_b)) = (pool_a.get(slot_a), pool_b.get(slot_b)) else {
            break;
        };

        let outcome = pair_mut(fighters, index_a, index_b).and_then(|(a, b)| duel(a, b));
        let Some(result) = outcome else {
            // Neither can fight the other; drop both so the loop progresses.
            pool_a.remove(slot_a);
            pool_b.remove(slot_b);
            continue;
        };

        if result.attacker.died {
            pool_a.remove(slot_a);
        }
        if result.defender.died {
            pool_b.remove(slot_b);
        }
        results.push(result);
    }

    results
}

/// Whether two characters fight each other in a skirmish: members of
/// different factions, or two creatures.
pub fn opposes(a: &Character, b: &Character) -> bool {
    a.faction != b.faction || (a.is_creature() && b.is_creature())
}

/// Pairwise sequential encounters.
///
/// Walks the living combatants in roster order. The first one still
/// waiting duels the next waiting combatant it opposes; both then leave
/// the queue. A combatant with no opponent left sits the skirmish out.
/// Everybody fights at most once.
pub fn skirmish(fighters: &mut [Character]) -> Vec<CombatResult> {
    let mut queue: Vec<usize> = fighters
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_combatant())
        .map(|(index, _)| index)
        .collect();
    let mut results = Vec::new();

    while let Some((&first, rest)) = queue.split_first() {
        let opponent = rest.iter().position(|&candidate| {
            match (fighters.get(first), fighters.get(candidate)) {
                (Some(a), Some(b)) => opposes(a, b),
                _ => false,
            }
        });

        let Some(offset) = opponent else {
            queue.remove(0);
            continue;
        };
        let slot = offset.saturating_add(1);
        let Some(&second) = queue.get(slot) else {
            queue.remove(0);
            continue;
        };

        if let Some(result) = pair_mut(fighters, first, second).and_then(|(a, b)| duel(a, b)) {
            results.push(result);
        }
        queue.remove(slot);
        queue.remove(0);
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gallia_types::{CharacterId, CharacterStats, Gender, Role};

    use super::*;

    fn fighter(id: u64, role: Role, strength: u32, endurance: u32, health: u32) -> Character {
        Character::new(
            CharacterId(id),
            format!("fighter-{id}"),
            Gender::Male,
            role,
            CharacterStats {
                height_cm: 170,
                age: 30,
                strength,
                endurance,
                health,
                belligerence: 50,
            },
        )
    }

    // -----------------------------------------------------------------------
    // Damage formulas
    // -----------------------------------------------------------------------

    #[test]
    fn primary_damage_example() {
        assert_eq!(primary_damage(85, 50), 175);
        assert_eq!(strike_damage(85, 50), 175);
    }

    #[test]
    fn weak_striker_falls_back_to_softened_formula() {
        // (40 - 50) * 5 < 1 -> floor -> softened: (40 - 25) * 1.75 = 26.25 -> 26
        assert_eq!(primary_damage(40, 50), MIN_DAMAGE);
        assert_eq!(strike_damage(40, 50), 26);
    }

    #[test]
    fn softened_formula_still_floors_at_one() {
        // (10 - 50) * 1.75 < 1
        assert_eq!(strike_damage(10, 100), MIN_DAMAGE);
    }

    #[test]
    fn softened_rounding() {
        // (21 - 20) * 5 = 5: primary applies.
        assert_eq!(strike_damage(21, 20), 5);
        // (20 - 10) * 1.75 = 17.5 -> 18
        assert_eq!(softened_damage(20, 20), 18);
    }

    // -----------------------------------------------------------------------
    // Duel
    // -----------------------------------------------------------------------

    #[test]
    fn duel_kills_exactly_one_and_clamps_to_zero() {
        let mut a = fighter(1, Role::Warrior, 85, 40, 100);
        let mut b = fighter(2, Role::Legionary, 40, 50, 100);
        let result = duel(&mut a, &mut b).unwrap();
        // Attacker deals 175 on the first strike.
        assert_eq!(result.turns.len(), 1);
        assert_eq!(b.health, 0);
        assert!(result.defender.died);
        assert!(!result.attacker.died);
        assert_eq!(result.attacker.damage_dealt, 100);
        assert_eq!(result.winner(), Some(a.id));
    }

    #[test]
    fn duel_alternates_strictly() {
        let mut a = fighter(1, Role::Warrior, 30, 30, 100);
        let mut b = fighter(2, Role::Legionary, 30, 30, 100);
        // Both deal (30 - 15) * 1.75 = 26.25 -> 26 per strike.
        let result = duel(&mut a, &mut b).unwrap();
        for (index, turn) in result.turns.iter().enumerate() {
            let expected = if index % 2 == 0 { a.id } else { b.id };
            assert_eq!(turn.striker, expected);
            assert_eq!(turn.damage, 26);
        }
        // Attacker strikes first and wins the mirror match.
        assert!(result.defender.died);
        assert_eq!(a.health, 22);
    }

    #[test]
    fn duel_with_dead_party_is_a_no_op() {
        let mut a = fighter(1, Role::Warrior, 50, 50, 100);
        let mut b = fighter(2, Role::Legionary, 50, 50, 0);
        assert!(duel(&mut a, &mut b).is_none());
        assert_eq!(a.health, 100);

        let mut c = fighter(3, Role::Warrior, 50, 50, 0);
        let mut d = fighter(4, Role::Legionary, 50, 50, 0);
        assert!(duel(&mut c, &mut d).is_none());
        assert_eq!(c.health, 0);
        assert_eq!(d.health, 0);
    }

    #[test]
    fn potion_counts_in_duel_strength() {
        let mut a = fighter(1, Role::Warrior, 40, 40, 100);
        a.potion_level = 2;
        let mut b = fighter(2, Role::Legionary, 40, 40, 100);
        let result = duel(&mut a, &mut b).unwrap();
        // (60 - 40) * 5 = 100 in one strike.
        assert_eq!(result.turns.first().map(|t| t.damage), Some(100));
        assert!(result.defender.died);
    }

    // -----------------------------------------------------------------------
    // Matchmaking
    // -----------------------------------------------------------------------

    #[test]
    fn pair_mut_rejects_same_and_out_of_bounds() {
        let mut items = vec![1, 2, 3];
        assert!(pair_mut(&mut items, 1, 1).is_none());
        assert!(pair_mut(&mut items, 0, 3).is_none());
        let (a, b) = pair_mut(&mut items, 2, 0).unwrap();
        assert_eq!((*a, *b), (3, 1));
    }

    #[test]
    fn faction_battle_drains_one_side() {
        let mut fighters = vec![
            fighter(1, Role::Warrior, 90, 60, 100),
            fighter(2, Role::Legionary, 40, 30, 60),
            fighter(3, Role::Legionary, 40, 30, 60),
            fighter(4, Role::Warrior, 90, 60, 100),
        ];
        let mut rng = SmallRng::seed_from_u64(42);
        let results = faction_battle(
            &mut fighters,
            Faction::Gaulish,
            Faction::Roman,
            PairingStrategy::Random,
            &mut rng,
        );
        assert_eq!(results.len(), 2);
        let romans_alive = fighters
            .iter()
            .filter(|c| c.faction == Faction::Roman && c.is_alive())
            .count();
        assert_eq!(romans_alive, 0);
    }

    #[test]
    fn indexed_pairing_fights_heads_of_pools() {
        let mut fighters = vec![
            fighter(1, Role::Warrior, 90, 60, 100),
            fighter(2, Role::Warrior, 90, 60, 100),
            fighter(3, Role::Legionary, 40, 30, 60),
        ];
        let mut rng = SmallRng::seed_from_u64(0);
        let results = faction_battle(
            &mut fighters,
            Faction::Gaulish,
            Faction::Roman,
            PairingStrategy::Indexed,
            &mut rng,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].attacker.id, CharacterId(1));
        assert_eq!(fighters[1].health, 100);
    }

    #[test]
    fn non_belligerents_stay_out_of_pools() {
        let mut peaceful = fighter(1, Role::Warrior, 90, 60, 100);
        peaceful.belligerence = 0;
        let mut fighters = vec![peaceful, fighter(2, Role::Legionary, 40, 30, 60)];
        let mut rng = SmallRng::seed_from_u64(0);
        let results = faction_battle(
            &mut fighters,
            Faction::Gaulish,
            Faction::Roman,
            PairingStrategy::Random,
            &mut rng,
        );
        assert!(results.is_empty());
        assert!(fighters.iter().all(Character::is_alive));
    }

    #[test]
    fn skirmish_pairs_opponents_in_order() {
        let mut fighters = vec![
            fighter(1, Role::Lycanthrope, 60, 40, 80),
            fighter(2, Role::Lycanthrope, 50, 40, 80),
            fighter(3, Role::Warrior, 50, 40, 80),
            fighter(4, Role::Warrior, 50, 40, 80),
        ];
        let results = skirmish(&mut fighters);
        // Creature vs creature, then the two Gauls have nobody to oppose.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].attacker.id, CharacterId(1));
        assert_eq!(results[0].defender.id, CharacterId(2));
        assert_eq!(fighters[2].health, 80);
    }

    #[test]
    fn skirmish_mixes_creatures_and_clans() {
        let mut fighters = vec![
            fighter(1, Role::Warrior, 60, 40, 80),
            fighter(2, Role::Warrior, 60, 40, 80),
            fighter(3, Role::Centaur, 50, 40, 80),
            fighter(4, Role::Legionary, 50, 40, 80),
        ];
        let results = skirmish(&mut fighters);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].defender.id, CharacterId(3));
        assert_eq!(results[1].attacker.id, CharacterId(2));
        assert_eq!(results[1].defender.id, CharacterId(4));
    }
}
