//! Execution of clan leader actions against the place map.
//!
//! Each [`LeaderAction`] either takes effect and yields a [`LeaderOutcome`]
//! describing it, or is refused with a [`LeaderRejection`]. A refusal is
//! an outcome, not an error: the round goes on and the slot is used up.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use gallia_agents::{DrinkOutcome, brew_as, drink, recruit};
use gallia_types::{
    Capability, CharacterId, CounterKind, FoodKind, PlaceId, PlaceKind, Potion, Role,
};
use gallia_world::{FeedingEvent, Place, PlaceMap, RejectionReason, WorldError};

use crate::config::LeaderConfig;
use crate::context::SimContext;
use crate::leader::LeaderAction;

/// Why a leader action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaderRejection {
    /// No living resident can brew the potion.
    NoBrewer,
    /// No mistletoe in stock to brew with.
    NoMistletoe,
    /// The character does not live here.
    UnknownCharacter(CharacterId),
    /// No such place.
    UnknownDestination(PlaceId),
    /// Transfers only go to battlefields and enclosures.
    BadDestination(PlaceId),
    /// The receiving place refused the character.
    Refused(RejectionReason),
}

/// What a look around a place shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceInspection {
    /// Place name.
    pub name: String,
    /// Place kind.
    pub kind: PlaceKind,
    /// Residents, dead or alive.
    pub residents: usize,
    /// Living residents.
    pub living: usize,
    /// Hungry living residents.
    pub hungry: usize,
    /// Food items in stock.
    pub foods: usize,
    /// Rotten items among them.
    pub rotten: usize,
    /// What the counter measures, if anything.
    pub counter_kind: Option<CounterKind>,
    /// Counter value.
    pub counter: u32,
    /// Doses left in the cauldron, if there is one.
    pub cauldron_doses: Option<u32>,
}

impl PlaceInspection {
    /// Inspect `place`.
    pub fn of(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            kind: place.kind,
            residents: place.number_of_characters(),
            living: place.living_characters().count(),
            hungry: place.living_characters().filter(|c| c.is_hungry()).count(),
            foods: place.foods().len(),
            rotten: place.foods().iter().filter(|f| f.is_rotten()).count(),
            counter_kind: place.counter_kind(),
            counter: place.counter(),
            cauldron_doses: place.cauldron().map(|p| p.doses),
        }
    }
}

/// The effect of one leader action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LeaderOutcome {
    /// Residents were healed.
    Healed {
        /// Total health restored.
        restored: u32,
    },
    /// Hungry residents were fed.
    Fed {
        /// One event per hungry resident.
        events: Vec<FeedingEvent>,
    },
    /// The place was inspected.
    Inspected(PlaceInspection),
    /// A druid brewed and served the fighters.
    PotionDistributed {
        /// Who brewed.
        brewer: CharacterId,
        /// Who drank, and what it did.
        drinkers: Vec<(CharacterId, DrinkOutcome)>,
        /// Doses left in the cauldron.
        doses_left: u32,
    },
    /// A new resident joined.
    Recruited {
        /// The recruit.
        character: CharacterId,
        /// Its name.
        name: String,
        /// Its role.
        role: Role,
    },
    /// A resident left for a battlefield or an enclosure.
    Transferred {
        /// Who left.
        character: CharacterId,
        /// Where to.
        destination: PlaceId,
    },
    /// The action was refused.
    Rejected {
        /// What was asked.
        action: LeaderAction,
        /// Why it was refused.
        reason: LeaderRejection,
    },
    /// The leader ended the turn.
    Passed,
}

/// Carry out `action` for the chief of `place_id`.
///
/// # Errors
///
/// Returns [`WorldError::PlaceNotFound`] if `place_id` itself is unknown.
/// Everything else the leader gets wrong comes back as
/// [`LeaderOutcome::Rejected`].
pub fn execute(
    map: &mut PlaceMap,
    place_id: PlaceId,
    action: LeaderAction,
    config: &LeaderConfig,
    ctx: &mut SimContext,
) -> Result<LeaderOutcome, WorldError> {
    let outcome = match action {
        LeaderAction::HealTeam => LeaderOutcome::Healed {
            restored: map.require_mut(place_id)?.heal_all(config.heal_amount),
        },
        LeaderAction::FeedTeam => LeaderOutcome::Fed {
            events: map.require_mut(place_id)?.feed_all(),
        },
        LeaderAction::InspectPlace => {
            let place = map.get(place_id).ok_or(WorldError::PlaceNotFound(place_id))?;
            LeaderOutcome::Inspected(PlaceInspection::of(place))
        }
        LeaderAction::DistributePotion => {
            distribute_potion(map.require_mut(place_id)?, config).unwrap_or_else(|reason| {
                LeaderOutcome::Rejected { action, reason }
            })
        }
        LeaderAction::Recruit(role) => recruit_into(map, place_id, role, ctx)?,
        LeaderAction::Transfer {
            character,
            destination,
        } => transfer(map, place_id, character, destination)?,
        LeaderAction::Pass => LeaderOutcome::Passed,
    };

    debug!(place = %place_id, ?action, ?outcome, "Leader action");
    Ok(outcome)
}

/// Brew a fresh batch from one mistletoe, pour it into the cauldron and
/// serve every fighter until the cauldron runs dry.
fn distribute_potion(
    place: &mut Place,
    config: &LeaderConfig,
) -> Result<LeaderOutcome, LeaderRejection> {
    let Some(brewer) = place
        .living_characters()
        .find(|c| c.can(Capability::BrewPotion))
    else {
        return Err(LeaderRejection::NoBrewer);
    };
    if !place.has_food(FoodKind::Mistletoe) {
        return Err(LeaderRejection::NoMistletoe);
    }
    let brewer_id = brewer.id;
    let batch = match brew_as(brewer, [], config.cauldron_doses) {
        Ok(batch) => batch,
        Err(err) => {
            debug!(brewer = %brewer_id, error = %err, "Brewing failed");
            return Err(LeaderRejection::NoBrewer);
        }
    };
    place.remove_food(FoodKind::Mistletoe);

    let mut cauldron = place.take_cauldron().unwrap_or(Potion {
        doses: 0,
        ingredients: BTreeSet::new(),
    });
    cauldron.doses = cauldron.doses.saturating_add(batch.doses);
    cauldron.ingredients.extend(batch.ingredients);

    let mut drinkers = Vec::new();
    for character in place.characters_mut() {
        if cauldron.is_empty() {
            break;
        }
        if !character.is_combatant() {
            continue;
        }
        if let Ok(outcome) = drink(character, &mut cauldron, config.potion_doses) {
            drinkers.push((character.id, outcome));
        }
    }

    let doses_left = cauldron.doses;
    place.set_cauldron(cauldron);
    Ok(LeaderOutcome::PotionDistributed {
        brewer: brewer_id,
        drinkers,
        doses_left,
    })
}

fn recruit_into(
    map: &mut PlaceMap,
    place_id: PlaceId,
    role: Role,
    ctx: &mut SimContext,
) -> Result<LeaderOutcome, WorldError> {
    let taken = map.character_names();
    let character = recruit(&mut ctx.ids, &mut ctx.rng, role, &taken);
    let (id, name) = (character.id, character.name.clone());
    Ok(match map.require_mut(place_id)?.add_character(character) {
        Ok(()) => LeaderOutcome::Recruited {
            character: id,
            name,
            role,
        },
        Err(rejection) => LeaderOutcome::Rejected {
            action: LeaderAction::Recruit(role),
            reason: LeaderRejection::Refused(rejection.reason),
        },
    })
}

fn transfer(
    map: &mut PlaceMap,
    from: PlaceId,
    character: CharacterId,
    destination: PlaceId,
) -> Result<LeaderOutcome, WorldError> {
    let rejected = |reason| -> Result<LeaderOutcome, WorldError> {
        Ok(LeaderOutcome::Rejected {
            action: LeaderAction::Transfer {
                character,
                destination,
            },
            reason,
        })
    };
    let Some(target) = map.get(destination) else {
        return rejected(LeaderRejection::UnknownDestination(destination));
    };
    let admits_transfers = matches!(target.kind, PlaceKind::Battlefield | PlaceKind::Enclosure);
    if !admits_transfers || destination == from {
        return rejected(LeaderRejection::BadDestination(destination));
    }
    match map.move_character(character, from, destination) {
        Ok(()) => Ok(LeaderOutcome::Transferred {
            character,
            destination,
        }),
        Err(WorldError::CharacterNotFound { .. }) => {
            rejected(LeaderRejection::UnknownCharacter(character))
        }
        Err(WorldError::Rejected { reason, .. }) => rejected(LeaderRejection::Refused(reason)),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use gallia_types::{Food, IdGenerator};
    use gallia_world::{StartingPlaceIds, create_starting_world};

    use super::*;

    fn world() -> (PlaceMap, StartingPlaceIds, SimContext) {
        let mut ids = IdGenerator::new();
        let (map, places) = create_starting_world(&mut ids).unwrap();
        (map, places, SimContext::with_ids(3, ids))
    }

    fn find(map: &PlaceMap, place: PlaceId, name: &str) -> CharacterId {
        map.get(place)
            .unwrap()
            .characters()
            .iter()
            .find(|c| c.name == name)
            .unwrap()
            .id
    }

    #[test]
    fn heal_is_clamped_to_max_health() {
        let (mut map, places, mut ctx) = world();
        let asterix = find(&map, places.village, "Asterix");
        map.get_mut(places.village)
            .unwrap()
            .character_mut(asterix)
            .unwrap()
            .health = 1;
        let config = LeaderConfig::default();
        let outcome =
            execute(&mut map, places.village, LeaderAction::HealTeam, &config, &mut ctx).unwrap();
        assert_eq!(outcome, LeaderOutcome::Healed { restored: 20 });
        for c in map.get(places.village).unwrap().characters() {
            assert!(c.health <= c.max_health);
        }
    }

    #[test]
    fn potion_needs_mistletoe_and_serves_fighters() {
        let (mut map, places, mut ctx) = world();
        let config = LeaderConfig::default();
        let before = map.get(places.village).unwrap().cauldron().unwrap().doses;

        let potion = LeaderAction::DistributePotion;
        let outcome = execute(&mut map, places.village, potion, &config, &mut ctx).unwrap();
        let LeaderOutcome::PotionDistributed { drinkers, doses_left, .. } = outcome else {
            panic!("expected a distribution, got {outcome:?}");
        };
        assert!(!drinkers.is_empty());
        let drunk = u32::try_from(drinkers.len()).unwrap();
        assert_eq!(doses_left, before + config.cauldron_doses - drunk);
        assert!(!map.get(places.village).unwrap().has_food(FoodKind::Mistletoe));

        // The only mistletoe is gone.
        let again = execute(&mut map, places.village, potion, &config, &mut ctx).unwrap();
        assert_eq!(
            again,
            LeaderOutcome::Rejected {
                action: LeaderAction::DistributePotion,
                reason: LeaderRejection::NoMistletoe
            }
        );
    }

    #[test]
    fn potion_without_druid_is_refused() {
        let (mut map, places, mut ctx) = world();
        map.get_mut(places.camp).unwrap().add_food(Food::fresh(FoodKind::Mistletoe));
        let outcome = execute(
            &mut map,
            places.camp,
            LeaderAction::DistributePotion,
            &LeaderConfig::default(),
            &mut ctx,
        )
        .unwrap();
        assert_eq!(
            outcome,
            LeaderOutcome::Rejected {
                action: LeaderAction::DistributePotion,
                reason: LeaderRejection::NoBrewer
            }
        );
    }

    #[test]
    fn recruit_respects_admission() {
        let (mut map, places, mut ctx) = world();
        let config = LeaderConfig::default();
        let before = map.get(places.village).unwrap().number_of_characters();
        let ok = execute(
            &mut map,
            places.village,
            LeaderAction::Recruit(Role::Warrior),
            &config,
            &mut ctx,
        )
        .unwrap();
        assert!(matches!(ok, LeaderOutcome::Recruited { role: Role::Warrior, .. }));
        assert_eq!(map.get(places.village).unwrap().number_of_characters(), before + 1);

        let refused = execute(
            &mut map,
            places.village,
            LeaderAction::Recruit(Role::Legionary),
            &config,
            &mut ctx,
        )
        .unwrap();
        assert_eq!(
            refused,
            LeaderOutcome::Rejected {
                action: LeaderAction::Recruit(Role::Legionary),
                reason: LeaderRejection::Refused(RejectionReason::NotAdmitted)
            }
        );
    }

    #[test]
    fn transfer_only_to_battle_or_enclosure() {
        let (mut map, places, mut ctx) = world();
        let config = LeaderConfig::default();
        let obelix = find(&map, places.village, "Obelix");

        let bad = execute(
            &mut map,
            places.village,
            LeaderAction::Transfer {
                character: obelix,
                destination: places.camp,
            },
            &config,
            &mut ctx,
        )
        .unwrap();
        assert!(matches!(
            bad,
            LeaderOutcome::Rejected {
                reason: LeaderRejection::BadDestination(_),
                ..
            }
        ));

        let stranger = LeaderAction::Transfer {
            character: CharacterId(9999),
            destination: places.battlefield,
        };
        let unknown = execute(&mut map, places.village, stranger, &config, &mut ctx).unwrap();
        assert_eq!(
            unknown,
            LeaderOutcome::Rejected {
                action: stranger,
                reason: LeaderRejection::UnknownCharacter(CharacterId(9999)),
            }
        );

        let refused = execute(
            &mut map,
            places.village,
            LeaderAction::Transfer {
                character: obelix,
                destination: places.grove,
            },
            &config,
            &mut ctx,
        )
        .unwrap();
        assert!(matches!(
            refused,
            LeaderOutcome::Rejected {
                reason: LeaderRejection::Refused(RejectionReason::NotAdmitted),
                ..
            }
        ));
        assert!(map.get(places.village).unwrap().contains(obelix));

        let ok = execute(
            &mut map,
            places.village,
            LeaderAction::Transfer {
                character: obelix,
                destination: places.battlefield,
            },
            &config,
            &mut ctx,
        )
        .unwrap();
        assert_eq!(
            ok,
            LeaderOutcome::Transferred {
                character: obelix,
                destination: places.battlefield
            }
        );
        assert!(map.get(places.battlefield).unwrap().contains(obelix));
    }

    #[test]
    fn inspection_reads_the_place() {
        let (mut map, places, mut ctx) = world();
        let outcome = execute(
            &mut map,
            places.village,
            LeaderAction::InspectPlace,
            &LeaderConfig::default(),
            &mut ctx,
        )
        .unwrap();
        let LeaderOutcome::Inspected(report) = outcome else {
            panic!("expected an inspection");
        };
        assert_eq!(report.kind, PlaceKind::GaulishVillage);
        assert_eq!(report.residents, report.living);
        assert_eq!(report.counter_kind, Some(CounterKind::Resistance));
        assert_eq!(report.cauldron_doses, Some(10));
    }
}
