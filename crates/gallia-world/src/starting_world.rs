//! Default starting map: a Gaulish village besieged by the Romans.
//!
//! Six places, one of each kind, with fixed residents and stocks so that a
//! fresh run depends only on the seed:
//!
//! - Armorica (village), chief Vitalstatistix, five Gauls and a cauldron
//! - Compendium (camp), chief Crismus Bonus, five legionaries
//! - Condatum (city), chief Julius Pompilius, a general and a merchant
//! - Lutetia (mixed town), chief Lucius Fastidius, one Gaul and one Roman
//! - Gergovia plain (battlefield)
//! - Sacred grove (enclosure, capacity 4), three creatures

use gallia_agents::potion::standard_potion;
use gallia_types::{
    Character, CharacterStats, ClanLeader, Faction, Food, FoodKind, Gender, IdGenerator, PlaceId,
    PlaceKind, Role,
};

use crate::error::WorldError;
use crate::place::Place;
use crate::place_map::PlaceMap;

/// Doses in the village cauldron at the start.
pub const STARTING_CAULDRON_DOSES: u32 = 10;

/// Capacity of the starting enclosure.
pub const GROVE_CAPACITY: usize = 4;

/// Identifiers of the starting places, so callers can address them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingPlaceIds {
    /// The Gaulish village.
    pub village: PlaceId,
    /// The Roman camp.
    pub camp: PlaceId,
    /// The Roman city.
    pub city: PlaceId,
    /// The mixed town.
    pub town: PlaceId,
    /// The battlefield.
    pub battlefield: PlaceId,
    /// The creature enclosure.
    pub grove: PlaceId,
}

/// Resident blueprint: name, gender, role and stats
/// `(height, age, strength, endurance, health, belligerence)`.
type Blueprint = (&'static str, Gender, Role, [u32; 6]);

const VILLAGERS: &[Blueprint] = &[
    ("Asterix", Gender::Male, Role::Warrior, [115, 35, 55, 45, 100, 80]),
    ("Obelix", Gender::Male, Role::Warrior, [190, 35, 85, 70, 150, 70]),
    ("Getafix", Gender::Male, Role::Druid, [165, 80, 20, 30, 80, 5]),
    ("Fulliautomatix", Gender::Male, Role::Blacksmith, [175, 45, 50, 45, 110, 60]),
    ("Impedimenta", Gender::Female, Role::Innkeeper, [160, 40, 25, 30, 90, 20]),
];

const LEGIONARIES: &[Blueprint] = &[
    ("Caius Bonus", Gender::Male, Role::Legionary, [172, 28, 45, 45, 100, 60]),
    ("Marcus Ubiquitus", Gender::Male, Role::Legionary, [168, 24, 42, 48, 100, 55]),
    ("Tullius Octopus", Gender::Male, Role::Legionary, [175, 30, 48, 40, 100, 65]),
    ("Caius Flebitus", Gender::Male, Role::Legionary, [170, 26, 44, 44, 100, 50]),
    ("Gracchus Armisurplus", Gender::Male, Role::Legionary, [171, 27, 46, 42, 100, 60]),
];

const CITIZENS: &[Blueprint] = &[
    ("Nefarius Purpus", Gender::Male, Role::General, [178, 50, 50, 50, 110, 65]),
    ("Felix Caveus", Gender::Male, Role::Merchant, [165, 45, 20, 25, 85, 10]),
];

const TOWNSFOLK: &[Blueprint] = &[
    ("Unhygienix", Gender::Male, Role::Merchant, [160, 50, 30, 30, 90, 30]),
    ("Sendervictorius", Gender::Male, Role::Prefect, [174, 40, 25, 30, 85, 20]),
];

const CREATURES: &[Blueprint] = &[
    ("Greyfang", Gender::Male, Role::Lycanthrope, [185, 20, 60, 40, 120, 80]),
    ("Chiron", Gender::Male, Role::Centaur, [210, 60, 55, 55, 130, 50]),
    ("Silverhorn", Gender::Female, Role::Unicorn, [160, 100, 30, 60, 150, 5]),
];

fn leader(name: &str, gender: Gender, age: u32, faction: Faction) -> ClanLeader {
    ClanLeader {
        name: String::from(name),
        gender,
        age,
        faction,
    }
}

fn populate(
    place: &mut Place,
    ids: &mut IdGenerator,
    residents: &[Blueprint],
) -> Result<(), WorldError> {
    for &(name, gender, role, stats) in residents {
        let [height_cm, age, strength, endurance, health, belligerence] = stats;
        let character = Character::new(
            ids.next_id(),
            name,
            gender,
            role,
            CharacterStats {
                height_cm,
                age,
                strength,
                endurance,
                health,
                belligerence,
            },
        );
        place.add_character(character).map_err(|rejection| WorldError::Rejected {
            character: rejection.character.id,
            place: place.id,
            reason: rejection.reason,
        })?;
    }
    Ok(())
}

fn stock(place: &mut Place, kinds: &[FoodKind]) {
    for &kind in kinds {
        place.add_food(Food::fresh(kind));
    }
}

/// Build the starting map.
///
/// # Errors
///
/// Returns a [`WorldError`] if a blueprint is refused by its place, which
/// would mean the blueprints contradict the admission policies.
pub fn create_starting_world(
    ids: &mut IdGenerator,
) -> Result<(PlaceMap, StartingPlaceIds), WorldError> {
    let place_ids = StartingPlaceIds {
        village: ids.next_id(),
        camp: ids.next_id(),
        city: ids.next_id(),
        town: ids.next_id(),
        battlefield: ids.next_id(),
        grove: ids.next_id(),
    };

    let mut village = Place::new(place_ids.village, "Armorica", PlaceKind::GaulishVillage, 20_000)
        .with_chief(leader("Vitalstatistix", Gender::Male, 55, Faction::Gaulish));
    populate(&mut village, ids, VILLAGERS)?;
    stock(&mut village, &[FoodKind::Boar, FoodKind::Boar, FoodKind::Fish, FoodKind::Mistletoe]);
    village.set_cauldron(standard_potion(STARTING_CAULDRON_DOSES));

    let mut camp = Place::new(place_ids.camp, "Compendium", PlaceKind::RomanCamp, 15_000)
        .with_chief(leader("Crismus Bonus", Gender::Male, 48, Faction::Roman));
    populate(&mut camp, ids, LEGIONARIES)?;
    stock(&mut camp, &[FoodKind::Wine, FoodKind::Fish, FoodKind::Carrots]);

    let mut city = Place::new(place_ids.city, "Condatum", PlaceKind::RomanCity, 60_000)
        .with_chief(leader("Julius Pompilius", Gender::Male, 52, Faction::Roman));
    populate(&mut city, ids, CITIZENS)?;
    stock(&mut city, &[FoodKind::Wine, FoodKind::Honey]);

    let mut town = Place::new(place_ids.town, "Lutetia", PlaceKind::MixedTown, 80_000)
        .with_chief(leader("Lucius Fastidius", Gender::Male, 45, Faction::Roman));
    populate(&mut town, ids, TOWNSFOLK)?;
    stock(&mut town, &[FoodKind::Mead, FoodKind::Lobster]);

    let battlefield = Place::new(
        place_ids.battlefield,
        "Gergovia plain",
        PlaceKind::Battlefield,
        100_000,
    );

    let mut grove = Place::new(place_ids.grove, "Sacred grove", PlaceKind::Enclosure, 2_500)
        .with_capacity(GROVE_CAPACITY);
    populate(&mut grove, ids, CREATURES)?;
    stock(&mut grove, &[FoodKind::Strawberries]);

    let mut map = PlaceMap::new();
    for place in [village, camp, city, town, battlefield, grove] {
        map.insert(place)?;
    }

    Ok((map, place_ids))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starting_world_has_one_place_of_each_kind() {
        let mut ids = IdGenerator::new();
        let (map, place_ids) = create_starting_world(&mut ids).unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map.ids_of_kind(PlaceKind::Battlefield), vec![place_ids.battlefield]);
        assert_eq!(map.ids_of_kind(PlaceKind::Enclosure), vec![place_ids.grove]);
    }

    #[test]
    fn starting_world_is_populated() {
        let mut ids = IdGenerator::new();
        let (map, place_ids) = create_starting_world(&mut ids).unwrap();
        let residents = VILLAGERS.len()
            + LEGIONARIES.len()
            + CITIZENS.len()
            + TOWNSFOLK.len()
            + CREATURES.len();
        assert_eq!(map.total_characters(), residents);
        let village = map.get(place_ids.village).unwrap();
        assert!(village.chief().is_some());
        assert_eq!(village.cauldron().map(|p| p.doses), Some(STARTING_CAULDRON_DOSES));
        assert!(map.get(place_ids.battlefield).unwrap().chief().is_none());
    }

    #[test]
    fn ids_are_unique_across_places_and_characters() {
        let mut ids = IdGenerator::new();
        let (map, _) = create_starting_world(&mut ids).unwrap();
        let names = map.character_names();
        assert_eq!(names.len(), map.total_characters());
        assert_eq!(usize::try_from(ids.issued()).unwrap(), map.len() + map.total_characters());
    }
}
