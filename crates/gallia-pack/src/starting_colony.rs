//! Default colony: two rival packs and a lone wolf in the forest around
//! the village.

use tracing::info;

use gallia_types::{AgeCategory, IdGenerator, LycanId, PackId, Sex};

use crate::colony::Colony;
use crate::error::PackError;

/// Wolf blueprint: name, sex, age, strength and impetuosity.
type Blueprint = (&'static str, Sex, AgeCategory, u32, f64);

/// A pack blueprint: name, alpha couple, then the rest of the roster.
struct PackBlueprint {
    name: &'static str,
    male: Blueprint,
    female: Blueprint,
    members: &'static [Blueprint],
}

const PACKS: [PackBlueprint; 2] = [
    PackBlueprint {
        name: "Moonhowl",
        male: ("Fenris", Sex::Male, AgeCategory::Adult, 70, 0.4),
        female: ("Lupa", Sex::Female, AgeCategory::Adult, 60, 0.3),
        members: &[
            ("Greyfang", Sex::Male, AgeCategory::Young, 45, 0.8),
            ("Ashpelt", Sex::Female, AgeCategory::Adult, 55, 0.5),
            ("Hollowjaw", Sex::Male, AgeCategory::Old, 50, 0.2),
        ],
    },
    PackBlueprint {
        name: "Ironpaw",
        male: ("Garm", Sex::Male, AgeCategory::Adult, 75, 0.5),
        female: ("Skadi", Sex::Female, AgeCategory::Old, 58, 0.2),
        members: &[
            ("Vargr", Sex::Male, AgeCategory::Adult, 62, 0.7),
            ("Hati", Sex::Female, AgeCategory::Young, 40, 0.9),
        ],
    },
];

const LONE_WOLF: Blueprint = ("Skoll", Sex::Male, AgeCategory::Adult, 65, 0.6);

fn spawn(colony: &mut Colony, ids: &mut IdGenerator, blueprint: &Blueprint) -> LycanId {
    let (name, sex, age, strength, impetuosity) = *blueprint;
    colony.spawn(ids, name, sex, age, strength, impetuosity)
}

/// Build the default colony.
///
/// Returns the colony and its pack ids in blueprint order.
///
/// # Errors
///
/// Returns a [`PackError`] only if a blueprint breaks the alpha couple
/// rules.
pub fn create_starting_colony(ids: &mut IdGenerator) -> Result<(Colony, Vec<PackId>), PackError> {
    let mut colony = Colony::new();
    let mut packs = Vec::new();

    for blueprint in &PACKS {
        let male = spawn(&mut colony, ids, &blueprint.male);
        let female = spawn(&mut colony, ids, &blueprint.female);
        let pack = colony.found_pack(ids, blueprint.name, male, female)?;
        for member in blueprint.members {
            let lycan = spawn(&mut colony, ids, member);
            colony.join_pack(lycan, pack)?;
        }
        packs.push(pack);
    }
    spawn(&mut colony, ids, &LONE_WOLF);

    info!(
        packs = packs.len(),
        wolves = colony.wolves(),
        "Starting colony created"
    );
    Ok((colony, packs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gallia_types::Rank;

    use super::*;

    #[test]
    fn two_packs_and_a_loner() {
        let mut ids = IdGenerator::new();
        let (colony, packs) = create_starting_colony(&mut ids).unwrap();
        assert_eq!(packs.len(), 2);
        assert_eq!(colony.wolves(), 10);
        let unpacked = colony.lycans().filter(|l| l.pack.is_none()).count();
        assert_eq!(unpacked, 1);
        for pack in &packs {
            let p = colony.pack(*pack).unwrap();
            assert!(p.couple().is_complete());
            for member in p.members() {
                let rank = colony.lycan(*member).unwrap().rank;
                assert!(rank == Rank::ALPHA || rank == Rank::OMEGA);
            }
        }
    }
}
