//! The place arena: every place in Gallia, keyed by id.
//!
//! Characters hold no reference to their place. A character's location is
//! simply the place whose roster owns it, and cross-place operations go
//! through [`PlaceMap`] by [`PlaceId`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use gallia_types::{Character, CharacterId, PlaceId, PlaceKind};

use crate::error::WorldError;
use crate::place::Place;

/// All places, in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceMap {
    places: BTreeMap<PlaceId, Place>,
}

impl PlaceMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            places: BTreeMap::new(),
        }
    }

    /// Add a place.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicatePlace`] if the id is already used.
    pub fn insert(&mut self, place: Place) -> Result<(), WorldError> {
        if self.places.contains_key(&place.id) {
            return Err(WorldError::DuplicatePlace(place.id));
        }
        self.places.insert(place.id, place);
        Ok(())
    }

    /// Look up a place.
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(&id)
    }

    /// Look up a place mutably.
    pub fn get_mut(&mut self, id: PlaceId) -> Option<&mut Place> {
        self.places.get_mut(&id)
    }

    /// Look up a place, failing with [`WorldError::PlaceNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlaceNotFound`] if the id is unknown.
    pub fn require_mut(&mut self, id: PlaceId) -> Result<&mut Place, WorldError> {
        self.places.get_mut(&id).ok_or(WorldError::PlaceNotFound(id))
    }

    /// Remove a place with everything in it.
    pub fn remove(&mut self, id: PlaceId) -> Option<Place> {
        self.places.remove(&id)
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the map has no place.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// All place ids in order.
    pub fn ids(&self) -> Vec<PlaceId> {
        self.places.keys().copied().collect()
    }

    /// Ids of every place of `kind`, in order.
    pub fn ids_of_kind(&self, kind: PlaceKind) -> Vec<PlaceId> {
        self.places
            .values()
            .filter(|place| place.kind == kind)
            .map(|place| place.id)
            .collect()
    }

    /// Iterate over all places.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    /// Iterate over all places mutably.
    pub fn places_mut(&mut self) -> impl Iterator<Item = &mut Place> {
        self.places.values_mut()
    }

    /// Residents across every place, dead ones included until swept.
    pub fn total_characters(&self) -> usize {
        self.places.values().map(Place::number_of_characters).sum()
    }

    /// The place currently holding a character.
    pub fn find_character(&self, id: CharacterId) -> Option<PlaceId> {
        self.places
            .values()
            .find(|place| place.contains(id))
            .map(|place| place.id)
    }

    /// Every character name in use, for picking fresh ones.
    pub fn character_names(&self) -> BTreeSet<String> {
        self.places
            .values()
            .flat_map(|place| place.characters().iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Move a character from one place to another.
    ///
    /// The move is remove-then-add. If the destination refuses, the
    /// character goes back to `from` and the map is unchanged apart from
    /// its position in the source roster.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlaceNotFound`] for an unknown place,
    /// [`WorldError::CharacterNotFound`] if the character is not in `from`,
    /// or [`WorldError::Rejected`] if the destination refuses it.
    pub fn move_character(
        &mut self,
        character: CharacterId,
        from: PlaceId,
        to: PlaceId,
    ) -> Result<(), WorldError> {
        if !self.places.contains_key(&to) {
            return Err(WorldError::PlaceNotFound(to));
        }
        let moving = self
            .require_mut(from)?
            .remove_character(character)
            .ok_or(WorldError::CharacterNotFound {
                character,
                place: from,
            })?;

        let rejection = match self.require_mut(to)?.add_character(moving) {
            Ok(()) => {
                debug!(character = %character, from = %from, to = %to, "Character moved");
                return Ok(());
            }
            Err(rejection) => rejection,
        };

        self.require_mut(from)?.restore_character(*rejection.character);
        Err(WorldError::Rejected {
            character,
            place: to,
            reason: rejection.reason,
        })
    }

    /// Move every living resident of `from` matching `predicate` to `to`,
    /// stamping each with `from` as its origin.
    ///
    /// Characters `to` refuses stay in `from`. Returns the ids that moved,
    /// in roster order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlaceNotFound`] for an unknown place.
    pub fn deploy(
        &mut self,
        from: PlaceId,
        to: PlaceId,
        predicate: impl FnMut(&Character) -> bool,
    ) -> Result<Vec<CharacterId>, WorldError> {
        if !self.places.contains_key(&to) {
            return Err(WorldError::PlaceNotFound(to));
        }
        let leaving = self.require_mut(from)?.drain_where(predicate);

        let mut moved = Vec::new();
        let mut refused = Vec::new();
        let destination = self.require_mut(to)?;
        for mut character in leaving {
            character.origin = Some(from);
            let id = character.id;
            match destination.add_character(character) {
                Ok(()) => moved.push(id),
                Err(rejection) => {
                    debug!(character = %id, reason = %rejection.reason, "Deployment refused");
                    let mut back = *rejection.character;
                    back.origin = None;
                    refused.push(back);
                }
            }
        }

        let source = self.require_mut(from)?;
        for character in refused {
            source.restore_character(character);
        }
        Ok(moved)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gallia_types::{Character, CharacterStats, Gender, Role};

    use super::*;
    use crate::place::RejectionReason;

    fn make(id: u64, role: Role) -> Character {
        Character::new(
            CharacterId(id),
            format!("c{id}"),
            Gender::Female,
            role,
            CharacterStats {
                height_cm: 170,
                age: 30,
                strength: 40,
                endurance: 40,
                health: 100,
                belligerence: 50,
            },
        )
    }

    fn map() -> PlaceMap {
        let mut map = PlaceMap::new();
        let mut village = Place::new(PlaceId(1), "Armorica", PlaceKind::GaulishVillage, 1);
        village.add_character(make(1, Role::Warrior)).unwrap();
        map.insert(village).unwrap();
        map.insert(Place::new(PlaceId(2), "Camp", PlaceKind::RomanCamp, 1))
            .unwrap();
        map.insert(Place::new(PlaceId(3), "Plain", PlaceKind::Battlefield, 1))
            .unwrap();
        map
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let mut map = map();
        let err = map.insert(Place::new(PlaceId(1), "Again", PlaceKind::MixedTown, 1));
        assert_eq!(err, Err(WorldError::DuplicatePlace(PlaceId(1))));
    }

    #[test]
    fn move_to_battlefield_succeeds() {
        let mut map = map();
        map.move_character(CharacterId(1), PlaceId(1), PlaceId(3))
            .unwrap();
        assert_eq!(map.find_character(CharacterId(1)), Some(PlaceId(3)));
        assert_eq!(map.total_characters(), 1);
    }

    #[test]
    fn refused_move_rolls_back() {
        let mut map = map();
        let err = map
            .move_character(CharacterId(1), PlaceId(1), PlaceId(2))
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::Rejected {
                character: CharacterId(1),
                place: PlaceId(2),
                reason: RejectionReason::NotAdmitted,
            }
        );
        assert_eq!(map.find_character(CharacterId(1)), Some(PlaceId(1)));
    }

    #[test]
    fn unknown_places_and_characters() {
        let mut map = map();
        assert_eq!(
            map.move_character(CharacterId(1), PlaceId(1), PlaceId(9)),
            Err(WorldError::PlaceNotFound(PlaceId(9)))
        );
        assert!(matches!(
            map.move_character(CharacterId(7), PlaceId(1), PlaceId(3)),
            Err(WorldError::CharacterNotFound { .. })
        ));
    }

    #[test]
    fn deploy_stamps_origin() {
        let mut map = map();
        let mut idle = make(2, Role::Druid);
        idle.belligerence = 0;
        map.get_mut(PlaceId(1)).unwrap().add_character(idle).unwrap();

        let moved = map
            .deploy(PlaceId(1), PlaceId(3), |c| c.belligerence > 0)
            .unwrap();
        assert_eq!(moved, vec![CharacterId(1)]);
        let field = map.get(PlaceId(3)).unwrap();
        assert_eq!(field.character(CharacterId(1)).unwrap().origin, Some(PlaceId(1)));
        assert_eq!(map.find_character(CharacterId(2)), Some(PlaceId(1)));
    }

    #[test]
    fn ids_of_kind_filters() {
        let map = map();
        assert_eq!(map.ids_of_kind(PlaceKind::Battlefield), vec![PlaceId(3)]);
        assert!(map.ids_of_kind(PlaceKind::Enclosure).is_empty());
    }
}
