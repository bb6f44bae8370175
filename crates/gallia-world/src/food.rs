//! Food lifecycle across the map: random spawning and freshness decay.
//!
//! Spawning rolls one independent trial per place that stocks food
//! (every kind but battlefields) and adds a random kind, fresh. Decay moves
//! every item in every place one step down the freshness ladder.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use gallia_agents::chance;
use gallia_types::{Food, FoodKind, PlaceId};

use crate::place_map::PlaceMap;

/// Default chance that a place receives a new food item each round.
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.45;

/// Something that happened to a place's food stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FoodEvent {
    /// A fresh item appeared.
    Spawned {
        /// Where.
        place: PlaceId,
        /// What.
        kind: FoodKind,
    },
    /// The stock aged one step.
    Degraded {
        /// Where.
        place: PlaceId,
        /// Items in stock.
        items: usize,
        /// Items rotten after this step.
        rotten: usize,
    },
}

/// Roll for a new fresh item in every place that stocks food.
pub fn spawn_food(map: &mut PlaceMap, probability: f64, rng: &mut impl Rng) -> Vec<FoodEvent> {
    let mut events = Vec::new();
    for place in map.places_mut() {
        if !place.kind.stocks_food() || !chance::roll(rng, probability) {
            continue;
        }
        let Some(kind) = chance::pick_index(rng, FoodKind::ALL.len())
            .and_then(|i| FoodKind::ALL.get(i))
            .copied()
        else {
            continue;
        };
        place.add_food(Food::fresh(kind));
        debug!(place = %place.name, food = ?kind, "Food spawned");
        events.push(FoodEvent::Spawned {
            place: place.id,
            kind,
        });
    }
    events
}

/// Age every item in every place by one freshness step.
///
/// Places with an empty stock produce no event.
pub fn degrade_food(map: &mut PlaceMap) -> Vec<FoodEvent> {
    map.places_mut()
        .filter(|place| !place.foods().is_empty())
        .map(|place| {
            let rotten = place.degrade_foods();
            FoodEvent::Degraded {
                place: place.id,
                items: place.foods().len(),
                rotten,
            }
        })
        .collect()
}
