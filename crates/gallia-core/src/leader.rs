//! Leader action source trait and built-in implementations.
//!
//! During the leader phase of a round, every clan place with a chief is
//! offered a [`LeaderPrompt`] up to `leader.max_actions` times and answers
//! with a [`LeaderAction`]. The [`LeaderActionSource`] trait abstracts where
//! the answers come from: a human at a console, a script, or a test stub.
//!
//! [`PassingLeader`] always passes; [`ScriptedLeader`] replays a fixed list
//! of actions and passes once it runs out.

use std::collections::VecDeque;

use serde::Serialize;

use gallia_types::{CharacterId, PlaceId, PlaceKind, Role};
use gallia_world::Place;

/// Errors that can occur while asking a leader for a decision.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// Reading the leader's answer failed.
    #[error("failed to read leader input: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An internal error in the decision source.
    #[error("decision source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// The vocabulary of a clan leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaderAction {
    /// Heal every living resident.
    HealTeam,
    /// Feed every hungry resident from the stock.
    FeedTeam,
    /// Look at the place without changing it.
    InspectPlace,
    /// Have a resident druid brew from a mistletoe in stock and serve the
    /// fighters.
    DistributePotion,
    /// Recruit a new resident.
    Recruit(Role),
    /// Send a resident to a battlefield or an enclosure.
    Transfer {
        /// The resident to send.
        character: CharacterId,
        /// Where to send it.
        destination: PlaceId,
    },
    /// End this leader's turn.
    Pass,
}

/// A place a transfer may target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// Place ID.
    pub id: PlaceId,
    /// Place name.
    pub name: String,
    /// Place kind.
    pub kind: PlaceKind,
}

/// What a leader sees before each choice.
#[derive(Debug, Clone)]
pub struct LeaderPrompt<'a> {
    /// The round being played, starting at 1.
    pub round: u32,
    /// The leader's place, in its current state.
    pub place: &'a Place,
    /// Actions already taken this turn.
    pub actions_taken: u32,
    /// Actions left this turn, this one included.
    pub actions_left: u32,
    /// Places a transfer may target.
    pub destinations: &'a [Destination],
}

/// A source of leader decisions.
///
/// The engine calls [`choose`] once per action slot, and stops early as
/// soon as it returns [`LeaderAction::Pass`]. Invalid choices are not
/// errors: they are recorded as rejected and use up their slot.
///
/// [`choose`]: LeaderActionSource::choose
pub trait LeaderActionSource {
    /// Pick the next action for the chief of `prompt.place`.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if no answer can be obtained at all.
    fn choose(&mut self, prompt: &LeaderPrompt<'_>) -> Result<LeaderAction, DecisionError>;
}

/// A leader that always passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassingLeader;

impl PassingLeader {
    /// Create a new passing leader.
    pub const fn new() -> Self {
        Self
    }
}

impl LeaderActionSource for PassingLeader {
    fn choose(&mut self, _prompt: &LeaderPrompt<'_>) -> Result<LeaderAction, DecisionError> {
        Ok(LeaderAction::Pass)
    }
}

/// A leader replaying a fixed script, shared by every place in the order
/// they are prompted. Passes once the script is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLeader {
    script: VecDeque<LeaderAction>,
}

impl ScriptedLeader {
    /// Create a leader that will answer with `script`, in order.
    pub fn new(script: impl IntoIterator<Item = LeaderAction>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Actions not yet played.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LeaderActionSource for ScriptedLeader {
    fn choose(&mut self, _prompt: &LeaderPrompt<'_>) -> Result<LeaderAction, DecisionError> {
        Ok(self.script.pop_front().unwrap_or(LeaderAction::Pass))
    }
}
