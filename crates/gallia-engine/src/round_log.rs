//! Round observer that logs every round summary.
//!
//! The full summary goes to the log at debug level as JSON; the headline
//! figures go at info level.

use gallia_core::round::{RoundSummary, Simulation};
use gallia_core::runner::{RoundObserver, RunControl};
use tracing::{debug, info, warn};

/// Observer logging each round. Never stops the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundLog;

impl RoundLog {
    /// Create a new round logger.
    pub const fn new() -> Self {
        Self
    }
}

impl RoundObserver for RoundLog {
    fn on_round(&mut self, summary: &RoundSummary, sim: &Simulation) -> RunControl {
        let season = summary.season.as_ref();
        info!(
            round = summary.round,
            deployed = summary.deployed.len(),
            duels = summary.battles.duels.len(),
            casualties = summary.casualties().count(),
            stranded = summary.returns.stranded.len(),
            alive = summary.characters_alive,
            fighters = summary.fighters_alive,
            litters = season.map_or(0, |s| s.litters.len()),
            contests = season.map_or(0, |s| s.contests.len()),
            wolves = sim.colony.as_ref().map_or(0, gallia_pack::Colony::wolves),
            "Round summary"
        );
        for casualty in summary.casualties() {
            info!(
                round = summary.round,
                character = %casualty.name,
                faction = ?casualty.faction,
                cause = ?casualty.cause,
                "Casualty"
            );
        }
        match serde_json::to_string(summary) {
            Ok(json) => debug!(round = summary.round, summary = %json, "Round detail"),
            Err(e) => warn!(round = summary.round, error = %e, "Failed to encode round detail"),
        }
        RunControl::Continue
    }
}
