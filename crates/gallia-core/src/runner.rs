//! Simulation loop runner.
//!
//! [`run_simulation`] drives the round cycle for a bounded number of
//! rounds. It stops early when no clan member is left alive or when the
//! observer asks it to, and only ever between two rounds.

use serde::Serialize;
use tracing::info;

use crate::leader::LeaderActionSource;
use crate::report::{self, Outcome};
use crate::round::{RoundError, RoundSummary, Simulation};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A round failed.
    #[error("round error: {source}")]
    Round {
        /// The underlying round error.
        #[from]
        source: RoundError,
    },
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// Every requested round was played.
    RoundsCompleted,
    /// No clan member is left alive.
    Extinction,
    /// The observer asked to stop.
    ObserverStop,
}

/// Whether the runner should go on after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunControl {
    /// Play the next round.
    Continue,
    /// Stop now.
    Stop,
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: EndReason,
    /// The last round summary, if any round was played.
    pub final_summary: Option<RoundSummary>,
    /// Rounds played by this call.
    pub rounds_played: u32,
    /// The final outcome.
    pub outcome: Outcome,
}

/// Callback invoked after each round.
///
/// Implementations can render the round, collect statistics, or stop the
/// run by returning [`RunControl::Stop`].
pub trait RoundObserver {
    /// Called after a round completes successfully.
    fn on_round(&mut self, summary: &RoundSummary, sim: &Simulation) -> RunControl;
}

/// An observer that never interferes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RoundObserver for NoOpObserver {
    fn on_round(&mut self, _summary: &RoundSummary, _sim: &Simulation) -> RunControl {
        RunControl::Continue
    }
}

/// Run up to `round_count` rounds.
///
/// # Errors
///
/// Returns [`RunnerError`] if a round fails unrecoverably.
pub fn run_simulation(
    sim: &mut Simulation,
    round_count: u32,
    leaders: &mut dyn LeaderActionSource,
    observer: &mut dyn RoundObserver,
) -> Result<SimulationResult, RunnerError> {
    let mut final_summary: Option<RoundSummary> = None;
    let mut rounds_played: u32 = 0;
    let mut end_reason = EndReason::RoundsCompleted;

    info!(
        rounds = round_count,
        seed = sim.ctx.seed(),
        characters = sim.total_characters(),
        "Simulation starting"
    );

    while rounds_played < round_count {
        let summary = sim.run_round(leaders)?;
        rounds_played = rounds_played.saturating_add(1);

        let control = observer.on_round(&summary, sim);
        let extinct = summary.clan_alive == 0;
        final_summary = Some(summary);

        if extinct {
            info!(round = sim.round(), "No clan member left");
            end_reason = EndReason::Extinction;
            break;
        }
        if control == RunControl::Stop {
            info!(round = sim.round(), "Observer stop requested");
            end_reason = EndReason::ObserverStop;
            break;
        }
    }

    let outcome = report::outcome(sim);
    info!(
        reason = ?end_reason,
        rounds = rounds_played,
        verdict = ?outcome.verdict,
        "Simulation ended"
    );
    Ok(SimulationResult {
        end_reason,
        final_summary,
        rounds_played,
        outcome,
    })
}
