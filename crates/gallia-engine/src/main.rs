//! Driver binary for the Gallia simulation.
//!
//! Wires the configuration, the starting world, the optional lycanthrope
//! colony and a leader source together, runs the round loop and prints the
//! final outcome as JSON on stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, `RUST_LOG`, default `info`)
//! 2. Load configuration from the first argument, `GALLIA_CONFIG`, or
//!    `gallia-config.yaml`
//! 3. Create the starting world, and the starting colony if enabled
//! 4. Pick the leader source from `GALLIA_LEADER` (`console` or `pass`)
//! 5. Run `world.rounds` rounds
//! 6. Print the outcome

mod console_leader;
mod error;
mod round_log;

use std::io::Write;
use std::path::PathBuf;

use gallia_core::config::SimulationConfig;
use gallia_core::context::SimContext;
use gallia_core::leader::{LeaderActionSource, PassingLeader};
use gallia_core::round::Simulation;
use gallia_core::runner;
use gallia_types::IdGenerator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::console_leader::ConsoleLeader;
use crate::error::EngineError;
use crate::round_log::RoundLog;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "GALLIA_CONFIG";

/// Environment variable choosing the leader source.
const LEADER_ENV: &str = "GALLIA_LEADER";

/// Config file looked up when nothing else is given.
const DEFAULT_CONFIG: &str = "gallia-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("gallia-engine starting");
    run()?;
    info!("gallia-engine shutdown complete");
    Ok(())
}

fn run() -> Result<(), EngineError> {
    // 2. Load configuration.
    let config = load_config()?;
    info!(
        seed = config.world.seed,
        rounds = config.world.rounds,
        mode = ?config.world.mode,
        colony = config.world.colony,
        "Configuration loaded"
    );

    // 3. Create the starting world and colony on one id counter.
    let mut ids = IdGenerator::new();
    let (map, place_ids) = gallia_world::create_starting_world(&mut ids)?;
    info!(
        places = map.len(),
        characters = map.total_characters(),
        battlefield = %place_ids.battlefield,
        "Starting world created"
    );
    let colony = if config.world.colony {
        let (colony, packs) = gallia_pack::create_starting_colony(&mut ids)?;
        info!(wolves = colony.wolves(), packs = packs.len(), "Starting colony created");
        Some(colony)
    } else {
        None
    };

    let rounds = config.world.rounds;
    let ctx = SimContext::with_ids(config.world.seed, ids);
    let mut sim = Simulation::new(map, ctx, config);
    if let Some(colony) = colony {
        sim = sim.with_colony(colony);
    }

    // 4. Pick the leader source.
    let mut leader = leader_source()?;

    // 5. Run.
    let mut observer = RoundLog::new();
    let result = runner::run_simulation(&mut sim, rounds, leader.as_mut(), &mut observer)?;
    info!(
        end_reason = ?result.end_reason,
        rounds = result.rounds_played,
        "Run finished"
    );

    // 6. Report.
    let json = serde_json::to_string_pretty(&result.outcome)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Load the simulation configuration.
///
/// The path comes from the first argument, then `GALLIA_CONFIG`, then
/// `gallia-config.yaml`. Only the default path may be missing, in which
/// case the defaults are used.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let explicit = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from);

    if let Some(path) = explicit {
        info!(path = %path.display(), "Loading configuration");
        return Ok(SimulationConfig::from_file(&path)?);
    }

    let path = PathBuf::from(DEFAULT_CONFIG);
    if path.exists() {
        Ok(SimulationConfig::from_file(&path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides();
        Ok(config)
    }
}

/// Build the leader source named by `GALLIA_LEADER` (default `console`).
fn leader_source() -> Result<Box<dyn LeaderActionSource>, EngineError> {
    let choice = std::env::var(LEADER_ENV).unwrap_or_else(|_| String::from("console"));
    match choice.trim() {
        "console" => Ok(Box::new(ConsoleLeader::new(
            std::io::stdin().lock(),
            std::io::stderr(),
        ))),
        "pass" => Ok(Box::new(PassingLeader::new())),
        other => Err(EngineError::UnknownLeader {
            value: other.to_owned(),
        }),
    }
}
