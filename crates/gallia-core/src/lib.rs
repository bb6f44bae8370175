//! Round cycle, leader actions, and orchestration for the Gallia
//! simulation.
//!
//! This crate owns the round cycle that drives the simulation: deploy,
//! battle, return, attrition, food, leader actions, the colony's season
//! and the place counters.
//!
//! # Modules
//!
//! - [`actions`] -- Execution of leader actions against the place map.
//! - [`config`] -- Configuration loading from `gallia-config.yaml` into
//!   strongly-typed structs.
//! - [`context`] -- [`SimContext`]: the single random stream and id counter.
//! - [`leader`] -- [`LeaderActionSource`] trait, [`PassingLeader`] and
//!   [`ScriptedLeader`].
//! - [`report`] -- Final per-clan tallies and the winner.
//! - [`round`] -- [`Simulation`] and the phase loop of one round.
//! - [`runner`] -- [`run_simulation`], the bounded round loop.
//!
//! [`SimContext`]: context::SimContext
//! [`LeaderActionSource`]: leader::LeaderActionSource
//! [`PassingLeader`]: leader::PassingLeader
//! [`ScriptedLeader`]: leader::ScriptedLeader
//! [`Simulation`]: round::Simulation
//! [`run_simulation`]: runner::run_simulation

pub mod actions;
pub mod config;
pub mod context;
pub mod leader;
pub mod report;
pub mod round;
pub mod runner;
