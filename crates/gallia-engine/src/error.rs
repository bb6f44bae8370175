//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, the run and the final report.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: gallia_core::config::ConfigError,
    },

    /// Starting world construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: gallia_world::WorldError,
    },

    /// Starting colony construction failed.
    #[error("pack error: {source}")]
    Pack {
        /// The underlying pack error.
        #[from]
        source: gallia_pack::PackError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: gallia_core::runner::RunnerError,
    },

    /// The final report could not be encoded.
    #[error("report encoding error: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing the final report failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// `GALLIA_LEADER` names no known leader source.
    #[error("unknown leader source '{value}' (expected 'console' or 'pass')")]
    UnknownLeader {
        /// The value found in the environment.
        value: String,
    },
}
