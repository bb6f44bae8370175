//! The simulation context: the one random stream and the one id counter.
//!
//! Every random draw and every new id in a run goes through the same
//! [`SimContext`], so a seed fully determines the run.

use rand::SeedableRng;
use rand::rngs::StdRng;

use gallia_types::IdGenerator;

/// Random stream and id counter threaded through a run.
#[derive(Debug, Clone)]
pub struct SimContext {
    /// The seeded random stream.
    pub rng: StdRng,
    /// The id counter shared by characters, places, lycanthropes and packs.
    pub ids: IdGenerator,
    seed: u64,
}

impl SimContext {
    /// A fresh context seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_ids(seed, IdGenerator::new())
    }

    /// A context continuing an existing id counter, typically the one used
    /// to build the starting world.
    pub fn with_ids(seed: u64, ids: IdGenerator) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ids,
            seed,
        }
    }

    /// The seed the stream started from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}
