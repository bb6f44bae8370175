//! Panic-free wrappers over the random draws used across the simulation.
//!
//! `rand` panics on probabilities outside `0.0..=1.0` and on empty ranges.
//! Configuration values come from user YAML, so every draw goes through
//! these helpers, which clamp instead.

use rand::Rng;

/// Bernoulli trial with probability `p`, clamped into `0.0..=1.0`.
///
/// A NaN probability never succeeds.
pub fn roll(rng: &mut impl Rng, p: f64) -> bool {
    if p.is_nan() || p <= 0.0 {
        return false;
    }
    rng.random_bool(p.min(1.0))
}

/// Uniform integer in `lo..=hi`. The bounds are swapped if reversed.
pub fn pick_between(rng: &mut impl Rng, lo: u32, hi: u32) -> u32 {
    let (low, high) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    rng.random_range(low..=high)
}

/// Uniform index into a collection of `len` items, `None` when empty.
pub fn pick_index(rng: &mut impl Rng, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.random_range(0..len))
    }
}
