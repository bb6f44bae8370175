//! The computed level: a composite score used to settle dominance contests
//! and to pick successors.
//!
//! ```text
//! level = age weight                      (young 1, old 2, adult 3)
//!       + ln(1 + strength)
//!       + (23 - rank) * 0.25              (packed lycanthropes only)
//!       + 2 * tanh(dominance / 10)
//! ```

use gallia_types::Lycanthrope;

/// Weight of each rung above omega.
pub const RANK_WEIGHT: f64 = 0.25;

/// Amplitude of the dominance term.
pub const DOMINANCE_AMPLITUDE: f64 = 2.0;

/// Dominance at which the dominance term reaches `tanh(1)` of its amplitude.
pub const DOMINANCE_SCALE: f64 = 10.0;

/// Compute a lycanthrope's level.
pub fn compute_level(lycan: &Lycanthrope) -> f64 {
    let age = lycan.age.weight();
    let strength = f64::from(lycan.strength).ln_1p();
    let rank = if lycan.is_packed() {
        f64::from(lycan.rank.steps_above_omega()) * RANK_WEIGHT
    } else {
        0.0
    };
    let dominance = DOMINANCE_AMPLITUDE * (f64::from(lycan.dominance) / DOMINANCE_SCALE).tanh();
    age + strength + rank + dominance
}
