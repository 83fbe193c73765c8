//! Single-trial outcome draws.
//!
//! Every round of play reduces to one Bernoulli draw. Keeping the draw in
//! its own function means the betting process never touches the RNG
//! directly, and tests can pin outcomes with a seeded generator.

use rand::Rng;

/// Draws one round outcome. Returns true when the bettor wins.
///
/// A uniform draw in [0, 1) is compared against the win probability, so
/// 1.0 always wins and 0.0 wins only if the draw is exactly zero.
pub fn spin_wins(win_prob: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() <= win_prob
}
