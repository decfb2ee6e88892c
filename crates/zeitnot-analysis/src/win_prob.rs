//! Centipawn evaluation → win probability.
//!
//! A logistic curve centered at cp = 0 maps White-signed centipawn
//! evaluations into `(0, 1)`. The steepness `k_sigmoid` controls how
//! quickly probability moves away from 0.5: with the default 1.2, a
//! +100 cp edge is roughly a 77% win probability. The mapping is
//! clamped away from 0 and 1 so mate-scale sentinels saturate instead
//! of degenerating to a certainty.

use zeitnot_model::Color;

/// Sentinel magnitude for mate scores, in centipawns.
///
/// Engine lines ending in forced mate carry no meaningful cp value;
/// they are folded to `±MATE_CP` before probability mapping, which then
/// clamps arbitrarily close to the winning bound.
pub const MATE_CP: i32 = 10_000;

/// Probabilities never reach 0 or 1; they are clamped this far inside.
pub const PROBABILITY_MARGIN: f32 = 1e-6;

pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Win probability for White from a White-signed centipawn evaluation.
///
/// Strictly increasing in `cp_white` for fixed `k_sigmoid > 0`, maps
/// 0 to exactly 0.5, and stays inside
/// `[PROBABILITY_MARGIN, 1 - PROBABILITY_MARGIN]`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn probability_from_cp(cp_white: i32, k_sigmoid: f32) -> f32 {
    let x = k_sigmoid * (cp_white as f32 / 100.0);
    sigmoid(x).clamp(PROBABILITY_MARGIN, 1.0 - PROBABILITY_MARGIN)
}

/// Folds a mate distance into the cp sentinel space.
///
/// Positive distances (the side to be mated is the opponent) map to
/// `MATE_CP`, negative ones to `-MATE_CP`.
#[must_use]
pub fn cp_from_mate(mate: i32) -> i32 {
    if mate >= 0 { MATE_CP } else { -MATE_CP }
}

/// Re-expresses a White win probability from the mover's perspective.
#[must_use]
pub fn mover_probability(p_white: f32, mover: Color) -> f32 {
    match mover {
        Color::White => p_white,
        Color::Black => 1.0 - p_white,
    }
}
