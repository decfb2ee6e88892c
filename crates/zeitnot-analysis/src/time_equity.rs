//! Clock differential → centipawn-equivalent time advantage (tau).
//!
//! The original system only shipped a linear placeholder for this
//! curve, so the production formula here is a documented design choice
//! honoring the contract:
//!
//! - tau is 0 at equal clocks and carries the sign of
//!   `clock_white - clock_black`
//! - magnitude approaches the `beta` ceiling asymptotically and never
//!   reaches it
//! - when the lower of the two clocks sinks below the pressure pivot,
//!   the same differential is worth more
//!
//! Concretely:
//!
//! ```text
//! raw      = alpha * (clock_white - clock_black)
//! pressure = 1 + boost * sigmoid((pivot - min(w, b)) / scale)
//! tau      = beta * tanh(raw * pressure / beta)
//! ```
//!
//! The pressure multiplier sits inside the tanh, so the ceiling holds
//! even under full boost. The multiplier is smooth in the lower clock:
//! it tends to 1 far above the pivot and to `1 + boost` deep below it.

use crate::win_prob::sigmoid;

/// Time equity for White in centipawns.
///
/// `alpha` is the base sensitivity (cp per second of differential),
/// `beta` the asymptotic ceiling (cp), and `pivot`/`scale`/`boost`
/// shape the pressure amplification. The rounded result is kept
/// strictly inside the ceiling.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn tau_white_cp(
    alpha: f32,
    beta: f32,
    pivot: f32,
    scale: f32,
    boost: f32,
    clock_white: f32,
    clock_black: f32,
) -> i32 {
    let raw = alpha * (clock_white - clock_black);
    let pressure = pressure_multiplier(clock_white.min(clock_black), pivot, scale, boost);
    let tau = beta * (raw * pressure / beta).tanh();

    // tanh saturates to exactly 1.0 in f32 for large inputs; keep the
    // rounded value strictly below the ceiling.
    let ceiling = (beta.ceil() as i32 - 1).max(0);
    (tau.round() as i32).clamp(-ceiling, ceiling)
}

/// Amplification factor for the side clocks `lower_clock` seconds from
/// flagging.
///
/// Strictly decreasing in `lower_clock`, so sinking deeper into time
/// pressure always increases the weight of the same differential.
#[must_use]
pub fn pressure_multiplier(lower_clock: f32, pivot: f32, scale: f32, boost: f32) -> f32 {
    if boost <= 0.0 {
        return 1.0;
    }
    let scale = if scale.abs() < f32::EPSILON { 1.0 } else { scale };
    1.0 + boost * sigmoid((pivot - lower_clock) / scale)
}
