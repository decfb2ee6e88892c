//! Per-ply clock state derivation.
//!
//! Game records annotate each ply with the mover's own clock only, but
//! the time-equity curve needs both sides' remaining time at the moment
//! a move is chosen. [`clock_pairs`] reconstructs that pair per ply by
//! carrying each side's last known reading forward, seeded from the
//! time control's base when the record starts without annotations.
//!
//! Missing readings stay missing: a side whose clock was never
//! annotated yields `None`, and downstream the time equity for such a
//! ply is simply unknown (zero), never an error.

use zeitnot_model::{Color, PlyRecord, TimeControl};

/// Both sides' remaining clocks at the moment one ply was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockPair {
    pub white: Option<f32>,
    pub black: Option<f32>,
}

impl ClockPair {
    /// Both readings, when both are known.
    #[must_use]
    pub fn both(self) -> Option<(f32, f32)> {
        Some((self.white?, self.black?))
    }
}

/// Derives the pre-move clock pair for every ply.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn clock_pairs(plies: &[PlyRecord], time_control: Option<TimeControl>) -> Vec<ClockPair> {
    let base = time_control.map(|tc| tc.base_secs as f32);
    let mut last_white = base;
    let mut last_black = base;

    let mut out = Vec::with_capacity(plies.len());
    for ply in plies {
        let mut white = last_white;
        let mut black = last_black;
        match ply.mover {
            Color::White => {
                if let Some(before) = ply.clock_before_secs {
                    white = Some(before);
                }
            }
            Color::Black => {
                if let Some(before) = ply.clock_before_secs {
                    black = Some(before);
                }
            }
        }
        out.push(ClockPair { white, black });

        // A missing post-move reading still leaves the pre-move one as
        // the freshest known value for later plies.
        match ply.mover {
            Color::White => last_white = ply.clock_after_secs.or(white),
            Color::Black => last_black = ply.clock_after_secs.or(black),
        }
    }
    out
}

/// Fills `think_time_secs` where the producer left it null but both
/// clock readings exist.
///
/// With an increment the mover's clock gains `increment_secs` on
/// completing the move, so the time actually spent is
/// `clock_before + increment - clock_after`, clamped into
/// `[0, clock_before + increment]` to absorb sub-second annotation
/// jitter.
#[expect(clippy::cast_precision_loss)]
pub fn fill_think_times(plies: &mut [PlyRecord], time_control: Option<TimeControl>) {
    let increment = time_control.map_or(0.0, |tc| tc.increment_secs as f32);
    for ply in plies {
        if ply.think_time_secs.is_some() {
            continue;
        }
        if let (Some(before), Some(after)) = (ply.clock_before_secs, ply.clock_after_secs) {
            let budget = before + increment;
            let spent = (budget - after).clamp(0.0, budget);
            ply.think_time_secs = Some(spent);
        }
    }
}
