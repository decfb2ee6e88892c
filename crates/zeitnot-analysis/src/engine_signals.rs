//! Derived engine-quality signals.
//!
//! Producers of [`EngineSummary`] may emit only the raw multipv lines;
//! the derived mover-perspective fields are then filled here before the
//! numeric pipeline runs. All signals are in centipawns from the
//! mover's point of view: `punish` is how much worse the played move is
//! than the best line, `spread_k` and `gap_12` measure how sharp the
//! position is across the searched lines, and `complexity` is the
//! classifier's volatility input.

use zeitnot_model::{Color, EngineLine, EngineSummary};

use crate::win_prob::cp_from_mate;

/// Re-signs a White-signed centipawn value to the mover's perspective.
#[must_use]
pub fn mover_cp(cp_white: i32, mover: Color) -> i32 {
    match mover {
        Color::White => cp_white,
        Color::Black => -cp_white,
    }
}

/// White-signed cp of one line, with mate folded to its sentinel.
#[must_use]
pub fn resolve_line_cp(line: &EngineLine) -> i32 {
    line.mate.map_or(line.cp_white, cp_from_mate)
}

/// Fills every derived field the producer left null.
///
/// - `best_cp_white`: top line
/// - `played_cp_white`: the line matching `played_uci`, when present
///   among the searched lines (left null otherwise; the metrics
///   composer falls back to the best line and flags the approximation)
/// - `spread_k_cp_mover`: best minus k-th line
/// - `gap_12_cp_mover`: best minus second line
/// - `punish_cp_mover`: best minus played
/// - `complexity_cp_mover`: the spread, the widest sharpness signal
///   available without a dedicated producer
pub fn fill_derived_signals(summary: &mut EngineSummary, mover: Color, played_uci: &str) {
    if summary.best_cp_white.is_none() {
        summary.best_cp_white = summary.lines.first().map(resolve_line_cp);
    }
    if summary.played_cp_white.is_none() {
        summary.played_cp_white = summary
            .lines
            .iter()
            .find(|line| line.uci == played_uci)
            .map(resolve_line_cp);
    }

    if summary.spread_k_cp_mover.is_none() && summary.lines.len() >= 2 {
        let best = resolve_line_cp(&summary.lines[0]);
        let kth = resolve_line_cp(&summary.lines[summary.lines.len() - 1]);
        summary.spread_k_cp_mover = Some(mover_cp(best, mover) - mover_cp(kth, mover));
    }
    if summary.gap_12_cp_mover.is_none() && summary.lines.len() >= 2 {
        let best = resolve_line_cp(&summary.lines[0]);
        let second = resolve_line_cp(&summary.lines[1]);
        summary.gap_12_cp_mover = Some(mover_cp(best, mover) - mover_cp(second, mover));
    }
    if summary.punish_cp_mover.is_none() {
        if let (Some(best), Some(played)) = (summary.best_cp_white, summary.played_cp_white) {
            summary.punish_cp_mover = Some(mover_cp(best, mover) - mover_cp(played, mover));
        }
    }
    if summary.complexity_cp_mover.is_none() {
        summary.complexity_cp_mover = summary.spread_k_cp_mover;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(multipv: u8, uci: &str, cp_white: i32) -> EngineLine {
        EngineLine {
            multipv,
            uci: uci.to_string(),
            cp_white,
            mate: None,
        }
    }

    fn bare_summary(lines: Vec<EngineLine>) -> EngineSummary {
        EngineSummary {
            depth: 14,
            nodes: 1_000_000,
            nps: 500_000,
            lines,
            best_cp_white: None,
            played_cp_white: None,
            punish_cp_mover: None,
            spread_k_cp_mover: None,
            gap_12_cp_mover: None,
            complexity_cp_mover: None,
        }
    }

    #[test]
    fn fills_best_and_played_from_lines() {
        let mut summary = bare_summary(vec![
            line(1, "e2e4", 35),
            line(2, "d2d4", 20),
            line(3, "g1f3", -10),
        ]);
        fill_derived_signals(&mut summary, Color::White, "d2d4");

        assert_eq!(summary.best_cp_white, Some(35));
        assert_eq!(summary.played_cp_white, Some(20));
        assert_eq!(summary.punish_cp_mover, Some(15));
        assert_eq!(summary.spread_k_cp_mover, Some(45));
        assert_eq!(summary.gap_12_cp_mover, Some(15));
        assert_eq!(summary.complexity_cp_mover, Some(45));
    }

    #[test]
    fn played_move_absent_from_lines_stays_null() {
        let mut summary = bare_summary(vec![line(1, "e2e4", 35), line(2, "d2d4", 20)]);
        fill_derived_signals(&mut summary, Color::White, "h2h4");

        assert_eq!(summary.played_cp_white, None);
        assert_eq!(summary.punish_cp_mover, None);
    }

    #[test]
    fn punish_is_mover_perspective_for_black() {
        // White-signed: best line for Black is the most negative.
        let mut summary = bare_summary(vec![line(1, "e7e5", -40), line(2, "c7c5", 10)]);
        fill_derived_signals(&mut summary, Color::Black, "c7c5");

        assert_eq!(summary.punish_cp_mover, Some(50));
        assert_eq!(summary.spread_k_cp_mover, Some(50));
    }

    #[test]
    fn mate_lines_fold_to_the_sentinel() {
        let mut mate_line = line(1, "d8h4", 0);
        mate_line.mate = Some(-2);
        let mut summary = bare_summary(vec![mate_line, line(2, "g7g6", -300)]);
        fill_derived_signals(&mut summary, Color::Black, "d8h4");

        assert_eq!(summary.best_cp_white, Some(-crate::win_prob::MATE_CP));
        assert_eq!(summary.punish_cp_mover, Some(0));
    }

    #[test]
    fn producer_supplied_fields_are_preserved() {
        let mut summary = bare_summary(vec![line(1, "e2e4", 35)]);
        summary.complexity_cp_mover = Some(88);
        fill_derived_signals(&mut summary, Color::White, "e2e4");
        assert_eq!(summary.complexity_cp_mover, Some(88));
    }
}
