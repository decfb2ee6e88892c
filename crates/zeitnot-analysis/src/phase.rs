//! Phase segmentation.
//!
//! Every ply gets exactly one phase, and phases are contiguous and
//! ordered opening → middlegame → endgame (any of them may be empty).
//! The endgame start is latched first from the material on the board,
//! then the opening window is truncated to end before it, so the
//! ordering holds even in games that simplify very early.

use zeitnot_model::{Phase, PlyRecord};

use crate::config::PhaseConfig;

/// Assigns a phase to every ply, in input order.
#[must_use]
pub fn segment_phases(config: &PhaseConfig, plies: &[PlyRecord]) -> Vec<Phase> {
    let endgame_start = endgame_start_index(config, plies);
    let opening_end = endgame_start.map_or(config.opening_plies, |start| {
        config.opening_plies.min(start.saturating_sub(1))
    });

    plies
        .iter()
        .map(|ply| {
            if endgame_start.is_some_and(|start| ply.ply_index >= start) {
                Phase::Endgame
            } else if ply.ply_index <= opening_end {
                Phase::Opening
            } else {
                Phase::Middlegame
            }
        })
        .collect()
}

/// First ply index belonging to the endgame, if the game reaches one.
///
/// Material-based when any FEN is parseable: the endgame begins at the
/// first ply whose position has both sides' non-pawn material at or
/// below the configured threshold. Promotions can raise material again,
/// but the phase stays latched. Without a single parseable FEN the
/// fallback is a fixed ply cutoff.
fn endgame_start_index(config: &PhaseConfig, plies: &[PlyRecord]) -> Option<u32> {
    let mut any_fen = false;
    for ply in plies {
        if let Some((white, black)) = non_pawn_material_cp(&ply.fen_before) {
            any_fen = true;
            if white <= config.endgame_material_cp && black <= config.endgame_material_cp {
                return Some(ply.ply_index);
            }
        }
    }
    if any_fen {
        None
    } else {
        Some(config.endgame_ply_fallback)
    }
}

/// Non-pawn material per side from a FEN's board field, in centipawns.
///
/// Knights and bishops count 300, rooks 500, queens 900; pawns and
/// kings are ignored. Returns `None` when the board field is missing or
/// malformed.
fn non_pawn_material_cp(fen: &str) -> Option<(i32, i32)> {
    let board = fen.split_whitespace().next()?;
    if !board.contains('/') {
        return None;
    }

    let mut white = 0;
    let mut black = 0;
    for c in board.chars() {
        let value = match c.to_ascii_lowercase() {
            'n' | 'b' => 300,
            'r' => 500,
            'q' => 900,
            'p' | 'k' | '/' => 0,
            '0'..='9' => 0,
            _ => return None,
        };
        if c.is_ascii_uppercase() {
            white += value;
        } else {
            black += value;
        }
    }
    Some((white, black))
}
