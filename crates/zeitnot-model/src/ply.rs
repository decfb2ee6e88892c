//! Per-ply inputs produced by external collaborators.
//!
//! A [`PlyRecord`] comes from the game-record parser (already resolved to
//! SAN/UCI and FEN strings), an [`EngineSummary`] from the engine
//! collaborator that searched the position before the move was played.
//! The analysis pipeline consumes them as-is; it never talks to a parser
//! or an engine process itself.

use serde::{Deserialize, Serialize};

use crate::game::Color;

/// One half-move of the game, with clock annotations where known.
///
/// `ply_index` is 1-based and sequential over the game. Clock fields are
/// nullable because clock annotations may be absent from the source
/// record; `think_time_secs` is `clock_before_secs - clock_after_secs`
/// when both readings exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub ply_index: u32,
    pub san: String,
    pub uci: String,
    pub mover: Color,
    pub fen_before: String,
    pub fen_after: String,
    pub clock_before_secs: Option<f32>,
    pub clock_after_secs: Option<f32>,
    pub think_time_secs: Option<f32>,
}

/// One engine line from a multipv search.
///
/// `cp_white` is White-positive. `mate` carries a signed mate distance
/// when the line ends in forced mate; the cp value is then a sentinel
/// and downstream probability mapping saturates toward the winning
/// bound instead of trusting it numerically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineLine {
    pub multipv: u8,
    pub uci: String,
    pub cp_white: i32,
    pub mate: Option<i32>,
}

/// Engine output for the position before one ply was played.
///
/// The `*_mover` fields are quality signals expressed from the mover's
/// perspective:
///
/// - `punish_cp_mover`: how much worse the played move is than the best
///   line
/// - `spread_k_cp_mover`: spread between the best and the k-th line (how
///   sharp the position is)
/// - `gap_12_cp_mover`: gap between the first and second lines
/// - `complexity_cp_mover`: volatility estimate used by the classifier
///
/// All derived fields are nullable; producers that only emit raw lines
/// leave them to be filled from `lines` by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSummary {
    pub depth: u16,
    pub nodes: u64,
    pub nps: u64,
    pub lines: Vec<EngineLine>,
    pub best_cp_white: Option<i32>,
    pub played_cp_white: Option<i32>,
    pub punish_cp_mover: Option<i32>,
    pub spread_k_cp_mover: Option<i32>,
    pub gap_12_cp_mover: Option<i32>,
    pub complexity_cp_mover: Option<i32>,
}

/// One ply of analysis input: the move record paired with the engine
/// summary for the position before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyInput {
    pub record: PlyRecord,
    pub engine: EngineSummary,
}

/// A full game handed to the pipeline: metadata plus the ordered ply
/// inputs covering the whole game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInput {
    pub meta: crate::game::GameMeta,
    pub plies: Vec<PlyInput>,
}
