//! Analysis outputs: per-ply metrics and labels, per-game summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{game::GameMeta, ply::EngineSummary, ply::PlyRecord};

/// Numeric metrics for one ply.
///
/// Evaluations are centipawns with White-positive sign; probabilities
/// are win probabilities for White in `(0, 1)`. The `practical` fields
/// fold the time equity `tau_white_cp` into the raw evaluation, so they
/// reflect how the position feels under the ticking clock. The
/// `dp_*_mover` deltas are from the mover's perspective: positive always
/// means the move helped the side that played it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveMetrics {
    pub tau_white_cp: i32,
    pub cp_eval_before: i32,
    pub cp_eval_after: i32,
    pub cp_practical_before: i32,
    pub cp_practical_after: i32,
    pub p_eval_before: f32,
    pub p_eval_after: f32,
    pub p_practical_before: f32,
    pub p_practical_after: f32,
    pub dp_eval_mover: f32,
    pub dp_practical_mover: f32,
    /// True when the engine had no line for the played move, so
    /// `cp_eval_after` reuses `best_cp_white` as an approximation.
    pub eval_after_approximated: bool,
}

/// Behavioral label taxonomy, in descending classifier priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum LabelKind {
    /// Large practical loss while already under the time-pressure pivot.
    TimeBlunder,
    /// Large practical loss on a near-instant move with ample clock.
    SnapBlunder,
    /// Rushed move in a critical position that cost something.
    UnderthinkCritical,
    /// Long think on a simple position with nothing to show for it.
    OverthinkSimple,
    /// Long think that did not change the position's assessment.
    WastedThink,
    /// Time spent (or not) that meaningfully improved the position.
    GoodInvestment,
    Neutral,
}

impl LabelKind {
    /// Every kind, in classifier priority order.
    pub const ALL: [Self; 7] = [
        Self::TimeBlunder,
        Self::SnapBlunder,
        Self::UnderthinkCritical,
        Self::OverthinkSimple,
        Self::WastedThink,
        Self::GoodInvestment,
        Self::Neutral,
    ];
}

/// The classifier's verdict for one ply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub kind: LabelKind,
    /// Normalized magnitude in `[0, 1]`; 0 for `Neutral`.
    pub severity: f32,
    pub title: String,
    pub explanation: String,
    pub tips: Vec<String>,
}

/// Game phase a ply belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Phase {
    Opening,
    Middlegame,
    Endgame,
}

/// Complete analysis output for one ply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyAnalysis {
    pub ply: PlyRecord,
    pub engine_before: EngineSummary,
    pub metrics: MoveMetrics,
    pub label: Label,
    pub phase: Phase,
}

/// A per-phase triple of fractions or deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseShares {
    pub opening: f32,
    pub middlegame: f32,
    pub endgame: f32,
}

/// A per-phase triple of averages, each nullable when the phase has no
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseAverages {
    pub opening: Option<f32>,
    pub middlegame: Option<f32>,
    pub endgame: Option<f32>,
}

/// Game-level reduction over all per-ply analyses.
///
/// Rates divide by the number of plies with a known post-move clock and
/// are null when that denominator is zero. `phase_time_share` (and its
/// delta against the 0.15/0.70/0.15 baseline) is null as a whole when no
/// think time is known anywhere in the game; otherwise the three shares
/// sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub total_plies: usize,
    /// Count per label kind; every kind is present, possibly at zero.
    pub labels_count: BTreeMap<LabelKind, u32>,
    pub avg_think_time_secs: Option<f32>,
    pub avg_punish_cp_mover: Option<f32>,
    pub avg_dp_practical_mover: Option<f32>,
    pub avg_complexity_cp_mover: Option<f32>,
    pub time_trouble_moves: u32,
    pub panic_moves: u32,
    pub blunders_in_time_trouble: u32,
    pub time_trouble_rate: Option<f32>,
    pub panic_rate: Option<f32>,
    pub phase_time_share: Option<PhaseShares>,
    pub phase_time_share_delta_vs_15_70_15: Option<PhaseShares>,
    pub phase_avg_think_time_secs: PhaseAverages,
    pub phase_avg_complexity_cp_mover: PhaseAverages,
}

/// The full report for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAnalysis {
    pub meta: GameMeta,
    pub plies: Vec<PlyAnalysis>,
    pub summary: GameSummary,
}
