//! Game-level aggregation.
//!
//! A pure reduction over the per-ply analyses. Every division is
//! guarded: rates are null when no ply has a known clock, phase time
//! shares are null as a group when no think time is known anywhere, and
//! per-phase averages are null individually when a phase has no data.

use std::collections::BTreeMap;

use zeitnot_model::{GameSummary, LabelKind, Phase, PhaseAverages, PhaseShares, PlyAnalysis};
use zeitnot_stats::descriptive::{RunningMean, rate};

use crate::config::AnalysisConfig;

/// Baseline phase time allocation the summary reports deltas against.
pub const BASELINE_SHARES: PhaseShares = PhaseShares {
    opening: 0.15,
    middlegame: 0.70,
    endgame: 0.15,
};

fn phase_slot(phase: Phase) -> usize {
    match phase {
        Phase::Opening => 0,
        Phase::Middlegame => 1,
        Phase::Endgame => 2,
    }
}

/// Reduces all per-ply analyses into one [`GameSummary`].
#[must_use]
pub fn build_summary(config: &AnalysisConfig, plies: &[PlyAnalysis]) -> GameSummary {
    let pivot = config.time_pressure_pivot;
    let large_loss = config.labels.large_loss_dp;

    let mut labels_count: BTreeMap<LabelKind, u32> = BTreeMap::new();
    for kind in LabelKind::ALL {
        labels_count.insert(kind, 0);
    }

    let mut think = RunningMean::default();
    let mut punish = RunningMean::default();
    let mut dp_practical = RunningMean::default();
    let mut complexity = RunningMean::default();

    let mut known_clock_plies = 0_u32;
    let mut time_trouble_moves = 0_u32;
    let mut panic_moves = 0_u32;
    let mut blunders_in_time_trouble = 0_u32;

    let mut phase_think = [RunningMean::default(); 3];
    let mut phase_complexity = [RunningMean::default(); 3];

    for analysis in plies {
        *labels_count
            .entry(analysis.label.kind)
            .or_insert(0) += 1;

        let slot = phase_slot(analysis.phase);
        if let Some(t) = analysis.ply.think_time_secs {
            think.push(t);
            phase_think[slot].push(t);
        }
        #[expect(clippy::cast_precision_loss)]
        if let Some(p) = analysis.engine_before.punish_cp_mover {
            punish.push(p as f32);
        }
        #[expect(clippy::cast_precision_loss)]
        if let Some(c) = analysis.engine_before.complexity_cp_mover {
            complexity.push(c as f32);
            phase_complexity[slot].push(c as f32);
        }
        dp_practical.push(analysis.metrics.dp_practical_mover);

        if let Some(clock_after) = analysis.ply.clock_after_secs {
            known_clock_plies += 1;
            if clock_after < pivot {
                time_trouble_moves += 1;
                if analysis.metrics.dp_practical_mover < large_loss {
                    blunders_in_time_trouble += 1;
                }
            }
        }
        if matches!(
            analysis.label.kind,
            LabelKind::SnapBlunder | LabelKind::TimeBlunder
        ) {
            panic_moves += 1;
        }
    }

    let phase_time_share = phase_shares(&phase_think, think.sum());
    let phase_time_share_delta = phase_time_share.map(|shares| PhaseShares {
        opening: shares.opening - BASELINE_SHARES.opening,
        middlegame: shares.middlegame - BASELINE_SHARES.middlegame,
        endgame: shares.endgame - BASELINE_SHARES.endgame,
    });

    GameSummary {
        total_plies: plies.len(),
        labels_count,
        avg_think_time_secs: think.mean(),
        avg_punish_cp_mover: punish.mean(),
        avg_dp_practical_mover: dp_practical.mean(),
        avg_complexity_cp_mover: complexity.mean(),
        time_trouble_moves,
        panic_moves,
        blunders_in_time_trouble,
        time_trouble_rate: rate(time_trouble_moves, known_clock_plies),
        panic_rate: rate(panic_moves, known_clock_plies),
        phase_time_share,
        phase_time_share_delta_vs_15_70_15: phase_time_share_delta,
        phase_avg_think_time_secs: PhaseAverages {
            opening: phase_think[0].mean(),
            middlegame: phase_think[1].mean(),
            endgame: phase_think[2].mean(),
        },
        phase_avg_complexity_cp_mover: PhaseAverages {
            opening: phase_complexity[0].mean(),
            middlegame: phase_complexity[1].mean(),
            endgame: phase_complexity[2].mean(),
        },
    }
}

/// Per-phase fractions of total known think time, or `None` when no
/// think time is known (the shares would otherwise divide by zero).
fn phase_shares(phase_think: &[RunningMean; 3], total_think: f32) -> Option<PhaseShares> {
    if total_think <= 0.0 {
        return None;
    }
    Some(PhaseShares {
        opening: phase_think[0].sum() / total_think,
        middlegame: phase_think[1].sum() / total_think,
        endgame: phase_think[2].sum() / total_think,
    })
}
