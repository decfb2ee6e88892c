//! Move-quality classification.
//!
//! A deterministic, total, priority-ordered rule list over one ply's
//! metrics. The first matching rule wins, which resolves every overlap;
//! a ply that matches nothing is `Neutral`. Rules that need a missing
//! input (think time, clock reading, complexity) do not fire, so a
//! snap move with an unknown clock stays `Neutral`: only a reading at
//! or above the pivot certifies that the mover was not in time
//! trouble.

use zeitnot_model::{Label, LabelKind};

use crate::config::LabelThresholds;

/// Inputs the classifier reads for one ply.
#[derive(Debug, Clone, Copy)]
pub struct LabelContext<'a> {
    pub san: &'a str,
    pub think_time_secs: Option<f32>,
    pub clock_after_secs: Option<f32>,
    pub complexity_cp_mover: Option<i32>,
    pub dp_practical_mover: f32,
}

/// Classifies one ply.
///
/// Priority order: `TimeBlunder`, `SnapBlunder`, `UnderthinkCritical`,
/// `OverthinkSimple`, `WastedThink`, `GoodInvestment`, `Neutral`.
/// Identical inputs always yield an identical label.
#[must_use]
pub fn label_move(thresholds: &LabelThresholds, pivot: f32, ctx: &LabelContext<'_>) -> Label {
    let dp = ctx.dp_practical_mover;
    let think = ctx.think_time_secs;
    let clock_after = ctx.clock_after_secs;
    let complexity = ctx.complexity_cp_mover;

    let in_time_trouble = clock_after.is_some_and(|c| c < pivot);
    let snap = think.is_some_and(|s| s < thresholds.snap_secs);
    let rushed = think.is_some_and(|s| s < thresholds.rushed_secs);
    let excessive = think.is_some_and(|s| s > thresholds.excessive_secs);
    let large_loss = dp < thresholds.large_loss_dp;
    let near_zero = dp.abs() <= thresholds.near_zero_dp;

    let kind = if in_time_trouble && large_loss {
        LabelKind::TimeBlunder
    } else if snap && large_loss && clock_after.is_some_and(|c| c >= pivot) {
        LabelKind::SnapBlunder
    } else if rushed
        && complexity.is_some_and(|c| c > thresholds.critical_complexity_cp)
        && dp < 0.0
        && !large_loss
    {
        LabelKind::UnderthinkCritical
    } else if excessive
        && complexity.is_some_and(|c| c < thresholds.simple_complexity_cp)
        && near_zero
    {
        LabelKind::OverthinkSimple
    } else if excessive && near_zero {
        LabelKind::WastedThink
    } else if dp > thresholds.good_gain_dp {
        LabelKind::GoodInvestment
    } else {
        LabelKind::Neutral
    };

    Label {
        kind,
        severity: severity(kind, dp, clock_after, pivot),
        title: title(kind).to_string(),
        explanation: explanation(ctx),
        tips: tips(kind, pivot),
    }
}

/// Normalized severity in `[0, 1]`.
///
/// Zero for `Neutral`; otherwise a per-kind base plus a term growing
/// with `|dp_practical_mover|` (half a game of win probability counts
/// as full magnitude). `TimeBlunder` additionally grows with how far
/// below the pivot the clock sits.
fn severity(kind: LabelKind, dp: f32, clock_after: Option<f32>, pivot: f32) -> f32 {
    let dp_term = (dp.abs() / 0.5).clamp(0.0, 1.0);
    match kind {
        LabelKind::Neutral => 0.0,
        LabelKind::GoodInvestment => dp_term,
        LabelKind::OverthinkSimple => (0.35 + 0.5 * dp_term).min(1.0),
        LabelKind::WastedThink => (0.45 + 0.5 * dp_term).min(1.0),
        LabelKind::UnderthinkCritical => (0.5 + 0.5 * dp_term).min(1.0),
        LabelKind::SnapBlunder => (0.6 + 0.4 * dp_term).min(1.0),
        LabelKind::TimeBlunder => {
            let clock_term = if pivot > 0.0 {
                clock_after.map_or(0.0, |c| ((pivot - c) / pivot).clamp(0.0, 1.0))
            } else {
                0.0
            };
            (0.5 + 0.3 * dp_term + 0.2 * clock_term).min(1.0)
        }
    }
}

fn title(kind: LabelKind) -> &'static str {
    match kind {
        LabelKind::TimeBlunder => "Time blunder",
        LabelKind::SnapBlunder => "Snap blunder",
        LabelKind::UnderthinkCritical => "Underthinking a critical moment",
        LabelKind::OverthinkSimple => "Overthinking a simple position",
        LabelKind::WastedThink => "Wasted think",
        LabelKind::GoodInvestment => "Good investment",
        LabelKind::Neutral => "Neutral",
    }
}

fn explanation(ctx: &LabelContext<'_>) -> String {
    let spent = ctx
        .think_time_secs
        .map_or_else(|| "unknown time".to_string(), |s| format!("{s:.1}s"));
    let remaining = ctx
        .clock_after_secs
        .map_or_else(|| "remaining unknown".to_string(), |c| format!("{c:.1}s remaining"));
    let complexity = ctx
        .complexity_cp_mover
        .map_or_else(|| "complexity unknown".to_string(), |c| format!("complexity ~{c}cp"));
    format!(
        "{}: spent {spent}, {remaining}, {complexity}, practical \u{0394}p={:+.3}",
        ctx.san, ctx.dp_practical_mover
    )
}

fn tips(kind: LabelKind, pivot: f32) -> Vec<String> {
    match kind {
        LabelKind::TimeBlunder => vec![
            format!("Try to keep at least {pivot:.0}s on the clock before critical moments."),
            "Pre-decide simple recaptures so pressure spends go to real decisions.".to_string(),
        ],
        LabelKind::SnapBlunder => {
            vec!["Even forced-looking moves deserve a short sanity check.".to_string()]
        }
        LabelKind::UnderthinkCritical => vec![
            "Spend time where the position is knife-edge; play instantly where it's not."
                .to_string(),
        ],
        LabelKind::OverthinkSimple | LabelKind::WastedThink => {
            vec!["Bank time on simple positions; it pays off under pressure later.".to_string()]
        }
        LabelKind::GoodInvestment | LabelKind::Neutral => Vec::new(),
    }
}
