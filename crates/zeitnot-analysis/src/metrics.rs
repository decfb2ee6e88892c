//! Practical evaluation composition.
//!
//! Folds the time equity into the raw engine evaluation and expresses
//! both in win-probability space, before and after the move. Each ply's
//! metrics depend only on that ply's own evaluation and clock inputs
//! plus the static configuration, so this step is safe to map in any
//! order.

use zeitnot_model::{EngineSummary, MoveMetrics, PlyRecord};

use crate::{
    clocks::ClockPair,
    config::AnalysisConfig,
    time_equity::tau_white_cp,
    win_prob::{mover_probability, probability_from_cp},
};

/// Composes one ply's [`MoveMetrics`].
///
/// `cp_eval_before` is the best line's evaluation of the position the
/// mover faced; `cp_eval_after` is the evaluation of the line actually
/// played. When the engine never searched the played move,
/// `best_cp_white` stands in and `eval_after_approximated` records the
/// substitution. An unknown clock pair yields zero time equity, not an
/// error.
#[must_use]
pub fn compose(
    config: &AnalysisConfig,
    ply: &PlyRecord,
    engine: &EngineSummary,
    clocks: ClockPair,
) -> MoveMetrics {
    let cp_eval_before = engine.best_cp_white.unwrap_or(0);
    let (cp_eval_after, eval_after_approximated) = match engine.played_cp_white {
        Some(cp) => (cp, false),
        None => (cp_eval_before, true),
    };

    let tau_white = clocks.both().map_or(0, |(white, black)| {
        tau_white_cp(
            config.alpha,
            config.beta,
            config.time_pressure_pivot,
            config.time_pressure_scale,
            config.time_pressure_boost,
            white,
            black,
        )
    });

    let cp_practical_before = cp_eval_before + tau_white;
    let cp_practical_after = cp_eval_after + tau_white;

    let k = config.k_sigmoid;
    let p_eval_before = probability_from_cp(cp_eval_before, k);
    let p_eval_after = probability_from_cp(cp_eval_after, k);
    let p_practical_before = probability_from_cp(cp_practical_before, k);
    let p_practical_after = probability_from_cp(cp_practical_after, k);

    let dp_eval_mover =
        mover_probability(p_eval_after, ply.mover) - mover_probability(p_eval_before, ply.mover);
    let dp_practical_mover = mover_probability(p_practical_after, ply.mover)
        - mover_probability(p_practical_before, ply.mover);

    MoveMetrics {
        tau_white_cp: tau_white,
        cp_eval_before,
        cp_eval_after,
        cp_practical_before,
        cp_practical_after,
        p_eval_before,
        p_eval_after,
        p_practical_before,
        p_practical_after,
        dp_eval_mover,
        dp_practical_mover,
        eval_after_approximated,
    }
}

#[cfg(test)]
mod tests {
    use zeitnot_model::{Color, EngineLine};

    use super::*;

    fn record(mover: Color) -> PlyRecord {
        PlyRecord {
            ply_index: 1,
            san: "e4".to_string(),
            uci: "e2e4".to_string(),
            mover,
            fen_before: String::new(),
            fen_after: String::new(),
            clock_before_secs: Some(60.0),
            clock_after_secs: Some(58.0),
            think_time_secs: Some(2.0),
        }
    }

    fn summary(best: i32, played: Option<i32>) -> EngineSummary {
        EngineSummary {
            depth: 14,
            nodes: 0,
            nps: 0,
            lines: vec![EngineLine {
                multipv: 1,
                uci: "e2e4".to_string(),
                cp_white: best,
                mate: None,
            }],
            best_cp_white: Some(best),
            played_cp_white: played,
            punish_cp_mover: None,
            spread_k_cp_mover: None,
            gap_12_cp_mover: None,
            complexity_cp_mover: None,
        }
    }

    fn known(white: f32, black: f32) -> ClockPair {
        ClockPair {
            white: Some(white),
            black: Some(black),
        }
    }

    const UNKNOWN: ClockPair = ClockPair {
        white: None,
        black: None,
    };

    #[test]
    fn practical_eval_folds_in_tau() {
        let config = AnalysisConfig::default();
        let metrics = compose(
            &config,
            &record(Color::White),
            &summary(20, Some(15)),
            known(90.0, 30.0),
        );

        assert!(metrics.tau_white_cp > 0);
        assert_eq!(
            metrics.cp_practical_before,
            metrics.cp_eval_before + metrics.tau_white_cp
        );
        assert_eq!(
            metrics.cp_practical_after,
            metrics.cp_eval_after + metrics.tau_white_cp
        );
        assert!(!metrics.eval_after_approximated);
    }

    #[test]
    fn probabilities_are_monotone_images_of_cp() {
        let config = AnalysisConfig::default();
        let metrics = compose(
            &config,
            &record(Color::White),
            &summary(80, Some(-40)),
            known(60.0, 60.0),
        );

        assert!(metrics.p_eval_before > metrics.p_eval_after);
        assert!(metrics.cp_eval_before > metrics.cp_eval_after);
        assert!(metrics.p_practical_before > 0.5);
    }

    #[test]
    fn deltas_flip_sign_between_movers() {
        let config = AnalysisConfig::default();
        let engine = summary(30, Some(-25));
        let white = compose(&config, &record(Color::White), &engine, known(60.0, 60.0));
        let black = compose(&config, &record(Color::Black), &engine, known(60.0, 60.0));

        assert!(white.dp_eval_mover < 0.0);
        assert!(black.dp_eval_mover > 0.0);
        assert!((white.dp_eval_mover + black.dp_eval_mover).abs() < 1e-6);
    }

    #[test]
    fn unknown_clocks_mean_zero_time_equity() {
        let config = AnalysisConfig::default();
        let metrics = compose(&config, &record(Color::White), &summary(20, Some(20)), UNKNOWN);
        assert_eq!(metrics.tau_white_cp, 0);
        assert_eq!(metrics.cp_practical_before, metrics.cp_eval_before);
    }

    #[test]
    fn missing_played_line_falls_back_with_flag() {
        let config = AnalysisConfig::default();
        let metrics = compose(
            &config,
            &record(Color::White),
            &summary(42, None),
            known(60.0, 60.0),
        );
        assert!(metrics.eval_after_approximated);
        assert_eq!(metrics.cp_eval_after, 42);
        assert_eq!(metrics.dp_practical_mover, 0.0);
    }
}
