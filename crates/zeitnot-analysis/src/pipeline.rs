//! Single-pass analysis orchestration.
//!
//! Validates the configuration and the ply sequence up front (a partial
//! report would be misleading), derives clock states and missing engine
//! signals, then maps every ply through the metric composer and the
//! classifier and reduces the results into a game summary. The run is
//! synchronous and stateless: no locks, no retries, no cross-game
//! state.

use tracing::debug;
use zeitnot_model::{GameAnalysis, GameMeta, PlyAnalysis, PlyInput};

use crate::{
    clocks::{clock_pairs, fill_think_times},
    config::{AnalysisConfig, ConfigError},
    engine_signals::fill_derived_signals,
    labeling::{LabelContext, label_move},
    metrics::compose,
    phase::segment_phases,
    summary::build_summary,
};

/// Input rejected before any per-ply computation.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("game has no plies to analyze")]
    EmptyGame,
    #[display("ply at position {position} has index {found}, expected {expected}")]
    NonSequentialPly {
        position: usize,
        found: u32,
        expected: u32,
    },
    #[display("invalid configuration: {_0}")]
    InvalidConfig(ConfigError),
}

/// Analyzes one game.
///
/// The ply inputs must be ordered, 1-indexed and cover the full game;
/// the time control in `config` overrides the one detected in `meta`.
/// Returns a fresh [`GameAnalysis`] ready for serialization.
pub fn analyze_game(
    meta: GameMeta,
    plies: Vec<PlyInput>,
    config: &AnalysisConfig,
) -> Result<GameAnalysis, AnalysisError> {
    config.validate().map_err(AnalysisError::InvalidConfig)?;
    validate_sequence(&plies)?;

    let mut meta = meta;
    meta.time_control = config.time_control.or(meta.time_control);
    let time_control = meta.time_control;

    let (mut records, mut engines): (Vec<_>, Vec<_>) =
        plies.into_iter().map(|p| (p.record, p.engine)).unzip();

    fill_think_times(&mut records, time_control);
    let pairs = clock_pairs(&records, time_control);
    for (record, engine) in records.iter().zip(engines.iter_mut()) {
        fill_derived_signals(engine, record.mover, &record.uci);
    }
    let phases = segment_phases(&config.phases, &records);

    let mut analyses = Vec::with_capacity(records.len());
    for (((record, engine), clock_pair), phase) in records
        .into_iter()
        .zip(engines)
        .zip(pairs)
        .zip(phases)
    {
        let metrics = compose(config, &record, &engine, clock_pair);
        let label = label_move(
            &config.labels,
            config.time_pressure_pivot,
            &LabelContext {
                san: &record.san,
                think_time_secs: record.think_time_secs,
                clock_after_secs: record.clock_after_secs,
                complexity_cp_mover: engine.complexity_cp_mover,
                dp_practical_mover: metrics.dp_practical_mover,
            },
        );
        analyses.push(PlyAnalysis {
            ply: record,
            engine_before: engine,
            metrics,
            label,
            phase,
        });
    }

    let summary = build_summary(config, &analyses);
    debug!(
        total_plies = summary.total_plies,
        panic_moves = summary.panic_moves,
        time_trouble_moves = summary.time_trouble_moves,
        "game analysis complete"
    );

    Ok(GameAnalysis {
        meta,
        plies: analyses,
        summary,
    })
}

fn validate_sequence(plies: &[PlyInput]) -> Result<(), AnalysisError> {
    if plies.is_empty() {
        return Err(AnalysisError::EmptyGame);
    }
    for (position, ply) in plies.iter().enumerate() {
        let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
        if ply.record.ply_index != expected {
            return Err(AnalysisError::NonSequentialPly {
                position,
                found: ply.record.ply_index,
                expected,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use zeitnot_model::{
        Color, EngineLine, EngineSummary, GameMeta, LabelKind, Phase, PlyRecord, TimeControl,
    };

    use super::*;

    fn record(
        index: u32,
        mover: Color,
        san: &str,
        uci: &str,
        clock_before: f32,
        clock_after: f32,
    ) -> PlyRecord {
        PlyRecord {
            ply_index: index,
            san: san.to_string(),
            uci: uci.to_string(),
            mover,
            fen_before: String::new(),
            fen_after: String::new(),
            clock_before_secs: Some(clock_before),
            clock_after_secs: Some(clock_after),
            think_time_secs: None,
        }
    }

    fn engine(best_uci: &str, best_cp: i32, played_uci: &str, played_cp: i32) -> EngineSummary {
        EngineSummary {
            depth: 14,
            nodes: 2_000_000,
            nps: 900_000,
            lines: vec![
                EngineLine {
                    multipv: 1,
                    uci: best_uci.to_string(),
                    cp_white: best_cp,
                    mate: None,
                },
                EngineLine {
                    multipv: 2,
                    uci: played_uci.to_string(),
                    cp_white: played_cp,
                    mate: None,
                },
            ],
            best_cp_white: None,
            played_cp_white: None,
            punish_cp_mover: None,
            spread_k_cp_mover: None,
            gap_12_cp_mover: None,
            complexity_cp_mover: None,
        }
    }

    fn meta(base_secs: u32) -> GameMeta {
        GameMeta {
            time_control: Some(TimeControl {
                base_secs,
                increment_secs: 0,
            }),
            ..GameMeta::default()
        }
    }

    #[test]
    fn quiet_blitz_moves_come_out_neutral() {
        // Constant +20 eval, one to two seconds per move, clocks far
        // from the pivot: small positive tau, Neutral labels.
        let plies = vec![
            PlyInput {
                record: record(1, Color::White, "Nf3", "g1f3", 59.0, 58.0),
                engine: engine("g1f3", 20, "g1f3", 20),
            },
            PlyInput {
                record: record(2, Color::Black, "Nf6", "g8f6", 58.0, 56.0),
                engine: engine("g8f6", 20, "g8f6", 20),
            },
        ];
        let report = analyze_game(meta(59), plies, &AnalysisConfig::default()).unwrap();

        for ply in &report.plies {
            assert_eq!(ply.label.kind, LabelKind::Neutral);
            assert!(ply.metrics.tau_white_cp.abs() < 30);
            assert_eq!(ply.phase, Phase::Opening);
        }
        assert_eq!(report.summary.total_plies, 2);
        assert_eq!(report.summary.panic_moves, 0);
        assert_eq!(report.summary.labels_count[&LabelKind::Neutral], 2);
        // During White's first move both sides still hold ~59s.
        assert!(report.plies[0].metrics.tau_white_cp >= 0);
    }

    #[test]
    fn flagging_blunder_is_counted_as_panic_and_time_trouble() {
        let mut ply = record(1, Color::White, "Qxb7", "d5b7", 1.2, 1.0);
        ply.think_time_secs = Some(0.2);
        let plies = vec![PlyInput {
            record: ply,
            engine: engine("d5d8", 20, "d5b7", -183),
        }];
        let report = analyze_game(meta(60), plies, &AnalysisConfig::default()).unwrap();

        let analysis = &report.plies[0];
        assert_eq!(analysis.label.kind, LabelKind::TimeBlunder);
        assert!(analysis.metrics.dp_practical_mover < -0.12);
        assert_eq!(report.summary.panic_moves, 1);
        assert_eq!(report.summary.time_trouble_moves, 1);
        assert_eq!(report.summary.blunders_in_time_trouble, 1);
    }

    #[test]
    fn clockless_snap_moves_never_inflate_the_panic_rate() {
        // Two instant blunders without clock annotations plus one quiet
        // move with a known clock: nothing certifies the blunderers
        // were out of time trouble, so they stay out of panic_moves and
        // the rate keeps its known-clock denominator.
        let mut first = record(1, Color::White, "Qxb7", "d5b7", 0.0, 0.0);
        first.clock_before_secs = None;
        first.clock_after_secs = None;
        first.think_time_secs = Some(0.3);
        let mut second = record(2, Color::Black, "Rxa2", "a8a2", 0.0, 0.0);
        second.clock_before_secs = None;
        second.clock_after_secs = None;
        second.think_time_secs = Some(0.4);
        let plies = vec![
            PlyInput {
                record: first,
                engine: engine("d5d8", 20, "d5b7", -183),
            },
            PlyInput {
                record: second,
                engine: engine("a8d8", 20, "a8a2", 195),
            },
            PlyInput {
                record: record(3, Color::White, "a3", "a2a3", 55.0, 54.0),
                engine: engine("a2a3", 20, "a2a3", 20),
            },
        ];
        let report = analyze_game(meta(60), plies, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.plies[0].label.kind, LabelKind::Neutral);
        assert_eq!(report.plies[1].label.kind, LabelKind::Neutral);
        assert_eq!(report.summary.panic_moves, 0);
        let rate = report.summary.panic_rate.unwrap();
        assert!((0.0..=1.0).contains(&rate));
    }

    #[test]
    fn large_practical_gain_is_a_good_investment() {
        let plies = vec![PlyInput {
            record: record(1, Color::White, "Rxe8+", "e1e8", 60.0, 48.0),
            engine: engine("a2a3", -100, "e1e8", 15),
        }];
        let report = analyze_game(meta(60), plies, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.plies[0].label.kind, LabelKind::GoodInvestment);
    }

    #[test]
    fn unsearched_played_move_falls_back_with_a_flag() {
        let plies = vec![PlyInput {
            record: record(1, Color::White, "h4", "h2h4", 60.0, 55.0),
            engine: engine("e2e4", 30, "d2d4", 25),
        }];
        let report = analyze_game(meta(60), plies, &AnalysisConfig::default()).unwrap();

        let analysis = &report.plies[0];
        assert!(analysis.metrics.eval_after_approximated);
        assert_eq!(analysis.metrics.cp_eval_after, analysis.metrics.cp_eval_before);
    }

    #[test]
    fn empty_game_fails_fast() {
        let result = analyze_game(meta(60), Vec::new(), &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::EmptyGame)));
    }

    #[test]
    fn non_sequential_plies_fail_fast() {
        let plies = vec![
            PlyInput {
                record: record(1, Color::White, "e4", "e2e4", 60.0, 59.0),
                engine: engine("e2e4", 20, "e2e4", 20),
            },
            PlyInput {
                record: record(5, Color::Black, "e5", "e7e5", 60.0, 59.0),
                engine: engine("e7e5", 20, "e7e5", 20),
            },
        ];
        let result = analyze_game(meta(60), plies, &AnalysisConfig::default());
        assert!(matches!(
            result,
            Err(AnalysisError::NonSequentialPly {
                position: 1,
                found: 5,
                expected: 2,
            })
        ));
    }

    #[test]
    fn invalid_config_fails_before_any_work() {
        let config = AnalysisConfig {
            beta: -1.0,
            ..AnalysisConfig::default()
        };
        let plies = vec![PlyInput {
            record: record(1, Color::White, "e4", "e2e4", 60.0, 59.0),
            engine: engine("e2e4", 20, "e2e4", 20),
        }];
        let result = analyze_game(meta(60), plies, &config);
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn config_time_control_overrides_detected_one() {
        let config = AnalysisConfig {
            time_control: Some(TimeControl {
                base_secs: 180,
                increment_secs: 2,
            }),
            ..AnalysisConfig::default()
        };
        let plies = vec![PlyInput {
            record: record(1, Color::White, "e4", "e2e4", 180.0, 178.0),
            engine: engine("e2e4", 20, "e2e4", 20),
        }];
        let report = analyze_game(meta(60), plies, &config).unwrap();
        assert_eq!(
            report.meta.time_control,
            Some(TimeControl {
                base_secs: 180,
                increment_secs: 2,
            })
        );
    }

    #[test]
    fn report_round_trips_through_json() {
        let plies = vec![
            PlyInput {
                record: record(1, Color::White, "Nf3", "g1f3", 59.0, 58.0),
                engine: engine("g1f3", 20, "g1f3", 20),
            },
            PlyInput {
                record: record(2, Color::Black, "Nf6", "g8f6", 58.0, 56.0),
                engine: engine("g8f6", 15, "g8f6", 15),
            },
        ];
        let report = analyze_game(meta(60), plies, &AnalysisConfig::default()).unwrap();

        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: GameAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
