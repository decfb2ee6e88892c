//! Time-Equity Move Analysis Engine.
//!
//! Turns a sequence of chess half-moves, each carrying an engine
//! evaluation and a clock reading, into a diagnostic report of how a
//! player spent time under pressure: per-move behavioral labels and a
//! game-level summary of time-management quality.
//!
//! # Pipeline
//!
//! Data flows strictly left to right per ply, then fans into the
//! aggregator once all plies are processed:
//!
//! 1. [`win_prob`]: centipawn evaluation → win probability
//! 2. [`time_equity`]: clock differential → centipawn-equivalent time
//!    advantage (tau)
//! 3. [`metrics`]: evaluation + tau → "practical" evaluation before and
//!    after the move
//! 4. [`labeling`]: metrics + thresholds → one behavioral label per ply
//! 5. [`phase`]: ply index / material → opening, middlegame or endgame
//! 6. [`summary`]: all per-ply outputs → one game-level summary
//!
//! [`pipeline::analyze_game`] orchestrates the run: it validates the
//! configuration and the ply sequence up front, derives per-ply clock
//! states ([`clocks`]) and missing engine signals ([`engine_signals`]),
//! maps over the plies and reduces into a
//! [`GameSummary`](zeitnot_model::GameSummary).
//!
//! The engine is stateless between games: every run takes a fresh
//! [`AnalysisConfig`] and ply list and returns a new, independent
//! [`GameAnalysis`](zeitnot_model::GameAnalysis).
//!
//! # Example
//!
//! ```no_run
//! use zeitnot_analysis::{AnalysisConfig, pipeline::analyze_game};
//! use zeitnot_model::{GameMeta, PlyInput};
//!
//! let meta: GameMeta = todo!();
//! let plies: Vec<PlyInput> = todo!();
//!
//! let config = AnalysisConfig::default();
//! let report = analyze_game(meta, plies, &config)?;
//! println!("panic moves: {}", report.summary.panic_moves);
//! # Ok::<(), zeitnot_analysis::AnalysisError>(())
//! ```

pub use self::{
    config::{AnalysisConfig, ConfigError, EngineOptions, LabelThresholds, PhaseConfig},
    pipeline::{AnalysisError, analyze_game},
};

pub mod clocks;
pub mod config;
pub mod engine_signals;
pub mod labeling;
pub mod metrics;
pub mod phase;
pub mod pipeline;
pub mod summary;
pub mod time_equity;
pub mod win_prob;
