//! Analysis configuration.
//!
//! All tunables arrive as one explicit, immutable [`AnalysisConfig`]
//! value passed into every pure function; nothing in the pipeline reads
//! ambient settings. Defaults are documented here and stable across
//! versions so stored reports remain reproducible.

use serde::{Deserialize, Serialize};
use zeitnot_model::TimeControl;

/// Options recorded for the external engine collaborator.
///
/// The pipeline itself never drives a search; these values are carried
/// so a report documents how its `EngineSummary` inputs were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub depth: u16,
    pub multipv: u8,
    pub movetime_ms: Option<u64>,
    pub threads: Option<u32>,
    pub hash_mb: Option<u32>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            depth: 14,
            multipv: 4,
            movetime_ms: None,
            threads: None,
            hash_mb: None,
        }
    }
}

/// Thresholds of the move-quality classifier.
///
/// Defaults:
///
/// | field | default | meaning |
/// |---|---|---|
/// | `snap_secs` | 1.0 | below this a move counts as near-instant |
/// | `rushed_secs` | 5.0 | below this a move counts as rushed |
/// | `excessive_secs` | 30.0 | above this a think counts as excessive |
/// | `simple_complexity_cp` | 40 | below this a position counts as simple |
/// | `critical_complexity_cp` | 120 | above this a position counts as critical |
/// | `large_loss_dp` | -0.12 | practical Δp below this is a large loss |
/// | `good_gain_dp` | 0.08 | practical Δp above this is a meaningful gain |
/// | `near_zero_dp` | 0.03 | within this Δp counts as approximately zero |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelThresholds {
    pub snap_secs: f32,
    pub rushed_secs: f32,
    pub excessive_secs: f32,
    pub simple_complexity_cp: i32,
    pub critical_complexity_cp: i32,
    pub large_loss_dp: f32,
    pub good_gain_dp: f32,
    pub near_zero_dp: f32,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            snap_secs: 1.0,
            rushed_secs: 5.0,
            excessive_secs: 30.0,
            simple_complexity_cp: 40,
            critical_complexity_cp: 120,
            large_loss_dp: -0.12,
            good_gain_dp: 0.08,
            near_zero_dp: 0.03,
        }
    }
}

/// Phase segmentation cutoffs.
///
/// Opening covers the first `opening_plies` plies (default 20, typical
/// book length). Endgame starts at the first ply where both sides'
/// non-pawn material is at or below `endgame_material_cp` (default
/// 1300, roughly rook plus two minor pieces); when no FEN in the game
/// is parseable, the fallback is ply `endgame_ply_fallback` (default
/// 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub opening_plies: u32,
    pub endgame_material_cp: i32,
    pub endgame_ply_fallback: u32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            opening_plies: 20,
            endgame_material_cp: 1300,
            endgame_ply_fallback: 60,
        }
    }
}

/// Full configuration of one analysis run.
///
/// Time-equity tunables:
///
/// - `alpha` (default 2.0): centipawns of time equity per second of
///   clock differential, before the ceiling
/// - `beta` (default 150.0): asymptotic ceiling (cp) for tau magnitude
/// - `k_sigmoid` (default 1.2): logistic steepness for cp → probability
/// - `time_pressure_pivot` (default 30.0): clock seconds below which
///   pressure amplification and time-trouble counting activate
/// - `time_pressure_scale` (default 8.0): smoothing width of the
///   pressure curve
/// - `time_pressure_boost` (default 3.0): maximum extra amplification
///   under pressure (multiplier tends to `1 + boost`)
///
/// `time_control` overrides the time control detected from game
/// headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub engine: EngineOptions,
    pub time_control: Option<TimeControl>,
    pub alpha: f32,
    pub beta: f32,
    pub k_sigmoid: f32,
    pub time_pressure_pivot: f32,
    pub time_pressure_scale: f32,
    pub time_pressure_boost: f32,
    pub labels: LabelThresholds,
    pub phases: PhaseConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            time_control: None,
            alpha: 2.0,
            beta: 150.0,
            k_sigmoid: 1.2,
            time_pressure_pivot: 30.0,
            time_pressure_scale: 8.0,
            time_pressure_boost: 3.0,
            labels: LabelThresholds::default(),
            phases: PhaseConfig::default(),
        }
    }
}

/// Configuration values out of valid range.
///
/// Checked by [`AnalysisConfig::validate`] before any per-ply
/// computation begins, so a bad parameter never surfaces as a numeric
/// artifact mid-run.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("beta must be a positive ceiling, got {value}")]
    NonPositiveBeta { value: f32 },
    #[display("k_sigmoid must be positive, got {value}")]
    NonPositiveSteepness { value: f32 },
    #[display("alpha must be non-negative, got {value}")]
    NegativeAlpha { value: f32 },
    #[display("time_pressure_pivot must be non-negative, got {value}")]
    NegativePivot { value: f32 },
    #[display("time_pressure_scale must be positive, got {value}")]
    NonPositiveScale { value: f32 },
    #[display("time_pressure_boost must be non-negative, got {value}")]
    NegativeBoost { value: f32 },
    #[display("label thresholds inconsistent: {detail}")]
    InvalidLabelThresholds { detail: String },
    #[display("phase cutoffs inconsistent: {detail}")]
    InvalidPhaseConfig { detail: String },
}

impl AnalysisConfig {
    /// Checks every tunable for validity.
    ///
    /// Comparisons are written so that NaN fails too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.beta > 0.0) {
            return Err(ConfigError::NonPositiveBeta { value: self.beta });
        }
        if !(self.k_sigmoid > 0.0) {
            return Err(ConfigError::NonPositiveSteepness {
                value: self.k_sigmoid,
            });
        }
        if !(self.alpha >= 0.0) {
            return Err(ConfigError::NegativeAlpha { value: self.alpha });
        }
        if !(self.time_pressure_pivot >= 0.0) {
            return Err(ConfigError::NegativePivot {
                value: self.time_pressure_pivot,
            });
        }
        if !(self.time_pressure_scale > 0.0) {
            return Err(ConfigError::NonPositiveScale {
                value: self.time_pressure_scale,
            });
        }
        if !(self.time_pressure_boost >= 0.0) {
            return Err(ConfigError::NegativeBoost {
                value: self.time_pressure_boost,
            });
        }
        self.labels.validate()?;
        self.phases.validate()?;
        Ok(())
    }
}

impl LabelThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        let err = |detail: &str| ConfigError::InvalidLabelThresholds {
            detail: detail.to_string(),
        };
        if !(self.snap_secs >= 0.0 && self.snap_secs <= self.rushed_secs) {
            return Err(err("snap_secs must be in [0, rushed_secs]"));
        }
        if !(self.rushed_secs <= self.excessive_secs) {
            return Err(err("rushed_secs must not exceed excessive_secs"));
        }
        if self.simple_complexity_cp >= self.critical_complexity_cp {
            return Err(err(
                "simple_complexity_cp must be below critical_complexity_cp",
            ));
        }
        if !(self.large_loss_dp < 0.0) {
            return Err(err("large_loss_dp must be negative"));
        }
        if !(self.good_gain_dp > 0.0) {
            return Err(err("good_gain_dp must be positive"));
        }
        if !(self.near_zero_dp >= 0.0) {
            return Err(err("near_zero_dp must be non-negative"));
        }
        Ok(())
    }
}

impl PhaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let err = |detail: &str| ConfigError::InvalidPhaseConfig {
            detail: detail.to_string(),
        };
        if self.endgame_material_cp < 0 {
            return Err(err("endgame_material_cp must be non-negative"));
        }
        if self.endgame_ply_fallback <= self.opening_plies {
            return Err(err("endgame_ply_fallback must come after opening_plies"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AnalysisConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_beta_is_rejected() {
        let config = AnalysisConfig {
            beta: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveBeta { .. })
        ));
    }

    #[test]
    fn negative_pivot_is_rejected() {
        let config = AnalysisConfig {
            time_pressure_pivot: -1.0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativePivot { .. })
        ));
    }

    #[test]
    fn nan_steepness_is_rejected() {
        let config = AnalysisConfig {
            k_sigmoid: f32::NAN,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveSteepness { .. })
        ));
    }

    #[test]
    fn inverted_complexity_thresholds_are_rejected() {
        let config = AnalysisConfig {
            labels: LabelThresholds {
                simple_complexity_cp: 200,
                critical_complexity_cp: 100,
                ..LabelThresholds::default()
            },
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLabelThresholds { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
