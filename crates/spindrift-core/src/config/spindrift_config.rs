//! Top-level Spindrift configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{InfluenceConfig, MonitorConfig, PredictorConfig, ScoringConfig, SeverityConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SPINDRIFT_*`)
/// 2. Project config (`spindrift.toml` in the session root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpindriftConfig {
    pub scoring: ScoringConfig,
    pub influence: InfluenceConfig,
    pub severity: SeverityConfig,
    pub monitors: MonitorConfig,
    pub predictor: PredictorConfig,
}

impl SpindriftConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("spindrift.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SpindriftConfig) -> Result<(), ConfigError> {
        validate_thresholds(
            "severity.number_thresholds",
            &config.severity.effective_number_thresholds(),
        )?;
        validate_thresholds(
            "severity.sector_thresholds",
            &config.severity.effective_sector_thresholds(),
        )?;

        let min = config.influence.effective_min_influence();
        let max = config.influence.effective_max_influence();
        if min <= 0.0 || min >= max {
            return Err(ConfigError::ValidationFailed {
                field: "influence.min_influence".to_string(),
                message: format!("must satisfy 0 < min < max (got min={min}, max={max})"),
            });
        }

        let decay = config.influence.effective_decay_factor();
        if !(0.0..1.0).contains(&decay) || decay == 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "influence.decay_factor".to_string(),
                message: format!("must be in (0, 1), got {decay}"),
            });
        }

        if config.scoring.effective_play_threshold()
            > config.scoring.effective_strong_play_threshold()
        {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.play_threshold".to_string(),
                message: "must not exceed strong_play_threshold".to_string(),
            });
        }

        if config.scoring.effective_base_neighbour_radius() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.base_neighbour_radius".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if config.monitors.effective_rolling_window() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "monitors.rolling_window".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if config.severity.effective_window_cap() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "severity.window_cap".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SpindriftConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: SpindriftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut SpindriftConfig, other: &SpindriftConfig) {
        // Scoring
        if other.scoring.weight_hit_rate.is_some() {
            base.scoring.weight_hit_rate = other.scoring.weight_hit_rate;
        }
        if other.scoring.weight_streak.is_some() {
            base.scoring.weight_streak = other.scoring.weight_streak;
        }
        if other.scoring.weight_proximity.is_some() {
            base.scoring.weight_proximity = other.scoring.weight_proximity;
        }
        if other.scoring.weight_hot_zone.is_some() {
            base.scoring.weight_hot_zone = other.scoring.weight_hot_zone;
        }
        if other.scoring.weight_severity.is_some() {
            base.scoring.weight_severity = other.scoring.weight_severity;
        }
        if other.scoring.weight_predictor.is_some() {
            base.scoring.weight_predictor = other.scoring.weight_predictor;
        }
        if other.scoring.play_threshold.is_some() {
            base.scoring.play_threshold = other.scoring.play_threshold;
        }
        if other.scoring.strong_play_threshold.is_some() {
            base.scoring.strong_play_threshold = other.scoring.strong_play_threshold;
        }
        if other.scoring.less_strict_delta.is_some() {
            base.scoring.less_strict_delta = other.scoring.less_strict_delta;
        }
        if other.scoring.less_strict.is_some() {
            base.scoring.less_strict = other.scoring.less_strict;
        }
        if other.scoring.base_neighbour_radius.is_some() {
            base.scoring.base_neighbour_radius = other.scoring.base_neighbour_radius;
        }
        if other.scoring.hot_zone_window.is_some() {
            base.scoring.hot_zone_window = other.scoring.hot_zone_window;
        }
        if !other.scoring.enabled_groups.is_empty() {
            base.scoring.enabled_groups = other.scoring.enabled_groups.clone();
        }

        // Influence
        if other.influence.min_influence.is_some() {
            base.influence.min_influence = other.influence.min_influence;
        }
        if other.influence.max_influence.is_some() {
            base.influence.max_influence = other.influence.max_influence;
        }
        if other.influence.decay_factor.is_some() {
            base.influence.decay_factor = other.influence.decay_factor;
        }
        if other.influence.success_rate.is_some() {
            base.influence.success_rate = other.influence.success_rate;
        }
        if other.influence.failure_rate.is_some() {
            base.influence.failure_rate = other.influence.failure_rate;
        }
        if other.influence.confidence_min_threshold.is_some() {
            base.influence.confidence_min_threshold = other.influence.confidence_min_threshold;
        }
        if other.influence.confidence_multiplier.is_some() {
            base.influence.confidence_multiplier = other.influence.confidence_multiplier;
        }

        // Severity
        if !other.severity.number_thresholds.is_empty() {
            base.severity.number_thresholds = other.severity.number_thresholds.clone();
        }
        if !other.severity.sector_thresholds.is_empty() {
            base.severity.sector_thresholds = other.severity.sector_thresholds.clone();
        }
        if other.severity.default_number_max.is_some() {
            base.severity.default_number_max = other.severity.default_number_max;
        }
        if other.severity.default_voisins_max.is_some() {
            base.severity.default_voisins_max = other.severity.default_voisins_max;
        }
        if other.severity.default_tiers_max.is_some() {
            base.severity.default_tiers_max = other.severity.default_tiers_max;
        }
        if other.severity.default_orphelins_max.is_some() {
            base.severity.default_orphelins_max = other.severity.default_orphelins_max;
        }
        if other.severity.window_cap.is_some() {
            base.severity.window_cap = other.severity.window_cap;
        }
        if other.severity.boost_max.is_some() {
            base.severity.boost_max = other.severity.boost_max;
        }
        if other.severity.dampen_max.is_some() {
            base.severity.dampen_max = other.severity.dampen_max;
        }

        // Monitors
        if other.monitors.rolling_window.is_some() {
            base.monitors.rolling_window = other.monitors.rolling_window;
        }
        if other.monitors.min_win_rate.is_some() {
            base.monitors.min_win_rate = other.monitors.min_win_rate;
        }
        if other.monitors.max_consecutive_losses.is_some() {
            base.monitors.max_consecutive_losses = other.monitors.max_consecutive_losses;
        }
        if other.monitors.factor_shift_window.is_some() {
            base.monitors.factor_shift_window = other.monitors.factor_shift_window;
        }
        if other.monitors.dominance_share.is_some() {
            base.monitors.dominance_share = other.monitors.dominance_share;
        }
        if other.monitors.diversity_threshold.is_some() {
            base.monitors.diversity_threshold = other.monitors.diversity_threshold;
        }

        // Predictor
        if other.predictor.enabled.is_some() {
            base.predictor.enabled = other.predictor.enabled;
        }
        if other.predictor.timeout_ms.is_some() {
            base.predictor.timeout_ms = other.predictor.timeout_ms;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SPINDRIFT_SCORING_PLAY_THRESHOLD`, `SPINDRIFT_PREDICTOR_TIMEOUT_MS`, etc.
    fn apply_env_overrides(config: &mut SpindriftConfig) {
        if let Ok(val) = std::env::var("SPINDRIFT_SCORING_PLAY_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.scoring.play_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPINDRIFT_SCORING_LESS_STRICT") {
            if let Ok(v) = val.parse::<bool>() {
                config.scoring.less_strict = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPINDRIFT_INFLUENCE_DECAY_FACTOR") {
            if let Ok(v) = val.parse::<f64>() {
                config.influence.decay_factor = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPINDRIFT_SEVERITY_WINDOW_CAP") {
            if let Ok(v) = val.parse::<usize>() {
                config.severity.window_cap = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPINDRIFT_MONITORS_ROLLING_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.monitors.rolling_window = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPINDRIFT_PREDICTOR_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.predictor.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SPINDRIFT_PREDICTOR_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.predictor.timeout_ms = Some(v);
            }
        }
    }
}

/// Threshold lists must be strictly increasing and inside (0, 1).
fn validate_thresholds(field: &str, thresholds: &[f64]) -> Result<(), ConfigError> {
    if thresholds.is_empty() {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    for pair in thresholds.windows(2) {
        if pair[0] >= pair[1] {
            return Err(ConfigError::ValidationFailed {
                field: field.to_string(),
                message: "must be strictly increasing".to_string(),
            });
        }
    }
    if thresholds.iter().any(|&t| !(0.0..1.0).contains(&t) || t == 0.0) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "every boundary must be inside (0, 1)".to_string(),
        });
    }
    Ok(())
}
