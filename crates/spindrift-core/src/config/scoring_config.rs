//! Scoring configuration: factor weights, signal thresholds, hit-zones.

use serde::{Deserialize, Serialize};

/// Configuration for the recommendation scorer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the historical hit-rate term. Default: 1.0.
    pub weight_hit_rate: Option<f64>,
    /// Weight of the hit/miss streak term. Default: 0.6.
    pub weight_streak: Option<f64>,
    /// Weight of the wheel-proximity term. Default: 0.8.
    pub weight_proximity: Option<f64>,
    /// Weight of the board hot-zone term. Default: 0.7.
    pub weight_hot_zone: Option<f64>,
    /// Weight of the contextual severity term. Default: 0.5.
    pub weight_severity: Option<f64>,
    /// Weight of the external predictor term. Default: 0.9.
    pub weight_predictor: Option<f64>,
    /// Score above which the signal is Play. Default: 0.15.
    pub play_threshold: Option<f64>,
    /// Score above which the signal is StrongPlay. Default: 0.45.
    pub strong_play_threshold: Option<f64>,
    /// Amount the "less strict" toggle lowers both thresholds. Default: 0.05.
    pub less_strict_delta: Option<f64>,
    /// Lower both thresholds by `less_strict_delta`. Default: false.
    pub less_strict: Option<bool>,
    /// Base neighbour radius for hit-zones. Default: 2.
    pub base_neighbour_radius: Option<u8>,
    /// How many recent winners feed the hot-zone statistic. Default: 12.
    pub hot_zone_window: Option<usize>,
    /// Candidate groups to score; empty means all. Names per `GroupKind`.
    #[serde(default)]
    pub enabled_groups: Vec<String>,
}

impl ScoringConfig {
    pub fn effective_weight_hit_rate(&self) -> f64 {
        self.weight_hit_rate.unwrap_or(1.0)
    }

    pub fn effective_weight_streak(&self) -> f64 {
        self.weight_streak.unwrap_or(0.6)
    }

    pub fn effective_weight_proximity(&self) -> f64 {
        self.weight_proximity.unwrap_or(0.8)
    }

    pub fn effective_weight_hot_zone(&self) -> f64 {
        self.weight_hot_zone.unwrap_or(0.7)
    }

    pub fn effective_weight_severity(&self) -> f64 {
        self.weight_severity.unwrap_or(0.5)
    }

    pub fn effective_weight_predictor(&self) -> f64 {
        self.weight_predictor.unwrap_or(0.9)
    }

    /// Play threshold after the less-strict toggle is applied.
    pub fn effective_play_threshold(&self) -> f64 {
        let base = self.play_threshold.unwrap_or(0.15);
        base - self.effective_less_strict_delta()
    }

    /// Strong-play threshold after the less-strict toggle is applied.
    pub fn effective_strong_play_threshold(&self) -> f64 {
        let base = self.strong_play_threshold.unwrap_or(0.45);
        base - self.effective_less_strict_delta()
    }

    fn effective_less_strict_delta(&self) -> f64 {
        if self.less_strict.unwrap_or(false) {
            self.less_strict_delta.unwrap_or(0.05)
        } else {
            0.0
        }
    }

    pub fn effective_base_neighbour_radius(&self) -> u8 {
        self.base_neighbour_radius.unwrap_or(2)
    }

    pub fn effective_hot_zone_window(&self) -> usize {
        self.hot_zone_window.unwrap_or(12)
    }
}
