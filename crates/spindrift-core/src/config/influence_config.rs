//! Adaptive influence learner configuration.

use serde::{Deserialize, Serialize};

/// Bounds and learning rates for the per-factor influence map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InfluenceConfig {
    /// Floor every multiplier is clamped to. Default: 0.5.
    pub min_influence: Option<f64>,
    /// Ceiling every multiplier is clamped to. Default: 2.0.
    pub max_influence: Option<f64>,
    /// Per-cycle forget factor, strictly below 1. Default: 0.98.
    pub decay_factor: Option<f64>,
    /// Base reinforcement on a successful outcome. Default: 0.05.
    pub success_rate: Option<f64>,
    /// Base penalty on a failed outcome. Default: 0.03.
    pub failure_rate: Option<f64>,
    /// Score above which confidence weighting kicks in. Default: 0.3.
    pub confidence_min_threshold: Option<f64>,
    /// Scale of the confidence-weighted bonus. Default: 0.1.
    pub confidence_multiplier: Option<f64>,
}

impl InfluenceConfig {
    pub fn effective_min_influence(&self) -> f64 {
        self.min_influence.unwrap_or(0.5)
    }

    pub fn effective_max_influence(&self) -> f64 {
        self.max_influence.unwrap_or(2.0)
    }

    pub fn effective_decay_factor(&self) -> f64 {
        self.decay_factor.unwrap_or(0.98)
    }

    pub fn effective_success_rate(&self) -> f64 {
        self.success_rate.unwrap_or(0.05)
    }

    pub fn effective_failure_rate(&self) -> f64 {
        self.failure_rate.unwrap_or(0.03)
    }

    pub fn effective_confidence_min_threshold(&self) -> f64 {
        self.confidence_min_threshold.unwrap_or(0.3)
    }

    pub fn effective_confidence_multiplier(&self) -> f64 {
        self.confidence_multiplier.unwrap_or(0.1)
    }
}
