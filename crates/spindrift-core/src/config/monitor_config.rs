//! Drift monitor configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the rolling-performance and factor-shift monitors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// How many play-signal records the rolling window gathers. Default: 10.
    pub rolling_window: Option<usize>,
    /// Win rate below which the rolling monitor warns. Default: 0.30.
    pub min_win_rate: Option<f64>,
    /// Consecutive-loss run at which the rolling monitor warns. Default: 5.
    pub max_consecutive_losses: Option<u32>,
    /// How many recent successful plays feed factor-shift. Default: 8.
    pub factor_shift_window: Option<usize>,
    /// Minimum share one factor must hold to count as dominant. Default: 0.40.
    pub dominance_share: Option<f64>,
    /// Concentration (sum of squared shares) below which drift flags. Default: 0.25.
    pub diversity_threshold: Option<f64>,
}

impl MonitorConfig {
    pub fn effective_rolling_window(&self) -> usize {
        self.rolling_window.unwrap_or(10)
    }

    pub fn effective_min_win_rate(&self) -> f64 {
        self.min_win_rate.unwrap_or(0.30)
    }

    pub fn effective_max_consecutive_losses(&self) -> u32 {
        self.max_consecutive_losses.unwrap_or(5)
    }

    pub fn effective_factor_shift_window(&self) -> usize {
        self.factor_shift_window.unwrap_or(8)
    }

    pub fn effective_dominance_share(&self) -> f64 {
        self.dominance_share.unwrap_or(0.40)
    }

    pub fn effective_diversity_threshold(&self) -> f64 {
        self.diversity_threshold.unwrap_or(0.25)
    }
}
