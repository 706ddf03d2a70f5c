//! External predictor configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the optional external sequence predictor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PredictorConfig {
    /// Consult the predictor during live cycles. Default: true.
    /// Replay always runs with the predictor disabled.
    pub enabled: Option<bool>,
    /// Consultation deadline in milliseconds. Default: 750.
    pub timeout_ms: Option<u64>,
}

impl PredictorConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(750)
    }
}
