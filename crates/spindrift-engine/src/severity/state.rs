//! Per-entity severity state.

use serde::{Deserialize, Serialize};

/// Where an entity's severity figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Conservative compiled defaults; no session data seen yet.
    Defaults,
    /// Streaks recomputed from the session spin window.
    Calculated,
    /// Historical maximum supplied by the external statistics provider.
    External,
}

/// Loss-streak state for one entity (a number or a sector).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityState {
    /// Spins since this entity last occurred.
    pub current_loss_streak: u32,
    /// Longest known non-appearance streak; external data always wins.
    pub historical_max: u32,
    pub is_externally_calibrated: bool,
    pub data_source: DataSource,
}

impl SeverityState {
    /// Fresh state with a conservative default maximum.
    pub fn with_default_max(historical_max: u32) -> Self {
        Self {
            current_loss_streak: 0,
            historical_max: historical_max.max(1),
            is_externally_calibrated: false,
            data_source: DataSource::Defaults,
        }
    }

    /// Overwrite with externally supplied figures. External always wins and
    /// stays distinguishable from default-derived entries.
    pub fn calibrate_external(&mut self, current_loss_streak: u32, historical_max: u32) {
        self.current_loss_streak = current_loss_streak;
        self.historical_max = historical_max.max(1);
        self.is_externally_calibrated = true;
        self.data_source = DataSource::External;
    }

    /// Severity ratio, clamped to [0, 1].
    pub fn ratio(&self) -> f64 {
        (self.current_loss_streak as f64 / self.historical_max as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_clamps_at_one() {
        let mut state = SeverityState::with_default_max(10);
        state.current_loss_streak = 10;
        assert_eq!(state.ratio(), 1.0);
        state.current_loss_streak = 25;
        assert_eq!(state.ratio(), 1.0);
    }

    #[test]
    fn external_calibration_is_tracked() {
        let mut state = SeverityState::with_default_max(180);
        assert_eq!(state.data_source, DataSource::Defaults);
        state.calibrate_external(12, 140);
        assert!(state.is_externally_calibrated);
        assert_eq!(state.data_source, DataSource::External);
        assert_eq!(state.historical_max, 140);
    }

    #[test]
    fn zero_max_is_coerced_to_one() {
        let state = SeverityState::with_default_max(0);
        assert_eq!(state.historical_max, 1);
    }
}
