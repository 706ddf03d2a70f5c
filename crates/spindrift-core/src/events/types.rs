//! Event payload types for the Spindrift session lifecycle.

use crate::types::{Factor, GroupKind, Signal};

/// Payload for `on_cycle_started`.
#[derive(Debug, Clone)]
pub struct CycleStartedEvent {
    pub sequence_id: u64,
    pub input_a: u8,
    pub input_b: u8,
}

/// Payload for `on_recommendation`.
#[derive(Debug, Clone)]
pub struct RecommendationEvent {
    pub sequence_id: u64,
    pub best_candidate: Option<GroupKind>,
    pub final_score: f64,
    pub signal: Signal,
    pub primary_factor: Factor,
}

/// Payload for `on_outcome_resolved`.
#[derive(Debug, Clone)]
pub struct OutcomeResolvedEvent {
    pub sequence_id: u64,
    pub winning_number: u8,
    pub success: bool,
}

/// Payload for `on_drift_warning`.
#[derive(Debug, Clone)]
pub struct DriftWarningEvent {
    /// Which monitor raised the warning ("rolling_performance" or "factor_shift").
    pub monitor: &'static str,
    pub message: String,
}

/// Payload for `on_data_quality`. Missing external severity data is a
/// data-quality condition, not a fault.
#[derive(Debug, Clone)]
pub struct DataQualityEvent {
    pub message: String,
}

/// Payload for `on_replay_complete`.
#[derive(Debug, Clone)]
pub struct ReplayCompleteEvent {
    pub spins: usize,
    pub records: usize,
}
