//! Event handler trait with no-op defaults.

use super::types::*;

/// Observer for session lifecycle events. Every method defaults to a no-op
/// so handlers implement only what they care about.
pub trait SpinEventHandler: Send + Sync {
    fn on_cycle_started(&self, _event: &CycleStartedEvent) {}
    fn on_recommendation(&self, _event: &RecommendationEvent) {}
    fn on_outcome_resolved(&self, _event: &OutcomeResolvedEvent) {}
    fn on_drift_warning(&self, _event: &DriftWarningEvent) {}
    fn on_data_quality(&self, _event: &DataQualityEvent) {}
    fn on_replay_complete(&self, _event: &ReplayCompleteEvent) {}
}
