//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::SpinEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec —
/// effectively zero cost.
/// Cloning shares the registered handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn SpinEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn SpinEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers. A panicking handler is
    /// isolated and does not prevent subsequent handlers from receiving
    /// the event.
    fn emit<F: Fn(&dyn SpinEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing");
            }
        }
    }

    pub fn emit_cycle_started(&self, event: &CycleStartedEvent) {
        self.emit(|h| h.on_cycle_started(event));
    }

    pub fn emit_recommendation(&self, event: &RecommendationEvent) {
        self.emit(|h| h.on_recommendation(event));
    }

    pub fn emit_outcome_resolved(&self, event: &OutcomeResolvedEvent) {
        self.emit(|h| h.on_outcome_resolved(event));
    }

    pub fn emit_drift_warning(&self, event: &DriftWarningEvent) {
        self.emit(|h| h.on_drift_warning(event));
    }

    pub fn emit_data_quality(&self, event: &DataQualityEvent) {
        self.emit(|h| h.on_data_quality(event));
    }

    pub fn emit_replay_complete(&self, event: &ReplayCompleteEvent) {
        self.emit(|h| h.on_replay_complete(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
