//! Session lifecycle events: handler trait, payloads, synchronous dispatch.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::SpinEventHandler;
pub use types::{
    CycleStartedEvent, DataQualityEvent, DriftWarningEvent, OutcomeResolvedEvent,
    RecommendationEvent, ReplayCompleteEvent,
};
