//! Severity model: loss-streak normalization against long-horizon maxima.

pub mod normalizer;
pub mod state;
pub mod tracker;

pub use normalizer::{
    aggregate, confidence_modifier, level_for, normalize, ModifierPolicy, SeverityAssessment,
    SeverityLevel,
};
pub use state::{DataSource, SeverityState};
pub use tracker::{ExternalSeverityReport, SeverityTracker};
