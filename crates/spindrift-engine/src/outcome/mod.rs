//! Outcome evaluation: hit-group resolution and failure-mode classification.

use serde::{Deserialize, Serialize};

use spindrift_core::config::SpindriftConfig;
use spindrift_core::errors::EngineError;
use spindrift_core::types::{
    dynamic_radius, hit_zone, validate_number, FailureMode, GroupKind, SpinRecord, SpinStatus,
};

use crate::scoring::{enabled_kinds, TrendStats};

/// Resolve a record against the winning number.
///
/// Hit-groups are recomputed with each group's dynamic neighbour radius,
/// derived from the trend statistics in force at decision time (the history
/// does not change between scoring and resolution). Idempotent: a second
/// call with the same winning number changes nothing.
pub fn resolve(
    record: &mut SpinRecord,
    winning_number: u8,
    trend: &TrendStats,
    config: &SpindriftConfig,
) -> Result<(), EngineError> {
    validate_number(winning_number)?;

    record.winning_number = Some(winning_number);
    record.status = SpinStatus::Resolved;
    record.hit_groups.clear();
    for kind in enabled_kinds(config) {
        let base = kind.base_value(record.input_a, record.input_b);
        let radius = dynamic_radius(
            trend.group(kind).hit_rate,
            config.scoring.effective_base_neighbour_radius(),
        );
        if hit_zone(base, radius).contains(&winning_number) {
            record.hit_groups.push(kind);
        }
    }
    Ok(())
}

/// Walks resolved records chronologically, carrying the last successful
/// group to classify each failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureTracker {
    last_successful_group: Option<GroupKind>,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_successful_group(&self) -> Option<GroupKind> {
        self.last_successful_group
    }

    /// Rebuild the running state from an already-classified history, as
    /// when resuming from a snapshot.
    pub fn resume(history: &[SpinRecord]) -> Self {
        let last_successful_group = history
            .iter()
            .rev()
            .find(|r| r.is_success())
            .and_then(|r| r.recommended_group);
        Self {
            last_successful_group,
        }
    }

    /// Classify a freshly resolved record and update the running state.
    /// Only meaningful when records arrive in chronological order.
    pub fn classify(&mut self, record: &mut SpinRecord) {
        if !record.is_resolved() {
            return;
        }
        if record.is_success() {
            record.failure_mode = FailureMode::None;
            self.last_successful_group = record.recommended_group;
            return;
        }
        record.failure_mode = match (record.recommended_group, self.last_successful_group) {
            (Some(recommended), Some(last)) if recommended == last => FailureMode::StreakBreak,
            (Some(_), Some(_)) => FailureMode::SectionShift,
            _ => FailureMode::NormalLoss,
        };
    }
}
