//! Spin records: one evaluated pair-of-inputs cycle and its resolution.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::factor::{Factor, Signal};
use super::group::GroupKind;

/// Lifecycle status of a spin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinStatus {
    /// Scored, awaiting the winning number.
    Pending,
    /// Winning number arrived and the record was evaluated.
    Resolved,
}

/// How a resolved record failed relative to the last successful play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// The record succeeded (or is still pending).
    None,
    /// Loss with no prior successful group known, or nothing recommended.
    NormalLoss,
    /// The previously winning group was recommended again and missed.
    StreakBreak,
    /// A different group than the last winner was recommended and missed.
    SectionShift,
}

/// One factor's contribution to a candidate's total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorTerm {
    pub factor: Factor,
    /// Signed contribution after weighting and influence scaling.
    pub value: f64,
}

/// Decision-time snapshot of the score breakdown for the chosen candidate.
/// Immutable once written; the evaluator only backfills the outcome fields
/// on the owning record, never this snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationDetails {
    pub final_score: f64,
    pub signal: Signal,
    pub primary_factor: Factor,
    /// Per-factor contributions for the chosen candidate, scoring order.
    pub terms: Vec<FactorTerm>,
    /// Human-readable justification derived from the same computation.
    pub reason: String,
    /// Neighbour radius the hit-zone was computed with at decision time.
    pub radius: u8,
    /// Whether an external predictor opinion contributed a term.
    pub predictor_used: bool,
}

/// One evaluated pair-of-inputs cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Monotonic creation order; acts as the time axis.
    pub sequence_id: u64,
    pub input_a: u8,
    pub input_b: u8,
    pub status: SpinStatus,
    pub winning_number: Option<u8>,
    /// Candidate groups whose hit-zone contained the winning number.
    pub hit_groups: SmallVec<[GroupKind; 4]>,
    /// Top-ranked candidate at decision time, if any signal fired.
    pub recommended_group: Option<GroupKind>,
    pub details: Option<RecommendationDetails>,
    pub failure_mode: FailureMode,
}

impl SpinRecord {
    /// Create a fresh pending record for a new cycle.
    pub fn pending(sequence_id: u64, input_a: u8, input_b: u8) -> Self {
        Self {
            sequence_id,
            input_a,
            input_b,
            status: SpinStatus::Pending,
            winning_number: None,
            hit_groups: SmallVec::new(),
            recommended_group: None,
            details: None,
            failure_mode: FailureMode::None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SpinStatus::Pending
    }

    pub fn is_resolved(&self) -> bool {
        self.status == SpinStatus::Resolved
    }

    /// A resolved record succeeded when the recommended group actually hit.
    /// Records with no recommendation count as failures.
    pub fn is_success(&self) -> bool {
        match self.recommended_group {
            Some(group) => self.is_resolved() && self.hit_groups.contains(&group),
            None => false,
        }
    }

    /// Whether this record carried a play signal at decision time.
    pub fn was_play(&self) -> bool {
        self.details
            .as_ref()
            .map(|d| d.signal.is_play())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_record_is_unresolved() {
        let r = SpinRecord::pending(1, 5, 12);
        assert!(r.is_pending());
        assert!(!r.is_success());
        assert_eq!(r.winning_number, None);
        assert_eq!(r.failure_mode, FailureMode::None);
    }

    #[test]
    fn success_requires_recommended_in_hits() {
        let mut r = SpinRecord::pending(1, 5, 12);
        r.status = SpinStatus::Resolved;
        r.winning_number = Some(7);
        r.recommended_group = Some(GroupKind::Difference);
        r.hit_groups.push(GroupKind::Difference);
        assert!(r.is_success());

        r.hit_groups.clear();
        r.hit_groups.push(GroupKind::Sum);
        assert!(!r.is_success());
    }
}
