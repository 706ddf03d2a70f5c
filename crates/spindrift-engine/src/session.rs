//! Session: the stateful context that owns one spin history and drives
//! the score/resolve cycle.
//!
//! All mutation funnels through `begin_cycle` and `resolve_cycle`, in
//! strict alternation. Replay drives the exact same two operations with
//! the predictor disabled, which is what makes a replayed session
//! behaviourally identical to the live one it reconstructs.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use spindrift_core::config::SpindriftConfig;
use spindrift_core::errors::EngineError;
use spindrift_core::events::{
    CycleStartedEvent, DataQualityEvent, DriftWarningEvent, EventDispatcher,
    OutcomeResolvedEvent, RecommendationEvent, ReplayCompleteEvent, SpinEventHandler,
};
use spindrift_core::types::{validate_number, RecommendationDetails, SpinRecord};

use crate::influence::InfluenceMap;
use crate::monitors;
use crate::outcome::{self, FailureTracker};
use crate::predictor::{Predictor, PredictorOpinion, PredictorRequest};
use crate::scoring::{
    score, BoardStats, ContextFlags, NeighbourScores, RecommendationResult, ScoreInputs,
    TrendStats,
};
use crate::severity::{ExternalSeverityReport, SeverityTracker};
use crate::snapshot::SessionSnapshot;

/// One live scoring session. Cloning yields an independent session that
/// shares only the registered event handlers.
#[derive(Clone)]
pub struct Session {
    config: SpindriftConfig,
    dispatcher: EventDispatcher,
    history: Vec<SpinRecord>,
    /// Confirmed winning numbers, oldest first. The replay input.
    confirmed_log: Vec<u8>,
    influences: InfluenceMap,
    severity: SeverityTracker,
    failures: FailureTracker,
    flags: ContextFlags,
    next_sequence_id: u64,
}

impl Session {
    pub fn new(config: SpindriftConfig) -> Self {
        let severity = SeverityTracker::new(&config.severity);
        Self {
            config,
            dispatcher: EventDispatcher::new(),
            history: Vec::new(),
            confirmed_log: Vec::new(),
            influences: InfluenceMap::neutral(),
            severity,
            failures: FailureTracker::new(),
            flags: ContextFlags::default(),
            next_sequence_id: 1,
        }
    }

    /// Restore a session from a persisted snapshot. The influence map and
    /// confirmed log are adopted verbatim; derived caches (severity,
    /// failure state, monitor flags) are rebuilt from them.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let SessionSnapshot {
            history,
            confirmed_log,
            influences,
            config,
        } = snapshot;

        let mut severity = SeverityTracker::new(&config.severity);
        severity.recompute_from_window(&confirmed_log, &config.severity);
        let failures = FailureTracker::resume(&history);
        let flags = monitors::derive_flags(&history, &config.monitors);
        let next_sequence_id = history.iter().map(|r| r.sequence_id).max().unwrap_or(0) + 1;

        info!(
            records = history.len(),
            confirmed = confirmed_log.len(),
            "session restored from snapshot"
        );
        Self {
            config,
            dispatcher: EventDispatcher::new(),
            history,
            confirmed_log,
            influences,
            severity,
            failures,
            flags,
            next_sequence_id,
        }
    }

    pub fn register_handler(&mut self, handler: Arc<dyn SpinEventHandler>) {
        self.dispatcher.register(handler);
    }

    pub fn config(&self) -> &SpindriftConfig {
        &self.config
    }

    pub fn history(&self) -> &[SpinRecord] {
        &self.history
    }

    pub fn confirmed_log(&self) -> &[u8] {
        &self.confirmed_log
    }

    pub fn influences(&self) -> &InfluenceMap {
        &self.influences
    }

    pub fn severity(&self) -> &SeverityTracker {
        &self.severity
    }

    pub fn context_flags(&self) -> &ContextFlags {
        &self.flags
    }

    pub fn pending_record(&self) -> Option<&SpinRecord> {
        self.history.last().filter(|r| r.is_pending())
    }

    pub fn last_winning_number(&self) -> Option<u8> {
        self.confirmed_log.last().copied()
    }

    /// Record a confirmed spin that resolves no cycle, such as the first
    /// spins of a session before enough history exists to score. The
    /// number still enters the confirmed log and the severity window.
    pub fn seed_spin(&mut self, winning_number: u8) -> Result<(), EngineError> {
        validate_number(winning_number)?;
        if let Some(pending) = self.pending_record() {
            return Err(EngineError::CyclePending {
                sequence_id: pending.sequence_id,
            });
        }
        self.confirmed_log.push(winning_number);
        self.severity.note_spin(winning_number, &self.config.severity);
        Ok(())
    }

    /// Score a new cycle for the input pair, optionally with an external
    /// predictor opinion already in hand.
    ///
    /// Influence decay runs exactly once here, before scoring, so that a
    /// cycle's scores always see the decayed map.
    pub fn begin_cycle(
        &mut self,
        input_a: u8,
        input_b: u8,
        predictor: Option<&PredictorOpinion>,
    ) -> Result<RecommendationResult, EngineError> {
        validate_number(input_a)?;
        validate_number(input_b)?;
        if let Some(pending) = self.pending_record() {
            return Err(EngineError::CyclePending {
                sequence_id: pending.sequence_id,
            });
        }

        self.influences.decay(&self.config.influence);

        let trend = TrendStats::compute(&self.history);
        let board = BoardStats::compute(
            &self.history,
            self.config.scoring.effective_hot_zone_window(),
        );
        let last_winning = self.last_winning_number();
        let neighbours = NeighbourScores::compute(input_a, input_b, last_winning);

        let result = score(&ScoreInputs {
            trend: &trend,
            board: &board,
            neighbours: &neighbours,
            input_a,
            input_b,
            influences: &self.influences,
            last_winning,
            severity: &self.severity,
            flags: &self.flags,
            predictor,
            config: &self.config,
        });

        let sequence_id = self.next_sequence_id;
        self.next_sequence_id += 1;

        let mut record = SpinRecord::pending(sequence_id, input_a, input_b);
        if result.signal.is_play() {
            record.recommended_group = result.best_candidate;
        }
        record.details = Some(RecommendationDetails {
            final_score: result.final_score,
            signal: result.signal,
            primary_factor: result.primary_factor,
            terms: result
                .breakdown
                .iter()
                .find(|c| Some(c.group) == result.best_candidate)
                .map(|c| c.terms.clone())
                .unwrap_or_default(),
            reason: result.reason.clone(),
            radius: result
                .breakdown
                .iter()
                .find(|c| Some(c.group) == result.best_candidate)
                .map(|c| c.radius)
                .unwrap_or_else(|| self.config.scoring.effective_base_neighbour_radius()),
            predictor_used: predictor.is_some(),
        });
        self.history.push(record);

        self.dispatcher.emit_cycle_started(&CycleStartedEvent {
            sequence_id,
            input_a,
            input_b,
        });
        self.dispatcher.emit_recommendation(&RecommendationEvent {
            sequence_id,
            best_candidate: result.best_candidate,
            final_score: result.final_score,
            signal: result.signal,
            primary_factor: result.primary_factor,
        });

        Ok(result)
    }

    /// Score a new cycle, consulting the configured predictor first. The
    /// consultation is bounded by the configured timeout; expiry or a
    /// disabled predictor degrades to scoring without that factor.
    pub fn begin_cycle_consulting(
        &mut self,
        input_a: u8,
        input_b: u8,
        predictor: &dyn Predictor,
    ) -> Result<RecommendationResult, EngineError> {
        let opinion = if self.config.predictor.effective_enabled() {
            let deadline = Duration::from_millis(self.config.predictor.effective_timeout_ms());
            let request = PredictorRequest {
                history: self.confirmed_log.clone(),
            };
            predictor.consult(request, deadline)
        } else {
            None
        };
        if opinion.is_none() {
            debug!("no predictor opinion for this cycle");
        }
        self.begin_cycle(input_a, input_b, opinion.as_ref())
    }

    /// Attach the winning number to the pending cycle and evaluate it.
    pub fn resolve_cycle(&mut self, winning_number: u8) -> Result<&SpinRecord, EngineError> {
        validate_number(winning_number)?;
        if self.pending_record().is_none() {
            return Err(EngineError::NoPendingCycle);
        }

        // Trend at decision time: the pending record contributes nothing
        // to resolved statistics, so the full history is equivalent.
        let trend = TrendStats::compute(&self.history);
        let index = self.history.len() - 1;
        let record = &mut self.history[index];
        outcome::resolve(record, winning_number, &trend, &self.config)?;
        self.failures.classify(record);

        let success = record.is_success();
        let sequence_id = record.sequence_id;
        if let (Some(_), Some(details)) = (record.recommended_group, record.details.as_ref()) {
            self.influences.apply_outcome(
                details.primary_factor,
                success,
                details.final_score,
                &self.config.influence,
            );
        }

        self.confirmed_log.push(winning_number);
        self.severity.note_spin(winning_number, &self.config.severity);

        let rolling = monitors::rolling::assess(&self.history, &self.config.monitors);
        let shift = monitors::factor_shift::assess(&self.history, &self.config.monitors);
        if rolling.warning {
            self.dispatcher.emit_drift_warning(&DriftWarningEvent {
                monitor: "rolling_performance",
                message: format!(
                    "win rate {:.0}% over {} plays, {} consecutive losses",
                    rolling.rolling_win_rate * 100.0,
                    rolling.plays,
                    rolling.consecutive_losses
                ),
            });
        }
        if shift.drifting {
            self.dispatcher.emit_drift_warning(&DriftWarningEvent {
                monitor: "factor_shift",
                message: format!(
                    "dominant share {:.0}%, concentration {:.2}",
                    shift.dominance_share * 100.0,
                    shift.concentration
                ),
            });
        }
        self.flags = monitors::flags_from(&rolling, &shift);

        self.dispatcher.emit_outcome_resolved(&OutcomeResolvedEvent {
            sequence_id,
            winning_number,
            success,
        });

        Ok(&self.history[index])
    }

    /// Discard a pending cycle without resolving it. The influence decay
    /// already applied for that cycle is not undone.
    pub fn discard_pending(&mut self) -> Option<SpinRecord> {
        if self.pending_record().is_some() {
            self.history.pop()
        } else {
            None
        }
    }

    /// Feed an external severity calibration report into the tracker.
    /// Partial or empty coverage is reported as a data-quality condition
    /// and the affected states keep their window-derived values.
    pub fn set_external_severity(&mut self, report: &ExternalSeverityReport) -> usize {
        let offered = report.numbers.len() + report.sectors.len();
        let applied = self.severity.apply_external(report);
        if applied < offered {
            let message = format!(
                "external severity report partially applied ({applied} of {offered} entries)"
            );
            warn!("{message}");
            self.dispatcher
                .emit_data_quality(&DataQualityEvent { message });
        }
        applied
    }

    /// Swap in a new configuration and re-simulate the confirmed log under
    /// it, so the adaptive state stays consistent with the settings.
    pub fn reconfigure(&mut self, config: SpindriftConfig) -> Result<(), EngineError> {
        self.config = config;
        self.resimulate()
    }

    /// Rebuild the entire adaptive state by replaying the confirmed log
    /// under the current configuration. A pending cycle, if any, is
    /// re-scored at the end with the same input pair.
    pub fn resimulate(&mut self) -> Result<(), EngineError> {
        let pending = self.pending_record().map(|r| (r.input_a, r.input_b));
        let spins = std::mem::take(&mut self.confirmed_log);
        let synthetic = crate::replay::replay_preserving(&self.config, &spins, pending)?;

        self.history = synthetic.records;
        self.influences = synthetic.influences;
        self.confirmed_log = synthetic.confirmed_log;
        self.severity.reset(&self.config.severity);
        self.severity
            .recompute_from_window(&self.confirmed_log, &self.config.severity);
        self.failures = FailureTracker::resume(&self.history);
        self.flags = monitors::derive_flags(&self.history, &self.config.monitors);
        self.next_sequence_id = self
            .history
            .iter()
            .map(|r| r.sequence_id)
            .max()
            .unwrap_or(0)
            + 1;

        info!(
            spins = self.confirmed_log.len(),
            records = self.history.len(),
            "session re-simulated"
        );
        self.dispatcher.emit_replay_complete(&ReplayCompleteEvent {
            spins: self.confirmed_log.len(),
            records: self.history.len(),
        });
        Ok(())
    }

    /// Capture everything the persistence layer needs to restore this
    /// session later.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            history: self.history.clone(),
            confirmed_log: self.confirmed_log.clone(),
            influences: self.influences.clone(),
            config: self.config.clone(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("records", &self.history.len())
            .field("confirmed", &self.confirmed_log.len())
            .field("next_sequence_id", &self.next_sequence_id)
            .finish()
    }
}
