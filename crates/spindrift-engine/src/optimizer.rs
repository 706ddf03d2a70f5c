//! Offline optimizer collaborator interface.
//!
//! The optimizer searches configuration space against a confirmed spin
//! log in the background. Its outcome is staged, never applied mid-cycle:
//! `StagedOutcome::apply_to` refuses while a cycle is pending, and
//! applying re-simulates the session under the winning configuration.
//! The search algorithm itself lives behind the [`Optimizer`] trait.

use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use tracing::{debug, info};

use spindrift_core::config::SpindriftConfig;
use spindrift_core::errors::EngineError;
use spindrift_core::traits::{Cancellable, CancellationToken};

use crate::session::Session;

/// Everything the optimizer needs: the replayable log and the settings to
/// improve on.
#[derive(Debug, Clone)]
pub struct OptimizerRequest {
    /// Confirmed winning numbers, oldest first.
    pub spins: Vec<u8>,
    pub current: SpindriftConfig,
}

/// Periodic progress report from a running search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerProgress {
    pub evaluated: usize,
    pub total: usize,
    pub best_fitness: f64,
}

/// A finished search result, staged until the caller applies it.
#[derive(Debug, Clone)]
pub struct StagedOutcome {
    pub config: SpindriftConfig,
    pub fitness: f64,
    pub evaluated: usize,
}

impl StagedOutcome {
    /// Apply the staged configuration between cycles. The session
    /// re-simulates its confirmed log under the new settings so the
    /// adaptive state stays consistent.
    pub fn apply_to(&self, session: &mut Session) -> Result<(), EngineError> {
        if let Some(pending) = session.pending_record() {
            return Err(EngineError::CyclePending {
                sequence_id: pending.sequence_id,
            });
        }
        info!(fitness = self.fitness, evaluated = self.evaluated, "applying staged outcome");
        session.reconfigure(self.config.clone())
    }
}

/// A configuration-space search strategy. Implementations must check the
/// token between evaluations; a cancelled run returns `None`.
pub trait Optimizer: Send {
    fn optimize(
        &self,
        request: OptimizerRequest,
        token: &dyn Cancellable,
        progress: &Sender<OptimizerProgress>,
    ) -> Option<StagedOutcome>;
}

/// Handle to a search running on a background thread.
pub struct OptimizerHandle {
    token: CancellationToken,
    progress: Receiver<OptimizerProgress>,
    outcome: Receiver<Option<StagedOutcome>>,
}

impl OptimizerHandle {
    /// Request a cooperative stop.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Drain any progress reports received since the last poll.
    pub fn poll_progress(&self) -> Vec<OptimizerProgress> {
        let mut reports = Vec::new();
        loop {
            match self.progress.try_recv() {
                Ok(report) => reports.push(report),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        reports
    }

    /// Block until the search finishes. `None` when it was cancelled or
    /// the worker died.
    pub fn wait(self) -> Option<StagedOutcome> {
        self.outcome.recv().ok().flatten()
    }
}

/// Run an optimizer on a background thread.
pub fn spawn(optimizer: impl Optimizer + 'static, request: OptimizerRequest) -> OptimizerHandle {
    let token = CancellationToken::new();
    let worker_token = token.clone();
    let (progress_tx, progress_rx) = unbounded();
    let (outcome_tx, outcome_rx) = bounded(1);

    thread::spawn(move || {
        let staged = optimizer.optimize(request, &worker_token, &progress_tx);
        if staged.is_none() {
            debug!("optimizer finished without an outcome");
        }
        let _ = outcome_tx.send(staged);
    });

    OptimizerHandle {
        token,
        progress: progress_rx,
        outcome: outcome_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluates nothing; returns the request's own configuration with a
    /// fixed fitness, reporting progress along the way.
    struct EchoOptimizer {
        steps: usize,
    }

    impl Optimizer for EchoOptimizer {
        fn optimize(
            &self,
            request: OptimizerRequest,
            token: &dyn Cancellable,
            progress: &Sender<OptimizerProgress>,
        ) -> Option<StagedOutcome> {
            for evaluated in 1..=self.steps {
                if token.is_cancelled() {
                    return None;
                }
                let _ = progress.send(OptimizerProgress {
                    evaluated,
                    total: self.steps,
                    best_fitness: 0.5,
                });
            }
            Some(StagedOutcome {
                config: request.current,
                fitness: 0.5,
                evaluated: self.steps,
            })
        }
    }

    #[test]
    fn spawned_search_reports_progress_and_finishes() {
        let handle = spawn(
            EchoOptimizer { steps: 3 },
            OptimizerRequest {
                spins: vec![5, 12, 7],
                current: SpindriftConfig::default(),
            },
        );
        let staged = handle.wait().unwrap();
        assert_eq!(staged.evaluated, 3);
    }

    #[test]
    fn cancelled_search_yields_no_outcome() {
        struct Blocking;
        impl Optimizer for Blocking {
            fn optimize(
                &self,
                _request: OptimizerRequest,
                token: &dyn Cancellable,
                _progress: &Sender<OptimizerProgress>,
            ) -> Option<StagedOutcome> {
                while !token.is_cancelled() {
                    thread::yield_now();
                }
                None
            }
        }
        let handle = spawn(
            Blocking,
            OptimizerRequest {
                spins: Vec::new(),
                current: SpindriftConfig::default(),
            },
        );
        handle.cancel();
        assert!(handle.wait().is_none());
    }

    #[test]
    fn staged_outcome_refuses_a_pending_cycle() {
        let mut session = Session::new(SpindriftConfig::default());
        session.begin_cycle(5, 12, None).unwrap();
        let staged = StagedOutcome {
            config: SpindriftConfig::default(),
            fitness: 1.0,
            evaluated: 1,
        };
        assert!(matches!(
            staged.apply_to(&mut session),
            Err(EngineError::CyclePending { sequence_id: 1 })
        ));

        session.resolve_cycle(7).unwrap();
        staged.apply_to(&mut session).unwrap();
    }
}
