//! Engine errors: cycle lifecycle and boundary validation.

use super::error_code::{self, SpindriftErrorCode};

/// Errors raised by the scoring/resolution cycle.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    /// Winning numbers outside [0,36] are rejected at the boundary and
    /// never enter the data model.
    #[error("Winning number {0} is outside the wheel range [0,36]")]
    InvalidWinningNumber(u8),

    /// A new cycle was requested while one is still awaiting its outcome.
    /// Recoverable: the caller resolves or discards the pending cycle first.
    #[error("A scoring cycle is already pending (sequence {sequence_id})")]
    CyclePending { sequence_id: u64 },

    /// An outcome arrived with no pending cycle to attach it to.
    #[error("No pending cycle to resolve")]
    NoPendingCycle,
}

impl SpindriftErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidWinningNumber(_) => error_code::INVALID_WINNING_NUMBER,
            Self::CyclePending { .. } => error_code::CYCLE_PENDING,
            Self::NoPendingCycle => error_code::NO_PENDING_CYCLE,
        }
    }
}
