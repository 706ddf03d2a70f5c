//! Snapshot (persistence hand-off) errors.

use super::error_code::{self, SpindriftErrorCode};

/// Errors raised while exchanging session snapshots with the external
/// persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize session snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize session snapshot: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl SpindriftErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Serialize(_) => error_code::SNAPSHOT_SERIALIZE,
            Self::Deserialize(_) => error_code::SNAPSHOT_DESERIALIZE,
        }
    }
}
