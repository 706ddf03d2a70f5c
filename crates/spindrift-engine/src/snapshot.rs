//! Session snapshot exchanged with the external persistence collaborator.
//!
//! The core accepts a reloaded influence map and confirmed log verbatim as
//! its initial state; it never re-derives them.

use serde::{Deserialize, Serialize};

use spindrift_core::config::SpindriftConfig;
use spindrift_core::errors::SnapshotError;
use spindrift_core::types::SpinRecord;

use crate::influence::InfluenceMap;

/// Everything the persistence layer stores between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub history: Vec<SpinRecord>,
    /// Confirmed winning numbers, oldest first.
    pub confirmed_log: Vec<u8>,
    pub influences: InfluenceMap,
    pub config: SpindriftConfig,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Serialize)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Deserialize)
    }
}
