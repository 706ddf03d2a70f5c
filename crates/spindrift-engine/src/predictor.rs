//! External sequence predictor interface.
//!
//! The predictor is an opaque asynchronous collaborator consulted with a
//! deadline. Absence, timeout, or an untrained model all resolve to "no
//! opinion" — expected operation, never an error. Replay never consults
//! the predictor.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-number probabilities returned by the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorOpinion {
    #[serde(with = "serde_big_array")]
    pub per_number: [f64; 37],
}

// serde derives only cover arrays up to 32 elements.
mod serde_big_array {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[f64; 37], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 37], D::Error> {
        let values: Vec<f64> = Vec::deserialize(deserializer)?;
        values
            .try_into()
            .map_err(|v: Vec<f64>| D::Error::invalid_length(v.len(), &"37 probabilities"))
    }
}

impl PredictorOpinion {
    /// Probability mass the opinion assigns to a hit-zone.
    pub fn zone_mass(&self, zone: &[u8]) -> f64 {
        zone.iter()
            .filter(|&&n| n <= 36)
            .map(|&n| self.per_number[n as usize])
            .sum()
    }

    /// Uniform baseline mass for a zone of the same size.
    pub fn uniform_mass(zone_len: usize) -> f64 {
        zone_len as f64 / 37.0
    }
}

/// Consultation request: the confirmed spin history, oldest first.
#[derive(Debug, Clone)]
pub struct PredictorRequest {
    pub history: Vec<u8>,
}

/// Opaque predictor consulted once per live cycle.
pub trait Predictor: Send {
    /// Return an opinion within `deadline`, or `None` for "no opinion".
    fn consult(&self, request: PredictorRequest, deadline: Duration) -> Option<PredictorOpinion>;
}

/// A predictor that never has an opinion. Used when the predictor is
/// disabled and for every replay.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPredictor;

impl Predictor for NullPredictor {
    fn consult(&self, _request: PredictorRequest, _deadline: Duration) -> Option<PredictorOpinion> {
        None
    }
}

/// Bridge to a predictor worker running elsewhere, over channels.
/// The reply wait is bounded; expiry degrades to no opinion.
pub struct ChannelPredictor {
    requests: Sender<PredictorRequest>,
    replies: Receiver<Option<PredictorOpinion>>,
}

impl ChannelPredictor {
    pub fn new(
        requests: Sender<PredictorRequest>,
        replies: Receiver<Option<PredictorOpinion>>,
    ) -> Self {
        Self { requests, replies }
    }
}

impl Predictor for ChannelPredictor {
    fn consult(&self, request: PredictorRequest, deadline: Duration) -> Option<PredictorOpinion> {
        if self.requests.send(request).is_err() {
            debug!("predictor worker gone; no opinion");
            return None;
        }
        match self.replies.recv_timeout(deadline) {
            Ok(opinion) => opinion,
            Err(RecvTimeoutError::Timeout) => {
                debug!(?deadline, "predictor timed out; no opinion");
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
