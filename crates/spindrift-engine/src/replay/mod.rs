//! Replay engine: rebuild a full session state from a bare confirmed spin
//! sequence.
//!
//! Replay drives the exact operations a live session performs — score,
//! then resolve — for each window position, with the predictor disabled.
//! A synthetic history is therefore behaviourally identical to the live
//! history it reconstructs; there is no second code path to keep in sync.

use tracing::info;

use spindrift_core::config::SpindriftConfig;
use spindrift_core::errors::EngineError;
use spindrift_core::types::SpinRecord;

use crate::influence::InfluenceMap;
use crate::session::Session;

/// The state a replay run reconstructs.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticHistory {
    /// Re-derived records, oldest first.
    pub records: Vec<SpinRecord>,
    /// Influence map after every replayed outcome was applied.
    pub influences: InfluenceMap,
    /// The input sequence echoed back, oldest first.
    pub confirmed_log: Vec<u8>,
}

/// Replay a confirmed spin sequence (oldest first) from scratch.
///
/// The first two spins seed the log without resolving anything; each
/// position `i >= 2` becomes one cycle with the two preceding spins as
/// the input pair and `spins[i]` the outcome. Fewer than three spins
/// yields no records and a neutral influence map.
pub fn replay(config: &SpindriftConfig, spins: &[u8]) -> Result<SyntheticHistory, EngineError> {
    replay_preserving(config, spins, None)
}

/// Replay, then re-score one dangling pending cycle with the given input
/// pair. Used when a session re-simulates itself while a cycle is open.
pub fn replay_preserving(
    config: &SpindriftConfig,
    spins: &[u8],
    pending: Option<(u8, u8)>,
) -> Result<SyntheticHistory, EngineError> {
    let mut session = Session::new(config.clone());
    for &seed in spins.iter().take(2) {
        session.seed_spin(seed)?;
    }
    for i in 2..spins.len() {
        session.begin_cycle(spins[i - 2], spins[i - 1], None)?;
        session.resolve_cycle(spins[i])?;
    }
    if let Some((input_a, input_b)) = pending {
        session.begin_cycle(input_a, input_b, None)?;
    }

    let synthetic = SyntheticHistory {
        records: session.history().to_vec(),
        influences: session.influences().clone(),
        confirmed_log: session.confirmed_log().to_vec(),
    };
    info!(
        spins = spins.len(),
        records = synthetic.records.len(),
        "replay complete"
    );
    Ok(synthetic)
}
