//! Spindrift engine: deterministic, replayable recommendation scoring
//! over European-wheel spin history.
//!
//! The [`session::Session`] is the entry point: it owns one spin history
//! and drives the score/resolve cycle. Everything else feeds it — trend
//! and board statistics, the adaptive influence map, severity tracking,
//! the drift monitors, and the replay engine that rebuilds a session from
//! its confirmed log.

pub mod influence;
pub mod monitors;
pub mod optimizer;
pub mod outcome;
pub mod predictor;
pub mod replay;
pub mod scoring;
pub mod session;
pub mod severity;
pub mod snapshot;

pub use influence::InfluenceMap;
pub use predictor::{ChannelPredictor, NullPredictor, Predictor, PredictorOpinion};
pub use replay::{replay, replay_preserving, SyntheticHistory};
pub use scoring::{ContextFlags, RecommendationResult};
pub use session::Session;
pub use severity::{ExternalSeverityReport, SeverityTracker};
pub use snapshot::SessionSnapshot;
