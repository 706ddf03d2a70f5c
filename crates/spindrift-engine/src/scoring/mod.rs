//! Recommendation scoring: statistics derivation and multi-factor fusion.

pub mod scorer;
pub mod stats;

pub use scorer::{
    enabled_kinds, score, CandidateScore, ContextFlags, RecommendationResult, ScoreInputs,
};
pub use stats::{BoardStats, GroupTrend, NeighbourScores, TrendStats};
