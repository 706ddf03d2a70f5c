//! Severity normalization: raw streak counters into calibrated, bounded
//! confidence modifiers.

use serde::{Deserialize, Serialize};

use spindrift_core::config::SeverityConfig;

use super::state::SeverityState;

/// Ordered severity levels. Number-level severity uses the full six-level
/// ladder; sector-level severity uses the coarser four-level subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Normal,
    Mild,
    Elevated,
    High,
    VeryHigh,
    Extreme,
}

const FULL_LADDER: [SeverityLevel; 6] = [
    SeverityLevel::Normal,
    SeverityLevel::Mild,
    SeverityLevel::Elevated,
    SeverityLevel::High,
    SeverityLevel::VeryHigh,
    SeverityLevel::Extreme,
];

const COARSE_LADDER: [SeverityLevel; 4] = [
    SeverityLevel::Normal,
    SeverityLevel::Elevated,
    SeverityLevel::High,
    SeverityLevel::Extreme,
];

/// How the confidence modifier responds to a rising severity ratio.
///
/// The two policies were historically conflated; callers must pick one
/// explicitly per entity kind. Number-level severity treats long streaks as
/// contextually interesting (`Boost`); sector-level severity treats them as
/// increased variance (`Dampen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierPolicy {
    /// Modifier rises from 1.0 with the ratio (max uplift `boost_max`).
    Boost,
    /// Modifier falls from 1.0 with the ratio (max cut `dampen_max`).
    Dampen,
}

/// Calibrated severity for one entity or one aggregated group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub current_loss_streak: u32,
    pub historical_max: u32,
    /// `min(current_loss_streak / historical_max, 1.0)`.
    pub ratio: f64,
    pub level: SeverityLevel,
    /// Multiplicative modifier per the chosen policy; 1.0 is neutral.
    pub confidence_modifier: f64,
}

/// Bucket a ratio into a level using the given ordered boundaries.
/// Five boundaries select from the full ladder, three from the coarse one.
pub fn level_for(ratio: f64, thresholds: &[f64]) -> SeverityLevel {
    let bucket = thresholds.iter().filter(|&&t| ratio >= t).count();
    let ladder: &[SeverityLevel] = match thresholds.len() {
        5 => &FULL_LADDER,
        3 => &COARSE_LADDER,
        // Uneven custom ladders degrade to the full one, truncated.
        n => &FULL_LADDER[..(n + 1).min(FULL_LADDER.len())],
    };
    ladder[bucket.min(ladder.len() - 1)]
}

/// Confidence modifier for a ratio under a policy. Monotone in the ratio:
/// non-decreasing for `Boost`, non-increasing for `Dampen`.
pub fn confidence_modifier(ratio: f64, policy: ModifierPolicy, cfg: &SeverityConfig) -> f64 {
    let ratio = ratio.clamp(0.0, 1.0);
    match policy {
        ModifierPolicy::Boost => 1.0 + ratio * cfg.effective_boost_max(),
        ModifierPolicy::Dampen => 1.0 - ratio * cfg.effective_dampen_max(),
    }
}

/// Normalize one entity's state into a calibrated assessment.
pub fn normalize(
    state: &SeverityState,
    thresholds: &[f64],
    policy: ModifierPolicy,
    cfg: &SeverityConfig,
) -> SeverityAssessment {
    let ratio = state.ratio();
    SeverityAssessment {
        current_loss_streak: state.current_loss_streak,
        historical_max: state.historical_max,
        ratio,
        level: level_for(ratio, thresholds),
        confidence_modifier: confidence_modifier(ratio, policy, cfg),
    }
}

/// Aggregate severity over the members of one candidate group's hit-zone:
/// the arithmetic mean of member ratios (unweighted), with the modifier
/// recomputed from the aggregate ratio — never averaged from member
/// modifiers.
pub fn aggregate(
    member_states: &[SeverityState],
    thresholds: &[f64],
    policy: ModifierPolicy,
    cfg: &SeverityConfig,
) -> SeverityAssessment {
    if member_states.is_empty() {
        return SeverityAssessment {
            current_loss_streak: 0,
            historical_max: 1,
            ratio: 0.0,
            level: level_for(0.0, thresholds),
            confidence_modifier: 1.0,
        };
    }

    let ratio =
        member_states.iter().map(|s| s.ratio()).sum::<f64>() / member_states.len() as f64;
    let max_streak = member_states
        .iter()
        .map(|s| s.current_loss_streak)
        .max()
        .unwrap_or(0);
    let max_historical = member_states
        .iter()
        .map(|s| s.historical_max)
        .max()
        .unwrap_or(1);

    SeverityAssessment {
        current_loss_streak: max_streak,
        historical_max: max_historical,
        ratio,
        level: level_for(ratio, thresholds),
        confidence_modifier: confidence_modifier(ratio, policy, cfg),
    }
}
