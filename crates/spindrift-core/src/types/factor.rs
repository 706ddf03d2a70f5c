//! Scoring factors and decision signals.
//!
//! The factor set is a closed enum rather than an open string map so
//! exhaustiveness is compiler-checked; `Unknown` is the explicit fallback
//! bucket for names that arrive from outside (snapshots, external tools).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The named factors that contribute terms to a recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Historical hit-rate of the candidate group.
    HitRate,
    /// Current consecutive hit/miss streak of the candidate group.
    Streak,
    /// Physical proximity of the group base to the last winning number.
    Proximity,
    /// Board hot-zone concentration around the group base.
    HotZone,
    /// Contextual severity modifier (loss-streak calibration).
    Severity,
    /// External predictor confidence contribution.
    Predictor,
    /// Fallback bucket for unrecognized factor names.
    Unknown,
}

impl Factor {
    /// The six well-known factors, in fixed scoring order.
    pub const KNOWN: [Factor; 6] = [
        Factor::HitRate,
        Factor::Streak,
        Factor::Proximity,
        Factor::HotZone,
        Factor::Severity,
        Factor::Predictor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Factor::HitRate => "hit_rate",
            Factor::Streak => "streak",
            Factor::Proximity => "proximity",
            Factor::HotZone => "hot_zone",
            Factor::Severity => "severity",
            Factor::Predictor => "predictor",
            Factor::Unknown => "unknown",
        }
    }

    /// Parse a factor name, folding unrecognized names into `Unknown`.
    pub fn parse(name: &str) -> Factor {
        match name {
            "hit_rate" => Factor::HitRate,
            "streak" => Factor::Streak,
            "proximity" => Factor::Proximity,
            "hot_zone" => Factor::HotZone,
            "severity" => Factor::Severity,
            "predictor" => Factor::Predictor,
            _ => Factor::Unknown,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decision signal attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Score cleared the strong-play threshold.
    StrongPlay,
    /// Score cleared the play threshold.
    Play,
    /// No actionable edge this cycle.
    Wait,
    /// A monitor warning vetoed the play regardless of score.
    AvoidPlay,
}

impl Signal {
    /// Both play variants count as a play for the drift monitors.
    pub fn is_play(&self) -> bool {
        matches!(self, Signal::Play | Signal::StrongPlay)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Signal::StrongPlay => "strong_play",
            Signal::Play => "play",
            Signal::Wait => "wait",
            Signal::AvoidPlay => "avoid_play",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
