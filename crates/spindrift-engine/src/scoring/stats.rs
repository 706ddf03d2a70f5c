//! Trend, board, and neighbour statistics derived from resolved history.
//!
//! Every derivation here reads only the history built so far; the replay
//! engine relies on that to never look ahead.

use spindrift_core::types::collections::FxHashMap;
use spindrift_core::types::{wheel_distance, GroupKind, SpinRecord, MAX_WHEEL_DISTANCE};

/// Hit-rate and streak for one candidate group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupTrend {
    pub resolved: usize,
    pub hits: usize,
    /// `hits / resolved`; 0.0 with no resolved history.
    pub hit_rate: f64,
    /// Signed run length, newest first: +n consecutive hits, −n misses.
    pub streak: i32,
}

/// Per-group trend statistics over the resolved history.
#[derive(Debug, Clone, Default)]
pub struct TrendStats {
    per_group: FxHashMap<GroupKind, GroupTrend>,
}

impl TrendStats {
    /// Compute trends for every group kind over the resolved records.
    pub fn compute(history: &[SpinRecord]) -> Self {
        let mut per_group = FxHashMap::default();
        for kind in GroupKind::ALL {
            per_group.insert(kind, group_trend(history, kind));
        }
        Self { per_group }
    }

    pub fn group(&self, kind: GroupKind) -> GroupTrend {
        self.per_group.get(&kind).copied().unwrap_or_default()
    }
}

fn group_trend(history: &[SpinRecord], kind: GroupKind) -> GroupTrend {
    let mut resolved = 0;
    let mut hits = 0;
    for record in history.iter().filter(|r| r.is_resolved()) {
        resolved += 1;
        if record.hit_groups.contains(&kind) {
            hits += 1;
        }
    }

    let mut streak = 0i32;
    for record in history.iter().rev().filter(|r| r.is_resolved()) {
        let hit = record.hit_groups.contains(&kind);
        match streak {
            0 => streak = if hit { 1 } else { -1 },
            n if n > 0 && hit => streak += 1,
            n if n < 0 && !hit => streak -= 1,
            _ => break,
        }
    }

    GroupTrend {
        resolved,
        hits,
        hit_rate: if resolved == 0 {
            0.0
        } else {
            hits as f64 / resolved as f64
        },
        streak,
    }
}

/// Recent winning numbers feeding the hot-zone statistic.
#[derive(Debug, Clone, Default)]
pub struct BoardStats {
    recent_winners: Vec<u8>,
}

impl BoardStats {
    /// Gather the last `window` resolved winners, oldest first.
    pub fn compute(history: &[SpinRecord], window: usize) -> Self {
        let mut recent_winners: Vec<u8> = history
            .iter()
            .rev()
            .filter_map(|r| r.winning_number)
            .take(window)
            .collect();
        recent_winners.reverse();
        Self { recent_winners }
    }

    /// Fraction of the recent winners that fall inside `zone`.
    pub fn hot_zone_concentration(&self, zone: &[u8]) -> f64 {
        if self.recent_winners.is_empty() {
            return 0.0;
        }
        let inside = self
            .recent_winners
            .iter()
            .filter(|n| zone.contains(n))
            .count();
        inside as f64 / self.recent_winners.len() as f64
    }

    pub fn sample_size(&self) -> usize {
        self.recent_winners.len()
    }
}

/// Physical proximity of each group base to the last winning number.
#[derive(Debug, Clone, Default)]
pub struct NeighbourScores {
    per_group: FxHashMap<GroupKind, f64>,
}

impl NeighbourScores {
    /// `1 − distance/18` per group; 0.0 when no winner is known yet.
    pub fn compute(input_a: u8, input_b: u8, last_winning: Option<u8>) -> Self {
        let mut per_group = FxHashMap::default();
        for kind in GroupKind::ALL {
            let base = kind.base_value(input_a, input_b);
            let score = match last_winning {
                Some(last) => {
                    1.0 - wheel_distance(base, last) as f64 / MAX_WHEEL_DISTANCE as f64
                }
                None => 0.0,
            };
            per_group.insert(kind, score);
        }
        Self { per_group }
    }

    pub fn group(&self, kind: GroupKind) -> f64 {
        self.per_group.get(&kind).copied().unwrap_or(0.0)
    }
}
