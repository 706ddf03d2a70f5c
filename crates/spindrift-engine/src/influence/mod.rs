//! Adaptive per-factor influence map.
//!
//! Each scoring factor carries a bounded multiplier that compounds with
//! success and shrinks toward the floor with failure. Decay runs exactly
//! once per cycle, before scoring; the outcome update runs once per
//! resolved record that carried a recommendation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use spindrift_core::config::InfluenceConfig;
use spindrift_core::types::collections::FxHashMap;
use spindrift_core::types::Factor;

/// Bounded multiplier per factor. Created with the six well-known factors
/// at 1.0 (neutral); unknown factors self-heal by lazy insertion at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceMap {
    multipliers: FxHashMap<Factor, f64>,
}

impl InfluenceMap {
    /// Neutral map with every known factor at 1.0.
    pub fn neutral() -> Self {
        let mut multipliers = FxHashMap::default();
        for factor in Factor::KNOWN {
            multipliers.insert(factor, 1.0);
        }
        Self { multipliers }
    }

    /// Current multiplier for a factor. Factors missing from the map read
    /// as neutral; they are materialized on the next write.
    pub fn multiplier(&self, factor: Factor) -> f64 {
        self.multipliers.get(&factor).copied().unwrap_or(1.0)
    }

    /// Multiply every multiplier by the forget factor and re-clamp.
    /// Called exactly once per cycle, before the new score is computed.
    pub fn decay(&mut self, cfg: &InfluenceConfig) {
        let forget = cfg.effective_decay_factor();
        let min = cfg.effective_min_influence();
        let max = cfg.effective_max_influence();
        for value in self.multipliers.values_mut() {
            *value = (*value * forget).clamp(min, max);
        }
    }

    /// Adjust the primary driving factor of a resolved outcome.
    ///
    /// `confidence_weighted_bonus = max(0, final_score − confidence_min_threshold)
    /// × confidence_multiplier`: confident correct calls are reinforced more
    /// strongly, confident wrong calls are penalized more strongly.
    pub fn apply_outcome(
        &mut self,
        factor: Factor,
        success: bool,
        final_score: f64,
        cfg: &InfluenceConfig,
    ) {
        let bonus = (final_score - cfg.effective_confidence_min_threshold()).max(0.0)
            * cfg.effective_confidence_multiplier();
        let delta = if success {
            cfg.effective_success_rate() + bonus
        } else {
            -(cfg.effective_failure_rate() + bonus)
        };

        let min = cfg.effective_min_influence();
        let max = cfg.effective_max_influence();
        let entry = self.multipliers.entry(factor).or_insert(1.0);
        *entry = (*entry + delta).clamp(min, max);
        debug!(factor = %factor, success, delta, multiplier = *entry, "influence updated");
    }

    /// Number of factors currently materialized in the map.
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    /// Iterate factors and multipliers in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.multipliers.iter().map(|(&f, &v)| (f, v))
    }
}

impl Default for InfluenceMap {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> InfluenceConfig {
        InfluenceConfig::default()
    }

    #[test]
    fn neutral_map_has_six_factors_at_one() {
        let map = InfluenceMap::neutral();
        assert_eq!(map.len(), 6);
        for factor in Factor::KNOWN {
            assert_eq!(map.multiplier(factor), 1.0);
        }
    }

    #[test]
    fn decay_converges_to_floor_never_below() {
        // Forget factor 0.9 over 10 idle cycles drives a neutral factor
        // toward the floor and clamps there.
        let cfg = InfluenceConfig {
            decay_factor: Some(0.9),
            ..Default::default()
        };
        let mut map = InfluenceMap::neutral();
        let mut previous = map.multiplier(Factor::Streak);
        for _ in 0..10 {
            map.decay(&cfg);
            let current = map.multiplier(Factor::Streak);
            assert!(current <= previous);
            assert!(current >= cfg.effective_min_influence());
            previous = current;
        }
        assert_eq!(map.multiplier(Factor::Streak), cfg.effective_min_influence());
    }

    #[test]
    fn success_reinforces_failure_penalizes() {
        let mut map = InfluenceMap::neutral();
        map.apply_outcome(Factor::HitRate, true, 0.2, &cfg());
        assert!(map.multiplier(Factor::HitRate) > 1.0);

        map.apply_outcome(Factor::Proximity, false, 0.2, &cfg());
        assert!(map.multiplier(Factor::Proximity) < 1.0);
    }

    #[test]
    fn confident_calls_move_further() {
        let mut low = InfluenceMap::neutral();
        let mut high = InfluenceMap::neutral();
        // 0.2 is below the confidence threshold, 0.8 well above.
        low.apply_outcome(Factor::HitRate, true, 0.2, &cfg());
        high.apply_outcome(Factor::HitRate, true, 0.8, &cfg());
        assert!(high.multiplier(Factor::HitRate) > low.multiplier(Factor::HitRate));

        let mut low = InfluenceMap::neutral();
        let mut high = InfluenceMap::neutral();
        low.apply_outcome(Factor::HitRate, false, 0.2, &cfg());
        high.apply_outcome(Factor::HitRate, false, 0.8, &cfg());
        assert!(high.multiplier(Factor::HitRate) < low.multiplier(Factor::HitRate));
    }

    #[test]
    fn updates_stay_clamped() {
        let mut map = InfluenceMap::neutral();
        for _ in 0..200 {
            map.apply_outcome(Factor::HotZone, true, 1.0, &cfg());
        }
        assert_eq!(map.multiplier(Factor::HotZone), cfg().effective_max_influence());

        for _ in 0..400 {
            map.apply_outcome(Factor::HotZone, false, 1.0, &cfg());
        }
        assert_eq!(map.multiplier(Factor::HotZone), cfg().effective_min_influence());
    }

    #[test]
    fn unknown_factor_lazily_inserts_at_neutral() {
        let mut map = InfluenceMap::neutral();
        assert_eq!(map.multiplier(Factor::Unknown), 1.0);
        map.apply_outcome(Factor::Unknown, true, 0.0, &cfg());
        assert_eq!(map.len(), 7);
        assert!(map.multiplier(Factor::Unknown) > 1.0);
    }
}
