//! Factor-shift monitor: detects when no single factor reliably drives
//! successful plays any more.

use serde::{Deserialize, Serialize};

use spindrift_core::config::MonitorConfig;
use spindrift_core::types::collections::FxHashMap;
use spindrift_core::types::{Factor, SpinRecord};

/// Distribution of primary driving factors over recent successful plays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorShift {
    /// Successful plays actually gathered (may be short of the window).
    pub sample: usize,
    pub dominant_factor: Option<Factor>,
    /// Share of the sample held by the dominant factor.
    pub dominance_share: f64,
    /// Concentration `sum(p_i^2)`: 1.0 when one factor drives everything,
    /// 1/k when k factors contribute evenly.
    pub concentration: f64,
    /// True when a full sample shows neither a dominant factor nor enough
    /// concentration.
    pub drifting: bool,
}

/// Examine the primary driving factor of the most recent successful plays,
/// newest first.
pub fn assess(history: &[SpinRecord], cfg: &MonitorConfig) -> FactorShift {
    let window = cfg.effective_factor_shift_window();

    let mut counts: FxHashMap<Factor, usize> = FxHashMap::default();
    let mut sample = 0usize;
    for record in history.iter().rev() {
        if !record.is_resolved() || !record.was_play() || !record.is_success() {
            continue;
        }
        if let Some(details) = &record.details {
            *counts.entry(details.primary_factor).or_insert(0) += 1;
            sample += 1;
            if sample == window {
                break;
            }
        }
    }

    if sample == 0 {
        return FactorShift {
            sample: 0,
            dominant_factor: None,
            dominance_share: 0.0,
            concentration: 0.0,
            drifting: false,
        };
    }

    let (dominant_factor, dominant_count) = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.name().cmp(b.0.name())))
        .map(|(&f, &c)| (Some(f), c))
        .unwrap_or((None, 0));

    let dominance_share = dominant_count as f64 / sample as f64;
    let concentration = counts
        .values()
        .map(|&c| {
            let p = c as f64 / sample as f64;
            p * p
        })
        .sum::<f64>();

    // Drift is only called on a full sample; a handful of plays is not
    // evidence of anything.
    let drifting = sample >= window
        && (dominance_share < cfg.effective_dominance_share()
            || concentration < cfg.effective_diversity_threshold());

    FactorShift {
        sample,
        dominant_factor,
        dominance_share,
        concentration,
        drifting,
    }
}

#[cfg(test)]
mod tests {
    use spindrift_core::types::{
        GroupKind, RecommendationDetails, Signal, SpinStatus,
    };

    use super::*;

    fn winning_play(seq: u64, primary: Factor) -> SpinRecord {
        let mut r = SpinRecord::pending(seq, 5, 12);
        r.status = SpinStatus::Resolved;
        r.winning_number = Some(7);
        r.recommended_group = Some(GroupKind::Difference);
        r.hit_groups.push(GroupKind::Difference);
        r.details = Some(RecommendationDetails {
            final_score: 0.5,
            signal: Signal::Play,
            primary_factor: primary,
            terms: Vec::new(),
            reason: String::new(),
            radius: 2,
            predictor_used: false,
        });
        r
    }

    #[test]
    fn single_factor_dominates() {
        let history: Vec<SpinRecord> =
            (0..8).map(|i| winning_play(i + 1, Factor::HitRate)).collect();
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.sample, 8);
        assert_eq!(report.dominant_factor, Some(Factor::HitRate));
        assert_eq!(report.dominance_share, 1.0);
        assert_eq!(report.concentration, 1.0);
        assert!(!report.drifting);
    }

    #[test]
    fn scattered_factors_flag_drift() {
        let factors = [
            Factor::HitRate,
            Factor::Streak,
            Factor::Proximity,
            Factor::HotZone,
            Factor::Severity,
            Factor::Predictor,
            Factor::HitRate,
            Factor::Streak,
        ];
        let history: Vec<SpinRecord> = factors
            .iter()
            .enumerate()
            .map(|(i, &f)| winning_play(i as u64 + 1, f))
            .collect();
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.sample, 8);
        // Best factor holds 2/8 = 25% < 40% dominance.
        assert!(report.dominance_share < 0.40);
        assert!(report.drifting);
    }

    #[test]
    fn short_sample_never_drifts() {
        let history = vec![
            winning_play(1, Factor::HitRate),
            winning_play(2, Factor::Streak),
        ];
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.sample, 2);
        assert!(!report.drifting);
    }

    #[test]
    fn losses_and_waits_are_ignored() {
        let mut loss = winning_play(1, Factor::HitRate);
        loss.hit_groups.clear();
        let history = vec![loss, winning_play(2, Factor::Streak)];
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.sample, 1);
        assert_eq!(report.dominant_factor, Some(Factor::Streak));
    }

    #[test]
    fn empty_history_is_neutral() {
        let report = assess(&[], &MonitorConfig::default());
        assert_eq!(report.sample, 0);
        assert!(!report.drifting);
    }
}
