//! Recommendation scorer: fuses trend, board, neighbour, severity, and
//! predictor signals into one ranked decision.
//!
//! Determinism contract: for fixed inputs (including a fixed influence map
//! snapshot and fixed last winning number) the result is reproducible.
//! Candidate iteration follows the fixed `GroupKind::ALL` order; no clocks
//! or ambient state enter the computation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use spindrift_core::config::SpindriftConfig;
use spindrift_core::types::{
    dynamic_radius, hit_zone, Factor, FactorTerm, GroupKind, Sector, Signal,
};

use crate::influence::InfluenceMap;
use crate::predictor::PredictorOpinion;
use crate::severity::SeverityTracker;

use super::stats::{BoardStats, NeighbourScores, TrendStats};

/// Meta-signals fed back from the drift monitors into the next cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextFlags {
    /// An active monitor warning vetoes play regardless of score.
    pub deny_play: bool,
    /// Human-readable caution carried into the reason text.
    pub caution: Option<String>,
}

/// Full score breakdown for one candidate group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub group: GroupKind,
    pub base: u8,
    pub radius: u8,
    pub total: f64,
    /// Additive terms in scoring order, after weighting and influence.
    pub terms: Vec<FactorTerm>,
    /// Sector-level dampener applied multiplicatively to the term sum.
    pub sector_modifier: f64,
}

/// The ranked decision for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Top-ranked candidate; `None` only when no group is enabled.
    pub best_candidate: Option<GroupKind>,
    pub final_score: f64,
    pub signal: Signal,
    /// The single largest contributing term of the best candidate.
    pub primary_factor: Factor,
    /// Justification derived from the same computation, not independently
    /// sourced.
    pub reason: String,
    pub breakdown: Vec<CandidateScore>,
}

/// Everything the scorer reads. The influence map is read-only here; it is
/// never mutated mid-score.
pub struct ScoreInputs<'a> {
    pub trend: &'a TrendStats,
    pub board: &'a BoardStats,
    pub neighbours: &'a NeighbourScores,
    pub input_a: u8,
    pub input_b: u8,
    pub influences: &'a InfluenceMap,
    pub last_winning: Option<u8>,
    pub severity: &'a SeverityTracker,
    pub flags: &'a ContextFlags,
    pub predictor: Option<&'a PredictorOpinion>,
    pub config: &'a SpindriftConfig,
}

/// Candidate groups enabled by configuration, in fixed order.
pub fn enabled_kinds(config: &SpindriftConfig) -> SmallVec<[GroupKind; 4]> {
    let names = &config.scoring.enabled_groups;
    GroupKind::ALL
        .into_iter()
        .filter(|kind| names.is_empty() || names.iter().any(|n| n == kind.name()))
        .collect()
}

/// Score all enabled candidates and rank them into one recommendation.
pub fn score(inputs: &ScoreInputs<'_>) -> RecommendationResult {
    let scoring = &inputs.config.scoring;
    let severity_cfg = &inputs.config.severity;

    let mut breakdown: Vec<CandidateScore> = Vec::new();
    for kind in enabled_kinds(inputs.config) {
        let trend = inputs.trend.group(kind);
        let base = kind.base_value(inputs.input_a, inputs.input_b);
        let radius = dynamic_radius(trend.hit_rate, scoring.effective_base_neighbour_radius());
        let zone = hit_zone(base, radius);

        let mut terms = Vec::with_capacity(6);
        let mut push = |factor: Factor, raw: f64, weight: f64| {
            let value = raw * weight * inputs.influences.multiplier(factor);
            terms.push(FactorTerm { factor, value });
        };

        push(Factor::HitRate, trend.hit_rate, scoring.effective_weight_hit_rate());
        push(
            Factor::Streak,
            (trend.streak as f64 / 5.0).clamp(-1.0, 1.0),
            scoring.effective_weight_streak(),
        );
        push(
            Factor::Proximity,
            inputs.neighbours.group(kind),
            scoring.effective_weight_proximity(),
        );
        push(
            Factor::HotZone,
            inputs.board.hot_zone_concentration(&zone),
            scoring.effective_weight_hot_zone(),
        );
        // Number-level severity over the zone, Boost policy: the uplift
        // above neutral is the raw term.
        let zone_severity = inputs.severity.assess_zone(&zone, severity_cfg);
        push(
            Factor::Severity,
            zone_severity.confidence_modifier - 1.0,
            scoring.effective_weight_severity(),
        );
        // Predictor term only when an opinion is actually present.
        if let Some(opinion) = inputs.predictor {
            let edge = opinion.zone_mass(&zone) - PredictorOpinion::uniform_mass(zone.len());
            push(Factor::Predictor, edge, scoring.effective_weight_predictor());
        }

        // Sector-level severity, Dampen policy: elevated sector streaks
        // shrink the whole candidate's confidence multiplicatively.
        let sector_modifier = inputs
            .severity
            .assess_sector(Sector::of(base), severity_cfg)
            .confidence_modifier;
        let total: f64 = terms.iter().map(|t| t.value).sum::<f64>() * sector_modifier;

        breakdown.push(CandidateScore {
            group: kind,
            base,
            radius,
            total,
            terms,
            sector_modifier,
        });
    }

    let Some(best) = breakdown
        .iter()
        .max_by(|a, b| a.total.partial_cmp(&b.total).unwrap_or(std::cmp::Ordering::Equal))
        .cloned()
    else {
        return RecommendationResult {
            best_candidate: None,
            final_score: 0.0,
            signal: Signal::Wait,
            primary_factor: Factor::Unknown,
            reason: "no candidate groups enabled".to_string(),
            breakdown,
        };
    };

    let primary_factor = best
        .terms
        .iter()
        .max_by(|a, b| {
            a.value
                .abs()
                .partial_cmp(&b.value.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|t| t.factor)
        .unwrap_or(Factor::Unknown);

    let signal = if inputs.flags.deny_play {
        Signal::AvoidPlay
    } else if best.total > scoring.effective_strong_play_threshold() {
        Signal::StrongPlay
    } else if best.total > scoring.effective_play_threshold() {
        Signal::Play
    } else {
        Signal::Wait
    };

    let reason = render_reason(&best, signal, primary_factor, inputs.flags);
    debug!(
        group = %best.group,
        score = best.total,
        signal = %signal,
        primary = %primary_factor,
        "cycle scored"
    );

    RecommendationResult {
        best_candidate: Some(best.group),
        final_score: best.total,
        signal,
        primary_factor,
        reason,
        breakdown,
    }
}

fn render_reason(
    best: &CandidateScore,
    signal: Signal,
    primary: Factor,
    flags: &ContextFlags,
) -> String {
    let mut reason = format!(
        "{} (base {}, radius {}) scored {:.3} -> {}: led by {}",
        best.group, best.base, best.radius, best.total, signal, primary
    );
    if best.sector_modifier < 1.0 {
        reason.push_str(&format!(
            ", sector variance dampened confidence x{:.2}",
            best.sector_modifier
        ));
    }
    if let Some(caution) = &flags.caution {
        reason.push_str("; caution: ");
        reason.push_str(caution);
    }
    reason
}

#[cfg(test)]
mod tests {
    use spindrift_core::types::SpinStatus;
    use spindrift_core::types::SpinRecord;

    use super::*;

    fn fixture_history() -> Vec<SpinRecord> {
        let mut history = Vec::new();
        for (seq, (winner, hits)) in [
            (7u8, vec![GroupKind::Difference]),
            (20, vec![]),
            (17, vec![GroupKind::Sum]),
            (7, vec![GroupKind::Difference]),
        ]
        .into_iter()
        .enumerate()
        {
            let mut r = SpinRecord::pending(seq as u64 + 1, 5, 12);
            r.status = SpinStatus::Resolved;
            r.winning_number = Some(winner);
            r.hit_groups = hits.into_iter().collect();
            history.push(r);
        }
        history
    }

    fn score_fixture(config: &SpindriftConfig, flags: &ContextFlags) -> RecommendationResult {
        let history = fixture_history();
        let trend = TrendStats::compute(&history);
        let board = BoardStats::compute(&history, config.scoring.effective_hot_zone_window());
        let neighbours = NeighbourScores::compute(5, 12, Some(7));
        let severity = SeverityTracker::new(&config.severity);
        let inputs = ScoreInputs {
            trend: &trend,
            board: &board,
            neighbours: &neighbours,
            input_a: 5,
            input_b: 12,
            influences: &InfluenceMap::neutral(),
            last_winning: Some(7),
            severity: &severity,
            flags,
            predictor: None,
            config,
        };
        score(&inputs)
    }

    #[test]
    fn scoring_is_deterministic() {
        let config = SpindriftConfig::default();
        let flags = ContextFlags::default();
        let first = score_fixture(&config, &flags);
        let second = score_fixture(&config, &flags);
        assert_eq!(first, second);
    }

    #[test]
    fn deny_flag_forces_avoid_play() {
        let config = SpindriftConfig::default();
        let flags = ContextFlags {
            deny_play: true,
            caution: Some("rolling win rate collapsed".into()),
        };
        let result = score_fixture(&config, &flags);
        assert_eq!(result.signal, Signal::AvoidPlay);
        assert!(result.reason.contains("caution"));
    }

    #[test]
    fn missing_predictor_omits_the_term() {
        let config = SpindriftConfig::default();
        let result = score_fixture(&config, &ContextFlags::default());
        for candidate in &result.breakdown {
            assert!(candidate.terms.iter().all(|t| t.factor != Factor::Predictor));
        }
    }

    #[test]
    fn predictor_term_present_when_opinion_given() {
        let config = SpindriftConfig::default();
        let history = fixture_history();
        let trend = TrendStats::compute(&history);
        let board = BoardStats::compute(&history, 12);
        let neighbours = NeighbourScores::compute(5, 12, Some(7));
        let severity = SeverityTracker::new(&config.severity);
        let mut per_number = [1.0 / 37.0; 37];
        per_number[7] = 0.5;
        let opinion = PredictorOpinion { per_number };
        let inputs = ScoreInputs {
            trend: &trend,
            board: &board,
            neighbours: &neighbours,
            input_a: 5,
            input_b: 12,
            influences: &InfluenceMap::neutral(),
            last_winning: Some(7),
            severity: &severity,
            flags: &ContextFlags::default(),
            predictor: Some(&opinion),
            config: &config,
        };
        let result = score(&inputs);
        let difference = result
            .breakdown
            .iter()
            .find(|c| c.group == GroupKind::Difference)
            .unwrap();
        let term = difference
            .terms
            .iter()
            .find(|t| t.factor == Factor::Predictor)
            .unwrap();
        assert!(term.value > 0.0);
    }

    #[test]
    fn disabled_groups_are_not_scored() {
        let mut config = SpindriftConfig::default();
        config.scoring.enabled_groups = vec!["sum".to_string()];
        let result = score_fixture(&config, &ContextFlags::default());
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.best_candidate, Some(GroupKind::Sum));
    }

    #[test]
    fn no_enabled_groups_waits() {
        let mut config = SpindriftConfig::default();
        config.scoring.enabled_groups = vec!["nonexistent".to_string()];
        let result = score_fixture(&config, &ContextFlags::default());
        assert_eq!(result.best_candidate, None);
        assert_eq!(result.signal, Signal::Wait);
    }

    #[test]
    fn influence_scales_terms() {
        let config = SpindriftConfig::default();
        let history = fixture_history();
        let trend = TrendStats::compute(&history);
        let board = BoardStats::compute(&history, 12);
        let neighbours = NeighbourScores::compute(5, 12, Some(7));
        let severity = SeverityTracker::new(&config.severity);

        let neutral = InfluenceMap::neutral();
        let mut boosted = InfluenceMap::neutral();
        for _ in 0..40 {
            boosted.apply_outcome(Factor::HitRate, true, 1.0, &config.influence);
        }

        let mk = |influences: &InfluenceMap| {
            let inputs = ScoreInputs {
                trend: &trend,
                board: &board,
                neighbours: &neighbours,
                input_a: 5,
                input_b: 12,
                influences,
                last_winning: Some(7),
                severity: &severity,
                flags: &ContextFlags::default(),
                predictor: None,
                config: &config,
            };
            score(&inputs)
        };

        let base = mk(&neutral);
        let amplified = mk(&boosted);
        let term = |r: &RecommendationResult| {
            r.breakdown
                .iter()
                .find(|c| c.group == GroupKind::Difference)
                .unwrap()
                .terms
                .iter()
                .find(|t| t.factor == Factor::HitRate)
                .unwrap()
                .value
        };
        assert!(term(&amplified) > term(&base));
    }
}
