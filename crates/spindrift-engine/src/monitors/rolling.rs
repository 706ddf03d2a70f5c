//! Rolling-performance monitor over recent play-signal records.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};

use spindrift_core::config::MonitorConfig;
use spindrift_core::types::SpinRecord;

/// Win-rate summary over the most recent window of plays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPerformance {
    /// Play-signal records actually gathered (may be short of the window).
    pub plays: usize,
    pub wins: usize,
    pub rolling_win_rate: f64,
    /// Losing plays since the most recent winning play.
    pub consecutive_losses: u32,
    /// 95% Beta-posterior credible interval on the win rate.
    pub credible_interval: (f64, f64),
    /// True when a full window breaches the win-rate floor, or the loss run
    /// breaches its cap.
    pub warning: bool,
}

/// Scan resolved play-signal records newest-first until the configured
/// window of plays is gathered.
pub fn assess(history: &[SpinRecord], cfg: &MonitorConfig) -> RollingPerformance {
    let window = cfg.effective_rolling_window();

    let mut plays = 0usize;
    let mut wins = 0usize;
    let mut consecutive_losses = 0u32;
    let mut loss_run_open = true;

    for record in history.iter().rev() {
        if !record.is_resolved() || !record.was_play() {
            continue;
        }
        plays += 1;
        if record.is_success() {
            wins += 1;
            loss_run_open = false;
        } else if loss_run_open {
            consecutive_losses += 1;
        }
        if plays == window {
            break;
        }
    }

    let rolling_win_rate = if plays == 0 {
        0.0
    } else {
        wins as f64 / plays as f64
    };

    let warning = (plays >= window && rolling_win_rate < cfg.effective_min_win_rate())
        || consecutive_losses >= cfg.effective_max_consecutive_losses();

    RollingPerformance {
        plays,
        wins,
        rolling_win_rate,
        consecutive_losses,
        credible_interval: credible_interval(wins, plays, 0.95),
        warning,
    }
}

/// 95% credible interval from a Beta(1+wins, 1+losses) posterior.
/// Guards against invalid parameters by falling back to the full interval.
fn credible_interval(wins: usize, plays: usize, level: f64) -> (f64, f64) {
    let alpha = 1.0 + wins as f64;
    let beta_param = 1.0 + (plays - wins) as f64;
    let tail = (1.0 - level) / 2.0;

    match Beta::new(alpha, beta_param) {
        Ok(dist) => {
            let low = dist.inverse_cdf(tail);
            let high = dist.inverse_cdf(1.0 - tail);
            let low = if low.is_finite() { low.clamp(0.0, 1.0) } else { 0.0 };
            let high = if high.is_finite() { high.clamp(0.0, 1.0) } else { 1.0 };
            (low, high)
        }
        Err(_) => (0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use spindrift_core::types::{
        Factor, RecommendationDetails, Signal, SpinRecord, SpinStatus,
    };

    use spindrift_core::types::GroupKind;

    use super::*;

    fn play(seq: u64, won: bool) -> SpinRecord {
        let mut r = SpinRecord::pending(seq, 5, 12);
        r.status = SpinStatus::Resolved;
        r.winning_number = Some(if won { 7 } else { 20 });
        r.recommended_group = Some(GroupKind::Difference);
        if won {
            r.hit_groups.push(GroupKind::Difference);
        }
        r.details = Some(RecommendationDetails {
            final_score: 0.4,
            signal: Signal::Play,
            primary_factor: Factor::HitRate,
            terms: Vec::new(),
            reason: String::new(),
            radius: 2,
            predictor_used: false,
        });
        r
    }

    fn wait(seq: u64) -> SpinRecord {
        let mut r = SpinRecord::pending(seq, 5, 12);
        r.status = SpinStatus::Resolved;
        r.winning_number = Some(20);
        r.details = Some(RecommendationDetails {
            final_score: 0.0,
            signal: Signal::Wait,
            primary_factor: Factor::HitRate,
            terms: Vec::new(),
            reason: String::new(),
            radius: 2,
            predictor_used: false,
        });
        r
    }

    #[test]
    fn ten_plays_three_wins_is_thirty_percent() {
        // Oldest to newest: W W L L W L L L L L.
        let pattern = [true, true, false, false, true, false, false, false, false, false];
        let history: Vec<SpinRecord> = pattern
            .iter()
            .enumerate()
            .map(|(i, &won)| play(i as u64 + 1, won))
            .collect();

        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.plays, 10);
        assert_eq!(report.wins, 3);
        assert!((report.rolling_win_rate - 0.30).abs() < 1e-12);
        // Five losses since the most recent win.
        assert_eq!(report.consecutive_losses, 5);
        assert!(report.warning);
    }

    #[test]
    fn win_resets_the_loss_run() {
        let history = vec![play(1, false), play(2, false), play(3, true)];
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.consecutive_losses, 0);
    }

    #[test]
    fn wait_records_are_skipped() {
        let history = vec![play(1, true), wait(2), wait(3)];
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.plays, 1);
        assert_eq!(report.wins, 1);
    }

    #[test]
    fn short_window_does_not_warn_on_rate() {
        // Two losses only: below the rate floor but the window is not full
        // and the loss run is under the cap.
        let history = vec![play(1, false), play(2, false)];
        let report = assess(&history, &MonitorConfig::default());
        assert!(!report.warning);
    }

    #[test]
    fn loss_run_warns_even_on_short_window() {
        let history: Vec<SpinRecord> = (0..5).map(|i| play(i + 1, false)).collect();
        let report = assess(&history, &MonitorConfig::default());
        assert_eq!(report.consecutive_losses, 5);
        assert!(report.warning);
    }

    #[test]
    fn credible_interval_narrows_with_evidence() {
        let small: Vec<SpinRecord> = (0..4).map(|i| play(i + 1, i % 2 == 0)).collect();
        let cfg = MonitorConfig {
            rolling_window: Some(100),
            ..Default::default()
        };
        let narrow_history: Vec<SpinRecord> =
            (0..60).map(|i| play(i + 1, i % 2 == 0)).collect();

        let wide = assess(&small, &cfg).credible_interval;
        let narrow = assess(&narrow_history, &cfg).credible_interval;
        assert!((narrow.1 - narrow.0) < (wide.1 - wide.0));
    }

    #[test]
    fn empty_history_is_neutral() {
        let report = assess(&[], &MonitorConfig::default());
        assert_eq!(report.plays, 0);
        assert_eq!(report.rolling_win_rate, 0.0);
        assert!(!report.warning);
    }
}
