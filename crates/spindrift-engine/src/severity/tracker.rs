//! Severity cache over all numbers and sectors, fed by the session spin
//! window and optionally calibrated by an external statistics provider.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use spindrift_core::config::SeverityConfig;
use spindrift_core::types::collections::FxHashMap;
use spindrift_core::types::Sector;

use super::normalizer::{self, ModifierPolicy, SeverityAssessment};
use super::state::{DataSource, SeverityState};

/// Externally supplied severity figures; partial coverage is permitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalSeverityReport {
    /// Per-number `{current streak, historical max}` entries.
    pub numbers: FxHashMap<u8, (u32, u32)>,
    /// Per-sector entries.
    pub sectors: FxHashMap<Sector, (u32, u32)>,
}

/// Severity state for every number and sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityTracker {
    numbers: FxHashMap<u8, SeverityState>,
    sectors: FxHashMap<Sector, SeverityState>,
}

impl SeverityTracker {
    /// Fresh tracker with conservative default maxima for every entity.
    pub fn new(cfg: &SeverityConfig) -> Self {
        let mut numbers = FxHashMap::default();
        for n in 0..=36u8 {
            numbers.insert(n, SeverityState::with_default_max(cfg.effective_default_number_max()));
        }
        let mut sectors = FxHashMap::default();
        for sector in Sector::ALL {
            sectors.insert(
                sector,
                SeverityState::with_default_max(cfg.effective_default_sector_max(sector)),
            );
        }
        Self { numbers, sectors }
    }

    /// Reset to defaults on a context change (table switch, new session).
    pub fn reset(&mut self, cfg: &SeverityConfig) {
        *self = Self::new(cfg);
    }

    /// Recompute every entity's loss streak from a spin window
    /// (oldest→newest). Runs over the entire supplied window, capped at the
    /// configured most-recent count, every time the window is replaced
    /// wholesale; only true appends may use [`note_spin`].
    ///
    /// External calibration survives: externally supplied maxima are kept,
    /// only the current streak is refreshed.
    ///
    /// [`note_spin`]: SeverityTracker::note_spin
    pub fn recompute_from_window(&mut self, window: &[u8], cfg: &SeverityConfig) {
        let cap = cfg.effective_window_cap();
        let start = window.len().saturating_sub(cap);
        let window = &window[start..];

        for (&n, state) in self.numbers.iter_mut() {
            state.current_loss_streak = loss_streak(window, |spin| spin == n);
            if !state.is_externally_calibrated {
                state.data_source = DataSource::Calculated;
            }
        }

        for (&sector, state) in self.sectors.iter_mut() {
            state.current_loss_streak = loss_streak(window, |spin| sector.contains(spin));
            if !state.is_externally_calibrated {
                state.data_source = DataSource::Calculated;
            }
        }

        debug!(spins = window.len(), "severity streaks recomputed from window");
    }

    /// Cheap incremental update for a true append: the winner's entities
    /// reset to zero, everything else increments, saturating at the window
    /// cap so an append-built cache never diverges from a window recompute.
    pub fn note_spin(&mut self, winning_number: u8, cfg: &SeverityConfig) {
        let cap = cfg.effective_window_cap() as u32;
        for (&n, state) in self.numbers.iter_mut() {
            if n == winning_number {
                state.current_loss_streak = 0;
            } else {
                state.current_loss_streak = (state.current_loss_streak + 1).min(cap);
            }
            if !state.is_externally_calibrated {
                state.data_source = DataSource::Calculated;
            }
        }
        let winning_sector = Sector::of(winning_number);
        for (&sector, state) in self.sectors.iter_mut() {
            if sector == winning_sector {
                state.current_loss_streak = 0;
            } else {
                state.current_loss_streak = (state.current_loss_streak + 1).min(cap);
            }
            if !state.is_externally_calibrated {
                state.data_source = DataSource::Calculated;
            }
        }
    }

    /// Apply externally supplied maxima. External data always wins; partial
    /// coverage is tracked per entity. Returns how many entities were
    /// calibrated. Entities the report misses keep session-calculated
    /// figures — a data-quality condition, not a fault.
    pub fn apply_external(&mut self, report: &ExternalSeverityReport) -> usize {
        let mut applied = 0;
        for (&n, &(current, max)) in &report.numbers {
            if n > 36 {
                warn!(number = n, "external severity entry outside wheel range, skipped");
                continue;
            }
            if let Some(state) = self.numbers.get_mut(&n) {
                state.calibrate_external(current, max);
                applied += 1;
            }
        }
        for (&sector, &(current, max)) in &report.sectors {
            if let Some(state) = self.sectors.get_mut(&sector) {
                state.calibrate_external(current, max);
                applied += 1;
            }
        }

        let total = self.numbers.len() + self.sectors.len();
        if applied < total {
            warn!(
                applied,
                total, "partial external severity coverage; defaults remain for the rest"
            );
        }
        applied
    }

    pub fn number_state(&self, n: u8) -> Option<&SeverityState> {
        self.numbers.get(&n)
    }

    pub fn sector_state(&self, sector: Sector) -> Option<&SeverityState> {
        self.sectors.get(&sector)
    }

    /// Calibrated assessment for one number (Boost policy: long sleeps are
    /// contextually interesting).
    pub fn assess_number(&self, n: u8, cfg: &SeverityConfig) -> SeverityAssessment {
        let state = self.numbers.get(&n).copied().unwrap_or_else(|| {
            SeverityState::with_default_max(cfg.effective_default_number_max())
        });
        normalizer::normalize(
            &state,
            &cfg.effective_number_thresholds(),
            ModifierPolicy::Boost,
            cfg,
        )
    }

    /// Calibrated assessment for one sector (Dampen policy: elevated sector
    /// streaks read as variance, reducing confidence).
    pub fn assess_sector(&self, sector: Sector, cfg: &SeverityConfig) -> SeverityAssessment {
        let state = self.sectors.get(&sector).copied().unwrap_or_else(|| {
            SeverityState::with_default_max(cfg.effective_default_sector_max(sector))
        });
        normalizer::normalize(
            &state,
            &cfg.effective_sector_thresholds(),
            ModifierPolicy::Dampen,
            cfg,
        )
    }

    /// Aggregate number-level assessment over a candidate group's hit-zone.
    pub fn assess_zone(&self, zone: &[u8], cfg: &SeverityConfig) -> SeverityAssessment {
        let states: Vec<SeverityState> = zone
            .iter()
            .filter_map(|n| self.numbers.get(n).copied())
            .collect();
        normalizer::aggregate(
            &states,
            &cfg.effective_number_thresholds(),
            ModifierPolicy::Boost,
            cfg,
        )
    }
}

/// Consecutive most-recent spins, newest to oldest, that fail the
/// membership test, stopping at the first match.
fn loss_streak(window: &[u8], is_member: impl Fn(u8) -> bool) -> u32 {
    let mut streak = 0;
    for &spin in window.iter().rev() {
        if is_member(spin) {
            break;
        }
        streak += 1;
    }
    streak
}
