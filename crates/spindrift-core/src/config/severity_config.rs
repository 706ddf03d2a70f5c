//! Severity normalization configuration.

use serde::{Deserialize, Serialize};

use crate::types::Sector;

/// Thresholds and defaults for loss-streak severity calibration.
///
/// Threshold lists are ratio boundaries, shared across all entities of the
/// same kind, and must be strictly increasing within (0, 1).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeverityConfig {
    /// Per-number level boundaries (6 levels). Default: [0.25, 0.40, 0.55, 0.70, 0.85].
    #[serde(default)]
    pub number_thresholds: Vec<f64>,
    /// Per-sector level boundaries (coarser 4 levels). Default: [0.40, 0.70, 0.90].
    #[serde(default)]
    pub sector_thresholds: Vec<f64>,
    /// Conservative historical maximum for a single number. Default: 180.
    pub default_number_max: Option<u32>,
    /// Conservative historical maxima per sector.
    /// Defaults: voisins 12, tiers 18, orphelins 30.
    pub default_voisins_max: Option<u32>,
    pub default_tiers_max: Option<u32>,
    pub default_orphelins_max: Option<u32>,
    /// Most-recent spins scanned when recomputing streaks. Default: 50.
    pub window_cap: Option<usize>,
    /// Maximum uplift of the Boost policy at ratio 1.0. Default: 0.25.
    pub boost_max: Option<f64>,
    /// Maximum reduction of the Dampen policy at ratio 1.0. Default: 0.30.
    pub dampen_max: Option<f64>,
}

impl SeverityConfig {
    pub fn effective_number_thresholds(&self) -> Vec<f64> {
        if self.number_thresholds.is_empty() {
            vec![0.25, 0.40, 0.55, 0.70, 0.85]
        } else {
            self.number_thresholds.clone()
        }
    }

    pub fn effective_sector_thresholds(&self) -> Vec<f64> {
        if self.sector_thresholds.is_empty() {
            vec![0.40, 0.70, 0.90]
        } else {
            self.sector_thresholds.clone()
        }
    }

    pub fn effective_default_number_max(&self) -> u32 {
        self.default_number_max.unwrap_or(180)
    }

    pub fn effective_default_sector_max(&self, sector: Sector) -> u32 {
        match sector {
            Sector::VoisinsDuZero => self.default_voisins_max.unwrap_or(12),
            Sector::TiersDuCylindre => self.default_tiers_max.unwrap_or(18),
            Sector::Orphelins => self.default_orphelins_max.unwrap_or(30),
        }
    }

    pub fn effective_window_cap(&self) -> usize {
        self.window_cap.unwrap_or(50)
    }

    pub fn effective_boost_max(&self) -> f64 {
        self.boost_max.unwrap_or(0.25)
    }

    pub fn effective_dampen_max(&self) -> f64 {
        self.dampen_max.unwrap_or(0.30)
    }
}
