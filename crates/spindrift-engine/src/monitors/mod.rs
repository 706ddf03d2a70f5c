//! Drift monitors: read-only analyses over resolved history that feed
//! veto/caution flags back into the next scoring cycle.

pub mod factor_shift;
pub mod rolling;

pub use factor_shift::FactorShift;
pub use rolling::RollingPerformance;

use spindrift_core::config::MonitorConfig;
use spindrift_core::types::SpinRecord;

use crate::scoring::ContextFlags;

/// Run both monitors and fold their findings into context flags for the
/// next cycle.
pub fn derive_flags(history: &[SpinRecord], cfg: &MonitorConfig) -> ContextFlags {
    let rolling = rolling::assess(history, cfg);
    let shift = factor_shift::assess(history, cfg);
    flags_from(&rolling, &shift)
}

/// Fold already-computed assessments into context flags.
pub fn flags_from(rolling: &RollingPerformance, shift: &FactorShift) -> ContextFlags {
    let mut cautions: Vec<String> = Vec::new();
    if rolling.warning {
        cautions.push(format!(
            "rolling win rate {:.0}% over {} plays, {} consecutive losses",
            rolling.rolling_win_rate * 100.0,
            rolling.plays,
            rolling.consecutive_losses
        ));
    }
    if shift.drifting {
        cautions.push(format!(
            "factor drift: best share {:.0}%, concentration {:.2}",
            shift.dominance_share * 100.0,
            shift.concentration
        ));
    }

    ContextFlags {
        deny_play: rolling.warning || shift.drifting,
        caution: if cautions.is_empty() {
            None
        } else {
            Some(cautions.join("; "))
        },
    }
}
