//! Candidate groups derived from the two input numbers.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::wheel;

/// The fixed family of candidate groups, each deriving a base value from
/// the pair of inputs and claiming a hit-zone around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Absolute difference of the inputs.
    Difference,
    /// Sum of the inputs, wrapped onto the wheel.
    Sum,
    /// Wheel-opposite of the difference base.
    Mirror,
}

impl GroupKind {
    /// Fixed iteration order; the scorer relies on this for determinism.
    pub const ALL: [GroupKind; 3] = [GroupKind::Difference, GroupKind::Sum, GroupKind::Mirror];

    /// Base number for this group given the two inputs.
    pub fn base_value(&self, input_a: u8, input_b: u8) -> u8 {
        match self {
            GroupKind::Difference => input_a.abs_diff(input_b) % 37,
            GroupKind::Sum => ((input_a as u16 + input_b as u16) % 37) as u8,
            GroupKind::Mirror => wheel::opposite(input_a.abs_diff(input_b) % 37),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::Difference => "difference",
            GroupKind::Sum => "sum",
            GroupKind::Mirror => "mirror",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hit-zone for a base number: the base plus its physical neighbours out to
/// `radius` positions on each side.
pub fn hit_zone(base: u8, radius: u8) -> SmallVec<[u8; 16]> {
    let mut zone = SmallVec::new();
    zone.push(base);
    zone.extend(wheel::neighbours(base, radius));
    zone
}

/// Effective neighbour radius for a group, narrowing as its historical
/// hit-rate rises. Monotone non-increasing in `hit_rate`, clamped to
/// `[1, base_radius]`; an unproven group keeps the full radius.
pub fn dynamic_radius(hit_rate: f64, base_radius: u8) -> u8 {
    if base_radius <= 1 {
        return base_radius.max(1);
    }
    let shrink = (hit_rate.clamp(0.0, 1.0) * base_radius as f64).floor() as u8;
    base_radius.saturating_sub(shrink).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_values_stay_on_the_wheel() {
        for kind in GroupKind::ALL {
            for a in 0..=36u8 {
                for b in 0..=36u8 {
                    assert!(kind.base_value(a, b) <= 36);
                }
            }
        }
    }

    #[test]
    fn difference_base_matches_inputs() {
        assert_eq!(GroupKind::Difference.base_value(5, 12), 7);
        assert_eq!(GroupKind::Difference.base_value(12, 5), 7);
        assert_eq!(GroupKind::Sum.base_value(5, 12), 17);
        assert_eq!(GroupKind::Sum.base_value(30, 30), 23);
    }

    #[test]
    fn hit_zone_contains_base_and_neighbours() {
        let zone = hit_zone(7, 2);
        assert_eq!(zone.len(), 5);
        assert!(zone.contains(&7));
    }

    #[test]
    fn radius_narrows_with_hit_rate() {
        assert_eq!(dynamic_radius(0.0, 2), 2);
        assert_eq!(dynamic_radius(0.49, 2), 2);
        assert_eq!(dynamic_radius(0.5, 2), 1);
        assert_eq!(dynamic_radius(1.0, 2), 1);
        assert_eq!(dynamic_radius(0.9, 1), 1);
        // Never widens, never hits zero.
        for base in 1..=4u8 {
            let mut last = base;
            for step in 0..=10 {
                let r = dynamic_radius(step as f64 / 10.0, base);
                assert!(r <= last && r >= 1);
                last = r;
            }
        }
    }
}
