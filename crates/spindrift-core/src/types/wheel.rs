//! European wheel geometry: physical order, neighbours, distances, sectors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::errors::EngineError;

/// Physical order of pockets on a single-zero wheel, clockwise from 0.
pub const WHEEL_ORDER: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Maximum circular distance between two pockets on a 37-pocket wheel.
pub const MAX_WHEEL_DISTANCE: u8 = 18;

/// Returns the physical position (0..37) of a number on the wheel.
///
/// Panics on numbers outside [0,36]; callers validate at the boundary
/// via [`validate_number`].
pub fn position_of(number: u8) -> usize {
    WHEEL_ORDER
        .iter()
        .position(|&n| n == number)
        .unwrap_or_else(|| panic!("number {number} is not on the wheel"))
}

/// Reject winning numbers outside [0,36] before they enter the data model.
pub fn validate_number(number: u8) -> Result<(), EngineError> {
    if number > 36 {
        return Err(EngineError::InvalidWinningNumber(number));
    }
    Ok(())
}

/// Circular distance between two numbers in physical positions (0..=18).
pub fn wheel_distance(a: u8, b: u8) -> u8 {
    let pa = position_of(a);
    let pb = position_of(b);
    let diff = pa.abs_diff(pb);
    diff.min(WHEEL_ORDER.len() - diff) as u8
}

/// Physical neighbours of `number` out to `radius` positions on each side.
/// The number itself is not included.
pub fn neighbours(number: u8, radius: u8) -> SmallVec<[u8; 16]> {
    let mut out = SmallVec::new();
    let pos = position_of(number);
    let len = WHEEL_ORDER.len();
    for offset in 1..=radius as usize {
        if offset > len / 2 {
            break;
        }
        out.push(WHEEL_ORDER[(pos + len - offset) % len]);
        out.push(WHEEL_ORDER[(pos + offset) % len]);
    }
    out
}

/// The number diametrically opposite `number` on the wheel.
pub fn opposite(number: u8) -> u8 {
    let pos = position_of(number);
    WHEEL_ORDER[(pos + WHEEL_ORDER.len() / 2) % WHEEL_ORDER.len()]
}

/// Classic wheel sectors (French call bets), used for sector-level severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// 17 numbers around zero: 22..25 on the physical wheel.
    VoisinsDuZero,
    /// 12 numbers opposite zero: 27..33.
    TiersDuCylindre,
    /// The remaining 8 numbers in two orphan slices.
    Orphelins,
}

impl Sector {
    pub const ALL: [Sector; 3] = [
        Sector::VoisinsDuZero,
        Sector::TiersDuCylindre,
        Sector::Orphelins,
    ];

    /// Membership list for this sector.
    pub fn members(&self) -> &'static [u8] {
        match self {
            Sector::VoisinsDuZero => {
                &[22, 18, 29, 7, 28, 12, 35, 3, 26, 0, 32, 15, 19, 4, 21, 2, 25]
            }
            Sector::TiersDuCylindre => &[27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33],
            Sector::Orphelins => &[17, 34, 6, 1, 20, 14, 31, 9],
        }
    }

    /// Sector containing `number`.
    pub fn of(number: u8) -> Sector {
        for sector in Sector::ALL {
            if sector.members().contains(&number) {
                return sector;
            }
        }
        // All 37 numbers belong to exactly one sector.
        unreachable!("number {number} belongs to no sector")
    }

    pub fn contains(&self, number: u8) -> bool {
        self.members().contains(&number)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sector::VoisinsDuZero => "voisins_du_zero",
            Sector::TiersDuCylindre => "tiers_du_cylindre",
            Sector::Orphelins => "orphelins",
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
