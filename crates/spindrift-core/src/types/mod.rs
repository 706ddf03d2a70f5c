//! Domain types: wheel geometry, candidate groups, factors, spin records.

pub mod collections;
pub mod factor;
pub mod group;
pub mod spin;
pub mod wheel;

pub use factor::{Factor, Signal};
pub use group::{dynamic_radius, hit_zone, GroupKind};
pub use spin::{FactorTerm, FailureMode, RecommendationDetails, SpinRecord, SpinStatus};
pub use wheel::{validate_number, wheel_distance, Sector, MAX_WHEEL_DISTANCE, WHEEL_ORDER};
