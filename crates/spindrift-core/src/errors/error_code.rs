//! Stable error codes for external reporting.

pub const CONFIG_FILE_NOT_FOUND: &str = "SD-CFG-001";
pub const CONFIG_PARSE: &str = "SD-CFG-002";
pub const CONFIG_VALIDATION: &str = "SD-CFG-003";

pub const INVALID_WINNING_NUMBER: &str = "SD-ENG-001";
pub const CYCLE_PENDING: &str = "SD-ENG-002";
pub const NO_PENDING_CYCLE: &str = "SD-ENG-003";

pub const SNAPSHOT_SERIALIZE: &str = "SD-SNAP-001";
pub const SNAPSHOT_DESERIALIZE: &str = "SD-SNAP-002";

/// Maps every error variant to a stable, documented code.
pub trait SpindriftErrorCode {
    fn error_code(&self) -> &'static str;
}
