//! Error handling for Spindrift.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod snapshot_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::SpindriftErrorCode;
pub use snapshot_error::SnapshotError;
