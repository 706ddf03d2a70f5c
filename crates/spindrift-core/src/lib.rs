//! Core types, wheel geometry, configuration, errors, events, and
//! cancellation for the Spindrift recommendation engine.
//!
//! This crate carries no scoring logic; the engine lives in
//! `spindrift-engine` and builds exclusively on the contracts here.

pub mod config;
pub mod errors;
pub mod events;
pub mod telemetry;
pub mod traits;
pub mod types;
