//! Configuration system for Spindrift.
//! TOML-based, layered resolution: env > project file > defaults.

pub mod influence_config;
pub mod monitor_config;
pub mod predictor_config;
pub mod scoring_config;
pub mod severity_config;
pub mod spindrift_config;

pub use influence_config::InfluenceConfig;
pub use monitor_config::MonitorConfig;
pub use predictor_config::PredictorConfig;
pub use scoring_config::ScoringConfig;
pub use severity_config::SeverityConfig;
pub use spindrift_config::SpindriftConfig;
