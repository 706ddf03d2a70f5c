//! Configuration errors.

use super::error_code::{self, SpindriftErrorCode};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config at {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl SpindriftErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::CONFIG_FILE_NOT_FOUND,
            Self::ParseError { .. } => error_code::CONFIG_PARSE,
            Self::ValidationFailed { .. } => error_code::CONFIG_VALIDATION,
        }
    }
}
