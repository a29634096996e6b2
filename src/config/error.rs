//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be at least 1")]
    InvalidPoolSize,

    #[error("Pool size must not exceed {max}, got {actual}")]
    PoolSizeTooLarge { max: u32, actual: u32 },

    #[error("Result limit cap must be between 1 and {max}, got {actual}")]
    InvalidResultLimitCap { max: u32, actual: u32 },

    #[error("Default result limit {default} must be between 1 and the cap {cap}")]
    InvalidDefaultLimit { default: u32, cap: u32 },

    #[error("Candidate cap must be at least 1")]
    InvalidCandidateCap,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
