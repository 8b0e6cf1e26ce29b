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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("top_fraction must be within [0, 1], got {0}")]
    InvalidTopFraction(f64),

    #[error("max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("max_steps must be at least 1")]
    InvalidMaxSteps,

    #[error("Catalog delimiter must be a single character, got '{0}'")]
    InvalidDelimiter(String),

    #[error("Agent names must differ, both are '{0}'")]
    DuplicateAgentName(String),

    #[error("Invalid criterion ranking for {agent}: {reason}")]
    InvalidRanking { agent: String, reason: String },

    #[error("Unknown log level: '{0}'")]
    InvalidLogLevel(String),
}
