//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHOICE_PARLEY` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use choice_parley::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading catalog from {}", config.catalog.path.display());
//! ```

mod catalog;
mod error;
mod logging;
mod negotiation;
mod simulation;

pub use catalog::{CatalogConfig, CatalogFormat};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use negotiation::NegotiationConfig;
pub use simulation::{parse_ranking, SimulationConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Protocol tunables (top fraction, rounds, seed)
    #[serde(default)]
    pub negotiation: NegotiationConfig,

    /// Catalog file location and format
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Agents and step budget for the driver
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHOICE_PARLEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHOICE_PARLEY__NEGOTIATION__MAX_ROUNDS=5` -> `negotiation.max_rounds = 5`
    /// - `CHOICE_PARLEY__CATALOG__PATH=data/weapons.csv` -> `catalog.path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHOICE_PARLEY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.negotiation.validate()?;
        self.catalog.validate()?;
        self.simulation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "CHOICE_PARLEY__NEGOTIATION__TOP_FRACTION",
        "CHOICE_PARLEY__NEGOTIATION__SEED",
        "CHOICE_PARLEY__CATALOG__PATH",
        "CHOICE_PARLEY__CATALOG__FORMAT",
        "CHOICE_PARLEY__SIMULATION__MAX_STEPS",
        "CHOICE_PARLEY__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.negotiation.max_rounds, 10);
        assert_eq!(config.catalog.path, PathBuf::from("data/weapons_dataset.csv"));
        assert_eq!(config.simulation.max_steps, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHOICE_PARLEY__NEGOTIATION__TOP_FRACTION", "0.5");
        env::set_var("CHOICE_PARLEY__NEGOTIATION__SEED", "42");
        env::set_var("CHOICE_PARLEY__CATALOG__PATH", "data/catalog.yaml");
        env::set_var("CHOICE_PARLEY__CATALOG__FORMAT", "yaml");
        env::set_var("CHOICE_PARLEY__SIMULATION__MAX_STEPS", "7");
        env::set_var("CHOICE_PARLEY__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.negotiation.top_fraction, 0.5);
        assert_eq!(config.negotiation.seed, Some(42));
        assert_eq!(config.catalog.path, PathBuf::from("data/catalog.yaml"));
        assert_eq!(config.catalog.format, CatalogFormat::Yaml);
        assert_eq!(config.simulation.max_steps, 7);
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_reports_first_bad_section() {
        let mut config = AppConfig::default();
        config.negotiation.max_rounds = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxRounds));
    }
}
