//! Negotiation protocol configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::negotiation::{NegotiationPolicy, DEFAULT_MAX_ROUNDS, DEFAULT_TOP_FRACTION};

/// Protocol tunables and the random seed
#[derive(Debug, Clone, Deserialize)]
pub struct NegotiationConfig {
    /// Share of the catalog an agent accepts outright
    #[serde(default = "default_top_fraction")]
    pub top_fraction: f64,

    /// ARGUE messages processed before timing out
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Answer ASK_WHY with an argument instead of giving up
    #[serde(default = "default_respond_with_argument")]
    pub respond_with_argument: bool,

    /// RNG seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NegotiationConfig {
    /// The engine policy described by this section
    pub fn policy(&self) -> NegotiationPolicy {
        NegotiationPolicy {
            top_fraction: self.top_fraction,
            max_rounds: self.max_rounds,
            respond_with_argument: self.respond_with_argument,
        }
    }

    /// Validate negotiation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.top_fraction) {
            return Err(ValidationError::InvalidTopFraction(self.top_fraction));
        }
        if self.max_rounds == 0 {
            return Err(ValidationError::InvalidMaxRounds);
        }
        Ok(())
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            top_fraction: default_top_fraction(),
            max_rounds: default_max_rounds(),
            respond_with_argument: default_respond_with_argument(),
            seed: None,
        }
    }
}

fn default_top_fraction() -> f64 {
    DEFAULT_TOP_FRACTION
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

fn default_respond_with_argument() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiation_defaults() {
        let config = NegotiationConfig::default();
        assert_eq!(config.top_fraction, 0.1);
        assert_eq!(config.max_rounds, 10);
        assert!(config.respond_with_argument);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_mirrors_config() {
        let config = NegotiationConfig {
            top_fraction: 0.5,
            max_rounds: 3,
            respond_with_argument: false,
            seed: Some(9),
        };
        let policy = config.policy();
        assert_eq!(policy.top_fraction, 0.5);
        assert_eq!(policy.max_rounds, 3);
        assert!(!policy.respond_with_argument);
    }

    #[test]
    fn test_rejects_fraction_above_one() {
        let config = NegotiationConfig {
            top_fraction: 1.2,
            ..NegotiationConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTopFraction(1.2)));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let config = NegotiationConfig {
            max_rounds: 0,
            ..NegotiationConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxRounds));
    }

    #[test]
    fn test_deserializes_partial_section() {
        let json = r#"{ "max_rounds": 4, "seed": 17 }"#;
        let config: NegotiationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_rounds, 4);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.top_fraction, 0.1);
    }
}
