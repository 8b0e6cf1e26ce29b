//! Simulation driver configuration

use serde::Deserialize;
use std::str::FromStr;

use super::error::ValidationError;
use crate::domain::preferences::CriterionName;

/// Who negotiates and for how long
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Upper bound on bus ticks before the driver gives up
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Name of the proposing agent
    #[serde(default = "default_first_agent")]
    pub first_agent: String,

    /// Name of the responding agent
    #[serde(default = "default_second_agent")]
    pub second_agent: String,

    /// Comma-separated criteria, most important first
    pub first_ranking: Option<String>,

    /// Comma-separated criteria, most important first
    pub second_ranking: Option<String>,
}

impl SimulationConfig {
    /// Resolves both rankings against the catalog's criteria.
    ///
    /// Without explicit rankings the first agent follows catalog column
    /// order and the second agent the reverse.
    pub fn rankings(
        &self,
        criteria: &[CriterionName],
    ) -> Result<(Vec<CriterionName>, Vec<CriterionName>), ValidationError> {
        let first = match &self.first_ranking {
            Some(raw) => parse_ranking(&self.first_agent, raw)?,
            None => criteria.to_vec(),
        };
        let second = match &self.second_ranking {
            Some(raw) => parse_ranking(&self.second_agent, raw)?,
            None => criteria.iter().rev().copied().collect(),
        };
        Ok((first, second))
    }

    /// Validate simulation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_steps == 0 {
            return Err(ValidationError::InvalidMaxSteps);
        }
        if self.first_agent.trim().is_empty() {
            return Err(ValidationError::MissingRequired("simulation.first_agent"));
        }
        if self.second_agent.trim().is_empty() {
            return Err(ValidationError::MissingRequired("simulation.second_agent"));
        }
        if self.first_agent.trim() == self.second_agent.trim() {
            return Err(ValidationError::DuplicateAgentName(self.first_agent.clone()));
        }
        if let Some(raw) = &self.first_ranking {
            parse_ranking(&self.first_agent, raw)?;
        }
        if let Some(raw) = &self.second_ranking {
            parse_ranking(&self.second_agent, raw)?;
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            first_agent: default_first_agent(),
            second_agent: default_second_agent(),
            first_ranking: None,
            second_ranking: None,
        }
    }
}

/// Parses `"PRICE, RANGE"` into criteria, rejecting unknown or repeated names.
pub fn parse_ranking(agent: &str, raw: &str) -> Result<Vec<CriterionName>, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidRanking {
        agent: agent.to_string(),
        reason,
    };

    let mut ranking = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let criterion = CriterionName::from_str(name).map_err(|e| invalid(e.to_string()))?;
        if ranking.contains(&criterion) {
            return Err(invalid(format!("{} listed twice", criterion)));
        }
        ranking.push(criterion);
    }

    if ranking.is_empty() {
        return Err(invalid("no criteria given".to_string()));
    }
    Ok(ranking)
}

fn default_max_steps() -> u32 {
    20
}

fn default_first_agent() -> String {
    "A".to_string()
}

fn default_second_agent() -> String {
    "B".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use CriterionName::*;

    #[test]
    fn test_simulation_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.max_steps, 20);
        assert_eq!(config.first_agent, "A");
        assert_eq!(config.second_agent, "B");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_rankings_mirror_each_other() {
        let config = SimulationConfig::default();
        let (first, second) = config.rankings(&[Price, Range, Mobility]).unwrap();
        assert_eq!(first, vec![Price, Range, Mobility]);
        assert_eq!(second, vec![Mobility, Range, Price]);
    }

    #[test]
    fn test_explicit_ranking_is_parsed() {
        let config = SimulationConfig {
            second_ranking: Some("range, price ,MOBILITY".to_string()),
            ..SimulationConfig::default()
        };
        let (_, second) = config.rankings(&[Price, Range, Mobility]).unwrap();
        assert_eq!(second, vec![Range, Price, Mobility]);
    }

    #[test]
    fn test_rejects_unknown_criterion() {
        let err = parse_ranking("A", "PRICE,WEIGHT").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRanking { .. }));
    }

    #[test]
    fn test_rejects_repeated_criterion() {
        assert!(parse_ranking("A", "PRICE,price").is_err());
    }

    #[test]
    fn test_rejects_empty_ranking() {
        assert!(parse_ranking("A", " , ").is_err());
    }

    #[test]
    fn test_rejects_same_agent_names() {
        let config = SimulationConfig {
            second_agent: "A".to_string(),
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicateAgentName("A".to_string()))
        );
    }

    #[test]
    fn test_rejects_zero_steps() {
        let config = SimulationConfig {
            max_steps: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxSteps));
    }
}
