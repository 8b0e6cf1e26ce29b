//! CriterionName enum - the closed set of attributes items are scored on.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the six fixed scoring criteria.
///
/// The discriminant is the stable serialization id and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CriterionName {
    StoppingPower = 0,
    Range = 1,
    Mobility = 2,
    FireRate = 3,
    Capacity = 4,
    Price = 5,
}

static BY_NAME: Lazy<HashMap<&'static str, CriterionName>> = Lazy::new(|| {
    CriterionName::ALL
        .iter()
        .map(|criterion| (criterion.as_str(), *criterion))
        .collect()
});

impl CriterionName {
    /// All criteria in id order.
    pub const ALL: [CriterionName; 6] = [
        CriterionName::StoppingPower,
        CriterionName::Range,
        CriterionName::Mobility,
        CriterionName::FireRate,
        CriterionName::Capacity,
        CriterionName::Price,
    ];

    /// Returns the stable integer id.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Looks a criterion up by its stable id.
    pub fn from_id(id: u8) -> Result<Self, ValidationError> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or_else(|| ValidationError::out_of_range("criterion_id", 0.0, 5.0, id as f64))
    }

    /// Returns the canonical upper-case name used in catalog headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionName::StoppingPower => "STOPPING_POWER",
            CriterionName::Range => "RANGE",
            CriterionName::Mobility => "MOBILITY",
            CriterionName::FireRate => "FIRE_RATE",
            CriterionName::Capacity => "CAPACITY",
            CriterionName::Price => "PRICE",
        }
    }
}

impl fmt::Display for CriterionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CriterionName {
    type Err = ValidationError;

    /// Parses a canonical name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        BY_NAME.get(key.as_str()).copied().ok_or_else(|| {
            ValidationError::invalid_format(
                "criterion",
                format!("'{}' is not a known criterion", s.trim()),
            )
        })
    }
}
