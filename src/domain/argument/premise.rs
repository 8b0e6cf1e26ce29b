//! Premise value objects: CoupleValue and Comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::preferences::CriterionName;

/// A (criterion, value) premise, e.g. "PRICE = 8".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoupleValue {
    pub criterion: CriterionName,
    pub value: f64,
}

impl CoupleValue {
    pub fn new(criterion: CriterionName, value: f64) -> Self {
        Self { criterion, value }
    }
}

impl fmt::Display for CoupleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.criterion, self.value)
    }
}

/// A ranking premise: `better` matters more than `worse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub better: CriterionName,
    pub worse: CriterionName,
}

impl Comparison {
    pub fn new(better: CriterionName, worse: CriterionName) -> Self {
        Self { better, worse }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.better, self.worse)
    }
}
