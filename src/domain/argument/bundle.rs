//! Argument - a structured justification bundle for or against an item.

use serde::{Deserialize, Serialize};

use super::{Comparison, CoupleValue};
use crate::domain::preferences::{CriterionName, Item};

/// Whether an argument backs or opposes its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Supports,
    Attacks,
}

/// Premises justifying a decision about one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    decision: Decision,
    item: Item,
    comparisons: Vec<Comparison>,
    couple_values: Vec<CoupleValue>,
}

impl Argument {
    pub fn new(decision: Decision, item: Item) -> Self {
        Self {
            decision,
            item,
            comparisons: Vec::new(),
            couple_values: Vec::new(),
        }
    }

    pub fn supporting(item: Item) -> Self {
        Self::new(Decision::Supports, item)
    }

    pub fn attacking(item: Item) -> Self {
        Self::new(Decision::Attacks, item)
    }

    /// Adds a ranking premise.
    pub fn with_comparison(mut self, better: CriterionName, worse: CriterionName) -> Self {
        self.comparisons.push(Comparison::new(better, worse));
        self
    }

    /// Adds a value premise.
    pub fn with_couple_value(mut self, premise: CoupleValue) -> Self {
        self.couple_values.push(premise);
        self
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn supports(&self) -> bool {
        self.decision == Decision::Supports
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    pub fn couple_values(&self) -> &[CoupleValue] {
        &self.couple_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_supporting_argument_with_premises() {
        let argument = Argument::supporting(Item::new("AK-47").unwrap())
            .with_couple_value(CoupleValue::new(CriterionName::StoppingPower, 9.0))
            .with_comparison(CriterionName::StoppingPower, CriterionName::Price);

        assert!(argument.supports());
        assert_eq!(argument.item().name(), "AK-47");
        assert_eq!(argument.couple_values().len(), 1);
        assert_eq!(
            argument.comparisons(),
            &[Comparison::new(CriterionName::StoppingPower, CriterionName::Price)]
        );
    }

    #[test]
    fn attacking_argument_does_not_support() {
        let argument = Argument::attacking(Item::new("P90").unwrap());
        assert_eq!(argument.decision(), Decision::Attacks);
        assert!(!argument.supports());
    }
}
