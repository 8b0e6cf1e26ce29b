//! Argument Generator - Premise selection and counter-proposal search.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Argument, ArgumentError, CoupleValue};
use crate::domain::preferences::{Item, PreferenceError, Preferences};

/// A value strictly above this supports an item.
pub const SUPPORT_THRESHOLD: f64 = 4.0;

/// A value strictly below this attacks an item.
pub const ATTACK_THRESHOLD: f64 = 5.0;

/// Which search step produced a counter-proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterReason {
    /// Another item beats the attacked value on the same criterion.
    BetterValueSameCriterion,
    /// Another item beats the proposal on the next more important criterion.
    DifferentCriterion,
    /// Nothing better was found; a random item was drawn.
    FallbackRandom,
}

impl CounterReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterReason::BetterValueSameCriterion => "better-value-same-criterion",
            CounterReason::DifferentCriterion => "different-criterion",
            CounterReason::FallbackRandom => "fallback-random",
        }
    }
}

impl fmt::Display for CounterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An alternative item with the premise that justifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterProposal {
    pub reason: CounterReason,
    pub item: Item,
    pub premise: CoupleValue,
}

/// Stateless premise and counter-proposal functions.
///
/// Randomness is always supplied by the caller so runs can be reproduced
/// from a seed.
pub struct ArgumentGenerator;

impl ArgumentGenerator {
    /// Criteria where the item scores above 4, most important first.
    ///
    /// A value of exactly 5 is neutral and never supports an item.
    pub fn supporting_premises(
        item: &Item,
        prefs: &Preferences,
    ) -> Result<Vec<CoupleValue>, PreferenceError> {
        Self::premises_where(item, prefs, |value| {
            value > SUPPORT_THRESHOLD && value != ATTACK_THRESHOLD
        })
    }

    /// Criteria where the item scores below 5, most important first.
    ///
    /// Uses the same importance order as `supporting_premises`, so a value
    /// of exactly 5 lands in neither list.
    pub fn attacking_premises(
        item: &Item,
        prefs: &Preferences,
    ) -> Result<Vec<CoupleValue>, PreferenceError> {
        Self::premises_where(item, prefs, |value| value < ATTACK_THRESHOLD)
    }

    fn premises_where(
        item: &Item,
        prefs: &Preferences,
        keep: impl Fn(f64) -> bool,
    ) -> Result<Vec<CoupleValue>, PreferenceError> {
        let mut premises = Vec::new();
        for criterion in prefs.ranking() {
            let value = prefs.value(item, *criterion)?;
            if keep(value) {
                premises.push(CoupleValue::new(*criterion, value));
            }
        }
        Ok(premises)
    }

    /// Picks one supporting premise uniformly at random.
    ///
    /// # Errors
    ///
    /// - `NoSupportingPremise` if the item has no value above 4 other than 5
    pub fn choose_supporting_argument<R: Rng + ?Sized>(
        item: &Item,
        prefs: &Preferences,
        rng: &mut R,
    ) -> Result<CoupleValue, ArgumentError> {
        Self::supporting_premises(item, prefs)?
            .choose(rng)
            .copied()
            .ok_or_else(|| ArgumentError::NoSupportingPremise {
                item: item.name().to_string(),
            })
    }

    /// Picks one attacking premise uniformly at random.
    ///
    /// # Errors
    ///
    /// - `NoAttackingPremise` if the item has no value below 5
    pub fn choose_attacking_argument<R: Rng + ?Sized>(
        item: &Item,
        prefs: &Preferences,
        rng: &mut R,
    ) -> Result<CoupleValue, ArgumentError> {
        Self::attacking_premises(item, prefs)?
            .choose(rng)
            .copied()
            .ok_or_else(|| ArgumentError::NoAttackingPremise {
                item: item.name().to_string(),
            })
    }

    /// Full supporting argument: every supporting premise, plus a comparison
    /// for each adjacent pair of supporting criteria.
    pub fn supporting_argument(item: &Item, prefs: &Preferences) -> Result<Argument, ArgumentError> {
        let premises = Self::supporting_premises(item, prefs)?;
        if premises.is_empty() {
            return Err(ArgumentError::NoSupportingPremise {
                item: item.name().to_string(),
            });
        }

        let mut argument = Argument::supporting(item.clone());
        for pair in premises.windows(2) {
            argument = argument.with_comparison(pair[0].criterion, pair[1].criterion);
        }
        for premise in premises {
            argument = argument.with_couple_value(premise);
        }
        Ok(argument)
    }

    /// Finds an alternative to `proposed` after `attacked` was argued for it.
    ///
    /// Tried in order:
    /// 1. first catalog item beating `attacked.value` on the same criterion
    /// 2. first catalog item beating `proposed` on the criterion ranked
    ///    immediately above `attacked.criterion`
    /// 3. a uniformly random catalog item with one of its supporting premises
    ///
    /// # Errors
    ///
    /// - `EmptyCatalog` if `catalog` is empty
    /// - `NoSupportingPremise` if the fallback item has nothing to argue with
    /// - `Preference` if a value lookup fails
    pub fn counter_proposal<R: Rng + ?Sized>(
        proposed: &Item,
        attacked: &CoupleValue,
        catalog: &[Item],
        prefs: &Preferences,
        rng: &mut R,
    ) -> Result<CounterProposal, ArgumentError> {
        if catalog.is_empty() {
            return Err(ArgumentError::EmptyCatalog);
        }

        for candidate in catalog {
            let value = prefs.value(candidate, attacked.criterion)?;
            if value > attacked.value {
                return Ok(CounterProposal {
                    reason: CounterReason::BetterValueSameCriterion,
                    item: candidate.clone(),
                    premise: CoupleValue::new(attacked.criterion, value),
                });
            }
        }

        if let Some(better) = prefs.next_more_important(attacked.criterion) {
            let baseline = prefs.value(proposed, better)?;
            for candidate in catalog {
                let value = prefs.value(candidate, better)?;
                if value > baseline {
                    return Ok(CounterProposal {
                        reason: CounterReason::DifferentCriterion,
                        item: candidate.clone(),
                        premise: CoupleValue::new(better, value),
                    });
                }
            }
        }

        let fallback = catalog.choose(rng).ok_or(ArgumentError::EmptyCatalog)?;
        let premise = Self::choose_supporting_argument(fallback, prefs, rng)?;
        Ok(CounterProposal {
            reason: CounterReason::FallbackRandom,
            item: fallback.clone(),
            premise,
        })
    }
}
