//! Preferences - one agent's criterion ranking over the shared catalog.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use super::{Catalog, CriterionName, Item, PreferenceError};

/// An agent's ranked criteria plus the catalog values it scores with.
///
/// # Invariants
///
/// - `ranking` is non-empty and free of duplicates
/// - `ranking` is a permutation of the catalog's criteria
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct Preferences {
    ranking: Vec<CriterionName>,
    catalog: Arc<Catalog>,
}

impl Preferences {
    /// Creates preferences from a most-important-first ranking.
    ///
    /// # Errors
    ///
    /// - `InvalidRanking` if the ranking is empty, repeats a criterion, or
    ///   is not a permutation of the catalog's criteria
    pub fn new(ranking: Vec<CriterionName>, catalog: Arc<Catalog>) -> Result<Self, PreferenceError> {
        if ranking.is_empty() {
            return Err(PreferenceError::invalid_ranking("ranking is empty"));
        }

        let mut seen = HashSet::new();
        for criterion in &ranking {
            if !seen.insert(*criterion) {
                return Err(PreferenceError::invalid_ranking(format!(
                    "{} is ranked more than once",
                    criterion
                )));
            }
        }

        if let Some(missing) = catalog.criteria().iter().find(|c| !seen.contains(*c)) {
            return Err(PreferenceError::invalid_ranking(format!(
                "{} is valued in the catalog but not ranked",
                missing
            )));
        }
        if let Some(extra) = ranking.iter().find(|c| !catalog.criteria().contains(*c)) {
            return Err(PreferenceError::invalid_ranking(format!(
                "{} is ranked but has no catalog values",
                extra
            )));
        }

        Ok(Self { ranking, catalog })
    }

    /// Criteria in importance order, most important first.
    pub fn ranking(&self) -> &[CriterionName] {
        &self.ranking
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Returns the value of `item` on `criterion`.
    pub fn value(&self, item: &Item, criterion: CriterionName) -> Result<f64, PreferenceError> {
        self.catalog.value(item, criterion)
    }

    /// 0-based importance position of a criterion.
    pub fn rank_of(&self, criterion: CriterionName) -> Option<usize> {
        self.ranking.iter().position(|c| *c == criterion)
    }

    /// Scoring weight: `ranking.len() - rank`, so the top criterion weighs most.
    pub fn weight(&self, criterion: CriterionName) -> Option<f64> {
        self.rank_of(criterion)
            .map(|rank| (self.ranking.len() - rank) as f64)
    }

    /// True iff `first` is ranked above `second`.
    ///
    /// A criterion outside the ranking is never preferred.
    pub fn is_preferred_criterion(&self, first: CriterionName, second: CriterionName) -> bool {
        match (self.rank_of(first), self.rank_of(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// The criterion ranked immediately above `criterion`, if any.
    pub fn next_more_important(&self, criterion: CriterionName) -> Option<CriterionName> {
        self.rank_of(criterion)
            .and_then(|rank| rank.checked_sub(1))
            .map(|rank| self.ranking[rank])
    }

    /// Weighted sum of the item's values over the ranking.
    pub fn score(&self, item: &Item) -> Result<f64, PreferenceError> {
        let count = self.ranking.len();
        let mut total = 0.0;
        for (rank, criterion) in self.ranking.iter().enumerate() {
            total += self.value(item, *criterion)? * (count - rank) as f64;
        }
        Ok(total)
    }

    /// True iff `first` scores strictly higher than `second`.
    pub fn is_preferred_item(&self, first: &Item, second: &Item) -> Result<bool, PreferenceError> {
        Ok(self.score(first)? > self.score(second)?)
    }

    /// Items ordered by descending score; ties keep their input order.
    pub fn rank_items<'a>(&self, items: &'a [Item]) -> Result<Vec<&'a Item>, PreferenceError> {
        let mut scored = Vec::with_capacity(items.len());
        for item in items {
            scored.push((item, self.score(item)?));
        }
        // sort_by is stable, which is what makes the earlier item win a tie
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(scored.into_iter().map(|(item, _)| item).collect())
    }

    /// The highest-scoring item; the earliest-listed wins a tie.
    ///
    /// # Errors
    ///
    /// - `EmptySet` if `items` is empty
    pub fn most_preferred<'a>(&self, items: &'a [Item]) -> Result<&'a Item, PreferenceError> {
        self.rank_items(items)?
            .into_iter()
            .next()
            .ok_or(PreferenceError::EmptySet)
    }

    /// True iff the item's 1-based rank is within `floor(len * fraction)`.
    ///
    /// `fraction <= 0` never qualifies and `fraction >= 1` always does. For
    /// small lists the cutoff can floor to zero, in which case nothing
    /// qualifies.
    ///
    /// # Errors
    ///
    /// - `EmptySet` if `items` is empty
    pub fn is_top_fraction(
        &self,
        item: &Item,
        items: &[Item],
        fraction: f64,
    ) -> Result<bool, PreferenceError> {
        if items.is_empty() {
            return Err(PreferenceError::EmptySet);
        }
        if fraction >= 1.0 {
            return Ok(true);
        }
        if fraction <= 0.0 || fraction.is_nan() {
            return Ok(false);
        }

        let cutoff = (items.len() as f64 * fraction).floor() as usize;
        if cutoff == 0 {
            return Ok(false);
        }

        let ranked = self.rank_items(items)?;
        Ok(ranked.iter().take(cutoff).any(|candidate| *candidate == item))
    }
}
