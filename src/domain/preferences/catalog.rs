//! Catalog - the shared, read-only set of items and their criterion values.

use std::collections::{HashMap, HashSet};

use super::{CriterionName, CriterionValue, Item, PreferenceError};
use crate::domain::foundation::ValidationError;

/// Lowest value on the criterion scale.
pub const VALUE_SCALE_MIN: f64 = 0.0;

/// Highest value on the criterion scale.
pub const VALUE_SCALE_MAX: f64 = 10.0;

/// Ordered items plus at most one value per (item, criterion) pair.
///
/// # Invariants
///
/// - item names are unique; catalog order is insertion order
/// - every value lies within `VALUE_SCALE_MIN..=VALUE_SCALE_MAX`
/// - `criteria` lists each criterion that carries at least one value,
///   in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
    criteria: Vec<CriterionName>,
    values: HashMap<(String, CriterionName), f64>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Criteria carried by this catalog, in first-seen order.
    pub fn criteria(&self) -> &[CriterionName] {
        &self.criteria
    }

    /// Finds an item by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.item(item.name()).is_some()
    }

    /// Returns the value of `item` on `criterion`.
    ///
    /// # Errors
    ///
    /// - `Lookup` if the pair has no value
    pub fn value(&self, item: &Item, criterion: CriterionName) -> Result<f64, PreferenceError> {
        self.values
            .get(&(item.name().to_string(), criterion))
            .copied()
            .ok_or_else(|| PreferenceError::lookup(item.name(), criterion))
    }

    /// Flattens the catalog into CriterionValue entries, item by item.
    pub fn criterion_values(&self) -> Vec<CriterionValue> {
        let mut out = Vec::with_capacity(self.values.len());
        for item in &self.items {
            for criterion in &self.criteria {
                if let Ok(value) = self.value(item, *criterion) {
                    out.push(CriterionValue::new(item.clone(), *criterion, value));
                }
            }
        }
        out
    }
}

/// Builder for constructing Catalog instances.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: Vec<Item>,
    values: Vec<CriterionValue>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item.
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Records the value of an already-added item on a criterion.
    pub fn value(mut self, item: &Item, criterion: CriterionName, value: f64) -> Self {
        self.values
            .push(CriterionValue::new(item.clone(), criterion, value));
        self
    }

    /// Appends an item together with all of its values.
    pub fn item_with_values(
        mut self,
        item: Item,
        values: impl IntoIterator<Item = (CriterionName, f64)>,
    ) -> Self {
        for (criterion, value) in values {
            self.values
                .push(CriterionValue::new(item.clone(), criterion, value));
        }
        self.items.push(item);
        self
    }

    /// Validates and builds the catalog.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for duplicate items, duplicate (item, criterion)
    ///   pairs, or values for items that were never added
    /// - `OutOfRange` for values outside the 0-10 scale
    pub fn build(self) -> Result<Catalog, ValidationError> {
        let mut names = HashSet::new();
        for item in &self.items {
            if !names.insert(item.name().to_string()) {
                return Err(ValidationError::invalid_format(
                    "item",
                    format!("duplicate item '{}'", item.name()),
                ));
            }
        }

        let mut criteria = Vec::new();
        let mut values = HashMap::with_capacity(self.values.len());
        for entry in self.values {
            if !names.contains(entry.item.name()) {
                return Err(ValidationError::invalid_format(
                    "item",
                    format!("value given for unknown item '{}'", entry.item.name()),
                ));
            }
            if !entry.value.is_finite()
                || entry.value < VALUE_SCALE_MIN
                || entry.value > VALUE_SCALE_MAX
            {
                return Err(ValidationError::out_of_range(
                    format!("{}.{}", entry.item.name(), entry.criterion),
                    VALUE_SCALE_MIN,
                    VALUE_SCALE_MAX,
                    entry.value,
                ));
            }
            let key = (entry.item.name().to_string(), entry.criterion);
            if values.insert(key, entry.value).is_some() {
                return Err(ValidationError::invalid_format(
                    "criterion_value",
                    format!(
                        "duplicate value for '{}' on {}",
                        entry.item.name(),
                        entry.criterion
                    ),
                ));
            }
            if !criteria.contains(&entry.criterion) {
                criteria.push(entry.criterion);
            }
        }

        Ok(Catalog {
            items: self.items,
            criteria,
            values,
        })
    }
}
