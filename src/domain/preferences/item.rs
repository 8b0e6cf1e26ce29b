//! Item and CriterionValue value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::CriterionName;
use crate::domain::foundation::ValidationError;

/// A named catalog entry. Identity is the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    name: String,
    #[serde(default)]
    description: String,
}

impl Item {
    /// Creates a new item, returning error if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_description(name, "")
    }

    /// Creates a new item with a free-text description.
    pub fn with_description(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("item_name"));
        }
        Ok(Self {
            name,
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The value an item takes on one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionValue {
    pub item: Item,
    pub criterion: CriterionName,
    pub value: f64,
}

impl CriterionValue {
    pub fn new(item: Item, criterion: CriterionName, value: f64) -> Self {
        Self {
            item,
            criterion,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn item_rejects_blank_name() {
        assert!(Item::new("").is_err());
        assert!(Item::new("  ").is_err());
    }

    #[test]
    fn items_are_equal_by_name_only() {
        let a = Item::with_description("Glock", "sidearm").unwrap();
        let b = Item::new("Glock").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn item_displays_its_name() {
        let item = Item::new("M4A1").unwrap();
        assert_eq!(item.to_string(), "M4A1");
    }
}
