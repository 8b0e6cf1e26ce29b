//! YAML catalog source.
//!
//! ```yaml
//! items:
//!   - name: M4A1
//!     description: Carbine
//!     values:
//!       RANGE: 7
//!       PRICE: 4
//! ```
//!
//! Criteria are recorded in the order they first appear.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::domain::preferences::{Catalog, CriterionName, Item};
use crate::ports::{CatalogError, CatalogSource};

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    values: serde_yaml::Mapping,
}

/// Catalog stored as a YAML document on disk.
#[derive(Debug, Clone)]
pub struct YamlCatalogSource {
    path: PathBuf,
}

impl YamlCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a YAML document already in memory.
    pub fn parse(text: &str) -> Result<Catalog, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(text)?;

        let mut builder = Catalog::builder();
        for (index, entry) in document.items.into_iter().enumerate() {
            let item = Item::with_description(entry.name, entry.description)?;
            let mut values = Vec::with_capacity(entry.values.len());

            for (key, value) in &entry.values {
                let column = key.as_str().ok_or_else(|| {
                    CatalogError::malformed(index + 1, format!("non-string criterion key in '{}'", item))
                })?;
                let criterion = CriterionName::from_str(column).map_err(|_| {
                    CatalogError::UnknownCriterion {
                        column: column.to_string(),
                    }
                })?;
                let number = value.as_f64().ok_or_else(|| {
                    CatalogError::malformed(
                        index + 1,
                        format!("value of {} for '{}' is not a number", criterion, item),
                    )
                })?;
                values.push((criterion, number));
            }
            builder = builder.item_with_values(item, values);
        }

        Ok(builder.build()?)
    }
}

impl CatalogSource for YamlCatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let text = fs::read_to_string(&self.path)?;
        let catalog = Self::parse(&text)?;
        debug!(
            path = %self.path.display(),
            items = catalog.len(),
            criteria = catalog.criteria().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use CriterionName::*;

    const SAMPLE: &str = r#"
items:
  - name: Rifle
    description: Long gun
    values:
      RANGE: 9
      price: 3.5
  - name: Pistol
    values:
      RANGE: 2
      PRICE: 8
"#;

    #[test]
    fn parses_items_descriptions_and_values() {
        let catalog = YamlCatalogSource::parse(SAMPLE).unwrap();
        let rifle = catalog.item("Rifle").unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(rifle.description(), "Long gun");
        assert_eq!(catalog.value(rifle, Price).unwrap(), 3.5);
        assert_eq!(catalog.criteria(), &[Range, Price]);
    }

    #[test]
    fn unknown_criterion_key_is_rejected() {
        let text = "items:\n  - name: Rifle\n    values:\n      WEIGHT: 3\n";
        let err = YamlCatalogSource::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCriterion { .. }));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let text = "items:\n  - name: Rifle\n    values:\n      RANGE: far\n";
        let err = YamlCatalogSource::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn blank_item_name_is_rejected() {
        let text = "items:\n  - name: \"  \"\n";
        let err = YamlCatalogSource::parse(text).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = YamlCatalogSource::parse("items: [").unwrap_err();
        assert!(matches!(err, CatalogError::Yaml(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = YamlCatalogSource::new(file.path()).load().unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
