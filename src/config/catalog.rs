//! Catalog source configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::catalog::{
    DelimitedCatalogSource, YamlCatalogSource, DEFAULT_DELIMITER, DEFAULT_ITEM_COLUMN,
};
use crate::ports::CatalogSource;

/// On-disk catalog format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    #[default]
    Delimited,
    Yaml,
}

/// Where and how to read the item catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog file
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Column separator for delimited files
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Header of the column holding item names
    #[serde(default = "default_item_column")]
    pub item_column: String,

    #[serde(default)]
    pub format: CatalogFormat,
}

impl CatalogConfig {
    /// Builds the catalog source this section describes
    pub fn source(&self) -> Result<Box<dyn CatalogSource>, ValidationError> {
        match self.format {
            CatalogFormat::Delimited => Ok(Box::new(
                DelimitedCatalogSource::new(&self.path)
                    .with_delimiter(self.delimiter_char()?)
                    .with_item_column(self.item_column.clone()),
            )),
            CatalogFormat::Yaml => Ok(Box::new(YamlCatalogSource::new(&self.path))),
        }
    }

    /// The delimiter as a single character
    pub fn delimiter_char(&self) -> Result<char, ValidationError> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValidationError::InvalidDelimiter(self.delimiter.clone())),
        }
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("catalog.path"));
        }
        if self.format == CatalogFormat::Delimited {
            self.delimiter_char()?;
            if self.item_column.trim().is_empty() {
                return Err(ValidationError::MissingRequired("catalog.item_column"));
            }
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            delimiter: default_delimiter(),
            item_column: default_item_column(),
            format: CatalogFormat::default(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data/weapons_dataset.csv")
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_item_column() -> String {
    DEFAULT_ITEM_COLUMN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.path, PathBuf::from("data/weapons_dataset.csv"));
        assert_eq!(config.delimiter_char().unwrap(), ';');
        assert_eq!(config.item_column, "WEAPON");
        assert_eq!(config.format, CatalogFormat::Delimited);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_multi_character_delimiter() {
        let config = CatalogConfig {
            delimiter: ";;".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidDelimiter(";;".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_path() {
        let config = CatalogConfig {
            path: PathBuf::new(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_ignores_delimiter() {
        let config = CatalogConfig {
            delimiter: String::new(),
            format: CatalogFormat::Yaml,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.source().is_ok());
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        let config: CatalogConfig = serde_json::from_str(r#"{ "format": "yaml" }"#).unwrap();
        assert_eq!(config.format, CatalogFormat::Yaml);
    }
}
