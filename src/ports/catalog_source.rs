//! CatalogSource port - Interface for loading the item catalog.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::preferences::Catalog;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown criterion column: '{column}'")]
    UnknownCriterion { column: String },

    #[error("Item column '{column}' not found in header")]
    MissingItemColumn { column: String },

    #[error("Duplicate column: '{column}'")]
    DuplicateColumn { column: String },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ValidationError),
}

impl CatalogError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}

/// Port for loading a catalog from wherever it is stored.
pub trait CatalogSource {
    /// Loads and validates the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source cannot be read or its content
    /// does not describe a valid catalog.
    fn load(&self) -> Result<Catalog, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_reports_line() {
        let err = CatalogError::malformed(3, "expected 7 cells, found 5");
        assert_eq!(
            err.to_string(),
            "Malformed row at line 3: expected 7 cells, found 5"
        );
    }

    #[test]
    fn validation_errors_convert() {
        let err: CatalogError = ValidationError::empty_field("name").into();
        assert!(matches!(err, CatalogError::Invalid(_)));
    }
}
