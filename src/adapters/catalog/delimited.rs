//! Delimited-text catalog source.
//!
//! Reads a header row naming the item column and one column per criterion,
//! then one row per item:
//!
//! ```text
//! WEAPON;STOPPING_POWER;RANGE;MOBILITY;FIRE_RATE;CAPACITY;PRICE
//! M4A1;6;7;6;8;6;4
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::domain::preferences::{Catalog, CriterionName, Item};
use crate::ports::{CatalogError, CatalogSource};

/// Default column separator.
pub const DEFAULT_DELIMITER: char = ';';

/// Default name of the column holding item names.
pub const DEFAULT_ITEM_COLUMN: &str = "WEAPON";

/// Catalog stored as delimited text on disk.
#[derive(Debug, Clone)]
pub struct DelimitedCatalogSource {
    path: PathBuf,
    delimiter: char,
    item_column: String,
}

impl DelimitedCatalogSource {
    /// Source with the default `;` delimiter and `WEAPON` item column.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: DEFAULT_DELIMITER,
            item_column: DEFAULT_ITEM_COLUMN.to_string(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_item_column(mut self, column: impl Into<String>) -> Self {
        self.item_column = column.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses catalog text already in memory.
    ///
    /// Blank lines are skipped; line numbers in errors are 1-based.
    pub fn parse(&self, text: &str) -> Result<Catalog, CatalogError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or_else(|| CatalogError::MissingItemColumn {
            column: self.item_column.clone(),
        })?;
        let columns = self.parse_header(header)?;

        let mut builder = Catalog::builder();
        for (line, row) in lines {
            let cells: Vec<&str> = row.split(self.delimiter).map(str::trim).collect();
            if cells.len() != columns.len() {
                return Err(CatalogError::malformed(
                    line,
                    format!("expected {} cells, found {}", columns.len(), cells.len()),
                ));
            }

            let mut item = None;
            let mut values = Vec::with_capacity(cells.len());
            for (column, cell) in columns.iter().zip(&cells) {
                match column {
                    Column::Item => {
                        item = Some(
                            Item::new(*cell).map_err(|e| CatalogError::malformed(line, e.to_string()))?,
                        );
                    }
                    Column::Criterion(criterion) => {
                        let value: f64 = cell.parse().map_err(|_| {
                            CatalogError::malformed(
                                line,
                                format!("'{}' is not a number for {}", cell, criterion),
                            )
                        })?;
                        values.push((*criterion, value));
                    }
                }
            }

            // parse_header guarantees exactly one item column
            if let Some(item) = item {
                builder = builder.item_with_values(item, values);
            }
        }

        Ok(builder.build()?)
    }

    fn parse_header(&self, header: &str) -> Result<Vec<Column>, CatalogError> {
        let mut columns = Vec::new();
        let mut has_item_column = false;

        for cell in header.split(self.delimiter).map(str::trim) {
            let column = if cell.eq_ignore_ascii_case(&self.item_column) {
                Column::Item
            } else {
                let criterion = CriterionName::from_str(cell).map_err(|_| {
                    CatalogError::UnknownCriterion {
                        column: cell.to_string(),
                    }
                })?;
                Column::Criterion(criterion)
            };

            if columns.contains(&column) {
                return Err(CatalogError::DuplicateColumn {
                    column: cell.to_string(),
                });
            }
            has_item_column |= column == Column::Item;
            columns.push(column);
        }

        if !has_item_column {
            return Err(CatalogError::MissingItemColumn {
                column: self.item_column.clone(),
            });
        }
        Ok(columns)
    }
}

impl CatalogSource for DelimitedCatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let text = fs::read_to_string(&self.path)?;
        let catalog = self.parse(&text)?;
        debug!(
            path = %self.path.display(),
            items = catalog.len(),
            criteria = catalog.criteria().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Item,
    Criterion(CriterionName),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use CriterionName::*;

    const SAMPLE: &str = "\
WEAPON;STOPPING_POWER;RANGE;PRICE
Rifle;6;9;3

Pistol;4;2;8
";

    fn source() -> DelimitedCatalogSource {
        DelimitedCatalogSource::new("unused.csv")
    }

    #[test]
    fn parses_items_and_values_in_file_order() {
        let catalog = source().parse(SAMPLE).unwrap();
        let names: Vec<&str> = catalog.items().iter().map(Item::name).collect();

        assert_eq!(names, vec!["Rifle", "Pistol"]);
        assert_eq!(catalog.criteria(), &[StoppingPower, Range, Price]);
        let pistol = catalog.item("Pistol").unwrap();
        assert_eq!(catalog.value(pistol, Price).unwrap(), 8.0);
    }

    #[test]
    fn header_matching_ignores_case_and_padding() {
        let text = " weapon ; range ; price \nRifle;9;3\n";
        let catalog = source().parse(text).unwrap();
        assert_eq!(catalog.criteria(), &[Range, Price]);
    }

    #[test]
    fn custom_delimiter_and_item_column() {
        let text = "NAME,RANGE\nRifle,9\n";
        let catalog = source()
            .with_delimiter(',')
            .with_item_column("NAME")
            .parse(text)
            .unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn unknown_criterion_column_is_rejected() {
        let err = source().parse("WEAPON;WEIGHT\nRifle;3\n").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCriterion { column } if column == "WEIGHT"));
    }

    #[test]
    fn missing_item_column_is_rejected() {
        let err = source().parse("RANGE;PRICE\n9;3\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingItemColumn { .. }));
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let err = source().parse("WEAPON;RANGE;range\nRifle;9;9\n").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateColumn { .. }));
    }

    #[test]
    fn short_row_reports_its_line() {
        let err = source().parse(SAMPLE.replace("Pistol;4;2;8", "Pistol;4").as_str()).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 4, .. }));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = source().parse("WEAPON;RANGE\nRifle;far\n").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn off_scale_value_is_rejected() {
        let err = source().parse("WEAPON;RANGE\nRifle;11\n").unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = DelimitedCatalogSource::new(file.path()).load().unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DelimitedCatalogSource::new(dir.path().join("absent.csv"))
            .load()
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
