//! Catalog source adapters.
//!
//! - `DelimitedCatalogSource` - `;`-separated text with a header row
//! - `YamlCatalogSource` - YAML list of items with per-criterion values

mod delimited;
mod yaml;

pub use delimited::{DelimitedCatalogSource, DEFAULT_DELIMITER, DEFAULT_ITEM_COLUMN};
pub use yaml::YamlCatalogSource;
