//! Preferences Module - Criteria, catalog and per-agent scoring.
//!
//! # Components
//!
//! - `CriterionName` - The six fixed scoring criteria with stable ids
//! - `Item` / `CriterionValue` - Catalog entries and their values
//! - `Catalog` - Shared read-only item table (0-10 value scale)
//! - `Preferences` - One agent's ranking; scores items and decides top-fraction membership

mod catalog;
mod criterion;
mod errors;
mod item;
mod model;

pub use catalog::{Catalog, CatalogBuilder, VALUE_SCALE_MAX, VALUE_SCALE_MIN};
pub use criterion::CriterionName;
pub use errors::PreferenceError;
pub use item::{CriterionValue, Item};
pub use model::Preferences;
