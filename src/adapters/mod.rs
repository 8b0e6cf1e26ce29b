//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `bus` - Message bus implementations (in-memory)
//! - `catalog` - Catalog loaders (delimited text, YAML)

pub mod bus;
pub mod catalog;

pub use bus::InMemoryMessageBus;
pub use catalog::{DelimitedCatalogSource, YamlCatalogSource};
