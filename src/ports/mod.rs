//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MessageBus` - Tick-based delivery of messages between agents
//! - `CatalogSource` - Loading the shared item catalog

mod catalog_source;
mod message_bus;

pub use catalog_source::{CatalogError, CatalogSource};
pub use message_bus::MessageBus;
