//! Message bus adapters.
//!
//! - `InMemoryMessageBus` - Deterministic, single-process tick-based bus

mod in_memory;

pub use in_memory::InMemoryMessageBus;
