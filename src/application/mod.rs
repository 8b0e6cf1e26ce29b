//! Application layer - Orchestration of agents, bus and engine.
//!
//! - `Negotiation` - Runs one two-party dialogue tick by tick

mod negotiation;

pub use negotiation::Negotiation;
