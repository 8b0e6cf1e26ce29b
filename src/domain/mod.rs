//! Domain layer containing negotiation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `preferences` - Criteria, the item catalog and per-agent scoring
//! - `argument` - Premise selection and counter-proposals
//! - `negotiation` - Messages, dialogue sessions and the protocol engine

pub mod argument;
pub mod foundation;
pub mod negotiation;
pub mod preferences;
