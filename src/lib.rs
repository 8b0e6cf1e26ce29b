//! Choice Parley - Argumentation-Based Negotiation
//!
//! Two agents with their own criterion rankings negotiate over a shared item
//! catalog by exchanging PROPOSE, ACCEPT, ASK_WHY, ARGUE and COMMIT messages
//! until they commit to one item, give up, or run out of rounds.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
