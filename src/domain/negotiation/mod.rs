//! Negotiation Module - The argumentation protocol between two agents.
//!
//! # Components
//!
//! - `Performative` / `Message` - What agents say to each other
//! - `ProtocolState` / `DialogueSession` - Where a dialogue stands
//! - `NegotiationEngine` - Turns one incoming message into replies
//! - `Agent` - A party with its own preferences
//! - `Outcome` - How a dialogue ended

mod agent;
mod engine;
mod errors;
mod message;
mod outcome;
mod performative;
mod session;
mod state;

pub use agent::Agent;
pub use engine::{NegotiationEngine, NegotiationPolicy, DEFAULT_MAX_ROUNDS, DEFAULT_TOP_FRACTION};
pub use errors::NegotiationError;
pub use message::{ArgueReason, Message, MessageContent};
pub use outcome::{Outcome, RejectionReason};
pub use performative::Performative;
pub use session::DialogueSession;
pub use state::ProtocolState;
