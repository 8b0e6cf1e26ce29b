//! Argument Module - Premises, arguments and counter-proposals.
//!
//! All functions here are pure given an explicit random source: they read an
//! agent's `Preferences` and return premises without touching dialogue state.

mod bundle;
mod errors;
mod generator;
mod premise;

pub use bundle::{Argument, Decision};
pub use errors::ArgumentError;
pub use generator::{
    ArgumentGenerator, CounterProposal, CounterReason, ATTACK_THRESHOLD, SUPPORT_THRESHOLD,
};
pub use premise::{Comparison, CoupleValue};
