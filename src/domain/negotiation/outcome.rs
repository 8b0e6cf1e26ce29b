//! Terminal outcomes of a dialogue.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::preferences::Item;

/// Why a dialogue ended without agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// ASK_WHY arrived and the proposer is configured not to argue.
    ArgumentDeclined,
    /// The arguing agent had no supporting premise for the item.
    NoSupportingArgument { item: String },
    /// A message arrived outside its protocol preconditions.
    ProtocolViolation { detail: String },
    /// Scoring or premise lookup failed mid-dialogue.
    EvaluationFailed { detail: String },
    /// No message was in flight and the dialogue had not ended.
    Stalled,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::ArgumentDeclined => write!(f, "proposer declined to argue"),
            RejectionReason::NoSupportingArgument { item } => {
                write!(f, "no supporting argument for '{}'", item)
            }
            RejectionReason::ProtocolViolation { detail } => {
                write!(f, "protocol violation: {}", detail)
            }
            RejectionReason::EvaluationFailed { detail } => {
                write!(f, "evaluation failed: {}", detail)
            }
            RejectionReason::Stalled => write!(f, "no message in flight"),
        }
    }
}

/// How a dialogue ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Committed { item: Item },
    Rejected { reason: RejectionReason },
    TimedOut { rounds: u32 },
}

impl Outcome {
    pub fn agreed_item(&self) -> Option<&Item> {
        match self {
            Outcome::Committed { item } => Some(item),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Committed { item } => write!(f, "committed to {}", item),
            Outcome::Rejected { reason } => write!(f, "rejected ({})", reason),
            Outcome::TimedOut { rounds } => write!(f, "timed out after {} rounds", rounds),
        }
    }
}
