//! ProtocolState - lifecycle of a dialogue session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Protocol state of one dialogue.
///
/// ```text
/// Idle -> Proposed -> {Accepting, Arguing}* -> Committing1 -> Committed
///                                  \-> Rejected | TimedOut
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolState {
    #[default]
    Idle,
    Proposed,
    Accepting,
    Arguing,
    Committing1,
    Committed,
    Rejected,
    TimedOut,
}

impl StateMachine for ProtocolState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ProtocolState::*;
        match self {
            Idle => vec![Proposed, Rejected],
            Proposed => vec![Accepting, Arguing, Rejected],
            Arguing => vec![Arguing, Accepting, Rejected, TimedOut],
            Accepting => vec![Committing1, Rejected],
            Committing1 => vec![Committing1, Committed, Rejected],
            Committed | Rejected | TimedOut => vec![],
        }
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProtocolState::Idle => "Idle",
            ProtocolState::Proposed => "Proposed",
            ProtocolState::Accepting => "Accepting",
            ProtocolState::Arguing => "Arguing",
            ProtocolState::Committing1 => "Committing1",
            ProtocolState::Committed => "Committed",
            ProtocolState::Rejected => "Rejected",
            ProtocolState::TimedOut => "TimedOut",
        };
        write!(f, "{}", s)
    }
}
