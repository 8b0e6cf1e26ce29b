//! DialogueSession - mutable state of one pairwise negotiation.
//!
//! Holds the protocol state and the commit/round counters for a single
//! dialogue. Preferences and the catalog stay outside the session so that
//! several dialogues can share them read-only.

use serde::{Deserialize, Serialize};

use super::{NegotiationError, Outcome, ProtocolState};
use crate::domain::foundation::{AgentId, SessionId, StateMachine, Timestamp, ValidationError};
use crate::domain::preferences::Item;

/// Per-dialogue state, mutated only by the negotiation engine.
///
/// # Invariants
///
/// - `initiator != responder`
/// - `commits` is 0, 1 or 2
/// - `outcome` is set iff `state` is terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSession {
    id: SessionId,
    initiator: AgentId,
    responder: AgentId,
    state: ProtocolState,
    commits: u8,
    rounds: u32,
    item_on_table: Option<Item>,
    outcome: Option<Outcome>,
    created_at: Timestamp,
    closed_at: Option<Timestamp>,
}

impl DialogueSession {
    /// Opens an idle session between two distinct agents.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if both participants are the same agent
    pub fn open(initiator: AgentId, responder: AgentId) -> Result<Self, ValidationError> {
        if initiator == responder {
            return Err(ValidationError::invalid_format(
                "participants",
                format!("agent '{}' cannot negotiate with itself", initiator),
            ));
        }

        Ok(Self {
            id: SessionId::new(),
            initiator,
            responder,
            state: ProtocolState::Idle,
            commits: 0,
            rounds: 0,
            item_on_table: None,
            outcome: None,
            created_at: Timestamp::now(),
            closed_at: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn initiator(&self) -> &AgentId {
        &self.initiator
    }

    pub fn responder(&self) -> &AgentId {
        &self.responder
    }

    pub fn is_participant(&self, agent: &AgentId) -> bool {
        &self.initiator == agent || &self.responder == agent
    }

    /// The other participant, if `agent` is one of the two.
    pub fn counterpart(&self, agent: &AgentId) -> Option<&AgentId> {
        if agent == &self.initiator {
            Some(&self.responder)
        } else if agent == &self.responder {
            Some(&self.initiator)
        } else {
            None
        }
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn commits(&self) -> u8 {
        self.commits
    }

    /// Number of ARGUE messages processed so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The item most recently proposed or argued for.
    pub fn item_on_table(&self) -> Option<&Item> {
        self.item_on_table.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn agreed_item(&self) -> Option<&Item> {
        self.outcome.as_ref().and_then(Outcome::agreed_item)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn closed_at(&self) -> Option<&Timestamp> {
        self.closed_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (engine only)
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) fn transition(&mut self, target: ProtocolState) -> Result<(), NegotiationError> {
        self.state = self.state.transition_to(target)?;
        Ok(())
    }

    pub(super) fn put_on_table(&mut self, item: Item) {
        self.item_on_table = Some(item);
    }

    pub(super) fn record_commit(&mut self) -> u8 {
        self.commits += 1;
        self.commits
    }

    pub(super) fn record_round(&mut self) -> u32 {
        self.rounds += 1;
        self.rounds
    }

    /// Moves to the terminal state matching `outcome` and closes the session.
    pub(super) fn finish(&mut self, outcome: Outcome) -> Result<(), NegotiationError> {
        let target = match &outcome {
            Outcome::Committed { .. } => ProtocolState::Committed,
            Outcome::Rejected { .. } => ProtocolState::Rejected,
            Outcome::TimedOut { .. } => ProtocolState::TimedOut,
        };
        self.transition(target)?;
        self.outcome = Some(outcome);
        self.closed_at = Some(Timestamp::now());
        Ok(())
    }
}
