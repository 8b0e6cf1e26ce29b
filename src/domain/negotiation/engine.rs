//! Negotiation Engine - the protocol state machine.
//!
//! Given one incoming message for one agent, the engine consults that agent's
//! preferences and the argument generator, mutates the dialogue session, and
//! returns the replies to send.
//!
//! # Transitions
//!
//! | Incoming  | Condition                          | Reply             | New state    |
//! |-----------|------------------------------------|-------------------|--------------|
//! | PROPOSE   | item in receiver's top fraction    | ACCEPT            | Accepting    |
//! | PROPOSE   | otherwise                          | ASK_WHY           | Arguing      |
//! | ASK_WHY   | `respond_with_argument`            | ARGUE (support)   | Arguing      |
//! | ASK_WHY   | otherwise                          | -                 | Rejected     |
//! | ARGUE     | item in receiver's top fraction    | ACCEPT            | Accepting    |
//! | ARGUE     | rounds < `max_rounds`              | ARGUE (counter)   | Arguing      |
//! | ARGUE     | otherwise                          | -                 | TimedOut     |
//! | ACCEPT    | always                             | COMMIT            | Committing1  |
//! | COMMIT    | commits == 1                       | COMMIT (echo)     | Committing1  |
//! | COMMIT    | commits == 2                       | -                 | Committed    |

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{
    Agent, ArgueReason, DialogueSession, Message, NegotiationError, Outcome, Performative,
    ProtocolState, RejectionReason,
};
use crate::domain::argument::{ArgumentError, ArgumentGenerator};
use crate::domain::foundation::{AgentId, ValidationError};
use crate::domain::preferences::Item;

/// Default share of the catalog an agent accepts outright.
pub const DEFAULT_TOP_FRACTION: f64 = 0.1;

/// Default bound on ARGUE messages per dialogue.
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

/// Tunables of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegotiationPolicy {
    /// Rank-based acceptance threshold in `[0, 1]`.
    pub top_fraction: f64,
    /// ARGUE messages processed before the dialogue times out; at least 1.
    pub max_rounds: u32,
    /// Whether a proposer answers ASK_WHY with ARGUE instead of giving up.
    pub respond_with_argument: bool,
}

impl Default for NegotiationPolicy {
    fn default() -> Self {
        Self {
            top_fraction: DEFAULT_TOP_FRACTION,
            max_rounds: DEFAULT_MAX_ROUNDS,
            respond_with_argument: true,
        }
    }
}

impl NegotiationPolicy {
    /// # Errors
    ///
    /// - `OutOfRange` if `top_fraction` is outside `[0, 1]` or `max_rounds` is 0
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.top_fraction) {
            return Err(ValidationError::out_of_range(
                "top_fraction",
                0.0,
                1.0,
                self.top_fraction,
            ));
        }
        if self.max_rounds == 0 {
            return Err(ValidationError::out_of_range(
                "max_rounds",
                1.0,
                u32::MAX as f64,
                0.0,
            ));
        }
        Ok(())
    }
}

/// Protocol state machine with an injected random source.
#[derive(Debug)]
pub struct NegotiationEngine<R = StdRng> {
    policy: NegotiationPolicy,
    rng: R,
}

impl NegotiationEngine<StdRng> {
    /// Engine whose argument choices are reproducible from `seed`.
    pub fn seeded(policy: NegotiationPolicy, seed: u64) -> Self {
        Self::new(policy, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(policy: NegotiationPolicy) -> Self {
        Self::new(policy, StdRng::from_entropy())
    }
}

impl<R: Rng> NegotiationEngine<R> {
    pub fn new(policy: NegotiationPolicy, rng: R) -> Self {
        Self { policy, rng }
    }

    pub fn policy(&self) -> &NegotiationPolicy {
        &self.policy
    }

    /// Opens a dialogue and builds the PROPOSE that starts it.
    ///
    /// # Errors
    ///
    /// - `Invalid` if `initiator` and `responder` are the same agent
    pub fn open_dialogue(
        &self,
        initiator: &AgentId,
        responder: &AgentId,
        item: Item,
    ) -> Result<(DialogueSession, Message), NegotiationError> {
        let mut session = DialogueSession::open(initiator.clone(), responder.clone())?;
        session.transition(ProtocolState::Proposed)?;
        session.put_on_table(item.clone());

        let propose = Message::propose(session.id(), initiator.clone(), responder.clone(), item);
        info!(
            session_id = %session.id(),
            initiator = %initiator,
            responder = %responder,
            item = %propose.item(),
            "dialogue opened"
        );
        Ok((session, propose))
    }

    /// Closes an open dialogue as `Rejected` from outside the message flow.
    ///
    /// # Errors
    ///
    /// - `Invalid` if the dialogue is already closed
    pub fn abandon(
        &self,
        session: &mut DialogueSession,
        reason: RejectionReason,
    ) -> Result<(), NegotiationError> {
        warn!(session_id = %session.id(), state = %session.state(), %reason, "abandoning dialogue");
        session.finish(Outcome::Rejected { reason })
    }

    /// Processes one message delivered to `agent`.
    ///
    /// Never fails: a message that breaks the protocol ends the dialogue as
    /// `Rejected`. Messages for a closed dialogue are dropped.
    pub fn handle(
        &mut self,
        session: &mut DialogueSession,
        agent: &Agent,
        message: &Message,
    ) -> Vec<Message> {
        if session.is_terminal() {
            warn!(
                session_id = %session.id(),
                performative = %message.performative(),
                state = %session.state(),
                "dropping message for closed dialogue"
            );
            return Vec::new();
        }

        debug!(
            session_id = %session.id(),
            from = %message.sender(),
            to = %agent.id(),
            performative = %message.performative(),
            item = %message.item(),
            state = %session.state(),
            "processing message"
        );

        match self.process(session, agent, message) {
            Ok(replies) => {
                if let Some(outcome) = session.outcome() {
                    info!(
                        session_id = %session.id(),
                        rounds = session.rounds(),
                        %outcome,
                        "dialogue closed"
                    );
                }
                replies
            }
            Err(err) => {
                warn!(session_id = %session.id(), error = %err, "rejecting dialogue");
                let detail = err.to_string();
                let reason = if err.is_protocol_violation() {
                    RejectionReason::ProtocolViolation { detail }
                } else {
                    RejectionReason::EvaluationFailed { detail }
                };
                if let Err(finish_err) = session.finish(Outcome::Rejected { reason }) {
                    error!(session_id = %session.id(), error = %finish_err, "could not close dialogue");
                }
                Vec::new()
            }
        }
    }

    fn process(
        &mut self,
        session: &mut DialogueSession,
        agent: &Agent,
        message: &Message,
    ) -> Result<Vec<Message>, NegotiationError> {
        Self::check_preconditions(session, agent, message)?;

        let session_id = session.id();
        let me = agent.id().clone();
        let peer = message.sender().clone();
        let item = message.item().clone();

        match message.performative() {
            Performative::Propose => {
                if self.qualifies(agent, &item)? {
                    session.transition(ProtocolState::Accepting)?;
                    Ok(vec![Message::accept(session_id, me, peer, item)])
                } else {
                    session.transition(ProtocolState::Arguing)?;
                    Ok(vec![Message::ask_why(session_id, me, peer, item)])
                }
            }

            Performative::AskWhy => {
                if !self.policy.respond_with_argument {
                    session.finish(Outcome::Rejected {
                        reason: RejectionReason::ArgumentDeclined,
                    })?;
                    return Ok(Vec::new());
                }

                let premise = match ArgumentGenerator::choose_supporting_argument(
                    &item,
                    agent.preferences(),
                    &mut self.rng,
                ) {
                    Ok(premise) => premise,
                    Err(ArgumentError::NoSupportingPremise { item }) => {
                        session.finish(Outcome::Rejected {
                            reason: RejectionReason::NoSupportingArgument { item },
                        })?;
                        return Ok(Vec::new());
                    }
                    Err(other) => return Err(other.into()),
                };

                session.transition(ProtocolState::Arguing)?;
                session.put_on_table(item.clone());
                Ok(vec![Message::argue(
                    session_id,
                    me,
                    peer,
                    ArgueReason::SupportingPremise,
                    item,
                    premise,
                )])
            }

            Performative::Argue => {
                let attacked = message.premise().copied().ok_or_else(|| {
                    NegotiationError::violation(
                        Performative::Argue,
                        session.state(),
                        "ARGUE carries no premise",
                    )
                })?;

                let rounds = session.record_round();
                session.put_on_table(item.clone());

                if self.qualifies(agent, &item)? {
                    session.transition(ProtocolState::Accepting)?;
                    return Ok(vec![Message::accept(session_id, me, peer, item)]);
                }

                if rounds >= self.policy.max_rounds {
                    session.finish(Outcome::TimedOut { rounds })?;
                    return Ok(Vec::new());
                }

                let prefs = agent.preferences();
                let counter = match ArgumentGenerator::counter_proposal(
                    &item,
                    &attacked,
                    prefs.catalog().items(),
                    prefs,
                    &mut self.rng,
                ) {
                    Ok(counter) => counter,
                    Err(ArgumentError::NoSupportingPremise { item }) => {
                        session.finish(Outcome::Rejected {
                            reason: RejectionReason::NoSupportingArgument { item },
                        })?;
                        return Ok(Vec::new());
                    }
                    Err(other) => return Err(other.into()),
                };

                debug!(
                    session_id = %session_id,
                    reason = %counter.reason,
                    item = %counter.item,
                    premise = %counter.premise,
                    "counter-proposal"
                );
                session.transition(ProtocolState::Arguing)?;
                session.put_on_table(counter.item.clone());
                Ok(vec![Message::argue(
                    session_id,
                    me,
                    peer,
                    counter.reason.into(),
                    counter.item,
                    counter.premise,
                )])
            }

            Performative::Accept => {
                Self::check_item_on_table(session, message)?;
                session.transition(ProtocolState::Committing1)?;
                session.record_commit();
                Ok(vec![Message::commit(session_id, me, peer, item)])
            }

            Performative::Commit => {
                Self::check_item_on_table(session, message)?;
                match session.commits() {
                    1 => {
                        session.transition(ProtocolState::Committing1)?;
                        session.record_commit();
                        Ok(vec![Message::commit(session_id, me, peer, item)])
                    }
                    2 => {
                        session.finish(Outcome::Committed { item })?;
                        Ok(Vec::new())
                    }
                    other => Err(NegotiationError::violation(
                        Performative::Commit,
                        session.state(),
                        format!("unexpected commit count {}", other),
                    )),
                }
            }
        }
    }

    /// Routing and state preconditions shared by every performative.
    fn check_preconditions(
        session: &DialogueSession,
        agent: &Agent,
        message: &Message,
    ) -> Result<(), NegotiationError> {
        let performative = message.performative();
        let state = session.state();

        if message.session_id() != session.id() {
            return Err(NegotiationError::violation(
                performative,
                state,
                format!("message belongs to session {}", message.session_id()),
            ));
        }
        if message.receiver() != agent.id() {
            return Err(NegotiationError::violation(
                performative,
                state,
                format!("message for '{}' delivered to '{}'", message.receiver(), agent.id()),
            ));
        }
        if session.counterpart(agent.id()) != Some(message.sender()) {
            return Err(NegotiationError::violation(
                performative,
                state,
                format!("'{}' is not a participant's counterpart", message.sender()),
            ));
        }

        let expected = match performative {
            Performative::Propose => ProtocolState::Proposed,
            Performative::AskWhy | Performative::Argue => ProtocolState::Arguing,
            Performative::Accept => ProtocolState::Accepting,
            Performative::Commit => ProtocolState::Committing1,
        };
        if state != expected {
            return Err(NegotiationError::violation(
                performative,
                state,
                format!("expected state {}", expected),
            ));
        }
        Ok(())
    }

    fn check_item_on_table(
        session: &DialogueSession,
        message: &Message,
    ) -> Result<(), NegotiationError> {
        if session.item_on_table() == Some(message.item()) {
            return Ok(());
        }
        Err(NegotiationError::violation(
            message.performative(),
            session.state(),
            format!("'{}' is not the item under discussion", message.item()),
        ))
    }

    fn qualifies(&self, agent: &Agent, item: &Item) -> Result<bool, NegotiationError> {
        let prefs = agent.preferences();
        // an item outside the catalog has no score
        prefs.score(item)?;
        Ok(prefs.is_top_fraction(item, prefs.catalog().items(), self.policy.top_fraction)?)
    }
}
