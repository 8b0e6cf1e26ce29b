//! Negotiation - drives agents, the message bus and the engine tick by tick.
//!
//! One `step` is one bus tick: queued messages are dispatched, then every
//! agent in registration order drains its mailbox and queues its replies.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::domain::foundation::{AgentId, DomainError, ErrorCode, SessionId, StateMachine};
use crate::domain::negotiation::{
    Agent, DialogueSession, Message, NegotiationEngine, Outcome, ProtocolState, RejectionReason,
};
use crate::domain::preferences::Item;
use crate::ports::MessageBus;

/// A two-party negotiation over one message bus.
pub struct Negotiation<B: MessageBus, R: Rng = StdRng> {
    agents: Vec<Agent>,
    bus: B,
    engine: NegotiationEngine<R>,
    session: Option<DialogueSession>,
    transcript: Vec<Message>,
    steps: u32,
}

impl<B: MessageBus, R: Rng> Negotiation<B, R> {
    pub fn new(bus: B, engine: NegotiationEngine<R>) -> Self {
        Self {
            agents: Vec::new(),
            bus,
            engine,
            session: None,
            transcript: Vec::new(),
            steps: 0,
        }
    }

    /// Registers an agent and its mailbox.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if an agent with the same id is already registered
    pub fn add_agent(&mut self, agent: Agent) -> Result<(), DomainError> {
        if self.agent(agent.id()).is_some() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Agent '{}' is already registered", agent.id()),
            )
            .with_detail("agent_id", agent.id().as_str()));
        }
        self.bus.register(agent.id());
        self.agents.push(agent);
        Ok(())
    }

    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id() == id)
    }

    /// Agents in registration order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Opens a dialogue and queues the sender's PROPOSE for the next step.
    ///
    /// A closed dialogue may be replaced; an open one may not.
    ///
    /// # Errors
    ///
    /// - `AgentNotFound` if either party is not registered
    /// - `DialogueAlreadyOpen` if a dialogue is still running
    /// - `ItemNotFound` if the sender's catalog has no such item
    /// - `ValidationFailed` if sender and receiver are the same agent
    pub fn propose(
        &mut self,
        sender: &AgentId,
        receiver: &AgentId,
        item: &str,
    ) -> Result<SessionId, DomainError> {
        let proposer = self.agent(sender).ok_or_else(|| Self::agent_not_found(sender))?;
        if self.agent(receiver).is_none() {
            return Err(Self::agent_not_found(receiver));
        }
        if let Some(open) = self.session.as_ref().filter(|s| !s.is_terminal()) {
            return Err(DomainError::new(
                ErrorCode::DialogueAlreadyOpen,
                format!("Dialogue {} is still {}", open.id(), open.state()),
            ));
        }
        let item: Item = proposer
            .preferences()
            .catalog()
            .item(item)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ItemNotFound, format!("Unknown item '{}'", item))
                    .with_detail("item", item)
            })?;

        let (session, propose) = self.engine.open_dialogue(sender, receiver, item)?;
        let id = session.id();
        self.bus.send(propose);
        self.session = Some(session);
        Ok(id)
    }

    /// Runs one tick and returns the dialogue state afterwards.
    ///
    /// A dialogue with nothing in flight after the tick is rejected as
    /// stalled. Stepping a closed dialogue does nothing.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no dialogue was ever proposed
    pub fn step(&mut self) -> Result<ProtocolState, DomainError> {
        let Self {
            agents,
            bus,
            engine,
            session,
            transcript,
            steps,
        } = self;

        let session = session.as_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::SessionNotFound, "No dialogue has been proposed")
        })?;
        if session.is_terminal() {
            return Ok(session.state());
        }

        let delivered = bus.dispatch();
        *steps += 1;
        debug!(tick = bus.current_tick(), delivered, "tick");

        for agent in agents.iter() {
            let consumed = agent.step(engine, session, bus);
            transcript.extend(consumed);
        }

        if !session.is_terminal() && bus.pending_count() == 0 {
            engine.abandon(session, RejectionReason::Stalled)?;
        }
        Ok(session.state())
    }

    /// Steps until the dialogue closes or `max_steps` ticks have run.
    ///
    /// Returns the outcome, or `None` if the dialogue is still open.
    pub fn run(&mut self, max_steps: u32) -> Result<Option<&Outcome>, DomainError> {
        for _ in 0..max_steps {
            if self.step()?.is_terminal() {
                break;
            }
        }
        if let Some(outcome) = self.outcome() {
            info!(steps = self.steps, %outcome, "negotiation finished");
        }
        Ok(self.outcome())
    }

    pub fn state(&self) -> Option<ProtocolState> {
        self.session.as_ref().map(DialogueSession::state)
    }

    pub fn is_terminal(&self) -> bool {
        self.session.as_ref().is_some_and(DialogueSession::is_terminal)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.session.as_ref().and_then(DialogueSession::outcome)
    }

    pub fn agreed_item(&self) -> Option<&Item> {
        self.session.as_ref().and_then(DialogueSession::agreed_item)
    }

    pub fn session(&self) -> Option<&DialogueSession> {
        self.session.as_ref()
    }

    /// Every message delivered so far, in delivery order.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Ticks run so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    fn agent_not_found(id: &AgentId) -> DomainError {
        DomainError::new(ErrorCode::AgentNotFound, format!("Agent '{}' not found", id))
            .with_detail("agent_id", id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryMessageBus;
    use crate::domain::negotiation::{NegotiationPolicy, Performative};
    use crate::domain::preferences::{Catalog, CriterionName, Preferences};
    use std::sync::Arc;
    use CriterionName::*;

    fn id(name: &str) -> AgentId {
        AgentId::new(name).unwrap()
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::builder()
                .item_with_values(Item::new("Alpha").unwrap(), [(Price, 9.0), (StoppingPower, 2.0)])
                .item_with_values(Item::new("Beta").unwrap(), [(Price, 3.0), (StoppingPower, 9.0)])
                .build()
                .unwrap(),
        )
    }

    fn negotiation(policy: NegotiationPolicy) -> Negotiation<InMemoryMessageBus> {
        let catalog = catalog();
        let mut negotiation = Negotiation::new(
            InMemoryMessageBus::new(),
            NegotiationEngine::seeded(policy, 7),
        );
        negotiation
            .add_agent(Agent::new(
                id("X"),
                Preferences::new(vec![StoppingPower, Price], catalog.clone()).unwrap(),
            ))
            .unwrap();
        negotiation
            .add_agent(Agent::new(
                id("Y"),
                Preferences::new(vec![Price, StoppingPower], catalog).unwrap(),
            ))
            .unwrap();
        negotiation
    }

    fn half() -> NegotiationPolicy {
        NegotiationPolicy {
            top_fraction: 0.5,
            ..NegotiationPolicy::default()
        }
    }

    #[test]
    fn step_before_propose_fails() {
        let mut negotiation = negotiation(half());
        let err = negotiation.step().unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[test]
    fn duplicate_agent_is_rejected() {
        let mut negotiation = negotiation(half());
        let twin = negotiation.agents()[0].clone();
        assert!(negotiation.add_agent(twin).is_err());
        assert_eq!(negotiation.agents().len(), 2);
    }

    #[test]
    fn propose_validates_parties_and_item() {
        let mut negotiation = negotiation(half());

        let stranger = negotiation.propose(&id("X"), &id("Z"), "Alpha").unwrap_err();
        assert_eq!(stranger.code, ErrorCode::AgentNotFound);

        let unknown = negotiation.propose(&id("X"), &id("Y"), "Gamma").unwrap_err();
        assert_eq!(unknown.code, ErrorCode::ItemNotFound);

        let alone = negotiation.propose(&id("X"), &id("X"), "Alpha").unwrap_err();
        assert_eq!(alone.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn second_proposal_while_open_is_rejected() {
        let mut negotiation = negotiation(half());
        negotiation.propose(&id("X"), &id("Y"), "Alpha").unwrap();

        let err = negotiation.propose(&id("Y"), &id("X"), "Beta").unwrap_err();
        assert_eq!(err.code, ErrorCode::DialogueAlreadyOpen);
    }

    #[test]
    fn agreeable_proposal_commits_within_four_steps() {
        let mut negotiation = negotiation(half());
        negotiation.propose(&id("X"), &id("Y"), "Alpha").unwrap();

        let outcome = negotiation.run(10).unwrap().cloned();
        assert_eq!(
            outcome,
            Some(Outcome::Committed {
                item: Item::new("Alpha").unwrap()
            })
        );
        assert_eq!(negotiation.steps(), 4);

        let performatives: Vec<Performative> = negotiation
            .transcript()
            .iter()
            .map(Message::performative)
            .collect();
        assert_eq!(
            performatives,
            vec![
                Performative::Propose,
                Performative::Accept,
                Performative::Commit,
                Performative::Commit
            ]
        );
    }

    #[test]
    fn stepping_a_closed_dialogue_is_a_no_op() {
        let mut negotiation = negotiation(half());
        negotiation.propose(&id("X"), &id("Y"), "Alpha").unwrap();
        negotiation.run(10).unwrap();
        let steps = negotiation.steps();

        assert_eq!(negotiation.step().unwrap(), ProtocolState::Committed);
        assert_eq!(negotiation.steps(), steps);
    }

    #[test]
    fn declined_argument_ends_rejected() {
        let mut negotiation = negotiation(NegotiationPolicy {
            respond_with_argument: false,
            ..half()
        });
        negotiation.propose(&id("Y"), &id("X"), "Alpha").unwrap();
        negotiation.run(10).unwrap();

        assert_eq!(negotiation.state(), Some(ProtocolState::Rejected));
        assert!(negotiation.agreed_item().is_none());
    }

    #[test]
    fn closed_dialogue_can_be_replaced() {
        let mut negotiation = negotiation(half());
        let first = negotiation.propose(&id("X"), &id("Y"), "Alpha").unwrap();
        negotiation.run(10).unwrap();

        let second = negotiation.propose(&id("X"), &id("Y"), "Alpha").unwrap();
        assert_ne!(first, second);
        assert_eq!(negotiation.state(), Some(ProtocolState::Proposed));
    }
}
