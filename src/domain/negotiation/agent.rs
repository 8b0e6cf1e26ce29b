//! Agent - a negotiating party: an id plus its own preferences.

use rand::Rng;

use super::{DialogueSession, Message, NegotiationEngine};
use crate::domain::foundation::AgentId;
use crate::domain::preferences::Preferences;
use crate::ports::MessageBus;

/// A negotiating party.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    preferences: Preferences,
}

impl Agent {
    pub fn new(id: AgentId, preferences: Preferences) -> Self {
        Self { id, preferences }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Drains this agent's mailbox and lets the engine answer each message.
    ///
    /// Replies are queued on the bus for the next dispatch. Returns the
    /// messages that were consumed, in delivery order.
    pub fn step<R, B>(
        &self,
        engine: &mut NegotiationEngine<R>,
        session: &mut DialogueSession,
        bus: &mut B,
    ) -> Vec<Message>
    where
        R: Rng,
        B: MessageBus + ?Sized,
    {
        let inbox = bus.drain(&self.id);
        for message in &inbox {
            for reply in engine.handle(session, self, message) {
                bus.send(reply);
            }
        }
        inbox
    }
}
