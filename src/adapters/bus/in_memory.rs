//! In-memory message bus.
//!
//! Single-process, deterministic delivery. Each `dispatch` is one tick:
//! messages queued during the previous tick are stamped with the new tick
//! and a global sequence number, then moved into their receivers' mailboxes.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::domain::foundation::AgentId;
use crate::domain::negotiation::Message;
use crate::ports::MessageBus;

/// In-memory, tick-based message bus.
///
/// Features:
/// - Per-agent FIFO mailboxes, created on registration or first delivery
/// - Global send order preserved across receivers
/// - Nothing is delivered before the next `dispatch`
///
/// # Example
///
/// ```ignore
/// let mut bus = InMemoryMessageBus::new();
/// bus.send(message);
/// assert_eq!(bus.dispatch(), 1);
/// let inbox = bus.drain(&receiver);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMessageBus {
    outbox: Vec<Message>,
    mailboxes: HashMap<AgentId, VecDeque<Message>>,
    tick: u64,
    next_sequence: u64,
}

impl InMemoryMessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered but not yet drained messages for `agent`.
    pub fn mailbox_len(&self, agent: &AgentId) -> usize {
        self.mailboxes.get(agent).map_or(0, VecDeque::len)
    }
}

impl MessageBus for InMemoryMessageBus {
    fn register(&mut self, agent: &AgentId) {
        self.mailboxes.entry(agent.clone()).or_default();
    }

    fn send(&mut self, message: Message) {
        self.outbox.push(message);
    }

    fn dispatch(&mut self) -> usize {
        self.tick += 1;
        let delivered = self.outbox.len();

        for message in std::mem::take(&mut self.outbox) {
            let stamped = message.stamped(self.tick, self.next_sequence);
            self.next_sequence += 1;
            trace!(tick = self.tick, message = %stamped, "delivering");
            self.mailboxes
                .entry(stamped.receiver().clone())
                .or_default()
                .push_back(stamped);
        }
        delivered
    }

    fn drain(&mut self, agent: &AgentId) -> Vec<Message> {
        self.mailboxes
            .get_mut(agent)
            .map(|mailbox| mailbox.drain(..).collect())
            .unwrap_or_default()
    }

    fn pending_count(&self) -> usize {
        self.outbox.len()
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::preferences::Item;

    fn agent(name: &str) -> AgentId {
        AgentId::new(name).unwrap()
    }

    fn propose(session: SessionId, from: &str, to: &str, item: &str) -> Message {
        Message::propose(session, agent(from), agent(to), Item::new(item).unwrap())
    }

    #[test]
    fn nothing_is_delivered_before_dispatch() {
        let mut bus = InMemoryMessageBus::new();
        bus.register(&agent("B"));
        bus.send(propose(SessionId::new(), "A", "B", "Rifle"));

        assert_eq!(bus.pending_count(), 1);
        assert!(bus.drain(&agent("B")).is_empty());
    }

    #[test]
    fn dispatch_interleaves_senders_in_send_order() {
        let session = SessionId::new();
        let mut bus = InMemoryMessageBus::new();
        let m1 = propose(session, "A", "B", "One");
        let m2 = propose(session, "A", "B", "Two");
        let m3 = propose(session, "C", "B", "Three");
        bus.send(m1);
        bus.send(m2);
        bus.send(m3);

        assert_eq!(bus.dispatch(), 3);
        let names: Vec<String> = bus
            .drain(&agent("B"))
            .iter()
            .map(|m| m.item().name().to_string())
            .collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
        assert!(bus.drain(&agent("B")).is_empty());
        assert!(bus.drain(&agent("C")).is_empty());
    }

    #[test]
    fn dispatch_stamps_tick_and_global_sequence() {
        let session = SessionId::new();
        let mut bus = InMemoryMessageBus::new();
        bus.send(propose(session, "A", "B", "One"));
        bus.send(propose(session, "B", "A", "Two"));
        bus.dispatch();
        bus.send(propose(session, "A", "B", "Three"));
        bus.dispatch();

        assert_eq!(bus.current_tick(), 2);
        let to_b = bus.drain(&agent("B"));
        let to_a = bus.drain(&agent("A"));
        assert_eq!((to_b[0].tick(), to_b[0].sequence()), (1, 0));
        assert_eq!((to_a[0].tick(), to_a[0].sequence()), (1, 1));
        assert_eq!((to_b[1].tick(), to_b[1].sequence()), (2, 2));
    }

    #[test]
    fn empty_dispatch_still_advances_the_tick() {
        let mut bus = InMemoryMessageBus::new();
        assert_eq!(bus.dispatch(), 0);
        assert_eq!(bus.current_tick(), 1);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn unregistered_receiver_gets_a_mailbox_on_delivery() {
        let mut bus = InMemoryMessageBus::new();
        bus.send(propose(SessionId::new(), "A", "C", "Rifle"));
        bus.dispatch();

        assert_eq!(bus.mailbox_len(&agent("C")), 1);
        assert_eq!(bus.drain(&agent("C")).len(), 1);
        assert!(bus.drain(&agent("nobody")).is_empty());
    }
}
