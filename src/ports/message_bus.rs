//! MessageBus port - Interface for delivering messages between agents.
//!
//! Messages sent during one tick are not visible to any receiver until the
//! next `dispatch`, which gives every agent the same view of a tick.

use crate::domain::foundation::AgentId;
use crate::domain::negotiation::Message;

/// Port for tick-based message delivery.
///
/// Implementations must ensure:
/// - `send` never delivers immediately
/// - `dispatch` delivers everything sent since the previous dispatch, in send order
/// - `drain` returns a mailbox in delivery order and empties it
///
/// # Example
///
/// ```ignore
/// bus.send(message);
/// bus.dispatch();
/// let inbox = bus.drain(&agent_id);
/// ```
pub trait MessageBus: Send {
    /// Creates an empty mailbox for `agent`; registering twice is a no-op.
    fn register(&mut self, agent: &AgentId);

    /// Queues a message for the next dispatch.
    fn send(&mut self, message: Message);

    /// Advances the tick and moves queued messages into mailboxes.
    ///
    /// Returns the number of messages delivered.
    fn dispatch(&mut self) -> usize;

    /// Removes and returns everything in the agent's mailbox.
    fn drain(&mut self, agent: &AgentId) -> Vec<Message>;

    /// Messages sent but not yet dispatched.
    fn pending_count(&self) -> usize;

    /// Number of dispatches performed so far.
    fn current_tick(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn MessageBus) {}
}
