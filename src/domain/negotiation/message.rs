//! Message value object exchanged between agents.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Performative;
use crate::domain::argument::{CounterReason, CoupleValue};
use crate::domain::foundation::{AgentId, SessionId};
use crate::domain::preferences::Item;

/// Why an ARGUE message was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgueReason {
    /// Defends the sender's own proposal after an ASK_WHY.
    SupportingPremise,
    BetterValueSameCriterion,
    DifferentCriterion,
    FallbackRandom,
}

impl ArgueReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgueReason::SupportingPremise => "supporting-premise",
            ArgueReason::BetterValueSameCriterion => CounterReason::BetterValueSameCriterion.as_str(),
            ArgueReason::DifferentCriterion => CounterReason::DifferentCriterion.as_str(),
            ArgueReason::FallbackRandom => CounterReason::FallbackRandom.as_str(),
        }
    }
}

impl From<CounterReason> for ArgueReason {
    fn from(reason: CounterReason) -> Self {
        match reason {
            CounterReason::BetterValueSameCriterion => ArgueReason::BetterValueSameCriterion,
            CounterReason::DifferentCriterion => ArgueReason::DifferentCriterion,
            CounterReason::FallbackRandom => ArgueReason::FallbackRandom,
        }
    }
}

impl fmt::Display for ArgueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message payload; its shape is fixed by the performative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    /// PROPOSE, ACCEPT, ASK_WHY and COMMIT carry the item under discussion.
    Item { item: Item },
    /// ARGUE carries a reason tag, an item and the premise backing it.
    Argue {
        reason: ArgueReason,
        item: Item,
        premise: CoupleValue,
    },
}

/// A message between two agents within one dialogue.
///
/// `tick` and `sequence` are zero until the bus stamps them at dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    session_id: SessionId,
    sender: AgentId,
    receiver: AgentId,
    performative: Performative,
    content: MessageContent,
    tick: u64,
    sequence: u64,
}

impl Message {
    fn with_item(
        performative: Performative,
        session_id: SessionId,
        sender: AgentId,
        receiver: AgentId,
        item: Item,
    ) -> Self {
        Self {
            session_id,
            sender,
            receiver,
            performative,
            content: MessageContent::Item { item },
            tick: 0,
            sequence: 0,
        }
    }

    pub fn propose(session_id: SessionId, sender: AgentId, receiver: AgentId, item: Item) -> Self {
        Self::with_item(Performative::Propose, session_id, sender, receiver, item)
    }

    pub fn accept(session_id: SessionId, sender: AgentId, receiver: AgentId, item: Item) -> Self {
        Self::with_item(Performative::Accept, session_id, sender, receiver, item)
    }

    pub fn ask_why(session_id: SessionId, sender: AgentId, receiver: AgentId, item: Item) -> Self {
        Self::with_item(Performative::AskWhy, session_id, sender, receiver, item)
    }

    pub fn commit(session_id: SessionId, sender: AgentId, receiver: AgentId, item: Item) -> Self {
        Self::with_item(Performative::Commit, session_id, sender, receiver, item)
    }

    pub fn argue(
        session_id: SessionId,
        sender: AgentId,
        receiver: AgentId,
        reason: ArgueReason,
        item: Item,
        premise: CoupleValue,
    ) -> Self {
        Self {
            session_id,
            sender,
            receiver,
            performative: Performative::Argue,
            content: MessageContent::Argue {
                reason,
                item,
                premise,
            },
            tick: 0,
            sequence: 0,
        }
    }

    /// Returns a copy stamped with its delivery tick and sequence number.
    pub fn stamped(mut self, tick: u64, sequence: u64) -> Self {
        self.tick = tick;
        self.sequence = sequence;
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn sender(&self) -> &AgentId {
        &self.sender
    }

    pub fn receiver(&self) -> &AgentId {
        &self.receiver
    }

    pub fn performative(&self) -> Performative {
        self.performative
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// The item under discussion, whatever the content shape.
    pub fn item(&self) -> &Item {
        match &self.content {
            MessageContent::Item { item } => item,
            MessageContent::Argue { item, .. } => item,
        }
    }

    /// The premise of an ARGUE message.
    pub fn premise(&self) -> Option<&CoupleValue> {
        match &self.content {
            MessageContent::Argue { premise, .. } => Some(premise),
            MessageContent::Item { .. } => None,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[tick {} #{}] {} -> {} {}",
            self.tick, self.sequence, self.sender, self.receiver, self.performative
        )?;
        match &self.content {
            MessageContent::Item { item } => write!(f, " {}", item),
            MessageContent::Argue {
                reason,
                item,
                premise,
            } => write!(f, " {} ({}: {})", item, reason, premise),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preferences::CriterionName;

    fn agent(name: &str) -> AgentId {
        AgentId::new(name).unwrap()
    }

    #[test]
    fn item_is_readable_from_both_content_shapes() {
        let session = SessionId::new();
        let glock = Item::new("Glock").unwrap();

        let propose = Message::propose(session, agent("A"), agent("B"), glock.clone());
        let argue = Message::argue(
            session,
            agent("A"),
            agent("B"),
            ArgueReason::SupportingPremise,
            glock.clone(),
            CoupleValue::new(CriterionName::Price, 8.0),
        );

        assert_eq!(propose.item(), &glock);
        assert_eq!(argue.item(), &glock);
        assert!(propose.premise().is_none());
        assert_eq!(argue.premise().unwrap().criterion, CriterionName::Price);
        assert_eq!(argue.performative(), Performative::Argue);
    }

    #[test]
    fn stamped_sets_delivery_metadata() {
        let message = Message::commit(
            SessionId::new(),
            agent("A"),
            agent("B"),
            Item::new("Glock").unwrap(),
        )
        .stamped(3, 17);
        assert_eq!(message.tick(), 3);
        assert_eq!(message.sequence(), 17);
    }

    #[test]
    fn display_renders_argue_premise() {
        let message = Message::argue(
            SessionId::new(),
            agent("B"),
            agent("A"),
            ArgueReason::from(CounterReason::DifferentCriterion),
            Item::new("Beta").unwrap(),
            CoupleValue::new(CriterionName::Range, 8.0),
        )
        .stamped(2, 4);
        assert_eq!(
            message.to_string(),
            "[tick 2 #4] B -> A ARGUE Beta (different-criterion: RANGE = 8)"
        );
    }

    #[test]
    fn argue_content_serializes_with_tag() {
        let message = Message::argue(
            SessionId::new(),
            agent("A"),
            agent("B"),
            ArgueReason::FallbackRandom,
            Item::new("Alpha").unwrap(),
            CoupleValue::new(CriterionName::Price, 9.0),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["performative"], "ARGUE");
        assert_eq!(json["content"]["kind"], "argue");
        assert_eq!(json["content"]["reason"], "fallback-random");
    }
}
