//! Performative enum - the speech-act tag on every message.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Performative {
    Propose,
    Accept,
    AskWhy,
    Argue,
    Commit,
}

impl Performative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Performative::Propose => "PROPOSE",
            Performative::Accept => "ACCEPT",
            Performative::AskWhy => "ASK_WHY",
            Performative::Argue => "ARGUE",
            Performative::Commit => "COMMIT",
        }
    }
}

impl fmt::Display for Performative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Performative::AskWhy.to_string(), "ASK_WHY");
        assert_eq!(
            serde_json::to_string(&Performative::AskWhy).unwrap(),
            "\"ASK_WHY\""
        );
    }
}
