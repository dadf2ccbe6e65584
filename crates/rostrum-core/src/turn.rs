//! Conversation turn snapshots
//!
//! A [`Turn`] is one role-tagged message in a side's conversation with the
//! generative backend. Histories are persisted as ordered turn sequences and
//! must round-trip losslessly so a session can be rebuilt after a restart.

use serde::{Deserialize, Serialize};

/// Who produced a turn within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// A message sent to the model (prompts from the orchestrator).
    User,
    /// A reply produced by the model.
    Model,
}

impl TurnRole {
    /// Wire name used by the generative API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

/// One message in a conversational session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_serde_round_trip() {
        let turns = vec![
            Turn::user("Opening statement for the debate topic: cats"),
            Turn::model("Cats are clearly superior."),
        ];

        let json = serde_json::to_string(&turns).unwrap();
        let back: Vec<Turn> = serde_json::from_str(&json).unwrap();
        assert_eq!(turns, back);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(TurnRole::User.as_str(), "user");
        assert_eq!(TurnRole::Model.as_str(), "model");
        assert_eq!(serde_json::to_string(&TurnRole::Model).unwrap(), "\"model\"");
    }
}
