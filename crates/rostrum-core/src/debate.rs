//! The debate aggregate and its transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::turn::Turn;

/// A debate participant stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Pro,
    Con,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Pro => "pro",
            Side::Con => "con",
        }
    }

    /// The opposing stance.
    pub fn opponent(&self) -> Side {
        match self {
            Side::Pro => Side::Con,
            Side::Con => Side::Pro,
        }
    }
}

/// Who a transcript entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Pro,
    Con,
    Moderator,
}

impl From<Side> for Speaker {
    fn from(side: Side) -> Self {
        match side {
            Side::Pro => Speaker::Pro,
            Side::Con => Speaker::Con,
        }
    }
}

/// The debate stage a transcript entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    OpeningStatement,
    InitialQuestionResponse,
    Rebuttal,
    ClosingArgument,
    Judgment,
    Narration,
}

/// Final verdict of a judged debate. Set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Pro,
    Con,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Pro => "pro",
            Winner::Con => "con",
        }
    }
}

/// One entry in a debate's transcript.
///
/// The wire field for the phase is `response_type`, which is what clients
/// and the stored JSON use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub speaker: Speaker,
    #[serde(rename = "response_type")]
    pub phase: Phase,
    pub text: String,
}

impl LogEntry {
    pub fn new(speaker: Speaker, phase: Phase, text: impl Into<String>) -> Self {
        Self {
            speaker,
            phase,
            text: text.into(),
        }
    }

    pub fn moderator(phase: Phase, text: impl Into<String>) -> Self {
        Self::new(Speaker::Moderator, phase, text)
    }
}

/// The aggregate root: one debate instance.
///
/// The transcript only ever grows; entries are never mutated or removed.
/// `pro_history` and `con_history` hold each side's full conversation with
/// the model so a live session can be rebuilt from storage on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debate {
    pub id: i64,
    /// Owning user. Many debates per user, fixed at creation.
    pub user_id: i64,
    /// Immutable free-text topic, set once at creation.
    pub topic: String,
    /// Ordered, append-only transcript.
    pub transcript: Vec<LogEntry>,
    /// Raw moderator questions, in submission order.
    pub questions: Vec<String>,
    /// Pro side's serialized conversation with the model.
    pub pro_history: Vec<Turn>,
    /// Con side's serialized conversation with the model.
    pub con_history: Vec<Turn>,
    /// Set exactly once by the judgment phase, then immutable.
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Debate {
    /// A debate without a topic cannot be advanced past start.
    pub fn is_started(&self) -> bool {
        !self.topic.trim().is_empty()
    }

    pub fn is_judged(&self) -> bool {
        self.winner.is_some()
    }

    /// A debate with no transcript entries cannot be judged.
    pub fn can_be_judged(&self) -> bool {
        self.is_started() && !self.transcript.is_empty() && !self.is_judged()
    }

    /// Borrow a side's stored history for session rehydration.
    pub fn history_for(&self, side: Side) -> &[Turn] {
        match side {
            Side::Pro => &self.pro_history,
            Side::Con => &self.con_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_debate() -> Debate {
        Debate {
            id: 1,
            user_id: 7,
            topic: "Should AI be regulated?".to_string(),
            transcript: Vec::new(),
            questions: Vec::new(),
            pro_history: Vec::new(),
            con_history: Vec::new(),
            winner: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_log_entry_wire_shape() {
        let entry = LogEntry::new(Speaker::Pro, Phase::OpeningStatement, "I open.");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["speaker"], "pro");
        assert_eq!(json["response_type"], "opening_statement");
        assert_eq!(json["text"], "I open.");
    }

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(
            serde_json::to_string(&Phase::InitialQuestionResponse).unwrap(),
            "\"initial_question_response\""
        );
        assert_eq!(
            serde_json::to_string(&Phase::ClosingArgument).unwrap(),
            "\"closing_argument\""
        );
    }

    #[test]
    fn test_judging_preconditions() {
        let mut debate = sample_debate();
        // No transcript yet
        assert!(!debate.can_be_judged());

        debate
            .transcript
            .push(LogEntry::moderator(Phase::OpeningStatement, "Framing."));
        assert!(debate.can_be_judged());

        debate.winner = Some(Winner::Con);
        assert!(debate.is_judged());
        assert!(!debate.can_be_judged());
    }

    #[test]
    fn test_topicless_debate_is_not_started() {
        let mut debate = sample_debate();
        debate.topic = "   ".to_string();
        assert!(!debate.is_started());
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Pro.opponent(), Side::Con);
        assert_eq!(Side::Con.opponent(), Side::Pro);
        assert_eq!(Speaker::from(Side::Con), Speaker::Con);
    }
}
