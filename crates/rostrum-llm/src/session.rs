//! Conversational session over a chat backend
//!
//! A session represents one participant's ongoing exchange with the model:
//! an ordered, replayable turn sequence. Server processes hold no state
//! between requests, so every phase operation rebuilds its sessions from
//! persisted history; a resumed session must behave identically to one that
//! had lived continuously in memory.

use std::sync::Arc;

use rostrum_core::Turn;

use crate::backend::{ChatBackend, LlmError};

/// One participant's conversation with the generative backend.
#[derive(Debug)]
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    system_instruction: String,
    turns: Vec<Turn>,
}

impl ChatSession {
    /// Prime a session with a fixed system instruction and prior turns.
    ///
    /// Pass an empty `prior_turns` for a fresh session, or a previously
    /// exported history to resume after rehydration from storage.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        system_instruction: impl Into<String>,
        prior_turns: Vec<Turn>,
    ) -> Self {
        Self {
            backend,
            system_instruction: system_instruction.into(),
            turns: prior_turns,
        }
    }

    /// Send a message and return the model's reply.
    ///
    /// Appends the message as a user turn, invokes the backend with the
    /// entire accumulated history, and appends the reply as a model turn.
    /// On backend failure the user turn is rolled back so the session is
    /// left exactly as it was before the call.
    pub async fn send(&mut self, message: impl Into<String>) -> Result<String, LlmError> {
        self.turns.push(Turn::user(message));

        let reply = match self.backend.converse(&self.system_instruction, &self.turns).await {
            Ok(reply) => reply,
            Err(e) => {
                self.turns.pop();
                return Err(e);
            }
        };

        self.turns.push(Turn::model(reply.clone()));
        Ok(reply)
    }

    /// The full ordered turn sequence.
    pub fn history(&self) -> &[Turn] {
        &self.turns
    }

    /// Clone the history into a serializable form for storage.
    ///
    /// Round-trip guarantee: `new(backend, system, export_history())`
    /// reproduces the same sequence.
    pub fn export_history(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    #[tokio::test]
    async fn test_send_appends_both_turns() {
        let backend = Arc::new(MockBackend::constant("A fine point."));
        let mut session = ChatSession::new(backend, "You argue for the topic.", Vec::new());

        let reply = session.send("Opening statement.").await.unwrap();
        assert_eq!(reply, "A fine point.");

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], Turn::user("Opening statement."));
        assert_eq!(history[1], Turn::model("A fine point."));
    }

    #[tokio::test]
    async fn test_export_history_round_trip() {
        let backend = Arc::new(MockBackend::scripted(vec![
            "First reply.".to_string(),
            "Second reply.".to_string(),
        ]));
        let mut session = ChatSession::new(backend.clone(), "system", Vec::new());
        session.send("one").await.unwrap();
        session.send("two").await.unwrap();

        let exported = session.export_history();
        let resumed = ChatSession::new(backend, "system", exported.clone());

        assert_eq!(resumed.history(), exported.as_slice());
        assert_eq!(resumed.export_history(), exported);
    }

    #[tokio::test]
    async fn test_resumed_session_sees_prior_turns() {
        let backend = Arc::new(MockBackend::recording("later reply"));
        let prior = vec![Turn::user("earlier prompt"), Turn::model("earlier reply")];
        let mut session = ChatSession::new(backend.clone(), "system", prior);

        session.send("follow-up").await.unwrap();

        // The backend received the full accumulated history, not just the
        // new message.
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].turns.len(), 3);
        assert_eq!(calls[0].turns[0].content, "earlier prompt");
        assert_eq!(calls[0].turns[2].content, "follow-up");
    }

    #[tokio::test]
    async fn test_failed_send_leaves_history_untouched() {
        let backend = Arc::new(MockBackend::failing());
        let mut session = ChatSession::new(backend, "system", Vec::new());

        let err = session.send("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::NotAvailable));
        assert!(session.history().is_empty());
    }
}
