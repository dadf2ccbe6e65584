//! Chat backend trait and common error types

use async_trait::async_trait;
use thiserror::Error;

use rostrum_core::Turn;

/// Errors from generative backends.
///
/// All variants mean the same thing to the orchestrator: the backend was
/// unavailable for this call. No retry happens at this layer.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Backend not available")]
    NotAvailable,
}

/// Trait for generative text backends.
///
/// The debate engine depends only on this trait, so tests run against
/// [`crate::MockBackend`] without network access.
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Check if the backend is reachable.
    async fn is_available(&self) -> bool;

    /// Produce the next reply for a conversation.
    ///
    /// `turns` is the entire accumulated history, ending with the message
    /// being answered. The system instruction is passed on every call and
    /// never stored by the backend.
    async fn converse(&self, system: &str, turns: &[Turn]) -> Result<String, LlmError>;

    /// Single non-conversational generation (used by the judge).
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let turns = [Turn::user(prompt)];
        self.converse(system, &turns).await
    }
}
