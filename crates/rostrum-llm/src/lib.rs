//! # Rostrum LLM
//!
//! Generative backend integration for the debate arena.
//!
//! ## Supported Backends
//!
//! | Backend | Type | Key Required |
//! |---------|------|--------------|
//! | Gemini  | API  | `GEMINI_API_KEY` |
//! | Mock    | Testing | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rostrum_llm::{ChatSession, MockBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(MockBackend::constant("Cats are great."));
//!     let mut session = ChatSession::new(backend, "You argue for cats.", Vec::new());
//!
//!     let reply = session.send("Opening statement, please.").await.unwrap();
//!     assert_eq!(reply, "Cats are great.");
//!     assert_eq!(session.history().len(), 2);
//! }
//! ```

pub mod backend;
pub mod config;
pub mod gemini;
pub mod mock;
pub mod session;

pub use backend::{ChatBackend, LlmError};
pub use config::LlmConfig;
pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use session::ChatSession;
