//! # Rostrum Persistence
//!
//! SQLite-backed storage for debate records and users.
//!
//! A debate row is the single durable source of truth: server processes are
//! stateless between requests, so every phase operation reads the record,
//! rebuilds the model sessions from the serialized histories, and writes the
//! whole mutable record back when it finishes.

pub mod debate_store;
pub mod sqlite;
pub mod user_store;

pub use debate_store::{DebateStore, DebateUpdate, NewDebate};
pub use sqlite::{connect, connect_with, SqliteConfig, StorageError};
pub use user_store::{User, UserStore};
