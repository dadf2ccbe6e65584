//! # Rostrum Core
//!
//! Domain types for the debate arena: the [`Debate`] aggregate, its
//! append-only transcript of [`LogEntry`] records, and the [`Turn`]
//! snapshots that capture each side's conversation with the model.
//!
//! Everything here is pure data. Persistence lives in `rostrum-persist`,
//! model calls in `rostrum-llm`, and the phase state machine in
//! `rostrum-engine`.

pub mod debate;
pub mod turn;

pub use debate::{Debate, LogEntry, Phase, Side, Speaker, Winner};
pub use turn::{Turn, TurnRole};
