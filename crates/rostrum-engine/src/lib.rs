//! # Rostrum Engine
//!
//! The debate orchestration state machine.
//!
//! A debate advances `NotStarted → Opened → QuestionPhase* → Closed →
//! Judged`. Each phase operation rehydrates both sides' model sessions from
//! the stored record, runs the phase's model exchanges in a fixed order,
//! appends to the transcript, and commits everything in one terminal write.
//! A failure mid-phase aborts without persisting partial state.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rostrum_engine::DebateEngine;
//! use rostrum_llm::MockBackend;
//! use rostrum_persist::{connect_with, DebateStore, SqliteConfig, UserStore};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = connect_with(SqliteConfig::memory()).await?;
//! let engine = DebateEngine::new(
//!     DebateStore::new(pool.clone()),
//!     UserStore::new(pool),
//!     Arc::new(MockBackend::debater()),
//!     2,
//! );
//!
//! let user = engine.users().find_or_create("auth0|demo").await?;
//! let started = engine.start(user.id, "Should AI be regulated?").await?;
//! engine.process_turn(started.debate_id, "What about innovation?").await?;
//! engine.closing_arguments(started.debate_id).await?;
//! let verdict = engine.judge(started.debate_id).await?;
//! println!("winner: {}", verdict.judgment.as_str());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod prompts;
pub mod verdict;

pub use engine::{
    ClosingOutcome, DebateEngine, EngineError, JudgmentOutcome, StartedDebate, TurnOutcome,
};
