//! Debate record storage
//!
//! One row per debate. The transcript, questions, and both per-side
//! conversation histories live in JSON columns; `update` always writes the
//! whole mutable record, so each phase operation commits its appends in a
//! single terminal write.

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{Row, SqlitePool};

use rostrum_core::{Debate, LogEntry, Turn, Winner};

use crate::sqlite::StorageError;

/// Fields fixed at debate creation.
#[derive(Debug, Clone)]
pub struct NewDebate {
    pub user_id: i64,
    pub topic: String,
    pub logs: Vec<LogEntry>,
    pub pro_history: Vec<Turn>,
    pub con_history: Vec<Turn>,
}

/// The full mutable portion of a debate record.
///
/// Phase operations persist by replacing all of these columns at once.
/// Concurrent writers for the same debate therefore race last-writer-wins;
/// see the lost-update test in `tests/debate_store.rs`.
#[derive(Debug, Clone)]
pub struct DebateUpdate {
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
    pub pro_history: Vec<Turn>,
    pub con_history: Vec<Turn>,
    pub winner: Option<Winner>,
}

impl From<&Debate> for DebateUpdate {
    fn from(debate: &Debate) -> Self {
        Self {
            logs: debate.transcript.clone(),
            questions: debate.questions.clone(),
            pro_history: debate.pro_history.clone(),
            con_history: debate.con_history.clone(),
            winner: debate.winner,
        }
    }
}

/// Debate store over the shared pool.
#[derive(Debug, Clone)]
pub struct DebateStore {
    pool: SqlitePool,
}

impl DebateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new debate and return the stored record.
    pub async fn create(&self, new: NewDebate) -> Result<Debate, StorageError> {
        let result = sqlx::query(
            "INSERT INTO debates (user_id, topic, logs, questions, pro_history, con_history) \
             VALUES (?, ?, ?, '[]', ?, ?)",
        )
        .bind(new.user_id)
        .bind(&new.topic)
        .bind(encode_json(&new.logs)?)
        .bind(encode_json(&new.pro_history)?)
        .bind(encode_json(&new.con_history)?)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::info!(debate_id = id, topic = %new.topic, "Created debate");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StorageError::Internal("debate vanished after insert".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Debate>, StorageError> {
        let row = sqlx::query(
            "SELECT id, user_id, topic, logs, questions, pro_history, con_history, winner, \
             created_at, updated_at FROM debates WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_debate).transpose()
    }

    /// All debates owned by a user, oldest first.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Debate>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, user_id, topic, logs, questions, pro_history, con_history, winner, \
             created_at, updated_at FROM debates WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_debate).collect()
    }

    /// Replace the mutable columns of a debate record.
    pub async fn update(&self, id: i64, update: &DebateUpdate) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE debates SET logs = ?, questions = ?, pro_history = ?, con_history = ?, \
             winner = ?, updated_at = ? WHERE id = ?",
        )
        .bind(encode_json(&update.logs)?)
        .bind(encode_json(&update.questions)?)
        .bind(encode_json(&update.pro_history)?)
        .bind(encode_json(&update.con_history)?)
        .bind(update.winner.map(|w| w.as_str()))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Query(format!("debate {} not found", id)));
        }
        Ok(())
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn decode_json<T: DeserializeOwned>(column: &str, raw: &str) -> Result<T, StorageError> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::Serialization(format!("column {}: {}", column, e)))
}

fn row_to_debate(row: sqlx::sqlite::SqliteRow) -> Result<Debate, StorageError> {
    let logs: String = row.try_get("logs")?;
    let questions: String = row.try_get("questions")?;
    let pro_history: String = row.try_get("pro_history")?;
    let con_history: String = row.try_get("con_history")?;
    let winner: Option<String> = row.try_get("winner")?;

    let winner = match winner.as_deref() {
        None => None,
        Some("pro") => Some(Winner::Pro),
        Some("con") => Some(Winner::Con),
        Some(other) => {
            return Err(StorageError::Serialization(format!(
                "unknown winner value: {}",
                other
            )))
        }
    };

    Ok(Debate {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        topic: row.try_get("topic")?,
        transcript: decode_json("logs", &logs)?,
        questions: decode_json("questions", &questions)?,
        pro_history: decode_json("pro_history", &pro_history)?,
        con_history: decode_json("con_history", &con_history)?,
        winner,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
