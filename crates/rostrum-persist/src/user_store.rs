//! User storage
//!
//! Users are created lazily: the first authenticated request carrying an
//! unseen subject claim inserts a row, and the numeric id is what the rest
//! of the system sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use crate::sqlite::StorageError;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Stable identity from the auth layer (JWT subject).
    pub auth_id: String,
    pub created_at: DateTime<Utc>,
}

/// User store over the shared pool.
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a user by auth identity, creating the row if absent.
    pub async fn find_or_create(&self, auth_id: &str) -> Result<User, StorageError> {
        if let Some(user) = self.find_by_auth_id(auth_id).await? {
            return Ok(user);
        }

        // Two requests can race here; the UNIQUE constraint makes the loser
        // fall back to the row the winner inserted.
        let inserted = sqlx::query("INSERT OR IGNORE INTO users (auth_id) VALUES (?)")
            .bind(auth_id)
            .execute(&self.pool)
            .await?;

        if inserted.rows_affected() > 0 {
            tracing::info!(auth_id = %auth_id, "Created user");
        }

        self.find_by_auth_id(auth_id)
            .await?
            .ok_or_else(|| StorageError::Internal("user vanished after insert".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT id, auth_id, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_user).transpose()
    }

    pub async fn find_by_auth_id(&self, auth_id: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT id, auth_id, created_at FROM users WHERE auth_id = ?")
            .bind(auth_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
    Ok(User {
        id: row.try_get("id")?,
        auth_id: row.try_get("auth_id")?,
        created_at: row.try_get("created_at")?,
    })
}
