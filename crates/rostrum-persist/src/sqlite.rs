//! SQLite pool setup and storage error types

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Query(e.to_string())
    }
}

/// SQLite configuration options
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database URL (e.g., "sqlite:rostrum.db?mode=rwc" or "sqlite::memory:")
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Enable WAL journal mode for better concurrency
    pub wal_mode: bool,
    /// Enable foreign key enforcement
    pub foreign_keys: bool,
    /// Busy timeout in seconds
    pub busy_timeout_secs: u32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:rostrum.db?mode=rwc".to_string(),
            max_connections: 5,
            wal_mode: true,
            foreign_keys: true,
            busy_timeout_secs: 30,
        }
    }
}

impl SqliteConfig {
    /// Config for an in-memory database (testing).
    pub fn memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            wal_mode: false,
            foreign_keys: true,
            busy_timeout_secs: 5,
        }
    }
}

/// Connect with default settings and run migrations.
pub async fn connect(url: &str) -> Result<SqlitePool, StorageError> {
    let config = SqliteConfig {
        url: url.to_string(),
        ..Default::default()
    };
    connect_with(config).await
}

/// Connect with full configuration and run migrations.
pub async fn connect_with(config: SqliteConfig) -> Result<SqlitePool, StorageError> {
    let mut options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    if config.foreign_keys {
        options = options.pragma("foreign_keys", "ON");
    }
    options = options.pragma("busy_timeout", config.busy_timeout_secs.to_string());

    if config.wal_mode {
        options = options.pragma("journal_mode", "WAL");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| StorageError::Internal(format!("Migration failed: {}", e)))?;

    info!(url = %config.url, wal = config.wal_mode, "Connected to SQLite");

    Ok(pool)
}
