use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::str::FromStr;

use super::types::StoreError;

// ============================================================================
// Store
// ============================================================================

/// Gateway to the feeding store.
///
/// Deliberately unpooled: every logical operation acquires its own fresh
/// connection and releases it before returning, success or failure. There is
/// no retry and no backoff — a failed connect surfaces as
/// [`StoreError::Connection`] on the first attempt.
#[derive(Clone)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    /// Open the store at `path`, creating the database file if needed.
    ///
    /// Acquires one connection to validate that the store is reachable, runs
    /// the idempotent migration, and releases it. Fails with
    /// [`StoreError::Connection`] if the store cannot be reached or set up.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let url = format!("sqlite:{}?mode=rwc", path);

        // busy_timeout=5000: SQLite waits up to 5 seconds for a competing
        // writer before returning SQLITE_BUSY. Concurrent invocations share
        // the file but never a connection.
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(StoreError::Connection)?
            .pragma("busy_timeout", "5000");

        let store = Self { options };
        let mut conn = store.acquire().await?;
        let migrated = store.migrate(&mut conn).await;
        store.release(conn).await;
        migrated?;

        tracing::debug!(path, "feeding store opened");
        Ok(store)
    }

    /// Acquire a fresh connection, single attempt.
    pub(crate) async fn acquire(&self) -> Result<SqliteConnection, StoreError> {
        self.options.connect().await.map_err(StoreError::Connection)
    }

    /// Release a connection acquired with [`Store::acquire`].
    ///
    /// Invoked by every operation on every exit path. Close consumes the
    /// handle, so releasing twice is unrepresentable; a failed close is
    /// logged and swallowed since the operation's own result already stands.
    pub(crate) async fn release(&self, conn: SqliteConnection) {
        if let Err(error) = conn.close().await {
            tracing::warn!(%error, "failed to close store connection");
        }
    }

    /// Idempotent schema setup, safe to re-run on an existing database.
    async fn migrate(&self, conn: &mut SqliteConnection) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedings (
                id INTEGER PRIMARY KEY,
                fed_at INTEGER NOT NULL,
                ounces REAL NOT NULL
            )
        "#,
        )
        .execute(&mut *conn)
        .await
        .map_err(StoreError::Connection)?;

        // find_latest and find_between both scan by feed time
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedings_fed_at ON feedings(fed_at DESC)")
            .execute(&mut *conn)
            .await
            .map_err(StoreError::Connection)?;

        Ok(())
    }
}
