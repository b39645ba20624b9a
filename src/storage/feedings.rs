use chrono::{DateTime, Utc};

use super::store::Store;
use super::types::{FeedRecord, StoreError};

impl Store {
    // ========================================================================
    // Feeding Operations
    // ========================================================================

    /// Persist one feeding event.
    ///
    /// The write is acknowledged only when the store reports exactly one row
    /// affected; anything else is a [`StoreError::Write`]. There is no
    /// partial success: either the record exists afterward or it does not.
    pub async fn insert(&self, record: &FeedRecord) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("INSERT INTO feedings (fed_at, ounces) VALUES (?, ?)")
            .bind(record.fed_at.timestamp_millis())
            .bind(record.ounces)
            .execute(&mut conn)
            .await;
        self.release(conn).await;

        let result = result.map_err(|e| StoreError::Write(e.to_string()))?;
        if result.rows_affected() != 1 {
            return Err(StoreError::Write("no rows inserted".to_string()));
        }

        tracing::debug!(ounces = record.ounces, "feeding recorded");
        Ok(())
    }

    /// The record with the maximum feed time, or `None` on an empty store.
    pub async fn find_latest(&self) -> Result<Option<FeedRecord>, StoreError> {
        let mut conn = self.acquire().await?;
        let row: Result<Option<(i64, f64)>, _> =
            sqlx::query_as("SELECT fed_at, ounces FROM feedings ORDER BY fed_at DESC LIMIT 1")
                .fetch_optional(&mut conn)
                .await;
        self.release(conn).await;

        row.map_err(|e| StoreError::Read(e.to_string()))?
            .map(FeedRecord::from_row)
            .transpose()
    }

    /// All records with `start <= fed_at < end`, each exactly once.
    ///
    /// No ordering guarantee beyond completeness.
    pub async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FeedRecord>, StoreError> {
        let mut conn = self.acquire().await?;
        let rows: Result<Vec<(i64, f64)>, _> =
            sqlx::query_as("SELECT fed_at, ounces FROM feedings WHERE fed_at >= ? AND fed_at < ?")
                .bind(start.timestamp_millis())
                .bind(end.timestamp_millis())
                .fetch_all(&mut conn)
                .await;
        self.release(conn).await;

        rows.map_err(|e| StoreError::Read(e.to_string()))?
            .into_iter()
            .map(FeedRecord::from_row)
            .collect()
    }
}
