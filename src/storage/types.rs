use chrono::{DateTime, Utc};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Store-level failures, one variant per failure class.
///
/// None of these are retried: an operation either succeeds in one attempt or
/// reports its failure upward, where the handler layer collapses it into a
/// single generic reply.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or initialized.
    #[error("failed to open the feeding store: {0}")]
    Connection(#[source] sqlx::Error),

    /// An insert failed in transport or was not acknowledged by the store.
    #[error("feeding was not written: {0}")]
    Write(String),

    /// A query failed in transport or returned a row that could not be decoded.
    #[error("failed to read feedings: {0}")]
    Read(String),
}

// ============================================================================
// Data Structures
// ============================================================================

/// One recorded feeding event.
///
/// Immutable once persisted; there are no update or delete operations.
/// Records are totally ordered by `fed_at`, ties broken arbitrarily.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRecord {
    /// Absolute instant of the feeding, assigned by the service at creation.
    pub fed_at: DateTime<Utc>,
    /// Volume in ounces, always finite and non-negative.
    pub ounces: f64,
}

impl FeedRecord {
    pub fn new(fed_at: DateTime<Utc>, ounces: f64) -> Self {
        Self { fed_at, ounces }
    }

    /// Decode a `feedings` row: `fed_at` is stored as unix milliseconds.
    pub(crate) fn from_row((fed_at, ounces): (i64, f64)) -> Result<Self, StoreError> {
        let fed_at = DateTime::from_timestamp_millis(fed_at).ok_or_else(|| {
            StoreError::Read(format!("stored feed time {fed_at} is out of range"))
        })?;
        Ok(Self { fed_at, ounces })
    }
}
