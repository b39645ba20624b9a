//! Intent handlers: the boundary that turns operation results into
//! user-facing replies.
//!
//! Each handler invokes exactly one repository or summary operation. Every
//! store failure is logged with its detail and collapsed into one fixed
//! generic reply; internal errors never reach the user.

use chrono::Utc;
use chrono_tz::Tz;

use crate::storage::{FeedRecord, Store};
use crate::summary;
use crate::util::format_local;

/// The only failure text a user ever sees.
pub const GENERIC_ERROR_REPLY: &str = "An error has occurred, please try again later";

/// Reply for the latest-feeding query against an empty store.
pub const NO_FEEDINGS_REPLY: &str = "You have not recorded any feedings yet";

pub struct Intents {
    store: Store,
    timezone: Tz,
    default_ounces: f64,
}

impl Intents {
    pub fn new(store: Store, timezone: Tz, default_ounces: f64) -> Self {
        Self {
            store,
            timezone,
            default_ounces,
        }
    }

    /// Record a feeding happening now.
    ///
    /// `spoken_ounces` is whatever the caller captured for the volume slot;
    /// a missing or uninterpretable value falls back to the configured
    /// default and is never an error.
    pub async fn record_feeding(&self, spoken_ounces: Option<&str>) -> String {
        let record = FeedRecord::new(Utc::now(), self.parse_ounces(spoken_ounces));
        match self.store.insert(&record).await {
            Ok(()) => format!(
                "Recording that you fed the baby {} ounces at {}",
                record.ounces,
                format_local(record.fed_at, self.timezone)
            ),
            Err(error) => {
                tracing::error!(%error, "failed to record feeding");
                GENERIC_ERROR_REPLY.to_string()
            }
        }
    }

    /// Report the most recent recorded feeding.
    pub async fn latest_feeding(&self) -> String {
        match self.store.find_latest().await {
            Ok(Some(record)) => format!(
                "You last fed the baby {} ounces at {}",
                record.ounces,
                format_local(record.fed_at, self.timezone)
            ),
            Ok(None) => NO_FEEDINGS_REPLY.to_string(),
            Err(error) => {
                tracing::error!(%error, "failed to look up the latest feeding");
                GENERIC_ERROR_REPLY.to_string()
            }
        }
    }

    /// Report count and total volume for the current civil day.
    pub async fn daily_summary(&self) -> String {
        match summary::daily_summary(&self.store, Utc::now(), self.timezone).await {
            Ok(day) => format!(
                "Today you have fed the baby {} times for a total of {} ounces.",
                day.feedings, day.total_ounces
            ),
            Err(error) => {
                tracing::error!(%error, "failed to summarize today's feedings");
                GENERIC_ERROR_REPLY.to_string()
            }
        }
    }

    /// Interpret a spoken volume defensively: anything that does not parse
    /// to a finite, non-negative number becomes the configured default.
    fn parse_ounces(&self, spoken: Option<&str>) -> f64 {
        let Some(raw) = spoken else {
            return self.default_ounces;
        };
        match raw.trim().parse::<f64>() {
            Ok(ounces) if ounces.is_finite() && ounces >= 0.0 => ounces,
            _ => {
                tracing::debug!(raw, "could not interpret feed amount, using default");
                self.default_ounces
            }
        }
    }
}
