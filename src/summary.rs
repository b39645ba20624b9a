//! Day-window computation and aggregation over the feeding repository.
//!
//! All calendar arithmetic happens in the configured reference timezone: a
//! "day" is the half-open interval from one local midnight to the next, so
//! on daylight-saving transition dates it spans 23 or 25 hours rather than a
//! fixed 86400 seconds.

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::storage::{FeedRecord, Store, StoreError};

/// Count and total volume of the feedings inside one day window.
///
/// Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary {
    pub feedings: usize,
    pub total_ounces: f64,
}

impl DaySummary {
    fn of(records: &[FeedRecord]) -> Self {
        Self {
            feedings: records.len(),
            total_ounces: records.iter().map(|r| r.ounces).sum(),
        }
    }
}

/// The day window containing `now`: `[local midnight, next local midnight)`
/// in `tz`, expressed as absolute instants.
pub fn day_window(now: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&tz).date_naive();
    let tomorrow = today + Days::new(1);
    (local_midnight(today, tz), local_midnight(tomorrow, tz))
}

/// Summarize the feedings recorded on the civil day containing `now`.
///
/// Never fails on its own; the only failure propagated is the repository's.
pub async fn daily_summary(
    store: &Store,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<DaySummary, StoreError> {
    let (start, end) = day_window(now, tz);
    let records = store.find_between(start, end).await?;
    Ok(DaySummary::of(&records))
}

/// First instant of `day` on the local clock of `tz`.
///
/// Midnight can be repeated or skipped on transition days: a repeated
/// midnight resolves to its first occurrence, a skipped one slides forward
/// to the first wall-clock time that exists.
fn local_midnight(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let mut naive = day.and_time(NaiveTime::MIN);
    // DST gaps are at most a couple of hours; 96 half-hour steps also covers
    // the historical calendar reforms that dropped whole days.
    for _ in 0..96 {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(first, _) => return first.with_timezone(&Utc),
            LocalResult::None => naive += TimeDelta::minutes(30),
        }
    }
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
