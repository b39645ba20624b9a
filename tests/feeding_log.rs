//! End-to-end tests over a file-backed store: record, find the latest
//! feeding, and summarize a civil day, including daylight-saving transition
//! dates.
//!
//! Each test creates its own temporary database file for isolation; the
//! store opens a fresh connection per operation, so the file is the only
//! state shared between calls.

use chrono::{TimeZone, Utc};
use chrono_tz::America::Los_Angeles;
use chrono_tz::Tz;
use tempfile::TempDir;

use feedlog::storage::{FeedRecord, Store};
use feedlog::summary::{self, DaySummary};
use feedlog::util::format_local;

const TZ: Tz = Los_Angeles;

async fn test_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feedlog.db");
    let store = Store::open(path.to_str().unwrap()).await.unwrap();
    (dir, store)
}

/// An instant given as local wall-clock time in the reference timezone.
fn at_local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    TZ.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// A feeding at local wall-clock time in the reference timezone.
fn feeding_local(y: i32, mo: u32, d: u32, h: u32, mi: u32, ounces: f64) -> FeedRecord {
    FeedRecord::new(at_local(y, mo, d, h, mi), ounces)
}

// ============================================================================
// Record / Latest
// ============================================================================

#[tokio::test]
async fn test_latest_feeding_after_a_morning_and_an_afternoon_feed() {
    let (_dir, store) = test_store().await;

    store
        .insert(&feeding_local(2024, 3, 10, 8, 0, 4.0))
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 3, 10, 14, 0, 2.0))
        .await
        .unwrap();

    let latest = store.find_latest().await.unwrap().unwrap();
    assert_eq!(latest.ounces, 2.0);
    assert_eq!(format_local(latest.fed_at, TZ), "2:00pm");
}

#[tokio::test]
async fn test_empty_store_has_no_latest_feeding() {
    let (_dir, store) = test_store().await;
    assert!(store.find_latest().await.unwrap().is_none());
}

// ============================================================================
// Daily Summary
// ============================================================================

#[tokio::test]
async fn test_daily_summary_counts_and_totals() {
    let (_dir, store) = test_store().await;

    store
        .insert(&feeding_local(2024, 3, 10, 8, 0, 4.0))
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 3, 10, 14, 0, 2.0))
        .await
        .unwrap();

    let noon = at_local(2024, 3, 10, 12, 0);
    let day = summary::daily_summary(&store, noon, TZ).await.unwrap();
    assert_eq!(
        day,
        DaySummary {
            feedings: 2,
            total_ounces: 6.0
        }
    );
}

#[tokio::test]
async fn test_daily_summary_ignores_neighboring_days() {
    let (_dir, store) = test_store().await;

    store
        .insert(&feeding_local(2024, 6, 4, 23, 59, 3.0)) // evening before
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 6, 5, 0, 0, 4.0)) // midnight: starts the day
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 6, 5, 11, 30, 2.0))
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 6, 6, 0, 0, 5.0)) // next midnight: next day
        .await
        .unwrap();

    let mid_day = at_local(2024, 6, 5, 12, 0);
    let day = summary::daily_summary(&store, mid_day, TZ).await.unwrap();
    assert_eq!(day.feedings, 2);
    assert!((day.total_ounces - 6.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_midnight_feeding_lands_in_exactly_one_day() {
    let (_dir, store) = test_store().await;

    store
        .insert(&feeding_local(2024, 6, 5, 0, 0, 4.0))
        .await
        .unwrap();

    let tuesday = at_local(2024, 6, 4, 12, 0);
    let wednesday = at_local(2024, 6, 5, 12, 0);

    let before = summary::daily_summary(&store, tuesday, TZ).await.unwrap();
    let after = summary::daily_summary(&store, wednesday, TZ).await.unwrap();
    assert_eq!(before.feedings, 0, "must not count into the ending day");
    assert_eq!(after.feedings, 1, "must count into the starting day");
}

#[tokio::test]
async fn test_summary_total_within_floating_point_tolerance() {
    let (_dir, store) = test_store().await;

    let volumes = [0.1, 0.2, 0.3, 2.5, 3.3, 1.7];
    for (i, &ounces) in volumes.iter().enumerate() {
        store
            .insert(&feeding_local(2024, 6, 5, 6 + i as u32, 0, ounces))
            .await
            .unwrap();
    }

    let mid_day = at_local(2024, 6, 5, 12, 0);
    let day = summary::daily_summary(&store, mid_day, TZ).await.unwrap();
    assert_eq!(day.feedings, volumes.len());
    assert!((day.total_ounces - volumes.iter().sum::<f64>()).abs() < 1e-9);
}

// ============================================================================
// Daylight-Saving Transitions
// ============================================================================

#[tokio::test]
async fn test_spring_forward_day_keeps_early_and_late_feedings() {
    let (_dir, store) = test_store().await;

    // 2024-03-10: clocks jump 2:00am -> 3:00am, the civil day is 23 hours
    store
        .insert(&feeding_local(2024, 3, 10, 1, 30, 3.0)) // before the jump
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 3, 10, 3, 30, 2.0)) // after the jump
        .await
        .unwrap();
    store
        .insert(&feeding_local(2024, 3, 9, 23, 30, 4.0)) // previous day
        .await
        .unwrap();

    let noon = at_local(2024, 3, 10, 12, 0);
    let day = summary::daily_summary(&store, noon, TZ).await.unwrap();
    assert_eq!(day.feedings, 2);
    assert!((day.total_ounces - 5.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_fall_back_day_counts_both_repeated_hours() {
    let (_dir, store) = test_store().await;

    // 2024-11-03: clocks fall back 2:00am -> 1:00am, the civil day is 25
    // hours and 1:30am happens twice. Both instants belong to the day.
    let first = Utc.with_ymd_and_hms(2024, 11, 3, 8, 30, 0).unwrap(); // 1:30am PDT
    let second = Utc.with_ymd_and_hms(2024, 11, 3, 9, 30, 0).unwrap(); // 1:30am PST
    store.insert(&FeedRecord::new(first, 3.0)).await.unwrap();
    store.insert(&FeedRecord::new(second, 2.0)).await.unwrap();

    assert_eq!(format_local(first, TZ), "1:30am");
    assert_eq!(format_local(second, TZ), "1:30am");

    let noon = at_local(2024, 11, 3, 12, 0);
    let day = summary::daily_summary(&store, noon, TZ).await.unwrap();
    assert_eq!(day.feedings, 2);
    assert!((day.total_ounces - 5.0).abs() < 1e-9);
}
