//! Baby feeding log: records feeding events and answers three queries —
//! record a new feeding, report the most recent one, and summarize today's
//! feedings in a fixed reference timezone.

pub mod config;
pub mod intent;
pub mod storage;
pub mod summary;
pub mod util;
