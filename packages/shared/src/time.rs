//! Time-related utilities with clock abstraction for testability.
//!
//! Timer deadlines are exchanged between clients as UTC epoch milliseconds,
//! so every helper here works in epoch millis and only formats to RFC 3339
//! for display.

use chrono::{DateTime, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_epoch_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to UTC RFC 3339 format
pub fn epoch_millis_to_rfc3339(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    match DateTime::<Utc>::from_timestamp(seconds, nanos) {
        Some(dt) => dt.to_rfc3339(),
        None => format!("<invalid timestamp {timestamp_millis}>"),
    }
}

/// Seconds left until `end_time_millis`, clamped to zero once the deadline
/// has passed. Sub-second remainders round up so a countdown never shows
/// 00:00 while time is still left.
pub fn remaining_seconds(end_time_millis: i64, now_millis: i64) -> i64 {
    let remaining_millis = end_time_millis - now_millis;
    if remaining_millis <= 0 {
        0
    } else {
        (remaining_millis + 999) / 1000
    }
}
