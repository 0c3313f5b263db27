//! Time helpers
//!
//! Date-to-timestamp conversion happens at the query boundary;
//! repositories only see `i64` Unix millis.

use chrono::NaiveDate;

/// Start of day (00:00:00 UTC) as Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Exclusive end of day: next day 00:00:00 UTC as Unix millis
///
/// Callers use `< end` semantics.
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next = date.succ_opt().unwrap_or(date);
    day_start_millis(next)
}
