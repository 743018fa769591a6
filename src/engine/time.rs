//! Timestamp parsing and human-relative times.

use chrono::{DateTime, NaiveDateTime, Utc};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (with offset) and naive `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// which is taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Describe how long before `now` the `timestamp` was.
///
/// Minutes below one hour, hours below one day, days beyond that. Counts are
/// floored. A timestamp after `now` is not special-cased and yields a
/// negative minute count.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds();
    let minutes = secs.div_euclid(SECS_PER_MINUTE);
    let hours = secs.div_euclid(SECS_PER_HOUR);

    if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else {
        format!("{} days ago", secs.div_euclid(SECS_PER_DAY))
    }
}

/// Relative time for a raw timestamp string, or `"unknown time"`.
pub fn relative_time_str(timestamp: &str, now: DateTime<Utc>) -> String {
    parse_timestamp(timestamp)
        .map(|ts| relative_time(ts, now))
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Header display form of a package timestamp.
///
/// Unparseable values are shown verbatim.
pub fn display_timestamp(timestamp: &str) -> String {
    if timestamp.trim().is_empty() {
        return "unknown".to_string();
    }
    parse_timestamp(timestamp)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
