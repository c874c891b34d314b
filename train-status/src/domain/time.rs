//! Feed timestamp handling.
//!
//! The stop-history feed reports times as local naive timestamps in
//! `YYYY-MM-DD HH:MM:SS` form. Callers display only the time of day.

use chrono::{Duration, NaiveDateTime};

/// Timestamp format used by the stop-history feed.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error returned when parsing an invalid feed timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a feed timestamp (`YYYY-MM-DD HH:MM:SS`).
///
/// # Examples
///
/// ```
/// use train_status::domain::parse_feed_timestamp;
///
/// let ts = parse_feed_timestamp("2024-03-01 12:05:00").unwrap();
/// assert_eq!(ts.format("%H:%M").to_string(), "12:05");
///
/// assert!(parse_feed_timestamp("12:05").is_err());
/// assert!(parse_feed_timestamp("2024-13-01 12:05:00").is_err());
/// ```
pub fn parse_feed_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::new("empty"));
    }

    NaiveDateTime::parse_from_str(s, FEED_TIMESTAMP_FORMAT)
        .map_err(|_| TimeError::new("expected YYYY-MM-DD HH:MM:SS"))
}

/// Format a timestamp as `HH:MM`.
pub fn format_hhmm(ts: NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

/// Extract the `HH:MM` part of a raw feed timestamp without validating it.
///
/// The last-seen clock on the status card is taken verbatim from the feed,
/// so a timestamp whose date part is garbled still shows its time.
///
/// ```
/// use train_status::domain::time_of_day_portion;
///
/// assert_eq!(time_of_day_portion("2024-03-01 12:05:33"), Some("12:05".to_string()));
/// assert_eq!(time_of_day_portion("12:05"), None);
/// ```
pub fn time_of_day_portion(raw: &str) -> Option<String> {
    let (_, time) = raw.trim().split_once(' ')?;
    let hhmm: String = time.trim_start().chars().take(5).collect();
    if hhmm.is_empty() { None } else { Some(hhmm) }
}

/// Signed difference `later - earlier` in minutes, rounding half to even.
///
/// ```
/// use train_status::domain::{minutes_between, parse_feed_timestamp};
///
/// let scheduled = parse_feed_timestamp("2024-01-01 10:00:00").unwrap();
/// let actual = parse_feed_timestamp("2024-01-01 10:07:00").unwrap();
/// assert_eq!(minutes_between(scheduled, actual), 7);
/// assert_eq!(minutes_between(actual, scheduled), -7);
/// ```
pub fn minutes_between(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    let secs = later.signed_duration_since(earlier).num_seconds();
    (secs as f64 / 60.0).round_ties_even() as i64
}

/// Shift a timestamp by a signed number of minutes.
///
/// Returns `None` if the result would overflow the representable range.
pub fn shift_minutes(ts: NaiveDateTime, minutes: i64) -> Option<NaiveDateTime> {
    ts.checked_add_signed(Duration::try_minutes(minutes)?)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Shifting by n minutes and measuring the gap returns n
        #[test]
        fn shift_then_measure(n in -10_000i64..10_000) {
            let base = parse_feed_timestamp("2024-06-15 12:00:00").unwrap();
            let shifted = shift_minutes(base, n).unwrap();
            prop_assert_eq!(minutes_between(base, shifted), n);
        }

        /// Any well-formed timestamp parses and formats back to its HH:MM
        #[test]
        fn formatted_time_matches_input(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let raw = format!("2024-06-15 {h:02}:{m:02}:{s:02}");
            let parsed = parse_feed_timestamp(&raw).unwrap();
            prop_assert_eq!(format_hhmm(parsed), format!("{h:02}:{m:02}"));
            prop_assert_eq!(time_of_day_portion(&raw), Some(format!("{h:02}:{m:02}")));
        }
    }
}
