//! Stop-history records.
//!
//! A `StopRecord` is one scheduled stop of a trip as reported by the feed,
//! with scheduled and (once passed) actual times. Times are kept as the raw
//! feed strings: parsing happens at the point of use so that one malformed
//! field never discards the rest of the row.

use chrono::NaiveDateTime;

use super::{StopId, parse_feed_timestamp};

/// One row of a trip's stop history.
///
/// Empty cells are normalized to `None` when the record is built, so a
/// present value is always non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopRecord {
    /// Station identifier
    pub stop_id: Option<StopId>,
    /// Scheduled arrival (raw feed timestamp)
    pub scheduled_arrival: Option<String>,
    /// Scheduled departure (raw feed timestamp)
    pub scheduled_departure: Option<String>,
    /// Actual arrival (raw feed timestamp)
    pub actual_arrival: Option<String>,
    /// Actual departure (raw feed timestamp)
    pub actual_departure: Option<String>,
}

impl StopRecord {
    /// Create an empty record for a station.
    pub fn new(stop_id: StopId) -> Self {
        Self {
            stop_id: Some(stop_id),
            ..Self::default()
        }
    }

    /// Set the scheduled arrival.
    pub fn with_scheduled_arrival(mut self, ts: impl Into<String>) -> Self {
        self.scheduled_arrival = non_blank(ts.into());
        self
    }

    /// Set the scheduled departure.
    pub fn with_scheduled_departure(mut self, ts: impl Into<String>) -> Self {
        self.scheduled_departure = non_blank(ts.into());
        self
    }

    /// Set the actual arrival.
    pub fn with_actual_arrival(mut self, ts: impl Into<String>) -> Self {
        self.actual_arrival = non_blank(ts.into());
        self
    }

    /// Set the actual departure.
    pub fn with_actual_departure(mut self, ts: impl Into<String>) -> Self {
        self.actual_departure = non_blank(ts.into());
        self
    }

    /// The actual time, preferring arrival over departure.
    pub fn actual(&self) -> Option<&str> {
        self.actual_arrival
            .as_deref()
            .or(self.actual_departure.as_deref())
    }

    /// The scheduled time, preferring arrival over departure.
    pub fn scheduled(&self) -> Option<&str> {
        self.scheduled_arrival
            .as_deref()
            .or(self.scheduled_departure.as_deref())
    }

    /// Whether the train has been reported at this stop.
    pub fn has_actual(&self) -> bool {
        self.actual().is_some()
    }

    /// Whether this record is for the given station.
    pub fn is_at(&self, stop: &StopId) -> bool {
        self.stop_id.as_ref() == Some(stop)
    }

    /// Delay in minutes at this stop, if both times are present and valid.
    pub fn delay_minutes(&self) -> Option<i64> {
        let actual = parse_feed_timestamp(self.actual()?).ok()?;
        let scheduled = parse_feed_timestamp(self.scheduled()?).ok()?;
        Some(super::minutes_between(scheduled, actual))
    }

    /// Scheduled time parsed, preferring arrival over departure.
    ///
    /// Used to check that the sequence runs forward in time.
    pub fn scheduled_time(&self) -> Option<NaiveDateTime> {
        self.scheduled_arrival
            .as_deref()
            .and_then(|raw| parse_feed_timestamp(raw).ok())
            .or_else(|| {
                self.scheduled_departure
                    .as_deref()
                    .and_then(|raw| parse_feed_timestamp(raw).ok())
            })
    }
}

/// Normalize a raw cell: trim, and treat blank as absent.
pub fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str) -> StopRecord {
        StopRecord::new(StopId::parse(id).unwrap())
    }

    #[test]
    fn actual_prefers_arrival() {
        let r = stop("1")
            .with_actual_arrival("2024-01-01 10:00:00")
            .with_actual_departure("2024-01-01 10:02:00");
        assert_eq!(r.actual(), Some("2024-01-01 10:00:00"));

        let r = stop("1").with_actual_departure("2024-01-01 10:02:00");
        assert_eq!(r.actual(), Some("2024-01-01 10:02:00"));
    }

    #[test]
    fn scheduled_prefers_arrival() {
        let r = stop("1")
            .with_scheduled_arrival("2024-01-01 10:00:00")
            .with_scheduled_departure("2024-01-01 10:01:00");
        assert_eq!(r.scheduled(), Some("2024-01-01 10:00:00"));

        let r = stop("1").with_scheduled_departure("2024-01-01 10:01:00");
        assert_eq!(r.scheduled(), Some("2024-01-01 10:01:00"));
    }

    #[test]
    fn blank_cells_are_absent() {
        let r = stop("1")
            .with_actual_arrival("   ")
            .with_actual_departure("2024-01-01 10:02:00");
        assert_eq!(r.actual_arrival, None);
        assert_eq!(r.actual(), Some("2024-01-01 10:02:00"));
        assert!(r.has_actual());

        let r = stop("1").with_actual_arrival("");
        assert!(!r.has_actual());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(" a ".to_string()), Some("a".to_string()));
        assert_eq!(non_blank("a".to_string()), Some("a".to_string()));
        assert_eq!(non_blank(" \t".to_string()), None);
    }

    #[test]
    fn delay_minutes_requires_both_times() {
        let r = stop("1").with_actual_arrival("2024-01-01 10:07:00");
        assert_eq!(r.delay_minutes(), None);

        let r = r.with_scheduled_arrival("2024-01-01 10:00:00");
        assert_eq!(r.delay_minutes(), Some(7));

        let r = stop("1")
            .with_actual_arrival("2024-01-01 10:07:00")
            .with_scheduled_arrival("not a time");
        assert_eq!(r.delay_minutes(), None);
    }

    #[test]
    fn is_at_compares_ids() {
        let r = stop("-SR70ST-333120");
        assert!(r.is_at(&StopId::parse("-SR70ST-333120").unwrap()));
        assert!(!r.is_at(&StopId::parse("333120").unwrap()));
        assert!(!StopRecord::default().is_at(&StopId::parse("1").unwrap()));
    }

    #[test]
    fn scheduled_time_skips_garbage() {
        let r = stop("1")
            .with_scheduled_arrival("garbage")
            .with_scheduled_departure("2024-01-01 10:01:00")
            .with_actual_departure("2024-01-01 09:58:00");
        assert_eq!(
            r.scheduled_time(),
            Some(parse_feed_timestamp("2024-01-01 10:01:00").unwrap())
        );
        assert_eq!(stop("1").scheduled_time(), None);
    }
}
