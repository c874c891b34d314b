//! Application state for the web layer.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::estimator::{Estimator, StatusError, TripStatus};
use crate::feed::{FeedSource, StopHistoryQuery};

/// Shared application state.
///
/// Everything here is immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Where stop histories come from
    pub feed: FeedSource,

    /// Estimator for the configured trip
    pub estimator: Arc<Estimator>,

    /// Page auto-refresh interval in seconds
    pub refresh_secs: u64,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feed: FeedSource, estimator: Estimator, refresh_secs: u64) -> Self {
        Self {
            feed,
            estimator: Arc::new(estimator),
            refresh_secs,
        }
    }

    /// Fetch today's stop history and estimate the trip status as of `now`.
    pub async fn status_at(&self, now: NaiveDateTime) -> Result<TripStatus, StatusError> {
        let trip_pattern = &self.estimator.config().trip_pattern;
        let query = StopHistoryQuery::for_day(trip_pattern.as_str(), now.date());

        let stops = self.feed.stop_history(&query).await.map_err(|e| {
            warn!(
                trip = %trip_pattern,
                timeout = e.is_timeout(),
                error = %e,
                "failed to fetch stop history"
            );
            StatusError::UpstreamUnavailable(e.to_string())
        })?;

        self.estimator.estimate(&stops, now)
    }
}
