//! Trip configuration for the arrival estimator.

use crate::domain::StopId;

/// How trip progress is measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressPolicy {
    /// No progress figure.
    Disabled,

    /// Share of rows that have an actual time, 100 once the target has
    /// been reached.
    StopCount,

    /// Position of the last reported stop between an origin stop and the
    /// target, by row index.
    FromOrigin(StopId),
}

/// Immutable configuration of one tracked trip.
///
/// One value per trip/target pair; several estimators with different
/// configurations can run side by side.
#[derive(Debug, Clone)]
pub struct TripConfig {
    /// Pattern matched against feed trip identifiers (`tripIdLike`).
    pub trip_pattern: String,

    /// Station whose arrival time is predicted.
    pub target_stop_id: StopId,

    /// Label shown for the train, e.g. "EC 221".
    pub train_label: String,

    /// Display name for the target; looked up in the directory when absent.
    pub target_name: Option<String>,

    /// How progress is measured.
    pub progress: ProgressPolicy,

    /// Minutes needed to get from home to the target station.
    /// Enables the "time to leave" countdown.
    pub travel_buffer_mins: Option<u32>,
}

impl TripConfig {
    /// Create a configuration with stop-count progress and no countdown.
    pub fn new(trip_pattern: impl Into<String>, target_stop_id: StopId) -> Self {
        Self {
            trip_pattern: trip_pattern.into(),
            target_stop_id,
            train_label: "Train".to_string(),
            target_name: None,
            progress: ProgressPolicy::StopCount,
            travel_buffer_mins: None,
        }
    }

    /// Set the train label.
    pub fn with_train_label(mut self, label: impl Into<String>) -> Self {
        self.train_label = label.into();
        self
    }

    /// Set the target display name.
    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = Some(name.into());
        self
    }

    /// Measure progress from an origin stop.
    pub fn with_origin(mut self, origin: StopId) -> Self {
        self.progress = ProgressPolicy::FromOrigin(origin);
        self
    }

    /// Set the progress policy.
    pub fn with_progress(mut self, progress: ProgressPolicy) -> Self {
        self.progress = progress;
        self
    }

    /// Enable the "time to leave" countdown.
    pub fn with_travel_buffer(mut self, mins: u32) -> Self {
        self.travel_buffer_mins = Some(mins);
        self
    }
}
