//! Data transfer objects for the JSON API.

use serde::Serialize;

use crate::estimator::{CurrentPosition, StatusError, TripStatus};

/// Trip status as returned by `/api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Train label (e.g. "EC 221")
    pub train_label: String,

    /// Delay in minutes (negative = early)
    pub delay_minutes: i64,

    /// One of `not_departed`, `at_station`, `arrived`
    pub position: &'static str,

    /// Stop id of the last reported station, while en route
    pub current_stop_id: Option<String>,

    pub current_station_name: String,
    pub current_lat: Option<f64>,
    pub current_lon: Option<f64>,

    pub target_station_name: String,
    pub target_lat: Option<f64>,
    pub target_lon: Option<f64>,

    /// Expected arrival as `HH:MM`, or `unknown` / `target not found`
    pub expected_arrival: String,

    /// Clock time of the last report
    pub last_seen_time: Option<String>,

    pub progress_percent: Option<u8>,

    /// When to leave, as `HH:MM` or `unknown`; null when no travel buffer
    /// is configured
    pub leave_at: Option<String>,

    /// Minutes until `leave_at` (negative = overdue)
    pub minutes_until_departure: Option<i64>,

    /// The feed's stop order did not run forward in time
    pub order_anomaly: bool,
}

impl StatusResponse {
    /// Create from an estimated trip status.
    pub fn from_status(status: &TripStatus) -> Self {
        let (position, current_stop_id) = match &status.current_position {
            CurrentPosition::NotDeparted => ("not_departed", None),
            CurrentPosition::AtStation(id) => ("at_station", Some(id.to_string())),
            CurrentPosition::ArrivedAtTarget => ("arrived", None),
        };

        Self {
            train_label: status.train_label.clone(),
            delay_minutes: status.delay_minutes,
            position,
            current_stop_id,
            current_station_name: status.current_station_name.clone(),
            current_lat: status.current_lat,
            current_lon: status.current_lon,
            target_station_name: status.target_station_name.clone(),
            target_lat: status.target_lat,
            target_lon: status.target_lon,
            expected_arrival: status.expected_arrival.to_string(),
            last_seen_time: status.last_seen_time.clone(),
            progress_percent: status.progress_percent,
            leave_at: status.departure_advice.map(|a| a.to_string()),
            minutes_until_departure: status.minutes_until_departure,
            order_anomaly: status.order_anomaly,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Machine-readable kind (`upstream_unavailable`, `no_data_yet`)
    pub kind: &'static str,
}

impl From<&StatusError> for ErrorResponse {
    fn from(e: &StatusError) -> Self {
        Self {
            error: e.to_string(),
            kind: e.kind(),
        }
    }
}
