//! Estimator output types.

use std::fmt;

use chrono::NaiveDateTime;

use crate::domain::{StopId, format_hhmm};

/// Shown while the train has not been reported anywhere yet.
pub const NOT_DEPARTED_LABEL: &str = "At the start";

/// Shown once the train has been reported at the target.
pub const ARRIVED_LABEL: &str = "Arrived at destination";

/// Why no status could be produced.
///
/// Both variants mean "data not ready" to the user and are displayed the
/// same way; they stay distinct for logging and for the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// The feed could not be reached or answered with an error status
    #[error("train data unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The feed answered but had no rows for the trip
    #[error("no data yet: the train has not departed or is not running today")]
    NoDataYet,
}

impl StatusError {
    /// Stable machine-readable kind for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            StatusError::UpstreamUnavailable(_) => "upstream_unavailable",
            StatusError::NoDataYet => "no_data_yet",
        }
    }
}

/// Predicted arrival at the target station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalEstimate {
    /// Scheduled arrival shifted by the current delay
    Expected(NaiveDateTime),

    /// The target is on the trip but has no usable scheduled arrival
    Unknown,

    /// The target never appeared in the stop history
    TargetNotFound,
}

impl ArrivalEstimate {
    /// The predicted time, if there is one.
    pub fn time(&self) -> Option<NaiveDateTime> {
        match self {
            ArrivalEstimate::Expected(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for ArrivalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalEstimate::Expected(t) => f.write_str(&format_hhmm(*t)),
            ArrivalEstimate::Unknown => f.write_str("unknown"),
            ArrivalEstimate::TargetNotFound => f.write_str("target not found"),
        }
    }
}

/// When to set off for the target station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureAdvice {
    /// Expected arrival minus the travel buffer
    LeaveAt(NaiveDateTime),

    /// No expected arrival to count back from
    Unknown,
}

impl DepartureAdvice {
    /// The advised time, if there is one.
    pub fn time(&self) -> Option<NaiveDateTime> {
        match self {
            DepartureAdvice::LeaveAt(t) => Some(*t),
            DepartureAdvice::Unknown => None,
        }
    }
}

impl fmt::Display for DepartureAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartureAdvice::LeaveAt(t) => f.write_str(&format_hhmm(*t)),
            DepartureAdvice::Unknown => f.write_str("unknown"),
        }
    }
}

/// Where the train was last reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentPosition {
    /// No stop has an actual time yet
    NotDeparted,

    /// Last reported at this station
    AtStation(StopId),

    /// Last reported at the target station
    ArrivedAtTarget,
}

/// Status summary of one trip, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TripStatus {
    /// Train label from the configuration
    pub train_label: String,

    /// Delay in minutes (negative = early)
    pub delay_minutes: i64,

    /// Last reported position
    pub current_position: CurrentPosition,

    /// Display name of the last reported position
    pub current_station_name: String,

    /// Latitude of the last reported station
    pub current_lat: Option<f64>,

    /// Longitude of the last reported station
    pub current_lon: Option<f64>,

    /// Display name of the target station
    pub target_station_name: String,

    /// Latitude of the target station
    pub target_lat: Option<f64>,

    /// Longitude of the target station
    pub target_lon: Option<f64>,

    /// Predicted arrival at the target
    pub expected_arrival: ArrivalEstimate,

    /// Clock time (`HH:MM`) of the last report
    pub last_seen_time: Option<String>,

    /// Trip progress, 0 to 100
    pub progress_percent: Option<u8>,

    /// When to leave; present only when a travel buffer is configured
    pub departure_advice: Option<DepartureAdvice>,

    /// Whole minutes from now until `departure_advice` (negative = overdue)
    pub minutes_until_departure: Option<i64>,

    /// The stop history did not run forward in time
    pub order_anomaly: bool,
}

impl TripStatus {
    /// Whether the train is running late.
    pub fn is_delayed(&self) -> bool {
        self.delay_minutes > 0
    }

    /// Whether the train has reached the target.
    pub fn has_arrived(&self) -> bool {
        self.current_position == CurrentPosition::ArrivedAtTarget
    }
}
