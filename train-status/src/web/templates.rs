//! Askama templates for the status card.

use askama::Template;

use crate::estimator::{StatusError, TripStatus};

/// Delays above this many minutes get the warning badge.
const LATE_THRESHOLD_MINS: i64 = 5;

/// The single status page (extends base.html).
///
/// Exactly one of `status` and `error` is set.
#[derive(Template)]
#[template(path = "status.html")]
pub struct StatusTemplate {
    pub title: String,
    pub refresh_secs: u64,
    pub status: Option<StatusView>,
    pub error: Option<ErrorView>,
}

impl StatusTemplate {
    /// Page for a successfully estimated status.
    pub fn ok(status: &TripStatus, refresh_secs: u64) -> Self {
        Self {
            title: status.train_label.clone(),
            refresh_secs,
            status: Some(StatusView::from_status(status)),
            error: None,
        }
    }

    /// Page shown when no status is available.
    pub fn unavailable(train_label: &str, error: &StatusError, refresh_secs: u64) -> Self {
        Self {
            title: train_label.to_string(),
            refresh_secs,
            status: None,
            error: Some(ErrorView::from_error(error)),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Status card view model.
#[derive(Debug, Clone)]
pub struct StatusView {
    pub train_label: String,
    pub delay_minutes: i64,
    pub current_station: String,
    pub target_station: String,
    pub expected_arrival: String,
    pub last_seen_time: Option<String>,
    pub progress_percent: Option<u8>,
    pub leave_at: Option<String>,
    pub minutes_until_departure: Option<i64>,
    pub map_url: Option<String>,
    pub order_anomaly: bool,
}

impl StatusView {
    /// Create from an estimated trip status.
    pub fn from_status(status: &TripStatus) -> Self {
        let map_url = match (status.current_lat, status.current_lon) {
            (Some(lat), Some(lon)) => Some(map_link(lat, lon)),
            _ => None,
        };

        Self {
            train_label: status.train_label.clone(),
            delay_minutes: status.delay_minutes,
            current_station: status.current_station_name.clone(),
            target_station: status.target_station_name.clone(),
            expected_arrival: status.expected_arrival.to_string(),
            last_seen_time: status.last_seen_time.clone(),
            progress_percent: status.progress_percent,
            leave_at: status.departure_advice.map(|a| a.to_string()),
            minutes_until_departure: status.minutes_until_departure,
            map_url,
            order_anomaly: status.order_anomaly,
        }
    }

    /// CSS class of the delay badge.
    pub fn badge_class(&self) -> &'static str {
        if self.delay_minutes > LATE_THRESHOLD_MINS {
            "badge late"
        } else {
            "badge ok"
        }
    }

    /// Delay badge text; early running counts as on time.
    pub fn delay_text(&self) -> String {
        if self.delay_minutes <= 0 {
            "On time".to_string()
        } else {
            format!("Delay {} min", self.delay_minutes)
        }
    }

    /// Countdown line under the departure advice.
    pub fn countdown_text(&self) -> Option<String> {
        let mins = self.minutes_until_departure?;
        Some(match mins {
            m if m > 0 => format!("in {m} min"),
            0 => "now".to_string(),
            m => format!("{} min ago", -m),
        })
    }
}

/// Error card view model.
///
/// Every error reads the same to the user; the kind only goes into the
/// page source for debugging.
#[derive(Debug, Clone)]
pub struct ErrorView {
    pub kind: &'static str,
    pub headline: &'static str,
    pub message: &'static str,
}

impl ErrorView {
    pub fn from_error(error: &StatusError) -> Self {
        Self {
            kind: error.kind(),
            headline: "Data not ready yet",
            message: "The train has not departed yet, or live data is not available right now.",
        }
    }
}

/// OpenStreetMap link centred on a coordinate.
fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lon:.5}#map=13/{lat:.5}/{lon:.5}")
}
