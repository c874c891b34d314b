//! Delay and arrival estimation.
//!
//! A single pass over the stop history in feed order. The delay is taken
//! from the most recent row that has both an actual and a scheduled time;
//! the expected arrival at the target is its scheduled arrival shifted by
//! the delay known when the target row is reached.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::domain::{StopRecord, parse_feed_timestamp, shift_minutes, time_of_day_portion};
use crate::stations::StationDirectory;

use super::config::TripConfig;
use super::progress::compute_progress;
use super::status::{
    ARRIVED_LABEL, ArrivalEstimate, CurrentPosition, DepartureAdvice, NOT_DEPARTED_LABEL,
    StatusError, TripStatus,
};

/// Arrival estimator for one configured trip.
///
/// Holds only immutable state, so it can be shared freely between
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: Arc<TripConfig>,
    directory: Arc<StationDirectory>,
}

/// State accumulated during the pass.
struct Pass {
    delay_minutes: i64,
    last_seen: Option<usize>,
    last_seen_time: Option<String>,
    target_found: bool,
    expected_arrival: ArrivalEstimate,
    departure_advice: Option<DepartureAdvice>,
}

impl Estimator {
    /// Create an estimator for a trip.
    pub fn new(config: TripConfig, directory: Arc<StationDirectory>) -> Self {
        Self {
            config: Arc::new(config),
            directory,
        }
    }

    /// The trip configuration.
    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    /// The station directory used for names and coordinates.
    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Compute the trip status from its stop history.
    ///
    /// `stops` must be in the order the train calls at them. `now` is the
    /// local wall-clock time used for the departure countdown.
    ///
    /// Returns `StatusError::NoDataYet` for an empty history.
    pub fn estimate(
        &self,
        stops: &[StopRecord],
        now: NaiveDateTime,
    ) -> Result<TripStatus, StatusError> {
        if stops.is_empty() {
            return Err(StatusError::NoDataYet);
        }

        let order_anomaly = !is_in_progression_order(stops);
        if order_anomaly {
            warn!(
                trip = %self.config.trip_pattern,
                "stop history is not in time order; arrival estimate may use the wrong delay"
            );
        }

        let pass = self.scan(stops);
        let target = &self.config.target_stop_id;

        let current_position = match pass.last_seen.and_then(|i| stops[i].stop_id.as_ref()) {
            Some(id) if id == target => CurrentPosition::ArrivedAtTarget,
            Some(id) => CurrentPosition::AtStation(id.clone()),
            None => CurrentPosition::NotDeparted,
        };

        let (current_station_name, (current_lat, current_lon)) = match &current_position {
            CurrentPosition::NotDeparted => (NOT_DEPARTED_LABEL.to_string(), (None, None)),
            CurrentPosition::AtStation(id) => {
                (self.directory.name_of(id), self.directory.coordinates_of(id))
            }
            CurrentPosition::ArrivedAtTarget => (
                ARRIVED_LABEL.to_string(),
                self.directory.coordinates_of(target),
            ),
        };

        let target_station_name = self
            .config
            .target_name
            .clone()
            .unwrap_or_else(|| self.directory.name_of(target));
        let (target_lat, target_lon) = self.directory.coordinates_of(target);

        let expected_arrival = if pass.target_found {
            pass.expected_arrival
        } else {
            ArrivalEstimate::TargetNotFound
        };

        let departure_advice = match (pass.target_found, pass.departure_advice) {
            (true, advice) => advice,
            (false, Some(_)) => Some(DepartureAdvice::Unknown),
            (false, None) => None,
        };
        let minutes_until_departure = departure_advice
            .and_then(|a| a.time())
            .map(|leave_at| leave_at.signed_duration_since(now).num_minutes());

        let progress_percent =
            compute_progress(stops, &self.config.progress, target, pass.last_seen);

        Ok(TripStatus {
            train_label: self.config.train_label.clone(),
            delay_minutes: pass.delay_minutes,
            current_position,
            current_station_name,
            current_lat,
            current_lon,
            target_station_name,
            target_lat,
            target_lon,
            expected_arrival,
            last_seen_time: pass.last_seen_time,
            progress_percent,
            departure_advice,
            minutes_until_departure,
            order_anomaly,
        })
    }

    /// The linear pass over the rows.
    fn scan(&self, stops: &[StopRecord]) -> Pass {
        let target = &self.config.target_stop_id;
        let mut pass = Pass {
            delay_minutes: 0,
            last_seen: None,
            last_seen_time: None,
            target_found: false,
            expected_arrival: ArrivalEstimate::Unknown,
            departure_advice: self
                .config
                .travel_buffer_mins
                .map(|_| DepartureAdvice::Unknown),
        };

        for (idx, stop) in stops.iter().enumerate() {
            if let Some(actual) = stop.actual() {
                pass.last_seen = Some(idx);
                if let Some(hhmm) = time_of_day_portion(actual) {
                    pass.last_seen_time = Some(hhmm);
                }
                if let Some(delay) = stop.delay_minutes() {
                    pass.delay_minutes = delay;
                }
            }

            if stop.is_at(target) {
                pass.target_found = true;
                if let Some(expected) = self.expected_arrival_at(stop, pass.delay_minutes) {
                    pass.expected_arrival = ArrivalEstimate::Expected(expected);
                    pass.departure_advice = self
                        .config
                        .travel_buffer_mins
                        .map(|buffer| match shift_minutes(expected, -i64::from(buffer)) {
                            Some(leave_at) => DepartureAdvice::LeaveAt(leave_at),
                            None => DepartureAdvice::Unknown,
                        });
                }
            }
        }

        pass
    }

    /// Scheduled arrival at the target shifted by the delay so far.
    fn expected_arrival_at(&self, stop: &StopRecord, delay_minutes: i64) -> Option<NaiveDateTime> {
        let scheduled = parse_feed_timestamp(stop.scheduled_arrival.as_deref()?).ok()?;
        shift_minutes(scheduled, delay_minutes)
    }
}

/// Whether the rows' scheduled times never go backwards.
///
/// Rows without a parseable scheduled time are skipped.
pub fn is_in_progression_order(stops: &[StopRecord]) -> bool {
    let mut previous: Option<NaiveDateTime> = None;
    for time in stops.iter().filter_map(StopRecord::scheduled_time) {
        if previous.is_some_and(|p| time < p) {
            return false;
        }
        previous = Some(time);
    }
    true
}
