//! Domain types for the train status service.
//!
//! This module contains the validated value types shared by the feed
//! client, the station directory and the arrival estimator. Identifier
//! types enforce their invariants at construction time; timestamp and
//! coordinate parsers return `None`/`Err` rather than guessing.

mod coordinate;
mod stop;
mod stop_id;
mod time;

pub use coordinate::{Axis, parse_coordinate, parse_latitude, parse_longitude};
pub use stop::{StopRecord, non_blank};
pub use stop_id::{InvalidStopId, StopId};
pub use time::{
    FEED_TIMESTAMP_FORMAT, TimeError, format_hhmm, minutes_between, parse_feed_timestamp,
    shift_minutes, time_of_day_portion,
};
