//! Arrival estimation for one train trip.
//!
//! This module implements the core computation that answers: "where is my
//! train, how late is it, and when will it reach my station?"
//!
//! The estimator makes a single pass over the trip's stop history in feed
//! order, which is assumed to be the order the train calls at stations.

mod config;
mod estimate;
mod progress;
mod status;

pub use config::{ProgressPolicy, TripConfig};
pub use estimate::{Estimator, is_in_progression_order};
pub use progress::compute_progress;
pub use status::{ArrivalEstimate, CurrentPosition, DepartureAdvice, StatusError, TripStatus};
