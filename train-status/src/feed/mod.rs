//! JrUtil stop-history feed client.
//!
//! This module provides an HTTP client for the public JrUtil real-time
//! endpoint, which reports the stop history of trips matching a trip
//! identifier pattern.
//!
//! Key characteristics of the feed:
//! - Responses are CSV with a header row, one row per scheduled stop
//! - Times are local naive timestamps (`YYYY-MM-DD HH:MM:SS`)
//! - A trip that has not started yet and an unknown trip both come back
//!   as an empty body, so "no rows" cannot be told apart from "not yet"

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{FeedClient, FeedConfig, StopHistoryQuery};
pub use convert::{convert_rows, parse_stop_history};
pub use error::FeedError;
pub use mock::MockFeed;
pub use source::FeedSource;
pub use types::StopHistoryRow;
