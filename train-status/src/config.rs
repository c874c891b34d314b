//! Process configuration from environment variables.
//!
//! Everything the server needs is read once at startup into an immutable
//! `AppConfig`. `main` loads a `.env` file, if present, before reading.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::CacheConfig;
use crate::domain::StopId;
use crate::estimator::{ProgressPolicy, TripConfig};
use crate::feed::FeedConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default page auto-refresh interval in seconds.
const DEFAULT_REFRESH_SECS: u64 = 60;

/// Errors in the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set to something unusable
    #[error("{name}={value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The tracked trip
    pub trip: TripConfig,
    /// Station table file, if any
    pub stations_file: Option<PathBuf>,
    /// Live feed client settings
    pub feed: FeedConfig,
    /// Serve this CSV file instead of the live feed
    pub mock_file: Option<PathBuf>,
    /// Feed response cache
    pub cache: CacheConfig,
    /// Page auto-refresh interval
    pub refresh_secs: u64,
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let trip_pattern = var("TRIP_ID_LIKE").ok_or(ConfigError::Missing("TRIP_ID_LIKE"))?;
        let target = var("TARGET_STOP_ID").ok_or(ConfigError::Missing("TARGET_STOP_ID"))?;
        let target = parse_stop_id("TARGET_STOP_ID", &target)?;

        let mut trip = TripConfig::new(trip_pattern.trim(), target);

        if let Some(label) = var("TRAIN_LABEL") {
            trip = trip.with_train_label(label.trim());
        }
        if let Some(name) = var("TARGET_NAME") {
            trip = trip.with_target_name(name.trim());
        }
        if let Some(mins) = var("TRAVEL_BUFFER_MINS") {
            trip = trip.with_travel_buffer(parse_number("TRAVEL_BUFFER_MINS", &mins)?);
        }

        let progress_off = var("PROGRESS").is_some_and(|v| v.trim().eq_ignore_ascii_case("off"));
        trip = match (progress_off, var("ORIGIN_STOP_ID")) {
            (true, _) => trip.with_progress(ProgressPolicy::Disabled),
            (false, Some(origin)) => trip.with_origin(parse_stop_id("ORIGIN_STOP_ID", &origin)?),
            (false, None) => trip,
        };

        let mut feed = FeedConfig::new();
        if let Some(url) = var("FEED_BASE_URL") {
            feed = feed.with_base_url(url.trim());
        }
        if let Some(secs) = var("FEED_TIMEOUT_SECS") {
            feed = feed.with_timeout(parse_number("FEED_TIMEOUT_SECS", &secs)?);
        }

        let cache_secs = match var("FEED_CACHE_SECS") {
            Some(secs) => parse_number("FEED_CACHE_SECS", &secs)?,
            None => 0,
        };

        let refresh_secs = match var("REFRESH_SECS") {
            Some(secs) => parse_number("REFRESH_SECS", &secs)?,
            None => DEFAULT_REFRESH_SECS,
        };

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = parse_number("BIND_ADDR", &bind_addr)?;

        Ok(Self {
            trip,
            stations_file: var("STATIONS_FILE").map(PathBuf::from),
            feed,
            mock_file: var("FEED_MOCK_FILE").map(PathBuf::from),
            cache: CacheConfig::default().with_ttl_secs(cache_secs),
            refresh_secs,
            bind_addr,
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        })
    }
}

fn parse_stop_id(name: &'static str, value: &str) -> Result<StopId, ConfigError> {
    StopId::parse(value).map_err(|e| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_number<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
