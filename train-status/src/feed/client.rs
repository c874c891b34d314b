//! Stop-history HTTP client.
//!
//! Fetches the stop history of a trip from the JrUtil API and converts it
//! into domain records. One request per call: no retries, bounded by the
//! configured timeout.

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::domain::StopRecord;

use super::convert::{convert_rows, parse_stop_history};
use super::error::FeedError;

/// Default base URL for the JrUtil real-time API.
const DEFAULT_BASE_URL: &str = "https://rt.jrutil.konarici.cz";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The feed rejects requests without a browser-like agent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL for the API (defaults to production JrUtil)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl FeedConfig {
    /// Create a config pointing at the production feed.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Which trips and days to ask the feed about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopHistoryQuery {
    /// Pattern matched against trip identifiers (`tripIdLike`)
    pub trip_pattern: String,
    /// First service day (inclusive)
    pub from: NaiveDate,
    /// Last service day (inclusive)
    pub to: NaiveDate,
}

impl StopHistoryQuery {
    /// Query a single service day.
    pub fn for_day(trip_pattern: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            trip_pattern: trip_pattern.into(),
            from: date,
            to: date,
        }
    }

    /// Query string parameters in the order the API documents them.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("tripIdLike", self.trip_pattern.clone()),
            ("fromDate", self.from.format("%Y-%m-%d").to_string()),
            ("toDate", self.to.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// JrUtil stop-history API client.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        let agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| FeedError::InvalidHeader {
                header: "User-Agent",
                message: e.to_string(),
            })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint URL for stop history.
    pub fn stop_history_url(&self) -> String {
        format!("{}/api/stophistory", self.base_url)
    }

    /// Fetch the stop history for a trip.
    ///
    /// Returns the rows in feed order. An empty vector means the trip has
    /// no data yet; a non-success status is an error.
    pub async fn fetch_stop_history(
        &self,
        query: &StopHistoryQuery,
    ) -> Result<Vec<StopRecord>, FeedError> {
        let url = self.stop_history_url();

        let response = self.http.get(&url).query(&query.params()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let rows = parse_stop_history(&body)?;

        debug!(
            trip = %query.trip_pattern,
            rows = rows.len(),
            "fetched stop history"
        );

        Ok(convert_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = FeedConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(3)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn config_defaults() {
        let config = FeedConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn query_params() {
        let query = StopHistoryQuery::for_day("-CZTRAINT-EC-221", date());
        let params = query.params();

        assert_eq!(params[0], ("tripIdLike", "-CZTRAINT-EC-221".to_string()));
        assert_eq!(params[1], ("fromDate", "2024-03-01".to_string()));
        assert_eq!(params[2], ("toDate", "2024-03-01".to_string()));
    }

    #[test]
    fn client_url_strips_trailing_slash() {
        let client =
            FeedClient::new(FeedConfig::new().with_base_url("http://localhost:8080/")).unwrap();
        assert_eq!(
            client.stop_history_url(),
            "http://localhost:8080/api/stophistory"
        );
    }

    #[test]
    fn client_creation() {
        assert!(FeedClient::new(FeedConfig::new()).is_ok());
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let err = FeedClient::new(FeedConfig::new().with_user_agent("bad\nagent")).unwrap_err();
        assert!(matches!(
            err,
            FeedError::InvalidHeader {
                header: "User-Agent",
                ..
            }
        ));
    }

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> FeedClient {
        FeedClient::new(FeedConfig::new().with_base_url(base_url).with_timeout(5)).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_converts_csv() {
        let router = axum::Router::new().route(
            "/api/stophistory",
            axum::routing::get(|| async {
                "stopid,shouldarriveat,arrivedat
33605,2024-03-01 10:00:00,2024-03-01 10:02:00
"
            }),
        );
        let base = serve(router).await;

        let rows = client(&base)
            .fetch_stop_history(&StopHistoryQuery::for_day("-EC-221", date()))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].delay_minutes(), Some(2));
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let router = axum::Router::new().route(
            "/api/stophistory",
            axum::routing::get(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(router).await;

        let err = client(&base)
            .fetch_stop_history(&StopHistoryQuery::for_day("-EC-221", date()))
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::Status { status: 500 }));
    }
}
