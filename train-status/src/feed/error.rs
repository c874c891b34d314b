//! Feed client error types.

/// Errors from the stop-history feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status code
    #[error("feed returned status {status}")]
    Status { status: u16 },

    /// Response body was not the expected CSV
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Client configuration produced an unusable request header
    #[error("invalid header {header}: {message}")]
    InvalidHeader {
        header: &'static str,
        message: String,
    },

    /// Local mock data could not be read
    #[error("mock data error: {message}")]
    Mock { message: String },
}

impl FeedError {
    /// Whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FeedError::Http(e) if e.is_timeout())
    }
}
