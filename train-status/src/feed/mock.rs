//! Mock feed for running without network access.
//!
//! Loads a stop-history CSV file once and serves it as if it were the live
//! response for every query.

use std::path::Path;
use std::sync::Arc;

use crate::domain::StopRecord;

use super::convert::{convert_rows, parse_stop_history};
use super::error::FeedError;

/// Mock feed that serves a fixed stop history.
///
/// This is useful for development and for demos of a trip that is not
/// running today.
#[derive(Debug, Clone)]
pub struct MockFeed {
    records: Arc<Vec<StopRecord>>,
}

impl MockFeed {
    /// Load the stop history from a CSV file in the feed's format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| FeedError::Mock {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_csv(&body)
    }

    /// Build a mock from an in-memory CSV body.
    pub fn from_csv(body: &str) -> Result<Self, FeedError> {
        let rows = parse_stop_history(body)?;
        Ok(Self::from_records(convert_rows(rows)))
    }

    /// Build a mock from ready-made records.
    pub fn from_records(records: Vec<StopRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// The stop history, regardless of the query.
    pub fn stop_history(&self) -> Arc<Vec<StopRecord>> {
        Arc::clone(&self.records)
    }

    /// Number of rows served.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the mock serves an empty history.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
