//! Where the status handler gets its stop history from.

use std::sync::Arc;

use crate::cache::CachedFeedClient;
use crate::domain::StopRecord;

use super::client::StopHistoryQuery;
use super::error::FeedError;
use super::mock::MockFeed;

/// Source of stop-history rows: the live feed or a local mock file.
#[derive(Clone)]
pub enum FeedSource {
    /// Live JrUtil feed, optionally cached
    Live(Arc<CachedFeedClient>),
    /// Fixed rows loaded at startup
    Mock(MockFeed),
}

impl FeedSource {
    /// Fetch the stop history matching a query.
    pub async fn stop_history(
        &self,
        query: &StopHistoryQuery,
    ) -> Result<Arc<Vec<StopRecord>>, FeedError> {
        match self {
            FeedSource::Live(client) => client.fetch_stop_history(query).await,
            FeedSource::Mock(mock) => Ok(mock.stop_history()),
        }
    }

    /// Short description for startup logging.
    pub fn describe(&self) -> &'static str {
        match self {
            FeedSource::Live(client) if client.is_caching() => "live feed (cached)",
            FeedSource::Live(_) => "live feed",
            FeedSource::Mock(_) => "mock file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn mock_source_ignores_query() {
        let mock = MockFeed::from_csv(
            "stopid,arrivedat\n33605,2024-03-01 10:00:00\n",
        )
        .unwrap();
        let source = FeedSource::Mock(mock);

        let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let rows = source
            .stop_history(&StopHistoryQuery::for_day("anything", date))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(source.describe(), "mock file");
    }
}
