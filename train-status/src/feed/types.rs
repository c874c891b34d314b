//! Raw CSV row types for the stop-history feed.

use serde::{Deserialize, Serialize};

/// One CSV row of the `/api/stophistory` response.
///
/// Only the columns the estimator needs are declared; any other columns
/// the feed sends are ignored. Every column is optional so a feed that
/// drops one still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StopHistoryRow {
    /// Station identifier, e.g. `-SR70ST-333120`
    #[serde(rename = "stopid", default)]
    pub stop_id: Option<String>,

    /// Scheduled arrival
    #[serde(rename = "shouldarriveat", default)]
    pub should_arrive_at: Option<String>,

    /// Scheduled departure
    #[serde(rename = "shoulddepartat", default)]
    pub should_depart_at: Option<String>,

    /// Actual arrival
    #[serde(rename = "arrivedat", default)]
    pub arrived_at: Option<String>,

    /// Actual departure
    #[serde(rename = "departedat", default)]
    pub departed_at: Option<String>,
}
