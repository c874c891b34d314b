//! Conversion from feed CSV to domain stop records.

use tracing::debug;

use crate::domain::{StopId, StopRecord, non_blank};

use super::error::FeedError;
use super::types::StopHistoryRow;

/// Decode a stop-history CSV body into raw rows.
///
/// An empty body, or one with only a header row, decodes to no rows.
pub fn parse_stop_history(body: &str) -> Result<Vec<StopHistoryRow>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize::<StopHistoryRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

/// Convert raw rows into stop records, keeping feed order.
///
/// Rows are never dropped: a row whose stop identifier is blank keeps its
/// times and counts towards progress, it just cannot match a station.
pub fn convert_rows(rows: Vec<StopHistoryRow>) -> Vec<StopRecord> {
    rows.into_iter().map(convert_row).collect()
}

fn convert_row(row: StopHistoryRow) -> StopRecord {
    let stop_id = row
        .stop_id
        .as_deref()
        .and_then(|raw| match StopId::parse(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(raw, error = %e, "row without usable stop id");
                None
            }
        });

    StopRecord {
        stop_id,
        scheduled_arrival: row.should_arrive_at.and_then(non_blank),
        scheduled_departure: row.should_depart_at.and_then(non_blank),
        actual_arrival: row.arrived_at.and_then(non_blank),
        actual_departure: row.departed_at.and_then(non_blank),
    }
}
