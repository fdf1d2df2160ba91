//! Record normalizer
//!
//! Projects the upstream payload onto the uniform record shape. Pure field
//! mapping; zero records in means zero records out, never an error.

use contracts::{PlayerRecord, RawPlayer};
use metrics::counter;
use tracing::debug;

/// Normalize the raw payload into lake records
pub fn normalize(raw: Vec<RawPlayer>) -> Vec<PlayerRecord> {
    let records: Vec<PlayerRecord> = raw.into_iter().map(PlayerRecord::from).collect();
    counter!("nba_lake_records_normalized_total").increment(records.len() as u64);
    debug!(records = records.len(), "Normalized player payload");
    records
}
