//! PlayerSource trait - upstream API interface

use crate::{ContractError, RawPlayer};

/// Upstream player data source trait
///
/// One implementation talks HTTP to the sports API; the mock feeds canned
/// payloads to the pipeline in tests.
#[trait_variant::make(PlayerSource: Send)]
pub trait LocalPlayerSource {
    /// Source name (used for logging)
    fn name(&self) -> &str;

    /// Fetch the full player payload
    ///
    /// # Errors
    /// `ContractError::Upstream` for non-success statuses,
    /// `ContractError::Fetch` for transport/decode failures.
    async fn fetch_players(&self) -> Result<Vec<RawPlayer>, ContractError>;
}
