//! Query gateway configurator
//!
//! Points the ad-hoc SQL service at the registered database and sets the
//! results output location.

use contracts::{ContractError, QueryGateway};
use tracing::{info, instrument};

/// Configure the query service
#[instrument(name = "configure_query", skip(query))]
pub async fn configure_query<Q: QueryGateway>(
    query: &Q,
    database: &str,
    output_location: &str,
) -> Result<(), ContractError> {
    query.initialize(database, output_location).await?;
    info!(database, output_location, "Query gateway configured");
    Ok(())
}
