//! QueryGateway trait - ad-hoc SQL service interface

use crate::ContractError;

/// Ad-hoc SQL query service trait
#[trait_variant::make(QueryGateway: Send)]
pub trait LocalQueryGateway {
    /// Point the query service at the registered database and set the
    /// results output location
    async fn initialize(&self, database: &str, output_location: &str)
        -> Result<(), ContractError>;
}
