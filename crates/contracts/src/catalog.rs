//! DataCatalog trait - metadata registry interface

use crate::{ContractError, TableSpec};

/// Metadata catalog trait
#[trait_variant::make(DataCatalog: Send)]
pub trait LocalDataCatalog {
    /// Create the database
    ///
    /// # Errors
    /// Returns `ContractError::AlreadyExists` when the database is already
    /// present; callers performing create-if-absent ignore that case.
    async fn create_database(
        &self,
        database: &str,
        description: Option<&str>,
    ) -> Result<(), ContractError>;

    /// Create or replace a table definition
    ///
    /// Applying the same spec twice must leave an identical definition.
    async fn apply_table(&self, database: &str, spec: &TableSpec) -> Result<(), ContractError>;

    /// Fetch a registered table definition, `None` if absent
    async fn get_table(
        &self,
        database: &str,
        table: &str,
    ) -> Result<Option<TableSpec>, ContractError>;
}
