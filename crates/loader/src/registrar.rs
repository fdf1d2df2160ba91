//! Schema registrar
//!
//! Creates or replaces the catalog table over the written object's location.
//! Applying the same blueprint twice leaves an identical definition.

use contracts::{ContractError, DataCatalog, TableSpec};
use tracing::{info, instrument};

/// Register the table definition in the catalog
#[instrument(name = "register_table", skip(catalog, spec), fields(table = %spec.name))]
pub async fn register_table<C: DataCatalog>(
    catalog: &C,
    database: &str,
    spec: &TableSpec,
) -> Result<(), ContractError> {
    catalog.apply_table(database, spec).await?;
    info!(
        database,
        table = %spec.name,
        columns = spec.columns.len(),
        location = %spec.location,
        "Table registered"
    );
    Ok(())
}
