//! Resource provisioner
//!
//! Create-if-absent semantics for the bucket and the catalog database.
//! `AlreadyExists` is the only tolerated failure; everything else aborts.

use contracts::{ContractError, DataCatalog, LakeBlueprint, ObjectStore};
use tracing::{debug, info, instrument};

/// What the provisioning step actually created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub bucket_created: bool,
    pub database_created: bool,
}

/// Ensure the bucket exists, returns true when it was created
#[instrument(name = "ensure_bucket", skip(store))]
pub async fn ensure_bucket<S: ObjectStore>(store: &S, bucket: &str) -> Result<bool, ContractError> {
    match store.create_bucket(bucket).await {
        Ok(()) => {
            info!(bucket, "Bucket created");
            Ok(true)
        }
        Err(err) if err.is_already_exists() => {
            debug!(bucket, "Bucket already exists");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Ensure the database exists, returns true when it was created
#[instrument(name = "ensure_database", skip(catalog, description))]
pub async fn ensure_database<C: DataCatalog>(
    catalog: &C,
    database: &str,
    description: Option<&str>,
) -> Result<bool, ContractError> {
    match catalog.create_database(database, description).await {
        Ok(()) => {
            info!(database, "Database created");
            Ok(true)
        }
        Err(err) if err.is_already_exists() => {
            debug!(database, "Database already exists");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Ensure bucket then database, in that order
pub async fn provision<S, C>(
    store: &S,
    catalog: &C,
    blueprint: &LakeBlueprint,
) -> Result<ProvisionOutcome, ContractError>
where
    S: ObjectStore,
    C: DataCatalog,
{
    let bucket_created = ensure_bucket(store, &blueprint.lake.bucket).await?;
    let database_created = ensure_database(
        catalog,
        &blueprint.catalog.database,
        blueprint.catalog.description.as_deref(),
    )
    .await?;

    Ok(ProvisionOutcome {
        bucket_created,
        database_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lake_clients::{MemoryCatalog, MemoryObjectStore};

    #[tokio::test]
    async fn test_ensure_bucket_creates_once() {
        let store = MemoryObjectStore::new();
        assert!(ensure_bucket(&store, "lake").await.unwrap());
        assert!(!ensure_bucket(&store, "lake").await.unwrap());
        assert_eq!(store.create_successes(), 1);
    }

    #[tokio::test]
    async fn test_ensure_bucket_with_preexisting() {
        let store = MemoryObjectStore::with_bucket("lake");
        assert!(!ensure_bucket(&store, "lake").await.unwrap());
        assert_eq!(store.create_successes(), 0);
    }

    #[tokio::test]
    async fn test_ensure_bucket_surfaces_real_failures() {
        let store = MemoryObjectStore::failing(true, false);
        let result = ensure_bucket(&store, "lake").await;
        assert!(matches!(result, Err(ContractError::Store { .. })));
    }

    #[tokio::test]
    async fn test_ensure_database_idempotent() {
        let catalog = MemoryCatalog::new();
        assert!(ensure_database(&catalog, "nba", Some("analytics lake"))
            .await
            .unwrap());
        assert!(!ensure_database(&catalog, "nba", Some("analytics lake"))
            .await
            .unwrap());
        assert!(catalog.database_exists("nba"));
    }
}
