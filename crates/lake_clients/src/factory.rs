//! ServiceSet - bundles the provisioning-side service clients

#[cfg(feature = "aws")]
use crate::aws::{AwsCatalog, AwsObjectStore, AwsQueryGateway};
use contracts::{DataCatalog, ObjectStore, QueryGateway};

use crate::memory::{MemoryCatalog, MemoryObjectStore, MemoryQueryGateway};

/// The three provisioning-side clients the pipeline drives.
///
/// The event sink is intentionally not part of the set; it is owned by the
/// activity logger and survives the run even when a step fails.
pub struct ServiceSet<S, C, Q>
where
    S: ObjectStore,
    C: DataCatalog,
    Q: QueryGateway,
{
    pub store: S,
    pub catalog: C,
    pub query: Q,
}

impl ServiceSet<MemoryObjectStore, MemoryCatalog, MemoryQueryGateway> {
    /// In-memory set for tests and mock mode
    pub fn memory() -> Self {
        Self {
            store: MemoryObjectStore::new(),
            catalog: MemoryCatalog::new(),
            query: MemoryQueryGateway::new(),
        }
    }
}

#[cfg(feature = "aws")]
impl ServiceSet<AwsObjectStore, AwsCatalog, AwsQueryGateway> {
    /// AWS-backed set over a shared SDK config
    pub fn aws(config: &aws_config::SdkConfig, region: &str) -> Self {
        Self {
            store: AwsObjectStore::new(config, region),
            catalog: AwsCatalog::new(config),
            query: AwsQueryGateway::new(config),
        }
    }
}
