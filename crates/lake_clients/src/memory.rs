//! In-memory service clients
//!
//! Mock implementations for unit tests and mock mode, supporting failure
//! injection. Clients are cheap to clone; clones share state so tests can keep
//! a handle for inspection while the pipeline owns another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use contracts::{
    ContractError, DataCatalog, EventSink, ObjectStore, PipelineEvent, QueryGateway, TableSpec,
};
use tracing::instrument;

// ===== Object store =====

#[derive(Debug, Default)]
struct StoreState {
    buckets: HashMap<String, HashMap<String, Bytes>>,
    create_attempts: u64,
    create_successes: u64,
}

/// In-memory object store
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    state: Arc<Mutex<StoreState>>,
    fail_create: bool,
    fail_put: bool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a pre-existing bucket (triggers the already-exists path)
    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .state
            .lock()
            .unwrap()
            .buckets
            .insert(bucket.into(), HashMap::new());
        store
    }

    /// Store with injected failures
    pub fn failing(fail_create: bool, fail_put: bool) -> Self {
        Self {
            fail_create,
            fail_put,
            ..Self::default()
        }
    }

    pub fn bucket_exists(&self, bucket: &str) -> bool {
        self.state.lock().unwrap().buckets.contains_key(bucket)
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.state
            .lock()
            .unwrap()
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    pub fn object_count(&self, bucket: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .buckets
            .get(bucket)
            .map_or(0, HashMap::len)
    }

    /// Total create_bucket calls seen
    pub fn create_attempts(&self) -> u64 {
        self.state.lock().unwrap().create_attempts
    }

    /// create_bucket calls that actually created the bucket
    pub fn create_successes(&self) -> u64 {
        self.state.lock().unwrap().create_successes
    }
}

impl ObjectStore for MemoryObjectStore {
    #[instrument(name = "memory_create_bucket", skip(self))]
    async fn create_bucket(&self, bucket: &str) -> Result<(), ContractError> {
        if self.fail_create {
            return Err(ContractError::store("create_bucket", "injected failure"));
        }
        let mut state = self.state.lock().unwrap();
        state.create_attempts += 1;
        if state.buckets.contains_key(bucket) {
            return Err(ContractError::already_exists(format!("bucket '{bucket}'")));
        }
        state.buckets.insert(bucket.to_string(), HashMap::new());
        state.create_successes += 1;
        Ok(())
    }

    #[instrument(name = "memory_put_object", skip(self, body), fields(len = body.len()))]
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), ContractError> {
        if self.fail_put {
            return Err(ContractError::store("put_object", "injected failure"));
        }
        let mut state = self.state.lock().unwrap();
        let objects = state
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| ContractError::store("put_object", format!("no such bucket: {bucket}")))?;
        objects.insert(key.to_string(), body);
        Ok(())
    }

    #[instrument(name = "memory_get_object", skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, ContractError> {
        self.object(bucket, key)
            .ok_or_else(|| ContractError::store("get_object", format!("no such key: {key}")))
    }
}

// ===== Catalog =====

#[derive(Debug, Default)]
struct CatalogState {
    databases: HashMap<String, Option<String>>,
    tables: HashMap<(String, String), TableSpec>,
    apply_calls: u64,
}

/// In-memory metadata catalog
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
    fail_create: bool,
    fail_apply: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with a pre-existing database
    pub fn with_database(database: impl Into<String>) -> Self {
        let catalog = Self::new();
        catalog
            .state
            .lock()
            .unwrap()
            .databases
            .insert(database.into(), None);
        catalog
    }

    /// Catalog with injected failures
    pub fn failing(fail_create: bool, fail_apply: bool) -> Self {
        Self {
            fail_create,
            fail_apply,
            ..Self::default()
        }
    }

    pub fn database_exists(&self, database: &str) -> bool {
        self.state.lock().unwrap().databases.contains_key(database)
    }

    pub fn table(&self, database: &str, table: &str) -> Option<TableSpec> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(&(database.to_string(), table.to_string()))
            .cloned()
    }

    pub fn apply_calls(&self) -> u64 {
        self.state.lock().unwrap().apply_calls
    }
}

impl DataCatalog for MemoryCatalog {
    #[instrument(name = "memory_create_database", skip(self, description))]
    async fn create_database(
        &self,
        database: &str,
        description: Option<&str>,
    ) -> Result<(), ContractError> {
        if self.fail_create {
            return Err(ContractError::catalog("create_database", "injected failure"));
        }
        let mut state = self.state.lock().unwrap();
        if state.databases.contains_key(database) {
            return Err(ContractError::already_exists(format!(
                "database '{database}'"
            )));
        }
        state
            .databases
            .insert(database.to_string(), description.map(String::from));
        Ok(())
    }

    #[instrument(name = "memory_apply_table", skip(self, spec), fields(table = %spec.name))]
    async fn apply_table(&self, database: &str, spec: &TableSpec) -> Result<(), ContractError> {
        if self.fail_apply {
            return Err(ContractError::catalog("apply_table", "injected failure"));
        }
        let mut state = self.state.lock().unwrap();
        if !state.databases.contains_key(database) {
            return Err(ContractError::catalog(
                "apply_table",
                format!("no such database: {database}"),
            ));
        }
        state.apply_calls += 1;
        state
            .tables
            .insert((database.to_string(), spec.name.clone()), spec.clone());
        Ok(())
    }

    #[instrument(name = "memory_get_table", skip(self))]
    async fn get_table(
        &self,
        database: &str,
        table: &str,
    ) -> Result<Option<TableSpec>, ContractError> {
        Ok(self.table(database, table))
    }
}

// ===== Query gateway =====

#[derive(Debug, Default)]
struct QueryState {
    initialized: Option<(String, String)>,
    calls: u64,
}

/// In-memory query gateway
#[derive(Clone, Default)]
pub struct MemoryQueryGateway {
    state: Arc<Mutex<QueryState>>,
    fail: bool,
}

impl MemoryQueryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Last (database, output_location) the gateway was pointed at
    pub fn last_initialize(&self) -> Option<(String, String)> {
        self.state.lock().unwrap().initialized.clone()
    }

    pub fn initialize_calls(&self) -> u64 {
        self.state.lock().unwrap().calls
    }
}

impl QueryGateway for MemoryQueryGateway {
    #[instrument(name = "memory_query_initialize", skip(self))]
    async fn initialize(
        &self,
        database: &str,
        output_location: &str,
    ) -> Result<(), ContractError> {
        if self.fail {
            return Err(ContractError::query("injected failure"));
        }
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state.initialized = Some((database.to_string(), output_location.to_string()));
        Ok(())
    }
}

// ===== Event sink =====

/// In-memory event sink
#[derive(Clone)]
pub struct MemoryEventSink {
    name: String,
    events: Arc<Mutex<Vec<PipelineEvent>>>,
    fail: bool,
}

impl Default for MemoryEventSink {
    fn default() -> Self {
        Self::new("memory_events")
    }
}

impl MemoryEventSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// Snapshot of emitted events
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for MemoryEventSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn emit(&mut self, event: PipelineEvent) -> Result<(), ContractError> {
        if self.fail {
            return Err(ContractError::event_log(&self.name, "injected failure"));
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{PipelineStep, PlayerRecord};

    #[tokio::test]
    async fn test_create_bucket_then_already_exists() {
        let store = MemoryObjectStore::new();
        store.create_bucket("lake").await.unwrap();
        let second = store.create_bucket("lake").await;
        assert!(second.unwrap_err().is_already_exists());
        assert_eq!(store.create_attempts(), 2);
        assert_eq!(store.create_successes(), 1);
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = MemoryObjectStore::with_bucket("lake");
        store
            .put_object("lake", "raw-data/players.jsonl", Bytes::from_static(b"{}"))
            .await
            .unwrap();
        let body = store.get_object("lake", "raw-data/players.jsonl").await.unwrap();
        assert_eq!(body, Bytes::from_static(b"{}"));
    }

    #[tokio::test]
    async fn test_put_into_missing_bucket_fails() {
        let store = MemoryObjectStore::new();
        let result = store.put_object("lake", "k", Bytes::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            ContractError::Store { .. }
        ));
    }

    #[tokio::test]
    async fn test_apply_table_replaces_definition() {
        let catalog = MemoryCatalog::with_database("nba");
        let mut spec = TableSpec {
            name: "players".into(),
            columns: PlayerRecord::columns(),
            location: "s3://lake/raw-data/".into(),
            layout: Default::default(),
        };
        catalog.apply_table("nba", &spec).await.unwrap();

        spec.location = "s3://lake/v2/".into();
        catalog.apply_table("nba", &spec).await.unwrap();

        let stored = catalog.table("nba", "players").unwrap();
        assert_eq!(stored.location, "s3://lake/v2/");
        assert_eq!(catalog.apply_calls(), 2);
    }

    #[tokio::test]
    async fn test_event_sink_collects_and_shares() {
        let mut sink = MemoryEventSink::default();
        let handle = sink.clone();
        sink.emit(PipelineEvent::started(PipelineStep::Fetch))
            .await
            .unwrap();
        assert_eq!(handle.events().len(), 1);
        assert_eq!(handle.events()[0].step, PipelineStep::Fetch);
    }
}
