//! Pipeline sequencer
//!
//! The run in strict program order; step N+1 only executes when step N
//! succeeded. No retries, no rollback: a resource created by an earlier step
//! survives a later failure.

use std::time::Instant;

use contracts::{
    ContractError, DataCatalog, EventSink, LakeBlueprint, ObjectStore, PipelineStep, PlayerSource,
    QueryGateway,
};
use observability::{
    record_bytes_written, record_records_fetched, record_records_written, record_step_duration,
    ActivityLog, StepTimings,
};
use tracing::info;

use crate::provisioner::{provision, ProvisionOutcome};
use crate::query::configure_query;
use crate::registrar::register_table;
use crate::writer::ObjectWriter;

/// Outcome of a completed run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub records_fetched: usize,
    pub records_written: usize,
    pub bytes_written: u64,
    pub provision: ProvisionOutcome,
    pub object_key: String,
    pub data_location: String,
    pub timings: StepTimings,
}

/// Run the pipeline to completion or first fatal failure
pub async fn run_pipeline<P, S, C, Q, E>(
    blueprint: &LakeBlueprint,
    source: &P,
    store: &S,
    catalog: &C,
    query: &Q,
    activity: &mut ActivityLog<E>,
) -> Result<PipelineReport, ContractError>
where
    P: PlayerSource,
    S: ObjectStore,
    C: DataCatalog,
    Q: QueryGateway,
    E: EventSink,
{
    let mut timings = StepTimings::new();
    let object_key = blueprint.object_key();

    // 1. Provision bucket and database
    activity.step_started(PipelineStep::Provision).await;
    let started = Instant::now();
    let outcome = match provision(store, catalog, blueprint).await {
        Ok(outcome) => outcome,
        Err(err) => return Err(abort(activity, PipelineStep::Provision, err).await),
    };
    complete(
        activity,
        &mut timings,
        PipelineStep::Provision,
        started,
        format!(
            "bucket '{}' ready (created: {}), database '{}' ready (created: {})",
            blueprint.lake.bucket,
            outcome.bucket_created,
            blueprint.catalog.database,
            outcome.database_created
        ),
    )
    .await;

    // 2. Fetch upstream payload
    activity.step_started(PipelineStep::Fetch).await;
    let started = Instant::now();
    let raw = match source.fetch_players().await {
        Ok(raw) => raw,
        Err(err) => return Err(abort(activity, PipelineStep::Fetch, err).await),
    };
    record_records_fetched(raw.len());
    let records_fetched = raw.len();
    complete(
        activity,
        &mut timings,
        PipelineStep::Fetch,
        started,
        format!("fetched {} players from {}", records_fetched, source.name()),
    )
    .await;

    // 3. Normalize (pure projection, an empty payload is not an error)
    activity.step_started(PipelineStep::Normalize).await;
    let started = Instant::now();
    let records = ingestion::normalize(raw);
    complete(
        activity,
        &mut timings,
        PipelineStep::Normalize,
        started,
        format!("normalized {} records", records.len()),
    )
    .await;

    // 4. Write the records object
    activity.step_started(PipelineStep::Write).await;
    let started = Instant::now();
    let writer = ObjectWriter::new(blueprint.lake.layout);
    let bytes_written = match writer
        .write_to(store, &blueprint.lake.bucket, &object_key, &records)
        .await
    {
        Ok(bytes) => bytes,
        Err(err) => return Err(abort(activity, PipelineStep::Write, err).await),
    };
    record_records_written(records.len());
    record_bytes_written(bytes_written);
    complete(
        activity,
        &mut timings,
        PipelineStep::Write,
        started,
        format!(
            "wrote {} records ({} bytes) to {}",
            records.len(),
            bytes_written,
            object_key
        ),
    )
    .await;

    // 5. Register the catalog table
    activity.step_started(PipelineStep::Register).await;
    let started = Instant::now();
    let spec = blueprint.table_spec();
    if let Err(err) = register_table(catalog, &blueprint.catalog.database, &spec).await {
        return Err(abort(activity, PipelineStep::Register, err).await);
    }
    complete(
        activity,
        &mut timings,
        PipelineStep::Register,
        started,
        format!("table '{}' registered over {}", spec.name, spec.location),
    )
    .await;

    // 6. Configure the query gateway
    activity.step_started(PipelineStep::ConfigureQuery).await;
    let started = Instant::now();
    let results_location = blueprint.results_location();
    if let Err(err) = configure_query(query, &blueprint.catalog.database, &results_location).await {
        return Err(abort(activity, PipelineStep::ConfigureQuery, err).await);
    }
    complete(
        activity,
        &mut timings,
        PipelineStep::ConfigureQuery,
        started,
        format!("results location set to {results_location}"),
    )
    .await;

    activity.flush().await;

    info!(
        records = records.len(),
        bytes = bytes_written,
        "Pipeline run complete"
    );

    Ok(PipelineReport {
        records_fetched,
        records_written: records.len(),
        bytes_written,
        provision: outcome,
        object_key,
        data_location: blueprint.data_location(),
        timings,
    })
}

/// Record the failure, flush the activity log, hand the error back
async fn abort<E: EventSink>(
    activity: &mut ActivityLog<E>,
    step: PipelineStep,
    err: ContractError,
) -> ContractError {
    activity.step_failed(step, &err).await;
    activity.flush().await;
    err
}

/// Record a step's success and timing
async fn complete<E: EventSink>(
    activity: &mut ActivityLog<E>,
    timings: &mut StepTimings,
    step: PipelineStep,
    started: Instant,
    message: String,
) {
    let elapsed = started.elapsed();
    record_step_duration(step, elapsed);
    timings.push(step, elapsed);
    activity.step_succeeded(step, message).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        CatalogConfig, ConfigVersion, EventLogConfig, JsonLayout, LakeConfig, QueryConfig,
        SourceConfig, StepOutcome,
    };
    use ingestion::MockPlayerSource;
    use lake_clients::{MemoryCatalog, MemoryEventSink, MemoryObjectStore, MemoryQueryGateway};

    fn blueprint() -> LakeBlueprint {
        LakeBlueprint {
            version: ConfigVersion::V1,
            source: SourceConfig {
                endpoint: "https://api.sportsdata.io/v3/nba/scores/json/Players".into(),
                api_key: None,
                timeout_secs: 30,
            },
            lake: LakeConfig {
                bucket: "sports-analytics-data-lake".into(),
                region: "us-east-1".into(),
                raw_prefix: "raw-data".into(),
                object_name: "nba_player_data.jsonl".into(),
                layout: JsonLayout::Lines,
            },
            catalog: CatalogConfig {
                database: "nba_data_lake".into(),
                table: "nba_players".into(),
                description: Some("NBA analytics lake".into()),
            },
            query: QueryConfig::default(),
            events: EventLogConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_happy_path_touches_every_service() {
        let bp = blueprint();
        let source = MockPlayerSource::sample();
        let store = MemoryObjectStore::new();
        let catalog = MemoryCatalog::new();
        let query = MemoryQueryGateway::new();
        let sink = MemoryEventSink::default();
        let events = sink.clone();
        let mut activity = ActivityLog::new(Some(sink));

        let report = run_pipeline(&bp, &source, &store, &catalog, &query, &mut activity)
            .await
            .unwrap();

        assert_eq!(report.records_fetched, 3);
        assert_eq!(report.records_written, 3);
        assert!(report.provision.bucket_created);
        assert!(report.provision.database_created);
        assert_eq!(report.timings.len(), PipelineStep::ALL.len());

        assert!(store.bucket_exists("sports-analytics-data-lake"));
        assert!(store
            .object("sports-analytics-data-lake", "raw-data/nba_player_data.jsonl")
            .is_some());
        assert_eq!(
            catalog.table("nba_data_lake", "nba_players").unwrap(),
            bp.table_spec()
        );
        assert_eq!(
            query.last_initialize(),
            Some((
                "nba_data_lake".into(),
                "s3://sports-analytics-data-lake/athena-results/".into()
            ))
        );

        // started + succeeded per step
        assert_eq!(events.events().len(), PipelineStep::ALL.len() * 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_aborts_before_write() {
        let bp = blueprint();
        let source = MockPlayerSource::failing(401);
        let store = MemoryObjectStore::new();
        let catalog = MemoryCatalog::new();
        let query = MemoryQueryGateway::new();
        let sink = MemoryEventSink::default();
        let events = sink.clone();
        let mut activity = ActivityLog::new(Some(sink));

        let err = run_pipeline(&bp, &source, &store, &catalog, &query, &mut activity)
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::Upstream { status: 401 }));

        // Provisioning ran; nothing after the fetch did
        assert!(store.bucket_exists("sports-analytics-data-lake"));
        assert_eq!(store.object_count("sports-analytics-data-lake"), 0);
        assert_eq!(catalog.table("nba_data_lake", "nba_players"), None);
        assert_eq!(query.last_initialize(), None);

        let last = events.events().into_iter().last().unwrap();
        assert_eq!(last.step, PipelineStep::Fetch);
        assert_eq!(last.outcome, StepOutcome::Failed);
    }

    #[tokio::test]
    async fn test_empty_payload_writes_empty_document() {
        let bp = blueprint();
        let source = MockPlayerSource::empty();
        let store = MemoryObjectStore::new();
        let catalog = MemoryCatalog::new();
        let query = MemoryQueryGateway::new();
        let mut activity: ActivityLog<MemoryEventSink> = ActivityLog::new(None);

        let report = run_pipeline(&bp, &source, &store, &catalog, &query, &mut activity)
            .await
            .unwrap();

        assert_eq!(report.records_written, 0);
        let body = store
            .object("sports-analytics-data-lake", "raw-data/nba_player_data.jsonl")
            .unwrap();
        assert!(body.is_empty());
        assert!(catalog.table("nba_data_lake", "nba_players").is_some());
    }
}
