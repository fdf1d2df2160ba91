//! Pipeline orchestrator - wires config, clients and the loader together.
//!
//! Supports both real AWS and mock modes via feature flags.
//! When the `aws` feature is disabled, runs fully in-memory.

use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{DataCatalog, EventSink, LakeBlueprint, ObjectStore, PlayerSource, QueryGateway};
use lake_clients::ServiceSet;
use observability::ActivityLog;
use tracing::info;

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The lake blueprint configuration
    pub blueprint: LakeBlueprint,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        #[cfg(feature = "aws")]
        return self.run_real().await;

        #[cfg(not(feature = "aws"))]
        return self.run_mock().await;
    }

    /// Run pipeline against real AWS services
    #[cfg(feature = "aws")]
    async fn run_real(self) -> Result<PipelineStats> {
        use ingestion::HttpPlayerSource;
        use lake_clients::AwsEventSink;

        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        info!(
            region = %blueprint.lake.region,
            bucket = %blueprint.lake.bucket,
            "Loading AWS configuration..."
        );

        let sdk_config = lake_clients::load_sdk_config(&blueprint.lake.region).await;
        let services = ServiceSet::aws(&sdk_config, &blueprint.lake.region);

        let source = HttpPlayerSource::new(&blueprint.source)
            .context("Failed to build upstream source")?;

        // Activity sink first so even the provisioning step is visible
        let sink = if blueprint.events.enabled {
            let sink = AwsEventSink::create(
                &sdk_config,
                &blueprint.events.group,
                &blueprint.events.stream,
            )
            .await
            .context("Failed to initialize activity log sink")?;
            Some(sink)
        } else {
            None
        };
        let activity = ActivityLog::new(sink);

        info!("Pipeline running (AWS mode)");
        self.execute(&source, &services, activity, start_time).await
    }

    /// Run pipeline fully in-memory
    #[cfg(not(feature = "aws"))]
    async fn run_mock(self) -> Result<PipelineStats> {
        use ingestion::MockPlayerSource;
        use lake_clients::MemoryEventSink;

        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        info!("Running in MOCK mode (no cloud account required)");

        let services = ServiceSet::memory();
        let source = MockPlayerSource::sample();
        let sink = blueprint.events.enabled.then(MemoryEventSink::default);
        let activity = ActivityLog::new(sink);

        info!("Pipeline running (MOCK mode)");
        self.execute(&source, &services, activity, start_time).await
    }

    /// Common pipeline logic shared between real and mock modes
    async fn execute<P, S, C, Q, E>(
        &self,
        source: &P,
        services: &ServiceSet<S, C, Q>,
        mut activity: ActivityLog<E>,
        start_time: Instant,
    ) -> Result<PipelineStats>
    where
        P: PlayerSource,
        S: ObjectStore,
        C: DataCatalog,
        Q: QueryGateway,
        E: EventSink,
    {
        let blueprint = &self.config.blueprint;

        let result = loader::run_pipeline(
            blueprint,
            source,
            &services.store,
            &services.catalog,
            &services.query,
            &mut activity,
        )
        .await;

        match result {
            Ok(report) => {
                observability::record_run_completed(true);
                Ok(PipelineStats::from_report(report, start_time.elapsed()))
            }
            Err(err) => {
                observability::record_run_completed(false);
                Err(anyhow::Error::new(err).context("Pipeline execution failed"))
            }
        }
    }
}
