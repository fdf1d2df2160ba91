//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref endpoint) = args.endpoint {
        info!(endpoint = %endpoint, "Overriding endpoint from CLI");
        blueprint.source.endpoint = endpoint.clone();
    }
    if args.api_key.is_some() {
        blueprint.source.api_key = args.api_key.clone();
    }
    if let Some(ref bucket) = args.bucket {
        info!(bucket = %bucket, "Overriding bucket from CLI");
        blueprint.lake.bucket = bucket.clone();
    }
    if let Some(ref region) = args.region {
        info!(region = %region, "Overriding region from CLI");
        blueprint.lake.region = region.clone();
    }
    if let Some(ref database) = args.database {
        info!(database = %database, "Overriding database from CLI");
        blueprint.catalog.database = database.clone();
    }
    if let Some(ref table) = args.table {
        info!(table = %table, "Overriding table from CLI");
        blueprint.catalog.table = table.clone();
    }

    info!(
        bucket = %blueprint.lake.bucket,
        region = %blueprint.lake.region,
        database = %blueprint.catalog.database,
        table = %blueprint.catalog.table,
        object_key = %blueprint.object_key(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run pipeline
    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting pipeline...");

    // Run pipeline with shutdown signal
    tokio::select! {
        result = pipeline.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        records_fetched = stats.records_fetched,
                        records_written = stats.records_written,
                        bytes_written = stats.bytes_written,
                        duration_secs = stats.duration.as_secs_f64(),
                        "Pipeline completed successfully"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Pipeline execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping pipeline...");
        }
    }

    info!("NBA Lake finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::LakeBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Source:");
    println!("  Endpoint: {}", blueprint.source.endpoint);
    println!(
        "  API key: {}",
        if blueprint.source.api_key.is_some() {
            "set"
        } else {
            "NOT SET"
        }
    );
    println!("  Timeout: {}s", blueprint.source.timeout_secs);

    println!("\nLake:");
    println!(
        "  Bucket: {} ({})",
        blueprint.lake.bucket, blueprint.lake.region
    );
    println!("  Object key: {}", blueprint.object_key());
    println!("  Layout: {:?}", blueprint.lake.layout);

    println!("\nCatalog:");
    println!("  Database: {}", blueprint.catalog.database);
    println!(
        "  Table: {} -> {}",
        blueprint.catalog.table,
        blueprint.data_location()
    );

    println!("\nQuery:");
    println!("  Results location: {}", blueprint.results_location());

    if blueprint.events.enabled {
        println!("\nEvents:");
        println!(
            "  Log group/stream: {}/{}",
            blueprint.events.group, blueprint.events.stream
        );
    }

    println!();
}
