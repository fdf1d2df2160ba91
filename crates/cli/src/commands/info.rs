//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    source: SourceInfo,
    lake: LakeInfo,
    catalog: CatalogInfo,
    query: QueryInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<EventsInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    columns: Vec<ColumnInfo>,
}

#[derive(Serialize)]
struct SourceInfo {
    endpoint: String,
    timeout_secs: u64,
    api_key_set: bool,
}

#[derive(Serialize)]
struct LakeInfo {
    bucket: String,
    region: String,
    object_key: String,
    layout: String,
}

#[derive(Serialize)]
struct CatalogInfo {
    database: String,
    table: String,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Serialize)]
struct QueryInfo {
    results_location: String,
}

#[derive(Serialize)]
struct EventsInfo {
    group: String,
    stream: String,
}

#[derive(Serialize)]
struct ColumnInfo {
    name: String,
    column_type: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::LakeBlueprint, args: &InfoArgs) -> ConfigInfo {
    let columns = if args.columns {
        blueprint
            .table_spec()
            .columns
            .iter()
            .map(|c| ColumnInfo {
                name: c.name.clone(),
                column_type: c.column_type.as_str().to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let events = (args.events && blueprint.events.enabled).then(|| EventsInfo {
        group: blueprint.events.group.clone(),
        stream: blueprint.events.stream.clone(),
    });

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        source: SourceInfo {
            endpoint: blueprint.source.endpoint.clone(),
            timeout_secs: blueprint.source.timeout_secs,
            api_key_set: blueprint.source.api_key.is_some(),
        },
        lake: LakeInfo {
            bucket: blueprint.lake.bucket.clone(),
            region: blueprint.lake.region.clone(),
            object_key: blueprint.object_key(),
            layout: format!("{:?}", blueprint.lake.layout),
        },
        catalog: CatalogInfo {
            database: blueprint.catalog.database.clone(),
            table: blueprint.catalog.table.clone(),
            location: blueprint.data_location(),
            description: blueprint.catalog.description.clone(),
        },
        query: QueryInfo {
            results_location: blueprint.results_location(),
        },
        events,
        columns,
    }
}

fn print_config_info(blueprint: &contracts::LakeBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  NBA Lake Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Source info
    println!("🌐 Source");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Endpoint: {}", blueprint.source.endpoint);
    println!(
        "   ├─ API key: {}",
        if blueprint.source.api_key.is_some() {
            "set"
        } else {
            "from environment"
        }
    );
    println!("   └─ Timeout: {}s", blueprint.source.timeout_secs);

    // Lake layout
    println!("\n🪣 Lake");
    println!(
        "   ├─ Bucket: {} ({})",
        blueprint.lake.bucket, blueprint.lake.region
    );
    println!("   ├─ Object key: {}", blueprint.object_key());
    println!("   └─ Layout: {:?}", blueprint.lake.layout);

    // Catalog
    println!("\n📇 Catalog");
    println!("   ├─ Database: {}", blueprint.catalog.database);
    println!("   ├─ Table: {}", blueprint.catalog.table);
    if let Some(ref description) = blueprint.catalog.description {
        println!("   ├─ Description: {}", description);
    }
    println!("   └─ Location: {}", blueprint.data_location());

    if args.columns {
        let spec = blueprint.table_spec();
        println!("\n📋 Columns ({})", spec.columns.len());
        for (i, column) in spec.columns.iter().enumerate() {
            let prefix = if i == spec.columns.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!(
                "   {} {} ({})",
                prefix,
                column.name,
                column.column_type.as_str()
            );
        }
    }

    // Query
    println!("\n🔍 Query");
    println!("   └─ Results location: {}", blueprint.results_location());

    // Events
    if args.events {
        println!("\n📤 Events");
        if blueprint.events.enabled {
            println!("   ├─ Log group: {}", blueprint.events.group);
            println!("   └─ Log stream: {}", blueprint.events.stream);
        } else {
            println!("   └─ Disabled");
        }
    }

    println!();
}
