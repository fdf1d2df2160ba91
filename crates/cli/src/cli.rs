//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// NBA Lake - idempotent provisioning-and-load pipeline for NBA player data
#[derive(Parser, Debug)]
#[command(
    name = "nba-lake",
    author,
    version,
    about = "NBA sports analytics data lake pipeline",
    long_about = "An idempotent provisioning-and-load pipeline for NBA player data.\n\n\
                  Ensures the bucket and catalog database exist, fetches player data \n\
                  from the sports API, writes it as JSON to the object store, registers \n\
                  the table schema, and points the query service at the results location."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "NBA_LAKE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "NBA_LAKE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the provisioning-and-load pipeline
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "NBA_LAKE_CONFIG")]
    pub config: PathBuf,

    /// Override the upstream API endpoint from configuration
    #[arg(long, env = "NBA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Upstream API key (never stored in the config file)
    #[arg(long, env = "SPORTS_DATA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the bucket name from configuration
    #[arg(long, env = "NBA_LAKE_BUCKET")]
    pub bucket: Option<String>,

    /// Override the service region from configuration
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Override the catalog database from configuration
    #[arg(long, env = "NBA_LAKE_DATABASE")]
    pub database: Option<String>,

    /// Override the catalog table from configuration
    #[arg(long, env = "NBA_LAKE_TABLE")]
    pub table: Option<String>,

    /// Validate configuration and print the plan without touching services
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "NBA_LAKE_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the registered table's columns
    #[arg(long)]
    pub columns: bool,

    /// Show event log settings
    #[arg(long)]
    pub events: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
