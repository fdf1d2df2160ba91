//! LakeBlueprint - Config Loader output
//!
//! Describes a complete pipeline run: upstream source, lake storage layout,
//! catalog identifiers, query service results routing, and activity logging.

use serde::{Deserialize, Serialize};

use crate::{JsonLayout, PlayerRecord, TableSpec};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Upstream API settings
    pub source: SourceConfig,

    /// Object store layout
    pub lake: LakeConfig,

    /// Catalog identifiers
    pub catalog: CatalogConfig,

    /// Query service routing
    #[serde(default)]
    pub query: QueryConfig,

    /// Activity event log settings
    #[serde(default)]
    pub events: EventLogConfig,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint URL returning a JSON array of player objects
    pub endpoint: String,

    /// API key sent in the subscription header. Usually supplied via
    /// environment/CLI rather than the config file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Bound on the fetch request, seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Object store layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LakeConfig {
    /// Bucket name (must be globally unique for real object stores)
    pub bucket: String,

    /// Service region
    #[serde(default = "default_region")]
    pub region: String,

    /// Prefix the raw object lands under
    #[serde(default = "default_raw_prefix")]
    pub raw_prefix: String,

    /// Object file name under the raw prefix
    #[serde(default = "default_object_name")]
    pub object_name: String,

    /// JSON document layout
    #[serde(default)]
    pub layout: JsonLayout,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_raw_prefix() -> String {
    "raw-data".to_string()
}

fn default_object_name() -> String {
    "nba_player_data.jsonl".to_string()
}

/// Catalog identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog database name
    pub database: String,

    /// Table registered over the raw data
    #[serde(default = "default_table")]
    pub table: String,

    /// Database description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_table() -> String {
    "nba_players".to_string()
}

/// Query service routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Prefix query results are written under, in the same bucket
    #[serde(default = "default_results_prefix")]
    pub results_prefix: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            results_prefix: default_results_prefix(),
        }
    }
}

fn default_results_prefix() -> String {
    "athena-results".to_string()
}

/// Activity event log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogConfig {
    /// Emit step events to the external log sink
    #[serde(default = "default_events_enabled")]
    pub enabled: bool,

    /// Log group name
    #[serde(default = "default_log_group")]
    pub group: String,

    /// Log stream name
    #[serde(default = "default_log_stream")]
    pub stream: String,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            enabled: default_events_enabled(),
            group: default_log_group(),
            stream: default_log_stream(),
        }
    }
}

fn default_events_enabled() -> bool {
    true
}

fn default_log_group() -> String {
    "nba-lake-activity".to_string()
}

fn default_log_stream() -> String {
    "pipeline".to_string()
}

impl LakeBlueprint {
    /// Object key the writer targets, e.g. `raw-data/nba_player_data.jsonl`
    pub fn object_key(&self) -> String {
        format!(
            "{}/{}",
            self.lake.raw_prefix.trim_matches('/'),
            self.lake.object_name
        )
    }

    /// Storage location the catalog table points at
    pub fn data_location(&self) -> String {
        format!(
            "s3://{}/{}/",
            self.lake.bucket,
            self.lake.raw_prefix.trim_matches('/')
        )
    }

    /// Results output location for the query service
    pub fn results_location(&self) -> String {
        format!(
            "s3://{}/{}/",
            self.lake.bucket,
            self.query.results_prefix.trim_matches('/')
        )
    }

    /// Canonical table definition for this blueprint
    pub fn table_spec(&self) -> TableSpec {
        TableSpec {
            name: self.catalog.table.clone(),
            columns: PlayerRecord::columns(),
            location: self.data_location(),
            layout: self.lake.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blueprint() -> LakeBlueprint {
        LakeBlueprint {
            version: ConfigVersion::V1,
            source: SourceConfig {
                endpoint: "https://api.sportsdata.io/v3/nba/scores/json/Players".into(),
                api_key: None,
                timeout_secs: 30,
            },
            lake: LakeConfig {
                bucket: "sports-analytics-data-lake".into(),
                region: default_region(),
                raw_prefix: default_raw_prefix(),
                object_name: default_object_name(),
                layout: JsonLayout::Lines,
            },
            catalog: CatalogConfig {
                database: "nba_data_lake".into(),
                table: default_table(),
                description: None,
            },
            query: QueryConfig::default(),
            events: EventLogConfig::default(),
        }
    }

    #[test]
    fn object_key_joins_prefix_and_name() {
        let bp = sample_blueprint();
        assert_eq!(bp.object_key(), "raw-data/nba_player_data.jsonl");
    }

    #[test]
    fn locations_carry_trailing_slash() {
        let bp = sample_blueprint();
        assert_eq!(
            bp.data_location(),
            "s3://sports-analytics-data-lake/raw-data/"
        );
        assert_eq!(
            bp.results_location(),
            "s3://sports-analytics-data-lake/athena-results/"
        );
    }

    #[test]
    fn prefix_slashes_are_normalized() {
        let mut bp = sample_blueprint();
        bp.lake.raw_prefix = "/raw-data/".into();
        assert_eq!(bp.object_key(), "raw-data/nba_player_data.jsonl");
        assert_eq!(
            bp.data_location(),
            "s3://sports-analytics-data-lake/raw-data/"
        );
    }

    #[test]
    fn table_spec_matches_record_columns() {
        let bp = sample_blueprint();
        let spec = bp.table_spec();
        assert_eq!(spec.name, "nba_players");
        assert_eq!(spec.columns, PlayerRecord::columns());
        assert_eq!(spec.location, bp.data_location());
        assert_eq!(spec.layout, JsonLayout::Lines);
    }
}
