//! Config validation module
//!
//! Validation rules:
//! - bucket name well-formed (lowercase, digits, dots, hyphens, 3-63 chars)
//! - database/table identifiers non-empty, identifier-safe
//! - key prefixes and object name produce a legal object key
//! - endpoint is an http(s) URL
//! - fetch timeout > 0
//! - event log group/stream non-empty when enabled

use contracts::{ContractError, LakeBlueprint};

/// Validate a LakeBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    validate_source(blueprint)?;
    validate_bucket(blueprint)?;
    validate_keys(blueprint)?;
    validate_catalog(blueprint)?;
    validate_query(blueprint)?;
    validate_events(blueprint)?;
    Ok(())
}

/// Validate upstream source settings
fn validate_source(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    let source = &blueprint.source;

    if !source.endpoint.starts_with("http://") && !source.endpoint.starts_with("https://") {
        return Err(ContractError::config_validation(
            "source.endpoint",
            format!("endpoint must be an http(s) URL, got '{}'", source.endpoint),
        ));
    }

    if source.timeout_secs == 0 {
        return Err(ContractError::config_validation(
            "source.timeout_secs",
            "fetch timeout must be > 0",
        ));
    }

    Ok(())
}

/// Validate bucket name shape
fn validate_bucket(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    let bucket = &blueprint.lake.bucket;

    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(ContractError::config_validation(
            "lake.bucket",
            format!("bucket name must be 3-63 chars, got {}", bucket.len()),
        ));
    }

    let valid_chars = bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-');
    if !valid_chars {
        return Err(ContractError::config_validation(
            "lake.bucket",
            "bucket name may only contain lowercase letters, digits, dots and hyphens",
        ));
    }

    let edges_ok = bucket.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit())
        && bucket.ends_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !edges_ok {
        return Err(ContractError::config_validation(
            "lake.bucket",
            "bucket name must start and end with a letter or digit",
        ));
    }

    if blueprint.lake.region.is_empty() {
        return Err(ContractError::config_validation(
            "lake.region",
            "region cannot be empty",
        ));
    }

    Ok(())
}

/// Validate object key components
fn validate_keys(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    let lake = &blueprint.lake;

    if lake.raw_prefix.trim_matches('/').is_empty() {
        return Err(ContractError::config_validation(
            "lake.raw_prefix",
            "raw prefix cannot be empty",
        ));
    }

    if lake.object_name.is_empty() || lake.object_name.contains('/') {
        return Err(ContractError::config_validation(
            "lake.object_name",
            format!(
                "object name must be a bare file name, got '{}'",
                lake.object_name
            ),
        ));
    }

    Ok(())
}

/// Validate catalog identifiers
fn validate_catalog(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    for (field, value) in [
        ("catalog.database", &blueprint.catalog.database),
        ("catalog.table", &blueprint.catalog.table),
    ] {
        if value.is_empty() {
            return Err(ContractError::config_validation(
                field,
                "identifier cannot be empty",
            ));
        }
        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(ContractError::config_validation(
                field,
                format!(
                    "identifier may only contain lowercase letters, digits and underscores, got '{value}'"
                ),
            ));
        }
    }
    Ok(())
}

/// Validate query routing
fn validate_query(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    if blueprint.query.results_prefix.trim_matches('/').is_empty() {
        return Err(ContractError::config_validation(
            "query.results_prefix",
            "results prefix cannot be empty",
        ));
    }

    if blueprint.query.results_prefix.trim_matches('/')
        == blueprint.lake.raw_prefix.trim_matches('/')
    {
        return Err(ContractError::config_validation(
            "query.results_prefix",
            "results prefix must differ from the raw data prefix",
        ));
    }

    Ok(())
}

/// Validate event log settings
fn validate_events(blueprint: &LakeBlueprint) -> Result<(), ContractError> {
    let events = &blueprint.events;
    if !events.enabled {
        return Ok(());
    }

    if events.group.is_empty() {
        return Err(ContractError::config_validation(
            "events.group",
            "log group cannot be empty",
        ));
    }
    if events.stream.is_empty() {
        return Err(ContractError::config_validation(
            "events.stream",
            "log stream cannot be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        CatalogConfig, ConfigVersion, EventLogConfig, JsonLayout, LakeConfig, QueryConfig,
        SourceConfig,
    };

    fn minimal_blueprint() -> LakeBlueprint {
        LakeBlueprint {
            version: ConfigVersion::V1,
            source: SourceConfig {
                endpoint: "https://api.sportsdata.io/v3/nba/scores/json/Players".into(),
                api_key: None,
                timeout_secs: 30,
            },
            lake: LakeConfig {
                bucket: "sports-analytics-data-lake-2144".into(),
                region: "us-east-1".into(),
                raw_prefix: "raw-data".into(),
                object_name: "nba_player_data.jsonl".into(),
                layout: JsonLayout::Lines,
            },
            catalog: CatalogConfig {
                database: "nba_data_lake".into(),
                table: "nba_players".into(),
                description: None,
            },
            query: QueryConfig::default(),
            events: EventLogConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_bad_endpoint_scheme() {
        let mut bp = minimal_blueprint();
        bp.source.endpoint = "ftp://example.com/players".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("http(s)"), "got: {err}");
    }

    #[test]
    fn test_zero_timeout() {
        let mut bp = minimal_blueprint();
        bp.source.timeout_secs = 0;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timeout"), "got: {err}");
    }

    #[test]
    fn test_bucket_too_short() {
        let mut bp = minimal_blueprint();
        bp.lake.bucket = "ab".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("3-63"), "got: {err}");
    }

    #[test]
    fn test_bucket_uppercase_rejected() {
        let mut bp = minimal_blueprint();
        bp.lake.bucket = "Sports-Lake".into();
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_bucket_edge_chars() {
        let mut bp = minimal_blueprint();
        bp.lake.bucket = "-sports-lake".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("start and end"), "got: {err}");
    }

    #[test]
    fn test_object_name_with_slash() {
        let mut bp = minimal_blueprint();
        bp.lake.object_name = "nested/players.json".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("bare file name"), "got: {err}");
    }

    #[test]
    fn test_empty_raw_prefix() {
        let mut bp = minimal_blueprint();
        bp.lake.raw_prefix = "//".into();
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_bad_table_identifier() {
        let mut bp = minimal_blueprint();
        bp.catalog.table = "nba players".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("identifier"), "got: {err}");
    }

    #[test]
    fn test_results_prefix_collides_with_raw() {
        let mut bp = minimal_blueprint();
        bp.query.results_prefix = "raw-data".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("differ"), "got: {err}");
    }

    #[test]
    fn test_disabled_events_skip_checks() {
        let mut bp = minimal_blueprint();
        bp.events.enabled = false;
        bp.events.group = String::new();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_empty_log_group() {
        let mut bp = minimal_blueprint();
        bp.events.group = String::new();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("log group"), "got: {err}");
    }
}
