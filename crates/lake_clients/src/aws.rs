//! AWS-backed service clients
//!
//! S3 for the object store, Glue for the catalog, Athena for the query
//! gateway, CloudWatch Logs for the event sink. All clients share one SDK
//! config loaded from the environment (credentials resolution is the SDK's).

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_glue::types::{Column, DatabaseInput, SerDeInfo, StorageDescriptor, TableInput};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use bytes::Bytes;
use contracts::{
    ColumnDef, ColumnType, ContractError, DataCatalog, EventSink, JsonLayout, ObjectStore,
    PipelineEvent, QueryGateway, TableSpec,
};
use tracing::{debug, instrument};

const JSON_SERDE: &str = "org.openx.data.jsonserde.JsonSerDe";
const TEXT_INPUT_FORMAT: &str = "org.apache.hadoop.mapred.TextInputFormat";
const HIVE_OUTPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat";
const LAYOUT_PARAMETER: &str = "json.layout";

/// Load the shared SDK config for a region
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

// ===== Object store =====

/// S3-backed object store
#[derive(Clone)]
pub struct AwsObjectStore {
    client: aws_sdk_s3::Client,
    region: String,
}

impl AwsObjectStore {
    pub fn new(config: &SdkConfig, region: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
            region: region.into(),
        }
    }
}

impl ObjectStore for AwsObjectStore {
    #[instrument(name = "s3_create_bucket", skip(self))]
    async fn create_bucket(&self, bucket: &str) -> Result<(), ContractError> {
        // us-east-1 rejects an explicit location constraint
        let mut request = self.client.create_bucket().bucket(bucket);
        if self.region != "us-east-1" {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        if let Err(err) = request.send().await {
            let service_err = err.into_service_error();
            if service_err.is_bucket_already_exists()
                || service_err.is_bucket_already_owned_by_you()
            {
                return Err(ContractError::already_exists(format!("bucket '{bucket}'")));
            }
            return Err(ContractError::store(
                "create_bucket",
                service_err.to_string(),
            ));
        }

        // Confirm the bucket resolves before later steps write through it
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                ContractError::store("head_bucket", e.into_service_error().to_string())
            })?;

        debug!(bucket, "bucket created");
        Ok(())
    }

    #[instrument(name = "s3_put_object", skip(self, body), fields(len = body.len()))]
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), ContractError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ContractError::store("put_object", e.into_service_error().to_string()))?;
        Ok(())
    }

    #[instrument(name = "s3_get_object", skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, ContractError> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ContractError::store("get_object", e.into_service_error().to_string()))?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| ContractError::store("get_object", e.to_string()))?;
        Ok(data.into_bytes())
    }
}

// ===== Catalog =====

/// Glue-backed metadata catalog
#[derive(Clone)]
pub struct AwsCatalog {
    client: aws_sdk_glue::Client,
}

impl AwsCatalog {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_glue::Client::new(config),
        }
    }

    fn table_input(spec: &TableSpec) -> Result<TableInput, ContractError> {
        let mut columns = Vec::with_capacity(spec.columns.len());
        for column in &spec.columns {
            let built = Column::builder()
                .name(&column.name)
                .r#type(column.column_type.as_str())
                .build()
                .map_err(|e| ContractError::catalog("apply_table", e.to_string()))?;
            columns.push(built);
        }

        let storage = StorageDescriptor::builder()
            .set_columns(Some(columns))
            .location(&spec.location)
            .input_format(TEXT_INPUT_FORMAT)
            .output_format(HIVE_OUTPUT_FORMAT)
            .serde_info(
                SerDeInfo::builder()
                    .serialization_library(JSON_SERDE)
                    .build(),
            )
            .build();

        let layout = match spec.layout {
            JsonLayout::Lines => "lines",
            JsonLayout::Array => "array",
        };

        TableInput::builder()
            .name(&spec.name)
            .storage_descriptor(storage)
            .table_type("EXTERNAL_TABLE")
            .parameters("classification", "json")
            .parameters(LAYOUT_PARAMETER, layout)
            .build()
            .map_err(|e| ContractError::catalog("apply_table", e.to_string()))
    }
}

impl DataCatalog for AwsCatalog {
    #[instrument(name = "glue_create_database", skip(self, description))]
    async fn create_database(
        &self,
        database: &str,
        description: Option<&str>,
    ) -> Result<(), ContractError> {
        let input = DatabaseInput::builder()
            .name(database)
            .set_description(description.map(String::from))
            .build()
            .map_err(|e| ContractError::catalog("create_database", e.to_string()))?;

        if let Err(err) = self
            .client
            .create_database()
            .database_input(input)
            .send()
            .await
        {
            let service_err = err.into_service_error();
            if service_err.is_already_exists_exception() {
                return Err(ContractError::already_exists(format!(
                    "database '{database}'"
                )));
            }
            return Err(ContractError::catalog(
                "create_database",
                service_err.to_string(),
            ));
        }

        debug!(database, "database created");
        Ok(())
    }

    #[instrument(name = "glue_apply_table", skip(self, spec), fields(table = %spec.name))]
    async fn apply_table(&self, database: &str, spec: &TableSpec) -> Result<(), ContractError> {
        let input = Self::table_input(spec)?;

        let create_result = self
            .client
            .create_table()
            .database_name(database)
            .table_input(input.clone())
            .send()
            .await;

        match create_result {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if !service_err.is_already_exists_exception() {
                    return Err(ContractError::catalog(
                        "create_table",
                        service_err.to_string(),
                    ));
                }
                // Replace the existing definition
                self.client
                    .update_table()
                    .database_name(database)
                    .table_input(input)
                    .send()
                    .await
                    .map_err(|e| {
                        ContractError::catalog("update_table", e.into_service_error().to_string())
                    })?;
                Ok(())
            }
        }
    }

    #[instrument(name = "glue_get_table", skip(self))]
    async fn get_table(
        &self,
        database: &str,
        table: &str,
    ) -> Result<Option<TableSpec>, ContractError> {
        let resp = match self
            .client
            .get_table()
            .database_name(database)
            .name(table)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_entity_not_found_exception() {
                    return Ok(None);
                }
                return Err(ContractError::catalog("get_table", service_err.to_string()));
            }
        };

        let Some(found) = resp.table() else {
            return Ok(None);
        };

        let descriptor = found.storage_descriptor();
        let mut columns = Vec::new();
        if let Some(descriptor) = descriptor {
            for column in descriptor.columns() {
                let column_type = column
                    .r#type()
                    .and_then(ColumnType::parse)
                    .ok_or_else(|| {
                        ContractError::catalog(
                            "get_table",
                            format!("unsupported column type on '{}'", column.name()),
                        )
                    })?;
                columns.push(ColumnDef::new(column.name(), column_type));
            }
        }

        let layout = match found.parameters().and_then(|p| {
            p.get(LAYOUT_PARAMETER).map(String::as_str)
        }) {
            Some("array") => JsonLayout::Array,
            _ => JsonLayout::Lines,
        };

        Ok(Some(TableSpec {
            name: found.name().to_string(),
            columns,
            location: descriptor
                .and_then(|d| d.location())
                .unwrap_or_default()
                .to_string(),
            layout,
        }))
    }
}

// ===== Query gateway =====

/// Athena-backed query gateway
#[derive(Clone)]
pub struct AwsQueryGateway {
    client: aws_sdk_athena::Client,
}

impl AwsQueryGateway {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_athena::Client::new(config),
        }
    }
}

impl QueryGateway for AwsQueryGateway {
    #[instrument(name = "athena_initialize", skip(self))]
    async fn initialize(
        &self,
        database: &str,
        output_location: &str,
    ) -> Result<(), ContractError> {
        use aws_sdk_athena::types::{QueryExecutionContext, ResultConfiguration};

        // Priming statement; the output location setting is the real effect
        self.client
            .start_query_execution()
            .query_string(format!("CREATE DATABASE IF NOT EXISTS {database}"))
            .query_execution_context(QueryExecutionContext::builder().database(database).build())
            .result_configuration(
                ResultConfiguration::builder()
                    .output_location(output_location)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ContractError::query(e.into_service_error().to_string()))?;
        Ok(())
    }
}

// ===== Event sink =====

/// CloudWatch Logs-backed event sink
pub struct AwsEventSink {
    client: aws_sdk_cloudwatchlogs::Client,
    group: String,
    stream: String,
}

impl AwsEventSink {
    /// Create the sink, ensuring the log group and stream exist
    pub async fn create(
        config: &SdkConfig,
        group: impl Into<String>,
        stream: impl Into<String>,
    ) -> Result<Self, ContractError> {
        let client = aws_sdk_cloudwatchlogs::Client::new(config);
        let group = group.into();
        let stream = stream.into();

        if let Err(err) = client.create_log_group().log_group_name(&group).send().await {
            let service_err = err.into_service_error();
            if !service_err.is_resource_already_exists_exception() {
                return Err(ContractError::event_log(&group, service_err.to_string()));
            }
        }

        if let Err(err) = client
            .create_log_stream()
            .log_group_name(&group)
            .log_stream_name(&stream)
            .send()
            .await
        {
            let service_err = err.into_service_error();
            if !service_err.is_resource_already_exists_exception() {
                return Err(ContractError::event_log(&group, service_err.to_string()));
            }
        }

        Ok(Self {
            client,
            group,
            stream,
        })
    }
}

impl EventSink for AwsEventSink {
    fn name(&self) -> &str {
        &self.group
    }

    #[instrument(name = "cloudwatch_emit", skip(self, event), fields(step = %event.step))]
    async fn emit(&mut self, event: PipelineEvent) -> Result<(), ContractError> {
        use aws_sdk_cloudwatchlogs::types::InputLogEvent;

        let message = serde_json::to_string(&event)
            .map_err(|e| ContractError::event_log(&self.group, e.to_string()))?;
        let log_event = InputLogEvent::builder()
            .timestamp(event.timestamp_ms)
            .message(message)
            .build()
            .map_err(|e| ContractError::event_log(&self.group, e.to_string()))?;

        self.client
            .put_log_events()
            .log_group_name(&self.group)
            .log_stream_name(&self.stream)
            .log_events(log_event)
            .send()
            .await
            .map_err(|e| {
                ContractError::event_log(&self.group, e.into_service_error().to_string())
            })?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }
}
