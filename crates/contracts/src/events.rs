//! Pipeline activity events and the EventSink trait

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Pipeline step identifiers, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    /// Ensure bucket and database exist
    Provision,
    /// HTTP GET against the upstream API
    Fetch,
    /// Project raw payload onto the record shape
    Normalize,
    /// Encode and write the JSON object
    Write,
    /// Create/replace the catalog table
    Register,
    /// Point the query service at the results location
    ConfigureQuery,
}

impl PipelineStep {
    /// All steps in execution order
    pub const ALL: [PipelineStep; 6] = [
        PipelineStep::Provision,
        PipelineStep::Fetch,
        PipelineStep::Normalize,
        PipelineStep::Write,
        PipelineStep::Register,
        PipelineStep::ConfigureQuery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provision => "provision",
            Self::Fetch => "fetch",
            Self::Normalize => "normalize",
            Self::Write => "write",
            Self::Register => "register",
            Self::ConfigureQuery => "configure_query",
        }
    }
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step outcome carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Started,
    Succeeded,
    Failed,
}

/// One activity event, appended to the external log sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub step: PipelineStep,
    pub outcome: StepOutcome,
    pub message: String,
    /// Epoch milliseconds
    pub timestamp_ms: i64,
}

impl PipelineEvent {
    pub fn started(step: PipelineStep) -> Self {
        Self::now(step, StepOutcome::Started, format!("step {step} started"))
    }

    pub fn succeeded(step: PipelineStep, message: impl Into<String>) -> Self {
        Self::now(step, StepOutcome::Succeeded, message.into())
    }

    pub fn failed(step: PipelineStep, message: impl Into<String>) -> Self {
        Self::now(step, StepOutcome::Failed, message.into())
    }

    fn now(step: PipelineStep, outcome: StepOutcome, message: String) -> Self {
        Self {
            step,
            outcome,
            message,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Append-only event sink trait
///
/// Sink failures must never abort a pipeline run; callers log and continue.
#[trait_variant::make(EventSink: Send)]
pub trait LocalEventSink {
    /// Sink name (used for logging)
    fn name(&self) -> &str;

    /// Append one event
    async fn emit(&mut self, event: PipelineEvent) -> Result<(), ContractError>;

    /// Flush buffered events (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;
}
