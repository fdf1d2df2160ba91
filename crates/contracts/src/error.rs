//! Layered error definitions
//!
//! Categorized by source: config / upstream / store / catalog / query / events

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Provisioning Errors =====
    /// Resource already exists (non-fatal for create-if-absent steps)
    #[error("resource already exists: {resource}")]
    AlreadyExists { resource: String },

    // ===== Upstream API Errors =====
    /// Upstream API returned a non-success status
    #[error("upstream api returned status {status}")]
    Upstream { status: u16 },

    /// Upstream fetch transport or decode error
    #[error("upstream fetch error: {message}")]
    Fetch { message: String },

    // ===== Object Store Errors =====
    /// Object store call failed
    #[error("object store {operation} failed: {message}")]
    Store { operation: String, message: String },

    // ===== Catalog Errors =====
    /// Catalog call failed
    #[error("catalog {operation} failed: {message}")]
    Catalog { operation: String, message: String },

    // ===== Query Service Errors =====
    /// Query service configuration failed
    #[error("query gateway error: {message}")]
    Query { message: String },

    // ===== Event Sink Errors =====
    /// Event sink write failed (never fatal to a run)
    #[error("event sink '{sink_name}' error: {message}")]
    EventLog { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create already-exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create upstream fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create object store error
    pub fn store(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create catalog error
    pub fn catalog(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Catalog {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create query gateway error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create event sink error
    pub fn event_log(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EventLog {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error is the ignorable create-if-absent case
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
