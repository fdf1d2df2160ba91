//! # Lake Clients
//!
//! Service client implementations behind the `contracts` traits.
//!
//! Two families:
//! - AWS-backed clients (S3 / Glue / Athena / CloudWatch Logs), available with
//!   the default `aws` feature
//! - In-memory clients with failure injection, always available, used by unit
//!   tests and mock mode

#[cfg(feature = "aws")]
mod aws;
mod factory;
mod memory;

#[cfg(feature = "aws")]
pub use aws::{load_sdk_config, AwsCatalog, AwsEventSink, AwsObjectStore, AwsQueryGateway};
pub use factory::ServiceSet;
pub use memory::{MemoryCatalog, MemoryEventSink, MemoryObjectStore, MemoryQueryGateway};
