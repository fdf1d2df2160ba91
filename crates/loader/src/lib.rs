//! # Loader
//!
//! Lake-side pipeline operations, generic over the `contracts` service traits.
//!
//! Responsibilities:
//! - Provision bucket and database (create-if-absent)
//! - Encode and write the records object
//! - Register the catalog table over the object's location
//! - Point the query service at the results location
//! - Sequence the whole run, strictly in step order

mod pipeline;
mod provisioner;
mod query;
mod registrar;
mod writer;

pub use pipeline::{run_pipeline, PipelineReport};
pub use provisioner::{ensure_bucket, ensure_database, provision, ProvisionOutcome};
pub use query::configure_query;
pub use registrar::register_table;
pub use writer::ObjectWriter;
