//! ObjectStore trait - durable key-addressed storage interface

use bytes::Bytes;

use crate::ContractError;

/// Object store trait
///
/// All object store implementations must implement this trait.
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Create the bucket
    ///
    /// # Errors
    /// Returns `ContractError::AlreadyExists` when the bucket is already
    /// present; callers performing create-if-absent ignore that case.
    async fn create_bucket(&self, bucket: &str) -> Result<(), ContractError>;

    /// Write an object at `key`, replacing any existing object
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), ContractError>;

    /// Read an object back
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, ContractError>;
}
