//! Provider-agnostic trait for cloud inventory access
//!
//! Scans and reaps consume a `CloudInventory` handle rather than constructing
//! SDK clients themselves, so the core logic is testable with an in-memory
//! substitute. The AWS implementation lives in `providers::aws`.

use crate::error::Result;
use crate::model::{ComputeInstance, KeyValueTable, ObjectStoreBucket, StorageVolume};
use async_trait::async_trait;

/// Resource identifier (volume ID, instance ID, bucket or table name)
pub type ResourceId = String;

/// Read and delete access to a cloud account's inventory.
///
/// Listings are pure reads returning a point-in-time snapshot; deletes are
/// single irreversible calls keyed by identifier. Implementations surface
/// communication failures as `ReaperError::ProviderUnavailable` and missing
/// delete targets as `ReaperError::ResourceNotFound`.
#[async_trait]
pub trait CloudInventory: Send + Sync {
    /// Provider name (e.g., "aws")
    fn name(&self) -> &'static str;

    /// List EBS volumes the provider reports as "available".
    ///
    /// The provider-side filter is necessary but not sufficient for orphan
    /// detection; callers apply `StorageVolume::is_orphaned` on top.
    async fn list_available_volumes(&self) -> Result<Vec<StorageVolume>>;

    /// List EC2 instances in any non-terminated lifecycle state
    async fn list_instances(&self) -> Result<Vec<ComputeInstance>>;

    /// List all S3 buckets in the account
    async fn list_buckets(&self) -> Result<Vec<ObjectStoreBucket>>;

    /// List all DynamoDB table names
    async fn list_tables(&self) -> Result<Vec<KeyValueTable>>;

    /// Delete an EBS volume by ID
    async fn delete_volume(&self, volume_id: &str) -> Result<()>;

    /// Terminate an EC2 instance by ID
    async fn terminate_instance(&self, instance_id: &str) -> Result<()>;

    /// Delete an S3 bucket by name (must already be empty)
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// Delete a DynamoDB table by name
    async fn delete_table(&self, name: &str) -> Result<()>;
}
