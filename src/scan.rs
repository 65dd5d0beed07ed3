//! Scan orchestration
//!
//! A scan lists one or more resource kinds and derives the orphaned-volume
//! cost report. During `scan_all` each kind is independently fallible: a
//! failed listing is held in its section of the report and never aborts the
//! sibling listings.

use crate::cost::{build_cost_report, CostReport};
use crate::error::Result;
use crate::model::{ComputeInstance, KeyValueTable, ObjectStoreBucket, StorageVolume};
use crate::provider::CloudInventory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// Outcome of one resource kind's listing within a scan
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Listed { items: Vec<T> },
    Failed { error: String },
}

impl<T> Section<T> {
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Section::Listed { items } => Some(items),
            Section::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Section::Failed { .. })
    }

    fn from_result(kind: &str, result: Result<Vec<T>>) -> Self {
        match result {
            Ok(items) => Section::Listed { items },
            Err(e) => {
                warn!("{} listing failed: {}", kind, e);
                Section::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Snapshot of everything a full scan found
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub volumes: Section<StorageVolume>,
    /// Derived from the orphaned volumes when their listing succeeded
    pub cost: Option<CostReport>,
    pub instances: Section<ComputeInstance>,
    pub buckets: Section<ObjectStoreBucket>,
    pub tables: Section<KeyValueTable>,
    pub timestamp: DateTime<Utc>,
}

/// Retain only truly orphaned volumes.
///
/// The provider-side `status=available` filter is necessary but not
/// sufficient; the attachment list is the ground truth.
pub fn orphaned_volumes(volumes: Vec<StorageVolume>) -> Vec<StorageVolume> {
    volumes.into_iter().filter(|v| v.is_orphaned()).collect()
}

/// List orphaned EBS volumes and price them
pub async fn scan_ebs(
    inventory: &dyn CloudInventory,
) -> Result<(Vec<StorageVolume>, CostReport)> {
    let orphans = orphaned_volumes(inventory.list_available_volumes().await?);
    let report = build_cost_report(&orphans);
    Ok((orphans, report))
}

/// Scan all four resource kinds; each kind fails independently
pub async fn scan_all(inventory: &dyn CloudInventory) -> ScanReport {
    let volumes = Section::from_result(
        "EBS volume",
        inventory
            .list_available_volumes()
            .await
            .map(orphaned_volumes),
    );
    let cost = volumes.items().map(build_cost_report);

    let instances = Section::from_result("EC2 instance", inventory.list_instances().await);
    let buckets = Section::from_result("S3 bucket", inventory.list_buckets().await);
    let tables = Section::from_result("DynamoDB table", inventory.list_tables().await);

    ScanReport {
        volumes,
        cost,
        instances,
        buckets,
        tables,
        timestamp: Utc::now(),
    }
}
