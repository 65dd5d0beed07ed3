//! AWS implementation of the cloud inventory
//!
//! Converts the SDK's loosely-shaped records into the typed snapshots in
//! `crate::model` at the listing boundary. Records missing mandatory fields
//! (volume ID, positive size) are quarantined with a warning instead of
//! flowing into cost logic.

use crate::error::{ReaperError, Result};
use crate::model::{
    ComputeInstance, InstanceLifecycle, KeyValueTable, ObjectStoreBucket, StorageVolume,
    VolumeState,
};
use crate::provider::CloudInventory;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_sdk_ec2::types::Filter;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_s3::Client as S3Client;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Instance lifecycle states the scan asks the provider for. Everything
/// except "terminated".
const SCANNED_INSTANCE_STATES: [&str; 5] =
    ["pending", "running", "shutting-down", "stopping", "stopped"];

/// Cloud inventory backed by the AWS SDK
pub struct AwsInventory {
    ec2: Ec2Client,
    s3: S3Client,
    dynamodb: DynamoClient,
}

impl AwsInventory {
    /// Build clients against the given region, falling back to the
    /// environment's default provider chain, then `ap-south-1`.
    pub async fn new(region: Option<String>) -> Self {
        let region_provider = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(crate::config::DEFAULT_REGION));
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        Self {
            ec2: Ec2Client::new(&aws_config),
            s3: S3Client::new(&aws_config),
            dynamodb: DynamoClient::new(&aws_config),
        }
    }
}

fn smithy_to_chrono(t: &aws_sdk_ec2::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(t.secs(), 0)
}

/// Convert one SDK volume record, rejecting malformed entries
fn volume_from_sdk(volume: &aws_sdk_ec2::types::Volume) -> Option<StorageVolume> {
    let volume_id = match volume.volume_id() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            warn!("Skipping volume record without an ID");
            return None;
        }
    };

    let size_gb = match volume.size() {
        Some(size) if size > 0 => size,
        other => {
            warn!(
                "Skipping volume {} with invalid size {:?}",
                volume_id, other
            );
            return None;
        }
    };

    let attachments = volume
        .attachments()
        .iter()
        .filter_map(|a| a.instance_id().map(|id| id.to_string()))
        .collect();

    Some(StorageVolume {
        volume_id,
        size_gb,
        volume_type: volume
            .volume_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        state: volume
            .state()
            .map(|s| VolumeState::parse(s.as_str()))
            .unwrap_or(VolumeState::Unknown),
        attachments,
        create_time: volume.create_time().and_then(smithy_to_chrono),
        availability_zone: volume
            .availability_zone()
            .unwrap_or("unknown")
            .to_string(),
    })
}

fn instance_from_sdk(instance: &aws_sdk_ec2::types::Instance) -> Option<ComputeInstance> {
    let instance_id = match instance.instance_id() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            warn!("Skipping instance record without an ID");
            return None;
        }
    };

    Some(ComputeInstance {
        instance_id,
        instance_type: instance
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        state: instance
            .state()
            .and_then(|s| s.name())
            .map(|n| InstanceLifecycle::parse(n.as_str()))
            .unwrap_or(InstanceLifecycle::Unknown),
    })
}

#[async_trait]
impl CloudInventory for AwsInventory {
    fn name(&self) -> &'static str {
        "aws"
    }

    async fn list_available_volumes(&self) -> Result<Vec<StorageVolume>> {
        let response = self
            .ec2
            .describe_volumes()
            .filters(
                Filter::builder()
                    .name("status")
                    .values("available")
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ReaperError::aws(format!("Failed to list EBS volumes: {}", e)))?;

        Ok(response.volumes().iter().filter_map(volume_from_sdk).collect())
    }

    async fn list_instances(&self) -> Result<Vec<ComputeInstance>> {
        let mut filter = Filter::builder().name("instance-state-name");
        for state in SCANNED_INSTANCE_STATES {
            filter = filter.values(state);
        }

        let response = self
            .ec2
            .describe_instances()
            .filters(filter.build())
            .send()
            .await
            .map_err(|e| ReaperError::aws(format!("Failed to list EC2 instances: {}", e)))?;

        Ok(response
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .filter_map(instance_from_sdk)
            .collect())
    }

    async fn list_buckets(&self) -> Result<Vec<ObjectStoreBucket>> {
        let response = self
            .s3
            .list_buckets()
            .send()
            .await
            .map_err(|e| ReaperError::aws(format!("Failed to list S3 buckets: {}", e)))?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|b| {
                b.name().map(|name| ObjectStoreBucket {
                    name: name.to_string(),
                    created: b.creation_date().and_then(smithy_to_chrono),
                })
            })
            .collect())
    }

    async fn list_tables(&self) -> Result<Vec<KeyValueTable>> {
        let response = self
            .dynamodb
            .list_tables()
            .send()
            .await
            .map_err(|e| ReaperError::aws(format!("Failed to list DynamoDB tables: {}", e)))?;

        Ok(response
            .table_names()
            .iter()
            .map(|name| KeyValueTable { name: name.clone() })
            .collect())
    }

    async fn delete_volume(&self, volume_id: &str) -> Result<()> {
        self.ec2
            .delete_volume()
            .volume_id(volume_id)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.code() == Some("InvalidVolume.NotFound") {
                    ReaperError::ResourceNotFound {
                        resource_type: "volume".to_string(),
                        resource_id: volume_id.to_string(),
                    }
                } else {
                    ReaperError::aws(format!(
                        "Failed to delete volume {}: {}",
                        volume_id, service_err
                    ))
                }
            })?;
        Ok(())
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<()> {
        self.ec2
            .terminate_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.code() == Some("InvalidInstanceID.NotFound") {
                    ReaperError::ResourceNotFound {
                        resource_type: "instance".to_string(),
                        resource_id: instance_id.to_string(),
                    }
                } else {
                    ReaperError::aws(format!(
                        "Failed to terminate instance {}: {}",
                        instance_id, service_err
                    ))
                }
            })?;
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        self.s3
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.code() == Some("NoSuchBucket") {
                    ReaperError::ResourceNotFound {
                        resource_type: "bucket".to_string(),
                        resource_id: name.to_string(),
                    }
                } else {
                    ReaperError::aws(format!("Failed to delete bucket {}: {}", name, service_err))
                }
            })?;
        Ok(())
    }

    async fn delete_table(&self, name: &str) -> Result<()> {
        self.dynamodb
            .delete_table()
            .table_name(name)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_resource_not_found_exception() {
                    ReaperError::ResourceNotFound {
                        resource_type: "table".to_string(),
                        resource_id: name.to_string(),
                    }
                } else {
                    ReaperError::aws(format!("Failed to delete table {}: {}", name, service_err))
                }
            })?;
        Ok(())
    }
}
