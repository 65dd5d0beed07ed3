//! Typed resource snapshots
//!
//! The provider SDK returns loosely-shaped nested records; everything that
//! crosses into scan or cost logic is converted into these structs first.
//! Conversion happens at the listing boundary (see `providers::aws`), where
//! malformed entries are rejected rather than propagated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// EBS volume state as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeState {
    Creating,
    Available,
    InUse,
    Deleting,
    Error,
    Unknown,
}

impl VolumeState {
    /// Normalize a provider state string
    pub fn parse(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "creating" => VolumeState::Creating,
            "available" => VolumeState::Available,
            "in-use" => VolumeState::InUse,
            "deleting" | "deleted" => VolumeState::Deleting,
            "error" => VolumeState::Error,
            _ => VolumeState::Unknown,
        }
    }
}

impl fmt::Display for VolumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VolumeState::Creating => "creating",
            VolumeState::Available => "available",
            VolumeState::InUse => "in-use",
            VolumeState::Deleting => "deleting",
            VolumeState::Error => "error",
            VolumeState::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// EC2 instance lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceLifecycle {
    Pending,
    Running,
    ShuttingDown,
    Terminated,
    Stopping,
    Stopped,
    Unknown,
}

impl InstanceLifecycle {
    /// Normalize a provider state string
    pub fn parse(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "pending" => InstanceLifecycle::Pending,
            "running" => InstanceLifecycle::Running,
            "shutting-down" => InstanceLifecycle::ShuttingDown,
            "terminated" => InstanceLifecycle::Terminated,
            "stopping" => InstanceLifecycle::Stopping,
            "stopped" => InstanceLifecycle::Stopped,
            _ => InstanceLifecycle::Unknown,
        }
    }
}

impl fmt::Display for InstanceLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceLifecycle::Pending => "pending",
            InstanceLifecycle::Running => "running",
            InstanceLifecycle::ShuttingDown => "shutting-down",
            InstanceLifecycle::Terminated => "terminated",
            InstanceLifecycle::Stopping => "stopping",
            InstanceLifecycle::Stopped => "stopped",
            InstanceLifecycle::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// EBS volume snapshot fetched at scan time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageVolume {
    pub volume_id: String,
    /// Size in whole gigabytes, always positive
    pub size_gb: i32,
    pub volume_type: String,
    pub state: VolumeState,
    /// Instance IDs this volume is attached to. Empty means unattached.
    pub attachments: Vec<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub availability_zone: String,
}

impl StorageVolume {
    /// A volume is orphaned iff it has no attachments AND the provider reports
    /// it as available. Some provider versions report "available" for volumes
    /// with stale attachment records, so the attachment list is the ground truth.
    pub fn is_orphaned(&self) -> bool {
        self.attachments.is_empty() && self.state == VolumeState::Available
    }
}

/// EC2 instance snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeInstance {
    pub instance_id: String,
    pub instance_type: String,
    pub state: InstanceLifecycle,
}

/// S3 bucket snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreBucket {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
}

/// DynamoDB table snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValueTable {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(state: VolumeState, attachments: Vec<String>) -> StorageVolume {
        StorageVolume {
            volume_id: "vol-0123456789abcdef0".to_string(),
            size_gb: 8,
            volume_type: "gp2".to_string(),
            state,
            attachments,
            create_time: None,
            availability_zone: "ap-south-1a".to_string(),
        }
    }

    #[test]
    fn test_orphaned_requires_empty_attachments() {
        // "available" with a stale attachment record is NOT orphaned
        let v = volume(
            VolumeState::Available,
            vec!["i-0123456789abcdef0".to_string()],
        );
        assert!(!v.is_orphaned());
    }

    #[test]
    fn test_orphaned_requires_available_state() {
        let v = volume(VolumeState::InUse, vec![]);
        assert!(!v.is_orphaned());

        let v = volume(VolumeState::Available, vec![]);
        assert!(v.is_orphaned());
    }

    #[test]
    fn test_volume_state_parse() {
        assert_eq!(VolumeState::parse("available"), VolumeState::Available);
        assert_eq!(VolumeState::parse("in-use"), VolumeState::InUse);
        assert_eq!(VolumeState::parse("AVAILABLE"), VolumeState::Available);
        assert_eq!(VolumeState::parse("weird"), VolumeState::Unknown);
    }

    #[test]
    fn test_instance_lifecycle_parse() {
        assert_eq!(InstanceLifecycle::parse("running"), InstanceLifecycle::Running);
        assert_eq!(
            InstanceLifecycle::parse("shutting-down"),
            InstanceLifecycle::ShuttingDown
        );
        assert_eq!(InstanceLifecycle::parse("gone"), InstanceLifecycle::Unknown);
    }

    #[test]
    fn test_lifecycle_display_round_trip() {
        for state in [
            InstanceLifecycle::Pending,
            InstanceLifecycle::Running,
            InstanceLifecycle::ShuttingDown,
            InstanceLifecycle::Terminated,
            InstanceLifecycle::Stopping,
            InstanceLifecycle::Stopped,
        ] {
            assert_eq!(InstanceLifecycle::parse(&state.to_string()), state);
        }
    }
}
