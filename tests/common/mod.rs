//! Shared test fixtures: an in-memory CloudInventory substitute
#![allow(dead_code)]

use async_trait::async_trait;
use reapctl::error::{ReaperError, Result};
use reapctl::model::{
    ComputeInstance, InstanceLifecycle, KeyValueTable, ObjectStoreBucket, StorageVolume,
    VolumeState,
};
use reapctl::provider::CloudInventory;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Listing<T> = std::result::Result<Vec<T>, String>;

/// In-memory inventory with scriptable listings and recorded deletes
pub struct FakeInventory {
    pub volumes: Mutex<Listing<StorageVolume>>,
    pub instances: Mutex<Listing<ComputeInstance>>,
    pub buckets: Mutex<Listing<ObjectStoreBucket>>,
    pub tables: Mutex<Listing<KeyValueTable>>,
    /// Identifiers whose delete call should fail
    pub failing_deletes: Mutex<HashSet<String>>,
    pub deleted: Mutex<Vec<String>>,
    pub volume_list_calls: AtomicUsize,
}

impl Default for FakeInventory {
    fn default() -> Self {
        Self {
            volumes: Mutex::new(Ok(vec![])),
            instances: Mutex::new(Ok(vec![])),
            buckets: Mutex::new(Ok(vec![])),
            tables: Mutex::new(Ok(vec![])),
            failing_deletes: Mutex::new(HashSet::new()),
            deleted: Mutex::new(vec![]),
            volume_list_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volumes(self, volumes: Vec<StorageVolume>) -> Self {
        *self.volumes.lock().unwrap() = Ok(volumes);
        self
    }

    pub fn with_instances(self, instances: Vec<ComputeInstance>) -> Self {
        *self.instances.lock().unwrap() = Ok(instances);
        self
    }

    pub fn with_buckets(self, buckets: Vec<ObjectStoreBucket>) -> Self {
        *self.buckets.lock().unwrap() = Ok(buckets);
        self
    }

    pub fn with_tables(self, tables: Vec<KeyValueTable>) -> Self {
        *self.tables.lock().unwrap() = Ok(tables);
        self
    }

    pub fn with_failing_volumes(self, message: &str) -> Self {
        *self.volumes.lock().unwrap() = Err(message.to_string());
        self
    }

    pub fn with_failing_buckets(self, message: &str) -> Self {
        *self.buckets.lock().unwrap() = Err(message.to_string());
        self
    }

    pub fn with_failing_delete(self, id: &str) -> Self {
        self.failing_deletes.lock().unwrap().insert(id.to_string());
        self
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn delete(&self, id: &str) -> Result<()> {
        if self.failing_deletes.lock().unwrap().contains(id) {
            return Err(ReaperError::aws(format!("delete of {} refused", id)));
        }
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[async_trait]
impl CloudInventory for FakeInventory {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn list_available_volumes(&self) -> Result<Vec<StorageVolume>> {
        self.volume_list_calls.fetch_add(1, Ordering::SeqCst);
        self.volumes
            .lock()
            .unwrap()
            .clone()
            .map_err(ReaperError::aws)
    }

    async fn list_instances(&self) -> Result<Vec<ComputeInstance>> {
        self.instances
            .lock()
            .unwrap()
            .clone()
            .map_err(ReaperError::aws)
    }

    async fn list_buckets(&self) -> Result<Vec<ObjectStoreBucket>> {
        self.buckets
            .lock()
            .unwrap()
            .clone()
            .map_err(ReaperError::aws)
    }

    async fn list_tables(&self) -> Result<Vec<KeyValueTable>> {
        self.tables
            .lock()
            .unwrap()
            .clone()
            .map_err(ReaperError::aws)
    }

    async fn delete_volume(&self, volume_id: &str) -> Result<()> {
        self.delete(volume_id)
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<()> {
        self.delete(instance_id)
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        self.delete(name)
    }

    async fn delete_table(&self, name: &str) -> Result<()> {
        self.delete(name)
    }
}

pub fn orphan_volume(id: &str, size_gb: i32) -> StorageVolume {
    StorageVolume {
        volume_id: id.to_string(),
        size_gb,
        volume_type: "gp2".to_string(),
        state: VolumeState::Available,
        attachments: vec![],
        create_time: None,
        availability_zone: "ap-south-1a".to_string(),
    }
}

pub fn attached_volume(id: &str, size_gb: i32, instance_id: &str) -> StorageVolume {
    StorageVolume {
        attachments: vec![instance_id.to_string()],
        ..orphan_volume(id, size_gb)
    }
}

pub fn instance(id: &str, state: InstanceLifecycle) -> ComputeInstance {
    ComputeInstance {
        instance_id: id.to_string(),
        instance_type: "t3.micro".to_string(),
        state,
    }
}

pub fn bucket(name: &str) -> ObjectStoreBucket {
    ObjectStoreBucket {
        name: name.to_string(),
        created: None,
    }
}

pub fn table(name: &str) -> KeyValueTable {
    KeyValueTable {
        name: name.to_string(),
    }
}
