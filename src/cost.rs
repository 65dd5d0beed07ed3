//! Cost estimation for orphaned storage
//!
//! Monthly cost is a deterministic function of size only: `size_gb * 0.10`.
//! The report total is the sum of exact per-item costs; two-decimal rounding
//! happens at render time only, so the total never accumulates rounding error.

use crate::model::StorageVolume;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat monthly price per provisioned GB
pub const UNIT_PRICE_PER_GB_MONTH: f64 = 0.10;

/// One volume's line in the cost report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLine {
    pub volume_id: String,
    pub size_gb: i32,
    pub volume_type: String,
    pub cost: f64,
    pub create_time: Option<DateTime<Utc>>,
}

/// Per-volume costs plus the exact-sum total, ordered as listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    pub items: Vec<CostLine>,
    pub total: f64,
}

impl CostReport {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Estimated monthly cost of a volume of the given size
pub fn volume_cost(size_gb: i32) -> f64 {
    f64::from(size_gb.max(0)) * UNIT_PRICE_PER_GB_MONTH
}

/// Build a cost report over the given volumes, preserving input order
pub fn build_cost_report(volumes: &[StorageVolume]) -> CostReport {
    let mut total = 0.0;
    let mut items = Vec::with_capacity(volumes.len());

    for volume in volumes {
        let cost = volume_cost(volume.size_gb);
        total += cost;
        items.push(CostLine {
            volume_id: volume.volume_id.clone(),
            size_gb: volume.size_gb,
            volume_type: volume.volume_type.clone(),
            cost,
            create_time: volume.create_time,
        });
    }

    CostReport { items, total }
}
