//! Destructive operations
//!
//! Single deletes are one irreversible provider call keyed by identifier.
//! The delete-all variants re-list immediately before issuing per-item
//! deletes (no snapshot reuse), so a resource that changed state between
//! listing and deletion fails on its own; such failures are reported per
//! item and do not abort the remaining deletions.
//!
//! `--dry-run` suppresses the destructive calls themselves and prints the
//! would-delete set. A resource could still be deleted or reattached by
//! someone else between the re-list and the delete; there is no conflict
//! detection (see DESIGN.md).

use crate::cost::build_cost_report;
use crate::error::Result;
use crate::provider::CloudInventory;
use crate::report::total_line;
use crate::scan::orphaned_volumes;
use tracing::info;

/// Per-item results of a delete-all pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReapOutcome {
    pub deleted: usize,
    pub failed: usize,
}

/// Delete one EBS volume
pub async fn delete_volume(inventory: &dyn CloudInventory, volume_id: &str) -> Result<()> {
    info!("Deleting volume {}", volume_id);
    inventory.delete_volume(volume_id).await?;
    println!("EBS volume {} deleted successfully", volume_id);
    Ok(())
}

/// Terminate one EC2 instance
pub async fn delete_instance(inventory: &dyn CloudInventory, instance_id: &str) -> Result<()> {
    info!("Terminating instance {}", instance_id);
    inventory.terminate_instance(instance_id).await?;
    println!("EC2 instance {} terminated successfully", instance_id);
    Ok(())
}

/// Delete one S3 bucket
pub async fn delete_bucket(inventory: &dyn CloudInventory, name: &str) -> Result<()> {
    info!("Deleting bucket {}", name);
    inventory.delete_bucket(name).await?;
    println!("S3 bucket {} deleted successfully", name);
    Ok(())
}

/// Delete one DynamoDB table
pub async fn delete_table(inventory: &dyn CloudInventory, name: &str) -> Result<()> {
    info!("Deleting table {}", name);
    inventory.delete_table(name).await?;
    println!("DynamoDB table {} deleted successfully", name);
    Ok(())
}

/// Delete every orphaned EBS volume
pub async fn reap_all_volumes(
    inventory: &dyn CloudInventory,
    dry_run: bool,
) -> Result<ReapOutcome> {
    let orphans = orphaned_volumes(inventory.list_available_volumes().await?);

    if orphans.is_empty() {
        println!("No orphaned EBS volumes found");
        return Ok(ReapOutcome::default());
    }

    let cost = build_cost_report(&orphans);

    if dry_run {
        println!("[DRY RUN] Would delete {} volume(s):", orphans.len());
        for volume in &orphans {
            println!("  - {} ({} GB)", volume.volume_id, volume.size_gb);
        }
        println!("{}", total_line(cost.total));
        return Ok(ReapOutcome::default());
    }

    let mut outcome = ReapOutcome::default();
    for volume in &orphans {
        match inventory.delete_volume(&volume.volume_id).await {
            Ok(()) => {
                println!("EBS volume {} deleted successfully", volume.volume_id);
                outcome.deleted += 1;
            }
            Err(e) => {
                println!("Error: failed to delete volume {}: {}", volume.volume_id, e);
                outcome.failed += 1;
            }
        }
    }

    println!(
        "Reaped {} volume(s), {} failed. Estimated savings: ${:.2}/month",
        outcome.deleted, outcome.failed, cost.total
    );
    Ok(outcome)
}

/// Terminate every non-terminated EC2 instance
pub async fn reap_all_instances(
    inventory: &dyn CloudInventory,
    dry_run: bool,
) -> Result<ReapOutcome> {
    let instances = inventory.list_instances().await?;

    if instances.is_empty() {
        println!("No EC2 instances found");
        return Ok(ReapOutcome::default());
    }

    if dry_run {
        println!("[DRY RUN] Would terminate {} instance(s):", instances.len());
        for instance in &instances {
            println!("  - {} ({})", instance.instance_id, instance.instance_type);
        }
        return Ok(ReapOutcome::default());
    }

    let mut outcome = ReapOutcome::default();
    for instance in &instances {
        match inventory.terminate_instance(&instance.instance_id).await {
            Ok(()) => {
                println!(
                    "EC2 instance {} terminated successfully",
                    instance.instance_id
                );
                outcome.deleted += 1;
            }
            Err(e) => {
                println!(
                    "Error: failed to terminate instance {}: {}",
                    instance.instance_id, e
                );
                outcome.failed += 1;
            }
        }
    }

    println!(
        "Terminated {} instance(s), {} failed",
        outcome.deleted, outcome.failed
    );
    Ok(outcome)
}

/// Delete every DynamoDB table
pub async fn reap_all_tables(
    inventory: &dyn CloudInventory,
    dry_run: bool,
) -> Result<ReapOutcome> {
    let tables = inventory.list_tables().await?;

    if tables.is_empty() {
        println!("No DynamoDB tables found");
        return Ok(ReapOutcome::default());
    }

    if dry_run {
        println!("[DRY RUN] Would delete {} table(s):", tables.len());
        for table in &tables {
            println!("  - {}", table.name);
        }
        return Ok(ReapOutcome::default());
    }

    let mut outcome = ReapOutcome::default();
    for table in &tables {
        match inventory.delete_table(&table.name).await {
            Ok(()) => {
                println!("DynamoDB table {} deleted successfully", table.name);
                outcome.deleted += 1;
            }
            Err(e) => {
                println!("Error: failed to delete table {}: {}", table.name, e);
                outcome.failed += 1;
            }
        }
    }

    println!(
        "Deleted {} table(s), {} failed",
        outcome.deleted, outcome.failed
    );
    Ok(outcome)
}
