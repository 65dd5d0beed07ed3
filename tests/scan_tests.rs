//! Scan behavior against a substitute inventory
//!
//! Covers the orphan refinement and the independence of resource-kind
//! sections during a full scan.

mod common;

use common::{attached_volume, bucket, instance, orphan_volume, table, FakeInventory};
use reapctl::model::InstanceLifecycle;
use reapctl::scan::{orphaned_volumes, scan_all, scan_ebs};

#[tokio::test]
async fn test_scan_ebs_prices_orphans() {
    let inventory = FakeInventory::new()
        .with_volumes(vec![orphan_volume("v1", 10), orphan_volume("v2", 25)]);

    let (orphans, cost) = scan_ebs(&inventory).await.unwrap();

    assert_eq!(orphans.len(), 2);
    assert_eq!(cost.items[0].volume_id, "v1");
    assert_eq!(cost.items[0].cost, 1.00);
    assert_eq!(cost.items[1].volume_id, "v2");
    assert_eq!(cost.items[1].cost, 2.50);
    assert_eq!(cost.total, 3.50);
}

#[tokio::test]
async fn test_stale_attachment_is_not_orphaned() {
    // Provider says "available" but an attachment record remains; the
    // attachment list wins.
    let inventory = FakeInventory::new().with_volumes(vec![
        orphan_volume("v1", 10),
        attached_volume("v2", 100, "i-0abc"),
    ]);

    let (orphans, cost) = scan_ebs(&inventory).await.unwrap();

    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].volume_id, "v1");
    assert_eq!(cost.total, 1.00);
}

#[test]
fn test_orphan_filter_preserves_order() {
    let volumes = vec![
        orphan_volume("c", 1),
        attached_volume("x", 1, "i-1"),
        orphan_volume("a", 1),
        orphan_volume("b", 1),
    ];
    let ids: Vec<String> = orphaned_volumes(volumes)
        .into_iter()
        .map(|v| v.volume_id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_empty_listings_produce_empty_report() {
    let inventory = FakeInventory::new();

    let report = scan_all(&inventory).await;

    assert_eq!(report.volumes.items().unwrap().len(), 0);
    assert_eq!(report.cost.as_ref().unwrap().total, 0.0);
    assert!(report.cost.as_ref().unwrap().is_empty());
    assert_eq!(report.instances.items().unwrap().len(), 0);
    assert_eq!(report.buckets.items().unwrap().len(), 0);
    assert_eq!(report.tables.items().unwrap().len(), 0);
}

#[tokio::test]
async fn test_one_kind_failing_does_not_block_others() {
    let inventory = FakeInventory::new()
        .with_volumes(vec![orphan_volume("v1", 10)])
        .with_instances(vec![instance("i-1", InstanceLifecycle::Running)])
        .with_failing_buckets("connection reset")
        .with_tables(vec![table("orders")]);

    let report = scan_all(&inventory).await;

    assert!(report.buckets.is_failed());
    assert_eq!(report.volumes.items().unwrap().len(), 1);
    assert_eq!(report.instances.items().unwrap().len(), 1);
    assert_eq!(report.tables.items().unwrap().len(), 1);
    assert_eq!(report.cost.as_ref().unwrap().total, 1.00);
}

#[tokio::test]
async fn test_failed_volume_listing_leaves_no_cost_report() {
    let inventory = FakeInventory::new()
        .with_failing_volumes("throttled")
        .with_buckets(vec![bucket("logs")]);

    let report = scan_all(&inventory).await;

    assert!(report.volumes.is_failed());
    assert!(report.cost.is_none());
    assert_eq!(report.buckets.items().unwrap().len(), 1);
}
