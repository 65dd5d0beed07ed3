//! Report rendering
//!
//! Grid tables per resource kind plus the total-savings line. Tables are
//! rendered to plain strings so the same report body can be printed, emailed,
//! or returned from the Lambda handler. Costs are rounded to two decimals
//! here and nowhere else.

use crate::cost::CostReport;
use crate::model::{ComputeInstance, KeyValueTable, ObjectStoreBucket};
use crate::scan::{ScanReport, Section};
use chrono::{DateTime, Utc};
use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;

fn format_created(created: &Option<DateTime<Utc>>) -> String {
    created
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn grid_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(header);
    table
}

/// Render the orphaned-volume cost table
pub fn render_volume_table(report: &CostReport) -> String {
    let mut table = grid_table(vec!["ID", "Size(GB)", "Type", "Cost($)", "Created"]);
    for line in &report.items {
        table.add_row(vec![
            line.volume_id.clone(),
            line.size_gb.to_string(),
            line.volume_type.clone(),
            format!("{:.2}", line.cost),
            format_created(&line.create_time),
        ]);
    }
    table.to_string()
}

/// Render the EC2 instance table
pub fn render_instance_table(instances: &[ComputeInstance]) -> String {
    let mut table = grid_table(vec!["ID", "Type", "State"]);
    for instance in instances {
        table.add_row(vec![
            instance.instance_id.clone(),
            instance.instance_type.clone(),
            instance.state.to_string(),
        ]);
    }
    table.to_string()
}

/// Render the S3 bucket table
pub fn render_bucket_table(buckets: &[ObjectStoreBucket]) -> String {
    let mut table = grid_table(vec!["Name", "Created"]);
    for bucket in buckets {
        table.add_row(vec![bucket.name.clone(), format_created(&bucket.created)]);
    }
    table.to_string()
}

/// Render the DynamoDB table listing
pub fn render_kv_table(tables: &[KeyValueTable]) -> String {
    let mut table = grid_table(vec!["Name"]);
    for t in tables {
        table.add_row(vec![t.name.clone()]);
    }
    table.to_string()
}

/// The total-savings line, plain text
pub fn total_line(total: f64) -> String {
    format!("TOTAL WASTED CASH: ${:.2}", total)
}

fn push_section<T>(
    out: &mut String,
    title: &str,
    section: &Section<T>,
    render: impl Fn(&[T]) -> String,
) {
    out.push_str(title);
    out.push('\n');
    match section {
        Section::Listed { items } => {
            out.push_str(&render(items));
            out.push('\n');
        }
        Section::Failed { error } => {
            out.push_str(&format!("Error: {}\n", error));
        }
    }
    out.push('\n');
}

/// Render the full four-section report as plain text.
///
/// Failed sections carry an "Error:" marker; the other sections still render.
/// This body is what `scan all` prints and what the Lambda handler emails.
pub fn render_scan_report(report: &ScanReport) -> String {
    let mut out = String::new();

    out.push_str("EBS Volumes:\n");
    match (&report.volumes, &report.cost) {
        (Section::Listed { .. }, Some(cost)) => {
            out.push_str(&render_volume_table(cost));
            out.push('\n');
            out.push_str(&total_line(cost.total));
            out.push('\n');
        }
        (Section::Failed { error }, _) => {
            out.push_str(&format!("Error: {}\n", error));
        }
        // a successful listing always carries a cost report
        (Section::Listed { .. }, None) => {}
    }
    out.push('\n');

    push_section(&mut out, "EC2 Instances:", &report.instances, |items| {
        render_instance_table(items)
    });
    push_section(&mut out, "S3 Buckets:", &report.buckets, |items| {
        render_bucket_table(items)
    });
    push_section(&mut out, "DynamoDB Tables:", &report.tables, |items| {
        render_kv_table(items)
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::build_cost_report;
    use crate::model::{InstanceLifecycle, StorageVolume, VolumeState};

    fn volume(id: &str, size_gb: i32) -> StorageVolume {
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

    #[test]
    fn test_volume_table_rounds_at_render_time() {
        // 3 GB at $0.10 -> 0.30000000000000004 internally, 0.30 displayed
        let report = build_cost_report(&[volume("vol-1", 3)]);
        let rendered = render_volume_table(&report);
        assert!(rendered.contains("0.30"));
        assert!(rendered.contains("vol-1"));
    }

    #[test]
    fn test_total_line_formatting() {
        assert_eq!(total_line(3.5), "TOTAL WASTED CASH: $3.50");
        assert_eq!(total_line(0.0), "TOTAL WASTED CASH: $0.00");
    }

    #[test]
    fn test_instance_table_contains_state() {
        let instances = vec![ComputeInstance {
            instance_id: "i-0abc".to_string(),
            instance_type: "t3.micro".to_string(),
            state: InstanceLifecycle::Stopped,
        }];
        let rendered = render_instance_table(&instances);
        assert!(rendered.contains("i-0abc"));
        assert!(rendered.contains("stopped"));
    }

    #[test]
    fn test_empty_tables_render_headers_only() {
        let rendered = render_bucket_table(&[]);
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Created"));
    }
}
