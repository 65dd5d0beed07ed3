use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use reapctl::config::{init_config, Config};
use reapctl::email::Mailer;
use reapctl::error::{ReaperError, Result};
use reapctl::exit_codes::{codes, exit_code_for_error};
use reapctl::provider::CloudInventory;
use reapctl::providers::AwsInventory;
use reapctl::{reap, report, scan};

#[derive(Parser)]
#[command(name = "reapctl")]
#[command(
    about = "Cloud waste reaper for idle AWS resources",
    long_about = "reapctl finds and reaps idle AWS resources.\n\nSupports:\n  - Orphaned EBS volumes (with monthly cost estimate)\n  - EC2 instances\n  - S3 buckets\n  - DynamoDB tables\n\nFeatures:\n  - Per-kind scans or a full scan with independent failure reporting\n  - Bulk deletion with per-item results and dry-run\n  - Emailed cost report via SES"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// AWS region (overrides config)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for idle resources
    Scan {
        /// Resource kind to scan
        #[arg(value_enum, default_value = "all")]
        kind: ScanKind,
    },
    /// Delete a single resource by identifier (irreversible)
    Delete {
        #[command(subcommand)]
        target: DeleteTarget,
    },
    /// Re-list and delete every matching resource of a kind (irreversible)
    DeleteAll {
        /// Resource kind to reap
        #[arg(value_enum)]
        kind: ReapKind,
        /// Show what would be deleted without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Build the full scan report and optionally email it
    Report {
        /// Send the report via SES to the configured recipient
        #[arg(long)]
        email: bool,
    },
    /// Initialize configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".reapctl.toml")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScanKind {
    Ebs,
    Ec2,
    S3,
    Dynamo,
    All,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReapKind {
    Ebs,
    Ec2,
    Dynamo,
}

#[derive(Subcommand)]
enum DeleteTarget {
    /// Delete an EBS volume by ID
    Ebs {
        /// Volume ID (vol-...)
        volume_id: String,
    },
    /// Terminate an EC2 instance by ID
    Ec2 {
        /// Instance ID (i-...)
        instance_id: String,
    },
    /// Delete an S3 bucket by name (must be empty)
    S3 {
        /// Bucket name
        bucket: String,
    },
    /// Delete a DynamoDB table by name
    Dynamo {
        /// Table name
        table: String,
    },
}

fn print_total(total: f64) {
    println!("{}", style(report::total_line(total)).red().bold());
}

async fn scan_command(inventory: &dyn CloudInventory, kind: ScanKind, output: &str) -> Result<()> {
    match kind {
        ScanKind::Ebs => {
            let (_, cost) = scan::scan_ebs(inventory).await?;
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&cost)?);
            } else {
                println!("{}", report::render_volume_table(&cost));
                print_total(cost.total);
            }
        }
        ScanKind::Ec2 => {
            let instances = inventory.list_instances().await?;
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&instances)?);
            } else {
                println!("{}", report::render_instance_table(&instances));
            }
        }
        ScanKind::S3 => {
            let buckets = inventory.list_buckets().await?;
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&buckets)?);
            } else {
                println!("{}", report::render_bucket_table(&buckets));
            }
        }
        ScanKind::Dynamo => {
            let tables = inventory.list_tables().await?;
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&tables)?);
            } else {
                println!("{}", report::render_kv_table(&tables));
            }
        }
        ScanKind::All => {
            let full = scan::scan_all(inventory).await;
            if output == "json" {
                println!("{}", serde_json::to_string_pretty(&full)?);
            } else {
                print!("{}", report::render_scan_report(&full));
            }
        }
    }
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let region = cli.region.clone().unwrap_or_else(|| config.region.clone());
    let inventory = AwsInventory::new(Some(region.clone())).await;

    match cli.command {
        Commands::Scan { kind } => scan_command(&inventory, kind, &cli.output).await?,
        Commands::Delete { target } => match target {
            DeleteTarget::Ebs { volume_id } => reap::delete_volume(&inventory, &volume_id).await?,
            DeleteTarget::Ec2 { instance_id } => {
                reap::delete_instance(&inventory, &instance_id).await?
            }
            DeleteTarget::S3 { bucket } => reap::delete_bucket(&inventory, &bucket).await?,
            DeleteTarget::Dynamo { table } => reap::delete_table(&inventory, &table).await?,
        },
        Commands::DeleteAll { kind, dry_run } => {
            match kind {
                ReapKind::Ebs => reap::reap_all_volumes(&inventory, dry_run).await?,
                ReapKind::Ec2 => reap::reap_all_instances(&inventory, dry_run).await?,
                ReapKind::Dynamo => reap::reap_all_tables(&inventory, dry_run).await?,
            };
        }
        Commands::Report { email } => {
            let full = scan::scan_all(&inventory).await;
            let body = report::render_scan_report(&full);
            print!("{}", body);

            if email {
                let email_cfg = config.email.as_ref().ok_or_else(|| ReaperError::Validation {
                    field: "email".to_string(),
                    reason: "no recipient configured; set email.to in the config or REAPCTL_EMAIL_TO"
                        .to_string(),
                })?;
                let mailer = Mailer::new(Some(region)).await;
                mailer.send_report(email_cfg, &body).await?;
                println!("Report emailed to {}", email_cfg.to);
            }
        }
        Commands::Init { path } => {
            init_config(&path).map_err(|e| ReaperError::Validation {
                field: "config".to_string(),
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging - suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config
    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(codes::CONFIG_ERROR);
        }
    };

    // Execute command; a failure is terminal for this invocation only
    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }
}
