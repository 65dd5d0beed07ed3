//! Event-driven entry point
//!
//! The Lambda handler accepts a structured event with a `scan_all` flag. On
//! true it performs the full scan, renders the text report, emails it when a
//! recipient is configured, and returns the status code plus the report body.
//! A delivery failure is logged but does not fail the scan.

use crate::config::EmailConfig;
use crate::email::Mailer;
use crate::error::Result;
use crate::provider::CloudInventory;
use crate::report::render_scan_report;
use crate::scan::scan_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Incoming scan request
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReaperEvent {
    #[serde(default)]
    pub scan_all: bool,
}

/// Handler response: status code and the rendered report body
#[derive(Debug, Clone, Serialize)]
pub struct ReaperResponse {
    pub status_code: u16,
    pub body: String,
}

/// Run the scan requested by the event
pub async fn handle(
    inventory: &dyn CloudInventory,
    mailer: &Mailer,
    email: Option<&EmailConfig>,
    event: ReaperEvent,
) -> Result<ReaperResponse> {
    if !event.scan_all {
        return Ok(ReaperResponse {
            status_code: 400,
            body: "No operation requested; set \"scan_all\": true".to_string(),
        });
    }

    info!("Running full scan");
    let report = scan_all(inventory).await;
    let body = render_scan_report(&report);

    match email {
        Some(cfg) => {
            if let Err(e) = mailer.send_report(cfg, &body).await {
                warn!("Error: {}", e);
            }
        }
        None => info!("No recipient configured; skipping email delivery"),
    }

    Ok(ReaperResponse {
        status_code: 200,
        body,
    })
}
