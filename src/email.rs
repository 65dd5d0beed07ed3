//! SES report delivery
//!
//! Sends the rendered text report as a plain-text email. A delivery failure
//! is surfaced as `ReaperError::DeliveryFailure` and never fails the scan
//! that produced the report.

use crate::config::EmailConfig;
use crate::error::{ReaperError, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;
use tracing::info;

pub const REPORT_SUBJECT: &str = "Cloud Waste Report";

/// Thin wrapper around the SES client
pub struct Mailer {
    client: SesClient,
}

impl Mailer {
    pub async fn new(region: Option<String>) -> Self {
        let region_provider = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(crate::config::DEFAULT_REGION));
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        Self {
            client: SesClient::new(&aws_config),
        }
    }

    /// Send the report body to the configured recipient
    pub async fn send_report(&self, email: &EmailConfig, body: &str) -> Result<()> {
        let subject = Content::builder()
            .data(REPORT_SUBJECT)
            .charset("UTF-8")
            .build()
            .map_err(|e| ReaperError::DeliveryFailure(format!("invalid subject: {}", e)))?;
        let text = Content::builder()
            .data(body)
            .charset("UTF-8")
            .build()
            .map_err(|e| ReaperError::DeliveryFailure(format!("invalid body: {}", e)))?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text).build())
            .build();

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| ReaperError::DeliveryFailure(e.to_string()))?;

        info!("Report emailed to {}", email.to);
        Ok(())
    }
}
