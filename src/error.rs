//! Error types for reapctl
//!
//! This module defines the error handling strategy for reapctl. There are two
//! error types: `ReaperError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `ReaperError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling. The conversion
//! happens at the CLI boundary using `anyhow::Error::from` to preserve error chains.
//!
//! No operation is retried. Every provider failure is terminal for that single
//! operation; callers report it and continue with the next requested operation.
//! During a full scan, one resource kind's failure is held in its report section
//! and never aborts the sibling listings.
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: Configuration parsing and validation issues
//!   - Automatically converted to `ReaperError::Config` via `#[from]`
//!
//! - `ProviderUnavailable`: cloud API failures (network, auth, throttling)
//!   - Use when a listing or delete call could not reach the provider
//!
//! - `ResourceNotFound`: delete target no longer exists in the inventory
//!
//! - `DeliveryFailure`: the report email could not be sent via SES
//!   - Never fails the scan that produced the report
//!
//! - `Validation`: Input validation failures (identifiers, sizes, etc.)

use crate::provider::ResourceId;
use thiserror::Error;

/// Main error type for reapctl
#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider unavailable: {provider} - {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Resource not found: {resource_type} - {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: ResourceId,
    },

    #[error("Report delivery failed: {0}")]
    DeliveryFailure(String),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReaperError {
    /// Shorthand for an AWS API failure
    pub fn aws(message: impl Into<String>) -> Self {
        ReaperError::ProviderUnavailable {
            provider: "aws".to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReaperError>;
