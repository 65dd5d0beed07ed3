//! Exit code standardization for reapctl
//!
//! Provides consistent exit codes for different error types to enable
//! reliable programmatic error detection by scripts and schedulers.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, validation failure, resource not found)
//! - `2` = System error (AWS API failure, delivery failure, I/O error)
//! - `3` = Configuration error (missing config, invalid values, config parse error)

use crate::error::ReaperError;

/// Standard exit codes for reapctl
pub mod codes {
    /// Success
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (AWS API failure, network error)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (missing config, invalid credentials)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a ReaperError to an appropriate exit code
pub fn exit_code_for_error(error: &ReaperError) -> i32 {
    use ReaperError::*;
    match error {
        // Configuration errors
        Config(_) => codes::CONFIG_ERROR,

        // User errors (invalid input, missing delete targets)
        Validation { .. } => codes::USER_ERROR,
        ResourceNotFound { .. } => codes::USER_ERROR,

        // System errors (cloud provider, delivery, I/O)
        ProviderUnavailable { .. } => codes::SYSTEM_ERROR,
        DeliveryFailure(_) => codes::SYSTEM_ERROR,
        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            exit_code_for_error(&ReaperError::aws("boom")),
            codes::SYSTEM_ERROR
        );
        assert_eq!(
            exit_code_for_error(&ReaperError::ResourceNotFound {
                resource_type: "table".to_string(),
                resource_id: "orders".to_string(),
            }),
            codes::USER_ERROR
        );
        assert_eq!(
            exit_code_for_error(&ReaperError::Config(ConfigError::MissingField(
                "region".to_string()
            ))),
            codes::CONFIG_ERROR
        );
        assert_eq!(
            exit_code_for_error(&ReaperError::DeliveryFailure("ses down".to_string())),
            codes::SYSTEM_ERROR
        );
    }
}
