//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::errors::AdminError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration or catalog file error
    ConfigError,
    /// I/O error (files, stdin/stdout)
    IoError,
    /// Records input is not a JSON array of objects
    InvalidRecords,
    /// Resolution or rendering rejected the request
    Admin(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ADMIN_CLI_CONFIG_ERROR",
            Self::IoError => "ADMIN_CLI_IO_ERROR",
            Self::InvalidRecords => "ADMIN_CLI_INVALID_RECORDS",
            Self::Admin(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_records(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRecords, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<AdminError> for CliError {
    fn from(e: AdminError) -> Self {
        match e {
            AdminError::InvalidConfig(message) => Self::config_error(message),
            other => Self::new(CliErrorCode::Admin(other.code()), other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_errors_keep_their_code() {
        let err: CliError = AdminError::unknown_field("Fan", "nope").into();
        assert_eq!(err.code_str(), "ADMIN_UNKNOWN_FIELD");
        assert!(err.to_string().contains("nope"));

        let err: CliError = AdminError::invalid_config("bad").into();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert_eq!(err.message(), "bad");
    }
}
