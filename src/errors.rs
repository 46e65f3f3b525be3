//! Error types for configuration, resolution and rendering
//!
//! Error codes:
//! - ADMIN_UNKNOWN_FIELD (FATAL for the model being resolved)
//! - ADMIN_UNKNOWN_MODEL (REJECT)
//! - ADMIN_PREDICATE_FAILED (REJECT)
//! - ADMIN_FORMATTER_FAILED (REJECT)
//! - ADMIN_INVALID_CONFIG (FATAL)
//! - ADMIN_INVALID_RECORD (REJECT)

use std::fmt;

use thiserror::Error;

use crate::rules::EvalError;

/// Severity levels for admin errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request (one list render) is rejected
    Reject,
    /// The configuration itself is unusable and must be fixed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Errors raised while building, resolving or rendering list configuration
#[derive(Debug, Error)]
pub enum AdminError {
    /// A rule names an attribute the model does not have
    #[error("Unknown field '{field}' on model '{model}'")]
    UnknownField { model: String, field: String },

    /// No model with this name is known to the model provider
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    /// A field predicate raised while being evaluated
    #[error("Predicate failed on field '{field}' of model '{model}': {source}")]
    PredicateFailed {
        model: String,
        field: String,
        #[source]
        source: EvalError,
    },

    /// A value formatter raised while producing a cell
    #[error("Formatter failed on field '{field}': {source}")]
    FormatterFailed {
        field: String,
        #[source]
        source: EvalError,
    },

    /// Configuration or catalog could not be read or is malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record handed to the renderer is not an object
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl AdminError {
    /// Create an unknown field error
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        AdminError::UnknownField {
            model: model.into(),
            field: field.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AdminError::InvalidConfig(message.into())
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            AdminError::UnknownField { .. } => "ADMIN_UNKNOWN_FIELD",
            AdminError::UnknownModel(_) => "ADMIN_UNKNOWN_MODEL",
            AdminError::PredicateFailed { .. } => "ADMIN_PREDICATE_FAILED",
            AdminError::FormatterFailed { .. } => "ADMIN_FORMATTER_FAILED",
            AdminError::InvalidConfig(_) => "ADMIN_INVALID_CONFIG",
            AdminError::InvalidRecord(_) => "ADMIN_INVALID_RECORD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            AdminError::UnknownField { .. } | AdminError::InvalidConfig(_) => Severity::Fatal,
            _ => Severity::Reject,
        }
    }

    /// Returns whether this error means the configuration must be fixed
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;
