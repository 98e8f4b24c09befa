//! # Error Types
//!
//! Structured error types for mixte_core. Every failure a user can trigger
//! (bad form value, unknown profile, refused email, unreadable session file)
//! maps to one variant carrying enough context to render an alert.
//!
//! ## Example
//!
//! ```rust
//! use mixte_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_mm: f64) -> CalcResult<()> {
//!     if span_mm <= 0.0 {
//!         return Err(CalcError::invalid_input("span_mm", span_mm.to_string(), "must be positive"));
//!     }
//!     Ok(())
//! }
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mixte_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type shared by the calculators, the access gate and
/// the session stores.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (not a number, not positive, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Profile, grade, deck or class not found in the reference tables
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Calculation cannot be carried out with the given values
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Email refused by the allow-list
    #[error("Access denied for '{email}'")]
    AccessDenied { email: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Session file is being written by another process
    #[error("File locked: '{path}'")]
    FileLocked { path: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create an AccessDenied error
    pub fn access_denied(email: impl Into<String>) -> Self {
        CalcError::AccessDenied {
            email: email.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>) -> Self {
        CalcError::FileLocked { path: path.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CalcError::ConfigError {
            message: message.into(),
        }
    }

    /// Errors caused by what the user typed, shown as a blocking alert
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::AccessDenied { .. }
        )
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::AccessDenied { .. } => "ACCESS_DENIED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

impl From<figment::Error> for CalcError {
    fn from(e: figment::Error) -> Self {
        CalcError::ConfigError { message: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("hc", "-5", "must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::material_not_found("IPE 999").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::access_denied("x@y.z").error_code(), "ACCESS_DENIED");
        assert_eq!(CalcError::config("bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_user_input_errors() {
        assert!(CalcError::missing_field("span").is_user_input());
        assert!(CalcError::access_denied("a@b.c").is_user_input());
        assert!(!CalcError::file_error("read", "/tmp/x", "denied").is_user_input());
    }

    #[test]
    fn test_display_message() {
        let err = CalcError::invalid_input("span", "abc", "not a number");
        assert_eq!(err.to_string(), "Invalid input for 'span': abc - not a number");
    }
}
