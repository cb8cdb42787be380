//! # Error Types
//!
//! Structured error types for emis_core. The calculator itself is pure
//! arithmetic and only ever fails on degenerate input, so most variants
//! carry enough context for a caller to fix the offending field.
//!
//! ## Example
//!
//! ```rust
//! use emis_core::errors::{CalcError, CalcResult};
//!
//! fn validate_heating_value(qr: f64) -> CalcResult<()> {
//!     if qr <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "lower_heating_value",
//!             qr.to_string(),
//!             "Lower heating value must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for emis_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and report operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-physical, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error (report export)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Generic internal error (Typst compilation, PDF encoding)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input(
            "lower_heating_value",
            "-24.0",
            "Lower heating value must be positive",
        );
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_input("f", "v", "r").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            CalcError::file_error("write", "/tmp/x.pdf", "denied").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::invalid_input("combustibles_in_ash", "100", "must be below 100 %");
        let msg = error.to_string();
        assert!(msg.contains("combustibles_in_ash"));
        assert!(msg.contains("must be below 100 %"));
    }
}
