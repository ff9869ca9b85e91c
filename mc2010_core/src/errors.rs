//! # Error Types
//!
//! Structured error types for mc2010_core. Errors carry enough context
//! (field name, offending value, reason) for a caller to fix the input
//! without reading the source.
//!
//! ## Example
//!
//! ```rust
//! use mc2010_core::errors::{CalcError, CalcResult};
//!
//! fn validate_wall_diameter(d_k: f64) -> CalcResult<()> {
//!     if d_k <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "d_k",
//!             d_k.to_string(),
//!             "Inscribed circle diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_wall_diameter(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mc2010_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
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

    /// Approximation level outside {1, 2, 3}
    #[error("Invalid approximation level {level}: expected 1, 2 or 3")]
    InvalidApproximationLevel { level: i64 },

    /// A formula was evaluated outside its mathematical domain
    #[error("Domain error in '{quantity}': {value} - {reason}")]
    DomainError {
        quantity: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
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

    /// Create an InvalidApproximationLevel error
    pub fn invalid_approximation_level(level: impl Into<i64>) -> Self {
        CalcError::InvalidApproximationLevel { level: level.into() }
    }

    /// Create a DomainError
    pub fn domain_error(quantity: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
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

    /// True for errors caused by the caller's arguments rather than the environment
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::InvalidApproximationLevel { .. }
                | CalcError::DomainError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidApproximationLevel { .. } => "INVALID_APPROXIMATION_LEVEL",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
