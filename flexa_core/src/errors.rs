//! # Error Types
//!
//! Structured error types for flexa_core. Domain violations that would
//! otherwise surface as `NaN` or infinite results (μ > 0.5, x = 0, b = 0,
//! an unresolved concrete grade) are reported as named variants instead.
//!
//! ## Example
//!
//! ```rust
//! use flexa_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(b_m: f64) -> CalcResult<()> {
//!     if b_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "b_m".to_string(),
//!             value: b_m.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flexa_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material not found in database
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A formula was evaluated outside the domain where it is defined
    /// (e.g. μ > 0.5 under the square root, negative Fck under a fractional power)
    #[error("Out of domain: {quantity} = {value} - {constraint}")]
    OutOfDomain {
        quantity: String,
        value: String,
        constraint: String,
    },

    /// The concrete grade could not be resolved (no exposure class selected)
    #[error("Undetermined material: {reason}")]
    UndeterminedMaterial { reason: String },

    /// A formula divisor evaluated to zero
    #[error("Division by zero while computing {quantity}")]
    ZeroDivision { quantity: String },

    /// Calculation failed (non-finite result, inconsistent state, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
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

    /// Create an OutOfDomain error
    pub fn out_of_domain(quantity: impl Into<String>, value: f64, constraint: impl Into<String>) -> Self {
        CalcError::OutOfDomain {
            quantity: quantity.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Create an UndeterminedMaterial error
    pub fn undetermined_material(reason: impl Into<String>) -> Self {
        CalcError::UndeterminedMaterial {
            reason: reason.into(),
        }
    }

    /// Create a ZeroDivision error
    pub fn zero_division(quantity: impl Into<String>) -> Self {
        CalcError::ZeroDivision {
            quantity: quantity.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
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

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// True when retrying later can succeed (another user holds the file)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::OutOfDomain { .. } => "OUT_OF_DOMAIN",
            CalcError::UndeterminedMaterial { .. } => "UNDETERMINED_MATERIAL",
            CalcError::ZeroDivision { .. } => "ZERO_DIVISION",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("b_m", "-0.3", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::material_not_found("S235").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::out_of_domain("mu", 0.6, "mu <= 0.5").error_code(), "OUT_OF_DOMAIN");
        assert_eq!(CalcError::zero_division("x").error_code(), "ZERO_DIVISION");
        assert_eq!(
            CalcError::undetermined_material("no exposure class").error_code(),
            "UNDETERMINED_MATERIAL"
        );
    }

    #[test]
    fn test_domain_error_message() {
        let error = CalcError::out_of_domain("mu", 0.62, "1 - 2mu must be >= 0");
        assert_eq!(error.to_string(), "Out of domain: mu = 0.62 - 1 - 2mu must be >= 0");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_only_locked_files_are_recoverable() {
        let locked = CalcError::file_locked("beams.flx", "alice", "2026-10-16T08:00:00Z");
        assert!(locked.is_recoverable());
        assert_eq!(locked.error_code(), "FILE_LOCKED");
        assert!(!CalcError::undetermined_material("no exposure class").is_recoverable());
        assert!(!CalcError::file_error("read", "beams.flx", "not found").is_recoverable());
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = serde_json::to_string(&CalcError::zero_division("x")).unwrap();
        assert_eq!(json, r#"{"type":"ZeroDivision","details":{"quantity":"x"}}"#);
    }
}
