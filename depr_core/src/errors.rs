//! # Error Types
//!
//! Structured error types for depr_core. Every engine failure is a
//! precondition failure: the call is rejected as a whole and no partial
//! schedule is ever returned.
//!
//! ## Example
//!
//! ```rust
//! use depr_core::errors::{DeprError, DeprResult};
//!
//! fn check_asset_value(asset_value: f64) -> DeprResult<()> {
//!     if asset_value <= 0.0 {
//!         return Err(DeprError::invalid_asset_value(
//!             asset_value.to_string(),
//!             "Asset value must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_asset_value(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for depr_core operations
pub type DeprResult<T> = Result<T, DeprError>;

/// Structured error type for schedule calculation and export.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DeprError {
    /// Useful life is below one period, not a whole number, or too large
    #[error("Invalid useful life: {value} - {reason}")]
    InvalidUsefulLife { value: String, reason: String },

    /// Asset value is zero, negative, or not a finite number
    #[error("Invalid asset value: {value} - {reason}")]
    InvalidAssetValue { value: String, reason: String },

    /// Production units would make the per-unit depreciation undefined
    #[error("Invalid units for '{field}': {value} - {reason}")]
    InvalidUnits {
        field: String,
        value: String,
        reason: String,
    },

    /// An explicit useful life disagrees with the number of per-period unit entries
    #[error("Inconsistent period count: useful life is {useful_life} but {period_units} period unit entries were given")]
    InconsistentPeriodCount { useful_life: u32, period_units: usize },

    /// Any other input value is invalid (VAT percentage, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by the selected method is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or CSV serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl DeprError {
    /// Create an InvalidUsefulLife error
    pub fn invalid_useful_life(value: impl Into<String>, reason: impl Into<String>) -> Self {
        DeprError::InvalidUsefulLife {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidAssetValue error
    pub fn invalid_asset_value(value: impl Into<String>, reason: impl Into<String>) -> Self {
        DeprError::InvalidAssetValue {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidUnits error
    pub fn invalid_units(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DeprError::InvalidUnits {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DeprError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        DeprError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        DeprError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        DeprError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the values the caller supplied
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            DeprError::FileError { .. } | DeprError::SerializationError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DeprError::InvalidUsefulLife { .. } => "INVALID_USEFUL_LIFE",
            DeprError::InvalidAssetValue { .. } => "INVALID_ASSET_VALUE",
            DeprError::InvalidUnits { .. } => "INVALID_UNITS",
            DeprError::InconsistentPeriodCount { .. } => "INCONSISTENT_PERIOD_COUNT",
            DeprError::InvalidInput { .. } => "INVALID_INPUT",
            DeprError::MissingField { .. } => "MISSING_FIELD",
            DeprError::FileError { .. } => "FILE_ERROR",
            DeprError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<csv::Error> for DeprError {
    fn from(e: csv::Error) -> Self {
        DeprError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DeprError::invalid_asset_value("-5", "Asset value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidAssetValue\""));
        let roundtrip: DeprError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DeprError::missing_field("period_units").error_code(), "MISSING_FIELD");
        assert_eq!(
            DeprError::InconsistentPeriodCount { useful_life: 4, period_units: 3 }.error_code(),
            "INCONSISTENT_PERIOD_COUNT"
        );
        assert_eq!(DeprError::invalid_units("total_production_units", "0", "zero").error_code(), "INVALID_UNITS");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(DeprError::invalid_useful_life("0", "too small").is_input_error());
        assert!(!DeprError::file_error("write", "/tmp/x.csv", "denied").is_input_error());
        assert!(!DeprError::serialization("bad json").is_input_error());
    }

    #[test]
    fn test_inconsistent_period_count_message() {
        let error = DeprError::InconsistentPeriodCount { useful_life: 4, period_units: 3 };
        assert_eq!(
            error.to_string(),
            "Inconsistent period count: useful life is 4 but 3 period unit entries were given"
        );
    }
}
