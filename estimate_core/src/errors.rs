//! # Error Types
//!
//! Structured error types for estimate_core. Every failure carries enough
//! context to fix the offending input programmatically, and all variants
//! serialize cleanly to JSON for the `--json` scripting surface.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_area(area_sqft: f64) -> EstimateResult<()> {
//!     if area_sqft <= 0.0 {
//!         return Err(EstimateError::InvalidInput {
//!             field: "area_sqft".to_string(),
//!             value: area_sqft.to_string(),
//!             reason: "Area must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by scripts and front-ends.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
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

    /// A location or quality tier string did not match any known tier
    #[error("Unknown tier: {tier}")]
    UnknownTier { tier: String },

    /// A resource entry failed the add-guard checks
    #[error("Invalid resource: {reason}")]
    ResourceInvalid { reason: String },

    /// No resource exists with the given id
    #[error("Resource not found: {id}")]
    ResourceNotFound { id: String },

    /// The admin gate rejected the operation
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownTier error
    pub fn unknown_tier(tier: impl Into<String>) -> Self {
        EstimateError::UnknownTier { tier: tier.into() }
    }

    /// Create a ResourceInvalid error
    pub fn resource_invalid(reason: impl Into<String>) -> Self {
        EstimateError::ResourceInvalid {
            reason: reason.into(),
        }
    }

    /// Create a ResourceNotFound error
    pub fn resource_not_found(id: impl Into<String>) -> Self {
        EstimateError::ResourceNotFound { id: id.into() }
    }

    /// Create an Unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        EstimateError::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        EstimateError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::UnknownTier { .. } => "UNKNOWN_TIER",
            EstimateError::ResourceInvalid { .. } => "RESOURCE_INVALID",
            EstimateError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            EstimateError::Unauthorized { .. } => "UNAUTHORIZED",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
            EstimateError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
