//! Custom error types for equiptrack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for equiptrack operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A unique field collides with an existing record
    #[error("{field} already registered: {value}")]
    Conflict { field: &'static str, value: String },

    /// The backing store could not be read or written
    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    /// The acting user is not allowed to perform the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TrackerError {
    /// Create a "not found" error for equipment
    pub fn equipment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Equipment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for stocks
    pub fn stock_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Stock",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if the store failed underneath the operation
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for equiptrack operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::equipment_not_found("42");
        assert_eq!(err.to_string(), "Equipment not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_error() {
        let err = TrackerError::Conflict {
            field: "asset tag",
            value: "1001".into(),
        };
        assert_eq!(err.to_string(), "asset tag already registered: 1001");
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}
