//! Error types for the store crate.
//!
//! This module provides structured error types for the key-value storage
//! backends and for the persisted feature collection.

use std::io;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The stored value does not parse as the expected record.
    #[error("Storage corrupt under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// The key cannot be used by this backend.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// No storage directory could be resolved for this platform.
    #[error("Storage directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StorageError {
    /// Check if this error reports unparseable stored data
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Corrupt {
            key: "drawnFeatures".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Storage corrupt under 'drawnFeatures': expected value at line 1 column 1"
        );
        assert!(err.is_corrupt());

        let err = StorageError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key '../etc'");
        assert!(!err.is_corrupt());
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io_err.into();
        assert!(matches!(err, StorageError::IoError(_)));
    }
}
