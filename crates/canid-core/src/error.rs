//! Error types for canid operations.
//!
//! The numeric core never fails. Errors come from configuration checks at
//! startup and from snapshot I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for canid operations.
pub type Result<T> = std::result::Result<T, CanidError>;

#[derive(Debug, Error)]
pub enum CanidError {
    /// A configuration invariant does not hold; no meaningful run is possible.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no snapshot at {}", .0.display())]
    SnapshotNotFound(PathBuf),
}

impl CanidError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CanidError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
