//! Error types for sfile
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SFileError
pub type Result<T> = std::result::Result<T, SFileError>;

/// Unified error type for sfile operations
#[derive(Debug, Error)]
pub enum SFileError {
    // -------------------------------------------------------------------------
    // Open Errors
    // -------------------------------------------------------------------------
    #[error("Failed to open {}: {}", path.display(), source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Write Errors
    // -------------------------------------------------------------------------
    #[error("Write at offset {offset} failed: {source}")]
    Write {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid write offset: {0}")]
    InvalidOffset(i64),

    // -------------------------------------------------------------------------
    // Header Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Header corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Failed to close {}: {}", path.display(), source)]
    Close {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store is closed")]
    Closed,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bincode::Error> for SFileError {
    fn from(err: bincode::Error) -> Self {
        SFileError::Serialization(err.to_string())
    }
}
