//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The key is not a plain document name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A document exists but is not valid UTF-8.
    #[error("document {key:?} is not valid UTF-8")]
    InvalidUtf8 {
        /// Key of the document.
        key: String,
        /// The contents with invalid sequences replaced.
        lossy: String,
    },

    /// A failure injected by a test backend.
    #[error("injected failure for {0:?}")]
    Injected(String),
}
