//! Error types for Quotebook core.

use quotebook_codec::CodecError;
use quotebook_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Quotebook core operations.
///
/// Every variant is fatal to the command that produced it. Looking up an id
/// that does not exist is not an error; see [`crate::Outcome`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// The storage directory could not be created or opened.
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        /// The configured storage root.
        path: PathBuf,
        /// The underlying failure.
        source: StorageError,
    },

    /// The counter document is not a non-negative integer.
    #[error("corrupt id counter: {value:?}")]
    CorruptCounter {
        /// The counter document as read.
        value: String,
    },

    /// A record document does not have the expected shape.
    #[error("malformed record {key}: {source}")]
    MalformedRecord {
        /// Storage key of the record.
        key: String,
        /// What the decoder rejected.
        source: CodecError,
    },

    /// A durable write or removal failed after the in-memory state was
    /// updated.
    #[error("failed to {action} {key}: {source}")]
    Persistence {
        /// The attempted action.
        action: &'static str,
        /// Storage key or export path.
        key: String,
        /// The underlying failure.
        source: StorageError,
    },

    /// Durable state could not be read.
    #[error("failed to read {key}: {source}")]
    Read {
        /// Storage key.
        key: String,
        /// The underlying failure.
        source: StorageError,
    },

    /// The counter cannot be advanced any further.
    #[error("identifier space exhausted at {last_id}")]
    IdsExhausted {
        /// The current counter value.
        last_id: u64,
    },
}

impl CoreError {
    /// Creates a persistence error.
    pub fn persistence(action: &'static str, key: impl Into<String>, source: StorageError) -> Self {
        Self::Persistence {
            action,
            key: key.into(),
            source,
        }
    }

    /// Creates a read error.
    pub fn read(key: impl Into<String>, source: StorageError) -> Self {
        Self::Read {
            key: key.into(),
            source,
        }
    }

    /// Creates a malformed record error.
    pub fn malformed_record(key: impl Into<String>, source: CodecError) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            source,
        }
    }
}
