//! Storage backend trait definition.

use crate::error::{StorageError, StorageResult};

/// A keyed store of small text documents.
///
/// Every write replaces the whole document. Keys are flat names such as
/// `lastId.txt` or `12.json`; see [`validate_key`].
///
/// # Invariants
///
/// - `read` returns exactly the contents of the last successful `write`
/// - `remove` reports whether a document existed
/// - a failed `write` or `remove` leaves every other key untouched
///
/// # Implementors
///
/// - [`super::FileBackend`] - For persistent storage
/// - [`super::InMemoryBackend`] - For testing
pub trait StorageBackend: Send + Sync {
    /// Reads the document stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `contents` under `key`, replacing any existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn write(&mut self, key: &str, contents: &str) -> StorageResult<()>;

    /// Removes the document stored under `key`.
    ///
    /// Returns `false` if no document existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the removal fails.
    fn remove(&mut self, key: &str) -> StorageResult<bool>;

    /// Returns the keys of all stored documents, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be listed.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Returns whether a document is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

/// Checks that `key` names a single document.
///
/// Empty keys, `.` and `..`, and keys containing a path separator are
/// rejected.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for a rejected key.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\'])
        || key.contains('\0');
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_valid() {
        assert!(validate_key("lastId.txt").is_ok());
        assert!(validate_key("12.json").is_ok());
    }

    #[test]
    fn path_like_names_are_rejected() {
        for key in ["", ".", "..", "a/b", "..\\x", "nul\0"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
