//! In-memory storage backend for testing.

use crate::backend::{validate_key, StorageBackend};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    documents: BTreeMap<String, String>,
    failing_writes: BTreeSet<String>,
    failing_removes: BTreeSet<String>,
}

/// An in-memory storage backend.
///
/// Clones share the same documents, so a test can keep one handle while a
/// store owns another, and open a second store on the same contents to
/// simulate a restart.
///
/// Writes and removes of chosen keys can be made to fail with
/// [`StorageError::Injected`].
///
/// # Example
///
/// ```rust
/// use quotebook_storage::{InMemoryBackend, StorageBackend};
///
/// let handle = InMemoryBackend::new();
/// let mut backend = handle.clone();
/// backend.write("1.json", "data").unwrap();
/// assert!(handle.contains("1.json").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding the given documents.
    #[must_use]
    pub fn with_documents<K, V>(documents: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let backend = Self::new();
        backend.state.write().documents = documents
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        backend
    }

    /// Returns a copy of all documents.
    #[must_use]
    pub fn documents(&self) -> BTreeMap<String, String> {
        self.state.read().documents.clone()
    }

    /// Makes every later write of `key` fail.
    pub fn fail_writes_to(&self, key: &str) {
        self.state.write().failing_writes.insert(key.to_string());
    }

    /// Makes every later removal of `key` fail.
    pub fn fail_removes_of(&self, key: &str) {
        self.state.write().failing_removes.insert(key.to_string());
    }

    /// Clears all injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.state.write();
        state.failing_writes.clear();
        state.failing_removes.clear();
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.state.read().documents.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut state = self.state.write();
        if state.failing_writes.contains(key) {
            return Err(StorageError::Injected(key.to_string()));
        }
        state.documents.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        let mut state = self.state.write();
        if state.failing_removes.contains(key) {
            return Err(StorageError::Injected(key.to_string()));
        }
        Ok(state.documents.remove(key).is_some())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.state.read().documents.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.keys().unwrap().is_empty());
        assert!(backend.documents().is_empty());
    }

    #[test]
    fn memory_write_and_read() {
        let mut backend = InMemoryBackend::new();
        backend.write("1.json", "hello").unwrap();

        assert_eq!(backend.read("1.json").unwrap().as_deref(), Some("hello"));
        assert_eq!(backend.read("2.json").unwrap(), None);
    }

    #[test]
    fn memory_clones_share_documents() {
        let handle = InMemoryBackend::new();
        let mut writer = handle.clone();
        writer.write("lastId.txt", "4").unwrap();

        assert_eq!(handle.read("lastId.txt").unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn memory_with_documents() {
        let backend = InMemoryBackend::with_documents([("b", "2"), ("a", "1")]);
        assert_eq!(backend.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn memory_remove() {
        let mut backend = InMemoryBackend::with_documents([("1.json", "x")]);
        assert!(backend.remove("1.json").unwrap());
        assert!(!backend.remove("1.json").unwrap());
    }

    #[test]
    fn memory_injected_write_failure_keeps_old_contents() {
        let mut backend = InMemoryBackend::with_documents([("lastId.txt", "1")]);
        backend.fail_writes_to("lastId.txt");

        let result = backend.write("lastId.txt", "2");
        assert!(matches!(result, Err(StorageError::Injected(_))));
        assert_eq!(backend.read("lastId.txt").unwrap().as_deref(), Some("1"));

        backend.write("other", "ok").unwrap();
    }

    #[test]
    fn memory_injected_remove_failure() {
        let mut backend = InMemoryBackend::with_documents([("1.json", "x")]);
        backend.fail_removes_of("1.json");

        assert!(matches!(
            backend.remove("1.json"),
            Err(StorageError::Injected(_))
        ));
        assert!(backend.contains("1.json").unwrap());

        backend.clear_failures();
        assert!(backend.remove("1.json").unwrap());
    }
}
