//! Test fixtures and store helpers.
//!
//! A [`TestStore`] owns a storage location. Every call to
//! [`TestStore::open`] builds a fresh [`QuoteStore`] on that location, which
//! is how tests simulate a process restart.

use quotebook_core::{Config, QuoteStore};
use quotebook_storage::InMemoryBackend;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A storage location with automatic cleanup.
pub struct TestStore {
    config: Config,
    memory: Option<InMemoryBackend>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates an in-memory location. The export path still points into a
    /// temporary directory.
    pub fn memory() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::new()
            .root(temp_dir.path().join("unused"))
            .export_path(temp_dir.path().join("data.json"));
        Self {
            config,
            memory: Some(InMemoryBackend::new()),
            _temp_dir: temp_dir,
        }
    }

    /// Creates a file-based location inside a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::new()
            .root(temp_dir.path().join("db").join("quotes"))
            .export_path(temp_dir.path().join("data.json"));
        Self {
            config,
            memory: None,
            _temp_dir: temp_dir,
        }
    }

    /// Opens a new store on this location.
    pub fn open(&self) -> QuoteStore {
        self.try_open().expect("Failed to open quote store")
    }

    /// Opens a new store on this location, returning any load error.
    pub fn try_open(&self) -> quotebook_core::CoreResult<QuoteStore> {
        match &self.memory {
            Some(backend) => QuoteStore::open_with_backend(&self.config, Box::new(backend.clone())),
            None => QuoteStore::open(&self.config),
        }
    }

    /// Returns the configuration used to open stores.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the storage directory of a file-based location.
    pub fn root(&self) -> Option<&Path> {
        self.memory.is_none().then(|| self.config.root.as_path())
    }

    /// Returns the export path.
    pub fn export_path(&self) -> PathBuf {
        self.config.export_path.clone()
    }

    /// Returns the shared backend of an in-memory location.
    pub fn backend(&self) -> Option<&InMemoryBackend> {
        self.memory.as_ref()
    }
}

/// Runs a test with a store on a fresh in-memory location.
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut QuoteStore) -> R,
{
    let fixture = TestStore::memory();
    let mut store = fixture.open();
    f(&mut store)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a location holding `count` quotes with ids `1..=count`.
    pub fn populated_store(count: usize) -> TestStore {
        let fixture = TestStore::memory();
        let mut store = fixture.open();
        for i in 1..=count {
            store
                .save(&format!("author {i}"), &format!("quote number {i}"))
                .expect("Failed to save quote");
        }
        fixture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_reopens_with_same_contents() {
        let fixture = TestStore::memory();
        fixture.open().save("a", "b").unwrap();

        let store = fixture.open();
        assert_eq!(store.last_id(), 1);
        assert!(fixture.backend().unwrap().documents().contains_key("1.json"));
        assert!(fixture.root().is_none());
    }

    #[test]
    fn file_store_reopens_with_same_contents() {
        let fixture = TestStore::file();
        fixture.open().save("a", "b").unwrap();

        let store = fixture.open();
        assert_eq!(store.len(), 1);
        assert!(fixture.root().unwrap().join("1.json").is_file());
    }

    #[test]
    fn with_temp_store_starts_empty() {
        with_temp_store(|store| {
            assert!(store.is_empty());
            assert_eq!(store.save("a", "b").unwrap().id(), 1);
        });
    }

    #[test]
    fn populated_scenario() {
        let fixture = scenarios::populated_store(10);
        let store = fixture.open();
        assert_eq!(store.last_id(), 10);
        assert_eq!(store.list_all_descending()[0].id(), 10);
    }
}
