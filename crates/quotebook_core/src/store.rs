//! The quote store.
//!
//! `QuoteStore` owns the live record set and the id counter, and is the only
//! component that touches durable storage. State is rebuilt from storage
//! once, when the store is opened, and kept in memory afterwards.
//!
//! ## Write order
//!
//! `save` writes the record document first and the counter second. The
//! in-memory counter only advances once both writes succeed. If the counter
//! write fails, the record document for the unallocated id stays on disk but
//! is never loaded, because the startup scan stops at the durable counter.
//!
//! Opening reads one key per id up to the counter, so startup time grows
//! with the counter rather than with the number of live quotes.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::layout::{format_counter, parse_counter, record_key, COUNTER_KEY};
use quotebook_codec::{to_aggregate_text, CodecError, Decode, Encode, Quote};
use quotebook_storage::{FileBackend, StorageBackend, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Live records and the id counter.
#[derive(Debug, Default)]
struct StoreState {
    quotes: BTreeMap<u64, Quote>,
    last_id: u64,
}

/// Counts describing a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Highest id ever allocated.
    pub last_id: u64,
    /// Number of live records.
    pub live: usize,
    /// Number of allocated ids with no live record.
    pub retired: u64,
}

/// Persistent store of quotes keyed by id.
///
/// # Example
///
/// ```rust
/// use quotebook_core::{Config, QuoteStore};
/// use quotebook_storage::InMemoryBackend;
///
/// let mut store =
///     QuoteStore::open_with_backend(&Config::default(), Box::new(InMemoryBackend::new()))
///         .unwrap();
/// let quote = store.save("Someone", "A quote").unwrap();
/// assert_eq!(quote.id(), 1);
/// ```
pub struct QuoteStore {
    backend: Box<dyn StorageBackend>,
    state: StoreState,
    export_path: PathBuf,
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore")
            .field("state", &self.state)
            .field("export_path", &self.export_path)
            .finish_non_exhaustive()
    }
}

impl QuoteStore {
    /// Opens the store in the configured directory, creating the directory
    /// if needed.
    ///
    /// # Errors
    ///
    /// - [`CoreError::StorageUnavailable`] if the directory cannot be created
    /// - [`CoreError::CorruptCounter`] if the counter document is invalid
    /// - [`CoreError::MalformedRecord`] if a record document cannot be decoded
    pub fn open(config: &Config) -> CoreResult<Self> {
        let backend = FileBackend::open_with_mode(&config.root, config.write_mode).map_err(
            |source| CoreError::StorageUnavailable {
                path: config.root.clone(),
                source,
            },
        )?;
        Self::open_with_backend(config, Box::new(backend))
    }

    /// Opens the store on an existing backend. `config.root` is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`QuoteStore::open`], except for directory creation.
    pub fn open_with_backend(config: &Config, backend: Box<dyn StorageBackend>) -> CoreResult<Self> {
        let state = load_state(backend.as_ref())?;
        debug!(
            last_id = state.last_id,
            live = state.quotes.len(),
            "quote store loaded"
        );

        Ok(Self {
            backend,
            state,
            export_path: config.export_path.clone(),
        })
    }

    /// Allocates the next id and stores a new quote under it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the record or counter document
    /// cannot be written. The store is then left as before the call.
    pub fn save(&mut self, author: &str, content: &str) -> CoreResult<Quote> {
        let last_id = self.state.last_id;
        let id = last_id
            .checked_add(1)
            .ok_or(CoreError::IdsExhausted { last_id })?;

        let quote = Quote::new(id, author, content);
        self.state.quotes.insert(id, quote.clone());

        let persisted = self
            .write_document(&record_key(id), &quote.encode())
            .and_then(|()| self.write_document(COUNTER_KEY, &format_counter(id)));
        if let Err(err) = persisted {
            self.state.quotes.remove(&id);
            return Err(err);
        }

        self.state.last_id = id;
        info!(id, "quote registered");
        Ok(quote)
    }

    /// Returns the quote stored under `id`.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&Quote> {
        self.state.quotes.get(&id)
    }

    /// Deletes the quote stored under `id`.
    ///
    /// Returns `false`, without touching storage, if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the record document cannot be
    /// removed. The quote is already gone from memory at that point.
    pub fn delete_by_id(&mut self, id: u64) -> CoreResult<bool> {
        if self.state.quotes.remove(&id).is_none() {
            return Ok(false);
        }

        let key = record_key(id);
        self.backend.remove(&key).map_err(|source| {
            warn!(id, error = %source, "record removed from memory but not from storage");
            CoreError::persistence("remove", key, source)
        })?;

        info!(id, "quote deleted");
        Ok(true)
    }

    /// Replaces the author and content of the quote stored under `id`.
    ///
    /// Returns `false`, without touching storage, if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the record document cannot be
    /// rewritten. The previous quote is kept in memory.
    pub fn replace_by_id(&mut self, id: u64, author: &str, content: &str) -> CoreResult<bool> {
        if !self.state.quotes.contains_key(&id) {
            return Ok(false);
        }

        let quote = Quote::new(id, author, content);
        let encoded = quote.encode();
        let previous = self.state.quotes.insert(id, quote);

        if let Err(err) = self.write_document(&record_key(id), &encoded) {
            if let Some(previous) = previous {
                self.state.quotes.insert(id, previous);
            }
            return Err(err);
        }

        info!(id, "quote modified");
        Ok(true)
    }

    /// Returns all live quotes, highest id first.
    #[must_use]
    pub fn list_all_descending(&self) -> Vec<Quote> {
        self.state.quotes.values().rev().cloned().collect()
    }

    /// Returns all live quotes, lowest id first.
    #[must_use]
    pub fn list_all_ascending(&self) -> Vec<Quote> {
        self.state.quotes.values().cloned().collect()
    }

    /// Renders the aggregate document for all live quotes, lowest id first.
    #[must_use]
    pub fn render_aggregate(&self) -> String {
        to_aggregate_text(self.state.quotes.values())
    }

    /// Writes the aggregate document to the configured export path and
    /// returns that path.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Persistence`] if the file cannot be written.
    pub fn export_aggregate(&self) -> CoreResult<PathBuf> {
        let path = self.export_path.clone();
        fs::write(&path, self.render_aggregate()).map_err(|err| {
            warn!(path = %path.display(), error = %err, "export failed");
            CoreError::persistence("write", path.display().to_string(), StorageError::Io(err))
        })?;

        info!(path = %path.display(), live = self.len(), "aggregate exported");
        Ok(path)
    }

    /// Returns the export path.
    #[must_use]
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Returns the highest id ever allocated.
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.state.last_id
    }

    /// Returns the number of live quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.quotes.len()
    }

    /// Returns whether there are no live quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.quotes.is_empty()
    }

    /// Returns counts describing the store.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let live = self.state.quotes.len();
        StoreStats {
            last_id: self.state.last_id,
            live,
            retired: self.state.last_id - live as u64,
        }
    }

    fn write_document(&mut self, key: &str, contents: &str) -> CoreResult<()> {
        self.backend.write(key, contents).map_err(|source| {
            warn!(key, error = %source, "write failed");
            CoreError::persistence("write", key, source)
        })
    }
}

/// Reads the counter, or 0 if there is no counter document.
pub(crate) fn load_counter(backend: &dyn StorageBackend) -> CoreResult<u64> {
    match backend.read(COUNTER_KEY) {
        Ok(Some(text)) => parse_counter(&text),
        Ok(None) => Ok(0),
        Err(StorageError::InvalidUtf8 { lossy, .. }) => {
            Err(CoreError::CorruptCounter { value: lossy })
        }
        Err(source) => Err(CoreError::read(COUNTER_KEY, source)),
    }
}

/// Reads and decodes the record document for `id`, if present.
pub(crate) fn load_record(backend: &dyn StorageBackend, id: u64) -> CoreResult<Option<Quote>> {
    let key = record_key(id);
    let text = match backend.read(&key) {
        Ok(Some(text)) => text,
        Ok(None) => return Ok(None),
        Err(StorageError::InvalidUtf8 { .. }) => {
            return Err(CoreError::malformed_record(key, CodecError::InvalidUtf8));
        }
        Err(source) => return Err(CoreError::read(key, source)),
    };

    let quote = Quote::decode(&text).map_err(|source| CoreError::malformed_record(&key, source))?;
    if quote.id() != id {
        return Err(CoreError::malformed_record(
            key,
            CodecError::IdMismatch {
                expected: id,
                found: quote.id(),
            },
        ));
    }
    Ok(Some(quote))
}

fn load_state(backend: &dyn StorageBackend) -> CoreResult<StoreState> {
    let last_id = load_counter(backend)?;
    let mut quotes = BTreeMap::new();

    for id in 1..=last_id {
        match load_record(backend, id)? {
            Some(quote) => {
                quotes.insert(id, quote);
            }
            None => debug!(id, "no record document, id retired"),
        }
    }

    Ok(StoreState { quotes, last_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebook_storage::InMemoryBackend;
    use tempfile::tempdir;

    fn memory_store() -> (QuoteStore, InMemoryBackend) {
        let backend = InMemoryBackend::new();
        let store =
            QuoteStore::open_with_backend(&Config::default(), Box::new(backend.clone())).unwrap();
        (store, backend)
    }

    fn reopen(backend: &InMemoryBackend) -> QuoteStore {
        QuoteStore::open_with_backend(&Config::default(), Box::new(backend.clone())).unwrap()
    }

    #[test]
    fn fresh_store_is_empty() {
        let (store, backend) = memory_store();
        assert!(store.is_empty());
        assert_eq!(store.last_id(), 0);
        assert!(store.find_by_id(1).is_none());
        assert!(backend.documents().is_empty());
    }

    #[test]
    fn save_allocates_sequential_ids() {
        let (mut store, backend) = memory_store();

        let first = store.save("오상민", "옛날통닭 두마리").unwrap();
        let second = store.save("오상민", "콜라는 펩시로").unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(store.last_id(), 2);

        let documents = backend.documents();
        assert_eq!(documents.get("lastId.txt").map(String::as_str), Some("2"));
        assert!(documents["1.json"].contains("\"content\": \"옛날통닭 두마리\""));
        assert!(documents["2.json"].contains("\"id\": 2"));
    }

    #[test]
    fn save_then_find() {
        let (mut store, _) = memory_store();
        let saved = store.save("author", "content").unwrap();

        let found = store.find_by_id(saved.id()).unwrap();
        assert_eq!(found.author(), "author");
        assert_eq!(found.content(), "content");
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let (mut store, _) = memory_store();
        store.save("a", "1").unwrap();
        store.save("a", "2").unwrap();

        assert!(store.delete_by_id(2).unwrap());
        let third = store.save("a", "3").unwrap();

        assert_eq!(third.id(), 3);
        assert_eq!(store.stats().retired, 1);
    }

    #[test]
    fn delete_removes_record_document() {
        let (mut store, backend) = memory_store();
        store.save("a", "1").unwrap();
        store.save("a", "2").unwrap();

        assert!(store.delete_by_id(1).unwrap());
        assert!(store.find_by_id(1).is_none());

        let documents = backend.documents();
        assert!(!documents.contains_key("1.json"));
        assert!(documents.contains_key("2.json"));
        assert_eq!(documents["lastId.txt"], "2");
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let (mut store, backend) = memory_store();
        store.save("a", "1").unwrap();
        let before = backend.documents();

        assert!(!store.delete_by_id(7).unwrap());
        assert!(!store.delete_by_id(0).unwrap());
        assert_eq!(backend.documents(), before);
    }

    #[test]
    fn replace_touches_only_the_target() {
        let (mut store, backend) = memory_store();
        store.save("a", "one").unwrap();
        store.save("b", "two").unwrap();
        let untouched = backend.documents()["1.json"].clone();

        assert!(store.replace_by_id(2, "홍길동", "콜라는 코카콜라").unwrap());

        assert_eq!(store.find_by_id(1).unwrap(), &Quote::new(1, "a", "one"));
        assert_eq!(
            store.find_by_id(2).unwrap(),
            &Quote::new(2, "홍길동", "콜라는 코카콜라")
        );
        assert_eq!(backend.documents()["1.json"], untouched);
        assert!(backend.documents()["2.json"].contains("\"author\": \"홍길동\""));
    }

    #[test]
    fn replace_unknown_id_is_a_no_op() {
        let (mut store, backend) = memory_store();

        assert!(!store.replace_by_id(1, "a", "b").unwrap());
        assert!(store.find_by_id(1).is_none());
        assert!(backend.documents().is_empty());
    }

    #[test]
    fn listing_orders() {
        let (mut store, _) = memory_store();
        for n in 0..5 {
            store.save("a", &n.to_string()).unwrap();
        }
        store.delete_by_id(3).unwrap();

        let descending: Vec<u64> = store.list_all_descending().iter().map(Quote::id).collect();
        let ascending: Vec<u64> = store.list_all_ascending().iter().map(Quote::id).collect();
        assert_eq!(descending, vec![5, 4, 2, 1]);
        assert_eq!(ascending, vec![1, 2, 4, 5]);
    }

    #[test]
    fn restart_reproduces_state() {
        let (mut store, backend) = memory_store();
        store.save("a", "one").unwrap();
        store.save("b", "two").unwrap();
        store.save("c", "three").unwrap();
        store.delete_by_id(2).unwrap();
        store.replace_by_id(3, "d", "four").unwrap();

        let reopened = reopen(&backend);
        assert_eq!(reopened.last_id(), 3);
        assert_eq!(reopened.list_all_ascending(), store.list_all_ascending());
    }

    #[test]
    fn failed_counter_write_does_not_advance() {
        let (mut store, backend) = memory_store();
        store.save("a", "one").unwrap();
        backend.fail_writes_to("lastId.txt");

        let result = store.save("b", "two");
        assert!(matches!(
            result,
            Err(CoreError::Persistence { action: "write", ref key, .. }) if key == "lastId.txt"
        ));
        assert_eq!(store.last_id(), 1);
        assert!(store.find_by_id(2).is_none());

        // The dangling record document is outside the scan bound.
        assert!(backend.documents().contains_key("2.json"));
        let reopened = reopen(&backend);
        assert_eq!(reopened.last_id(), 1);
        assert_eq!(reopened.len(), 1);

        backend.clear_failures();
        assert_eq!(store.save("b", "two").unwrap().id(), 2);
    }

    #[test]
    fn failed_record_write_leaves_store_unchanged() {
        let (mut store, backend) = memory_store();
        backend.fail_writes_to("1.json");

        assert!(store.save("a", "one").is_err());
        assert_eq!(store.last_id(), 0);
        assert!(store.is_empty());
        assert!(backend.documents().is_empty());
    }

    #[test]
    fn failed_replace_keeps_previous_quote() {
        let (mut store, backend) = memory_store();
        store.save("a", "one").unwrap();
        backend.fail_writes_to("1.json");

        assert!(store.replace_by_id(1, "b", "two").is_err());
        assert_eq!(store.find_by_id(1).unwrap(), &Quote::new(1, "a", "one"));
    }

    #[test]
    fn failed_delete_is_a_persistence_error() {
        let (mut store, backend) = memory_store();
        store.save("a", "one").unwrap();
        backend.fail_removes_of("1.json");

        let result = store.delete_by_id(1);
        assert!(matches!(
            result,
            Err(CoreError::Persistence { action: "remove", .. })
        ));
        assert!(store.find_by_id(1).is_none());
        assert!(backend.documents().contains_key("1.json"));
    }

    #[test]
    fn open_skips_missing_records() {
        let backend = InMemoryBackend::with_documents([
            ("lastId.txt", "3".to_string()),
            ("2.json", Quote::new(2, "a", "b").encode()),
        ]);
        let store = reopen(&backend);

        assert_eq!(store.last_id(), 3);
        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(2).is_some());
    }

    #[test]
    fn open_ignores_records_beyond_counter() {
        let backend = InMemoryBackend::with_documents([
            ("lastId.txt", "1".to_string()),
            ("1.json", Quote::new(1, "a", "b").encode()),
            ("2.json", Quote::new(2, "c", "d").encode()),
        ]);
        let store = reopen(&backend);

        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(2).is_none());
    }

    #[test]
    fn open_rejects_corrupt_counter() {
        let backend = InMemoryBackend::with_documents([("lastId.txt", "two")]);
        let result = QuoteStore::open_with_backend(&Config::default(), Box::new(backend));
        assert!(matches!(result, Err(CoreError::CorruptCounter { .. })));
    }

    #[test]
    fn open_rejects_malformed_record() {
        let backend = InMemoryBackend::with_documents([
            ("lastId.txt", "1"),
            ("1.json", "{\n  \"id\": 1,\n  \"content\": \"trunc"),
        ]);
        let result = QuoteStore::open_with_backend(&Config::default(), Box::new(backend));
        assert!(matches!(
            result,
            Err(CoreError::MalformedRecord {
                source: CodecError::UnterminatedQuote { field: "content" },
                ..
            })
        ));
    }

    #[test]
    fn open_rejects_record_in_wrong_slot() {
        let backend = InMemoryBackend::with_documents([
            ("lastId.txt", "1".to_string()),
            ("1.json", Quote::new(5, "a", "b").encode()),
        ]);
        let result = QuoteStore::open_with_backend(&Config::default(), Box::new(backend));
        assert!(matches!(
            result,
            Err(CoreError::MalformedRecord {
                source: CodecError::IdMismatch {
                    expected: 1,
                    found: 5
                },
                ..
            })
        ));
    }

    #[test]
    fn open_rejects_record_cut_inside_a_character() {
        let dir = tempdir().unwrap();
        let config = Config::new().root(dir.path());
        let text = Quote::new(1, "오상민", "옛날통닭 두마리").encode();
        let cut = text.find('옛').unwrap() + 1;
        fs::write(dir.path().join("lastId.txt"), "1").unwrap();
        fs::write(dir.path().join("1.json"), &text.as_bytes()[..cut]).unwrap();

        let result = QuoteStore::open(&config);
        assert!(matches!(
            result,
            Err(CoreError::MalformedRecord {
                ref key,
                source: CodecError::InvalidUtf8,
            }) if key == "1.json"
        ));
    }

    #[test]
    fn open_rejects_counter_that_is_not_utf8() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lastId.txt"), [b'1', 0xFF]).unwrap();

        let result = QuoteStore::open(&Config::new().root(dir.path()));
        assert!(matches!(result, Err(CoreError::CorruptCounter { .. })));
    }

    #[test]
    fn open_creates_storage_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("db").join("quotes");

        let store = QuoteStore::open(&Config::new().root(&root)).unwrap();
        assert!(root.is_dir());
        assert!(store.is_empty());
    }

    #[test]
    fn open_reports_unavailable_storage() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("db");
        fs::write(&blocker, "file in the way").unwrap();

        let result = QuoteStore::open(&Config::new().root(blocker.join("quotes")));
        assert!(matches!(result, Err(CoreError::StorageUnavailable { .. })));
    }

    #[test]
    fn file_store_survives_restart() {
        let dir = tempdir().unwrap();
        let config = Config::new()
            .root(dir.path().join("db"))
            .export_path(dir.path().join("data.json"));

        {
            let mut store = QuoteStore::open(&config).unwrap();
            store.save("오상민", "옛날통닭 두마리").unwrap();
            store.save("오상민", "콜라는 펩시로").unwrap();
            store.delete_by_id(1).unwrap();
        }

        let store = QuoteStore::open(&config).unwrap();
        assert_eq!(store.last_id(), 2);
        assert_eq!(
            store.list_all_descending(),
            vec![Quote::new(2, "오상민", "콜라는 펩시로")]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("db").join("lastId.txt")).unwrap(),
            "2"
        );
    }

    #[test]
    fn export_writes_ascending_aggregate() {
        let dir = tempdir().unwrap();
        let export = dir.path().join("data.json");
        let config = Config::new().export_path(&export);
        let mut store =
            QuoteStore::open_with_backend(&config, Box::new(InMemoryBackend::new())).unwrap();

        store.save("a", "one").unwrap();
        store.save("b", "two").unwrap();
        store.save("c", "three").unwrap();
        store.delete_by_id(1).unwrap();

        let path = store.export_aggregate().unwrap();
        assert_eq!(path, export);

        let text = fs::read_to_string(&export).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(!text.contains("\"id\": 1,"));
        let second = text.find("\"id\": 2,").unwrap();
        let third = text.find("\"id\": 3,").unwrap();
        assert!(second < third);
    }

    #[test]
    fn export_of_empty_store() {
        let (store, _) = memory_store();
        assert_eq!(store.render_aggregate(), "[\n]\n");
    }

    #[test]
    fn export_failure_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let config = Config::new().export_path(dir.path().join("missing").join("data.json"));
        let store =
            QuoteStore::open_with_backend(&config, Box::new(InMemoryBackend::new())).unwrap();

        assert!(matches!(
            store.export_aggregate(),
            Err(CoreError::Persistence { action: "write", .. })
        ));
    }
}
