//! Command service.
//!
//! Maps user intents onto [`QuoteStore`] operations. Absent ids come back as
//! [`Outcome::NotFound`]; store failures are returned unchanged and are never
//! retried.

use crate::config::Config;
use crate::error::CoreResult;
use crate::store::QuoteStore;
use quotebook_codec::Quote;
use std::path::PathBuf;

/// Result of a command addressed to an id.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command was applied.
    Applied,
    /// No quote exists under the id.
    NotFound,
}

impl From<bool> for Outcome {
    fn from(found: bool) -> Self {
        if found {
            Self::Applied
        } else {
            Self::NotFound
        }
    }
}

/// Front door for the interactive commands.
#[derive(Debug)]
pub struct QuoteService {
    store: QuoteStore,
}

impl QuoteService {
    /// Wraps an open store.
    #[must_use]
    pub fn new(store: QuoteStore) -> Self {
        Self { store }
    }

    /// Opens the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be loaded.
    pub fn open(config: &Config) -> CoreResult<Self> {
        QuoteStore::open(config).map(Self::new)
    }

    /// Registers a quote and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote cannot be persisted.
    pub fn register(&mut self, author: &str, content: &str) -> CoreResult<u64> {
        self.store.save(author, content).map(|quote| quote.id())
    }

    /// Returns all quotes, highest id first.
    #[must_use]
    pub fn list(&self) -> Vec<Quote> {
        self.store.list_all_descending()
    }

    /// Returns the quote stored under `id`.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<Quote> {
        self.store.find_by_id(id).cloned()
    }

    /// Replaces the quote stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote cannot be persisted.
    pub fn modify_by_id(&mut self, id: u64, author: &str, content: &str) -> CoreResult<Outcome> {
        self.store.replace_by_id(id, author, content).map(Outcome::from)
    }

    /// Deletes the quote stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record document cannot be removed.
    pub fn delete_by_id(&mut self, id: u64) -> CoreResult<Outcome> {
        self.store.delete_by_id(id).map(Outcome::from)
    }

    /// Writes the aggregate document and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn export(&self) -> CoreResult<PathBuf> {
        self.store.export_aggregate()
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &QuoteStore {
        &self.store
    }
}
