//! Integrity scan of a storage directory.
//!
//! Unlike opening a store, the scan does not stop at the first bad record
//! document. It reports everything it finds so an operator can repair the
//! directory by hand.

use crate::error::{CoreError, CoreResult};
use crate::layout::{parse_record_key, COUNTER_KEY};
use crate::store::{load_counter, load_record};
use quotebook_storage::StorageBackend;

/// A record document that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDocument {
    /// Storage key of the document.
    pub key: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Findings of an integrity scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// The durable counter.
    pub last_id: u64,
    /// Ids with a valid record document, ascending.
    pub live: Vec<u64>,
    /// Ids at or below the counter with no record document, ascending.
    pub retired: Vec<u64>,
    /// Record documents at or below the counter that fail to load.
    pub malformed: Vec<MalformedDocument>,
    /// Record documents above the counter, left behind by a failed save.
    pub dangling: Vec<String>,
    /// Keys that are neither the counter nor a record document.
    pub unrecognized: Vec<String>,
}

impl IntegrityReport {
    /// Returns whether the store would open and no dangling documents exist.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.dangling.is_empty()
    }
}

/// Scans `backend` and reports its contents.
///
/// # Errors
///
/// Returns an error if the counter is corrupt or storage cannot be read.
pub fn scan(backend: &dyn StorageBackend) -> CoreResult<IntegrityReport> {
    let last_id = load_counter(backend)?;
    let mut report = IntegrityReport {
        last_id,
        ..IntegrityReport::default()
    };

    for id in 1..=last_id {
        match load_record(backend, id) {
            Ok(Some(_)) => report.live.push(id),
            Ok(None) => report.retired.push(id),
            Err(CoreError::MalformedRecord { key, source }) => {
                report.malformed.push(MalformedDocument {
                    key,
                    reason: source.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    let keys = backend
        .keys()
        .map_err(|source| CoreError::read("storage directory", source))?;
    for key in keys {
        if key == COUNTER_KEY {
            continue;
        }
        match parse_record_key(&key) {
            Some(id) if id > last_id || id == 0 => report.dangling.push(key),
            Some(_) => {}
            None => report.unrecognized.push(key),
        }
    }

    Ok(report)
}
