//! Storage layout.
//!
//! ```text
//! <root>/
//! ├─ lastId.txt   # Highest id ever allocated, decimal
//! ├─ 1.json       # One record document per live id
//! ├─ 2.json
//! └─ ...
//! ```
//!
//! The counter bounds the startup scan: a record document whose id is above
//! the counter is never loaded.

use crate::error::{CoreError, CoreResult};

/// Key of the counter document.
pub const COUNTER_KEY: &str = "lastId.txt";

const RECORD_SUFFIX: &str = ".json";

/// Returns the key of the record document for `id`.
#[must_use]
pub fn record_key(id: u64) -> String {
    format!("{id}{RECORD_SUFFIX}")
}

/// Returns the id named by a record key, or `None` for any other key.
#[must_use]
pub fn parse_record_key(key: &str) -> Option<u64> {
    let stem = key.strip_suffix(RECORD_SUFFIX)?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

/// Parses the counter document. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`CoreError::CorruptCounter`] unless the trimmed text is a
/// non-empty run of ASCII digits that fits in a `u64`.
pub fn parse_counter(text: &str) -> CoreResult<u64> {
    let trimmed = text.trim();
    let corrupt = || CoreError::CorruptCounter {
        value: text.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(corrupt());
    }
    trimmed.parse().map_err(|_| corrupt())
}

/// Renders the counter document. No trailing newline is written.
#[must_use]
pub fn format_counter(last_id: u64) -> String {
    last_id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys() {
        assert_eq!(record_key(1), "1.json");
        assert_eq!(record_key(120), "120.json");
        assert_eq!(parse_record_key("120.json"), Some(120));
    }

    #[test]
    fn foreign_keys_are_not_records() {
        for key in ["lastId.txt", ".json", "a.json", "-1.json", "1.json.bak", "1"] {
            assert_eq!(parse_record_key(key), None, "{key:?}");
        }
    }

    #[test]
    fn counter_is_trimmed() {
        assert_eq!(parse_counter("2").unwrap(), 2);
        assert_eq!(parse_counter(" 17\n").unwrap(), 17);
        assert_eq!(parse_counter("0").unwrap(), 0);
    }

    #[test]
    fn corrupt_counters_are_rejected() {
        for text in ["", "  ", "-1", "+3", "1.5", "two", "99999999999999999999999"] {
            assert!(
                matches!(parse_counter(text), Err(CoreError::CorruptCounter { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn counter_has_no_newline() {
        assert_eq!(format_counter(2), "2");
    }
}
