//! Property-based test generators using proptest.
//!
//! Generated text only uses characters the record format round-trips:
//! ASCII letters and digits, Hangul syllables, and spaces.

use proptest::prelude::*;
use quotebook_codec::Quote;

/// Strategy for quote text that survives a record round-trip.
pub fn content_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9가-힣][a-zA-Z0-9 가-힣]{0,60}").expect("Invalid regex")
}

/// Strategy for author names that survive a record round-trip.
pub fn author_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z가-힣][a-zA-Z0-9 가-힣]{0,20}").expect("Invalid regex")
}

/// Strategy for whole quotes with positive ids.
pub fn quote_strategy() -> impl Strategy<Value = Quote> {
    (1u64..=u64::MAX, author_strategy(), content_strategy())
        .prop_map(|(id, author, content)| Quote::new(id, author, content))
}

/// One store mutation. Ids are drawn from a small range so operations often
/// hit live, retired and never-allocated ids.
#[derive(Debug, Clone)]
pub enum StoreOp {
    /// Save a new quote.
    Save {
        /// Author name.
        author: String,
        /// Quote text.
        content: String,
    },
    /// Replace the quote under `id`.
    Replace {
        /// Target id.
        id: u64,
        /// New author name.
        author: String,
        /// New quote text.
        content: String,
    },
    /// Delete the quote under `id`.
    Delete {
        /// Target id.
        id: u64,
    },
}

/// Strategy for a single store mutation.
pub fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => (author_strategy(), content_strategy())
            .prop_map(|(author, content)| StoreOp::Save { author, content }),
        1 => (0u64..12, author_strategy(), content_strategy())
            .prop_map(|(id, author, content)| StoreOp::Replace { id, author, content }),
        1 => (0u64..12).prop_map(|id| StoreOp::Delete { id }),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
