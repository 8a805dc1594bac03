//! The quote record.

/// A stored quote.
///
/// Quotes are immutable values; replacing the content or author of an id
/// produces a new `Quote` with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quote {
    id: u64,
    author: String,
    content: String,
}

impl Quote {
    /// Creates a quote.
    #[must_use]
    pub fn new(id: u64, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            content: content.into(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the quote text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
