//! Record encoder.

use crate::quote::Quote;

/// Field labels in the order they are written and read.
pub(crate) const ID_FIELD: &str = "id";
pub(crate) const CONTENT_FIELD: &str = "content";
pub(crate) const AUTHOR_FIELD: &str = "author";

/// Indentation unit used for nested lines.
const INDENT: &str = "  ";

/// Encode a single quote as a standalone record document.
///
/// The output is newline-terminated:
///
/// ```text
/// {
///   "id": 1,
///   "content": "...",
///   "author": "..."
/// }
/// ```
///
/// Text is written verbatim. A quote character inside the content or author
/// produces a document that does not decode back to the same quote.
#[must_use]
pub fn to_record_text(quote: &Quote) -> String {
    let mut encoder = RecordEncoder::new();
    encoder.encode(quote);
    encoder.push_newline();
    encoder.into_string()
}

/// Writes record blocks into a text buffer.
///
/// The encoder can be nested one level deep (see [`RecordEncoder::with_depth`])
/// so the same block can be embedded in the aggregate document.
#[derive(Debug, Default)]
pub struct RecordEncoder {
    buffer: String,
    depth: usize,
}

impl RecordEncoder {
    /// Create a new encoder writing at the top level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder whose blocks are indented `depth` levels.
    #[must_use]
    pub fn with_depth(depth: usize) -> Self {
        Self {
            buffer: String::new(),
            depth,
        }
    }

    /// Write one record block. No trailing newline is written after the
    /// closing brace.
    pub fn encode(&mut self, quote: &Quote) {
        self.push_line("{");
        self.depth += 1;
        self.push_int_field(ID_FIELD, quote.id(), true);
        self.push_quoted_field(CONTENT_FIELD, quote.content(), true);
        self.push_quoted_field(AUTHOR_FIELD, quote.author(), false);
        self.depth -= 1;
        self.push_indent();
        self.buffer.push('}');
    }

    /// Append raw text.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append a newline.
    pub fn push_newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Consume this encoder and return the text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Get a reference to the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn push_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
    }

    fn push_line(&mut self, line: &str) {
        self.push_indent();
        self.buffer.push_str(line);
        self.push_newline();
    }

    fn push_int_field(&mut self, label: &str, value: u64, more: bool) {
        self.push_indent();
        self.buffer.push('"');
        self.buffer.push_str(label);
        self.buffer.push_str("\": ");
        self.buffer.push_str(&value.to_string());
        self.finish_field(more);
    }

    fn push_quoted_field(&mut self, label: &str, value: &str, more: bool) {
        self.push_indent();
        self.buffer.push('"');
        self.buffer.push_str(label);
        self.buffer.push_str("\": \"");
        self.buffer.push_str(value);
        self.buffer.push('"');
        self.finish_field(more);
    }

    fn finish_field(&mut self, more: bool) {
        if more {
            self.buffer.push(',');
        }
        self.push_newline();
    }
}
