//! Label-scanning record decoder.
//!
//! The decoder understands exactly the shape written by
//! [`to_record_text`](crate::to_record_text): the fields `id`, `content` and
//! `author`, in that order, with arbitrary whitespace around labels and
//! values. It is not a general document parser.

use crate::encoder::{AUTHOR_FIELD, CONTENT_FIELD, ID_FIELD};
use crate::error::{CodecError, CodecResult};
use crate::quote::Quote;

/// Decode a quote from a record document.
///
/// # Errors
///
/// Returns an error if a field label is missing, the id has no digits or
/// overflows, or a text field is not enclosed in quote characters.
pub fn from_record_text(text: &str) -> CodecResult<Quote> {
    let mut decoder = RecordDecoder::new(text);
    decoder.decode()
}

/// A cursor over a record document.
///
/// Each field read starts where the previous one ended, so fields must
/// appear in the order they are requested.
pub struct RecordDecoder<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> RecordDecoder<'a> {
    /// Create a new decoder for the given text.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Decode the three record fields.
    pub fn decode(&mut self) -> CodecResult<Quote> {
        let id = self.read_int_field(ID_FIELD)?;
        let content = self.read_quoted_field(CONTENT_FIELD)?;
        let author = self.read_quoted_field(AUTHOR_FIELD)?;
        Ok(Quote::new(id, author, content))
    }

    /// Read an unsigned integer field.
    pub fn read_int_field(&mut self, field: &'static str) -> CodecResult<u64> {
        self.seek_value(field)?;

        let rest = self.remaining();
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(CodecError::MissingDigits { field });
        }

        let value = rest[..digits]
            .parse::<u64>()
            .map_err(|_| CodecError::IntegerOverflow { field })?;
        self.pos += digits;
        Ok(value)
    }

    /// Read a text field enclosed in quote characters. Nothing between the
    /// quotes is unescaped.
    pub fn read_quoted_field(&mut self, field: &'static str) -> CodecResult<&'a str> {
        self.seek_value(field)?;

        let rest = self.remaining();
        if !rest.starts_with('"') {
            return Err(CodecError::MissingOpeningQuote { field });
        }

        let body = &rest[1..];
        let end = body
            .find('"')
            .ok_or(CodecError::UnterminatedQuote { field })?;
        self.pos += 1 + end + 1;
        Ok(&body[..end])
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Move past `"<field>"`, surrounding whitespace and an optional `:`.
    fn seek_value(&mut self, field: &'static str) -> CodecResult<()> {
        let label = format!("\"{field}\"");
        let found = self
            .remaining()
            .find(&label)
            .ok_or(CodecError::MissingField { field })?;
        self.pos += found + label.len();

        self.skip_whitespace();
        if self.remaining().starts_with(':') {
            self.pos += 1;
            self.skip_whitespace();
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.pos += rest.len() - rest.trim_start().len();
    }
}
