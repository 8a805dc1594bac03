//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A record document that does not match the shape the encoder produces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The field label was not found after the previous field.
    #[error("missing field \"{field}\"")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// An integer field had no digits after its label.
    #[error("field \"{field}\" has no digits")]
    MissingDigits {
        /// Name of the integer field.
        field: &'static str,
    },

    /// An integer field does not fit in 64 bits.
    #[error("field \"{field}\" overflows a 64-bit integer")]
    IntegerOverflow {
        /// Name of the integer field.
        field: &'static str,
    },

    /// A text field is not introduced by a quote character.
    #[error("field \"{field}\" is missing its opening quote")]
    MissingOpeningQuote {
        /// Name of the text field.
        field: &'static str,
    },

    /// A text field runs to the end of input without a closing quote.
    #[error("field \"{field}\" is not terminated")]
    UnterminatedQuote {
        /// Name of the text field.
        field: &'static str,
    },

    /// The document is not valid UTF-8, typically a write cut short inside
    /// a multi-byte character.
    #[error("record is not valid UTF-8")]
    InvalidUtf8,

    /// The decoded id does not match the slot the document was stored under.
    #[error("record id {found} does not match expected id {expected}")]
    IdMismatch {
        /// Id implied by the storage slot.
        expected: u64,
        /// Id found in the document.
        found: u64,
    },
}
