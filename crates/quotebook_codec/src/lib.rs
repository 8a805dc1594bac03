//! # Quotebook Codec
//!
//! Text codecs for Quotebook records.
//!
//! A record is stored as a small, human-readable document:
//!
//! ```text
//! {
//!   "id": 1,
//!   "content": "The quote",
//!   "author": "Someone"
//! }
//! ```
//!
//! The decoder is a label-scanning parser that accepts the shape the encoder
//! writes, with any surrounding whitespace. It is **not** a JSON parser:
//! text fields are neither escaped on encode nor unescaped on decode, so a
//! quote character inside the content or author does not round-trip.
//!
//! ## Usage
//!
//! ```
//! use quotebook_codec::{from_record_text, to_record_text, Quote};
//!
//! let quote = Quote::new(1, "Someone", "The quote");
//! let text = to_record_text(&quote);
//!
//! let decoded = from_record_text(&text).unwrap();
//! assert_eq!(quote, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod decoder;
mod encoder;
mod error;
mod quote;

pub use aggregate::to_aggregate_text;
pub use decoder::{from_record_text, RecordDecoder};
pub use encoder::{to_record_text, RecordEncoder};
pub use error::{CodecError, CodecResult};
pub use quote::Quote;

/// Types that can be written as a record document.
pub trait Encode {
    /// Encode this value as record text.
    fn encode(&self) -> String;
}

/// Types that can be read from a record document.
pub trait Decode: Sized {
    /// Decode this value from record text.
    fn decode(text: &str) -> CodecResult<Self>;
}

impl Encode for Quote {
    fn encode(&self) -> String {
        to_record_text(self)
    }
}

impl Decode for Quote {
    fn decode(text: &str) -> CodecResult<Self> {
        from_record_text(text)
    }
}
