//! Aggregate export document.
//!
//! The aggregate is a bracketed, comma-separated list of record blocks. It is
//! written for external readers only; nothing in Quotebook reads it back.

use crate::encoder::RecordEncoder;
use crate::quote::Quote;

/// Render quotes as one aggregate document, in the order given.
///
/// An empty input renders as `"[\n]\n"`.
#[must_use]
pub fn to_aggregate_text<'a, I>(quotes: I) -> String
where
    I: IntoIterator<Item = &'a Quote>,
{
    let mut encoder = RecordEncoder::with_depth(1);
    encoder.push_str("[");
    encoder.push_newline();

    let mut first = true;
    for quote in quotes {
        if !first {
            encoder.push_str(",");
            encoder.push_newline();
        }
        encoder.encode(quote);
        first = false;
    }
    if !first {
        encoder.push_newline();
    }

    encoder.push_str("]");
    encoder.push_newline();
    encoder.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregate() {
        assert_eq!(to_aggregate_text(&[]), "[\n]\n");
    }

    #[test]
    fn single_record_aggregate() {
        let quotes = [Quote::new(2, "홍길동", "콜라는 코카콜라")];
        assert_eq!(
            to_aggregate_text(&quotes),
            "[\n  {\n    \"id\": 2,\n    \"content\": \"콜라는 코카콜라\",\n    \"author\": \"홍길동\"\n  }\n]\n"
        );
    }

    #[test]
    fn records_are_comma_separated_in_input_order() {
        let quotes = [Quote::new(1, "a", "x"), Quote::new(3, "b", "y")];
        let text = to_aggregate_text(&quotes);

        assert!(text.starts_with("[\n"));
        assert!(text.ends_with("  }\n]\n"));
        assert_eq!(text.matches("},\n").count(), 1);

        let first = text.find("\"id\": 1").unwrap();
        let second = text.find("\"id\": 3").unwrap();
        assert!(first < second);
    }
}
