//! Validation of quote text and author names.
//!
//! Allowed characters are ASCII letters and digits, Hangul, and the space.

use crate::error::CliError;

/// Checks a quote text.
pub fn validate_content(content: &str) -> Result<(), CliError> {
    validate(content, CliError::BlankContent, CliError::InvalidContentChar)
}

/// Checks an author name.
pub fn validate_author(author: &str) -> Result<(), CliError> {
    validate(author, CliError::BlankAuthor, CliError::InvalidAuthorChar)
}

fn validate(text: &str, blank: CliError, invalid: fn(char) -> CliError) -> Result<(), CliError> {
    if text.trim().is_empty() {
        return Err(blank);
    }
    match text.chars().find(|&c| !is_allowed(c)) {
        Some(c) => Err(invalid(c)),
        None => Ok(()),
    }
}

fn is_allowed(c: char) -> bool {
    c == ' ' || c.is_ascii_alphanumeric() || is_hangul(c)
}

fn is_hangul(c: char) -> bool {
    matches!(
        c,
        '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}'
    )
}
