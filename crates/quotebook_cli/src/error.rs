//! Error types for the CLI.

use quotebook_core::CoreError;
use std::io;
use thiserror::Error;

/// Errors that end an interactive session.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line is not a known command.
    #[error(
        "unknown command {0:?}; available commands: register, list, delete?id={{n}}, modify?id={{n}}, build, exit"
    )]
    UnknownCommand(String),

    /// The id suffix of `delete?id=` or `modify?id=` is not a non-negative integer.
    #[error("id must be a non-negative integer, e.g. delete?id=1, modify?id=2 (got {0:?})")]
    InvalidId(String),

    /// The quote text is blank.
    #[error("quote must not be blank; only letters, digits and spaces are allowed")]
    BlankContent,

    /// The author is blank.
    #[error("author must not be blank; only letters, digits and spaces are allowed")]
    BlankAuthor,

    /// The quote text contains a disallowed character.
    #[error("quote contains a disallowed character {0:?}; only letters, digits and spaces are allowed")]
    InvalidContentChar(char),

    /// The author contains a disallowed character.
    #[error("author contains a disallowed character {0:?}; only letters, digits and spaces are allowed")]
    InvalidAuthorChar(char),

    /// Input ended while a field prompt was pending.
    #[error("input ended while waiting for the {0}")]
    UnexpectedEndOfInput(&'static str),

    /// The store failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading input or writing output failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Returns whether the error was caused by user input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Core(_) | Self::Io(_))
    }
}
