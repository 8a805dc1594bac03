//! Parsing of interactive command lines.

use crate::error::CliError;
use std::str::FromStr;

const REGISTER_COMMAND: &str = "register";
const LIST_COMMAND: &str = "list";
const BUILD_COMMAND: &str = "build";
const EXIT_COMMAND: &str = "exit";
const DELETE_PREFIX: &str = "delete?id=";
const MODIFY_PREFIX: &str = "modify?id=";

/// One interactive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Prompt for a quote and register it.
    Register,
    /// Print all quotes, newest first.
    List,
    /// Delete the quote with this id.
    Delete(u64),
    /// Prompt for new values and replace the quote with this id.
    Modify(u64),
    /// Write the aggregate document.
    Build,
    /// End the session.
    Exit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line {
            REGISTER_COMMAND => return Ok(Self::Register),
            LIST_COMMAND => return Ok(Self::List),
            BUILD_COMMAND => return Ok(Self::Build),
            EXIT_COMMAND => return Ok(Self::Exit),
            _ => {}
        }

        if let Some(raw) = line.strip_prefix(DELETE_PREFIX) {
            return parse_id(raw).map(Self::Delete);
        }
        if let Some(raw) = line.strip_prefix(MODIFY_PREFIX) {
            return parse_id(raw).map(Self::Modify);
        }

        Err(CliError::UnknownCommand(line.to_string()))
    }
}

fn parse_id(raw: &str) -> Result<u64, CliError> {
    let invalid = || CliError::InvalidId(raw.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}
