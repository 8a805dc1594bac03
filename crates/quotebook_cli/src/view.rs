//! Text written to the interactive session.

use quotebook_core::Quote;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

const APP_TITLE: &str = "== Quote Board ==";
const COMMAND_PROMPT: &str = "Command) ";
const CONTENT_PROMPT: &str = "Quote: ";
const AUTHOR_PROMPT: &str = "Author: ";
const LIST_HEADER: &str = "id / author / quote";
const LIST_RULE: &str = "----------------------";
const EMPTY_LIST: &str = "No quotes registered.";
const EXISTING_CONTENT_PREFIX: &str = "Quote (existing): ";
const EXISTING_AUTHOR_PREFIX: &str = "Author (existing): ";

/// Marker prefixed to every error line.
pub const ERROR_PREFIX: &str = "[ERROR] ";

/// Renders session output onto a writer.
pub struct View<W> {
    out: W,
}

impl<W: Write> View<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the session title.
    pub fn title(&mut self) -> io::Result<()> {
        writeln!(self.out, "{APP_TITLE}")
    }

    /// Prompts for a command.
    pub fn command_prompt(&mut self) -> io::Result<()> {
        self.prompt(COMMAND_PROMPT)
    }

    /// Prompts for the quote text.
    pub fn content_prompt(&mut self) -> io::Result<()> {
        self.prompt(CONTENT_PROMPT)
    }

    /// Prompts for the author.
    pub fn author_prompt(&mut self) -> io::Result<()> {
        self.prompt(AUTHOR_PROMPT)
    }

    /// Confirms a registration.
    pub fn registered(&mut self, id: u64) -> io::Result<()> {
        writeln!(self.out, "{id}: quote registered.")
    }

    /// Confirms a deletion.
    pub fn deleted(&mut self, id: u64) -> io::Result<()> {
        writeln!(self.out, "{id}: quote deleted.")
    }

    /// Confirms a modification.
    pub fn modified(&mut self, id: u64) -> io::Result<()> {
        writeln!(self.out, "{id}: quote modified.")
    }

    /// Reports that no quote exists under `id`.
    pub fn not_found(&mut self, id: u64) -> io::Result<()> {
        writeln!(self.out, "{id}: quote does not exist.")
    }

    /// Shows the current quote text before it is replaced.
    pub fn existing_content(&mut self, content: &str) -> io::Result<()> {
        writeln!(self.out, "{EXISTING_CONTENT_PREFIX}{content}")
    }

    /// Shows the current author before it is replaced.
    pub fn existing_author(&mut self, author: &str) -> io::Result<()> {
        writeln!(self.out, "{EXISTING_AUTHOR_PREFIX}{author}")
    }

    /// Writes the list header followed by one row per quote, or the empty
    /// notice.
    pub fn list(&mut self, quotes: &[Quote]) -> io::Result<()> {
        writeln!(self.out, "{LIST_HEADER}")?;
        writeln!(self.out, "{LIST_RULE}")?;
        if quotes.is_empty() {
            return writeln!(self.out, "{EMPTY_LIST}");
        }
        for quote in quotes {
            writeln!(
                self.out,
                "{} / {} / {}",
                quote.id(),
                quote.author(),
                quote.content()
            )?;
        }
        Ok(())
    }

    /// Confirms that the aggregate document was written.
    pub fn exported(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "{} has been updated.", path.display())
    }

    /// Writes an error line with the `[ERROR]` marker.
    pub fn error(&mut self, err: &dyn Display) -> io::Result<()> {
        writeln!(self.out, "{ERROR_PREFIX}{err}")?;
        self.out.flush()
    }

    // Prompts have no newline, so flush for interactive terminals.
    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut View<Vec<u8>>) -> io::Result<()>) -> String {
        let mut view = View::new(Vec::new());
        f(&mut view).unwrap();
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn list_rows() {
        let quotes = [
            Quote::new(2, "오상민", "콜라는 펩시로"),
            Quote::new(1, "오상민", "옛날통닭 두마리"),
        ];
        let text = render(|v| v.list(&quotes));
        assert_eq!(
            text,
            "id / author / quote\n----------------------\n2 / 오상민 / 콜라는 펩시로\n1 / 오상민 / 옛날통닭 두마리\n"
        );
    }

    #[test]
    fn empty_list() {
        let text = render(|v| v.list(&[]));
        assert!(text.ends_with("No quotes registered.\n"));
    }

    #[test]
    fn errors_are_marked() {
        let text = render(|v| v.error(&"boom"));
        assert_eq!(text, "[ERROR] boom\n");
    }
}
