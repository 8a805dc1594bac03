//! The interactive command loop.
//!
//! The session reads one command per line and runs it to completion before
//! reading the next. The first error of any kind, including invalid input,
//! is written to the output with the `[ERROR]` marker and ends the session.

use crate::command::Command;
use crate::error::CliError;
use crate::validate::{validate_author, validate_content};
use crate::view::View;
use quotebook_core::{Outcome, QuoteService};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// An interactive session over a reader and a writer.
pub struct Session<R, W> {
    input: R,
    view: View<W>,
    service: QuoteService,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session.
    pub fn new(service: QuoteService, input: R, output: W) -> Self {
        Self {
            input,
            view: View::new(output),
            service,
        }
    }

    /// Runs commands until `exit`, end of input, or the first error.
    ///
    /// The error is reported on the session output before it is returned.
    pub fn run(&mut self) -> Result<(), CliError> {
        let result = self.serve();
        if let Err(err) = &result {
            debug!(validation = err.is_validation(), "session terminated");
            if let Err(write_err) = self.view.error(err) {
                warn!(error = %write_err, "failed to report session error");
            }
        }
        result
    }

    /// Consumes the session and returns its writer.
    pub fn into_output(self) -> W {
        self.view.into_inner()
    }

    fn serve(&mut self) -> Result<(), CliError> {
        self.view.title()?;

        loop {
            self.view.command_prompt()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match line.parse::<Command>()? {
                Command::Exit => return Ok(()),
                Command::Register => self.register()?,
                Command::List => self.list()?,
                Command::Delete(id) => self.delete(id)?,
                Command::Modify(id) => self.modify(id)?,
                Command::Build => self.build()?,
            }
        }
    }

    fn register(&mut self) -> Result<(), CliError> {
        self.view.content_prompt()?;
        let content = self.read_field("quote")?;
        self.view.author_prompt()?;
        let author = self.read_field("author")?;

        validate_content(&content)?;
        validate_author(&author)?;

        let id = self.service.register(&author, &content)?;
        self.view.registered(id)?;
        Ok(())
    }

    fn list(&mut self) -> Result<(), CliError> {
        let quotes = self.service.list();
        self.view.list(&quotes)?;
        Ok(())
    }

    fn delete(&mut self, id: u64) -> Result<(), CliError> {
        match self.service.delete_by_id(id)? {
            Outcome::Applied => self.view.deleted(id)?,
            Outcome::NotFound => self.view.not_found(id)?,
        }
        Ok(())
    }

    fn modify(&mut self, id: u64) -> Result<(), CliError> {
        let Some(existing) = self.service.find_by_id(id) else {
            self.view.not_found(id)?;
            return Ok(());
        };

        self.view.existing_content(existing.content())?;
        self.view.content_prompt()?;
        let content = self.read_field("quote")?;
        self.view.existing_author(existing.author())?;
        self.view.author_prompt()?;
        let author = self.read_field("author")?;

        validate_content(&content)?;
        validate_author(&author)?;

        match self.service.modify_by_id(id, &author, &content)? {
            Outcome::Applied => self.view.modified(id)?,
            Outcome::NotFound => self.view.not_found(id)?,
        }
        Ok(())
    }

    fn build(&mut self) -> Result<(), CliError> {
        let path = self.service.export()?;
        self.view.exported(&path)?;
        Ok(())
    }

    /// Reads one trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_field(&mut self, name: &'static str) -> Result<String, CliError> {
        self.read_line()?.ok_or(CliError::UnexpectedEndOfInput(name))
    }
}
