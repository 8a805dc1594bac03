//! The interactive quote board.

use crate::session::Session;
use crate::view::ERROR_PREFIX;
use quotebook_core::{Config, QuoteService};
use std::io;
use std::process::ExitCode;
use tracing::info;

/// Runs an interactive session on stdin and stdout.
///
/// Startup and session errors are reported on stdout with the `[ERROR]`
/// marker and turn into a failing exit code.
pub fn run(config: &Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    info!(root = %config.root.display(), "opening quote store");

    let service = match QuoteService::open(config) {
        Ok(service) => service,
        Err(err) => {
            println!("{ERROR_PREFIX}{err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(service, stdin.lock(), stdout.lock());

    match session.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
