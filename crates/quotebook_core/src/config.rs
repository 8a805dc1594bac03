//! Store configuration.

use quotebook_storage::WriteMode;
use std::path::{Path, PathBuf};

/// Default storage directory, relative to the working directory.
pub const DEFAULT_ROOT: &str = "db/quotes";

/// Default aggregate export path, relative to the working directory.
pub const DEFAULT_EXPORT_PATH: &str = "data.json";

/// Configuration for opening a quote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the counter and one document per record.
    pub root: PathBuf,

    /// Where `build` writes the aggregate document.
    pub export_path: PathBuf,

    /// How record and counter documents are replaced on disk.
    pub write_mode: WriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            write_mode: WriteMode::Overwrite,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage directory.
    #[must_use]
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Sets the aggregate export path.
    #[must_use]
    pub fn export_path(mut self, path: impl AsRef<Path>) -> Self {
        self.export_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the write mode.
    #[must_use]
    pub const fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }
}
