//! File-based storage backend for persistent storage.

use crate::backend::{validate_key, StorageBackend};
use crate::error::{StorageError, StorageResult};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Suffix of the scratch file used by [`WriteMode::AtomicRename`].
const TEMP_SUFFIX: &str = ".tmp";

/// How [`FileBackend`] replaces a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the file in place.
    ///
    /// A crash mid-write can leave the document truncated.
    #[default]
    Overwrite,

    /// Write a sibling temporary file, sync it, then rename it over the
    /// document and sync the directory.
    AtomicRename,
}

/// A directory of documents, one file per key.
///
/// Data survives process restarts. The backend assumes it is the only
/// writer of its directory.
///
/// # Example
///
/// ```no_run
/// use quotebook_storage::{FileBackend, StorageBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("db/quotes")).unwrap();
/// backend.write("lastId.txt", "0").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
    mode: WriteMode,
}

impl FileBackend {
    /// Opens the directory at `root`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: &Path) -> StorageResult<Self> {
        Self::open_with_mode(root, WriteMode::default())
    }

    /// Opens the directory at `root` with an explicit write mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open_with_mode(root: &Path, mode: WriteMode) -> StorageResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            mode,
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the write mode.
    #[must_use]
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Returns the path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn path_of(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> StorageResult<()> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)?;
        self.sync_directory()
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        File::open(&self.root)?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StorageResult<()> {
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_of(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        String::from_utf8(bytes).map(Some).map_err(|err| StorageError::InvalidUtf8 {
            key: key.to_string(),
            lossy: String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    fn write(&mut self, key: &str, contents: &str) -> StorageResult<()> {
        let path = self.path_of(key)?;
        match self.mode {
            WriteMode::Overwrite => {
                fs::write(&path, contents)?;
                Ok(())
            }
            WriteMode::AtomicRename => self.write_atomic(&path, contents),
        }
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        let path = self.path_of(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }
            keys.push(name);
        }
        keys.sort();
        Ok(keys)
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.path_of(key)?.is_file())
    }
}
