//! # Quotebook Storage
//!
//! Storage backends for Quotebook.
//!
//! A backend is a flat namespace of small text documents addressed by key.
//! Backends do not interpret the documents they hold; the record format and
//! the counter format belong to `quotebook_core`.
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - One file per key inside a root directory
//! - [`InMemoryBackend`] - For tests, with write failure injection
//!
//! ## Example
//!
//! ```rust
//! use quotebook_storage::{InMemoryBackend, StorageBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write("lastId.txt", "3").unwrap();
//! assert_eq!(backend.read("lastId.txt").unwrap().as_deref(), Some("3"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{validate_key, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use file::{FileBackend, WriteMode};
pub use memory::InMemoryBackend;
