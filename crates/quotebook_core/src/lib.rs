//! # Quotebook Core
//!
//! Record store and command service for Quotebook.
//!
//! This crate provides:
//! - [`QuoteStore`], which owns the live quotes and the id counter and does
//!   all durable reads and writes
//! - [`QuoteService`], the thin command layer used by the CLI
//! - [`verify::scan`], an integrity scan of a storage directory
//!
//! Ids are allocated from a durable counter that only grows; deleted ids
//! are never reused.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quotebook_core::{Config, QuoteService};
//!
//! let mut service = QuoteService::open(&Config::default())?;
//! let id = service.register("Someone", "A quote")?;
//! println!("{id} registered");
//! # Ok::<(), quotebook_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod layout;
pub mod service;
pub mod store;
pub mod verify;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use quotebook_codec::Quote;
pub use quotebook_storage::WriteMode;
pub use service::{Outcome, QuoteService};
pub use store::{QuoteStore, StoreStats};

/// Version of the core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
