//! # Quotebook Testkit
//!
//! Test utilities for Quotebook.
//!
//! This crate provides:
//! - Temporary stores backed by memory or by a temporary directory
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use quotebook_testkit::TestStore;
//!
//! let fixture = TestStore::memory();
//! let mut store = fixture.open();
//! store.save("Someone", "A quote").unwrap();
//!
//! // A second open sees what the first one wrote.
//! assert_eq!(fixture.open().last_id(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
