//! # RecordIO Testkit
//!
//! Test utilities for RecordIO.
//!
//! This crate provides:
//! - Temporary record files and in-memory encode/decode helpers
//! - Fault-injecting sinks and sources
//! - Property-based test generators using proptest
//! - Wire-format test vectors
//! - Log capture for tests
//!
//! ## Usage
//!
//! ```rust
//! use recordio_testkit::prelude::*;
//!
//! init_test_logging();
//! let file = TempRecordFile::new();
//! file.write_all(&["One", "Two"]);
//! assert_eq!(file.read_all().unwrap().len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;
pub mod logging;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
    pub use crate::vectors::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;
pub use vectors::*;
