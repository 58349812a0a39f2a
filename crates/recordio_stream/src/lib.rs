//! # RecordIO Stream
//!
//! Byte sink and byte source abstractions for RecordIO.
//!
//! This crate provides the lowest-level stream abstraction for RecordIO.
//! Sinks and sources are **opaque byte movers** - they do not interpret
//! the data that passes through them.
//!
//! ## Design Principles
//!
//! - Sinks accept ordered bytes (write, flush, close)
//! - Sources yield ordered bytes, possibly in short reads (read, close)
//! - No knowledge of the record format
//! - Every operation after `close` fails with [`StreamError::Closed`]
//!
//! ## Available Streams
//!
//! - [`InMemorySink`] / [`InMemorySource`] - For testing and in-memory streams
//! - [`FileSink`] / [`FileSource`] - For persistent streams using OS file APIs
//! - [`IoSink`] / [`IoSource`] - Adapters for any `std::io` writer or reader
//!
//! ## Example
//!
//! ```rust
//! use recordio_stream::{ByteSink, ByteSource, InMemorySink, InMemorySource};
//!
//! let mut sink = InMemorySink::new();
//! sink.write(b"hello world").unwrap();
//! sink.close().unwrap();
//!
//! let mut source = InMemorySource::from_buffer(&sink.buffer());
//! let mut buf = [0u8; 11];
//! assert_eq!(source.read(&mut buf).unwrap(), 11);
//! assert_eq!(&buf, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod io;
mod memory;

pub use backend::{ByteSink, ByteSource};
pub use error::{StreamError, StreamResult};
pub use file::{FileSink, FileSource};
pub use io::{IoSink, IoSource};
pub use memory::{InMemorySink, InMemorySource, SharedBuffer};
