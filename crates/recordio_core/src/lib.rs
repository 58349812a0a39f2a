//! # RecordIO Core
//!
//! Sequential, compressed record framing.
//!
//! A [`RecordWriter`] wraps each payload in a self-delimiting record and
//! appends it to a [`ByteSink`](recordio_stream::ByteSink); a
//! [`RecordReader`] recovers the payloads from a
//! [`ByteSource`](recordio_stream::ByteSource) in the order they were
//! written.
//!
//! ## Record Format
//!
//! ```text
//! | magic (8) | compressed_size (8) | payload (compressed_size) |
//! ```
//!
//! - `magic` is [`RECORD_MAGIC`], little-endian
//! - `compressed_size` is a little-endian signed integer, always the exact
//!   length of `payload`
//! - `payload` is the logical record after compression
//!
//! Records are back to back. A stream is zero or more records: there is no
//! stream header, index or trailer.
//!
//! ## Invariants
//!
//! - Each record is independently decodable; no state crosses records
//! - One `write_record` call appends exactly one record with one sink write
//! - Exhaustion at a record boundary is [`RecordError::EndOfStream`];
//!   exhaustion anywhere else is [`RecordError::TruncatedRecord`]
//! - After `close`, every data operation fails with [`RecordError::Closed`]
//!
//! ## Usage
//!
//! ```rust
//! use recordio_core::{RecordReader, RecordWriter};
//! use recordio_stream::{InMemorySink, InMemorySource};
//!
//! let sink = InMemorySink::new();
//! let buffer = sink.buffer();
//!
//! let mut writer = RecordWriter::new(sink);
//! writer.write_record(b"One").unwrap();
//! writer.write_record(b"Two").unwrap();
//! writer.close().unwrap();
//!
//! let mut reader = RecordReader::new(InMemorySource::from_buffer(&buffer));
//! let mut payloads = Vec::new();
//! loop {
//!     match reader.read_next() {
//!         Ok(payload) => payloads.push(payload),
//!         Err(e) if e.is_end_of_stream() => break,
//!         Err(e) => panic!("corrupt stream: {e}"),
//!     }
//! }
//! reader.close().unwrap();
//! assert_eq!(payloads, vec![b"One".to_vec(), b"Two".to_vec()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod format;
mod reader;
mod writer;

pub use config::{ReaderConfig, WriterConfig};
pub use error::{RecordError, RecordResult};
pub use format::{
    encode_frame, RecordHeader, HEADER_SIZE, MAGIC_SIZE, RECORD_MAGIC, SIZE_FIELD_SIZE,
};
pub use reader::{RecordReader, Records};
pub use writer::RecordWriter;
