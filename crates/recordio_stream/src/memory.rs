//! In-memory sink and source for testing.

use crate::backend::{ByteSink, ByteSource};
use crate::error::{StreamError, StreamResult};
use parking_lot::RwLock;
use std::sync::Arc;

/// A cloneable handle to bytes written by an [`InMemorySink`].
///
/// The handle stays valid after the sink is closed or dropped, so a test can
/// inspect what was written and feed it to an [`InMemorySource`].
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    data: Arc<RwLock<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates a new empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all bytes in the buffer.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    /// Returns the number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn extend(&self, bytes: &[u8]) {
        self.data.write().extend_from_slice(bytes);
    }
}

/// An in-memory byte sink.
///
/// This sink is suitable for:
/// - Unit tests
/// - Integration tests
/// - Building a record stream in memory before shipping it elsewhere
///
/// # Example
///
/// ```rust
/// use recordio_stream::{ByteSink, InMemorySink};
///
/// let mut sink = InMemorySink::new();
/// let buffer = sink.buffer();
/// assert_eq!(sink.write(b"test data").unwrap(), 9);
/// sink.close().unwrap();
/// assert_eq!(buffer.data(), b"test data");
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    buffer: SharedBuffer,
    closed: bool,
}

impl InMemorySink {
    /// Creates a new empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that appends to an existing buffer.
    #[must_use]
    pub fn with_buffer(buffer: SharedBuffer) -> Self {
        Self {
            buffer,
            closed: false,
        }
    }

    /// Returns a handle to the bytes written so far.
    #[must_use]
    pub fn buffer(&self) -> SharedBuffer {
        self.buffer.clone()
    }

    /// Returns a copy of all bytes written so far.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.buffer.data()
    }

    /// Returns `true` once the sink has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSink for InMemorySink {
    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.buffer.extend(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.closed = true;
        Ok(())
    }
}

/// An in-memory byte source over a fixed byte vector.
///
/// # Example
///
/// ```rust
/// use recordio_stream::{ByteSource, InMemorySource};
///
/// let mut source = InMemorySource::with_data(b"hello".to_vec());
/// let mut buf = [0u8; 8];
/// assert_eq!(source.read(&mut buf).unwrap(), 5);
/// assert_eq!(source.read(&mut buf).unwrap(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySource {
    data: Vec<u8>,
    position: usize,
    closed: bool,
}

impl InMemorySource {
    /// Creates a source that yields `data` and then reports end of data.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            closed: false,
        }
    }

    /// Creates a source over a snapshot of `buffer`.
    #[must_use]
    pub fn from_buffer(buffer: &SharedBuffer) -> Self {
        Self::with_data(buffer.data())
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns `true` once the source has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSource for InMemorySource {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn close(&mut self) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.closed = true;
        Ok(())
    }
}
