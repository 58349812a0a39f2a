//! Fault-injecting streams.
//!
//! These wrap the in-memory streams and misbehave on demand, so tests can
//! drive the reader and writer through short writes, short reads, I/O
//! failures and failing closes.
//!
//! ## Usage
//!
//! ```rust
//! use recordio_core::{RecordError, RecordWriter};
//! use recordio_testkit::FaultySink;
//!
//! let mut writer = RecordWriter::new(FaultySink::new().max_write(4));
//! let err = writer.write_record(b"does not fit").unwrap_err();
//! assert!(matches!(err, RecordError::ShortWrite { written: 4, .. }));
//! ```

use recordio_stream::{
    ByteSink, ByteSource, InMemorySink, InMemorySource, SharedBuffer, StreamError, StreamResult,
};

/// A sink that can accept partial writes, fail mid-stream, or fail to close.
#[derive(Debug)]
pub struct FaultySink {
    inner: InMemorySink,
    max_write: usize,
    fail_after_bytes: Option<usize>,
    fail_flush: bool,
    fail_close: bool,
    bytes_accepted: usize,
}

impl Default for FaultySink {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultySink {
    /// Creates a sink that behaves like [`InMemorySink`] until configured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: InMemorySink::new(),
            max_write: usize::MAX,
            fail_after_bytes: None,
            fail_flush: false,
            fail_close: false,
            bytes_accepted: 0,
        }
    }

    /// Accepts at most `bytes` per `write` call.
    #[must_use]
    pub fn max_write(mut self, bytes: usize) -> Self {
        self.max_write = bytes;
        self
    }

    /// Accepts `bytes` in total, then fails.
    ///
    /// A write that crosses the limit is accepted partially, the way a
    /// crash mid-write leaves a partial record behind.
    #[must_use]
    pub fn fail_after(mut self, bytes: usize) -> Self {
        self.fail_after_bytes = Some(bytes);
        self
    }

    /// Makes every `flush` fail.
    #[must_use]
    pub fn fail_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    /// Makes `close` fail.
    #[must_use]
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Returns a handle to the bytes accepted so far.
    #[must_use]
    pub fn buffer(&self) -> SharedBuffer {
        self.inner.buffer()
    }
}

impl ByteSink for FaultySink {
    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        let mut allowed = data.len().min(self.max_write);
        if let Some(limit) = self.fail_after_bytes {
            if self.bytes_accepted >= limit {
                return Err(StreamError::injected("simulated crash during write"));
            }
            allowed = allowed.min(limit - self.bytes_accepted);
        }
        let n = self.inner.write(&data[..allowed])?;
        self.bytes_accepted += n;
        Ok(n)
    }

    fn flush(&mut self) -> StreamResult<()> {
        if self.fail_flush {
            return Err(StreamError::injected("simulated failure during flush"));
        }
        self.inner.flush()
    }

    fn close(&mut self) -> StreamResult<()> {
        self.inner.close()?;
        if self.fail_close {
            return Err(StreamError::injected("simulated failure during close"));
        }
        Ok(())
    }
}

/// A source that can return short reads, fail mid-stream, or fail to close.
#[derive(Debug)]
pub struct FaultySource {
    inner: InMemorySource,
    max_read: usize,
    fail_at_position: Option<usize>,
    fail_close: bool,
}

impl FaultySource {
    /// Creates a source over `data` that behaves like [`InMemorySource`]
    /// until configured.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: InMemorySource::with_data(data),
            max_read: usize::MAX,
            fail_at_position: None,
            fail_close: false,
        }
    }

    /// Returns at most `bytes` per `read` call.
    #[must_use]
    pub fn max_read(mut self, bytes: usize) -> Self {
        self.max_read = bytes.max(1);
        self
    }

    /// Fails every read once `position` bytes have been consumed.
    #[must_use]
    pub fn fail_at(mut self, position: usize) -> Self {
        self.fail_at_position = Some(position);
        self
    }

    /// Makes `close` fail.
    #[must_use]
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.inner.position()
    }
}

impl ByteSource for FaultySource {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        let mut allowed = buf.len().min(self.max_read);
        if let Some(limit) = self.fail_at_position {
            let position = self.inner.position();
            if position >= limit {
                return Err(StreamError::injected("simulated failure during read"));
            }
            allowed = allowed.min(limit - position);
        }
        self.inner.read(&mut buf[..allowed])
    }

    fn close(&mut self) -> StreamResult<()> {
        self.inner.close()?;
        if self.fail_close {
            return Err(StreamError::injected("simulated failure during close"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_max_write_caps_each_call() {
        let mut sink = FaultySink::new().max_write(3);
        assert_eq!(sink.write(b"hello").unwrap(), 3);
        assert_eq!(sink.buffer().data(), b"hel");
    }

    #[test]
    fn sink_fail_after_writes_partial_then_fails() {
        let mut sink = FaultySink::new().fail_after(4);
        assert_eq!(sink.write(b"ab").unwrap(), 2);
        assert_eq!(sink.write(b"cdef").unwrap(), 2);
        assert!(matches!(sink.write(b"g"), Err(StreamError::Injected(_))));
        assert_eq!(sink.buffer().data(), b"abcd");
    }

    #[test]
    fn sink_fail_flush_and_close() {
        let mut sink = FaultySink::new().fail_flush().fail_close();
        assert!(sink.flush().is_err());
        assert!(matches!(sink.close(), Err(StreamError::Injected(_))));
        assert!(matches!(sink.write(b"x"), Err(StreamError::Closed)));
    }

    #[test]
    fn source_max_read_caps_each_call() {
        let mut source = FaultySource::new(b"hello".to_vec()).max_read(2);
        let mut buf = [0u8; 8];
        assert_eq!(source.read(&mut buf).unwrap(), 2);
        assert_eq!(source.read(&mut buf).unwrap(), 2);
        assert_eq!(source.read(&mut buf).unwrap(), 1);
        assert_eq!(source.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn source_fail_at_stops_exactly_there() {
        let mut source = FaultySource::new(b"hello".to_vec()).fail_at(3);
        let mut buf = [0u8; 8];
        assert_eq!(source.read(&mut buf).unwrap(), 3);
        assert!(matches!(source.read(&mut buf), Err(StreamError::Injected(_))));
        assert_eq!(source.position(), 3);
    }

    #[test]
    fn source_fail_close() {
        let mut source = FaultySource::new(Vec::new()).fail_close();
        assert!(matches!(source.close(), Err(StreamError::Injected(_))));
    }
}
