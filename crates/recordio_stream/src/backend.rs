//! Byte sink and byte source trait definitions.

use crate::error::StreamResult;

/// A writable, closable byte sink.
///
/// Sinks are **opaque byte movers**. They accept bytes in order and hand them
/// to whatever lies underneath (a file, a socket, a buffer). Record framing is
/// owned entirely by the layer above.
///
/// # Invariants
///
/// - Bytes reach the underlying medium in the order they were written
/// - `write` returns how many bytes of `data` were accepted, which may be
///   fewer than `data.len()`
/// - After `close` succeeds or fails, every further call returns
///   [`crate::StreamError::Closed`]
///
/// # Implementors
///
/// - [`super::InMemorySink`] - For testing
/// - [`super::FileSink`] - For persistent storage
/// - [`super::IoSink`] - For any [`std::io::Write`]
pub trait ByteSink {
    /// Writes `data` to the sink.
    ///
    /// Returns the number of bytes accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink is closed or an I/O error occurs.
    fn write(&mut self, data: &[u8]) -> StreamResult<usize>;

    /// Pushes any buffered bytes to the underlying medium.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink is closed or the flush fails.
    fn flush(&mut self) -> StreamResult<()> {
        Ok(())
    }

    /// Releases the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing the underlying medium fails, or if the
    /// sink was already closed.
    fn close(&mut self) -> StreamResult<()>;
}

/// A readable, closable byte source.
///
/// # Invariants
///
/// - `read` may return fewer bytes than requested without error
/// - `read` returning `0` for a non-empty buffer means no more data
/// - After `close`, every further call returns [`crate::StreamError::Closed`]
///
/// # Implementors
///
/// - [`super::InMemorySource`] - For testing
/// - [`super::FileSource`] - For persistent storage
/// - [`super::IoSource`] - For any [`std::io::Read`]
pub trait ByteSource {
    /// Reads up to `buf.len()` bytes into `buf`.
    ///
    /// Returns the number of bytes read.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is closed or an I/O error occurs.
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize>;

    /// Releases the source.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing the underlying medium fails, or if the
    /// source was already closed.
    fn close(&mut self) -> StreamResult<()>;
}

impl<S: ByteSink + ?Sized> ByteSink for Box<S> {
    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        (**self).write(data)
    }

    fn flush(&mut self) -> StreamResult<()> {
        (**self).flush()
    }

    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        (**self).read(buf)
    }

    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }
}
