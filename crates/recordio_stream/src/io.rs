//! Adapters from `std::io` streams to [`ByteSink`] and [`ByteSource`].

use crate::backend::{ByteSink, ByteSource};
use crate::error::{StreamError, StreamResult};
use std::io::{self, Read, Write};

/// Wraps any [`Write`] as a [`ByteSink`].
///
/// A single `write` call is forwarded to [`Write::write`] once, so a short
/// write from the inner stream surfaces as a short count. `close` flushes the
/// inner writer and drops it.
#[derive(Debug)]
pub struct IoSink<W: Write> {
    inner: Option<W>,
}

impl<W: Write> IoSink<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner: Some(inner) }
    }

    /// Returns a reference to the inner writer, if the sink is still open.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// Unwraps the inner writer without flushing it.
    ///
    /// Returns `None` if the sink has been closed.
    pub fn into_inner(self) -> Option<W> {
        self.inner
    }

    fn inner_mut(&mut self) -> StreamResult<&mut W> {
        self.inner.as_mut().ok_or(StreamError::Closed)
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        let inner = self.inner_mut()?;
        loop {
            match inner.write(data) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.inner_mut()?.flush()?;
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        let mut inner = self.inner.take().ok_or(StreamError::Closed)?;
        inner.flush()?;
        Ok(())
    }
}

/// Wraps any [`Read`] as a [`ByteSource`].
///
/// `Interrupted` errors from the inner reader are retried; every other error
/// is returned as [`StreamError::Io`].
#[derive(Debug)]
pub struct IoSource<R: Read> {
    inner: Option<R>,
}

impl<R: Read> IoSource<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner: Some(inner) }
    }

    /// Returns a reference to the inner reader, if the source is still open.
    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    /// Unwraps the inner reader.
    ///
    /// Returns `None` if the source has been closed.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        let inner = self.inner.as_mut().ok_or(StreamError::Closed)?;
        loop {
            match inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn close(&mut self) -> StreamResult<()> {
        self.inner.take().map(drop).ok_or(StreamError::Closed)
    }
}
