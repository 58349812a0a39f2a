//! Record writer.

use crate::config::WriterConfig;
use crate::error::{RecordError, RecordResult};
use crate::format::encode_frame;
use recordio_compress::{Compressor, Lz4Codec};
use recordio_stream::ByteSink;
use tracing::{debug, trace, warn};

/// Frames payloads into compressed records and appends them to a sink.
///
/// The writer owns its sink from construction until [`close`](Self::close)
/// (or drop). Each [`write_record`](Self::write_record) call compresses one
/// payload and hands the complete frame to the sink in a single `write`, so
/// records land in call order with no interleaving.
///
/// # Example
///
/// ```rust
/// use recordio_core::RecordWriter;
/// use recordio_stream::InMemorySink;
///
/// let sink = InMemorySink::new();
/// let buffer = sink.buffer();
///
/// let mut writer = RecordWriter::new(sink);
/// let written = writer.write_record(b"Hello!").unwrap();
/// writer.close().unwrap();
///
/// assert_eq!(buffer.len(), written);
/// ```
pub struct RecordWriter<S: ByteSink, C: Compressor = Lz4Codec> {
    /// `None` once closed.
    sink: Option<S>,
    codec: C,
    config: WriterConfig,
    records_written: u64,
    bytes_written: u64,
}

impl<S: ByteSink> RecordWriter<S> {
    /// Creates a writer that compresses with [`Lz4Codec`].
    ///
    /// No I/O happens until the first record is written.
    pub fn new(sink: S) -> Self {
        Self::with_codec(sink, Lz4Codec::new())
    }
}

impl<S: ByteSink, C: Compressor> RecordWriter<S, C> {
    /// Creates a writer with a specific compressor.
    pub fn with_codec(sink: S, codec: C) -> Self {
        Self::with_config(sink, codec, WriterConfig::default())
    }

    /// Creates a writer with a specific compressor and configuration.
    pub fn with_config(sink: S, codec: C, config: WriterConfig) -> Self {
        Self {
            sink: Some(sink),
            codec,
            config,
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Writes `payload` as a single record.
    ///
    /// Returns the number of bytes appended to the sink (header plus
    /// compressed payload).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The writer is closed ([`RecordError::Closed`])
    /// - The compressor fails ([`RecordError::Compression`])
    /// - The sink write fails or is short ([`RecordError::Write`],
    ///   [`RecordError::ShortWrite`]); the write is not retried
    /// - A configured flush fails ([`RecordError::Write`])
    pub fn write_record(&mut self, payload: &[u8]) -> RecordResult<usize> {
        let sink = self.sink.as_mut().ok_or(RecordError::Closed)?;

        let compressed = self
            .codec
            .compress(payload)
            .map_err(RecordError::Compression)?;
        let frame = encode_frame(&compressed)?;

        let written = sink.write(&frame).map_err(RecordError::Write)?;
        if written != frame.len() {
            return Err(RecordError::ShortWrite {
                expected: frame.len(),
                written,
            });
        }

        if self.config.flush_after_write {
            sink.flush().map_err(RecordError::Write)?;
        }

        self.records_written += 1;
        self.bytes_written += frame.len() as u64;
        trace!(
            payload_len = payload.len(),
            compressed_len = compressed.len(),
            "record written"
        );

        Ok(frame.len())
    }

    /// Closes the writer and releases its sink.
    ///
    /// The sink is released even if closing it fails; the writer is closed
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Close`] if the sink fails to close, or
    /// [`RecordError::Closed`] if the writer was already closed.
    pub fn close(&mut self) -> RecordResult<()> {
        let mut sink = self.sink.take().ok_or(RecordError::Closed)?;
        sink.close().map_err(RecordError::Close)?;
        debug!(
            records = self.records_written,
            bytes = self.bytes_written,
            "record writer closed"
        );
        Ok(())
    }

    /// Returns `true` once the writer has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Returns the number of records written.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Returns the number of bytes appended to the sink.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Returns the writer configuration.
    #[must_use]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }
}

impl<S: ByteSink, C: Compressor> Drop for RecordWriter<S, C> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.close() {
                warn!(error = %e, "failed to close sink of dropped record writer");
            }
        }
    }
}

impl<S: ByteSink, C: Compressor> std::fmt::Debug for RecordWriter<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordWriter")
            .field("closed", &self.is_closed())
            .field("records_written", &self.records_written)
            .field("bytes_written", &self.bytes_written)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
