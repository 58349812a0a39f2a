//! Error types for RecordIO core.

use recordio_compress::CompressError;
use recordio_stream::StreamError;
use thiserror::Error;

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors that can occur while writing or reading records.
///
/// [`RecordError::EndOfStream`] is the normal termination signal of a read
/// loop; every other variant means the stream is corrupt or an I/O layer
/// failed.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The compressor rejected the payload.
    #[error("compression failed: {0}")]
    Compression(#[source] CompressError),

    /// The decompressor could not decode a record payload.
    #[error("decompression failed: {0}")]
    Decompression(#[source] CompressError),

    /// The sink write or a configured flush failed.
    ///
    /// A write the sink accepts only partly is [`RecordError::ShortWrite`]
    /// instead; [`RecordError::is_write_error`] matches both.
    #[error("write failed: {0}")]
    Write(#[source] StreamError),

    /// The sink accepted fewer bytes than a full record.
    ///
    /// A write failure like [`RecordError::Write`]; the partial frame is
    /// left in the sink.
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite {
        /// Bytes in the record frame.
        expected: usize,
        /// Bytes the sink reported as written.
        written: usize,
    },

    /// The source read failed.
    #[error("read failed: {0}")]
    Read(#[source] StreamError),

    /// No bytes remain where the next record header would start.
    #[error("end of stream")]
    EndOfStream,

    /// The source ran out partway through a record.
    #[error("truncated record: expected {expected} bytes of {section}, got {actual}")]
    TruncatedRecord {
        /// Which part of the record was cut short.
        section: &'static str,
        /// Bytes the record required.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The record header is invalid.
    #[error("invalid record: {message}")]
    Format {
        /// Description of the format issue.
        message: String,
    },

    /// Releasing the underlying stream failed.
    #[error("close failed: {0}")]
    Close(#[source] StreamError),

    /// The reader or writer has already been closed.
    #[error("record stream is closed")]
    Closed,
}

impl RecordError {
    /// Creates a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates a truncated record error.
    pub fn truncated(section: &'static str, expected: usize, actual: usize) -> Self {
        Self::TruncatedRecord {
            section,
            expected,
            actual,
        }
    }

    /// Returns `true` for the clean end-of-stream signal.
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// Returns `true` for either kind of write failure.
    #[must_use]
    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write(_) | Self::ShortWrite { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_stream_is_distinguishable() {
        assert!(RecordError::EndOfStream.is_end_of_stream());
        assert!(!RecordError::Closed.is_end_of_stream());
        assert!(!RecordError::truncated("payload", 10, 3).is_end_of_stream());
        assert!(!RecordError::format("bad magic").is_end_of_stream());
    }

    #[test]
    fn short_write_counts_as_write_error() {
        let err = RecordError::ShortWrite {
            expected: 20,
            written: 7,
        };
        assert!(err.is_write_error());
        assert!(RecordError::Write(StreamError::Closed).is_write_error());
        assert!(!RecordError::Closed.is_write_error());
    }

    #[test]
    fn messages_carry_context() {
        let err = RecordError::truncated("header", 16, 5);
        assert_eq!(
            err.to_string(),
            "truncated record: expected 16 bytes of header, got 5"
        );
        assert_eq!(
            RecordError::format("bad magic").to_string(),
            "invalid record: bad magic"
        );
    }
}
