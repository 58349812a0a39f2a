//! Record reader.

use crate::config::ReaderConfig;
use crate::error::{RecordError, RecordResult};
use crate::format::{
    check_magic, decode_magic, validate_size, HEADER_SIZE, MAGIC_SIZE, SIZE_FIELD_SIZE,
};
use recordio_compress::{Decompressor, Lz4Codec};
use recordio_stream::ByteSource;
use tracing::{debug, trace, warn};

/// Parses framed records from a source, one per call, in write order.
///
/// # Error Handling
///
/// - No bytes at a record boundary → [`RecordError::EndOfStream`]
/// - Wrong magic → [`RecordError::Format`], after consuming exactly the
///   8 magic bytes
/// - Negative or over-limit size → [`RecordError::Format`]
/// - Source exhausted inside a header or payload →
///   [`RecordError::TruncatedRecord`]
/// - Undecodable payload → [`RecordError::Decompression`]
///
/// Short reads from the source are retried until the requested bytes arrive
/// or the source reports end of data.
///
/// # Example
///
/// ```rust
/// use recordio_core::{RecordReader, RecordWriter};
/// use recordio_stream::{InMemorySink, InMemorySource};
///
/// let sink = InMemorySink::new();
/// let buffer = sink.buffer();
/// let mut writer = RecordWriter::new(sink);
/// writer.write_record(b"Hello!").unwrap();
/// writer.close().unwrap();
///
/// let mut reader = RecordReader::new(InMemorySource::from_buffer(&buffer));
/// assert_eq!(reader.read_next().unwrap(), b"Hello!");
/// assert!(reader.read_next().unwrap_err().is_end_of_stream());
/// ```
pub struct RecordReader<S: ByteSource, D: Decompressor = Lz4Codec> {
    /// `None` once closed.
    source: Option<S>,
    codec: D,
    config: ReaderConfig,
    records_read: u64,
}

impl<S: ByteSource> RecordReader<S> {
    /// Creates a reader that decompresses with [`Lz4Codec`].
    ///
    /// No I/O happens until the first record is read.
    pub fn new(source: S) -> Self {
        Self::with_codec(source, Lz4Codec::new())
    }
}

impl<S: ByteSource, D: Decompressor> RecordReader<S, D> {
    /// Creates a reader with a specific decompressor.
    pub fn with_codec(source: S, codec: D) -> Self {
        Self::with_config(source, codec, ReaderConfig::default())
    }

    /// Creates a reader with a specific decompressor and configuration.
    pub fn with_config(source: S, codec: D, config: ReaderConfig) -> Self {
        Self {
            source: Some(source),
            codec,
            config,
            records_read: 0,
        }
    }

    /// Reads the next record and returns its original payload.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EndOfStream`] when the stream is exhausted at a
    /// record boundary, [`RecordError::Closed`] after close, and the errors
    /// listed on [`RecordReader`] for malformed records or source failures.
    pub fn read_next(&mut self) -> RecordResult<Vec<u8>> {
        let source = self.source.as_mut().ok_or(RecordError::Closed)?;

        let mut magic = [0u8; MAGIC_SIZE];
        match read_full(source, &mut magic)? {
            0 => return Err(RecordError::EndOfStream),
            MAGIC_SIZE => {}
            got => return Err(RecordError::truncated("header", HEADER_SIZE, got)),
        }
        check_magic(decode_magic(&magic)).inspect_err(|e| {
            warn!(record = self.records_read, error = %e, "rejected record header");
        })?;

        let mut size = [0u8; SIZE_FIELD_SIZE];
        let got = read_full(source, &mut size)?;
        if got < SIZE_FIELD_SIZE {
            return Err(RecordError::truncated("header", HEADER_SIZE, MAGIC_SIZE + got));
        }
        let compressed_size = i64::from_le_bytes(size);
        let len = validate_size(compressed_size, self.config.max_compressed_size).inspect_err(
            |e| {
                warn!(record = self.records_read, error = %e, "rejected record header");
            },
        )?;

        let compressed = read_payload(source, len, self.config.read_chunk_size)?;
        let payload = self
            .codec
            .decompress(&compressed)
            .map_err(RecordError::Decompression)?;

        self.records_read += 1;
        trace!(
            compressed_len = len,
            payload_len = payload.len(),
            "record read"
        );

        Ok(payload)
    }

    /// Reads the next record, mapping a clean end of stream to `None`.
    ///
    /// # Errors
    ///
    /// Returns every error [`read_next`](Self::read_next) does except
    /// [`RecordError::EndOfStream`].
    pub fn try_next(&mut self) -> RecordResult<Option<Vec<u8>>> {
        match self.read_next() {
            Ok(payload) => Ok(Some(payload)),
            Err(RecordError::EndOfStream) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns an iterator over the remaining records.
    ///
    /// The iterator ends after the last record, or after yielding the first
    /// error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// for result in reader.records() {
    ///     let payload = result?;
    ///     // Process payload...
    /// }
    /// ```
    pub fn records(&mut self) -> Records<'_, S, D> {
        Records {
            reader: self,
            finished: false,
        }
    }

    /// Closes the reader and releases its source.
    ///
    /// The source is released even if closing it fails.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Close`] if the source fails to close, or
    /// [`RecordError::Closed`] if the reader was already closed.
    pub fn close(&mut self) -> RecordResult<()> {
        let mut source = self.source.take().ok_or(RecordError::Closed)?;
        source.close().map_err(RecordError::Close)?;
        debug!(records = self.records_read, "record reader closed");
        Ok(())
    }

    /// Returns `true` once the reader has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Returns the number of records read successfully.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Returns the reader configuration.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

impl<S: ByteSource, D: Decompressor> Drop for RecordReader<S, D> {
    fn drop(&mut self) {
        if let Some(mut source) = self.source.take() {
            if let Err(e) = source.close() {
                warn!(error = %e, "failed to close source of dropped record reader");
            }
        }
    }
}

impl<S: ByteSource, D: Decompressor> std::fmt::Debug for RecordReader<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordReader")
            .field("closed", &self.is_closed())
            .field("records_read", &self.records_read)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Iterator over the records of a [`RecordReader`].
///
/// Created by [`RecordReader::records`].
pub struct Records<'a, S: ByteSource, D: Decompressor> {
    reader: &'a mut RecordReader<S, D>,
    finished: bool,
}

impl<S: ByteSource, D: Decompressor> Iterator for Records<'_, S, D> {
    type Item = RecordResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.reader.try_next() {
            Ok(Some(payload)) => Some(Ok(payload)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads into `buf` until it is full or the source reports end of data.
///
/// Returns the number of bytes read; less than `buf.len()` only at end of
/// data.
fn read_full<S: ByteSource>(source: &mut S, buf: &mut [u8]) -> RecordResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..]).map_err(RecordError::Read)?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Reads exactly `len` payload bytes, growing the buffer one chunk at a time.
///
/// A header that declares more bytes than the source holds fails as truncated
/// after reading what is there, without reserving `len` bytes up front.
fn read_payload<S: ByteSource>(source: &mut S, len: usize, chunk: usize) -> RecordResult<Vec<u8>> {
    let chunk = chunk.max(1);
    let mut payload = Vec::with_capacity(len.min(chunk));
    while payload.len() < len {
        let start = payload.len();
        let want = (len - start).min(chunk);
        payload.resize(start + want, 0);
        let got = read_full(source, &mut payload[start..])?;
        if got < want {
            return Err(RecordError::truncated("payload", len, start + got));
        }
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{encode_frame, RecordHeader, RECORD_MAGIC};
    use crate::writer::RecordWriter;
    use recordio_compress::Uncompressed;
    use recordio_stream::{InMemorySink, InMemorySource, StreamError, StreamResult};

    /// Hands out at most one byte per read.
    struct TrickleSource(InMemorySource);

    impl ByteSource for TrickleSource {
        fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
            let end = buf.len().min(1);
            self.0.read(&mut buf[..end])
        }

        fn close(&mut self) -> StreamResult<()> {
            self.0.close()
        }
    }

    /// Fails every read.
    struct BrokenSource;

    impl ByteSource for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> StreamResult<usize> {
            Err(StreamError::injected("read"))
        }

        fn close(&mut self) -> StreamResult<()> {
            Err(StreamError::injected("close"))
        }
    }

    fn write_all(payloads: &[&[u8]]) -> Vec<u8> {
        let sink = InMemorySink::new();
        let buffer = sink.buffer();
        let mut writer = RecordWriter::new(sink);
        for payload in payloads {
            writer.write_record(payload).unwrap();
        }
        writer.close().unwrap();
        buffer.data()
    }

    fn reader_over(data: Vec<u8>) -> RecordReader<InMemorySource> {
        RecordReader::new(InMemorySource::with_data(data))
    }

    fn raw_reader_over(data: Vec<u8>) -> RecordReader<InMemorySource, Uncompressed> {
        RecordReader::with_codec(InMemorySource::with_data(data), Uncompressed)
    }

    #[test]
    fn read_single_record() {
        let mut reader = reader_over(write_all(&[b"Hello!"]));
        assert_eq!(reader.read_next().unwrap(), b"Hello!");
        assert!(matches!(reader.read_next(), Err(RecordError::EndOfStream)));
        assert_eq!(reader.records_read(), 1);
    }

    #[test]
    fn read_preserves_order() {
        let mut reader = reader_over(write_all(&[b"One", b"Two"]));
        assert_eq!(reader.read_next().unwrap(), b"One");
        assert_eq!(reader.read_next().unwrap(), b"Two");
        assert!(reader.read_next().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn read_empty_payload() {
        let mut reader = reader_over(write_all(&[b"", b"after"]));
        assert!(reader.read_next().unwrap().is_empty());
        assert_eq!(reader.read_next().unwrap(), b"after");
    }

    #[test]
    fn empty_stream_is_end_of_stream() {
        let mut reader = reader_over(Vec::new());
        assert!(matches!(reader.read_next(), Err(RecordError::EndOfStream)));
        assert!(matches!(reader.read_next(), Err(RecordError::EndOfStream)));
    }

    #[test]
    fn bad_magic_is_format_error_and_consumes_only_magic() {
        let mut data = write_all(&[b"Hello!"]);
        data[0] ^= 0xFF;
        let total = data.len();
        let mut reader = reader_over(data);

        assert!(matches!(reader.read_next(), Err(RecordError::Format { .. })));
        let source = reader.source.as_ref().unwrap();
        assert_eq!(source.position(), MAGIC_SIZE);
        assert_eq!(source.remaining(), total - MAGIC_SIZE);
    }

    #[test]
    fn negative_size_is_format_error() {
        let mut data = RecordHeader {
            magic: RECORD_MAGIC,
            compressed_size: -5,
        }
        .encode()
        .to_vec();
        data.extend_from_slice(b"xxxxx");

        let err = raw_reader_over(data).read_next().unwrap_err();
        assert!(matches!(err, RecordError::Format { .. }));
    }

    #[test]
    fn size_over_limit_is_format_error() {
        let data = encode_frame(&[0u8; 100]).unwrap().to_vec();
        let config = ReaderConfig::new().max_compressed_size(99);
        let mut reader =
            RecordReader::with_config(InMemorySource::with_data(data), Uncompressed, config);
        assert!(matches!(reader.read_next(), Err(RecordError::Format { .. })));
    }

    #[test]
    fn partial_magic_is_truncated() {
        let data = RECORD_MAGIC.to_le_bytes()[..5].to_vec();
        let err = raw_reader_over(data).read_next().unwrap_err();
        assert!(matches!(
            err,
            RecordError::TruncatedRecord {
                section: "header",
                expected: HEADER_SIZE,
                actual: 5
            }
        ));
    }

    #[test]
    fn partial_size_field_is_truncated() {
        let data = encode_frame(b"abc").unwrap()[..12].to_vec();
        let err = raw_reader_over(data).read_next().unwrap_err();
        assert!(matches!(
            err,
            RecordError::TruncatedRecord {
                section: "header",
                actual: 12,
                ..
            }
        ));
    }

    #[test]
    fn header_without_payload_is_truncated() {
        let data = encode_frame(b"abcdef").unwrap()[..HEADER_SIZE].to_vec();
        let err = raw_reader_over(data).read_next().unwrap_err();
        assert!(matches!(
            err,
            RecordError::TruncatedRecord {
                section: "payload",
                expected: 6,
                actual: 0
            }
        ));
    }

    #[test]
    fn cut_payload_is_truncated() {
        let frame = encode_frame(b"abcdef").unwrap();
        let data = frame[..frame.len() - 2].to_vec();
        let err = raw_reader_over(data).read_next().unwrap_err();
        assert!(matches!(
            err,
            RecordError::TruncatedRecord {
                section: "payload",
                expected: 6,
                actual: 4
            }
        ));
    }

    #[test]
    fn huge_declared_size_on_short_stream_is_truncated() {
        let mut data = RecordHeader {
            magic: RECORD_MAGIC,
            compressed_size: i64::MAX,
        }
        .encode()
        .to_vec();
        data.extend_from_slice(&[1, 2, 3]);

        let err = raw_reader_over(data).read_next().unwrap_err();
        assert!(matches!(
            err,
            RecordError::TruncatedRecord {
                section: "payload",
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn payload_spanning_many_chunks() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let data = encode_frame(&payload).unwrap().to_vec();
        let config = ReaderConfig::new().read_chunk_size(7);
        let mut reader =
            RecordReader::with_config(InMemorySource::with_data(data), Uncompressed, config);
        assert_eq!(reader.read_next().unwrap(), payload);
    }

    #[test]
    fn short_reads_are_retried() {
        let data = write_all(&[b"One", b"Two", b"Three"]);
        let mut reader = RecordReader::new(TrickleSource(InMemorySource::with_data(data)));
        assert_eq!(reader.read_next().unwrap(), b"One");
        assert_eq!(reader.read_next().unwrap(), b"Two");
        assert_eq!(reader.read_next().unwrap(), b"Three");
        assert!(reader.read_next().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn corrupt_payload_is_decompression_error() {
        // Declares 16 bytes, then a literal run that overruns the input.
        let data = encode_frame(&[0x10, 0, 0, 0, 0xFF]).unwrap().to_vec();
        let err = reader_over(data).read_next().unwrap_err();
        assert!(matches!(err, RecordError::Decompression(_)));
    }

    #[test]
    fn payload_shorter_than_declared_is_decompression_error() {
        // Prefix declares u32::MAX bytes; the block is one empty token.
        let data = encode_frame(&[0xff, 0xff, 0xff, 0xff, 0x00]).unwrap().to_vec();
        let err = reader_over(data).read_next().unwrap_err();
        assert!(matches!(err, RecordError::Decompression(_)));

        let data = encode_frame(&[6, 0, 0, 0, 0x30, b'H', b'e', b'l']).unwrap().to_vec();
        let err = reader_over(data).read_next().unwrap_err();
        assert!(matches!(err, RecordError::Decompression(_)));
    }

    #[test]
    fn source_failure_is_read_error() {
        let mut reader = RecordReader::new(BrokenSource);
        assert!(matches!(reader.read_next(), Err(RecordError::Read(_))));
    }

    #[test]
    fn read_after_close_fails() {
        let mut reader = reader_over(write_all(&[b"unread"]));
        reader.close().unwrap();
        assert!(reader.is_closed());
        assert!(matches!(reader.read_next(), Err(RecordError::Closed)));
        assert!(matches!(reader.close(), Err(RecordError::Closed)));
    }

    #[test]
    fn close_failure_is_close_error() {
        let mut reader = RecordReader::new(BrokenSource);
        assert!(matches!(reader.close(), Err(RecordError::Close(_))));
        assert!(matches!(reader.read_next(), Err(RecordError::Closed)));
    }

    #[test]
    fn try_next_maps_end_to_none() {
        let mut reader = reader_over(write_all(&[b"only"]));
        assert_eq!(reader.try_next().unwrap().unwrap(), b"only");
        assert!(reader.try_next().unwrap().is_none());
    }

    #[test]
    fn records_iterates_all() {
        let mut reader = reader_over(write_all(&[b"a", b"b", b"c"]));
        let payloads: Vec<Vec<u8>> = reader.records().collect::<RecordResult<_>>().unwrap();
        assert_eq!(payloads, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn records_stops_after_first_error() {
        let mut data = write_all(&[b"good"]);
        data.extend_from_slice(&[0u8; 20]);
        let mut reader = reader_over(data);

        let results: Vec<_> = reader.records().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), b"good");
        assert!(matches!(results[1], Err(RecordError::Format { .. })));
    }

    #[test]
    fn reader_is_independent_of_writer_state() {
        // Frames built by hand decode the same as frames from a writer.
        let mut data = encode_frame(b"first").unwrap().to_vec();
        data.extend_from_slice(&encode_frame(b"second").unwrap());
        let mut reader = raw_reader_over(data);
        assert_eq!(reader.read_next().unwrap(), b"first");
        assert_eq!(reader.read_next().unwrap(), b"second");
    }

    proptest::proptest! {
        #[test]
        fn arbitrary_payloads_roundtrip_in_order(
            payloads in proptest::collection::vec(
                proptest::collection::vec(proptest::prelude::any::<u8>(), 0..512),
                0..16,
            )
        ) {
            let refs: Vec<&[u8]> = payloads.iter().map(Vec::as_slice).collect();
            let mut reader = reader_over(write_all(&refs));
            for expected in &payloads {
                proptest::prop_assert_eq!(&reader.read_next().unwrap(), expected);
            }
            proptest::prop_assert!(reader.read_next().unwrap_err().is_end_of_stream());
        }
    }
}
