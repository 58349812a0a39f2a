//! Test fixtures and stream helpers.
//!
//! Provides temporary record files and shortcuts for encoding and decoding
//! whole streams in memory.

use recordio_compress::{Compressor, Decompressor, Uncompressed};
use recordio_core::{RecordError, RecordReader, RecordResult, RecordWriter};
use recordio_stream::{FileSink, FileSource, InMemorySink, InMemorySource};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A record file in a temporary directory, removed on drop.
pub struct TempRecordFile {
    path: PathBuf,
    /// Kept alive to prevent cleanup.
    _temp_dir: TempDir,
}

impl TempRecordFile {
    /// Creates a new (not yet existing) record file path.
    pub fn new() -> Self {
        Self::named("records.rio")
    }

    /// Creates a record file path with a specific file name.
    pub fn named(name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self {
            path: temp_dir.path().join(name),
            _temp_dir: temp_dir,
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a writer that truncates the file.
    pub fn writer(&self) -> RecordWriter<FileSink> {
        RecordWriter::new(FileSink::create(&self.path).expect("Failed to create record file"))
    }

    /// Opens a writer that appends to the file.
    pub fn appender(&self) -> RecordWriter<FileSink> {
        RecordWriter::new(FileSink::append(&self.path).expect("Failed to open record file"))
    }

    /// Opens a reader positioned at the start of the file.
    pub fn reader(&self) -> RecordReader<FileSource> {
        RecordReader::new(FileSource::open(&self.path).expect("Failed to open record file"))
    }

    /// Writes `payloads` as records, replacing any previous content.
    pub fn write_all<P: AsRef<[u8]>>(&self, payloads: &[P]) {
        let mut writer = self.writer();
        for payload in payloads {
            writer
                .write_record(payload.as_ref())
                .expect("Failed to write record");
        }
        writer.close().expect("Failed to close record writer");
    }

    /// Reads all records until end of stream.
    pub fn read_all(&self) -> RecordResult<Vec<Vec<u8>>> {
        let mut reader = self.reader();
        let payloads = reader.records().collect::<RecordResult<Vec<_>>>()?;
        reader.close()?;
        Ok(payloads)
    }

    /// Returns the raw file contents.
    pub fn bytes(&self) -> Vec<u8> {
        fs::read(&self.path).expect("Failed to read record file")
    }

    /// Replaces the raw file contents.
    pub fn set_bytes(&self, data: &[u8]) {
        fs::write(&self.path, data).expect("Failed to write record file");
    }

    /// Cuts the file down to `len` bytes.
    pub fn truncate(&self, len: usize) {
        let mut data = self.bytes();
        data.truncate(len);
        self.set_bytes(&data);
    }
}

impl Default for TempRecordFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes `payloads` into an in-memory stream with the default codec.
pub fn encode_records<P: AsRef<[u8]>>(payloads: &[P]) -> Vec<u8> {
    let sink = InMemorySink::new();
    let buffer = sink.buffer();
    write_into(RecordWriter::new(sink), payloads);
    buffer.data()
}

/// Encodes `payloads` into an in-memory stream with a specific codec.
pub fn encode_records_with<C: Compressor, P: AsRef<[u8]>>(codec: C, payloads: &[P]) -> Vec<u8> {
    let sink = InMemorySink::new();
    let buffer = sink.buffer();
    write_into(RecordWriter::with_codec(sink, codec), payloads);
    buffer.data()
}

/// Encodes `payloads` without compression, so payload bytes appear verbatim.
pub fn encode_raw_records<P: AsRef<[u8]>>(payloads: &[P]) -> Vec<u8> {
    encode_records_with(Uncompressed, payloads)
}

/// Decodes an in-memory stream with the default codec.
///
/// Stops at end of stream; any other failure is returned.
pub fn decode_records(data: &[u8]) -> RecordResult<Vec<Vec<u8>>> {
    collect_from(RecordReader::new(InMemorySource::with_data(data.to_vec())))
}

/// Decodes an in-memory stream with a specific codec.
pub fn decode_records_with<D: Decompressor>(codec: D, data: &[u8]) -> RecordResult<Vec<Vec<u8>>> {
    collect_from(RecordReader::with_codec(
        InMemorySource::with_data(data.to_vec()),
        codec,
    ))
}

/// Decodes records until the first failure.
///
/// Returns the payloads recovered before it and the failure that stopped
/// the read ([`RecordError::EndOfStream`] for a clean stream).
pub fn decode_until_error(data: &[u8]) -> (Vec<Vec<u8>>, RecordError) {
    let mut reader = RecordReader::new(InMemorySource::with_data(data.to_vec()));
    let mut payloads = Vec::new();
    loop {
        match reader.read_next() {
            Ok(payload) => payloads.push(payload),
            Err(e) => return (payloads, e),
        }
    }
}

fn write_into<S, C, P>(mut writer: RecordWriter<S, C>, payloads: &[P])
where
    S: recordio_stream::ByteSink,
    C: Compressor,
    P: AsRef<[u8]>,
{
    for payload in payloads {
        writer
            .write_record(payload.as_ref())
            .expect("Failed to write record");
    }
    writer.close().expect("Failed to close record writer");
}

fn collect_from<S, D>(mut reader: RecordReader<S, D>) -> RecordResult<Vec<Vec<u8>>>
where
    S: recordio_stream::ByteSource,
    D: Decompressor,
{
    let payloads = reader.records().collect::<RecordResult<Vec<_>>>()?;
    reader.close()?;
    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_roundtrip() {
        let file = TempRecordFile::new();
        file.write_all(&["One", "Two"]);
        assert_eq!(
            file.read_all().unwrap(),
            vec![b"One".to_vec(), b"Two".to_vec()]
        );
    }

    #[test]
    fn temp_file_truncate() {
        let file = TempRecordFile::new();
        file.write_all(&["Hello!"]);
        let len = file.bytes().len();
        file.truncate(len - 1);
        assert_eq!(file.bytes().len(), len - 1);
    }

    #[test]
    fn memory_roundtrip() {
        let data = encode_records(&["a", "bb", ""]);
        assert_eq!(
            decode_records(&data).unwrap(),
            vec![b"a".to_vec(), b"bb".to_vec(), Vec::new()]
        );
    }

    #[test]
    fn decode_until_error_reports_end_of_stream() {
        let data = encode_raw_records(&["x"]);
        let (payloads, err) = decode_until_error(&data);
        assert_eq!(payloads, vec![b"x".to_vec()]);
        assert!(err.is_end_of_stream());
    }
}
