//! File-based sink and source for persistent record streams.

use crate::backend::{ByteSink, ByteSource};
use crate::error::{StreamError, StreamResult};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// A file-backed byte sink.
///
/// Writes go through a [`BufWriter`]. Data survives process restarts once the
/// sink is closed.
///
/// # Durability
///
/// - `flush()` pushes buffered bytes to the OS
/// - `close()` flushes, then calls `File::sync_all()` so data is on disk
///
/// # Example
///
/// ```no_run
/// use recordio_stream::{ByteSink, FileSink};
/// use std::path::Path;
///
/// let mut sink = FileSink::create(Path::new("records.rio")).unwrap();
/// sink.write(b"persistent data").unwrap();
/// sink.close().unwrap();
/// ```
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl FileSink {
    /// Creates a new file at `path`, truncating any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> StreamResult<Self> {
        let file = File::create(path)?;
        Ok(Self::from_file(path, file))
    }

    /// Opens `path` for appending, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn append(path: &Path) -> StreamResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_file(path, file))
    }

    /// Creates a new file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be created.
    pub fn create_with_dirs(path: &Path) -> StreamResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::create(path)
    }

    fn from_file(path: &Path, file: File) -> Self {
        Self {
            path: path.to_path_buf(),
            file: Some(BufWriter::new(file)),
        }
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_mut(&mut self) -> StreamResult<&mut BufWriter<File>> {
        self.file.as_mut().ok_or(StreamError::Closed)
    }
}

impl ByteSink for FileSink {
    fn write(&mut self, data: &[u8]) -> StreamResult<usize> {
        let file = self.file_mut()?;
        file.write_all(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.file_mut()?.flush()?;
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        let file = self.file.take().ok_or(StreamError::Closed)?;
        let file = file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}

/// A file-backed byte source.
///
/// # Example
///
/// ```no_run
/// use recordio_stream::{ByteSource, FileSource};
/// use std::path::Path;
///
/// let mut source = FileSource::open(Path::new("records.rio")).unwrap();
/// let mut buf = [0u8; 16];
/// let n = source.read(&mut buf).unwrap();
/// source.close().unwrap();
/// ```
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Option<BufReader<File>>,
}

impl FileSource {
    /// Opens the file at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> StreamResult<Self> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(BufReader::new(file)),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        let file = self.file.as_mut().ok_or(StreamError::Closed)?;
        loop {
            match file.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn close(&mut self) -> StreamResult<()> {
        self.file.take().map(drop).ok_or(StreamError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_all(source: &mut FileSource) -> Vec<u8> {
        let mut out = Vec::new();
        let mut buf = [0u8; 4];
        loop {
            let n = source.read(&mut buf).unwrap();
            if n == 0 {
                return out;
            }
            out.extend_from_slice(&buf[..n]);
        }
    }

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.rio");

        let sink = FileSink::create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(sink.path(), path);
    }

    #[test]
    fn file_write_close_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.rio");

        let mut sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.write(b"hello").unwrap(), 5);
        assert_eq!(sink.write(b" world").unwrap(), 6);
        sink.close().unwrap();

        let mut source = FileSource::open(&path).unwrap();
        assert_eq!(read_all(&mut source), b"hello world");
        source.close().unwrap();
    }

    #[test]
    fn file_create_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.rio");

        let mut sink = FileSink::create(&path).unwrap();
        sink.write(b"old content").unwrap();
        sink.close().unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        sink.write(b"new").unwrap();
        sink.close().unwrap();

        let mut source = FileSource::open(&path).unwrap();
        assert_eq!(read_all(&mut source), b"new");
    }

    #[test]
    fn file_append_keeps_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.rio");

        let mut sink = FileSink::create(&path).unwrap();
        sink.write(b"one").unwrap();
        sink.close().unwrap();

        let mut sink = FileSink::append(&path).unwrap();
        sink.write(b"two").unwrap();
        sink.close().unwrap();

        let mut source = FileSource::open(&path).unwrap();
        assert_eq!(read_all(&mut source), b"onetwo");
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("path").join("test.rio");

        let mut sink = FileSink::create_with_dirs(&path).unwrap();
        sink.close().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_open_missing_fails() {
        let dir = tempdir().unwrap();
        let result = FileSource::open(&dir.path().join("missing.rio"));
        assert!(matches!(result, Err(StreamError::Io(_))));
    }

    #[test]
    fn file_sink_rejects_after_close() {
        let dir = tempdir().unwrap();
        let mut sink = FileSink::create(&dir.path().join("test.rio")).unwrap();
        sink.close().unwrap();

        assert!(matches!(sink.write(b"x"), Err(StreamError::Closed)));
        assert!(matches!(sink.flush(), Err(StreamError::Closed)));
        assert!(matches!(sink.close(), Err(StreamError::Closed)));
    }

    #[test]
    fn file_source_rejects_after_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.rio");
        FileSink::create(&path).unwrap().close().unwrap();

        let mut source = FileSource::open(&path).unwrap();
        source.close().unwrap();
        let mut buf = [0u8; 1];
        assert!(matches!(source.read(&mut buf), Err(StreamError::Closed)));
        assert!(matches!(source.close(), Err(StreamError::Closed)));
    }
}
