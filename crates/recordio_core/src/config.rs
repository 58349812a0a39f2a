//! Reader and writer configuration.

/// Configuration for a [`crate::RecordWriter`].
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// Whether to flush the sink after every record (safer but slower).
    pub flush_after_write: bool,
}

impl WriterConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to flush the sink after every record.
    #[must_use]
    pub const fn flush_after_write(mut self, value: bool) -> Self {
        self.flush_after_write = value;
        self
    }
}

/// Configuration for a [`crate::RecordReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Largest compressed payload a header may declare.
    ///
    /// Headers above the limit are rejected as format errors before any
    /// payload bytes are read. Defaults to the largest value the signed size
    /// field can hold, so the format itself imposes no bound.
    pub max_compressed_size: u64,

    /// Upper bound on bytes requested from the source in one read while
    /// collecting a payload.
    pub read_chunk_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_compressed_size: i64::MAX as u64,
            read_chunk_size: 64 * 1024, // 64 KB
        }
    }
}

impl ReaderConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest compressed payload a header may declare.
    #[must_use]
    pub const fn max_compressed_size(mut self, size: u64) -> Self {
        self.max_compressed_size = size;
        self
    }

    /// Sets the per-read chunk size used while collecting payloads.
    ///
    /// A value of zero is treated as one byte.
    #[must_use]
    pub const fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = if size == 0 { 1 } else { size };
        self
    }
}
