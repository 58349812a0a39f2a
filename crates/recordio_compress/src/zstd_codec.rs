//! Zstandard codec (requires the `zstd` feature).

use crate::error::{CompressError, CompressResult};
use crate::{Compressor, Decompressor};

const CODEC_NAME: &str = "zstd";

/// Zstandard single-frame codec.
///
/// Each payload becomes one self-contained zstd frame; the decoder reads the
/// frame to its end without needing the original length up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    /// Creates a codec at the library's default compression level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: zstd::DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the compression level (1 = fastest, 22 = smallest).
    #[must_use]
    pub const fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Returns the compression level.
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for ZstdCodec {
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        zstd::bulk::compress(input, self.level)
            .map_err(|e| CompressError::compression_failed(CODEC_NAME, e.to_string()))
    }
}

impl Decompressor for ZstdCodec {
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        zstd::stream::decode_all(input)
            .map_err(|e| CompressError::decompression_failed(CODEC_NAME, e.to_string()))
    }
}
