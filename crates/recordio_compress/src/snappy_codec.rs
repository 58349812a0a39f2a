//! Snappy raw block codec.

use crate::error::{CompressError, CompressResult};
use crate::{Compressor, Decompressor};
use snap::raw::{decompress_len, Decoder, Encoder};

const CODEC_NAME: &str = "snappy";

/// Snappy codec in the raw block format (no framing stream).
///
/// A block starts with the original length as a varint, so each payload
/// decodes on its own. This is the block format other Snappy
/// implementations produce with their plain `encode`/`decode` calls, which
/// makes streams written with this codec readable across languages.
///
/// The decoder refuses blocks that declare an original size above
/// `max_decompressed_size` before allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnappyCodec {
    max_decompressed_size: usize,
}

impl SnappyCodec {
    /// Largest original size the block format can describe.
    pub const MAX_DECOMPRESSED_SIZE: usize = u32::MAX as usize;

    /// Creates a codec with the default decode limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_decompressed_size: Self::MAX_DECOMPRESSED_SIZE,
        }
    }

    /// Sets the largest original size the decoder accepts.
    #[must_use]
    pub const fn with_max_decompressed_size(mut self, limit: usize) -> Self {
        self.max_decompressed_size = limit;
        self
    }

    /// Returns the largest original size the decoder accepts.
    #[must_use]
    pub const fn max_decompressed_size(&self) -> usize {
        self.max_decompressed_size
    }
}

impl Default for SnappyCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for SnappyCodec {
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        Encoder::new()
            .compress_vec(input)
            .map_err(|e| CompressError::compression_failed(CODEC_NAME, e.to_string()))
    }
}

impl Decompressor for SnappyCodec {
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        let declared = decompress_len(input)
            .map_err(|e| CompressError::decompression_failed(CODEC_NAME, e.to_string()))?;
        if declared > self.max_decompressed_size {
            return Err(CompressError::decompression_failed(
                CODEC_NAME,
                format!(
                    "declared size {declared} exceeds limit of {} bytes",
                    self.max_decompressed_size
                ),
            ));
        }

        // The decoder itself rejects output that does not match the header.
        Decoder::new()
            .decompress_vec(input)
            .map_err(|e| CompressError::decompression_failed(CODEC_NAME, e.to_string()))
    }
}
