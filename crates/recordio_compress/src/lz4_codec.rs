//! LZ4 block codec.

use crate::error::{CompressError, CompressResult};
use crate::{Compressor, Decompressor};
use lz4_flex::block::{compress_prepend_size, decompress_size_prepended};

const CODEC_NAME: &str = "lz4";

/// Length of the little-endian original-size prefix lz4_flex writes.
const SIZE_PREFIX_LEN: usize = 4;

/// Upper bound on bytes one compressed block byte can expand to.
const MAX_EXPANSION: usize = 256;

/// LZ4 block codec.
///
/// Each payload is compressed independently with the original length
/// prepended as a 4-byte little-endian integer, so a compressed payload can be
/// decoded without any outside state.
///
/// The decoder refuses inputs that declare an original size above
/// `max_decompressed_size`, or more than the block body could expand to, so
/// a corrupt prefix cannot force a huge allocation. A block that decodes to
/// a different length than its prefix declares is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz4Codec {
    max_decompressed_size: usize,
}

impl Lz4Codec {
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

impl Default for Lz4Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for Lz4Codec {
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        if input.len() > Self::MAX_DECOMPRESSED_SIZE {
            return Err(CompressError::compression_failed(
                CODEC_NAME,
                format!(
                    "input of {} bytes exceeds block limit of {} bytes",
                    input.len(),
                    Self::MAX_DECOMPRESSED_SIZE
                ),
            ));
        }
        Ok(compress_prepend_size(input))
    }
}

impl Decompressor for Lz4Codec {
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        let prefix: [u8; SIZE_PREFIX_LEN] = input
            .get(..SIZE_PREFIX_LEN)
            .and_then(|p| p.try_into().ok())
            .ok_or_else(|| {
                CompressError::decompression_failed(CODEC_NAME, "input shorter than size prefix")
            })?;

        let declared = u32::from_le_bytes(prefix) as usize;
        if declared > self.max_decompressed_size {
            return Err(CompressError::decompression_failed(
                CODEC_NAME,
                format!(
                    "declared size {declared} exceeds limit of {} bytes",
                    self.max_decompressed_size
                ),
            ));
        }

        let body_len = input.len() - SIZE_PREFIX_LEN;
        if declared > body_len.saturating_mul(MAX_EXPANSION) {
            return Err(CompressError::decompression_failed(
                CODEC_NAME,
                format!("declared size {declared} is impossible for a {body_len}-byte block"),
            ));
        }

        let out = decompress_size_prepended(input)
            .map_err(|e| CompressError::decompression_failed(CODEC_NAME, e.to_string()))?;
        if out.len() != declared {
            return Err(CompressError::decompression_failed(
                CODEC_NAME,
                format!("decoded {} bytes, prefix declared {declared}", out.len()),
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lz4_roundtrip_text() {
        let codec = Lz4Codec::new();
        let compressed = codec.compress(b"Hello!").unwrap();
        assert_eq!(codec.decompress(&compressed).unwrap(), b"Hello!");
    }

    #[test]
    fn lz4_roundtrip_empty() {
        let codec = Lz4Codec::new();
        let compressed = codec.compress(b"").unwrap();
        assert_eq!(&compressed[..SIZE_PREFIX_LEN], &[0, 0, 0, 0]);
        assert!(codec.decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn lz4_shrinks_repetitive_input() {
        let codec = Lz4Codec::new();
        let input = vec![b'a'; 4096];
        let compressed = codec.compress(&input).unwrap();
        assert!(compressed.len() < input.len() / 10);
    }

    #[test]
    fn lz4_prefix_holds_original_length() {
        let codec = Lz4Codec::new();
        let compressed = codec.compress(&[7u8; 300]).unwrap();
        assert_eq!(&compressed[..SIZE_PREFIX_LEN], &300u32.to_le_bytes());
    }

    #[test]
    fn lz4_rejects_short_input() {
        let result = Lz4Codec::new().decompress(&[1, 2]);
        assert!(matches!(
            result,
            Err(CompressError::DecompressionFailed { codec: "lz4", .. })
        ));
    }

    #[test]
    fn lz4_rejects_size_over_limit() {
        let codec = Lz4Codec::new().with_max_decompressed_size(16);
        let compressed = codec.compress(&[0u8; 17]).unwrap();
        assert!(matches!(
            codec.decompress(&compressed),
            Err(CompressError::DecompressionFailed { .. })
        ));
    }

    #[test]
    fn lz4_rejects_block_shorter_than_prefix() {
        // Prefix says 6 bytes; the block holds three literals.
        let result = Lz4Codec::new().decompress(&[6, 0, 0, 0, 0x30, b'H', b'e', b'l']);
        assert!(matches!(
            result,
            Err(CompressError::DecompressionFailed { codec: "lz4", .. })
        ));
    }

    #[test]
    fn lz4_rejects_prefix_beyond_block_capacity() {
        let result = Lz4Codec::new().decompress(&[0xff, 0xff, 0xff, 0xff, 0x00]);
        assert!(matches!(
            result,
            Err(CompressError::DecompressionFailed { codec: "lz4", .. })
        ));
    }

    #[test]
    fn lz4_accepts_highly_compressed_block() {
        let codec = Lz4Codec::new();
        let input = vec![0u8; 1 << 20];
        let compressed = codec.compress(&input).unwrap();
        assert_eq!(codec.decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn lz4_rejects_garbage_body() {
        let mut input = 100u32.to_le_bytes().to_vec();
        input.extend_from_slice(&[0xFF; 8]);
        assert!(Lz4Codec::new().decompress(&input).is_err());
    }
}
