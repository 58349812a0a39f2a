//! Pass-through codec.

use crate::error::CompressResult;
use crate::{Compressor, Decompressor};

/// Identity codec: the "compressed" payload is the input itself.
///
/// Useful for payloads that are already compressed, and for tests that need
/// to see exact bytes on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uncompressed;

impl Compressor for Uncompressed {
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        Ok(input.to_vec())
    }
}

impl Decompressor for Uncompressed {
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        Ok(input.to_vec())
    }
}
