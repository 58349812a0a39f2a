//! # RecordIO Compress
//!
//! Pluggable payload compression for RecordIO.
//!
//! The record format treats compression as a collaborator: a writer hands the
//! logical payload to a [`Compressor`] and frames whatever comes back, and a
//! reader hands the framed bytes to a [`Decompressor`]. Every codec here is
//! stateless, so each payload is compressed and decoded independently.
//!
//! ## Codecs
//!
//! - [`Lz4Codec`] - LZ4 block format with a size prefix (default)
//! - [`SnappyCodec`] - Snappy raw block format
//! - `ZstdCodec` - Zstandard frames (enable the `zstd` feature)
//! - [`Uncompressed`] - Identity
//!
//! ## Usage
//!
//! ```
//! use recordio_compress::{Compressor, Decompressor, Lz4Codec};
//!
//! let codec = Lz4Codec::new();
//! let compressed = codec.compress(b"hello hello hello").unwrap();
//! let restored = codec.decompress(&compressed).unwrap();
//! assert_eq!(restored, b"hello hello hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod kind;
mod lz4_codec;
mod snappy_codec;
mod uncompressed;
#[cfg(feature = "zstd")]
mod zstd_codec;

pub use error::{CompressError, CompressResult};
pub use kind::CodecKind;
pub use lz4_codec::Lz4Codec;
pub use snappy_codec::SnappyCodec;
pub use uncompressed::Uncompressed;
#[cfg(feature = "zstd")]
pub use zstd_codec::ZstdCodec;

/// Turns a logical payload into compressed bytes.
pub trait Compressor {
    /// Compress `input` into a standalone compressed payload.
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>>;
}

/// Recovers a logical payload from compressed bytes.
pub trait Decompressor {
    /// Decode a payload produced by the matching [`Compressor`].
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>>;
}

/// A matched compressor/decompressor pair.
pub trait Codec: Compressor + Decompressor {}

impl<T: Compressor + Decompressor + ?Sized> Codec for T {}

impl<C: Compressor + ?Sized> Compressor for Box<C> {
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        (**self).compress(input)
    }
}

impl<D: Decompressor + ?Sized> Decompressor for Box<D> {
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        (**self).decompress(input)
    }
}

impl<C: Compressor + ?Sized> Compressor for &C {
    fn compress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        (**self).compress(input)
    }
}

impl<D: Decompressor + ?Sized> Decompressor for &D {
    fn decompress(&self, input: &[u8]) -> CompressResult<Vec<u8>> {
        (**self).decompress(input)
    }
}
