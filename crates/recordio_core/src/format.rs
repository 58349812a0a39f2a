//! Record wire format.
//!
//! ```text
//! | magic (8, LE) | compressed_size (8, LE, signed) | payload (compressed_size) |
//! ```
//!
//! Records are stored back to back with no padding. A stream is zero or more
//! records.

use crate::error::{RecordError, RecordResult};
use bytes::{BufMut, Bytes, BytesMut};

/// Magic number opening every record.
pub const RECORD_MAGIC: u64 = 0x25f9_c3e0;

/// Size of the magic field.
pub const MAGIC_SIZE: usize = 8;

/// Size of the compressed-size field.
pub const SIZE_FIELD_SIZE: usize = 8;

/// Header size for records.
/// magic (8) + compressed_size (8) = 16 bytes
pub const HEADER_SIZE: usize = MAGIC_SIZE + SIZE_FIELD_SIZE;

/// The fixed-size header preceding every record payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Magic number; must equal [`RECORD_MAGIC`].
    pub magic: u64,
    /// Length of the compressed payload that follows.
    pub compressed_size: i64,
}

impl RecordHeader {
    /// Creates a header for a payload of `compressed_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns a format error if the length does not fit the signed size
    /// field.
    pub fn for_payload(compressed_len: usize) -> RecordResult<Self> {
        let compressed_size = i64::try_from(compressed_len).map_err(|_| {
            RecordError::format(format!(
                "compressed payload of {compressed_len} bytes exceeds the size field"
            ))
        })?;
        Ok(Self {
            magic: RECORD_MAGIC,
            compressed_size,
        })
    }

    /// Serializes the header.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..MAGIC_SIZE].copy_from_slice(&self.magic.to_le_bytes());
        out[MAGIC_SIZE..].copy_from_slice(&self.compressed_size.to_le_bytes());
        out
    }

    /// Parses a header without validating it.
    #[must_use]
    pub fn decode(bytes: &[u8; HEADER_SIZE]) -> Self {
        let (magic, size) = bytes.split_at(MAGIC_SIZE);
        Self {
            magic: decode_magic(magic),
            compressed_size: i64::from_le_bytes(to_array(size)),
        }
    }

    /// Validates the header and returns the payload length.
    ///
    /// # Errors
    ///
    /// Returns a format error if the magic is wrong, the size is negative, or
    /// the size exceeds `max_compressed_size`.
    pub fn validate(&self, max_compressed_size: u64) -> RecordResult<usize> {
        check_magic(self.magic)?;
        validate_size(self.compressed_size, max_compressed_size)
    }
}

/// Interprets the 8-byte magic field.
pub(crate) fn decode_magic(bytes: &[u8]) -> u64 {
    u64::from_le_bytes(to_array(bytes))
}

/// Checks a magic value against [`RECORD_MAGIC`].
pub(crate) fn check_magic(magic: u64) -> RecordResult<()> {
    if magic != RECORD_MAGIC {
        return Err(RecordError::format(format!(
            "bad magic {magic:#018x}, expected {RECORD_MAGIC:#018x}"
        )));
    }
    Ok(())
}

/// Validates a compressed-size field and converts it to a length.
pub(crate) fn validate_size(compressed_size: i64, max_compressed_size: u64) -> RecordResult<usize> {
    let size = u64::try_from(compressed_size).map_err(|_| {
        RecordError::format(format!("negative compressed size {compressed_size}"))
    })?;
    if size > max_compressed_size {
        return Err(RecordError::format(format!(
            "compressed size {size} exceeds limit of {max_compressed_size} bytes"
        )));
    }
    usize::try_from(size).map_err(|_| {
        RecordError::format(format!("compressed size {size} does not fit in memory"))
    })
}

fn to_array(bytes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[..8]);
    out
}

/// Builds a complete record frame around an already-compressed payload.
///
/// # Errors
///
/// Returns a format error if the payload length does not fit the size field.
pub fn encode_frame(compressed: &[u8]) -> RecordResult<Bytes> {
    let header = RecordHeader::for_payload(compressed.len())?;
    let mut frame = BytesMut::with_capacity(HEADER_SIZE + compressed.len());
    frame.put_u64_le(header.magic);
    frame.put_i64_le(header.compressed_size);
    frame.put_slice(compressed);
    Ok(frame.freeze())
}
