//! Codec selection by name.

use crate::error::{CompressError, CompressResult};
use crate::{Codec, Lz4Codec, SnappyCodec, Uncompressed};
use std::fmt;
use std::str::FromStr;

/// The codecs this crate ships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// [`Lz4Codec`].
    #[default]
    Lz4,
    /// [`SnappyCodec`].
    Snappy,
    /// [`crate::ZstdCodec`].
    #[cfg(feature = "zstd")]
    Zstd,
    /// [`Uncompressed`].
    Uncompressed,
}

impl CodecKind {
    /// Returns every available codec kind.
    #[must_use]
    pub fn all() -> &'static [CodecKind] {
        &[
            Self::Lz4,
            Self::Snappy,
            #[cfg(feature = "zstd")]
            Self::Zstd,
            Self::Uncompressed,
        ]
    }

    /// Returns the codec's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lz4 => "lz4",
            Self::Snappy => "snappy",
            #[cfg(feature = "zstd")]
            Self::Zstd => "zstd",
            Self::Uncompressed => "none",
        }
    }

    /// Builds a codec of this kind with default settings.
    #[must_use]
    pub fn build(self) -> Box<dyn Codec> {
        match self {
            Self::Lz4 => Box::new(Lz4Codec::new()),
            Self::Snappy => Box::new(SnappyCodec::new()),
            #[cfg(feature = "zstd")]
            Self::Zstd => Box::new(crate::ZstdCodec::new()),
            Self::Uncompressed => Box::new(Uncompressed),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = CompressError;

    fn from_str(s: &str) -> CompressResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CompressError::unknown_codec(s))
    }
}
