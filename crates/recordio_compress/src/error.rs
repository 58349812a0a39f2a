//! Error types for the compression crate.

use thiserror::Error;

/// Result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;

/// Errors that can occur while compressing or decompressing a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompressError {
    /// The codec could not compress the input.
    #[error("{codec} compression failed: {message}")]
    CompressionFailed {
        /// Name of the codec.
        codec: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// The codec could not decode the input.
    #[error("{codec} decompression failed: {message}")]
    DecompressionFailed {
        /// Name of the codec.
        codec: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// No codec is registered under the given name.
    #[error("unknown codec: {name}")]
    UnknownCodec {
        /// The name that was looked up.
        name: String,
    },
}

impl CompressError {
    /// Create a compression failed error.
    pub fn compression_failed(codec: &'static str, message: impl Into<String>) -> Self {
        Self::CompressionFailed {
            codec,
            message: message.into(),
        }
    }

    /// Create a decompression failed error.
    pub fn decompression_failed(codec: &'static str, message: impl Into<String>) -> Self {
        Self::DecompressionFailed {
            codec,
            message: message.into(),
        }
    }

    /// Create an unknown codec error.
    pub fn unknown_codec(name: impl Into<String>) -> Self {
        Self::UnknownCodec { name: name.into() }
    }
}
