//! Error types for stream operations.

use std::io;
use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while moving bytes through a sink or source.
#[derive(Debug, Error)]
pub enum StreamError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream has already been closed.
    #[error("stream is closed")]
    Closed,

    /// A fault injected by a test stream.
    #[error("injected fault: {0}")]
    Injected(String),
}

impl StreamError {
    /// Creates an injected fault error.
    pub fn injected(message: impl Into<String>) -> Self {
        Self::Injected(message.into())
    }
}
