//! Error types for anvil-common.

use thiserror::Error;

/// Common error type for byte-level decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A null-terminated string ran off the end of the buffer.
    #[error("string missing null terminator")]
    MissingNullTerminator,

    /// String bytes were not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A fixed-layout struct could not be read from the buffer.
    #[error("invalid layout: needed {needed} bytes but only {available} available")]
    InvalidLayout { needed: usize, available: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
