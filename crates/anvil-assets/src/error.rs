//! Error types for asset decoding.

use thiserror::Error;

/// Errors that can occur while decoding game data or generating names.
#[derive(Debug, Error)]
pub enum Error {
    /// Archive lookup failed.
    #[error(transparent)]
    Vfs(#[from] anvil_vfs::Error),

    /// Byte-level decode failure.
    #[error("{0}")]
    Common(#[from] anvil_common::Error),

    /// A record did not match its expected fixed shape.
    #[error("malformed {resource}: {detail}")]
    MalformedRecord {
        resource: &'static str,
        detail: String,
    },

    /// Template-text lookup for an unknown key.
    #[error("template key not found: {0}")]
    KeyNotFound(String),

    /// A question choice carried an unknown class category code.
    #[error("unrecognized class category code {0:?}")]
    UnrecognizedCategoryCode(char),

    /// No name rule sequence exists for the race/gender pair.
    #[error("no name rule sequence for race {race} (male: {male})")]
    UnrecognizedRule { race: usize, male: bool },

    /// A fixed-size table was addressed out of range.
    #[error("index {index} out of range (limit {limit})")]
    IndexOutOfRange { index: usize, limit: usize },
}

impl Error {
    /// Shorthand for a [`Error::MalformedRecord`] with a formatted detail.
    pub(crate) fn malformed(resource: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedRecord {
            resource,
            detail: detail.into(),
        }
    }
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, Error>;
