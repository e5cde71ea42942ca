//! Error types for the VFS crate.

use thiserror::Error;

/// Errors that can occur when resolving named resources.
#[derive(Debug, Error)]
pub enum Error {
    /// No resource with the requested name exists in the store.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for VFS operations.
pub type Result<T> = std::result::Result<T, Error>;
