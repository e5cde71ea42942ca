//! Common utilities for Anvil.
//!
//! This crate provides the foundational pieces shared by every Anvil crate:
//!
//! - [`BinaryReader`] - bounds-checked little-endian reading from byte slices
//! - [`Error`] / [`Result`] - the shared byte-level error type

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
