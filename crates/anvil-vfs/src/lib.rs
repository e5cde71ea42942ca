//! Read-only named-resource store for Anvil.
//!
//! The decoders in `anvil-assets` ask for resources by name ("TEMPLATE.DAT",
//! "NAMECHNK.DAT", ...) and receive the resource's bytes. Where those bytes
//! come from is this crate's concern: [`DirectoryVfs`] serves loose files
//! from a game-data directory, [`MemoryVfs`] serves byte buffers registered
//! at runtime (used heavily in tests).
//!
//! Resource names are matched verbatim by [`Vfs::open`]. The original game
//! shipped on media with inconsistent filename casing, so
//! [`Vfs::open_case_insensitive`] exists for the resources affected by it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

mod error;

pub use error::{Error, Result};

/// A read-only store of named byte resources.
pub trait Vfs {
    /// Open a resource by exact name.
    fn open(&self, name: &str) -> Result<Vec<u8>>;

    /// Open a resource by name, ignoring ASCII case.
    fn open_case_insensitive(&self, name: &str) -> Result<Vec<u8>>;
}

/// A VFS serving loose files from a single directory.
#[derive(Debug, Clone)]
pub struct DirectoryVfs {
    root: PathBuf,
}

impl DirectoryVfs {
    /// Create a VFS rooted at a game-data directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Vfs for DirectoryVfs {
    fn open(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(name.to_string()))
            }
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn open_case_insensitive(&self, name: &str) -> Result<Vec<u8>> {
        // Exact name first; scan the directory only on a miss.
        match self.open(name) {
            Err(Error::NotFound(_)) => {}
            result => return result,
        }

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            if file_name.eq_ignore_ascii_case(name) {
                return Ok(fs::read(entry.path())?);
            }
        }

        Err(Error::NotFound(name.to_string()))
    }
}

/// A VFS serving byte buffers registered in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryVfs {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryVfs {
    /// Create an empty in-memory VFS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, replacing any existing entry with the same name.
    pub fn insert<N: Into<String>, B: Into<Vec<u8>>>(&mut self, name: N, bytes: B) {
        self.entries.insert(name.into(), bytes.into());
    }

    /// Remove a resource by exact name.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.entries.remove(name)
    }

    /// Get the number of registered resources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Vfs for MemoryVfs {
    fn open(&self, name: &str) -> Result<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn open_case_insensitive(&self, name: &str) -> Result<Vec<u8>> {
        if let Ok(bytes) = self.open(name) {
            return Ok(bytes);
        }

        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_vfs_exact_lookup() {
        let mut vfs = MemoryVfs::new();
        vfs.insert("TEMPLATE.DAT", b"#KEY\r\n".to_vec());

        assert_eq!(vfs.open("TEMPLATE.DAT").unwrap(), b"#KEY\r\n");
        assert!(matches!(
            vfs.open("template.dat"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_memory_vfs_case_insensitive_lookup() {
        let mut vfs = MemoryVfs::new();
        vfs.insert("SPELLSG.65", vec![1, 2, 3]);

        assert_eq!(vfs.open_case_insensitive("spellsg.65").unwrap(), [1, 2, 3]);
        assert!(matches!(
            vfs.open_case_insensitive("SPELLSG.66"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_vfs_missing_file() {
        let vfs = DirectoryVfs::new(std::env::temp_dir());
        let result = vfs.open("definitely-does-not-exist.dat");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
