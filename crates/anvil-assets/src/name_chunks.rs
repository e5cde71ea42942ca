//! Name fragment chunks (NAMECHNK.DAT).
//!
//! The file is a sequence of chunks, each holding one list of name
//! fragments: a little-endian u16 total chunk length, a one-byte string
//! count, then that many null-terminated strings packed contiguously. The
//! name generator addresses lists by their position in the file.

use anvil_common::BinaryReader;

use crate::{Error, Result};

/// The ordered name-fragment lists.
#[derive(Debug, Clone, Default)]
pub struct NameChunks {
    lists: Vec<Vec<String>>,
}

impl NameChunks {
    /// Decode the chunk file. Chunks are read until the cursor reaches the
    /// end of the buffer; each chunk's declared length decides where the
    /// next one starts.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let mut lists = Vec::new();

        while !reader.is_empty() {
            let chunk_start = reader.position();
            let chunk_length = reader.read_u16()? as usize;
            if chunk_length == 0 {
                return Err(Error::malformed(
                    "NAMECHNK.DAT",
                    format!("chunk at offset {chunk_start} declares zero length"),
                ));
            }

            let string_count = reader.read_u8()? as usize;
            let mut strings = Vec::with_capacity(string_count);
            for _ in 0..string_count {
                strings.push(reader.read_cstring()?.to_string());
            }

            lists.push(strings);
            reader.seek(chunk_start + chunk_length);
        }

        Ok(Self { lists })
    }

    /// Get the number of chunk lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check whether no chunks were decoded.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Get the fragment list at a positional index.
    pub fn list(&self, index: usize) -> Result<&[String]> {
        self.lists
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Error::IndexOutOfRange {
                index,
                limit: self.lists.len(),
            })
    }

    /// Get all fragment lists in file order.
    pub fn lists(&self) -> &[Vec<String>] {
        &self.lists
    }

    /// Re-encode the chunk lists into the original byte layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        for list in &self.lists {
            let payload: usize = list.iter().map(|s| s.len() + 1).sum();
            let chunk_length = (3 + payload) as u16;

            bytes.extend_from_slice(&chunk_length.to_le_bytes());
            bytes.push(list.len() as u8);
            for string in list {
                bytes.extend_from_slice(string.as_bytes());
                bytes.push(0);
            }
        }

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(strings: &[&str]) -> Vec<u8> {
        let payload: usize = strings.iter().map(|s| s.len() + 1).sum();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&((3 + payload) as u16).to_le_bytes());
        bytes.push(strings.len() as u8);
        for s in strings {
            bytes.extend_from_slice(s.as_bytes());
            bytes.push(0);
        }
        bytes
    }

    #[test]
    fn test_decode_chunks_in_order() {
        let mut data = chunk(&["Bal", "Gor", "Thar"]);
        data.extend(chunk(&["a", "o"]));

        let chunks = NameChunks::decode(&data).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.list(0).unwrap(), ["Bal", "Gor", "Thar"]);
        assert_eq!(chunks.list(1).unwrap(), ["a", "o"]);
    }

    #[test]
    fn test_round_trip_reproduces_bytes() {
        let mut data = chunk(&["Mora", "Dun"]);
        data.extend(chunk(&["ia"]));
        data.extend(chunk(&[]));

        let chunks = NameChunks::decode(&data).unwrap();
        assert_eq!(chunks.to_bytes(), data);
    }

    #[test]
    fn test_out_of_range_list_index() {
        let chunks = NameChunks::decode(&chunk(&["x"])).unwrap();
        assert!(matches!(
            chunks.list(1),
            Err(Error::IndexOutOfRange { index: 1, limit: 1 })
        ));
    }

    #[test]
    fn test_zero_length_chunk_fails() {
        let data = [0u8, 0, 1, b'x', 0];
        assert!(matches!(
            NameChunks::decode(&data),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_truncated_strings_fail() {
        // Declares three strings but the buffer ends inside the second.
        let data = [10u8, 0, 3, b'a', 0, b'b'];
        assert!(NameChunks::decode(&data).is_err());
    }
}
