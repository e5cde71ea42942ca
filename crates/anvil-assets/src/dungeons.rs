//! Named dungeon flavor text (DUNGEON.TXT).
//!
//! Blocks of (title, description) separated by `#` lines: the first line of
//! a block is the dungeon's name, the rest its description.

use crate::text::lines;

/// One dungeon name and its description.
#[derive(Debug, Clone)]
pub struct DungeonEntry {
    title: String,
    description: String,
}

impl DungeonEntry {
    /// Get the dungeon name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the dungeon description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Parse the dungeon file into its entries, in file order.
///
/// A block left open at end of input is dropped; the file closes every
/// block with a `#` line.
pub fn parse_dungeons(text: &str) -> Vec<DungeonEntry> {
    let mut entries = Vec::new();
    let mut title = String::new();
    let mut description = String::new();

    for line in lines(text) {
        if line.starts_with('#') {
            if description.ends_with('\n') {
                description.pop();
            }

            entries.push(DungeonEntry {
                title: std::mem::take(&mut title),
                description: std::mem::take(&mut description),
            });
        } else if title.is_empty() {
            // First line of a block is the name; drop its carriage return.
            title = line.replacen('\r', "", 1);
        } else {
            // Description lines keep their line break as a newline.
            description.push_str(&line.replacen('\r', "\n", 1));
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Fang Lair\r\nAn ancient lair\r\nof dragons.\r\n#\r\n\
        Labyrinthian\r\nA maze of stone.\r\n#\r\n";

    #[test]
    fn test_pairs_in_file_order() {
        let entries = parse_dungeons(SAMPLE);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].title(), "Fang Lair");
        assert_eq!(entries[0].description(), "An ancient lair\nof dragons.");
        assert_eq!(entries[1].title(), "Labyrinthian");
        assert_eq!(entries[1].description(), "A maze of stone.");
    }

    #[test]
    fn test_block_open_at_eof_is_dropped() {
        let entries = parse_dungeons("Done\r\nFinished.\r\n#\r\nUnclosed\r\nNo marker");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title(), "Done");
    }

    #[test]
    fn test_single_line_description() {
        let entries = parse_dungeons("Name\r\nOnly line.\r\n#\r\n");
        assert_eq!(entries[0].description(), "Only line.");
    }
}
