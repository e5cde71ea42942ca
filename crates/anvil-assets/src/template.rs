//! Keyed template text (TEMPLATE.DAT).
//!
//! The file is a flat catalog of text blocks. A line starting with `#` names
//! the next block; everything up to the following `#` line is the block's
//! text. Several blocks appear more than once in the file, and the game used
//! the first occurrence, so duplicates are discarded here too.

use std::collections::HashMap;

use crate::text::lines;
use crate::{Error, Result};

/// Template text indexed by key.
#[derive(Debug, Clone, Default)]
pub struct TemplateText {
    entries: HashMap<String, String>,
}

impl TemplateText {
    /// Parse template text from the decoded file contents.
    ///
    /// Keys are the trimmed text after the leading `#`. Text before the
    /// first key is discarded, as is a block left open at end of input (the
    /// file always closes its last block with a `#` line).
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        let mut key: Option<String> = None;
        let mut value = String::new();

        for line in lines(text) {
            if let Some(rest) = line.strip_prefix('#') {
                if let Some(previous) = key.take() {
                    if !previous.is_empty() && !entries.contains_key(&previous) {
                        entries.insert(previous, clean_value(&value));
                    }
                }

                key = Some(rest.trim().to_string());
                value.clear();
            } else {
                value.push_str(line);
                value.push('\n');
            }
        }

        Self { entries }
    }

    /// Look up the text stored under `key`.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Get the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Normalize one accumulated value: line endings become `\n`, trailing
/// newlines go, and the `&` continuation marker that closes most blocks is
/// stripped.
fn clean_value(value: &str) -> String {
    let mut value = value.replace("\r\n", "\n").replace('\r', "\n");

    while value.ends_with('\n') {
        value.pop();
    }

    if value.ends_with('&') {
        value.pop();
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_keeps_first_value() {
        let text = "#KEY1\nLine one\nLine two&\n#KEY1\nDUPLICATE\n";
        let table = TemplateText::parse(text);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("KEY1").unwrap(), "Line one\nLine two");
    }

    #[test]
    fn test_crlf_input_normalizes_to_lf() {
        let text = "#0100\r\nFirst line.\r\nSecond line.&\r\n#0101\r\nOther.&\r\n#\r\n";
        let table = TemplateText::parse(text);

        assert_eq!(table.get("0100").unwrap(), "First line.\nSecond line.");
        assert_eq!(table.get("0101").unwrap(), "Other.");
    }

    #[test]
    fn test_prelude_before_first_key_is_discarded() {
        let text = "junk before any key\n#KEY\nValue&\n#\n";
        let table = TemplateText::parse(text);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("KEY").unwrap(), "Value");
    }

    #[test]
    fn test_block_open_at_eof_is_not_stored() {
        let text = "#A\nfirst&\n#B\ndangling";
        let table = TemplateText::parse(text);

        assert_eq!(table.get("A").unwrap(), "first");
        assert!(matches!(table.get("B"), Err(Error::KeyNotFound(_))));
    }

    #[test]
    fn test_key_is_trimmed() {
        let text = "# KEY \r\nValue&\r\n#\r\n";
        let table = TemplateText::parse(text);

        assert_eq!(table.get("KEY").unwrap(), "Value");
    }

    #[test]
    fn test_unknown_key_reports_key_not_found() {
        let table = TemplateText::parse("#A\nx&\n#\n");
        let err = table.get("MISSING").unwrap_err();

        assert!(matches!(err, Error::KeyNotFound(key) if key == "MISSING"));
    }
}
