//! Line iteration shared by the delimited-text parsers.

/// Split text into lines the way the game's text files are consumed: `\n`
/// separates lines, a trailing `\n` does not produce a final empty line, and
/// `\r` bytes are left in place for each parser to handle on its own terms.
pub(crate) fn lines(text: &str) -> std::str::Split<'_, char> {
    text.strip_suffix('\n').unwrap_or(text).split('\n')
}
