//! Common types for parsed tile definitions.

/// One header line of a tile definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    /// Value after the separator; empty for a bare flag.
    pub value: String,
    /// Line number (1-indexed) within the source text.
    pub line: usize,
}

/// A raw tile definition before type-specific processing.
///
/// This represents the common structure of a tile:
/// - header lines (`key:value`, `key=value` or bare flags)
/// - a blank line
/// - the character block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTile {
    pub header: Vec<HeaderEntry>,
    /// Body rows with the header indent removed, without blank lines.
    pub body: Vec<String>,
    /// Line number (1-indexed) of the first header line.
    pub line: usize,
}

impl RawTile {
    /// Get a header value by key. Later entries win over earlier ones.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// The tile name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.get("name").filter(|n| !n.is_empty())
    }
}
