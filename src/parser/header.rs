//! Tile header extraction.

use crate::error::{Result, TileError};

use super::types::HeaderEntry;

/// Result of extracting the header from a tile section.
#[derive(Debug)]
pub struct HeaderResult {
    pub entries: Vec<HeaderEntry>,
    /// Index of the first line after the header's terminating blank line.
    pub body_start: usize,
    /// Leading whitespace before the first header entry.
    pub indent: usize,
}

/// Extract header entries from the start of a tile section.
///
/// The header runs until the first blank line. Each line is `key:value`,
/// `key=value` or a bare flag; lines starting with `//` are comments.
/// `base_line` is the 1-indexed line number of `lines[0]` in the file.
pub fn extract_header(lines: &[&str], base_line: usize) -> Result<HeaderResult> {
    let mut entries = Vec::new();
    let mut index = 0;
    let mut indent = None;

    while index < lines.len() {
        let raw = lines[index];
        let line = raw.trim();
        index += 1;
        if line.is_empty() {
            if entries.is_empty() {
                // Leading blank lines
                continue;
            }
            break;
        }
        if line.starts_with("//") {
            continue;
        }
        indent.get_or_insert(raw.len() - raw.trim_start().len());
        entries.push(parse_header_line(line, base_line + index - 1)?);
    }

    Ok(HeaderResult {
        entries,
        body_start: index,
        indent: indent.unwrap_or(0),
    })
}

/// Split one header line at its first `:` or `=`.
fn parse_header_line(line: &str, line_no: usize) -> Result<HeaderEntry> {
    let (key, value) = match line.find([':', '=']) {
        Some(pos) => (line[..pos].trim(), line[pos + 1..].trim()),
        None => (line, ""),
    };

    if key.is_empty() {
        return Err(TileError::Parse {
            message: format!("Header line {} has no key: '{}'", line_no, line),
            help: Some("Header lines look like key:value, key=value or a bare flag".to_string()),
        });
    }
    if key.chars().any(char::is_whitespace) {
        return Err(TileError::Parse {
            message: format!("Header key '{}' on line {} contains whitespace", key, line_no),
            help: Some("Is the blank line between header and body missing?".to_string()),
        });
    }

    Ok(HeaderEntry {
        key: key.to_string(),
        value: value.to_string(),
        line: line_no,
    })
}
