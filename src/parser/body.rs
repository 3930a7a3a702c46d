//! Character block extraction.

use crate::error::{Result, TileError};

/// Extract the character block following a tile header.
///
/// Each row loses its line ending and up to `indent` leading whitespace
/// characters, matching the header's indentation. Everything else is kept,
/// so spaces at either end of a row are glyphs. Trailing blank lines are
/// ignored, but a blank line followed by more content is an error.
pub fn extract_body(lines: &[&str], base_line: usize, indent: usize) -> Result<Vec<String>> {
    let mut rows = Vec::new();
    let mut gap_at = None;

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            if !rows.is_empty() && gap_at.is_none() {
                gap_at = Some(base_line + i);
            }
            continue;
        }
        if let Some(gap) = gap_at {
            return Err(TileError::Parse {
                message: format!(
                    "Unexpected content on line {} after the tile body ended on line {}",
                    base_line + i,
                    gap - 1
                ),
                help: Some("Separate tiles with a --- line".to_string()),
            });
        }
        rows.push(strip_indent(line, indent).to_string());
    }

    Ok(rows)
}

fn strip_indent(line: &str, indent: usize) -> &str {
    let cut = line
        .char_indices()
        .take(indent)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}
