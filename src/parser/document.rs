//! Tile file splitting and raw parsing.
//!
//! A `.tiles` file holds one or more tile definitions separated by lines
//! consisting of `---`.

use crate::error::{Result, TileError};

use super::body::extract_body;
use super::header::extract_header;
use super::types::RawTile;

/// Parse a file containing one or more tile definitions.
pub fn parse_raw_tiles(source: &str) -> Result<Vec<RawTile>> {
    let mut tiles = Vec::new();
    for (lines, base_line) in split_tiles(source) {
        tiles.push(parse_raw_tile(&lines, base_line)?);
    }

    if tiles.is_empty() {
        return Err(TileError::Parse {
            message: "No tiles found in file".to_string(),
            help: Some("Add a tile: name:..., dir:..., a blank line, then the block".to_string()),
        });
    }

    Ok(tiles)
}

/// Split source into tile sections.
///
/// Returns (section_lines, base_line) for each non-blank section, where
/// `base_line` is the 1-indexed line number of the section's first line.
pub(crate) fn split_tiles(source: &str) -> Vec<(Vec<&str>, usize)> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    let mut start_line = 1;

    for (i, line) in source.lines().enumerate() {
        if line.trim() == "---" {
            push_section(&mut sections, std::mem::take(&mut current), start_line);
            start_line = i + 2;
        } else {
            current.push(line);
        }
    }
    push_section(&mut sections, current, start_line);

    sections
}

fn push_section<'a>(sections: &mut Vec<(Vec<&'a str>, usize)>, lines: Vec<&'a str>, line: usize) {
    if lines.iter().any(|l| !l.trim().is_empty()) {
        sections.push((lines, line));
    }
}

/// Parse a single tile section into header entries and body rows.
pub(crate) fn parse_raw_tile(lines: &[&str], base_line: usize) -> Result<RawTile> {
    let header = extract_header(lines, base_line)?;
    let body = extract_body(
        &lines[header.body_start..],
        base_line + header.body_start,
        header.indent,
    )?;
    let line = header.entries.first().map_or(base_line, |e| e.line);

    Ok(RawTile {
        header: header.entries,
        body,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_tile() {
        let source = "name:cell\ndir:\n\n###\n#.#\n###\n";

        let tiles = parse_raw_tiles(source).unwrap();

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].name(), Some("cell"));
        assert_eq!(tiles[0].get("dir"), Some(""));
        assert_eq!(tiles[0].body, vec!["###", "#.#", "###"]);
    }

    #[test]
    fn test_parse_multiple_tiles() {
        let source = r#"name:a

#.#
---
name:b
dir:N

#.#
#.#
#.#
"#;

        let tiles = parse_raw_tiles(source).unwrap();

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].name(), Some("a"));
        assert_eq!(tiles[1].name(), Some("b"));
        assert_eq!(tiles[1].line, 5);
        assert_eq!(tiles[1].body.len(), 3);
    }

    #[test]
    fn test_edge_spaces_survive_parsing() {
        let tiles = parse_raw_tiles("name:pillar\ndir:\n\n . \n.#.\n . \n").unwrap();

        assert_eq!(tiles[0].body, vec![" . ", ".#.", " . "]);
    }

    #[test]
    fn test_indented_tile_keeps_inner_spaces() {
        let source = "  name:pillar\n  dir:\n\n   . \n  .#.\n   . \n";

        let tiles = parse_raw_tiles(source).unwrap();

        assert_eq!(tiles[0].body, vec![" . ", ".#.", " . "]);
    }

    #[test]
    fn test_leading_and_trailing_separators() {
        let source = "---\nname:a\n\n#\n---\n\n";

        let tiles = parse_raw_tiles(source).unwrap();

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].line, 2);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_raw_tiles("").is_err());
        assert!(parse_raw_tiles("---\n\n---\n").is_err());
    }

    #[test]
    fn test_header_without_body() {
        let tiles = parse_raw_tiles("name:ghost\ndir:N\n").unwrap();

        assert!(tiles[0].body.is_empty());
    }
}
