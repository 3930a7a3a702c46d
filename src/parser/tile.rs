//! Tile definition parsing.
//!
//! Turns a raw tile (header entries plus character block) into a checked
//! `Template`. Header keys are handled as follows:
//!
//! - `name` - required identifier
//! - `dir` - exit set, any combination of N, S, E, W
//! - a single uppercase letter - parameter substituted into the block
//! - `noedge`, `norotate`, `fixed` - boolean flags
//! - `startX`, `startY` - multi-cell start anchors
//! - `weight` - selection weight
//! - anything else - kept as a free-form property

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, TileError};
use crate::types::{parse_flag, parse_weight, Exits, Template, TileFlags};

use super::document::{parse_raw_tile, parse_raw_tiles, split_tiles};
use super::types::RawTile;

/// Parameter overrides applied on top of a tile's own parameters.
pub type Substitutions = HashMap<char, char>;

/// Parse a single tile definition.
pub fn parse_tile(spec: &str) -> Result<Template> {
    parse_tile_with(spec, &Substitutions::new())
}

/// Parse a single tile definition, restyling its parameters.
///
/// An override only applies to parameter letters the tile declares.
pub fn parse_tile_with(spec: &str, overrides: &Substitutions) -> Result<Template> {
    let sections = split_tiles(spec);
    match sections.as_slice() {
        [] => Err(TileError::Parse {
            message: "Tile definition is empty".to_string(),
            help: Some("Add name:..., a blank line, then the character block".to_string()),
        }),
        [(lines, base_line)] => {
            let raw = parse_raw_tile(lines, *base_line)?;
            build_template(&raw, overrides)
        }
        _ => Err(TileError::Parse {
            message: format!("Expected one tile, found {}", sections.len()),
            help: Some("Use parse_tile_file for sources with --- separators".to_string()),
        }),
    }
}

/// Parse every tile in a `.tiles` source.
pub fn parse_tile_file(source: &str) -> Result<Vec<Template>> {
    parse_raw_tiles(source)?
        .iter()
        .map(|raw| build_template(raw, &Substitutions::new()))
        .collect()
}

/// Convert a raw tile into a template.
pub fn build_template(raw: &RawTile, overrides: &Substitutions) -> Result<Template> {
    let name = raw.name().ok_or_else(|| TileError::Parse {
        message: format!("Tile starting on line {} is missing required 'name' field", raw.line),
        help: Some("Add name:my-tile to the header".to_string()),
    })?;

    let mut params: HashMap<char, char> = HashMap::new();
    let mut flags = TileFlags::default();
    let mut props = BTreeMap::new();
    let mut exits = Exits::empty();

    for entry in &raw.header {
        let key = entry.key.as_str();
        let value = entry.value.as_str();
        match key {
            "name" => {}
            "dir" => exits = Exits::parse(value)?,
            "noedge" => flags.no_edge = parse_flag(key, value)?,
            "norotate" => flags.no_rotate = parse_flag(key, value)?,
            "fixed" => flags.fixed = parse_flag(key, value)?,
            "startX" => flags.start_x = Some(value.parse()?),
            "startY" => flags.start_y = Some(value.parse()?),
            "weight" => flags.weight = parse_weight(value)?,
            _ => match param_letter(key) {
                Some(letter) => {
                    let glyph = single_char(value).ok_or_else(|| TileError::Parse {
                        message: format!(
                            "Tile '{}': parameter '{}' on line {} must map to one character, got '{}'",
                            name, letter, entry.line, value
                        ),
                        help: Some(format!("Write e.g. {}=#", letter)),
                    })?;
                    params.insert(letter, glyph);
                }
                None => {
                    props.insert(key.to_string(), value.to_string());
                }
            },
        }
    }
    // `fixed` pieces are placed by name in one orientation
    if flags.fixed {
        flags.no_rotate = true;
    }

    for (letter, glyph) in overrides {
        if let Some(slot) = params.get_mut(letter) {
            *slot = *glyph;
        }
    }

    let grid = raw
        .body
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| params.get(&c).copied().unwrap_or(c))
                .collect()
        })
        .collect();

    Ok(Template::new(name, grid, exits, flags)?.with_props(props))
}

/// A header key naming a substitution parameter: one ASCII uppercase letter.
fn param_letter(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Anchor, Direction};

    const CORRIDOR: &str = r#"
name:corridor
dir:EW
X=#

XXXXX
XXXXX
.....
XXXXX
XXXXX
"#;

    #[test]
    fn test_parse_substitutes_parameters() {
        let t = parse_tile(CORRIDOR).unwrap();

        assert_eq!(t.name(), "corridor");
        assert_eq!(t.exits(), Exits::E | Exits::W);
        assert_eq!(t.size(), (5, 5));
        assert_eq!(t.get(0, 0), Some('#'));
        assert!(t.edge_is_open(Direction::E));
        assert!(!t.edge_is_open(Direction::N));
    }

    #[test]
    fn test_overrides_restyle_parameters() {
        let overrides = Substitutions::from([('X', '^'), ('Q', '~')]);
        let t = parse_tile_with(CORRIDOR, &overrides).unwrap();

        assert_eq!(t.get(0, 0), Some('^'));
        assert_eq!(t.get(2, 2), Some('.'));
    }

    #[test]
    fn test_flags_and_props() {
        let spec = "name:start\ndir:S\nstartX:max\nstartY=first\nnoedge\nweight:3\nstyle:mossy\n\n###\n#.#\n#.#\n";
        let t = parse_tile(spec).unwrap();

        assert!(t.flags().no_edge);
        assert!(!t.flags().no_rotate);
        assert_eq!(t.flags().start_x, Some(Anchor::Max));
        assert_eq!(t.flags().start_y, Some(Anchor::First));
        assert_eq!(t.flags().weight, 3);
        assert_eq!(t.get_prop("style").as_deref(), Some("mossy"));
    }

    #[test]
    fn test_fixed_implies_norotate() {
        let t = parse_tile("name:gate\nfixed\n\n###\n###\n###\n").unwrap();

        assert!(t.flags().fixed);
        assert!(t.flags().no_rotate);
        assert!(t.is_single_orientation());
    }

    #[test]
    fn test_letters_without_parameter_stay() {
        // T is the tree glyph unless a tile declares it as a parameter
        let t = parse_tile("name:grove\n\nT##\n###\n###\n").unwrap();

        assert_eq!(t.get(0, 0), Some('T'));
    }

    #[test]
    fn test_parse_errors() {
        // missing name
        assert!(parse_tile("dir:N\n\n#.#\n#.#\n#.#\n").is_err());
        // unknown dir letter
        assert!(parse_tile("name:a\ndir:NX\n\n#.#\n#.#\n#.#\n").is_err());
        // exit/midpoint mismatch
        assert!(parse_tile("name:a\ndir:E\n\n#.#\n#.#\n#.#\n").is_err());
        // unequal rows
        assert!(parse_tile("name:a\n\n###\n##\n###\n").is_err());
        // empty body
        assert!(parse_tile("name:a\ndir:N\n").is_err());
        // multi-character parameter
        assert!(parse_tile("name:a\nX=##\n\nXXX\nXXX\nXXX\n").is_err());
        // bad weight
        assert!(parse_tile("name:a\nweight:0\n\n###\n###\n###\n").is_err());
    }

    #[test]
    fn test_parse_tile_rejects_multiple_tiles() {
        let spec = "name:a\n\n#\n---\nname:b\n\n#\n";
        assert!(parse_tile(spec).is_err());
    }

    #[test]
    fn test_parse_tile_file() {
        let source = format!("{}\n---\nname:closed\n\n#####\n#####\n#####\n#####\n#####\n", CORRIDOR);
        let tiles = parse_tile_file(&source).unwrap();

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].name(), "closed");
        assert!(tiles[1].exits().is_empty());
    }
}
