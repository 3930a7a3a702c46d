//! Parser modules for tile definitions.
//!
//! A tile definition is a small text block:
//!
//! ```text
//! name:corridor_bend
//! dir:SE
//! X=#
//!
//! XXXXXXX
//! XXXXXXX
//! XXXXXXX
//! XXX....
//! XXX.XXX
//! XXX.XXX
//! XXX.XXX
//! ```
//!
//! A `.tiles` file holds several of these, separated by `---` lines.
//!
//! # Usage
//!
//! ```ignore
//! use tilegen::parser::parse_tile_file;
//!
//! let source = std::fs::read_to_string("tiles/sewer.tiles")?;
//! for tile in parse_tile_file(&source)? {
//!     println!("Found: {}", tile);
//! }
//! ```

mod body;
mod document;
mod header;
mod tile;
pub mod types;

// Re-export main entry points
pub use document::parse_raw_tiles;
pub use tile::{build_template, parse_tile, parse_tile_file, parse_tile_with, Substitutions};
pub use types::{HeaderEntry, RawTile};
