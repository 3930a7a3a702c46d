//! Core domain types for tilegen.
//!
//! This module contains the fundamental types used throughout generation:
//! - `Direction` / `Exits` - Tile edges and exit sets
//! - `BaseElem` - The terrain glyph vocabulary
//! - `Template` - A parsed, transformable tile
//! - `CellMap` / `Level` - Rendered maps with entity placements

mod direction;
mod elem;
mod level;
mod template;

pub use direction::{Direction, Exits};
pub use elem::{is_blocking_glyph, BaseElem};
pub use level::{BBox, CellMap, Entity, EntityKind, Level, LevelExport, Placed};
pub use template::{Anchor, Orientation, Template, TileFlags};

pub(crate) use template::{parse_flag, parse_weight};
