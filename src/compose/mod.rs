//! Geometry and composition of levels.
//!
//! Generated grids are rendered into levels, which are then combined:
//! merged at an offset, inserted as sub-levels, tiled side by side or
//! wrapped into a fresh level.

mod layout;
mod merge;

pub use layout::{layout_offsets, tile_levels, wrap_as_level, TileConf, WrapConf};
pub use merge::{insert_sub_level, merge_map_base_elems};
