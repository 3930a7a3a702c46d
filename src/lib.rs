//! tilegen - Procedural tile-based level generator
//!
//! Levels are assembled from small ASCII tiles. Each tile declares the
//! edges it opens on; a constraint-based filler places tiles on a grid so
//! that neighbours always agree, and the resulting maps are composed into
//! larger levels and populated with actors and items.
//!
//! # Example
//!
//! ```ignore
//! use rand::{rngs::StdRng, SeedableRng};
//! use tilegen::{generate_theme, BasicSpawner, Theme, ThemeConf};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let level = generate_theme(Theme::Castle, &ThemeConf::default(), &mut rng, &mut BasicSpawner::new())?;
//! println!("{}", level.map().render());
//! ```

pub mod cli;
pub mod compose;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod output;
pub mod parser;
pub mod registry;
pub mod spawn;
pub mod themes;
pub mod types;
pub mod validation;

pub use compose::{insert_sub_level, merge_map_base_elems, tile_levels, wrap_as_level, TileConf, WrapConf};
pub use discovery::{discover, discover_paths, DiscoveryResult, LoadOptions, Manifest, ScanResult};
pub use error::{Result, TileError};
pub use generator::{
    generate, ExitRequirements, FillOrder, GenerateConf, GridContext, Requirement, RoomPlacement, TileGrid,
};
pub use parser::{parse_tile, parse_tile_file};
pub use registry::{Model, ModelBuilder};
pub use spawn::{get_free_cells_in_bbox, populate, BasicSpawner, EntitySpawner, PopulateConf, PopulateReport};
pub use themes::{generate_theme, StartSide, Theme, ThemeConf};
pub use types::{
    Anchor, BBox, BaseElem, CellMap, Direction, Entity, EntityKind, Exits, Level, LevelExport, Orientation, Placed,
    Template, TileFlags,
};
pub use validation::{validate_grid, validate_model, Diagnostic, Severity, ValidationResult};
