//! Built-in themes.
//!
//! A theme bundles a model, a start-room function and a constraint
//! function, and knows how to compose the generated grids into a finished
//! level. `generate_theme` runs a theme end to end, population included.

pub mod abandoned_fort;
pub mod capital;
pub mod castle;
pub mod crypt;
pub mod dwarven_city;
pub mod houses;

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use log::debug;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::registry::Model;
use crate::spawn::{populate, EntitySpawner, PopulateConf, PopulateReport};
use crate::types::{BBox, Level};

pub use abandoned_fort::{fort_level, FortConf};
pub use capital::{capital_level, CapitalConf};
pub use castle::{castle_model, generate_castle, CastleConf, StartSide};
pub use crypt::{crypt_model, generate_crypt};
pub use dwarven_city::{dwarven_city_level, DwarvenConf};
pub use houses::{generate_house, houses_model, HouseConf};

/// Resolve a lazily built model, turning a failed build into an error.
pub(crate) fn builtin(model: &'static LazyLock<Result<Model>>) -> Result<&'static Model> {
    LazyLock::force(model).as_ref().map_err(|e| TileError::Parse {
        message: format!("built-in model failed to build: {}", e),
        help: None,
    })
}

/// All built-in models.
pub fn builtin_models() -> Result<Vec<&'static Model>> {
    Ok(vec![castle_model()?, crypt_model()?, houses_model()?])
}

/// Look up a built-in model by name.
pub fn builtin_model(name: &str) -> Result<&'static Model> {
    for model in builtin_models()? {
        if model.name() == name {
            return Ok(model);
        }
    }
    Err(TileError::Config {
        message: format!("Unknown model '{}'", name),
        help: Some("Run `tilegen list` to see the available models".to_string()),
    })
}

/// Pieces the themes place by name, per built-in model name.
pub fn required_pieces(model_name: &str) -> &'static [&'static str] {
    match model_name {
        "castle" => &[
            "corner_nw",
            "corner_ne",
            "corner_sw",
            "corner_se",
            "corner_gate_nw",
            "entrance_n",
            "entrance_s",
            "entrance_e",
            "entrance_w",
        ],
        "crypt" => &["stairs", "corridor"],
        "houses5x5" => &["start1x1", "start1xN", "start2xN", "closet"],
        _ => &[],
    }
}

/// A level theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Castle,
    Crypt,
    Houses,
    DwarvenCity,
    Capital,
    AbandonedFort,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Castle,
        Theme::Crypt,
        Theme::Houses,
        Theme::DwarvenCity,
        Theme::Capital,
        Theme::AbandonedFort,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Castle => "castle",
            Theme::Crypt => "crypt",
            Theme::Houses => "houses",
            Theme::DwarvenCity => "dwarven-city",
            Theme::Capital => "capital",
            Theme::AbandonedFort => "abandoned-fort",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Theme::Castle => "walled castle with corner towers and gates",
            Theme::Crypt => "rock-cut passages and tombs below a stairway",
            Theme::Houses => "a single house of 5x5 rooms",
            Theme::DwarvenCity => "entry fort, passage and main fort inside rock",
            Theme::Capital => "castle between residential districts, walled",
            Theme::AbandonedFort => "crumbling castle on an open field",
        }
    }

    /// Name of the model whose tiles the theme uses.
    pub fn model_name(self) -> &'static str {
        match self {
            Theme::Crypt => "crypt",
            Theme::Houses => "houses5x5",
            _ => "castle",
        }
    }

    fn actor_names(self) -> &'static [&'static str] {
        match self {
            Theme::Castle => &["guard", "knight"],
            Theme::Crypt => &["skeleton", "ghoul"],
            Theme::Houses => &["villager"],
            Theme::DwarvenCity => &["dwarf", "guard"],
            Theme::Capital => &["citizen", "guard", "merchant"],
            Theme::AbandonedFort => &["bandit", "wolf"],
        }
    }

    fn item_names(self) -> &'static [&'static str] {
        match self {
            Theme::Crypt => &["bone", "coin"],
            Theme::AbandonedFort => &["rusty sword", "coin"],
            _ => &["coin", "torch"],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by all themes.
///
/// Themes interpret the grid size for their main structure: the castle
/// itself, the main fort of a dwarven city, the capital's central castle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConf {
    pub tiles_x: usize,
    pub tiles_y: usize,
    pub corridor_door_thr: f64,
    pub start: StartSide,
    /// Force corridors through the castle's middle row and column.
    pub cross: bool,
    pub actors: usize,
    pub items: usize,
}

impl Default for ThemeConf {
    fn default() -> Self {
        Self {
            tiles_x: 5,
            tiles_y: 5,
            corridor_door_thr: 0.2,
            start: StartSide::South,
            cross: false,
            actors: 4,
            items: 4,
        }
    }
}

impl ThemeConf {
    pub fn validate(&self) -> Result<()> {
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err(TileError::Config {
                message: format!("Grid size {}x{} has no slots", self.tiles_x, self.tiles_y),
                help: Some("Use at least one tile in each direction".to_string()),
            });
        }
        if !(0.0..=1.0).contains(&self.corridor_door_thr) {
            return Err(TileError::Config {
                message: format!(
                    "corridor_door_thr must be between 0 and 1, got {}",
                    self.corridor_door_thr
                ),
                help: None,
            });
        }
        Ok(())
    }

    fn castle_conf(&self) -> CastleConf {
        CastleConf {
            corridor_door_thr: self.corridor_door_thr,
            start: self.start,
            cross: self.cross,
        }
    }
}

/// Names for `count` entities, cycling through `names`.
fn cycle_names(names: &[&str], count: usize) -> Vec<String> {
    names.iter().cycle().take(count).map(|n| n.to_string()).collect()
}

/// Generate a level for `theme` and populate it through `spawner`.
pub fn generate_theme(
    theme: Theme,
    conf: &ThemeConf,
    rng: &mut StdRng,
    spawner: &mut dyn EntitySpawner,
) -> Result<Level> {
    conf.validate()?;
    debug!("generating {} ({}x{} tiles)", theme, conf.tiles_x, conf.tiles_y);

    let (mut level, bbox): (Level, Option<BBox>) = match theme {
        Theme::Castle => {
            let grid = generate_castle(conf.tiles_x, conf.tiles_y, &conf.castle_conf(), rng)?;
            (grid.to_level("castle"), None)
        }
        Theme::Crypt => {
            let grid = generate_crypt(conf.tiles_x, conf.tiles_y, rng)?;
            (grid.to_level("crypt"), None)
        }
        Theme::Houses => {
            let grid = generate_house(conf.tiles_x, conf.tiles_y, HouseConf::default(), rng)?;
            (grid.to_level("house"), None)
        }
        Theme::DwarvenCity => {
            let dwarven = DwarvenConf {
                city_tiles_x: conf.tiles_x,
                city_tiles_y: conf.tiles_y,
                corridor_door_thr: conf.corridor_door_thr,
                ..DwarvenConf::default()
            };
            (dwarven_city_level(&dwarven, rng)?, None)
        }
        Theme::Capital => {
            let capital = CapitalConf {
                castle_tiles_x: conf.tiles_x,
                castle_tiles_y: conf.tiles_y,
                corridor_door_thr: conf.corridor_door_thr,
                ..CapitalConf::default()
            };
            (capital_level(&capital, rng)?, None)
        }
        Theme::AbandonedFort => {
            let fort = FortConf {
                castle: conf.castle_conf(),
                tiles_x: conf.tiles_x,
                tiles_y: conf.tiles_y,
                ..FortConf::default()
            };
            let (level, bbox) = fort_level(&fort, rng)?;
            (level, Some(bbox))
        }
    };

    let pop = PopulateConf {
        actors: cycle_names(theme.actor_names(), conf.actors),
        items: cycle_names(theme.item_names(), conf.items),
        bbox,
    };
    let PopulateReport { actors, items } = populate(&mut level, spawner, &pop, rng)?;
    debug!(
        "{} level '{}' is {}x{} with {} actors and {} items",
        theme,
        level.name,
        level.width(),
        level.height(),
        actors,
        items
    );
    Ok(level)
}
