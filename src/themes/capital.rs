//! Capital: a castle flanked by residential districts, inside a city wall.
//!
//! Each district is a few columns of houses standing on grass plots. The
//! districts sit west and east of the castle, and the whole city gets a
//! one-cell wall with a gate below the castle's south entrance.

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::compose::{insert_sub_level, wrap_as_level, WrapConf};
use crate::error::Result;
use crate::types::{BaseElem, Level};

use super::castle::{generate_castle, CastleConf, StartSide};
use super::houses::{generate_house, HouseConf};

/// Layout options for the capital.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalConf {
    pub castle_tiles_x: usize,
    pub castle_tiles_y: usize,
    /// House columns per district.
    pub district_cols: usize,
    /// Largest house side in rooms.
    pub max_house_tiles: usize,
    pub corridor_door_thr: f64,
}

impl Default for CapitalConf {
    fn default() -> Self {
        Self {
            castle_tiles_x: 5,
            castle_tiles_y: 5,
            district_cols: 2,
            max_house_tiles: 2,
            corridor_door_thr: 0.2,
        }
    }
}

/// A random house on a plot with a one-cell grass margin.
fn house_plot(conf: &CapitalConf, rng: &mut StdRng) -> Result<Level> {
    let max = conf.max_house_tiles.max(1);
    let (w, h) = (rng.gen_range(1..=max), rng.gen_range(1..=max));
    let house = generate_house(w, h, HouseConf::default(), rng)?.to_level("house");
    let mut plot = Level::new("plot", house.width() + 2, house.height() + 2, BaseElem::Grass);
    insert_sub_level(&mut plot, &house, 1, 1)?;
    Ok(plot)
}

/// Houses stacked top to bottom until the column is at least `min_height`.
fn house_column(conf: &CapitalConf, min_height: usize, rng: &mut StdRng) -> Result<Level> {
    let mut plots = Vec::new();
    let mut height = 0;
    while plots.is_empty() || height < min_height {
        let plot = house_plot(conf, rng)?;
        height += plot.height();
        plots.push(plot);
    }
    let wrap = WrapConf {
        transpose: true,
        center_x: true,
        base_elem: BaseElem::Grass,
        ..WrapConf::default()
    };
    wrap_as_level(&plots, &wrap)
}

fn district(name: &str, conf: &CapitalConf, min_height: usize, rng: &mut StdRng) -> Result<Level> {
    let columns = (0..conf.district_cols.max(1))
        .map(|_| house_column(conf, min_height, rng))
        .collect::<Result<Vec<_>>>()?;
    let wrap = WrapConf {
        center_y: true,
        base_elem: BaseElem::Grass,
        ..WrapConf::default()
    };
    let mut level = wrap_as_level(&columns, &wrap)?;
    level.name = name.to_string();
    Ok(level)
}

/// Build a capital level.
pub fn capital_level(conf: &CapitalConf, rng: &mut StdRng) -> Result<Level> {
    let castle_conf = CastleConf {
        corridor_door_thr: conf.corridor_door_thr,
        start: StartSide::South,
        cross: true,
    };
    let grid = generate_castle(conf.castle_tiles_x, conf.castle_tiles_y, &castle_conf, rng)?;
    let (tw, _) = grid.tile_size();
    let castle_gate_x = (grid.tiles_x() / 2) * tw + tw / 2;
    let castle = grid.to_level("castle");

    let west = district("west", conf, castle.height(), rng)?;
    let east = district("east", conf, castle.height(), rng)?;
    let gate_x = 1 + west.width() + castle_gate_x;

    let wrap = WrapConf {
        center_y: true,
        base_elem: BaseElem::Grass,
        ..WrapConf::default()
    };
    let city = wrap_as_level(&[west, castle, east], &wrap)?;

    let mut level = Level::new("capital", city.width() + 2, city.height() + 2, BaseElem::Wall);
    insert_sub_level(&mut level, &city, 1, 1)?;
    let bottom = level.height() - 1;
    level.set_base_elem(gate_x, bottom, BaseElem::Door);
    debug!(
        "capital is {}x{}, city gate at ({}, {})",
        level.width(),
        level.height(),
        gate_x,
        bottom
    );
    Ok(level)
}
