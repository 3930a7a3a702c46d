//! Dwarven city: an entry fort, a rock passage and the main fort.
//!
//! The three parts are wrapped left to right inside solid rock and centred
//! vertically. Every part is an odd number of tiles high, so the entry
//! fort's east gate, the passage and the main fort's west gate all sit on
//! the same middle row.

use log::debug;
use rand::rngs::StdRng;

use crate::compose::{wrap_as_level, WrapConf};
use crate::error::Result;
use crate::types::{BaseElem, Level};

use super::castle::{generate_castle, CastleConf, StartSide};
use super::crypt::crypt_model;

/// Sizes of the dwarven city's parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwarvenConf {
    /// The entry fort is square.
    pub entry_tiles: usize,
    pub city_tiles_x: usize,
    pub city_tiles_y: usize,
    /// Passage length in tiles.
    pub passage_len: usize,
    pub corridor_door_thr: f64,
}

impl Default for DwarvenConf {
    fn default() -> Self {
        Self {
            entry_tiles: 3,
            city_tiles_x: 5,
            city_tiles_y: 5,
            passage_len: 2,
            corridor_door_thr: 0.2,
        }
    }
}

/// Round up to an odd tile count of at least 3.
fn odd_tiles(n: usize) -> usize {
    n.max(3) | 1
}

/// A straight rock-walled corridor `len` tiles long, open east and west.
fn passage(len: usize) -> Result<Level> {
    let corridor = crypt_model()?.find_by_name("corridor")?;
    let (tw, th) = corridor.size();
    let mut level = Level::new("passage", tw * len.max(1), th, BaseElem::Rock);
    for i in 0..len.max(1) {
        for (y, row) in corridor.grid().iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                level.map_mut().set(i * tw + x, y, c);
            }
        }
    }
    Ok(level)
}

/// Build a dwarven city level.
pub fn dwarven_city_level(conf: &DwarvenConf, rng: &mut StdRng) -> Result<Level> {
    let entry_tiles = odd_tiles(conf.entry_tiles);
    let entry_conf = CastleConf {
        corridor_door_thr: conf.corridor_door_thr,
        start: StartSide::Through,
        ..CastleConf::default()
    };
    let entry = generate_castle(entry_tiles, entry_tiles, &entry_conf, rng)?.to_level("entry_fort");

    let city_conf = CastleConf {
        corridor_door_thr: conf.corridor_door_thr,
        start: StartSide::West,
        ..CastleConf::default()
    };
    let city = generate_castle(
        odd_tiles(conf.city_tiles_x),
        odd_tiles(conf.city_tiles_y),
        &city_conf,
        rng,
    )?
    .to_level("main_fort");

    let wrap = WrapConf {
        center_y: true,
        base_elem: BaseElem::Rock,
        ..WrapConf::default()
    };
    let mut level = wrap_as_level(&[entry, passage(conf.passage_len)?, city], &wrap)?;
    level.name = "dwarven_city".to_string();
    debug!("dwarven city is {}x{}", level.width(), level.height());
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_odd_tiles() {
        assert_eq!(odd_tiles(1), 3);
        assert_eq!(odd_tiles(4), 5);
        assert_eq!(odd_tiles(7), 7);
    }

    #[test]
    fn test_passage_is_open_on_both_ends() {
        let level = passage(2).unwrap();

        assert_eq!(level.size(), (14, 7));
        assert!((0..14).all(|x| level.get_base_elem(x, 3) == Some(BaseElem::Floor)));
        assert_eq!(level.get_base_elem(0, 0), Some(BaseElem::Rock));
    }

    #[test]
    fn test_gates_line_up_on_the_middle_row() {
        let mut rng = StdRng::seed_from_u64(5);
        let conf = DwarvenConf::default();
        let level = dwarven_city_level(&conf, &mut rng).unwrap();

        // entry 21 wide, passage 14, main fort 35; main fort sets the height
        assert_eq!(level.size(), (21 + 14 + 35, 35));
        let row = 17;
        assert_eq!(level.get_base_elem(20, row), Some(BaseElem::Door));
        assert!((21..35).all(|x| level.get_base_elem(x, row) == Some(BaseElem::Floor)));
        assert_eq!(level.get_base_elem(35, row), Some(BaseElem::Door));
    }
}
