//! Abandoned fort: a crumbling castle standing in an open field.

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::compose::{tile_levels, TileConf};
use crate::error::Result;
use crate::types::{BBox, BaseElem, Level};

use super::castle::{generate_castle, CastleConf};

/// Options for the abandoned fort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FortConf {
    pub castle: CastleConf,
    pub tiles_x: usize,
    pub tiles_y: usize,
    /// Chance that a wall cell has fallen to rubble.
    pub decay: f64,
    /// Chance of a tree on each field cell.
    pub tree_thr: f64,
    /// Field cells between the fort and the level edge.
    pub margin: usize,
}

impl Default for FortConf {
    fn default() -> Self {
        Self {
            castle: CastleConf::default(),
            tiles_x: 5,
            tiles_y: 5,
            decay: 0.25,
            tree_thr: 0.05,
            margin: 4,
        }
    }
}

/// Turn wall cells to rubble with probability `decay`. Returns how many fell.
pub fn decay_walls(level: &mut Level, decay: f64, rng: &mut StdRng) -> usize {
    let decay = decay.clamp(0.0, 1.0);
    let walls: Vec<(usize, usize)> = level
        .map()
        .iter_cells()
        .filter(|&(_, _, c)| BaseElem::from_char(c) == BaseElem::Wall)
        .map(|(x, y, _)| (x, y))
        .collect();
    let mut fallen = 0;
    for (x, y) in walls {
        if rng.gen_bool(decay) {
            level.set_base_elem(x, y, BaseElem::Rubble);
            fallen += 1;
        }
    }
    fallen
}

/// Build the fort level and return it with the fort's bounding box.
pub fn fort_level(conf: &FortConf, rng: &mut StdRng) -> Result<(Level, BBox)> {
    let mut fort = generate_castle(conf.tiles_x, conf.tiles_y, &conf.castle, rng)?.to_level("fort");
    let fallen = decay_walls(&mut fort, conf.decay, rng);

    let m = conf.margin;
    let mut field = Level::new("abandoned_fort", fort.width() + 2 * m, fort.height() + 2 * m, BaseElem::Grass);
    let tree_thr = conf.tree_thr.clamp(0.0, 1.0);
    for y in 0..field.height() {
        for x in 0..field.width() {
            if rng.gen_bool(tree_thr) {
                field.set_base_elem(x, y, BaseElem::Tree);
            }
        }
    }

    let place = TileConf {
        x: m,
        y: m,
        ..TileConf::default()
    };
    tile_levels(&mut field, &[fort], &place)?;
    let bbox = BBox::from_size(m, m, field.width() - 2 * m, field.height() - 2 * m);
    debug!("abandoned fort: {} walls fell, fort at {:?}", fallen, bbox);
    Ok((field, bbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellMap;
    use rand::SeedableRng;

    #[test]
    fn test_decay_only_touches_walls() {
        let map = CellMap::from_rows(&["###", "#.#", "###"]).unwrap();
        let mut level = Level::from_map("box", map);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(decay_walls(&mut level, 1.0, &mut rng), 8);
        assert_eq!(level.map().count(BaseElem::Rubble), 8);
        assert_eq!(level.get_base_elem(1, 1), Some(BaseElem::Floor));
        assert_eq!(decay_walls(&mut level, 0.0, &mut rng), 0);
    }

    #[test]
    fn test_fort_sits_inside_the_field() {
        let mut rng = StdRng::seed_from_u64(14);
        let conf = FortConf {
            tiles_x: 3,
            tiles_y: 3,
            tree_thr: 0.0,
            ..FortConf::default()
        };
        let (level, bbox) = fort_level(&conf, &mut rng).unwrap();

        assert_eq!(level.size(), (21 + 8, 21 + 8));
        assert_eq!(bbox, BBox::new(4, 4, 24, 24));
        for (x, y, c) in level.map().iter_cells() {
            if !bbox.contains(x, y) {
                assert_eq!(c, ',');
            }
        }
    }
}
