//! Laying out several sub-levels side by side.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::types::{BaseElem, Level};

use super::merge::{fits, insert_sub_level};

/// Placement of a row (or column) of sub-levels inside a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConf {
    /// Left edge of the layout, unless centred horizontally.
    pub x: usize,
    /// Top edge of the layout, unless centred vertically.
    pub y: usize,
    pub center_x: bool,
    pub center_y: bool,
    /// Lay out top-to-bottom instead of left-to-right.
    pub transpose: bool,
}

/// Options for wrapping sub-levels into a fresh level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapConf {
    pub transpose: bool,
    pub center_x: bool,
    pub center_y: bool,
    /// Fill for cells not covered by any sub-level.
    pub base_elem: BaseElem,
}

impl Default for WrapConf {
    fn default() -> Self {
        Self {
            transpose: false,
            center_x: false,
            center_y: false,
            base_elem: BaseElem::Wall,
        }
    }
}

fn orient<T>(transpose: bool, (a, b): (T, T)) -> (T, T) {
    if transpose {
        (b, a)
    } else {
        (a, b)
    }
}

/// Offsets at which each sub-level would be placed.
pub fn layout_offsets(
    target: (usize, usize),
    sizes: &[(usize, usize)],
    conf: &TileConf,
) -> Result<Vec<(usize, usize)>> {
    // Work in (along, across) coordinates so both directions share one path
    let swap = |pair| orient(conf.transpose, pair);
    let (target_along, target_across) = swap(target);
    let (start_along, start_across) = swap((conf.x, conf.y));
    let (center_along, center_across) = orient(conf.transpose, (conf.center_x, conf.center_y));

    let total: usize = sizes.iter().map(|s| swap(*s).0).sum();
    let mut along = if center_along {
        target_along.checked_sub(total).map(|gap| gap / 2).ok_or_else(|| {
            TileError::bounds(format!(
                "Sub-levels span {} cells but the target has only {}",
                total, target_along
            ))
        })?
    } else {
        start_along
    };

    let mut offsets = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let (len, thick) = swap(size);
        let across = if center_across {
            target_across.saturating_sub(thick) / 2
        } else {
            start_across
        };
        let offset = swap((along, across));
        if !fits(target, size, offset.0, offset.1) {
            return Err(TileError::CompositionBounds {
                message: format!(
                    "A {}x{} sub-level at ({}, {}) overflows the {}x{} target",
                    size.0, size.1, offset.0, offset.1, target.0, target.1
                ),
                help: Some("Enlarge the target level or change the anchor".to_string()),
            });
        }
        offsets.push(offset);
        along += len;
    }
    Ok(offsets)
}

/// Tile sub-levels into `target`, left-to-right (or top-to-bottom).
///
/// The whole layout is checked before anything is written. Returns the
/// offset of each sub-level.
pub fn tile_levels(target: &mut Level, subs: &[Level], conf: &TileConf) -> Result<Vec<(usize, usize)>> {
    let sizes: Vec<(usize, usize)> = subs.iter().map(Level::size).collect();
    let offsets = layout_offsets(target.size(), &sizes, conf)?;
    for (sub, &(ox, oy)) in subs.iter().zip(&offsets) {
        insert_sub_level(target, sub, ox, oy)?;
    }
    debug!("tiled {} sub-levels into '{}'", subs.len(), target.name);
    Ok(offsets)
}

/// Build a new level just large enough to hold the sub-levels in a row.
///
/// Horizontally the width is the sum of the widths and the height the
/// largest height; transposed, the roles swap. Uncovered cells are filled
/// with `base_elem`.
pub fn wrap_as_level(subs: &[Level], conf: &WrapConf) -> Result<Level> {
    if subs.is_empty() {
        return Err(TileError::CompositionBounds {
            message: "Cannot wrap an empty list of levels".to_string(),
            help: None,
        });
    }

    let (width, height) = if conf.transpose {
        (
            subs.iter().map(Level::width).max().unwrap_or(0),
            subs.iter().map(Level::height).sum(),
        )
    } else {
        (
            subs.iter().map(Level::width).sum(),
            subs.iter().map(Level::height).max().unwrap_or(0),
        )
    };
    let name = subs.iter().map(|l| l.name.as_str()).collect::<Vec<_>>().join("+");
    let mut level = Level::new(name, width, height, conf.base_elem);

    let tile_conf = TileConf {
        x: 0,
        y: 0,
        center_x: conf.center_x,
        center_y: conf.center_y,
        transpose: conf.transpose,
    };
    tile_levels(&mut level, subs, &tile_conf)?;
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn level(name: &str, w: usize, h: usize, fill: BaseElem) -> Level {
        Level::new(name, w, h, fill)
    }

    #[test]
    fn test_wrap_dimension_law() {
        let subs = vec![
            level("a", 3, 2, BaseElem::Floor),
            level("b", 2, 5, BaseElem::Floor),
            level("c", 4, 1, BaseElem::Floor),
        ];

        let wrapped = wrap_as_level(&subs, &WrapConf::default()).unwrap();
        assert_eq!(wrapped.size(), (9, 5));

        let conf = WrapConf {
            transpose: true,
            ..WrapConf::default()
        };
        let wrapped = wrap_as_level(&subs, &conf).unwrap();
        assert_eq!(wrapped.size(), (4, 8));
    }

    #[test]
    fn test_wrap_centres_and_fills() {
        let subs = vec![
            level("tall", 1, 3, BaseElem::Floor),
            level("short", 1, 1, BaseElem::Water),
        ];
        let conf = WrapConf {
            center_y: true,
            base_elem: BaseElem::Rock,
            ..WrapConf::default()
        };

        let wrapped = wrap_as_level(&subs, &conf).unwrap();

        assert_eq!(wrapped.map().render(), ".^\n.~\n.^");
        assert_eq!(wrapped.name, "tall+short");
    }

    #[test]
    fn test_wrap_empty_is_error() {
        assert!(wrap_as_level(&[], &WrapConf::default()).is_err());
    }

    #[test]
    fn test_tile_levels_with_anchor() {
        let mut target = level("field", 8, 4, BaseElem::Grass);
        let subs = vec![level("a", 2, 2, BaseElem::Floor), level("b", 3, 1, BaseElem::Floor)];
        let conf = TileConf {
            x: 1,
            y: 1,
            ..TileConf::default()
        };

        let offsets = tile_levels(&mut target, &subs, &conf).unwrap();

        assert_eq!(offsets, vec![(1, 1), (3, 1)]);
        assert_eq!(target.map().render(), ",,,,,,,,\n,.....,,\n,..,,,,,\n,,,,,,,,");
    }

    #[test]
    fn test_tile_levels_transposed_and_centred() {
        let sizes = [(2, 1), (4, 2)];
        let conf = TileConf {
            center_x: true,
            center_y: true,
            transpose: true,
            ..TileConf::default()
        };

        let offsets = layout_offsets((6, 5), &sizes, &conf).unwrap();

        assert_eq!(offsets, vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn test_tile_levels_checks_whole_layout_first() {
        let mut target = level("field", 5, 3, BaseElem::Grass);
        let before = target.clone();
        let subs = vec![level("a", 3, 3, BaseElem::Floor), level("b", 3, 3, BaseElem::Floor)];

        let err = tile_levels(&mut target, &subs, &TileConf::default()).unwrap_err();

        assert!(matches!(err, TileError::CompositionBounds { .. }));
        assert_eq!(target, before);
    }
}
