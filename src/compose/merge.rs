//! Cell-level merging of maps and levels.

use log::trace;

use crate::error::{Result, TileError};
use crate::types::{CellMap, Level, Placed};

/// Copy every cell of `source` onto `target` at offset `(ox, oy)`.
///
/// Cells falling outside `target` are skipped one by one, so offsets may be
/// negative or push the source partly off the map. Returns the number of
/// cells written.
pub fn merge_map_base_elems(target: &mut CellMap, source: &CellMap, ox: isize, oy: isize) -> usize {
    let mut written = 0;
    for (sx, sy, c) in source.iter_cells() {
        let dx = ox + sx as isize;
        let dy = oy + sy as isize;
        if target.in_bounds(dx, dy) && target.set(dx as usize, dy as usize, c) {
            written += 1;
        }
    }
    written
}

/// Whether a `w × h` block at `(ox, oy)` lies fully inside `target`.
pub(crate) fn fits(target: (usize, usize), size: (usize, usize), ox: usize, oy: usize) -> bool {
    ox.checked_add(size.0).is_some_and(|r| r <= target.0)
        && oy.checked_add(size.1).is_some_and(|b| b <= target.1)
}

/// Insert a sub-level into `target` at `(ox, oy)`.
///
/// The whole sub-level must fit; otherwise nothing is changed. Cells are
/// copied and every actor and item moves along with translated
/// coordinates.
pub fn insert_sub_level(target: &mut Level, sub: &Level, ox: usize, oy: usize) -> Result<()> {
    if !fits(target.size(), sub.size(), ox, oy) {
        return Err(TileError::CompositionBounds {
            message: format!(
                "Sub-level '{}' ({}x{}) at ({}, {}) does not fit into '{}' ({}x{})",
                sub.name,
                sub.width(),
                sub.height(),
                ox,
                oy,
                target.name,
                target.width(),
                target.height()
            ),
            help: Some("Enlarge the target level or move the offset".to_string()),
        });
    }

    merge_map_base_elems(target.map_mut(), sub.map(), ox as isize, oy as isize);
    for placed in sub.actors().iter().chain(sub.items()) {
        target.push_placed(Placed {
            entity: placed.entity.clone(),
            x: placed.x + ox,
            y: placed.y + oy,
        });
    }
    trace!(
        "inserted '{}' into '{}' at ({}, {})",
        sub.name,
        target.name,
        ox,
        oy
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BaseElem, Entity, EntityKind};
    use pretty_assertions::assert_eq;

    fn map(rows: &[&str]) -> CellMap {
        CellMap::from_rows(rows).unwrap()
    }

    #[test]
    fn test_merge_copies_cells() {
        let mut target = CellMap::new(4, 3, BaseElem::Grass);
        let written = merge_map_base_elems(&mut target, &map(&["##", "#."]), 1, 1);

        assert_eq!(written, 4);
        assert_eq!(target.render(), ",,,,\n,##,\n,#.,");
    }

    #[test]
    fn test_merge_clips_per_cell() {
        let mut target = CellMap::new(3, 3, BaseElem::Floor);
        let written = merge_map_base_elems(&mut target, &map(&["ab", "cd"]), -1, 2);

        assert_eq!(written, 1);
        assert_eq!(target.render(), "...\n...\nb..");
    }

    #[test]
    fn test_merge_fully_outside() {
        let mut target = CellMap::new(2, 2, BaseElem::Floor);
        assert_eq!(merge_map_base_elems(&mut target, &map(&["#"]), 5, 5), 0);
        assert_eq!(target.count(BaseElem::Floor), 4);
    }

    #[test]
    fn test_insert_sub_level_moves_entities() {
        let mut target = Level::new("town", 6, 6, BaseElem::Grass);
        let mut sub = Level::new("hut", 3, 3, BaseElem::Floor);
        let cat = Entity {
            id: 1,
            name: "cat".to_string(),
            kind: EntityKind::Actor,
        };
        let key = Entity {
            id: 2,
            name: "key".to_string(),
            kind: EntityKind::Item,
        };
        sub.add_actor_at(cat, 1, 1).unwrap();
        sub.add_item_at(key, 0, 2).unwrap();

        insert_sub_level(&mut target, &sub, 2, 3).unwrap();

        assert_eq!(target.get_base_elem(2, 3), Some(BaseElem::Floor));
        assert_eq!(target.get_base_elem(1, 3), Some(BaseElem::Grass));
        assert_eq!((target.actors()[0].x, target.actors()[0].y), (3, 4));
        assert_eq!((target.items()[0].x, target.items()[0].y), (2, 5));
    }

    #[test]
    fn test_insert_out_of_bounds_leaves_target_untouched() {
        let mut target = Level::new("town", 4, 4, BaseElem::Grass);
        let before = target.clone();
        let sub = Level::new("hall", 3, 3, BaseElem::Floor);

        let err = insert_sub_level(&mut target, &sub, 2, 0).unwrap_err();

        assert!(matches!(err, TileError::CompositionBounds { .. }));
        assert_eq!(target, before);
    }

    #[test]
    fn test_fits() {
        assert!(fits((4, 4), (4, 4), 0, 0));
        assert!(!fits((4, 4), (2, 2), 3, 0));
        assert!(!fits((4, 4), (1, 1), usize::MAX, 0));
    }
}
