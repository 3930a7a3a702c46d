//! Cell maps and finished levels.
//!
//! A `CellMap` is the flat character map produced by rendering a tile grid.
//! A `Level` wraps a map with a name and the actors/items placed on it. The
//! entities themselves belong to the external entity system; a level only
//! records which entity sits at which coordinate.

use serde::Serialize;

use crate::error::{Result, TileError};

use super::elem::BaseElem;

/// A rectangular character map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMap {
    width: usize,
    height: usize,
    /// Row-major cells: cells[y * width + x].
    cells: Vec<char>,
}

impl CellMap {
    /// Create a map filled with one element.
    pub fn new(width: usize, height: usize, fill: BaseElem) -> Self {
        Self {
            width,
            height,
            cells: vec![fill.glyph(); width * height],
        }
    }

    /// Build a map from text rows, which must all have the same width.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let grid: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = grid.first().map_or(0, |r| r.len());
        if let Some(row) = grid.iter().position(|r| r.len() != width) {
            return Err(TileError::bounds(format!(
                "Map row {} is {} wide, expected {}",
                row,
                grid[row].len(),
                width
            )));
        }
        Ok(Self {
            width,
            height: grid.len(),
            cells: grid.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a possibly negative coordinate lies on the map.
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Set a cell. Returns false (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, c: char) -> bool {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
            true
        } else {
            false
        }
    }

    pub fn get_elem(&self, x: usize, y: usize) -> Option<BaseElem> {
        self.get(x, y).map(BaseElem::from_char)
    }

    pub fn set_elem(&mut self, x: usize, y: usize, elem: BaseElem) -> bool {
        self.set(x, y, elem.glyph())
    }

    /// Iterate over all cells with their positions.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % self.width, i / self.width, c))
    }

    /// Count cells holding the given element.
    pub fn count(&self, elem: BaseElem) -> usize {
        let glyph = elem.glyph();
        self.cells.iter().filter(|&&c| c == glyph).count()
    }

    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Render as newline-separated rows (no trailing newline).
    pub fn render(&self) -> String {
        self.rows().join("\n")
    }
}

/// Inclusive rectangle of cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BBox {
    pub ulx: usize,
    pub uly: usize,
    pub lrx: usize,
    pub lry: usize,
}

impl BBox {
    /// Box spanning two corners. Corners given in the wrong order are
    /// swapped, so `ulx <= lrx` and `uly <= lry` always hold.
    pub fn new(ulx: usize, uly: usize, lrx: usize, lry: usize) -> Self {
        Self {
            ulx: ulx.min(lrx),
            uly: uly.min(lry),
            lrx: ulx.max(lrx),
            lry: uly.max(lry),
        }
    }

    /// Box of `width × height` cells starting at `(x, y)`.
    pub fn from_size(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::new(
            x,
            y,
            x + width.saturating_sub(1),
            y + height.saturating_sub(1),
        )
    }

    /// Shrink the box by `n` cells on every side.
    ///
    /// The result always lies inside `self`; an axis too short to lose `2n`
    /// cells collapses onto its middle cell.
    pub fn shrink(self, n: usize) -> Self {
        fn axis(lo: usize, hi: usize, n: usize) -> (usize, usize) {
            let span = hi.saturating_sub(lo);
            if span >= n.saturating_mul(2) {
                (lo + n, hi - n)
            } else {
                let mid = lo + span / 2;
                (mid, mid)
            }
        }
        let (ulx, lrx) = axis(self.ulx, self.lrx, n);
        let (uly, lry) = axis(self.uly, self.lry, n);
        Self { ulx, uly, lrx, lry }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.ulx && x <= self.lrx && y >= self.uly && y <= self.lry
    }

    pub fn width(&self) -> usize {
        (self.lrx + 1).saturating_sub(self.ulx)
    }

    pub fn height(&self) -> usize {
        (self.lry + 1).saturating_sub(self.uly)
    }
}

/// Kind of a placed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Actor,
    Item,
}

/// Handle to an entity created by the external entity system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: u64,
    pub name: String,
    pub kind: EntityKind,
}

/// An entity placed on a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placed {
    pub entity: Entity,
    pub x: usize,
    pub y: usize,
}

/// A finished level: a cell map plus entity placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    map: CellMap,
    actors: Vec<Placed>,
    items: Vec<Placed>,
}

impl Level {
    /// Create a level filled with one element.
    pub fn new(name: impl Into<String>, width: usize, height: usize, fill: BaseElem) -> Self {
        Self::from_map(name, CellMap::new(width, height, fill))
    }

    pub fn from_map(name: impl Into<String>, map: CellMap) -> Self {
        Self {
            name: name.into(),
            map,
            actors: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn map(&self) -> &CellMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut CellMap {
        &mut self.map
    }

    pub fn width(&self) -> usize {
        self.map.width()
    }

    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        self.map.size()
    }

    /// Bounding box covering the whole level.
    pub fn bbox(&self) -> BBox {
        BBox::from_size(0, 0, self.width(), self.height())
    }

    pub fn get_base_elem(&self, x: usize, y: usize) -> Option<BaseElem> {
        self.map.get_elem(x, y)
    }

    pub fn set_base_elem(&mut self, x: usize, y: usize, elem: BaseElem) -> bool {
        self.map.set_elem(x, y, elem)
    }

    pub fn actors(&self) -> &[Placed] {
        &self.actors
    }

    pub fn items(&self) -> &[Placed] {
        &self.items
    }

    pub fn actor_at(&self, x: usize, y: usize) -> Option<&Placed> {
        self.actors.iter().find(|p| p.x == x && p.y == y)
    }

    /// Place an actor. The coordinate must lie on the map.
    pub fn add_actor_at(&mut self, actor: Entity, x: usize, y: usize) -> Result<()> {
        self.check_on_map(&actor, x, y)?;
        self.actors.push(Placed { entity: actor, x, y });
        Ok(())
    }

    /// Place an item. The coordinate must lie on the map.
    pub fn add_item_at(&mut self, item: Entity, x: usize, y: usize) -> Result<()> {
        self.check_on_map(&item, x, y)?;
        self.items.push(Placed { entity: item, x, y });
        Ok(())
    }

    fn check_on_map(&self, entity: &Entity, x: usize, y: usize) -> Result<()> {
        if self.map.get(x, y).is_none() {
            return Err(TileError::CompositionBounds {
                message: format!(
                    "Cannot place '{}' at ({}, {}) on level '{}' of size {}x{}",
                    entity.name,
                    x,
                    y,
                    self.name,
                    self.width(),
                    self.height()
                ),
                help: None,
            });
        }
        Ok(())
    }

    /// Whether a cell can take a new entity: spawnable ground with no actor.
    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.get_base_elem(x, y).is_some_and(BaseElem::is_spawnable) && self.actor_at(x, y).is_none()
    }

    /// Free cells inside the box, in row-major order.
    pub fn free_cells_in(&self, bbox: BBox) -> Vec<(usize, usize)> {
        let lrx = bbox.lrx.min(self.width().saturating_sub(1));
        let lry = bbox.lry.min(self.height().saturating_sub(1));
        let mut cells = Vec::new();
        if self.map.is_empty() {
            return cells;
        }
        for y in bbox.uly..=lry {
            for x in bbox.ulx..=lrx {
                if self.is_free(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    pub(crate) fn push_placed(&mut self, placed: Placed) {
        match placed.entity.kind {
            EntityKind::Actor => self.actors.push(placed),
            EntityKind::Item => self.items.push(placed),
        }
    }

    /// Snapshot for JSON export.
    pub fn export(&self) -> LevelExport {
        LevelExport {
            name: self.name.clone(),
            size: [self.width(), self.height()],
            map: self.map.rows(),
            actors: self.actors.clone(),
            items: self.items.clone(),
        }
    }
}

/// Serializable view of a level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelExport {
    pub name: String,
    /// Cell dimensions [width, height].
    pub size: [usize; 2],
    pub map: Vec<String>,
    pub actors: Vec<Placed>,
    pub items: Vec<Placed>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin(id: u64) -> Entity {
        Entity {
            id,
            name: "goblin".to_string(),
            kind: EntityKind::Actor,
        }
    }

    #[test]
    fn test_cell_map_from_rows() {
        let map = CellMap::from_rows(&["#.#", "..."]).unwrap();
        assert_eq!(map.size(), (3, 2));
        assert_eq!(map.get(1, 0), Some('.'));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.render(), "#.#\n...");
    }

    #[test]
    fn test_cell_map_rejects_ragged_rows() {
        assert!(CellMap::from_rows(&["###", "#"]).is_err());
    }

    #[test]
    fn test_cell_map_set_out_of_bounds() {
        let mut map = CellMap::new(2, 2, BaseElem::Floor);
        assert!(map.set_elem(1, 1, BaseElem::Wall));
        assert!(!map.set_elem(2, 1, BaseElem::Wall));
        assert_eq!(map.count(BaseElem::Wall), 1);
        assert!(map.in_bounds(1, 1));
        assert!(!map.in_bounds(-1, 0));
    }

    #[test]
    fn test_iter_cells_positions() {
        let map = CellMap::from_rows(&["ab", "cd"]).unwrap();
        let cells: Vec<_> = map.iter_cells().collect();
        assert_eq!(cells, vec![(0, 0, 'a'), (1, 0, 'b'), (0, 1, 'c'), (1, 1, 'd')]);
    }

    #[test]
    fn test_bbox() {
        let bbox = BBox::from_size(2, 3, 4, 2);
        assert_eq!(bbox, BBox::new(2, 3, 5, 4));
        assert_eq!(bbox.width(), 4);
        assert_eq!(bbox.height(), 2);
        assert!(bbox.contains(5, 4));
        assert!(!bbox.contains(6, 4));
        assert_eq!(BBox::new(0, 0, 9, 9).shrink(2), BBox::new(2, 2, 7, 7));
    }

    #[test]
    fn test_bbox_reversed_corners() {
        let bbox = BBox::new(5, 4, 2, 3);
        assert_eq!(bbox, BBox::new(2, 3, 5, 4));
        assert_eq!((bbox.width(), bbox.height()), (4, 2));

        let raw = BBox { ulx: 5, uly: 4, lrx: 2, lry: 3 };
        assert_eq!((raw.width(), raw.height()), (0, 0));
    }

    #[test]
    fn test_bbox_shrink_stays_inside() {
        let small = BBox::new(3, 3, 7, 4);
        let shrunk = small.shrink(3);
        assert_eq!(shrunk, BBox::new(5, 3, 5, 3));
        assert!(small.contains(shrunk.ulx, shrunk.uly) && small.contains(shrunk.lrx, shrunk.lry));

        assert_eq!(BBox::new(0, 0, 6, 6).shrink(3), BBox::new(3, 3, 3, 3));
        assert_eq!(BBox::new(1, 1, 1, 1).shrink(usize::MAX), BBox::new(1, 1, 1, 1));
    }

    #[test]
    fn test_doors_and_markers_are_not_free() {
        let map = CellMap::from_rows(&["##+##", "#.<.#", "#.&.#", "#####"]).unwrap();
        let level = Level::from_map("crypt", map);
        assert_eq!(level.free_cells_in(level.bbox()), vec![(1, 1), (3, 1), (1, 2), (3, 2)]);
    }

    #[test]
    fn test_level_free_cells() {
        let map = CellMap::from_rows(&["####", "#..#", "#~.#", "####"]).unwrap();
        let mut level = Level::from_map("room", map);
        assert_eq!(level.free_cells_in(level.bbox()), vec![(1, 1), (2, 1), (2, 2)]);

        level.add_actor_at(goblin(1), 2, 1).unwrap();
        assert_eq!(level.free_cells_in(level.bbox()), vec![(1, 1), (2, 2)]);
        assert_eq!(level.free_cells_in(BBox::new(2, 2, 9, 9)), vec![(2, 2)]);
    }

    #[test]
    fn test_add_actor_out_of_bounds() {
        let mut level = Level::new("tiny", 2, 2, BaseElem::Floor);
        assert!(level.add_actor_at(goblin(1), 5, 0).is_err());
        assert!(level.actors().is_empty());
    }

    #[test]
    fn test_export_serializes() {
        let mut level = Level::new("tiny", 2, 1, BaseElem::Floor);
        level.add_actor_at(goblin(7), 1, 0).unwrap();

        let json = serde_json::to_string(&level.export()).unwrap();
        assert!(json.contains("\"size\":[2,1]"));
        assert!(json.contains("\"map\":[\"..\"]"));
        assert!(json.contains("\"kind\":\"actor\""));
    }
}
