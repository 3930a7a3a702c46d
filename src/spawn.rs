//! Actor and item placement.
//!
//! Entities come from the game's entity system; the generator only asks for
//! them by name through `EntitySpawner` and records where they stand.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, TileError};
use crate::types::{BBox, Entity, EntityKind, Level};

/// Creates actors and items by name.
pub trait EntitySpawner {
    fn create_actor(&mut self, name: &str) -> Result<Entity>;
    fn create_item(&mut self, name: &str) -> Result<Entity>;
}

/// Spawner handing out sequential ids for any name.
#[derive(Debug, Default)]
pub struct BasicSpawner {
    next_id: u64,
}

impl BasicSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    fn create(&mut self, name: &str, kind: EntityKind) -> Result<Entity> {
        if name.trim().is_empty() {
            return Err(TileError::Config {
                message: format!("Cannot create an {:?} with an empty name", kind),
                help: None,
            });
        }
        self.next_id += 1;
        Ok(Entity {
            id: self.next_id,
            name: name.trim().to_string(),
            kind,
        })
    }
}

impl EntitySpawner for BasicSpawner {
    fn create_actor(&mut self, name: &str) -> Result<Entity> {
        self.create(name, EntityKind::Actor)
    }

    fn create_item(&mut self, name: &str) -> Result<Entity> {
        self.create(name, EntityKind::Item)
    }
}

/// Spawnable cells without an actor inside `bbox`, row-major. Doors and
/// marked features are never free.
pub fn get_free_cells_in_bbox(level: &Level, bbox: BBox) -> Vec<(usize, usize)> {
    level.free_cells_in(bbox)
}

/// What to place on a level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateConf {
    /// Actor names, one entity per entry.
    pub actors: Vec<String>,
    /// Item names, one entity per entry.
    pub items: Vec<String>,
    /// Restrict placement to this box; the whole level when `None`.
    pub bbox: Option<BBox>,
}

impl PopulateConf {
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.items.is_empty()
    }
}

/// Counts of entities actually placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub actors: usize,
    pub items: usize,
}

/// Place actors and items on distinct random free cells.
///
/// When the box runs out of free cells the remaining entities are skipped
/// with a warning.
pub fn populate(
    level: &mut Level,
    spawner: &mut dyn EntitySpawner,
    conf: &PopulateConf,
    rng: &mut StdRng,
) -> Result<PopulateReport> {
    let bbox = conf.bbox.unwrap_or_else(|| level.bbox());
    let mut cells = get_free_cells_in_bbox(level, bbox);
    cells.shuffle(rng);

    let mut report = PopulateReport::default();
    let wanted = conf.actors.len() + conf.items.len();
    for name in &conf.actors {
        let Some((x, y)) = cells.pop() else { break };
        level.add_actor_at(spawner.create_actor(name)?, x, y)?;
        report.actors += 1;
    }
    for name in &conf.items {
        let Some((x, y)) = cells.pop() else { break };
        level.add_item_at(spawner.create_item(name)?, x, y)?;
        report.items += 1;
    }

    let placed = report.actors + report.items;
    if placed < wanted {
        warn!(
            "level '{}': only {} of {} entities fit into {:?}",
            level.name, placed, wanted, bbox
        );
    }
    debug!(
        "populated '{}' with {} actors and {} items",
        level.name, report.actors, report.items
    );
    Ok(report)
}
