//! Constraint-based level filler.
//!
//! The filler places one or more start rooms, then walks the remaining
//! slots and asks a constraint function for a template that fits each one.
//! Every placement is checked against the already-placed neighbours, so
//! adjacent slots always agree on their shared edge.
//!
//! # Example
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(42);
//! let grid = generate(
//!     &model,
//!     &GenerateConf::new(5, 5),
//!     &mut rng,
//!     |ctx| Ok(RoomPlacement::new(2, 4, ctx.find_by_name("entrance_s")?)),
//!     |ctx, _x, _y, reqs| Ok(ctx.choose_matching(reqs)),
//! )?;
//! println!("{}", grid.render().render());
//! ```

mod context;
mod requirements;

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::registry::Model;
use crate::types::{BaseElem, CellMap, Direction, Level, Template};

pub use context::{GridContext, RoomPlacement};
pub use requirements::{ExitRequirements, Requirement};

/// Order in which empty slots are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillOrder {
    /// Left to right, top to bottom.
    #[default]
    RowMajor,
    /// Breadth-first from the placed rooms through open exits, then
    /// row-major for any slot not reached that way.
    Frontier,
}

/// Grid dimensions and visiting order for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateConf {
    pub tiles_x: usize,
    pub tiles_y: usize,
    pub fill_order: FillOrder,
}

impl GenerateConf {
    pub fn new(tiles_x: usize, tiles_y: usize) -> Self {
        Self {
            tiles_x,
            tiles_y,
            fill_order: FillOrder::default(),
        }
    }

    pub fn with_fill_order(mut self, fill_order: FillOrder) -> Self {
        self.fill_order = fill_order;
        self
    }
}

/// A fully filled grid of templates.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tile_size: (usize, usize),
    tiles_x: usize,
    tiles_y: usize,
    slots: Vec<Arc<Template>>,
    start: (usize, usize),
}

impl TileGrid {
    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> usize {
        self.tiles_y
    }

    /// Tile dimensions as (width, height).
    pub fn tile_size(&self) -> (usize, usize) {
        self.tile_size
    }

    /// Slot of the formal start room.
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Arc<Template>> {
        if x < self.tiles_x && y < self.tiles_y {
            self.slots.get(y * self.tiles_x + x)
        } else {
            None
        }
    }

    /// Iterate over all slots as (x, y, template), row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Arc<Template>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, t)| (i % self.tiles_x, i / self.tiles_x, t))
    }

    /// Map size in cells as (width, height).
    pub fn cell_size(&self) -> (usize, usize) {
        (self.tiles_x * self.tile_size.0, self.tiles_y * self.tile_size.1)
    }

    /// Concatenate each slot's block at `(x * tile_w, y * tile_h)`.
    pub fn render(&self) -> CellMap {
        let (tw, th) = self.tile_size;
        let (width, height) = self.cell_size();
        let mut map = CellMap::new(width, height, BaseElem::Rock);
        for (x, y, template) in self.iter() {
            for (ty, row) in template.grid().iter().enumerate() {
                for (tx, &c) in row.iter().enumerate() {
                    map.set(x * tw + tx, y * th + ty, c);
                }
            }
        }
        map
    }

    /// Render into a level with no entities.
    pub fn to_level(&self, name: impl Into<String>) -> Level {
        Level::from_map(name, self.render())
    }

    /// Template names laid out as a grid, one row per line.
    pub fn layout(&self) -> String {
        (0..self.tiles_y)
            .map(|y| {
                (0..self.tiles_x)
                    .filter_map(|x| self.get(x, y).map(|t| t.name()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fill a grid using a start-room function and a constraint function.
///
/// The start function may place extra rooms through the context; the room
/// it returns is placed last and becomes the grid's formal start. The
/// constraint function is then called once per remaining slot with the
/// slot's exit requirements. Returning `None`, or a template that breaks a
/// requirement, fails with `TileError::Generation`.
pub fn generate<S, C>(
    model: &Model,
    conf: &GenerateConf,
    rng: &mut StdRng,
    start: S,
    mut constraint: C,
) -> Result<TileGrid>
where
    S: FnOnce(&mut GridContext) -> Result<RoomPlacement>,
    C: FnMut(&mut GridContext, usize, usize, &ExitRequirements) -> Result<Option<Arc<Template>>>,
{
    let GenerateConf {
        tiles_x,
        tiles_y,
        fill_order,
    } = *conf;
    if tiles_x == 0 || tiles_y == 0 {
        return Err(TileError::Config {
            message: format!("Cannot generate a {}x{} grid", tiles_x, tiles_y),
            help: Some("tiles_x and tiles_y must be at least 1".to_string()),
        });
    }
    debug!(
        "generating {}x{} grid with model '{}' ({:?})",
        tiles_x,
        tiles_y,
        model.name(),
        fill_order
    );

    let mut ctx = GridContext::new(model, tiles_x, tiles_y, rng);
    let placement = start(&mut ctx)?;
    let start_slot = (placement.x, placement.y);
    ctx.add_room(placement)?;
    debug!(
        "start room at {:?}, {} rooms placed",
        start_slot,
        ctx.placed_count()
    );

    match fill_order {
        FillOrder::RowMajor => {
            for y in 0..tiles_y {
                for x in 0..tiles_x {
                    if !ctx.is_placed(x, y) {
                        fill_slot(&mut ctx, x, y, &mut constraint)?;
                    }
                }
            }
        }
        FillOrder::Frontier => fill_frontier(&mut ctx, &mut constraint)?,
    }

    let slots = ctx
        .into_slots()
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| TileError::Generation {
            x: 0,
            y: 0,
            requirements: String::new(),
            message: "grid has unfilled slots after filling".to_string(),
        })?;
    debug!("filled {} slots", slots.len());

    Ok(TileGrid {
        tile_size: model.tile_size(),
        tiles_x,
        tiles_y,
        slots,
        start: start_slot,
    })
}

fn fill_slot<C>(ctx: &mut GridContext, x: usize, y: usize, constraint: &mut C) -> Result<()>
where
    C: FnMut(&mut GridContext, usize, usize, &ExitRequirements) -> Result<Option<Arc<Template>>>,
{
    let reqs = ctx.requirements_at(x, y);
    trace!("slot ({}, {}) needs {}", x, y, reqs);
    let fail = |message: String| TileError::Generation {
        x,
        y,
        requirements: reqs.to_string(),
        message,
    };

    let room = constraint(&mut *ctx, x, y, &reqs)?
        .ok_or_else(|| fail("no template satisfies the exit requirements".to_string()))?;
    if !reqs.is_satisfied_by(room.exits()) {
        return Err(fail(format!(
            "constraint returned '{}' [{}], which breaks the requirements",
            room.name(),
            room.exits()
        )));
    }
    ctx.add_room(RoomPlacement::new(x, y, room))
}

fn fill_frontier<C>(ctx: &mut GridContext, constraint: &mut C) -> Result<()>
where
    C: FnMut(&mut GridContext, usize, usize, &ExitRequirements) -> Result<Option<Arc<Template>>>,
{
    let (tiles_x, tiles_y) = (ctx.tiles_x(), ctx.tiles_y());
    let mut queue: VecDeque<(usize, usize)> = (0..tiles_y)
        .flat_map(|y| (0..tiles_x).map(move |x| (x, y)))
        .filter(|&(x, y)| ctx.is_placed(x, y))
        .collect();

    loop {
        while let Some((x, y)) = queue.pop_front() {
            let exits = match ctx.get(x, y) {
                Some(t) => t.exits(),
                None => continue,
            };
            for dir in Direction::ALL {
                if !exits.has(dir) {
                    continue;
                }
                if let Some((nx, ny)) = dir.step(x, y, tiles_x, tiles_y) {
                    if !ctx.is_placed(nx, ny) {
                        fill_slot(ctx, nx, ny, constraint)?;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }

        let next = (0..tiles_y)
            .flat_map(|y| (0..tiles_x).map(move |x| (x, y)))
            .find(|&(x, y)| !ctx.is_placed(x, y));
        match next {
            Some((x, y)) => {
                trace!("slot ({}, {}) unreached, filling row-major", x, y);
                fill_slot(ctx, x, y, constraint)?;
                queue.push_back((x, y));
            }
            None => return Ok(()),
        }
    }
}
