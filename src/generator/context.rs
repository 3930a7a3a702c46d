//! Grid state shared with start-room and constraint functions.

use std::sync::Arc;

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, TileError};
use crate::registry::Model;
use crate::types::{Direction, Template};

use super::requirements::{ExitRequirements, Requirement};

/// A template placed at a slot coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPlacement {
    pub x: usize,
    pub y: usize,
    pub room: Arc<Template>,
}

impl RoomPlacement {
    pub fn new(x: usize, y: usize, room: Arc<Template>) -> Self {
        Self { x, y, room }
    }
}

/// The level in progress: a `tiles_x × tiles_y` grid of slots.
pub struct GridContext<'a> {
    model: &'a Model,
    tiles_x: usize,
    tiles_y: usize,
    slots: Vec<Option<Arc<Template>>>,
    rng: &'a mut StdRng,
}

impl<'a> GridContext<'a> {
    pub(crate) fn new(model: &'a Model, tiles_x: usize, tiles_y: usize, rng: &'a mut StdRng) -> Self {
        Self {
            model,
            tiles_x,
            tiles_y,
            slots: vec![None; tiles_x * tiles_y],
            rng,
        }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> usize {
        self.tiles_y
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.tiles_x && y < self.tiles_y
    }

    /// The template placed at a slot, if any.
    pub fn get(&self, x: usize, y: usize) -> Option<&Arc<Template>> {
        if self.in_bounds(x, y) {
            self.slots[y * self.tiles_x + x].as_ref()
        } else {
            None
        }
    }

    pub fn is_placed(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// First template in the model matching the predicate.
    pub fn find_template(&self, pred: impl Fn(&Template) -> bool) -> Result<Arc<Template>> {
        self.model.find_by_prop(pred)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Arc<Template>> {
        self.model.find_by_name(name)
    }

    /// Requirements implied by placed neighbours and the map boundary.
    pub fn requirements_at(&self, x: usize, y: usize) -> ExitRequirements {
        let mut reqs = ExitRequirements::free();
        for dir in Direction::ALL {
            match dir.step(x, y, self.tiles_x, self.tiles_y) {
                None => reqs = reqs.with_boundary(dir),
                Some((nx, ny)) => {
                    if let Some(neighbour) = self.get(nx, ny) {
                        let req = if neighbour.exits().has(dir.opposite()) {
                            Requirement::Open
                        } else {
                            Requirement::Closed
                        };
                        reqs.set(dir, req);
                    }
                }
            }
        }
        reqs
    }

    /// Randomly chosen, non-fixed template meeting the requirements.
    ///
    /// `noedge` templates are skipped for slots on the map boundary. The
    /// choice is weighted by each template's `weight`.
    pub fn choose_matching(&mut self, reqs: &ExitRequirements) -> Option<Arc<Template>> {
        let on_boundary = reqs.is_on_boundary();
        let candidates = self.model.filter(|t| {
            !t.flags().fixed
                && reqs.is_satisfied_by(t.exits())
                && !(on_boundary && t.flags().no_edge)
        });
        self.choose_weighted(&candidates)
    }

    /// Weighted random pick from a candidate list.
    pub fn choose_weighted(&mut self, candidates: &[Arc<Template>]) -> Option<Arc<Template>> {
        candidates
            .choose_weighted(&mut *self.rng, |t| t.flags().weight)
            .ok()
            .cloned()
    }

    /// Place a room, checking bounds, occupancy and neighbour edges.
    ///
    /// Only placed neighbours are checked, so start rooms may open past the
    /// map boundary.
    pub fn add_room(&mut self, placement: RoomPlacement) -> Result<()> {
        let RoomPlacement { x, y, room } = placement;
        let reqs = self.requirements_at(x, y);
        let fail = |message: String| TileError::Generation {
            x,
            y,
            requirements: reqs.to_string(),
            message,
        };

        if !self.in_bounds(x, y) {
            return Err(fail(format!(
                "'{}' lies outside the {}x{} grid",
                room.name(),
                self.tiles_x,
                self.tiles_y
            )));
        }
        if let Some(existing) = self.get(x, y) {
            return Err(fail(format!(
                "cannot place '{}', slot already holds '{}'",
                room.name(),
                existing.name()
            )));
        }
        if room.size() != self.model.tile_size() {
            return Err(fail(format!(
                "'{}' is {}x{}, model '{}' uses {}x{} tiles",
                room.name(),
                room.width(),
                room.height(),
                self.model.name(),
                self.model.tile_size().0,
                self.model.tile_size().1
            )));
        }
        for dir in Direction::ALL {
            let clash = match reqs.get(dir) {
                Requirement::Open => !room.exits().has(dir),
                Requirement::Closed => room.exits().has(dir) && !reqs.boundary().has(dir),
                Requirement::Free => false,
            };
            if clash {
                return Err(fail(format!(
                    "'{}' [{}] does not match its neighbour to the {}",
                    room.name(),
                    room.exits(),
                    dir
                )));
            }
        }

        trace!("slot ({}, {}) <- {}", x, y, room.name());
        let tiles_x = self.tiles_x;
        self.slots[y * tiles_x + x] = Some(room);
        Ok(())
    }

    pub(crate) fn into_slots(self) -> Vec<Option<Arc<Template>>> {
        self.slots
    }
}
