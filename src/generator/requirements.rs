//! Per-direction exit requirements of an empty slot.

use std::fmt;

use crate::types::{Direction, Exits};

/// What a slot's edge must look like in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Requirement {
    /// A placed neighbour opens toward this slot.
    Open,
    /// A placed neighbour is solid there, or the edge is the map boundary.
    Closed,
    /// No neighbour placed yet.
    #[default]
    Free,
}

/// Requirements on all four edges of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExitRequirements {
    sides: [Requirement; 4],
    boundary: Exits,
}

fn index(dir: Direction) -> usize {
    match dir {
        Direction::N => 0,
        Direction::S => 1,
        Direction::E => 2,
        Direction::W => 3,
    }
}

impl ExitRequirements {
    /// All sides free.
    pub fn free() -> Self {
        Self::default()
    }

    pub fn get(&self, dir: Direction) -> Requirement {
        self.sides[index(dir)]
    }

    pub fn set(&mut self, dir: Direction, req: Requirement) {
        self.sides[index(dir)] = req;
    }

    /// Builder-style `set`.
    pub fn with(mut self, dir: Direction, req: Requirement) -> Self {
        self.set(dir, req);
        self
    }

    /// Mark a side as the map boundary. Boundary sides are closed.
    pub fn with_boundary(mut self, dir: Direction) -> Self {
        self.boundary |= dir.exit();
        self.set(dir, Requirement::Closed);
        self
    }

    /// Directions where an exit is required.
    pub fn required(&self) -> Exits {
        self.matching(Requirement::Open)
    }

    /// Directions where an exit is forbidden.
    pub fn forbidden(&self) -> Exits {
        self.matching(Requirement::Closed)
    }

    /// Directions not yet determined.
    pub fn free_sides(&self) -> Exits {
        self.matching(Requirement::Free)
    }

    /// Sides lying on the map boundary.
    pub fn boundary(&self) -> Exits {
        self.boundary
    }

    pub fn is_on_boundary(&self) -> bool {
        !self.boundary.is_empty()
    }

    /// Whether an exit set meets every determined side.
    pub fn is_satisfied_by(&self, exits: Exits) -> bool {
        exits.contains(self.required()) && (exits & self.forbidden()).is_empty()
    }

    fn matching(&self, req: Requirement) -> Exits {
        Direction::ALL
            .into_iter()
            .filter(|d| self.get(*d) == req)
            .fold(Exits::empty(), |acc, d| acc | d.exit())
    }
}

impl fmt::Display for ExitRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "open:{} closed:{}", self.required(), self.forbidden())
    }
}
