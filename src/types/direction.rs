//! Compass directions and exit sets.
//!
//! A tile's exit set records which of its four edges carry a passable
//! opening. Transforming a tile permutes its exit set the same way the
//! character grid is permuted.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

/// One of the four tile edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    /// All directions in `dir` header order.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// Parse a direction letter (`N`, `S`, `E`, `W`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::N),
            'S' => Some(Direction::S),
            'E' => Some(Direction::E),
            'W' => Some(Direction::W),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::N => 'N',
            Direction::S => 'S',
            Direction::E => 'E',
            Direction::W => 'W',
        }
    }

    /// The direction facing back across a shared edge.
    pub fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
        }
    }

    /// Direction after a clockwise quarter turn (N→E→S→W→N).
    pub fn rotated_cw(self) -> Self {
        match self {
            Direction::N => Direction::E,
            Direction::E => Direction::S,
            Direction::S => Direction::W,
            Direction::W => Direction::N,
        }
    }

    /// Direction after mirroring around the vertical axis (E↔W).
    pub fn mirrored_vertical(self) -> Self {
        match self {
            Direction::E => Direction::W,
            Direction::W => Direction::E,
            other => other,
        }
    }

    /// Direction after mirroring around the horizontal axis (N↔S).
    pub fn mirrored_horizontal(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            other => other,
        }
    }

    /// Grid step `(dx, dy)` toward this direction. North is `-y`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (0, -1),
            Direction::S => (0, 1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
        }
    }

    /// The neighbouring grid coordinate, if it stays inside `width × height`.
    pub fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
            None
        } else {
            Some((nx as usize, ny as usize))
        }
    }

    /// Single-direction exit set.
    pub fn exit(self) -> Exits {
        match self {
            Direction::N => Exits::N,
            Direction::S => Exits::S,
            Direction::E => Exits::E,
            Direction::W => Exits::W,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

bitflags! {
    /// Set of edges with a passable opening.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Exits: u8 {
        const N = 0b0001;
        const S = 0b0010;
        const E = 0b0100;
        const W = 0b1000;
    }
}

impl Exits {
    /// Parse a `dir` header value such as `NSEW` or `EW`.
    ///
    /// Order does not matter and repeated letters are tolerated. Any letter
    /// outside N/S/E/W is a parse error.
    pub fn parse(s: &str) -> Result<Self> {
        let mut exits = Exits::empty();
        for c in s.trim().chars() {
            let dir = Direction::from_char(c).ok_or_else(|| TileError::Parse {
                message: format!("Unknown direction '{}' in dir '{}'", c, s.trim()),
                help: Some("dir may only contain the letters N, S, E and W".to_string()),
            })?;
            exits |= dir.exit();
        }
        Ok(exits)
    }

    pub fn has(self, dir: Direction) -> bool {
        self.contains(dir.exit())
    }

    /// Iterate over the contained directions in N, S, E, W order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }

    pub fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    pub fn rotated_cw(self) -> Self {
        self.map_dirs(Direction::rotated_cw)
    }

    pub fn mirrored_vertical(self) -> Self {
        self.map_dirs(Direction::mirrored_vertical)
    }

    pub fn mirrored_horizontal(self) -> Self {
        self.map_dirs(Direction::mirrored_horizontal)
    }

    fn map_dirs(self, f: impl Fn(Direction) -> Direction) -> Self {
        self.directions()
            .fold(Exits::empty(), |acc, d| acc | f(d).exit())
    }
}

impl fmt::Display for Exits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for dir in self.directions() {
            write!(f, "{}", dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dir() {
        assert_eq!(Exits::parse("NSEW").unwrap(), Exits::all());
        assert_eq!(Exits::parse("WE").unwrap(), Exits::E | Exits::W);
        assert_eq!(Exits::parse("").unwrap(), Exits::empty());
        assert_eq!(Exits::parse("NN").unwrap(), Exits::N);
    }

    #[test]
    fn test_parse_dir_rejects_unknown_letter() {
        let err = Exits::parse("NQ").unwrap_err();
        assert!(err.to_string().contains("Unknown direction 'Q'"));
    }

    #[test]
    fn test_rotation_cycle() {
        let exits = Exits::N | Exits::E;
        assert_eq!(exits.rotated_cw(), Exits::E | Exits::S);
        assert_eq!(exits.rotated_cw().rotated_cw(), Exits::S | Exits::W);
        assert_eq!(
            exits.rotated_cw().rotated_cw().rotated_cw().rotated_cw(),
            exits
        );
    }

    #[test]
    fn test_mirrors() {
        let exits = Exits::N | Exits::E;
        assert_eq!(exits.mirrored_vertical(), Exits::N | Exits::W);
        assert_eq!(exits.mirrored_horizontal(), Exits::S | Exits::E);
    }

    #[test]
    fn test_display() {
        assert_eq!((Exits::W | Exits::N).to_string(), "NW");
        assert_eq!(Exits::empty().to_string(), "-");
    }

    #[test]
    fn test_step_clips_to_grid() {
        assert_eq!(Direction::N.step(0, 0, 3, 3), None);
        assert_eq!(Direction::S.step(0, 0, 3, 3), Some((0, 1)));
        assert_eq!(Direction::E.step(2, 1, 3, 3), None);
        assert_eq!(Direction::W.step(2, 1, 3, 3), Some((1, 1)));
    }

    #[test]
    fn test_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }
}
