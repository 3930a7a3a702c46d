//! Base terrain elements.
//!
//! Maps are stored as characters. `BaseElem` names the fixed glyph
//! vocabulary shared by tiles, composition utilities and population:
//! - `#` = wall
//! - `.` = floor
//! - `+` = door
//! - `~` = water
//! - `,` = grass
//! - `T` = tree
//! - `=` = bridge
//! - `:` = rubble
//! - `^` = rock
//!
//! Any other glyph is a marker; markers are walkable and never block an exit.

use std::fmt;

/// A base terrain element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseElem {
    Wall,
    Floor,
    Door,
    Water,
    Grass,
    Tree,
    Bridge,
    Rubble,
    Rock,
    /// Any glyph outside the fixed vocabulary.
    Marker(char),
}

impl BaseElem {
    /// Classify a glyph. Never fails; unknown glyphs become markers.
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => BaseElem::Wall,
            '.' => BaseElem::Floor,
            '+' => BaseElem::Door,
            '~' => BaseElem::Water,
            ',' => BaseElem::Grass,
            'T' => BaseElem::Tree,
            '=' => BaseElem::Bridge,
            ':' => BaseElem::Rubble,
            '^' => BaseElem::Rock,
            other => BaseElem::Marker(other),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            BaseElem::Wall => '#',
            BaseElem::Floor => '.',
            BaseElem::Door => '+',
            BaseElem::Water => '~',
            BaseElem::Grass => ',',
            BaseElem::Tree => 'T',
            BaseElem::Bridge => '=',
            BaseElem::Rubble => ':',
            BaseElem::Rock => '^',
            BaseElem::Marker(c) => c,
        }
    }

    /// Whether this element closes a tile edge.
    pub fn is_blocking(self) -> bool {
        matches!(self, BaseElem::Wall | BaseElem::Rock)
    }

    /// Whether actors and items may be placed on this element.
    pub fn is_walkable(self) -> bool {
        !matches!(
            self,
            BaseElem::Wall | BaseElem::Rock | BaseElem::Water | BaseElem::Tree
        )
    }

    /// Whether a new actor or item may start here. Doors and marked
    /// features (stairs, sarcophagi) are walkable but stay clear.
    pub fn is_spawnable(self) -> bool {
        self.is_walkable() && !matches!(self, BaseElem::Door | BaseElem::Marker(_))
    }
}

impl fmt::Display for BaseElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Whether a raw glyph closes a tile edge.
pub fn is_blocking_glyph(c: char) -> bool {
    BaseElem::from_char(c).is_blocking()
}
