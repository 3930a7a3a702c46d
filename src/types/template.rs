//! Template type for placeable tiles.
//!
//! A template is the parsed, immutable form of one tile definition: a
//! fixed-size character grid, the set of edges with an opening, typed flags
//! and free-form properties. Rotating or mirroring a template allocates a new
//! one with its grid and exits permuted consistently.
//!
//! # Example
//!
//! ```text
//! name:corridor_t
//! dir:EWS
//! X=#
//!
//! XXXXXXX
//! XXXXXXX
//! XXXXXXX
//! .......
//! XXX.XXX
//! XXX.XXX
//! XXX.XXX
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TileError};

use super::direction::{Direction, Exits};
use super::elem::is_blocking_glyph;

/// Orientation of a template relative to its authored form.
///
/// Stored as `rotate^quarter_turns ∘ mirror^mirrored`: the vertical mirror is
/// applied first, then the clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    pub quarter_turns: u8,
    pub mirrored: bool,
}

impl Orientation {
    pub fn is_identity(self) -> bool {
        self.quarter_turns == 0 && !self.mirrored
    }

    fn rotate90(self) -> Self {
        Self {
            quarter_turns: (self.quarter_turns + 1) % 4,
            mirrored: self.mirrored,
        }
    }

    // M ∘ R^q = R^-q ∘ M
    fn mirror_vertical(self) -> Self {
        Self {
            quarter_turns: (4 - self.quarter_turns) % 4,
            mirrored: !self.mirrored,
        }
    }

    // Horizontal mirror is R^2 ∘ M
    fn mirror_horizontal(self) -> Self {
        Self {
            quarter_turns: (6 - self.quarter_turns) % 4,
            mirrored: !self.mirrored,
        }
    }

    /// Name suffix marking this orientation, e.g. `_m_r90`.
    pub fn suffix(self) -> String {
        let mut suffix = String::new();
        if self.mirrored {
            suffix.push_str("_m");
        }
        if self.quarter_turns > 0 {
            suffix.push_str(&format!("_r{}", self.quarter_turns as u32 * 90));
        }
        suffix
    }
}

/// Anchor for multi-cell start rooms (`startX` / `startY` header keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// First slot of the axis (0).
    First,
    /// Last slot of the axis.
    Max,
    /// An explicit slot index.
    At(usize),
}

impl Anchor {
    /// Resolve against an axis of `count` slots.
    pub fn resolve(self, count: usize) -> usize {
        match self {
            Anchor::First => 0,
            Anchor::Max => count.saturating_sub(1),
            Anchor::At(i) => i.min(count.saturating_sub(1)),
        }
    }

    fn flipped(self) -> Self {
        match self {
            Anchor::First => Anchor::Max,
            Anchor::Max => Anchor::First,
            at => at,
        }
    }
}

impl FromStr for Anchor {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "first" => Ok(Anchor::First),
            "max" => Ok(Anchor::Max),
            other => other.parse::<usize>().map(Anchor::At).map_err(|_| TileError::Parse {
                message: format!("Invalid start anchor '{}'", other),
                help: Some("Use first, max or a slot index".to_string()),
            }),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::First => write!(f, "first"),
            Anchor::Max => write!(f, "max"),
            Anchor::At(i) => write!(f, "{}", i),
        }
    }
}

/// Typed tile flags parsed from the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFlags {
    /// Tile may only be used away from the level boundary.
    pub no_edge: bool,
    /// Tile is never expanded into rotated/mirrored variants.
    pub no_rotate: bool,
    /// Tile is only placed by name, never chosen at random.
    pub fixed: bool,
    pub start_x: Option<Anchor>,
    pub start_y: Option<Anchor>,
    /// Relative selection weight among matching candidates.
    pub weight: u32,
}

impl Default for TileFlags {
    fn default() -> Self {
        Self {
            no_edge: false,
            no_rotate: false,
            fixed: false,
            start_x: None,
            start_y: None,
            weight: 1,
        }
    }
}

/// A parsed tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    base_name: String,
    orientation: Orientation,
    /// Character grid (row-major: grid[y][x]).
    grid: Vec<Vec<char>>,
    exits: Exits,
    flags: TileFlags,
    props: BTreeMap<String, String>,
}

impl Template {
    /// Create a template, checking its shape against its declared exits.
    pub fn new(
        name: impl Into<String>,
        grid: Vec<Vec<char>>,
        exits: Exits,
        flags: TileFlags,
    ) -> Result<Self> {
        let template = Self {
            base_name: name.into(),
            orientation: Orientation::default(),
            grid,
            exits,
            flags,
            props: BTreeMap::new(),
        };
        template.check()?;
        Ok(template)
    }

    /// Parse a single tile definition.
    pub fn parse(spec: &str) -> Result<Self> {
        crate::parser::parse_tile(spec)
    }

    pub(crate) fn with_props(mut self, props: BTreeMap<String, String>) -> Self {
        self.props = props;
        self
    }

    fn check(&self) -> Result<()> {
        let name = &self.base_name;
        if name.is_empty() {
            return Err(TileError::parse("Tile has an empty name"));
        }
        if self.grid.is_empty() || self.width() == 0 {
            return Err(TileError::Parse {
                message: format!("Tile '{}' has an empty body", name),
                help: Some("Add the character block after a blank line".to_string()),
            });
        }
        let width = self.width();
        if let Some((row, r)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width)
        {
            return Err(TileError::Parse {
                message: format!(
                    "Tile '{}': row {} is {} wide, expected {}",
                    name,
                    row + 1,
                    r.len(),
                    width
                ),
                help: Some("All body rows must have the same width".to_string()),
            });
        }
        if width % 2 == 0 || self.height() % 2 == 0 {
            return Err(TileError::Parse {
                message: format!(
                    "Tile '{}' is {}x{}; tile dimensions must be odd",
                    name,
                    width,
                    self.height()
                ),
                help: Some("Exits sit on edge midpoints, which need an odd edge length".to_string()),
            });
        }
        for dir in Direction::ALL {
            let declared = self.exits.has(dir);
            let open = self.edge_is_open(dir);
            if declared != open {
                let message = if declared {
                    format!(
                        "Tile '{}' declares exit {} but its {} edge midpoint is solid",
                        name, dir, dir
                    )
                } else {
                    format!(
                        "Tile '{}' does not declare exit {} but its {} edge midpoint is open",
                        name, dir, dir
                    )
                };
                return Err(TileError::Parse {
                    message,
                    help: Some(format!("dir is '{}'", self.exits)),
                });
            }
        }
        Ok(())
    }

    /// Display name: base name plus orientation suffix.
    pub fn name(&self) -> String {
        format!("{}{}", self.base_name, self.orientation.suffix())
    }

    /// Name as authored, without the orientation suffix.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn exits(&self) -> Exits {
        self.exits
    }

    pub fn flags(&self) -> &TileFlags {
        &self.flags
    }

    /// Whether this template must not be expanded into variants.
    pub fn is_single_orientation(&self) -> bool {
        self.flags.no_rotate || self.flags.fixed
    }

    pub fn width(&self) -> usize {
        self.grid.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.grid.len()
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Get a character at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Get a reference to the grid.
    pub fn grid(&self) -> &[Vec<char>] {
        &self.grid
    }

    /// Render the grid as newline-separated rows (no trailing newline).
    pub fn render(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Cell on the midpoint of the given edge.
    pub fn edge_midpoint(&self, dir: Direction) -> Option<char> {
        let (w, h) = self.size();
        match dir {
            Direction::N => self.get(w / 2, 0),
            Direction::S => self.get(w / 2, h.saturating_sub(1)),
            Direction::E => self.get(w.saturating_sub(1), h / 2),
            Direction::W => self.get(0, h / 2),
        }
    }

    /// Whether the midpoint of the given edge is passable.
    pub fn edge_is_open(&self, dir: Direction) -> bool {
        self.edge_midpoint(dir).is_some_and(|c| !is_blocking_glyph(c))
    }

    /// Same grid and exits, regardless of name or orientation.
    pub fn same_shape(&self, other: &Template) -> bool {
        self.exits == other.exits && self.grid == other.grid
    }

    /// Rotate 90° clockwise.
    pub fn rotate90(&self) -> Self {
        let (w, h) = self.size();
        let grid = (0..w)
            .map(|y| (0..h).map(|x| self.grid[h - 1 - x][y]).collect())
            .collect();
        let mut flags = self.flags.clone();
        flags.start_x = self.flags.start_y.map(Anchor::flipped);
        flags.start_y = self.flags.start_x;
        Self {
            base_name: self.base_name.clone(),
            orientation: self.orientation.rotate90(),
            grid,
            exits: self.exits.rotated_cw(),
            flags,
            props: self.props.clone(),
        }
    }

    /// Rotate clockwise by the given number of quarter turns.
    pub fn rotate(&self, quarter_turns: u8) -> Self {
        (0..quarter_turns % 4).fold(self.clone(), |t, _| t.rotate90())
    }

    /// Mirror around the vertical axis (swaps E and W).
    pub fn mirror_vertical(&self) -> Self {
        let grid = self
            .grid
            .iter()
            .map(|row| row.iter().rev().copied().collect())
            .collect();
        let mut flags = self.flags.clone();
        flags.start_x = self.flags.start_x.map(Anchor::flipped);
        Self {
            base_name: self.base_name.clone(),
            orientation: self.orientation.mirror_vertical(),
            grid,
            exits: self.exits.mirrored_vertical(),
            flags,
            props: self.props.clone(),
        }
    }

    /// Mirror around the horizontal axis (swaps N and S).
    pub fn mirror_horizontal(&self) -> Self {
        let grid = self.grid.iter().rev().cloned().collect();
        let mut flags = self.flags.clone();
        flags.start_y = self.flags.start_y.map(Anchor::flipped);
        Self {
            base_name: self.base_name.clone(),
            orientation: self.orientation.mirror_horizontal(),
            grid,
            exits: self.exits.mirrored_horizontal(),
            flags,
            props: self.props.clone(),
        }
    }

    /// Get a property by header key.
    ///
    /// Typed keys (`name`, `dir`, `noedge`, `norotate`, `fixed`, `startX`,
    /// `startY`, `weight`) are read from their fields; anything else comes
    /// from the free-form properties.
    pub fn get_prop(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name()),
            "dir" => Some(self.exits.directions().map(Direction::to_char).collect()),
            "noedge" => Some(self.flags.no_edge.to_string()),
            "norotate" => Some(self.flags.no_rotate.to_string()),
            "fixed" => Some(self.flags.fixed.to_string()),
            "startX" => self.flags.start_x.map(|a| a.to_string()),
            "startY" => self.flags.start_y.map(|a| a.to_string()),
            "weight" => Some(self.flags.weight.to_string()),
            other => self.props.get(other).cloned(),
        }
    }

    /// Return a copy with the given property set.
    ///
    /// Setting `dir` re-checks the exits against the grid.
    pub fn set_prop(&self, key: &str, value: &str) -> Result<Self> {
        let mut next = self.clone();
        match key {
            "name" => {
                next.base_name = value.trim().to_string();
                next.orientation = Orientation::default();
            }
            "dir" => next.exits = Exits::parse(value)?,
            "noedge" => next.flags.no_edge = parse_flag(key, value)?,
            "norotate" => next.flags.no_rotate = parse_flag(key, value)?,
            "fixed" => next.flags.fixed = parse_flag(key, value)?,
            "startX" => next.flags.start_x = Some(value.parse()?),
            "startY" => next.flags.start_y = Some(value.parse()?),
            "weight" => next.flags.weight = parse_weight(value)?,
            other => {
                next.props.insert(other.to_string(), value.to_string());
            }
        }
        next.check()?;
        Ok(next)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.exits)
    }
}

/// Parse a boolean flag value. A bare flag (empty value) means `true`.
pub(crate) fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(TileError::Parse {
            message: format!("Invalid value '{}' for flag '{}'", other, key),
            help: Some("Use true or false, or write the flag on its own".to_string()),
        }),
    }
}

pub(crate) fn parse_weight(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(TileError::Parse {
            message: format!("Invalid weight '{}'", value.trim()),
            help: Some("weight must be a positive integer".to_string()),
        }),
    }
}
