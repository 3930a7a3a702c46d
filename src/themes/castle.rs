//! Castle theme: walled grid of corridors and rooms.
//!
//! The castle border is a ring of fixed corner towers and edge corridors.
//! The interior grows breadth-first from the gates through open exits;
//! interior slots no passage reaches are walled up solid. Gates are placed
//! by the start functions.

use std::sync::{Arc, LazyLock};

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::generator::{
    generate, ExitRequirements, FillOrder, GenerateConf, GridContext, Requirement, RoomPlacement,
    TileGrid,
};
use crate::registry::{Model, ModelBuilder};
use crate::types::{Direction, Exits, Template};

use super::builtin;

/// Corridor pieces and the solid filler, shared with the crypt.
pub(crate) const CORRIDOR_TILES: &str = r#"
name:corridor
dir:EW
X=#

XXXXXXX
XXXXXXX
XXXXXXX
.......
XXXXXXX
XXXXXXX
XXXXXXX
---
name:corridor_t
dir:EWS
X=#

XXXXXXX
XXXXXXX
XXXXXXX
.......
XXX.XXX
XXX.XXX
XXX.XXX
---
name:corridor_cross
dir:NSEW
X=#

XXX.XXX
XXX.XXX
XXX.XXX
.......
XXX.XXX
XXX.XXX
XXX.XXX
---
name:corridor_bend
dir:SE
X=#

XXXXXXX
XXXXXXX
XXXXXXX
XXX....
XXX.XXX
XXX.XXX
XXX.XXX
---
name:corridor_end
dir:N
X=#

XXX.XXX
XXX.XXX
XXX.XXX
XXX.XXX
XXXXXXX
XXXXXXX
XXXXXXX
---
name:solid
X=#

XXXXXXX
XXXXXXX
XXXXXXX
XXXXXXX
XXXXXXX
XXXXXXX
XXXXXXX
"#;

const ROOM_TILES: &str = r#"
name:room_dead_end
dir:N
X=#

XXX+XXX
X.....X
X.....X
X.....X
X.....X
X.....X
XXXXXXX
---
name:room_hall
dir:NS
X=#

XXX+XXX
X.....X
X.....X
X.....X
X.....X
X.....X
XXX+XXX
---
name:room_corner
dir:SE
X=#

XXXXXXX
X.....X
X.....X
X.....+
X.....X
X.....X
XXX+XXX
---
name:room_t
dir:EWS
X=#

XXXXXXX
X.....X
X.....X
+.....+
X.....X
X.....X
XXX+XXX
---
name:room_cross
dir:NSEW
noedge
X=#

XXX+XXX
X.....X
X.....X
+.....+
X.....X
X.....X
XXX+XXX
"#;

const FIXED_TILES: &str = r#"
name:corner_nw
dir:SE
fixed
X=#

XXXXXXX
XXXXXXX
XX...XX
XX.....
XX...XX
XXX.XXX
XXX.XXX
---
name:corner_ne
dir:SW
fixed
X=#

XXXXXXX
XXXXXXX
XX...XX
.....XX
XX...XX
XXX.XXX
XXX.XXX
---
name:corner_sw
dir:NE
fixed
X=#

XXX.XXX
XXX.XXX
XX...XX
XX.....
XX...XX
XXXXXXX
XXXXXXX
---
name:corner_se
dir:NW
fixed
X=#

XXX.XXX
XXX.XXX
XX...XX
.....XX
XX...XX
XXXXXXX
XXXXXXX
---
name:corner_gate_nw
dir:SEW
fixed
X=#

XXXXXXX
XXXXXXX
XX...XX
+......
XX...XX
XXX.XXX
XXX.XXX
---
name:entrance_n
dir:NSEW
fixed
X=#

XXX+XXX
XX...XX
XX...XX
.......
XX...XX
XX...XX
XXX.XXX
---
name:entrance_s
dir:NSEW
fixed
X=#

XXX.XXX
XX...XX
XX...XX
.......
XX...XX
XX...XX
XXX+XXX
---
name:entrance_e
dir:NSEW
fixed
X=#

XXX.XXX
XX...XX
XX...XX
......+
XX...XX
XX...XX
XXX.XXX
---
name:entrance_w
dir:NSEW
fixed
X=#

XXX.XXX
XX...XX
XX...XX
+......
XX...XX
XX...XX
XXX.XXX
"#;

static CASTLE: LazyLock<Result<Model>> = LazyLock::new(|| {
    ModelBuilder::new("castle")
        .add_file_source(CORRIDOR_TILES)
        .add_file_source(ROOM_TILES)
        .add_file_source(FIXED_TILES)
        .build()
});

/// The built-in castle model (7×7 tiles).
pub fn castle_model() -> Result<&'static Model> {
    builtin(&CASTLE)
}

/// Where the castle's formal start room goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StartSide {
    North,
    #[default]
    South,
    East,
    West,
    /// Gate in the north-west corner tower.
    Corner,
    /// Gates on all four sides; the south gate is the formal start.
    FourGates,
    /// Gates west and east; the east gate is the formal start.
    Through,
}

/// Options for castle generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastleConf {
    /// Chance that an edge corridor branches inward where nothing forces it.
    pub corridor_door_thr: f64,
    pub start: StartSide,
    /// Force a corridor cross through the middle row and column.
    pub cross: bool,
}

impl Default for CastleConf {
    fn default() -> Self {
        Self {
            corridor_door_thr: 0.2,
            start: StartSide::default(),
            cross: false,
        }
    }
}

/// Generate a castle grid of `tiles_x × tiles_y` tiles.
///
/// Slots are filled outward from the placed gates, so every room with an
/// exit is connected to the start room.
pub fn generate_castle(
    tiles_x: usize,
    tiles_y: usize,
    conf: &CastleConf,
    rng: &mut StdRng,
) -> Result<TileGrid> {
    let model = castle_model()?;
    let gen_conf = GenerateConf::new(tiles_x, tiles_y).with_fill_order(FillOrder::Frontier);
    let start = start_func(conf.start);
    if conf.cross {
        generate(model, &gen_conf, rng, start, constraint_func_cross(*conf))
    } else {
        generate(model, &gen_conf, rng, start, constraint_func(*conf))
    }
}

fn require_castle_size(ctx: &GridContext) -> Result<()> {
    if ctx.tiles_x() < 3 || ctx.tiles_y() < 3 {
        return Err(TileError::Config {
            message: format!(
                "A castle needs at least 3x3 tiles, got {}x{}",
                ctx.tiles_x(),
                ctx.tiles_y()
            ),
            help: None,
        });
    }
    Ok(())
}

fn gate(ctx: &GridContext, dir: Direction) -> Result<RoomPlacement> {
    let (tx, ty) = (ctx.tiles_x(), ctx.tiles_y());
    let (name, x, y) = match dir {
        Direction::N => ("entrance_n", tx / 2, 0),
        Direction::S => ("entrance_s", tx / 2, ty - 1),
        Direction::E => ("entrance_e", tx - 1, ty / 2),
        Direction::W => ("entrance_w", 0, ty / 2),
    };
    Ok(RoomPlacement::new(x, y, ctx.find_by_name(name)?))
}

/// Start-room function placing the gate(s) for `side`.
pub fn start_func(side: StartSide) -> impl FnOnce(&mut GridContext) -> Result<RoomPlacement> {
    move |ctx: &mut GridContext| {
        require_castle_size(ctx)?;
        match side {
            StartSide::North => gate(ctx, Direction::N),
            StartSide::South => gate(ctx, Direction::S),
            StartSide::East => gate(ctx, Direction::E),
            StartSide::West => gate(ctx, Direction::W),
            StartSide::Corner => Ok(RoomPlacement::new(0, 0, ctx.find_by_name("corner_gate_nw")?)),
            StartSide::FourGates => {
                for dir in [Direction::N, Direction::E, Direction::W] {
                    let placement = gate(ctx, dir)?;
                    ctx.add_room(placement)?;
                }
                gate(ctx, Direction::S)
            }
            StartSide::Through => {
                let west = gate(ctx, Direction::W)?;
                ctx.add_room(west)?;
                gate(ctx, Direction::E)
            }
        }
    }
}

/// Name of the corner piece for a slot, if the slot is a corner.
pub fn corner_name(x: usize, y: usize, tiles_x: usize, tiles_y: usize) -> Option<&'static str> {
    let (east, south) = (x + 1 == tiles_x, y + 1 == tiles_y);
    match (x, y) {
        (0, 0) => Some("corner_nw"),
        (_, 0) if east => Some("corner_ne"),
        (0, _) if south => Some("corner_sw"),
        _ if east && south => Some("corner_se"),
        _ => None,
    }
}

/// Pick a piece with exactly `exits`, preferring corridor pieces.
fn pick_exact(ctx: &mut GridContext, exits: Exits) -> Option<Arc<Template>> {
    let all = ctx.model().with_exits(exits);
    let corridors: Vec<Arc<Template>> = all
        .iter()
        .filter(|t| t.base_name().starts_with("corridor"))
        .cloned()
        .collect();
    if corridors.is_empty() {
        ctx.choose_weighted(&all)
    } else {
        ctx.choose_weighted(&corridors)
    }
}

/// Exits for a border (non-corner) slot.
///
/// The outward side is closed and both sides parallel to the border are
/// open. The inward side follows its requirement; when still free it opens
/// with probability `thr`, or always when `force_inward` is set.
fn edge_exits(
    ctx: &mut GridContext,
    reqs: &ExitRequirements,
    outward: Direction,
    thr: f64,
    force_inward: bool,
) -> Exits {
    let inward = outward.opposite();
    let mut exits = Exits::all() - outward.exit() - inward.exit();
    let open_inward = match reqs.get(inward) {
        Requirement::Open => true,
        Requirement::Closed => false,
        Requirement::Free => force_inward || ctx.rng().gen_bool(thr.clamp(0.0, 1.0)),
    };
    if open_inward {
        exits |= inward.exit();
    }
    exits
}

fn border_piece(
    ctx: &mut GridContext,
    x: usize,
    y: usize,
    reqs: &ExitRequirements,
    thr: f64,
    force_inward: bool,
) -> Result<Option<Arc<Template>>> {
    if let Some(name) = corner_name(x, y, ctx.tiles_x(), ctx.tiles_y()) {
        return ctx.find_by_name(name).map(Some);
    }
    let outward = match reqs.boundary().directions().next() {
        Some(dir) => dir,
        None => return Ok(None),
    };
    let exits = edge_exits(ctx, reqs, outward, thr, force_inward);
    Ok(pick_exact(ctx, exits))
}

/// Interior piece: a random match for a reached slot, `solid` otherwise.
///
/// Under frontier order a slot with no open requirement was not reached
/// through any exit.
fn interior_piece(ctx: &mut GridContext, reqs: &ExitRequirements) -> Result<Option<Arc<Template>>> {
    if reqs.required().is_empty() {
        return ctx.find_by_name("solid").map(Some);
    }
    Ok(ctx.choose_matching(reqs))
}

/// The standard castle constraint.
///
/// Corners get their fixed tower, border slots run corridors parallel to
/// the wall and reached interior slots pick any matching piece at random.
pub fn constraint_func(
    conf: CastleConf,
) -> impl FnMut(&mut GridContext, usize, usize, &ExitRequirements) -> Result<Option<Arc<Template>>> {
    move |ctx: &mut GridContext, x: usize, y: usize, reqs: &ExitRequirements| {
        if reqs.is_on_boundary() {
            border_piece(ctx, x, y, reqs, conf.corridor_door_thr, false)
        } else {
            interior_piece(ctx, reqs)
        }
    }
}

/// Castle constraint with a corridor cross through the middle.
///
/// Slots on the middle row open east and west, slots on the middle column
/// open north and south, but only on sides that are not already closed by
/// a placed neighbour. Other free sides stay closed.
pub fn constraint_func_cross(
    conf: CastleConf,
) -> impl FnMut(&mut GridContext, usize, usize, &ExitRequirements) -> Result<Option<Arc<Template>>> {
    move |ctx: &mut GridContext, x: usize, y: usize, reqs: &ExitRequirements| {
        let (mid_x, mid_y) = (ctx.tiles_x() / 2, ctx.tiles_y() / 2);
        if reqs.is_on_boundary() {
            let on_axis = x == mid_x || y == mid_y;
            return border_piece(ctx, x, y, reqs, conf.corridor_door_thr, on_axis);
        }
        if x != mid_x && y != mid_y {
            return interior_piece(ctx, reqs);
        }

        let mut forced = Exits::empty();
        if y == mid_y {
            forced |= Exits::E | Exits::W;
        }
        if x == mid_x {
            forced |= Exits::N | Exits::S;
        }
        let exits = reqs.required() | (forced & !reqs.forbidden());
        Ok(pick_exact(ctx, exits))
    }
}
