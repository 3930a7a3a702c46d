//! Houses theme: small buildings of 5×5 rooms.
//!
//! Each tile is a room with a 5×5 interior inside a one-cell wall. The start
//! room carries the front door on the south wall; the other rooms connect
//! through inner doors. Rooms no door reaches become closets.

use std::sync::{Arc, LazyLock};

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;
use crate::generator::{
    generate, ExitRequirements, FillOrder, GenerateConf, GridContext, Requirement, RoomPlacement,
    TileGrid,
};
use crate::registry::{Model, ModelBuilder};
use crate::types::{Direction, Template};

use super::builtin;

const HOUSE_TILES: &str = r#"
// front rooms, one per house shape
name:start1x1
dir:S
fixed

#######
#.....#
#.....#
#.....#
#.....#
#.....#
###+###
---
name:start1xN
dir:NS
fixed
startX:first
startY:max

###+###
#.....#
#.....#
#.....#
#.....#
#.....#
###+###
---
name:start2xN
dir:SE
fixed
startX:first
startY:max

#######
#.....#
#.....#
#.....+
#.....#
#.....#
###+###
---
// inner rooms
name:room
dir:N

###+###
#.....#
#.....#
#.....#
#.....#
#.....#
#######
---
name:room_through
dir:NS

###+###
#.....#
#.....#
#.....#
#.....#
#.....#
###+###
---
name:room_corner
dir:NE

###+###
#.....#
#.....#
#.....+
#.....#
#.....#
#######
---
name:room_three
dir:NEW

###+###
#.....#
#.....#
+.....+
#.....#
#.....#
#######
---
name:room_hub
dir:NSEW

###+###
#.....#
#.....#
+.....+
#.....#
#.....#
###+###
---
name:closet

#######
#.....#
#.....#
#.....#
#.....#
#.....#
#######
"#;

static HOUSES: LazyLock<Result<Model>> = LazyLock::new(|| {
    ModelBuilder::new("houses5x5").add_file_source(HOUSE_TILES).build()
});

/// The built-in house model (7×7 tiles, 5×5 interiors).
pub fn houses_model() -> Result<&'static Model> {
    builtin(&HOUSES)
}

/// Options for the house constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseConf {
    /// Chance of an inner door on a side nothing has decided yet.
    pub door_thr: f64,
}

impl Default for HouseConf {
    fn default() -> Self {
        Self { door_thr: 0.5 }
    }
}

/// Place the front room for the house's shape.
///
/// 1×1 houses use `start1x1`, one-tile-wide houses `start1xN` and all
/// others `start2xN`. The slot comes from the template's start anchors.
pub fn start_room_func(ctx: &mut GridContext) -> Result<RoomPlacement> {
    let (tx, ty) = (ctx.tiles_x(), ctx.tiles_y());
    let name = match (tx, ty) {
        (1, 1) => "start1x1",
        (1, _) => "start1xN",
        _ => "start2xN",
    };
    let room = ctx.find_by_name(name)?;
    let flags = room.flags();
    let x = flags.start_x.map_or(0, |a| a.resolve(tx));
    let y = flags.start_y.map_or(ty - 1, |a| a.resolve(ty));
    Ok(RoomPlacement::new(x, y, room))
}

/// Connect reached rooms with doors; unreached slots become closets.
pub fn constraint_func(
    conf: HouseConf,
) -> impl FnMut(&mut GridContext, usize, usize, &ExitRequirements) -> Result<Option<Arc<Template>>> {
    move |ctx: &mut GridContext, _x: usize, _y: usize, reqs: &ExitRequirements| {
        let mut exits = reqs.required();
        if exits.is_empty() {
            return ctx.find_by_name("closet").map(Some);
        }
        for dir in Direction::ALL {
            if reqs.get(dir) == Requirement::Free && ctx.rng().gen_bool(conf.door_thr.clamp(0.0, 1.0)) {
                exits |= dir.exit();
            }
        }
        let candidates = ctx.model().with_exits(exits);
        Ok(ctx.choose_weighted(&candidates))
    }
}

/// Generate one house of `tiles_x × tiles_y` rooms, grown from the front
/// room through its doors.
pub fn generate_house(tiles_x: usize, tiles_y: usize, conf: HouseConf, rng: &mut StdRng) -> Result<TileGrid> {
    let gen_conf = GenerateConf::new(tiles_x, tiles_y).with_fill_order(FillOrder::Frontier);
    generate(houses_model()?, &gen_conf, rng, start_room_func, constraint_func(conf))
}
