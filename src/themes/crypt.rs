//! Crypt theme: rock-cut passages with burial chambers.
//!
//! Reuses the castle corridor pieces with their walls restyled as rock, adds
//! tombs, and grows outward from a single stairway. Anything the passages
//! never reach stays solid rock.

use std::sync::{Arc, LazyLock};

use rand::rngs::StdRng;

use crate::error::Result;
use crate::generator::{
    generate, ExitRequirements, FillOrder, GenerateConf, GridContext, RoomPlacement, TileGrid,
};
use crate::registry::{Model, ModelBuilder};
use crate::types::{Exits, Template};

use super::builtin;
use super::castle::CORRIDOR_TILES;

const TOMB_TILES: &str = r#"
name:stairs
dir:S
fixed
W=#

^^^^^^^
^WWWWW^
^W.<.W^
^W...W^
^WW.WW^
^^^.^^^
^^^.^^^
---
name:tomb
dir:N
weight:3
W=#

^^^.^^^
^WW+WW^
^W...W^
^W.&.W^
^W...W^
^WWWWW^
^^^^^^^
---
name:tomb_hall
dir:NS
weight:2
W=#

^^^.^^^
^WW+WW^
^W&.&W^
^W...W^
^W&.&W^
^WW+WW^
^^^.^^^
---
name:ossuary
dir:NSEW
noedge
W=#

^^^.^^^
^W...W^
^.&.&.^
.......
^.&.&.^
^W...W^
^^^.^^^
"#;

static CRYPT: LazyLock<Result<Model>> = LazyLock::new(|| {
    ModelBuilder::new("crypt")
        .add_file_source(CORRIDOR_TILES)
        .add_file_source(TOMB_TILES)
        .substitute('X', '^')
        .build()
});

/// The built-in crypt model (7×7 tiles).
pub fn crypt_model() -> Result<&'static Model> {
    builtin(&CRYPT)
}

/// Start with the stairway in the middle of the north edge.
pub fn start_func(ctx: &mut GridContext) -> Result<RoomPlacement> {
    let stairs = ctx.find_by_name("stairs")?;
    Ok(RoomPlacement::new(ctx.tiles_x() / 2, 0, stairs))
}

/// Extend reached passages at random; seal unreached slots with rock.
pub fn constraint_func(
    ctx: &mut GridContext,
    _x: usize,
    _y: usize,
    reqs: &ExitRequirements,
) -> Result<Option<Arc<Template>>> {
    if reqs.required().is_empty() {
        return ctx.find_template(|t| t.exits() == Exits::empty() && !t.flags().fixed).map(Some);
    }
    Ok(ctx.choose_matching(reqs))
}

/// Generate a crypt of `tiles_x × tiles_y` tiles, grown from the stairway.
pub fn generate_crypt(tiles_x: usize, tiles_y: usize, rng: &mut StdRng) -> Result<TileGrid> {
    let conf = GenerateConf::new(tiles_x, tiles_y).with_fill_order(FillOrder::Frontier);
    generate(crypt_model()?, &conf, rng, start_func, constraint_func)
}
