//! Rotation and mirroring of tiles.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use tilegen::types::is_blocking_glyph;
use tilegen::{Direction, Exits, Template, TileFlags};

const NOOK: &str = "name:nook\ndir:N\n\n##.##\n#...#\n#..##\n#...#\n#####\n";

/// Random odd-sized tile whose exits follow its edge midpoints.
fn arb_template() -> impl Strategy<Value = Template> {
    let side = prop_oneof![Just(3usize), Just(5), Just(7)];
    (side.clone(), side)
        .prop_flat_map(|(w, h)| {
            let cell = prop_oneof![Just('#'), Just('.'), Just('~'), Just('^'), Just('+')];
            prop::collection::vec(prop::collection::vec(cell, w), h)
        })
        .prop_map(|grid| {
            let (w, h) = (grid[0].len(), grid.len());
            let midpoints = [
                (Direction::N, grid[0][w / 2]),
                (Direction::S, grid[h - 1][w / 2]),
                (Direction::E, grid[h / 2][w - 1]),
                (Direction::W, grid[h / 2][0]),
            ];
            let exits = midpoints
                .iter()
                .filter(|(_, c)| !is_blocking_glyph(*c))
                .fold(Exits::empty(), |acc, (dir, _)| acc | dir.exit());
            Template::new("random", grid, exits, TileFlags::default()).unwrap()
        })
}

proptest! {
    #[test]
    fn four_quarter_turns_restore_the_tile(t in arb_template()) {
        let turned = t.rotate90().rotate90().rotate90().rotate90();
        prop_assert!(turned.same_shape(&t));
        prop_assert_eq!(turned.orientation(), t.orientation());
    }

    #[test]
    fn mirroring_twice_restores_the_tile(t in arb_template()) {
        prop_assert!(t.mirror_vertical().mirror_vertical().same_shape(&t));
        prop_assert!(t.mirror_horizontal().mirror_horizontal().same_shape(&t));
    }

    #[test]
    fn rotated_exits_match_rotated_edges(t in arb_template()) {
        let turned = t.rotate90();
        prop_assert_eq!(turned.exits(), t.exits().rotated_cw());
        prop_assert_eq!(turned.size(), (t.height(), t.width()));
        for dir in Direction::ALL {
            prop_assert_eq!(turned.edge_is_open(dir), turned.exits().has(dir));
        }
    }

    #[test]
    fn mirrored_exits_match_mirrored_edges(t in arb_template()) {
        for m in [t.mirror_vertical(), t.mirror_horizontal()] {
            for dir in Direction::ALL {
                prop_assert_eq!(m.edge_is_open(dir), m.exits().has(dir));
            }
        }
    }
}

#[test]
fn nook_turned_clockwise() {
    let nook = Template::parse(NOOK).unwrap();
    let turned = nook.rotate90();

    assert_eq!(turned.exits(), Exits::E);
    insta::assert_snapshot!(turned.render(), @r"
    #####
    #...#
    #....
    #.#.#
    #####
    ");
}

#[test]
fn nook_mirrored_left_to_right() {
    let nook = Template::parse(NOOK).unwrap();
    let mirrored = nook.mirror_vertical();

    assert_eq!(mirrored.exits(), Exits::N);
    assert_eq!(
        mirrored.render(),
        "##.##\n#...#\n##..#\n#...#\n#####"
    );
}

#[test]
fn rotate_counts_quarter_turns_modulo_four() {
    let nook = Template::parse(NOOK).unwrap();

    assert!(nook.rotate(5).same_shape(&nook.rotate90()));
    assert!(nook.rotate(2).same_shape(&nook.rotate90().rotate90()));
    assert_eq!(nook.rotate(2).exits(), Exits::S);
}
