//! House and crypt generation scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;

use tilegen::themes::{generate_crypt, generate_house, HouseConf};
use tilegen::validation::{check_grid_connectivity, check_grid_edges};
use tilegen::{BaseElem, Direction};

#[test]
fn one_by_one_house_is_its_front_room() {
    let mut rng = StdRng::seed_from_u64(1);
    let grid = generate_house(1, 1, HouseConf::default(), &mut rng).unwrap();

    assert_eq!(grid.layout(), "start1x1");
    assert_eq!(grid.start(), (0, 0));

    let map = grid.render();
    assert_eq!(map.size(), (7, 7));
    assert_eq!(map.count(BaseElem::Door), 1);
    assert_eq!(map.get_elem(3, 6), Some(BaseElem::Door));
}

#[test]
fn every_room_is_reachable_from_the_front_door() {
    for seed in 0..25 {
        for (tx, ty) in [(1, 3), (2, 2), (3, 2), (4, 4)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate_house(tx, ty, HouseConf::default(), &mut rng).unwrap();

            assert!(check_grid_edges(&grid).is_ok(), "{}x{} seed {}", tx, ty, seed);
            let unreachable = check_grid_connectivity(&grid);
            assert!(
                !unreachable.has_warnings(),
                "{}x{} seed {}:\n{}",
                tx,
                ty,
                seed,
                grid.layout()
            );
        }
    }
}

#[test]
fn front_room_sits_on_the_bottom_row() {
    for (tx, ty) in [(1, 4), (3, 3)] {
        let mut rng = StdRng::seed_from_u64(17);
        let grid = generate_house(tx, ty, HouseConf::default(), &mut rng).unwrap();
        let (sx, sy) = grid.start();

        assert_eq!(sy, ty - 1);
        assert!(grid.get(sx, sy).unwrap().exits().has(Direction::S));
    }
}

#[test]
fn crypt_rooms_connect_to_the_stairs() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = generate_crypt(6, 5, &mut rng).unwrap();

        assert_eq!(grid.get(3, 0).unwrap().base_name(), "stairs");
        assert!(check_grid_edges(&grid).is_ok());
        assert!(!check_grid_connectivity(&grid).has_warnings(), "seed {}", seed);
    }
}
