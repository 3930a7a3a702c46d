//! Level composition and population.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tilegen::themes::{fort_level, FortConf};
use tilegen::{
    generate_theme, insert_sub_level, merge_map_base_elems, populate, wrap_as_level, BaseElem, BasicSpawner, CellMap,
    Level, PopulateConf, Theme, ThemeConf, TileError, WrapConf,
};

#[test]
fn wrapped_level_size_follows_the_layout_direction() {
    let subs = [
        Level::new("a", 3, 4, BaseElem::Grass),
        Level::new("b", 5, 2, BaseElem::Floor),
    ];

    let row = wrap_as_level(&subs, &WrapConf::default()).unwrap();
    assert_eq!(row.size(), (8, 4));
    assert_eq!(row.name, "a+b");

    let column = wrap_as_level(
        &subs,
        &WrapConf {
            transpose: true,
            ..WrapConf::default()
        },
    )
    .unwrap();
    assert_eq!(column.size(), (5, 6));
}

#[test]
fn centred_wrap_pads_with_the_base_element() {
    let subs = [
        Level::new("tall", 3, 4, BaseElem::Grass),
        Level::new("flat", 5, 2, BaseElem::Floor),
    ];
    let conf = WrapConf {
        center_y: true,
        base_elem: BaseElem::Rock,
        ..WrapConf::default()
    };

    let level = wrap_as_level(&subs, &conf).unwrap();
    let rows = level.map().rows();
    assert_eq!(rows, vec![",,,^^^^^", ",,,.....", ",,,.....", ",,,^^^^^"]);
}

#[test]
fn merge_clips_cells_outside_the_target() {
    let mut target = CellMap::new(4, 4, BaseElem::Floor);
    let source = CellMap::new(3, 3, BaseElem::Wall);

    let written = merge_map_base_elems(&mut target, &source, -1, 2);
    assert_eq!(written, 4);
    assert_eq!(target.count(BaseElem::Wall), 4);
    assert_eq!(target.get_elem(0, 2), Some(BaseElem::Wall));
    assert_eq!(target.get_elem(2, 2), Some(BaseElem::Floor));
}

#[test]
fn out_of_bounds_insert_leaves_target_untouched() {
    let mut target = Level::new("target", 5, 5, BaseElem::Floor);
    let before = target.clone();
    let sub = Level::new("sub", 3, 3, BaseElem::Wall);

    let err = insert_sub_level(&mut target, &sub, 3, 3).unwrap_err();
    assert!(matches!(err, TileError::CompositionBounds { .. }));
    assert_eq!(target, before);

    insert_sub_level(&mut target, &sub, 2, 2).unwrap();
    assert_eq!(target.map().count(BaseElem::Wall), 9);
}

#[test]
fn inserted_entities_move_with_their_level() {
    let mut sub = Level::new("room", 3, 3, BaseElem::Floor);
    let mut spawner = BasicSpawner::new();
    let conf = PopulateConf {
        actors: vec!["rat".to_string()],
        items: vec!["coin".to_string()],
        bbox: None,
    };
    let mut rng = StdRng::seed_from_u64(3);
    populate(&mut sub, &mut spawner, &conf, &mut rng).unwrap();
    let (ax, ay) = (sub.actors()[0].x, sub.actors()[0].y);

    let mut target = Level::new("hall", 10, 10, BaseElem::Wall);
    insert_sub_level(&mut target, &sub, 4, 5).unwrap();

    assert_eq!(target.actors().len(), 1);
    assert_eq!(target.items().len(), 1);
    assert_eq!((target.actors()[0].x, target.actors()[0].y), (ax + 4, ay + 5));
}

#[test]
fn fort_population_stays_inside_the_walls() {
    let mut rng = StdRng::seed_from_u64(12);
    let (mut level, bbox) = fort_level(&FortConf::default(), &mut rng).unwrap();

    let conf = PopulateConf {
        actors: (0..12).map(|i| format!("bandit{}", i)).collect(),
        items: (0..6).map(|i| format!("loot{}", i)).collect(),
        bbox: Some(bbox),
    };
    let report = populate(&mut level, &mut BasicSpawner::new(), &conf, &mut rng).unwrap();
    assert_eq!((report.actors, report.items), (12, 6));

    let mut cells = Vec::new();
    for placed in level.actors().iter().chain(level.items()) {
        assert!(bbox.contains(placed.x, placed.y), "{:?} outside {:?}", placed, bbox);
        assert!(level.get_base_elem(placed.x, placed.y).unwrap().is_spawnable());
        cells.push((placed.x, placed.y));
    }
    cells.sort_unstable();
    cells.dedup();
    assert_eq!(cells.len(), 18);
}

#[test]
fn themes_place_the_requested_entities() {
    let conf = ThemeConf {
        actors: 3,
        items: 2,
        ..ThemeConf::default()
    };
    for theme in Theme::ALL {
        let mut rng = StdRng::seed_from_u64(21);
        let level = generate_theme(theme, &conf, &mut rng, &mut BasicSpawner::new()).unwrap();

        assert_eq!(level.actors().len(), 3, "{}", theme);
        assert_eq!(level.items().len(), 2, "{}", theme);
    }
}
