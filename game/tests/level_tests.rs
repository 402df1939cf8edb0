use paflamy::color::{Color, Corners};
use paflamy::descriptor::LevelDescriptor;
use paflamy::lock::TileLock;
use paflamy::{Level, LevelError};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn black_white(width: u32, height: u32, lock: TileLock) -> LevelDescriptor {
    LevelDescriptor::new(
        width,
        height,
        Corners::new(Color::BLACK, Color::WHITE, Color::WHITE, Color::BLACK),
        lock,
    )
    .expect("valid descriptor")
}

#[test]
fn three_by_three_borders_has_a_single_free_center() {
    let level = Level::new_unscrambled(black_white(3, 3, TileLock::Borders));

    let mut locked = 0;
    for y in 0..3 {
        for x in 0..3 {
            let is_center = (x, y) == (1, 1);
            assert_eq!(level.is_locked(x, y), Some(!is_center), "cell ({x}, {y})");
            if !is_center {
                locked += 1;
            }
        }
    }
    assert_eq!(locked, 8);
    assert_eq!(level.free_tile_count(), 1);

    let mut rng = SmallRng::seed_from_u64(0);
    let mut level = level;
    assert_eq!(level.randomize(&mut rng), Err(LevelError::SingletonFreeTile));
    assert!(level.is_solved());
}

#[test]
fn four_by_four_borders_scrambles() {
    let mut rng = SmallRng::seed_from_u64(9);
    let level = Level::new_scrambled(black_white(4, 4, TileLock::Borders), &mut rng).expect("scramble");
    assert!(!level.is_solved());
    for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        assert_ne!(level.get(x, y), level.solution(x, y));
    }
}

#[test]
fn seven_by_seven_borders_locks_every_edge() {
    let level = Level::new_unscrambled(black_white(7, 7, TileLock::Borders));
    for i in 0..7 {
        assert_eq!(level.is_locked(i, 0), Some(true));
        assert_eq!(level.is_locked(i, 6), Some(true));
        assert_eq!(level.is_locked(0, i), Some(true));
        assert_eq!(level.is_locked(6, i), Some(true));
    }
    assert_eq!(level.is_locked(3, 3), Some(false));
    assert_eq!(level.free_tile_count(), 25);
}

#[test]
fn gradient_runs_from_black_to_white_across_columns() {
    let level = Level::new_unscrambled(black_white(4, 4, TileLock::None));
    assert_eq!(level.get(0, 0), Some(Color::BLACK));
    assert_eq!(level.get(3, 3), Some(Color::WHITE));
    for x in 0..4 {
        assert_eq!(level.get(x, 0), level.get(x, 3), "column {x} is uniform");
    }
    let reds: Vec<u8> = (0..4).filter_map(|x| level.get(x, 1)).map(|c| c.r).collect();
    assert!(reds.windows(2).all(|w| w[0] < w[1]), "{reds:?}");
}

#[test]
fn swap_touching_a_locked_tile_changes_nothing() {
    let mut level = Level::new_unscrambled(black_white(5, 5, TileLock::Checkered));
    let before = level.clone();
    let locked = (0..5)
        .flat_map(|y| (0..5).map(move |x| (x, y)))
        .find(|&(x, y)| level.is_locked(x, y) == Some(true))
        .expect("checkered has locked cells");
    let free = (0..5)
        .flat_map(|y| (0..5).map(move |x| (x, y)))
        .find(|&(x, y)| level.is_locked(x, y) == Some(false))
        .expect("checkered has free cells");

    assert_eq!(
        level.swap(free.0, free.1, locked.0, locked.1),
        Err(LevelError::LockedTile {
            x: locked.0,
            y: locked.1
        })
    );
    assert_eq!(level, before);
}
