#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use slugs::simulation::creature::{Creature, CreatureId, Neighbours, Species, Surroundings};
use slugs::simulation::geometry::{BoundingBox, Direction, Point};
use slugs::simulation::line::{Line, LinePool};
use slugs::simulation::navigator::Navigator;
use slugs::simulation::params::Params;
use slugs::simulation::rng::create_rng;
use slugs::simulation::trails::Trails;

const EPSILON: f32 = 1e-3;
const ARENA_WIDTH: f32 = 240.0;
const ARENA_HEIGHT: f32 = 400.0;

fn create_test_params() -> Params {
    Params {
        rng_seed: Some(7),
        ..Params::default()
    }
}

/// A worker without a mind, so it keeps going straight.
fn create_line_eater() -> Creature {
    let mut traits = create_test_params().traits(Species::Worker);
    traits.temperament = None;

    match Creature::new(CreatureId(10), Species::Worker, traits) {
        Ok(creature) => creature,
        Err(err) => panic!("worker traits rejected: {err}"),
    }
}

fn create_layer() -> Creature {
    let params = create_test_params();
    match Creature::new(CreatureId(20), Species::Layer, params.traits(Species::Layer)) {
        Ok(creature) => creature,
        Err(err) => panic!("layer traits rejected: {err}"),
    }
}

fn step(creature: &mut Creature, trails: &mut Trails, time: f32) {
    let navigator = Navigator::new(ARENA_WIDTH, ARENA_HEIGHT);
    let mut rng = create_rng(3);
    let mut surroundings = Surroundings {
        width: ARENA_WIDTH,
        height: ARENA_HEIGHT,
        neighbours: Neighbours::none(),
        trails,
        navigator: &navigator,
        rng: &mut rng,
    };
    creature.step(time, &mut surroundings);
}

#[test]
fn test_line_length_and_bounds() {
    let line = Line::new(Point::new(10.0, 5.0), Point::new(2.0, 5.0), Direction::Left);

    assert_eq!(line.length(), 8.0);
    let bounds = line.bounding_box();
    assert_eq!(bounds, BoundingBox::new(2.0, 10.0, 5.0, 5.0));

    let mut line = Line::new(Point::new(0.0, 0.0), Point::new(0.0, 3.0), Direction::Up);
    line.extend(2.0);
    assert_eq!(line.end(), Point::new(0.0, 5.0));
    assert_eq!(line.length(), 5.0);
}

#[test]
fn test_remove_intersection_splits_line() {
    let mut line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Direction::Right);
    let sweep = BoundingBox::new(4.0, 6.0, 1.0, -1.0);

    let piece = match line.remove_intersection(&sweep) {
        Some(piece) => piece,
        None => panic!("bisected line should split"),
    };

    assert_eq!(piece.start(), Point::new(0.0, 0.0));
    assert_eq!(piece.end(), Point::new(4.0, 0.0));
    assert_eq!(piece.direction(), Direction::Right);
    assert!(piece.owner().is_none());

    assert_eq!(line.start(), Point::new(6.0, 0.0));
    assert_eq!(line.end(), Point::new(10.0, 0.0));
    assert_eq!(line.direction(), Direction::Right);
}

#[test]
fn test_remove_intersection_at_start() {
    let mut line = Line::new(Point::new(0.0, 0.0), Point::new(0.0, 10.0), Direction::Up)
        .owned_by(CreatureId(4));
    let sweep = BoundingBox::new(-1.0, 1.0, 3.0, -2.0);

    assert!(line.remove_intersection(&sweep).is_none());
    assert_eq!(line.start(), Point::new(0.0, 3.0));
    assert_eq!(line.end(), Point::new(0.0, 10.0));
    assert_eq!(line.owner(), Some(CreatureId(4)));
}

#[test]
fn test_remove_intersection_at_end_drops_owner() {
    let mut line = Line::new(Point::new(10.0, 0.0), Point::new(0.0, 0.0), Direction::Left)
        .owned_by(CreatureId(4));
    let sweep = BoundingBox::new(-1.0, 2.0, 1.0, -1.0);

    assert!(line.remove_intersection(&sweep).is_none());
    assert_eq!(line.end(), Point::new(2.0, 0.0));
    assert!(line.owner().is_none());
}

#[test]
fn test_line_pool_handles_go_stale() {
    let mut pool = LinePool::with_capacity(4);
    let line = Line::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0), Direction::Right);

    let first = pool.obtain(line);
    assert_eq!(pool.in_use(), 1);
    assert!(pool.get(first).is_some());

    pool.free(first);
    assert!(pool.get(first).is_none());
    assert_eq!(pool.in_use(), 0);

    // the slot is reused under a new generation
    let second = pool.obtain(line);
    assert_ne!(first, second);
    assert!(pool.get(first).is_none());
    assert!(pool.get(second).is_some());

    // freeing a stale handle leaves the new line alone
    pool.free(first);
    assert!(pool.get(second).is_some());
}

#[test]
fn test_laid_lines_wait_for_flush() {
    let mut trails = Trails::new();
    let id = trails.lay(Line::new(
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Direction::Right,
    ));

    assert_eq!(trails.len(), 0);
    assert_eq!(trails.pending(), 1);
    assert!(trails.get(id).is_some());

    trails.flush();
    assert_eq!(trails.len(), 1);
    assert_eq!(trails.pending(), 0);
    assert!(trails.iter().eq(trails.get(id)));
}

#[test]
fn test_remove_short_keeps_owned_lines() {
    let mut trails = Trails::new();
    let nub = Line::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0), Direction::Right);
    trails.lay(nub);
    trails.lay(nub.owned_by(CreatureId(1)));
    trails.lay(Line::new(
        Point::new(0.0, 10.0),
        Point::new(20.0, 10.0),
        Direction::Right,
    ));
    trails.flush();

    let removed = trails.remove_short(3.0);

    assert_eq!(removed, 1);
    assert_eq!(trails.len(), 2);
    assert_eq!(trails.pool().in_use(), 2);
}

#[test]
fn test_hits_ignores_own_lines() {
    let mut trails = Trails::new();
    trails.lay(
        Line::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0), Direction::Right)
            .owned_by(CreatureId(1)),
    );
    trails.flush();

    let collider = BoundingBox::new(4.0, 6.0, 6.0, 4.0);
    assert!(!trails.hits(&collider, CreatureId(1)));
    assert!(trails.hits(&collider, CreatureId(2)));
}

#[test]
fn test_eat_removes_contained_line() {
    let mut trails = Trails::new();
    trails.lay(Line::new(Point::new(2.0, 0.0), Point::new(4.0, 0.0), Direction::Right));
    trails.flush();

    let feeding = trails.eat(&BoundingBox::new(0.0, 10.0, 1.0, -1.0));

    assert!(feeding.touched);
    assert!(!feeding.bitten);
    assert!(feeding.last_bitten.is_none());
    assert!(trails.is_empty());
    assert_eq!(trails.pool().in_use(), 0);
}

#[test]
fn test_clear_recycles_everything() {
    let mut trails = Trails::new();
    let line = Line::new(Point::new(0.0, 0.0), Point::new(8.0, 0.0), Direction::Right);
    trails.lay(line);
    trails.flush();
    trails.lay(line);

    trails.clear();

    assert!(trails.is_empty());
    assert_eq!(trails.pending(), 0);
    assert_eq!(trails.pool().in_use(), 0);
}

#[test]
fn test_layer_lays_and_extends_trail() {
    let mut trails = Trails::new();
    let mut layer = create_layer();
    layer.place(100.0, 100.0, Direction::Up);

    step(&mut layer, &mut trails, 0.5);
    assert_eq!(trails.pending(), 1);
    trails.flush();

    let first = match layer.line() {
        Some(id) => id,
        None => panic!("layer should own a line"),
    };
    assert!(trails.is_owned_by(first, layer.id()));
    let line = trails.get(first).copied();
    assert!(line.is_some_and(|line| line.direction() == Direction::Up));
    assert!(line.is_some_and(|line| (line.length() - 12.0).abs() < EPSILON));

    // same heading extends the line in place
    step(&mut layer, &mut trails, 0.5);
    assert_eq!(trails.pending(), 0);
    assert_eq!(layer.line(), Some(first));
    assert!(trails.get(first).is_some_and(|line| (line.length() - 24.0).abs() < EPSILON));

    // a turn abandons the old line and starts a new one
    assert!(layer.turn(Direction::Right));
    step(&mut layer, &mut trails, 0.5);
    trails.flush();

    assert_eq!(trails.len(), 2);
    assert!(trails.get(first).is_some_and(|line| line.owner().is_none()));
    let second = layer.line();
    assert!(second.is_some_and(|id| id != first && trails.is_owned_by(id, layer.id())));
    let anchor = trails.get(first).map(Line::end);
    assert_eq!(second.and_then(|id| trails.get(id)).map(Line::start), anchor);
}

#[test]
fn test_worker_bites_start_of_line() {
    let mut trails = Trails::new();
    let id = trails.lay(Line::new(
        Point::new(60.0, 100.0),
        Point::new(100.0, 100.0),
        Direction::Right,
    ));
    trails.flush();

    let mut worker = create_line_eater();
    worker.place(50.0, 100.0, Direction::Right);
    step(&mut worker, &mut trails, 0.5);

    let line = trails.get(id).copied();
    assert!(line.is_some_and(|line| (line.start().x - 63.2).abs() < EPSILON));
    assert!(line.is_some_and(|line| (line.length() - 36.8).abs() < EPSILON));
    assert_eq!(trails.len(), 1);
}

#[test]
fn test_worker_swallows_short_line() {
    let mut trails = Trails::new();
    trails.lay(Line::new(
        Point::new(55.0, 100.0),
        Point::new(58.0, 100.0),
        Direction::Right,
    ));
    trails.flush();

    let mut worker = create_line_eater();
    worker.place(50.0, 100.0, Direction::Right);
    step(&mut worker, &mut trails, 0.5);

    assert!(trails.is_empty());
    assert_eq!(trails.pool().in_use(), 0);
}

#[test]
fn test_worker_crossing_line_splits_it() {
    let mut trails = Trails::new();
    let id = trails.lay(Line::new(
        Point::new(60.0, 100.0),
        Point::new(100.0, 100.0),
        Direction::Right,
    ));
    trails.flush();

    let mut worker = create_line_eater();
    worker.place(70.0, 90.0, Direction::Up);
    step(&mut worker, &mut trails, 0.5);

    // the split-off piece is flushed straight away
    assert_eq!(trails.len(), 2);
    assert_eq!(trails.pending(), 0);

    let original = trails.get(id).copied();
    assert!(original.is_some_and(|line| (line.start().x - 72.5).abs() < EPSILON));

    let piece = trails.iter().find(|line| line.start() == Point::new(60.0, 100.0)).copied();
    assert!(piece.is_some_and(|line| (line.end().x - 67.5).abs() < EPSILON));
}
