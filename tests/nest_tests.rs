#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use slugs::simulation::creature::{CreatureIds, Species};
use slugs::simulation::error::SimulationError;
use slugs::simulation::navigator::Navigator;
use slugs::simulation::nest::Nest;
use slugs::simulation::params::{NestParams, Params};
use slugs::simulation::rng::create_rng;

fn create_test_params() -> Params {
    Params {
        rng_seed: Some(21),
        ..Params::default()
    }
}

fn create_nest(species: Species, spawn_rate: f64, spawn_variance: f64, seed: u64) -> Nest {
    let params = create_test_params();
    let mut rng = create_rng(seed);
    let nest_params = NestParams {
        spawn_rate,
        spawn_variance,
    };

    match Nest::new(species, params.traits(species), nest_params, &mut rng) {
        Ok(nest) => nest,
        Err(err) => panic!("nest rejected: {err}"),
    }
}

#[test]
fn test_spawn_intervals_never_negative() {
    let nest = create_nest(Species::Worker, 1.0, 5.0, 1);
    let mut rng = create_rng(2);

    for _ in 0..10_000 {
        assert!(nest.sample_interval(&mut rng) >= 0.0);
    }
}

#[test]
fn test_mean_spawn_interval_converges() {
    let mut nest = create_nest(Species::Worker, 3.0, 0.5, 3);
    let mut navigator = Navigator::new(240.0, 400.0);
    let mut rng = create_rng(4);
    let mut ids = CreatureIds::default();
    let mut creatures = Vec::new();

    // stepped like a 60 fps game loop
    let frame = 1.0 / 60.0;
    let frames = 540_000;
    let mut spawned = 0;
    for step in 1..=frames {
        let now = step as f32 * frame;
        spawned += nest.spawn_creatures(now, &mut navigator, &mut rng, &mut ids, &mut creatures);
    }

    assert_eq!(spawned, creatures.len());
    let duration = f64::from(frames as f32 * frame);
    let mean = duration / spawned as f64;
    assert!((mean - 3.0).abs() < 0.05, "mean interval was {mean}");
}

#[test]
fn test_long_pause_spawns_once() {
    let mut nest = create_nest(Species::Layer, 1.0, 0.1, 5);
    let mut navigator = Navigator::new(240.0, 400.0);
    let mut rng = create_rng(6);
    let mut ids = CreatureIds::default();
    let mut creatures = Vec::new();

    assert_eq!(
        nest.spawn_creatures(0.0, &mut navigator, &mut rng, &mut ids, &mut creatures),
        0
    );

    // ten missed intervals, but the next one is drawn from the time of the call
    let spawned = nest.spawn_creatures(10.0, &mut navigator, &mut rng, &mut ids, &mut creatures);
    assert_eq!(spawned, 1);
    assert_eq!(nest.last_spawn(), 10.0);
    assert!(nest.next_spawn() > 10.5);

    assert_eq!(
        nest.spawn_creatures(10.2, &mut navigator, &mut rng, &mut ids, &mut creatures),
        0
    );
}

#[test]
fn test_spawned_creatures_start_on_edge_heading_inwards() {
    let mut nest = create_nest(Species::Worker, 0.5, 0.1, 7);
    let mut navigator = Navigator::new(240.0, 400.0);
    let mut rng = create_rng(8);
    let mut ids = CreatureIds::default();
    let mut creatures = Vec::new();

    nest.set_speed_multiplier(1.4);
    for second in 1..=20 {
        let now = second as f32;
        nest.spawn_creatures(now, &mut navigator, &mut rng, &mut ids, &mut creatures);
    }
    assert_eq!(creatures.len(), 20);

    for creature in &creatures {
        assert_eq!(creature.species(), Species::Worker);
        assert!(!creature.has_entered_world());
        assert!((creature.speed_multiplier() - 1.4).abs() < 1e-6);
        assert!(creature.mind().is_some());

        // the leading edge sits on the arena boundary
        let bounds = creature.head().bounds();
        let on_edge = (bounds.top - 0.0).abs() < 1e-3
            || (bounds.bottom - 400.0).abs() < 1e-3
            || (bounds.right - 0.0).abs() < 1e-3
            || (bounds.left - 240.0).abs() < 1e-3;
        assert!(on_edge, "{bounds:?} is not on an edge");
    }

    let mut ids: Vec<_> = creatures.iter().map(|creature| creature.id()).collect();
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn test_released_creatures_are_reused_with_new_identity() {
    let mut nest = create_nest(Species::Layer, 1.0, 0.1, 9);
    let mut navigator = Navigator::new(240.0, 400.0);
    let mut rng = create_rng(10);
    let mut ids = CreatureIds::default();
    let mut creatures = Vec::new();

    nest.spawn_creatures(5.0, &mut navigator, &mut rng, &mut ids, &mut creatures);
    let first_ids: Vec<_> = creatures.iter().map(|creature| creature.id()).collect();
    for creature in creatures.drain(..) {
        nest.release(creature);
    }
    assert_eq!(nest.idle(), first_ids.len());

    nest.spawn_creatures(8.0, &mut navigator, &mut rng, &mut ids, &mut creatures);
    assert!(!creatures.is_empty());
    assert!(nest.idle() < first_ids.len());

    for creature in &creatures {
        assert!(!first_ids.contains(&creature.id()));
        assert_eq!(creature.segment_count(), 1);
        assert!(creature.line().is_none());
    }
}

#[test]
fn test_reset_keeps_speed_multiplier() {
    let mut nest = create_nest(Species::Layer, 2.0, 0.1, 11);
    let mut rng = create_rng(12);

    nest.set_speed_multiplier(1.6);
    nest.reset(&mut rng);

    assert_eq!(nest.last_spawn(), 0.0);
    assert!(nest.next_spawn() > 1.0);
    assert!((nest.speed_multiplier() - 1.6).abs() < 1e-6);
}

#[test]
fn test_invalid_distribution_rejected() {
    let params = create_test_params();
    let mut rng = create_rng(13);

    for (spawn_rate, spawn_variance) in [(0.0, 1.0), (-2.0, 1.0), (3.0, -1.0), (f64::NAN, 1.0)] {
        let result = Nest::new(
            Species::Worker,
            params.traits(Species::Worker),
            NestParams {
                spawn_rate,
                spawn_variance,
            },
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(SimulationError::InvalidSpawnDistribution { .. })
        ));
    }
}
