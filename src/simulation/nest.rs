//! Per-species spawners.
//!
//! A nest releases creatures from random arena edges at intervals drawn from a
//! Gaussian, and keeps reaped creatures for reuse.

use rand_distr::{Distribution, Normal};
use tracing::debug;

use super::creature::{Creature, CreatureId, CreatureIds, Species, Traits};
use super::error::SimulationError;
use super::navigator::Navigator;
use super::params::NestParams;
use super::pool::Pool;
use super::rng::SimRng;

/// Spawn scheduler and creature pool for one species.
#[derive(Debug, Clone)]
pub struct Nest {
    species: Species,
    traits: Traits,
    interval: Normal<f64>,
    speed_multiplier: f32,
    last_spawn: f32,
    next_spawn: f32,
    pool: Pool<Creature>,
}

impl Nest {
    /// Creates a nest and schedules its first spawn.
    pub fn new(
        species: Species,
        traits: Traits,
        params: NestParams,
        rng: &mut SimRng,
    ) -> Result<Self, SimulationError> {
        traits.validate()?;

        let invalid = SimulationError::InvalidSpawnDistribution {
            mean: params.spawn_rate,
            std_dev: params.spawn_variance,
        };
        if !(params.spawn_rate > 0.0 && params.spawn_rate.is_finite()) {
            return Err(invalid);
        }
        let interval = Normal::new(params.spawn_rate, params.spawn_variance).map_err(|_| invalid)?;

        let mut nest = Self {
            species,
            traits,
            interval,
            speed_multiplier: 1.0,
            last_spawn: 0.0,
            next_spawn: 0.0,
            pool: Pool::new(32, 64),
        };
        nest.schedule_next_spawn(rng);
        Ok(nest)
    }

    /// Species this nest spawns.
    pub fn species(&self) -> Species {
        self.species
    }

    /// Multiplier given to every creature spawned from now on.
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Sets the multiplier for future spawns. Live creatures are unaffected.
    pub fn set_speed_multiplier(&mut self, speed_multiplier: f32) {
        self.speed_multiplier = speed_multiplier;
    }

    /// World time of the most recent spawn.
    pub fn last_spawn(&self) -> f32 {
        self.last_spawn
    }

    /// World time at which the next creature is due.
    pub fn next_spawn(&self) -> f32 {
        self.next_spawn
    }

    /// Creatures waiting in the pool.
    pub fn idle(&self) -> usize {
        self.pool.idle()
    }

    /// Draws a spawn interval, resampling until it is non-negative.
    pub fn sample_interval(&self, rng: &mut SimRng) -> f32 {
        loop {
            let interval = self.interval.sample(rng) as f32;
            if interval >= 0.0 {
                return interval;
            }
        }
    }

    /// Spawns every creature that has fallen due by world time `now`, placing
    /// each at a random edge heading inwards and appending it to `creatures`.
    /// Returns how many were spawned.
    ///
    /// After each spawn the next one is scheduled from `now`, so a long pause
    /// only releases the creatures whose fresh interval is still due.
    pub fn spawn_creatures(
        &mut self,
        now: f32,
        navigator: &mut Navigator,
        rng: &mut SimRng,
        ids: &mut CreatureIds,
        creatures: &mut Vec<Creature>,
    ) -> usize {
        let mut spawned = 0;

        while self.next_spawn <= now {
            let mut creature = self.obtain(ids.issue(), rng);
            let (start, heading) = navigator.random_edge_point(rng);
            creature.place(start.x, start.y, heading);

            debug!(
                species = ?self.species,
                id = ?creature.id(),
                x = start.x,
                y = start.y,
                ?heading,
                "spawned creature"
            );
            creatures.push(creature);
            spawned += 1;

            self.last_spawn = now;
            self.schedule_next_spawn(rng);
        }

        spawned
    }

    /// Takes an unplaced creature from the pool, or builds one, and gives it
    /// the nest's current speed multiplier.
    pub fn obtain(&mut self, id: CreatureId, rng: &mut SimRng) -> Creature {
        let (species, traits) = (self.species, self.traits);
        let mut creature = self
            .pool
            .acquire(|| Creature::from_traits(id, species, traits));
        creature.prepare(id, rng);
        creature.set_speed_multiplier(self.speed_multiplier);
        creature
    }

    /// Takes back a reaped creature for reuse.
    pub fn release(&mut self, creature: Creature) {
        debug_assert_eq!(creature.species(), self.species, "creature returned to wrong nest");
        self.pool.release(creature);
    }

    /// Restarts the spawn schedule. The speed multiplier is left alone.
    pub fn reset(&mut self, rng: &mut SimRng) {
        self.last_spawn = 0.0;
        self.schedule_next_spawn(rng);
    }

    fn schedule_next_spawn(&mut self, rng: &mut SimRng) {
        self.next_spawn = self.last_spawn + self.sample_interval(rng);
    }
}
