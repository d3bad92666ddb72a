//! The arena: tick orchestration, predation, trail collisions and levels.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::GameClock;
use super::creature::{Creature, CreatureId, CreatureIds, Neighbours, Species, Surroundings};
use super::error::SimulationError;
use super::geometry::{Direction, Point};
use super::line::{Line, LineId};
use super::navigator::Navigator;
use super::nest::Nest;
use super::params::Params;
use super::pool::Recycle;
use super::rng::{SimRng, create_rng_from};
use super::trails::Trails;

/// Index of the player's creature in [`World::creatures`].
pub const RUNNER: usize = 0;

/// Why the current game ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The game is still running.
    #[default]
    None,
    /// The runner left the arena.
    OutOfBounds,
    /// The runner was eaten.
    Creature,
    /// The runner hit a trail line.
    Line,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            GameOverReason::None => "game over",
            GameOverReason::OutOfBounds => "stay on the screen",
            GameOverReason::Creature => "avoid other creatures",
            GameOverReason::Line => "avoid the lines",
        };
        f.write_str(message)
    }
}

/// The world in which the game is played.
#[derive(Debug, Clone)]
pub struct World {
    params: Params,
    width: f32,
    height: f32,
    clock: GameClock,
    navigator: Navigator,
    rng: SimRng,
    ids: CreatureIds,
    nests: Vec<Nest>,
    creatures: Vec<Creature>,
    doomed: Vec<usize>,
    trails: Trails,
    game_over: bool,
    game_over_reason: GameOverReason,
    level: u32,
    difficulty: f32,
    time_of_next_level_up: f32,
}

impl World {
    /// Builds a world with the runner at its start point and empty nests.
    pub fn new(params: Params) -> Result<Self, SimulationError> {
        params.validate()?;

        let mut rng = create_rng_from(params.rng_seed);
        let mut ids = CreatureIds::default();

        let runner_traits = params.traits(Species::Runner);
        let mut runner = Creature::new(ids.issue(), Species::Runner, runner_traits)?;
        let start = Self::runner_start(params.arena_width);
        runner.place(start.x, start.y, Direction::Up);

        let mut nests = Vec::with_capacity(2);
        for species in [Species::Worker, Species::Layer] {
            if let Some(nest) = params.nest(species) {
                nests.push(Nest::new(species, params.traits(species), nest, &mut rng)?);
            }
        }

        let mut creatures = Vec::with_capacity(32);
        creatures.push(runner);

        Ok(Self {
            width: params.arena_width,
            height: params.arena_height,
            navigator: Navigator::new(params.arena_width, params.arena_height),
            params,
            clock: GameClock::new(),
            rng,
            ids,
            nests,
            creatures,
            doomed: Vec::with_capacity(8),
            trails: Trails::new(),
            game_over: false,
            game_over_reason: GameOverReason::None,
            level: 0,
            difficulty: 1.0,
            time_of_next_level_up: 0.0,
        })
    }

    /// Leading edge of the runner at the start of a game: bottom centre.
    pub fn runner_start(width: f32) -> Point {
        Point::new(width / 2.0, 0.0)
    }

    /// Arena width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Arena height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Parameters the world was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Live creatures in movement order. The runner is always first.
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// The player's creature.
    pub fn runner(&self) -> &Creature {
        &self.creatures[RUNNER]
    }

    /// Live and queued trail lines.
    pub fn trails(&self) -> &Trails {
        &self.trails
    }

    /// Live trail lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.trails.iter()
    }

    /// Spawners, one per non-player species.
    pub fn nests(&self) -> &[Nest] {
        &self.nests
    }

    /// Navigator bounded by this arena.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Game time.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Whether the current game has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Why the game ended, or [`GameOverReason::None`] while it is running.
    pub fn game_over_reason(&self) -> GameOverReason {
        self.game_over_reason
    }

    /// Current difficulty level. Zero until the first update.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Speed multiplier of the current level.
    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    /// Game time at which the next level starts.
    pub fn time_of_next_level_up(&self) -> f32 {
        self.time_of_next_level_up
    }

    /// Whole seconds survived.
    pub fn score(&self) -> u32 {
        self.clock.total_seconds()
    }

    /// Turns the runner towards the point `(x, y)`.
    ///
    /// Only a perpendicular turn is ever requested: a runner moving
    /// horizontally turns up or down, one moving vertically turns left or
    /// right. Ignored once the game is over. Returns whether the runner turned.
    pub fn turn_runner(&mut self, x: f32, y: f32) -> bool {
        if self.game_over {
            return false;
        }

        let runner = &mut self.creatures[RUNNER];
        let position = runner.head().position();

        let direction = if runner.heading().is_horizontal() {
            if y > position.y {
                Some(Direction::Up)
            } else if y < position.y {
                Some(Direction::Down)
            } else {
                None
            }
        } else if x < position.x {
            Some(Direction::Left)
        } else if x > position.x {
            Some(Direction::Right)
        } else {
            None
        };

        direction.is_some_and(|direction| runner.turn(direction))
    }

    /// Places a new creature of `species` with its leading edge at `(x, y)`.
    ///
    /// Returns `None` for species without a nest.
    pub fn add_creature(
        &mut self,
        species: Species,
        x: f32,
        y: f32,
        direction: Direction,
    ) -> Option<CreatureId> {
        let nest = self.nests.iter_mut().find(|nest| nest.species() == species)?;
        let mut creature = nest.obtain(self.ids.issue(), &mut self.rng);
        creature.place(x, y, direction);

        let id = creature.id();
        self.creatures.push(creature);
        Some(id)
    }

    /// Queues a line. It becomes live at the next update.
    pub fn add_line(&mut self, line: Line) -> LineId {
        self.trails.lay(line)
    }

    /// Advances the world by `elapsed` seconds. Does nothing once the game is over.
    pub fn update(&mut self, elapsed: f32) {
        if self.game_over {
            return;
        }

        self.clock.tick(elapsed);
        self.trails.flush();

        self.spawn_creatures();
        self.move_creatures(elapsed);
        self.reap_creatures();

        let removed = self.trails.remove_short(self.params.min_line_length);
        if removed > 0 {
            debug!(removed, "removed short lines");
        }

        self.check_runner_collision();
        self.calculate_level();
    }

    /// Starts a new game: empty arena, level zero and the runner back at its
    /// start point.
    pub fn reset(&mut self) {
        self.clock.reset();

        self.level = 0;
        self.difficulty = 1.0;
        self.time_of_next_level_up = 0.0;

        self.doomed.clear();
        for creature in self.creatures.drain(RUNNER + 1..) {
            release(&mut self.nests, creature);
        }

        for nest in &mut self.nests {
            nest.reset(&mut self.rng);
            nest.set_speed_multiplier(1.0);
        }

        self.trails.clear();

        let start = Self::runner_start(self.width);
        let runner = &mut self.creatures[RUNNER];
        runner.recycle();
        runner.place(start.x, start.y, Direction::Up);

        self.game_over = false;
        self.game_over_reason = GameOverReason::None;

        info!("world reset");
    }

    fn spawn_creatures(&mut self) {
        let now = self.clock.time();

        for nest in &mut self.nests {
            nest.spawn_creatures(
                now,
                &mut self.navigator,
                &mut self.rng,
                &mut self.ids,
                &mut self.creatures,
            );
        }
    }

    fn move_creatures(&mut self, elapsed: f32) {
        let Self {
            width,
            height,
            navigator,
            rng,
            creatures,
            trails,
            ..
        } = self;

        for index in 0..creatures.len() {
            let (before, rest) = creatures.split_at_mut(index);
            let Some((creature, after)) = rest.split_first_mut() else {
                break;
            };

            let mut surroundings = Surroundings {
                width: *width,
                height: *height,
                neighbours: Neighbours::new(before, after),
                trails: &mut *trails,
                navigator: &*navigator,
                rng: &mut *rng,
            };
            creature.step(elapsed, &mut surroundings);
        }
    }

    /// Marks creatures that left the arena or were eaten, then removes them
    /// all at once.
    fn reap_creatures(&mut self) {
        let mut doomed = std::mem::take(&mut self.doomed);
        doomed.clear();
        let mut reason = None;

        for (index, creature) in self.creatures.iter().enumerate() {
            if creature.has_entered_world() && !self.is_inside(creature.head().position()) {
                if index == RUNNER {
                    reason = Some(GameOverReason::OutOfBounds);
                } else {
                    doomed.push(index);
                }
            }

            if !creature.can_eat_creatures() {
                continue;
            }

            let mouth = creature.head().bounds();
            for (other_index, other) in self.creatures.iter().enumerate() {
                let edible = other_index != index
                    && other.can_be_eaten()
                    && creature.species().preys_on(other.species());

                if edible && mouth.intersects(other.head().bounds()) {
                    if other_index == RUNNER {
                        reason = Some(GameOverReason::Creature);
                    } else {
                        doomed.push(other_index);
                    }
                }
            }
        }

        doomed.sort_unstable();
        doomed.dedup();

        for &index in doomed.iter().rev() {
            let creature = self.creatures.remove(index);
            debug!(species = ?creature.species(), id = ?creature.id(), "reaped creature");
            release(&mut self.nests, creature);
        }
        self.doomed = doomed;

        if let Some(reason) = reason {
            self.end_game(reason);
        }
    }

    fn check_runner_collision(&mut self) {
        let runner = &self.creatures[RUNNER];
        let collider = runner.collision_box(self.params.collision_epsilon);

        if self.trails.hits(&collider, runner.id()) {
            self.end_game(GameOverReason::Line);
        }
    }

    /// Moves to the next level once its start time has been reached, and
    /// speeds everything up to match.
    fn calculate_level(&mut self) {
        if self.clock.time() < self.time_of_next_level_up {
            return;
        }

        let durations = &self.params.level_durations;
        let increment = durations
            .get(self.level as usize)
            .or(durations.last())
            .copied()
            .unwrap_or_default();

        self.time_of_next_level_up += increment;
        self.level += 1;
        self.difficulty = 1.0 + (self.level - 1) as f32 * self.params.difficulty_per_level;

        for nest in &mut self.nests {
            nest.set_speed_multiplier(self.difficulty);
        }
        for creature in &mut self.creatures {
            creature.set_speed_multiplier(self.difficulty);
        }

        info!(
            level = self.level,
            difficulty = self.difficulty,
            next_level_up = self.time_of_next_level_up,
            "level up"
        );
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.game_over = true;
        self.game_over_reason = reason;
        info!(%reason, score = self.score(), "game over");
    }

    fn is_inside(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// Returns a creature to the nest of its species. Creatures without a nest
/// are dropped.
fn release(nests: &mut [Nest], creature: Creature) {
    if let Some(nest) = nests
        .iter_mut()
        .find(|nest| nest.species() == creature.species())
    {
        nest.release(creature);
    }
}
