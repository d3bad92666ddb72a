use serde::{Deserialize, Serialize};

use super::creature::{Species, Traits};
use super::error::SimulationError;

/// Base speed shared by every creature, in world units per second.
pub const BASE_SPEED: f32 = 24.0;

/// Shape and speed of one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatureParams {
    /// Size across the direction of travel.
    pub width: f32,
    /// Total body length.
    pub height: f32,
    /// Base speed in world units per second.
    pub speed: f32,
}

/// Spawn timing for one nest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NestParams {
    /// Mean seconds between spawns.
    pub spawn_rate: f64,
    /// Standard deviation of the spawn interval, in seconds.
    pub spawn_variance: f64,
}

/// How workers react to danger and to trails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkerParams {
    /// A non-worker this close makes a worker flee.
    pub scare_distance: f32,
    /// A fleeing worker calms down once nothing is this close.
    pub safe_distance: f32,
    /// Speed multiple while fleeing.
    pub scared_speed_factor: f32,
    /// Speed multiple while following a trail.
    pub following_speed_factor: f32,
}

impl Default for WorkerParams {
    fn default() -> Self {
        Self {
            scare_distance: 30.0,
            safe_distance: 40.0,
            scared_speed_factor: 2.0,
            following_speed_factor: 0.5,
        }
    }
}

/// Simulation parameters that control world behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Arena width.
    pub arena_width: f32,
    /// Arena height.
    pub arena_height: f32,
    /// Seed for reproducible worlds; `None` seeds from the thread RNG.
    pub rng_seed: Option<u64>,
    /// Unowned lines shorter than this are removed.
    pub min_line_length: f32,
    /// Seconds to survive for each level up. The last entry repeats forever.
    pub level_durations: Vec<f32>,
    /// Speed multiplier added per level after the first.
    pub difficulty_per_level: f32,
    /// Extra margin trimmed off the runner's collision box.
    pub collision_epsilon: f32,
    /// The player creature.
    pub runner: CreatureParams,
    /// Line-laying predators.
    pub layer: CreatureParams,
    /// Line-eating workers.
    pub worker: CreatureParams,
    /// Worker temperament.
    pub worker_behaviour: WorkerParams,
    /// Worker spawn timing.
    pub worker_nest: NestParams,
    /// Layer spawn timing.
    pub layer_nest: NestParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            arena_width: 240.0,
            arena_height: 400.0,
            rng_seed: None,
            min_line_length: 3.0,
            level_durations: vec![30.0, 15.0],
            difficulty_per_level: 0.2,
            collision_epsilon: 0.01,
            runner: CreatureParams {
                width: 8.0,
                height: 24.0,
                speed: BASE_SPEED,
            },
            layer: CreatureParams {
                width: 8.0,
                height: 24.0,
                speed: BASE_SPEED,
            },
            worker: CreatureParams {
                width: 5.0,
                height: 5.0,
                speed: BASE_SPEED * 1.1,
            },
            worker_behaviour: WorkerParams::default(),
            worker_nest: NestParams {
                spawn_rate: 3.0,
                spawn_variance: 2.0,
            },
            layer_nest: NestParams {
                spawn_rate: 7.0,
                spawn_variance: 3.0,
            },
        }
    }
}

impl Params {
    /// Resolves the traits of one species.
    pub fn traits(&self, species: Species) -> Traits {
        match species {
            Species::Runner => Traits {
                width: self.runner.width,
                height: self.runner.height,
                speed: self.runner.speed,
                can_be_eaten: true,
                can_eat_creatures: true,
                lays_lines: true,
                eats_lines: false,
                temperament: None,
            },
            Species::Layer => Traits {
                width: self.layer.width,
                height: self.layer.height,
                speed: self.layer.speed,
                can_be_eaten: false,
                can_eat_creatures: true,
                lays_lines: true,
                eats_lines: false,
                temperament: None,
            },
            Species::Worker => Traits {
                width: self.worker.width,
                height: self.worker.height,
                speed: self.worker.speed,
                can_be_eaten: true,
                can_eat_creatures: false,
                lays_lines: false,
                eats_lines: true,
                temperament: Some(self.worker_behaviour),
            },
        }
    }

    /// Spawn timing for a species' nest. The runner has no nest.
    pub fn nest(&self, species: Species) -> Option<NestParams> {
        match species {
            Species::Runner => None,
            Species::Worker => Some(self.worker_nest),
            Species::Layer => Some(self.layer_nest),
        }
    }

    /// Checks every value needed to build a world.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let arena_ok = self.arena_width > 0.0
            && self.arena_height > 0.0
            && self.arena_width.is_finite()
            && self.arena_height.is_finite();
        if !arena_ok {
            return Err(SimulationError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        if self.level_durations.is_empty() {
            return Err(SimulationError::EmptyLevelTable);
        }
        if let Some(&duration) = self
            .level_durations
            .iter()
            .find(|duration| !(**duration > 0.0 && duration.is_finite()))
        {
            return Err(SimulationError::InvalidLevelDuration(duration));
        }

        for species in [Species::Runner, Species::Worker, Species::Layer] {
            self.traits(species).validate()?;
        }

        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
