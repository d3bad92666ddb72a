//! Game time.

use serde::{Deserialize, Serialize};

/// Measures elapsed game time in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    time: f32,
    last_tick: f32,
}

impl GameClock {
    /// Creates a clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the passage of `elapsed` seconds.
    pub fn tick(&mut self, elapsed: f32) {
        self.last_tick = elapsed;
        self.time += elapsed;
    }

    /// Total elapsed time.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Duration of the most recent tick.
    pub fn last_tick(&self) -> f32 {
        self.last_tick
    }

    /// Whole seconds elapsed, rounded down.
    pub fn total_seconds(&self) -> u32 {
        self.time.max(0.0) as u32
    }

    /// Winds the clock back to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
