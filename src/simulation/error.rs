//! Errors raised while configuring the simulation.
//!
//! Only construction-time problems are reported through [`SimulationError`].
//! Broken internal invariants (moving an unplaced creature, running out of
//! pooled segments, following a line that was never assigned) are programmer
//! errors and panic instead.

use thiserror::Error;

/// Errors that can occur when building simulation state.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A creature must be at least as tall as it is wide, and have a positive size.
    #[error("creature width {width} must be positive and not greater than height {height}")]
    InvalidCreatureShape {
        /// Configured creature width.
        width: f32,
        /// Configured creature height.
        height: f32,
    },
    /// The arena must have a positive area.
    #[error("arena dimensions {width}x{height} must be positive")]
    InvalidArena {
        /// Configured arena width.
        width: f32,
        /// Configured arena height.
        height: f32,
    },
    /// The spawn interval distribution could not be built.
    #[error("spawn distribution with mean {mean} and standard deviation {std_dev} is invalid")]
    InvalidSpawnDistribution {
        /// Mean seconds between spawns.
        mean: f64,
        /// Standard deviation of the spawn interval.
        std_dev: f64,
    },
    /// At least one level duration is required.
    #[error("level duration table must contain at least one entry")]
    EmptyLevelTable,
    /// Every level must last a positive, finite time.
    #[error("level duration {0} must be positive")]
    InvalidLevelDuration(f32),
    /// A score board must track at least one score.
    #[error("score board must hold at least one score")]
    InvalidScoreBoard,
    /// Reading or writing a parameter file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A parameter file could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
