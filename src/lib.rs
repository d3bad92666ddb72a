//! # Slugs - Arcade Trail Simulation
//!
//! The simulation core of a small arcade game. The player steers a segmented
//! creature (the runner) around an arena, laying a trail behind it, while
//! workers and layers spawn from the edges, wander, flee, eat trails and eat
//! each other.
//!
//! ## Features
//!
//! - Segmented bodies that grow a joint at every turn and flow forward
//! - Trail lines that are laid, extended, bitten, split and cleaned up
//! - Worker minds that wander between waypoints, follow trails and flee
//! - Gaussian spawn scheduling with per-species object pools
//! - Level progression that speeds every creature up
//! - Seedable randomness for reproducible worlds
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Tick orchestration, predation and collisions
//! - [`simulation::creature`] - Creature movement, turning and trails
//! - [`simulation::trails`] - The live and queued trail lines
//! - [`simulation::behavior`] - Worker movement strategies
//! - [`simulation::nest`] - Spawners and creature pools

/// Core simulation logic and data structures.
pub mod simulation {
    /// Movement strategies for computer-controlled creatures.
    pub mod behavior;
    /// Game time.
    pub mod clock;
    /// Creatures and the context they move in.
    pub mod creature;
    /// Errors raised while configuring the simulation.
    pub mod error;
    /// Points, boxes and the four cardinal directions.
    pub mod geometry;
    /// Directed trail lines and their generational arena.
    pub mod line;
    /// Direction heuristics and random placement.
    pub mod navigator;
    /// Per-species spawners.
    pub mod nest;
    /// Simulation parameters.
    pub mod params;
    /// Free-list object pools.
    ///
    /// The [`pool::Recycle`] trait is implemented by everything that is
    /// returned to a pool instead of being dropped.
    pub mod pool;
    /// Seedable random source.
    pub mod rng;
    /// Ranked best scores.
    pub mod score;
    /// Linked chains of body segments.
    pub mod segment;
    /// The set of live and queued trail lines.
    pub mod trails;
    /// The arena and its per-tick update.
    pub mod world;
}
