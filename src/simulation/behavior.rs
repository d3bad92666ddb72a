//! Movement strategies for computer-controlled creatures.
//!
//! Each behaviour proposes a heading for the creature it drives; the
//! creature's [`Mind`] decides which one is active and applies the turn.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::creature::{Creature, Surroundings};
use super::geometry::{Direction, Point};
use super::line::LineId;
use super::navigator::Navigator;
use super::params::WorkerParams;
use super::rng::SimRng;
use super::segment::Segment;
use super::trails::{Feeding, Trails};

/// Fewest waypoints a wandering creature visits.
pub const MIN_WAYPOINTS: u32 = 2;
/// Most waypoints a wandering creature visits.
pub const MAX_WAYPOINTS: u32 = 5;

/// Visits a random number of random points in turn, then carries straight on.
///
/// Each leg is an L-shaped dog-leg: first along the axis with the larger
/// displacement to a halfway point, then straight at the waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowWaypoints {
    total: u32,
    current: u32,
    waypoint: Point,
    halfway: Point,
    to_halfway: bool,
    first_set: bool,
}

impl FollowWaypoints {
    /// Creates a route with a random number of waypoints.
    pub fn new(rng: &mut SimRng) -> Self {
        let mut waypoints = Self::default();
        waypoints.rearm(rng);
        waypoints
    }

    /// Forgets the current route and draws a new waypoint count.
    pub fn rearm(&mut self, rng: &mut SimRng) {
        *self = Self {
            total: rng.random_range(MIN_WAYPOINTS..=MAX_WAYPOINTS),
            ..Self::default()
        };
    }

    /// Number of waypoints on this route.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// One-based index of the waypoint being headed for.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Every waypoint has been reached.
    pub fn is_finished(&self) -> bool {
        self.current >= self.total
    }

    /// Waypoint currently headed for.
    pub fn waypoint(&self) -> Point {
        self.waypoint
    }

    /// Intermediate corner of the current dog-leg.
    pub fn halfway(&self) -> Point {
        self.halfway
    }

    /// Whether the creature is still on the first leg of the dog-leg.
    pub fn is_heading_halfway(&self) -> bool {
        self.to_halfway
    }

    /// Chooses a heading for the creature whose head is `head`.
    ///
    /// A route that was never armed draws its waypoint count first.
    pub fn think(
        &mut self,
        head: &Segment,
        navigator: &Navigator,
        rng: &mut SimRng,
    ) -> Option<Direction> {
        if self.total == 0 {
            self.rearm(rng);
        }
        if self.is_finished() {
            return None;
        }

        let start = head.position();
        if !self.first_set {
            self.pick_next_destination(start, navigator, rng);
        }

        let mut target = if self.to_halfway {
            self.halfway
        } else {
            self.waypoint
        };

        if head.contains(&target) {
            if self.to_halfway {
                self.to_halfway = false;
            } else {
                self.pick_next_destination(start, navigator, rng);
            }
            target = self.waypoint;
        }

        (self.current <= self.total).then(|| Navigator::navigate(start, target))
    }

    /// Replots the dog-leg to the current waypoint from `position`.
    pub fn recalculate_course(&mut self, position: Point) {
        if !self.is_finished() {
            self.calculate_halfway_point(position);
        }
    }

    fn pick_next_destination(&mut self, position: Point, navigator: &Navigator, rng: &mut SimRng) {
        self.first_set = true;
        self.current += 1;

        if self.current > self.total {
            self.to_halfway = false;
            return;
        }

        self.waypoint = navigator.random_point(rng);
        self.calculate_halfway_point(position);
    }

    fn calculate_halfway_point(&mut self, position: Point) {
        let x_magnitude = (self.waypoint.x - position.x).abs();
        let y_magnitude = (self.waypoint.y - position.y).abs();

        self.halfway = self.waypoint;
        self.to_halfway = true;

        if x_magnitude >= y_magnitude {
            self.halfway.y = position.y;
        } else {
            self.halfway.x = position.x;
        }
    }
}

/// Snaps onto a trail line and follows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowLine {
    line: Option<LineId>,
    centred: bool,
    threshold: f32,
}

impl FollowLine {
    /// Creates the behaviour for a creature of the given width.
    pub fn new(width: f32) -> Self {
        Self {
            line: None,
            centred: false,
            threshold: width / 8.0,
        }
    }

    /// Line being followed.
    pub fn line(&self) -> Option<LineId> {
        self.line
    }

    /// Assigns (or clears) the line to follow.
    pub fn set_line(&mut self, line: Option<LineId>) {
        self.line = line;
        self.centred = false;
    }

    /// Whether the followed line still exists with a non-negative length.
    pub fn has_line(&self, trails: &Trails) -> bool {
        self.line
            .and_then(|id| trails.get(id))
            .is_some_and(|line| line.length() >= 0.0)
    }

    /// Whether the creature has lined up with the trail.
    pub fn is_centred(&self) -> bool {
        self.centred
    }

    /// Returns the line's direction once the head is within a small threshold
    /// of the line's axis.
    ///
    /// Panics if no live line has been assigned.
    pub fn think(&mut self, head: &Segment, trails: &Trails) -> Option<Direction> {
        let Some(id) = self.line else {
            panic!("cannot follow a line that was never assigned");
        };
        let Some(line) = trails.get(id) else {
            panic!("cannot follow recycled line {id:?}");
        };

        let direction = line.direction();

        if !self.centred {
            let position = head.position();
            let start = line.start();
            let difference = if direction.is_horizontal() {
                (position.y - start.y).abs()
            } else {
                (position.x - start.x).abs()
            };

            self.centred = difference <= self.threshold;
        }

        self.centred.then_some(direction)
    }

    fn reset(&mut self) {
        self.set_line(None);
    }
}

/// Flees from a frightening creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFrom {
    direction: Option<Direction>,
}

impl RunFrom {
    /// Picks the escape heading from `scarer` for a creature at `position`
    /// currently heading in `heading`. Never chooses a reversal.
    pub fn set_scarer(&mut self, position: Point, heading: Direction, scarer: Point) {
        let pair = Navigator::navigate_away_from(position, scarer);

        self.direction = Some(if pair.primary.is_opposite(heading) {
            pair.secondary
        } else {
            pair.primary
        });
    }

    /// Escape heading, once a scarer has been set.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Panics if no scarer has been set.
    pub fn think(&self) -> Direction {
        match self.direction {
            Some(direction) => direction,
            None => panic!("nothing to run from"),
        }
    }

    fn reset(&mut self) {
        self.direction = None;
    }
}

/// Which behaviour a [`Mind`] is delegating to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    /// Following waypoints.
    Wandering,
    /// Following a trail line.
    Following,
    /// Running from another creature.
    Fleeing,
}

/// Worker decision making: wander, follow bitten trails, flee from danger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mind {
    temperament: WorkerParams,
    wander: FollowWaypoints,
    follow: FollowLine,
    flee: RunFrom,
    activity: Activity,
    scared: bool,
}

impl Mind {
    /// Creates a calm, wandering mind.
    pub fn new(temperament: WorkerParams, width: f32) -> Self {
        Self {
            temperament,
            wander: FollowWaypoints::default(),
            follow: FollowLine::new(width),
            flee: RunFrom::default(),
            activity: Activity::Wandering,
            scared: false,
        }
    }

    /// Active behaviour.
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Whether the creature is currently fleeing something.
    pub fn is_scared(&self) -> bool {
        self.scared
    }

    /// The waypoint route.
    pub fn waypoints(&self) -> &FollowWaypoints {
        &self.wander
    }

    /// The trail-following state.
    pub fn follow(&self) -> &FollowLine {
        &self.follow
    }

    /// Draws a fresh waypoint route for a new life.
    pub fn rearm(&mut self, rng: &mut SimRng) {
        self.wander.rearm(rng);
    }

    /// Updates fear, picks the active behaviour and turns the creature.
    pub fn think(&mut self, creature: &mut Creature, world: &mut Surroundings<'_>) {
        if self.scared {
            self.check_if_safe(creature, world);
        } else {
            self.check_if_scared(creature, world);
        }

        if self.activity == Activity::Following && !self.follow.has_line(world.trails) {
            self.follow.set_line(None);
            creature.set_speed(creature.traits().speed);
            self.activity = Activity::Wandering;
        }

        let turn = match self.activity {
            Activity::Wandering => self.wander.think(creature.head(), world.navigator, world.rng),
            Activity::Following => self.follow.think(creature.head(), world.trails),
            Activity::Fleeing => Some(self.flee.think()),
        };

        if let Some(direction) = turn {
            creature.turn(direction);
        }
    }

    /// Reacts to the lines eaten on the last move.
    ///
    /// A calm worker that bit into a line slows down and follows it.
    pub fn after_feeding(&mut self, creature: &mut Creature, feeding: Feeding) {
        if !feeding.touched {
            return;
        }

        if self.scared {
            if feeding.last_bitten.is_none() {
                self.follow.set_line(None);
            }
            return;
        }

        self.follow.set_line(feeding.last_bitten);

        if feeding.bitten {
            self.activity = Activity::Following;
            creature.set_speed(creature.traits().speed * self.temperament.following_speed_factor);
        }
    }

    fn check_if_scared(&mut self, creature: &mut Creature, world: &Surroundings<'_>) {
        let position = creature.head().position();

        let scarer = world
            .neighbours
            .iter()
            .filter(|other| creature.species().fears(other.species()))
            .map(|other| other.head().position())
            .find(|other| position.distance(other) <= self.temperament.scare_distance);

        if let Some(scarer) = scarer {
            self.scared = true;
            creature.set_speed(creature.traits().speed * self.temperament.scared_speed_factor);
            self.follow.set_line(None);
            self.flee.set_scarer(position, creature.heading(), scarer);
            self.activity = Activity::Fleeing;
        }
    }

    fn check_if_safe(&mut self, creature: &mut Creature, world: &Surroundings<'_>) {
        let position = creature.head().position();

        let threatened = world
            .neighbours
            .iter()
            .filter(|other| creature.species().fears(other.species()))
            .any(|other| {
                position.distance(&other.head().position()) <= self.temperament.safe_distance
            });

        if !threatened {
            self.scared = false;
            creature.set_speed(creature.traits().speed);
            self.wander.recalculate_course(position);
            self.activity = Activity::Wandering;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.wander = FollowWaypoints::default();
        self.follow.reset();
        self.flee.reset();
        self.activity = Activity::Wandering;
        self.scared = false;
    }
}
