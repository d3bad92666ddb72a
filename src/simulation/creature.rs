//! Creatures: segmented bodies that move, turn, lay trails and eat.
//!
//! Every species shares this one type. What a creature can do is decided by
//! its [`Traits`] (whether it lays lines, eats lines, can be eaten, has a
//! worker [`Mind`]) rather than by which species it is.

use serde::{Deserialize, Serialize};

use super::behavior::Mind;
use super::error::SimulationError;
use super::geometry::{BoundingBox, Direction, Point};
use super::line::{Line, LineId};
use super::navigator::Navigator;
use super::params::WorkerParams;
use super::pool::Recycle;
use super::rng::SimRng;
use super::segment::{Body, Segment};
use super::trails::Trails;

/// Unique identity of one creature life. A recycled creature gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

/// Hands out fresh [`CreatureId`]s.
#[derive(Debug, Clone, Default)]
pub struct CreatureIds {
    next: u64,
}

impl CreatureIds {
    /// Returns an id that has never been issued before.
    pub fn issue(&mut self) -> CreatureId {
        let id = CreatureId(self.next);
        self.next += 1;
        id
    }
}

/// The kinds of creature in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// The player.
    Runner,
    /// Small line-eating creature that flees from everything else.
    Worker,
    /// Line-laying predator.
    Layer,
}

impl Species {
    /// Whether a creature of this species is frightened by one of `other`.
    ///
    /// Creatures are never afraid of their own kind.
    pub fn fears(self, other: Species) -> bool {
        self != other
    }

    /// Whether a creature of this species may eat one of `other`.
    ///
    /// Creatures never eat their own kind.
    pub fn preys_on(self, other: Species) -> bool {
        self != other
    }
}

/// Fixed characteristics of a creature, resolved from the world parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    /// Size across the direction of travel.
    pub width: f32,
    /// Total length along the direction of travel.
    pub height: f32,
    /// Base speed in world units per second.
    pub speed: f32,
    /// Other creatures may eat this one.
    pub can_be_eaten: bool,
    /// This creature eats the edible creatures its head touches.
    pub can_eat_creatures: bool,
    /// Lays a trail line behind it.
    pub lays_lines: bool,
    /// Cleans up any line it passes over.
    pub eats_lines: bool,
    /// Worker temperament; `Some` gives the creature a [`Mind`].
    pub temperament: Option<WorkerParams>,
}

impl Traits {
    /// Checks that the shape describes a buildable creature.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let valid = self.width > 0.0 && self.width.is_finite() && self.width <= self.height;
        if valid {
            Ok(())
        } else {
            Err(SimulationError::InvalidCreatureShape {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Largest number of segments a body of this shape can be split into.
    pub fn max_segments(&self) -> usize {
        (self.height / self.width).floor().max(1.0) as usize
    }
}

/// Read-only view of every creature except the one currently moving.
#[derive(Debug, Clone, Copy)]
pub struct Neighbours<'a> {
    before: &'a [Creature],
    after: &'a [Creature],
}

impl<'a> Neighbours<'a> {
    /// Creatures on either side of the moving one.
    pub fn new(before: &'a [Creature], after: &'a [Creature]) -> Self {
        Self { before, after }
    }

    /// A view with nobody else in it.
    pub fn none() -> Self {
        Self {
            before: &[],
            after: &[],
        }
    }

    /// Iterates in world order, skipping the moving creature.
    pub fn iter(self) -> impl Iterator<Item = &'a Creature> {
        self.before.iter().chain(self.after.iter())
    }
}

/// Everything a creature may look at or change while it moves.
pub struct Surroundings<'a> {
    /// Arena width.
    pub width: f32,
    /// Arena height.
    pub height: f32,
    /// The other creatures.
    pub neighbours: Neighbours<'a>,
    /// Trail lines, live and queued.
    pub trails: &'a mut Trails,
    /// Direction heuristics and random points for the arena.
    pub navigator: &'a Navigator,
    /// Random source.
    pub rng: &'a mut SimRng,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct Trail {
    line: Option<LineId>,
    anchor: Point,
    anchor_set: bool,
}

/// A creature in the world.
#[derive(Debug, Clone)]
pub struct Creature {
    id: CreatureId,
    species: Species,
    traits: Traits,
    max_segments: usize,
    growth_size: f32,
    body: Body,
    speed: f32,
    base_speed: f32,
    speed_multiplier: f32,
    distance: f32,
    last_move: BoundingBox,
    has_entered_world: bool,
    trail: Option<Trail>,
    mind: Option<Mind>,
}

impl Creature {
    /// Builds a creature after checking that its shape is valid.
    pub fn new(id: CreatureId, species: Species, traits: Traits) -> Result<Self, SimulationError> {
        traits.validate()?;
        Ok(Self::from_traits(id, species, traits))
    }

    /// Builds a creature from traits that have already been validated.
    pub(crate) fn from_traits(id: CreatureId, species: Species, traits: Traits) -> Self {
        debug_assert!(traits.validate().is_ok(), "unvalidated creature traits");

        let max_segments = traits.max_segments();

        Self {
            id,
            species,
            traits,
            max_segments,
            growth_size: 2.0 * traits.width,
            body: Body::with_capacity(max_segments),
            speed: traits.speed,
            base_speed: traits.speed,
            speed_multiplier: 1.0,
            distance: 0.0,
            last_move: BoundingBox::default(),
            has_entered_world: false,
            trail: traits.lays_lines.then(Trail::default),
            mind: traits
                .temperament
                .map(|temperament| Mind::new(temperament, traits.width)),
        }
    }

    /// Gives a pooled creature a fresh identity for its next life.
    pub fn prepare(&mut self, id: CreatureId, rng: &mut SimRng) {
        self.id = id;
        if let Some(mind) = self.mind.as_mut() {
            mind.rearm(rng);
        }
    }

    /// Identity of this life.
    pub fn id(&self) -> CreatureId {
        self.id
    }

    /// Species of this creature.
    pub fn species(&self) -> Species {
        self.species
    }

    /// Fixed characteristics.
    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    /// Size across the direction of travel.
    pub fn width(&self) -> f32 {
        self.traits.width
    }

    /// Full body length.
    pub fn height(&self) -> f32 {
        self.traits.height
    }

    /// Largest number of segments.
    pub fn max_segments(&self) -> usize {
        self.max_segments
    }

    /// The segment chain.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Leading segment.
    pub fn head(&self) -> &Segment {
        self.body.head()
    }

    /// Segments linked into the body right now.
    pub fn segment_count(&self) -> usize {
        self.body.len()
    }

    /// Iterates over the segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    /// Direction the head is facing.
    ///
    /// Panics if the creature has never been placed.
    pub fn heading(&self) -> Direction {
        match self.body.head().direction() {
            Some(direction) => direction,
            None => panic!("creature {:?} has not been placed", self.id),
        }
    }

    /// Current speed (base speed times multiplier).
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current speed multiplier.
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Sets the base speed, keeping the current multiplier.
    pub fn set_speed(&mut self, speed: f32) {
        self.base_speed = speed;
        self.speed = speed * self.speed_multiplier;
    }

    /// Sets the multiplier and recomputes the current speed.
    pub fn set_speed_multiplier(&mut self, speed_multiplier: f32) {
        self.speed_multiplier = speed_multiplier;
        self.speed = self.base_speed * speed_multiplier;
    }

    /// Other creatures may eat this one.
    pub fn can_be_eaten(&self) -> bool {
        self.traits.can_be_eaten
    }

    /// This creature eats creatures it touches.
    pub fn can_eat_creatures(&self) -> bool {
        self.traits.can_eat_creatures
    }

    /// Whether the head has been strictly inside the arena since spawning.
    pub fn has_entered_world(&self) -> bool {
        self.has_entered_world
    }

    /// Distance covered on the last move.
    pub fn last_move_distance(&self) -> f32 {
        self.distance
    }

    /// Head box grown by the last move's distance in the direction of travel.
    pub fn last_move(&self) -> &BoundingBox {
        &self.last_move
    }

    /// Handle of the trail line this creature last laid, if it lays lines.
    ///
    /// The creature only still owns it while [`Trails::is_owned_by`] agrees.
    pub fn line(&self) -> Option<LineId> {
        self.trail.and_then(|trail| trail.line)
    }

    /// Worker mind, for creatures that have one.
    pub fn mind(&self) -> Option<&Mind> {
        self.mind.as_ref()
    }

    /// The body has room to add a joint and the head is long enough to host it.
    pub fn can_grow(&self) -> bool {
        self.body.len() < self.max_segments && self.head().size() >= self.growth_size
    }

    /// Positions a single-segment creature so its leading edge sits at `(x, y)`.
    pub fn place(&mut self, x: f32, y: f32, direction: Direction) {
        let offset = self.traits.height / 2.0;
        let (x, y) = match direction {
            Direction::Right => (x - offset, y),
            Direction::Left => (x + offset, y),
            Direction::Up => (x, y - offset),
            Direction::Down => (x, y + offset),
        };

        self.body
            .place_head(x, y, self.traits.width, self.traits.height, direction);
        self.refresh_anchor();
    }

    /// Turns the head a quarter turn to face `direction`.
    ///
    /// Turns along the current axis are ignored. A multi-segment creature adds a
    /// joint when it turns and refuses to turn until its head is long enough.
    /// Returns whether the creature turned.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction.is_horizontal() == self.heading().is_horizontal() {
            return false;
        }

        if self.max_segments > 1 {
            if !self.can_grow() {
                return false;
            }
            self.body.split_head(self.traits.width);
        }

        self.body.set_head_direction(direction);
        true
    }

    /// Runs one movement step of `time` seconds.
    ///
    /// Thinks, moves the body, then lays or extends the trail and eats any
    /// line passed over, depending on the creature's traits.
    pub fn step(&mut self, time: f32, world: &mut Surroundings<'_>) {
        if self.trail.is_some_and(|trail| !trail.anchor_set) {
            self.refresh_anchor();
        }
        let previous_anchor = self.trail.map(|trail| trail.anchor);

        self.think(world);
        self.advance(time, world.width, world.height);

        if let Some(previous_anchor) = previous_anchor {
            self.lay_trail(previous_anchor, world.trails);
        }

        if self.traits.eats_lines {
            self.eat_lines(world.trails);
        }
    }

    /// Moves the body without thinking or touching any trail.
    pub fn advance(&mut self, time: f32, arena_width: f32, arena_height: f32) {
        let direction = self.heading();

        self.distance = self.speed * time;
        self.last_move = *self.head().bounds();
        self.last_move.grow(self.distance, direction);

        let length = self.body.advance(self.distance);

        // turning slowly accumulates length through rounding
        if length > self.traits.height {
            self.body.shrink_tail(length - self.traits.height);
        }

        if !self.has_entered_world {
            let p = self.head().position();
            self.has_entered_world =
                p.x > 0.0 && p.x < arena_width && p.y > 0.0 && p.y < arena_height;
        }
    }

    /// Head box minus the part that overlaps the line this creature is laying.
    pub fn collision_box(&self, epsilon: f32) -> BoundingBox {
        let mut collider = *self.head().bounds();
        collider.shrink(self.traits.width / 2.0 + epsilon, self.heading());
        collider
    }

    fn think(&mut self, world: &mut Surroundings<'_>) {
        if let Some(mut mind) = self.mind.take() {
            mind.think(self, world);
            self.mind = Some(mind);
        }
    }

    fn lay_trail(&mut self, previous_anchor: Point, trails: &mut Trails) {
        self.refresh_anchor();

        let id = self.id;
        let direction = self.heading();
        let distance = self.distance;
        let Some(trail) = self.trail.as_mut() else {
            return;
        };

        let owned = trail.line.filter(|&line| trails.is_owned_by(line, id));

        if let Some(line) = owned {
            if let Some(line) = trails.get_mut(line) {
                if line.direction() == direction {
                    line.extend(distance);
                    return;
                }
                line.abandon();
            }
        }

        let line = Line::new(previous_anchor, trail.anchor, direction).owned_by(id);
        trail.line = Some(trails.lay(line));
    }

    fn eat_lines(&mut self, trails: &mut Trails) {
        let feeding = trails.eat(&self.last_move);

        if let Some(mut mind) = self.mind.take() {
            mind.after_feeding(self, feeding);
            self.mind = Some(mind);
        }

        // later movers in this tick must see any split-off pieces
        trails.flush();
    }

    /// Trails are laid from half a width behind the leading edge, which is
    /// ahead of the centre while the head is still growing.
    fn refresh_anchor(&mut self) {
        let head = self.body.head();
        let Some(direction) = head.direction() else {
            return;
        };

        let mut anchor = head.position();
        let offset = (head.size() - self.traits.width) / 2.0;
        if offset > 0.0 {
            anchor.shift(offset, direction);
        }

        if let Some(trail) = self.trail.as_mut() {
            trail.anchor = anchor;
            trail.anchor_set = true;
        }
    }
}

impl Recycle for Creature {
    fn recycle(&mut self) {
        self.body.reset();
        self.distance = 0.0;
        self.last_move = BoundingBox::default();
        self.has_entered_world = false;
        self.speed_multiplier = 1.0;
        self.base_speed = self.traits.speed;
        self.speed = self.traits.speed;

        if let Some(trail) = self.trail.as_mut() {
            *trail = Trail::default();
        }
        if let Some(mind) = self.mind.as_mut() {
            mind.reset();
        }
    }
}
