//! Trail lines and the arena that recycles them.
//!
//! A line runs from `start` to `end` along a single cardinal direction. The
//! creature laying it is recorded as its owner until the creature turns away
//! or the tip of the line is bitten off.

use serde::{Deserialize, Serialize};

use super::creature::CreatureId;
use super::geometry::{BoundingBox, Direction, Point};

/// A straight, directed trail segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Point,
    end: Point,
    direction: Direction,
    owner: Option<CreatureId>,
}

impl Line {
    /// Creates an unowned line from `start` to `end` heading in `direction`.
    pub fn new(start: Point, end: Point, direction: Direction) -> Self {
        Self {
            start,
            end,
            direction,
            owner: None,
        }
    }

    /// Builder-style helper that records the laying creature.
    #[must_use]
    pub fn owned_by(mut self, owner: CreatureId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Point the line was laid from.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Point the line was laid to.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Direction from start to end.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Creature still attached to this line, if any.
    pub fn owner(&self) -> Option<CreatureId> {
        self.owner
    }

    /// Detaches the line from its owner. The line stays in the world as an obstacle.
    pub fn abandon(&mut self) {
        self.owner = None;
    }

    /// Pushes the end point `amount` further along the line's direction.
    pub fn extend(&mut self, amount: f32) {
        self.end.shift(amount, self.direction);
    }

    /// Signed length measured along the direction of travel.
    ///
    /// Goes negative when a cut retracts the start past the end.
    pub fn length(&self) -> f32 {
        match self.direction {
            Direction::Up => self.end.y - self.start.y,
            Direction::Down => self.start.y - self.end.y,
            Direction::Left => self.start.x - self.end.x,
            Direction::Right => self.end.x - self.start.x,
        }
    }

    /// Degenerate box spanning the line.
    pub fn bounding_box(&self) -> BoundingBox {
        match self.direction {
            Direction::Right => {
                BoundingBox::new(self.start.x, self.end.x, self.start.y, self.start.y)
            }
            Direction::Left => {
                BoundingBox::new(self.end.x, self.start.x, self.start.y, self.start.y)
            }
            Direction::Up => BoundingBox::new(self.start.x, self.start.x, self.end.y, self.start.y),
            Direction::Down => {
                BoundingBox::new(self.start.x, self.start.x, self.start.y, self.end.y)
            }
        }
    }

    /// Removes the part of this line covered by `sweep`.
    ///
    /// - If `sweep` covers the start, the start is retracted to the far edge of the box.
    /// - If it covers the end, the end is retracted to the near edge and the
    ///   owner (if any) loses the line.
    /// - Otherwise the box bisects the line: this line is cut to begin at the far
    ///   edge of the box and the piece from the old start to the near edge is
    ///   returned so the caller can add it to the world.
    ///
    /// `sweep` must not wholly contain the line; callers remove such lines outright.
    pub fn remove_intersection(&mut self, sweep: &BoundingBox) -> Option<Line> {
        if sweep.contains(&self.start) {
            match self.direction {
                Direction::Left => self.start.x = sweep.left,
                Direction::Right => self.start.x = sweep.right,
                Direction::Up => self.start.y = sweep.top,
                Direction::Down => self.start.y = sweep.bottom,
            }
            None
        } else if sweep.contains(&self.end) {
            match self.direction {
                Direction::Left => self.end.x = sweep.right,
                Direction::Right => self.end.x = sweep.left,
                Direction::Up => self.end.y = sweep.bottom,
                Direction::Down => self.end.y = sweep.top,
            }
            self.owner = None;
            None
        } else {
            let start = self.start;
            let (cut_end, new_start) = match self.direction {
                Direction::Left => (
                    Point::new(sweep.right, start.y),
                    Point::new(sweep.left, start.y),
                ),
                Direction::Right => (
                    Point::new(sweep.left, start.y),
                    Point::new(sweep.right, start.y),
                ),
                Direction::Up => (
                    Point::new(start.x, sweep.bottom),
                    Point::new(start.x, sweep.top),
                ),
                Direction::Down => (
                    Point::new(start.x, sweep.top),
                    Point::new(start.x, sweep.bottom),
                ),
            };

            self.start = new_start;
            Some(Line::new(start, cut_end, self.direction))
        }
    }
}

/// Generational handle to a line stored in a [`LinePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId {
    slot: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    line: Line,
    generation: u32,
    occupied: bool,
}

/// Arena of line slots. Released slots are reused by later lines; their
/// generation is bumped so that outstanding [`LineId`]s go stale.
#[derive(Debug, Clone, Default)]
pub struct LinePool {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl LinePool {
    /// Creates an empty pool with room for `capacity` lines.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Stores `line` in a free slot and returns its handle.
    pub fn obtain(&mut self, line: Line) -> LineId {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.line = line;
            entry.occupied = true;
            LineId {
                slot,
                generation: entry.generation,
            }
        } else {
            let slot = self.slots.len() as u32;
            self.slots.push(Slot {
                line,
                generation: 0,
                occupied: true,
            });
            LineId {
                slot,
                generation: 0,
            }
        }
    }

    /// Returns the line's slot to the free list. Stale handles are ignored.
    pub fn free(&mut self, id: LineId) {
        if let Some(entry) = self.slot_mut(id) {
            entry.line.owner = None;
            entry.occupied = false;
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(id.slot);
        }
    }

    /// Looks up a live line.
    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.slots
            .get(id.slot as usize)
            .filter(|entry| entry.occupied && entry.generation == id.generation)
            .map(|entry| &entry.line)
    }

    /// Looks up a live line for modification.
    pub fn get_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.slot_mut(id).map(|entry| &mut entry.line)
    }

    /// Number of lines currently handed out.
    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn slot_mut(&mut self, id: LineId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|entry| entry.occupied && entry.generation == id.generation)
    }
}
