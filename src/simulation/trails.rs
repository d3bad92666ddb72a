//! The set of trail lines in a world.
//!
//! New lines are queued and only merged into the live set at flush points, so
//! that code walking the live set never sees it change underneath it.

use tracing::debug;

use super::creature::CreatureId;
use super::geometry::BoundingBox;
use super::line::{Line, LineId, LinePool};

/// What a sweep over the live lines did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Feeding {
    /// At least one line was touched.
    pub touched: bool,
    /// At least one line was only partly eaten and survives.
    pub bitten: bool,
    /// Line touched last, or `None` when the last touched line was swallowed whole.
    pub last_bitten: Option<LineId>,
}

/// Live and queued trail lines, backed by a recycling [`LinePool`].
#[derive(Debug, Clone, Default)]
pub struct Trails {
    pool: LinePool,
    live: Vec<LineId>,
    pending: Vec<LineId>,
}

impl Trails {
    /// Creates an empty set of trails.
    pub fn new() -> Self {
        Self {
            pool: LinePool::with_capacity(64),
            live: Vec::with_capacity(32),
            pending: Vec::with_capacity(8),
        }
    }

    /// Looks up a line by handle, whether live or still queued.
    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.pool.get(id)
    }

    /// Mutable lookup of a line by handle.
    pub fn get_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.pool.get_mut(id)
    }

    /// Checks whether `owner` is still attached to the line behind `id`.
    pub fn is_owned_by(&self, id: LineId, owner: CreatureId) -> bool {
        self.get(id).is_some_and(|line| line.owner() == Some(owner))
    }

    /// Stores a new line and queues it for the next flush.
    pub fn lay(&mut self, line: Line) -> LineId {
        let id = self.pool.obtain(line);
        self.pending.push(id);
        id
    }

    /// Moves every queued line into the live set.
    pub fn flush(&mut self) {
        self.live.append(&mut self.pending);
    }

    /// Iterates over the live lines.
    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        self.live.iter().filter_map(|&id| self.pool.get(id))
    }

    /// Number of live lines.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` when no line is live.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of lines queued for the next flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Checks whether `collider` touches any live line not owned by `ignored`.
    pub fn hits(&self, collider: &BoundingBox, ignored: CreatureId) -> bool {
        self.iter()
            .any(|line| line.owner() != Some(ignored) && collider.intersects(&line.bounding_box()))
    }

    /// Eats every live line under `sweep`.
    ///
    /// Lines wholly inside the sweep are removed and recycled. Lines it only
    /// overlaps are cut, with any split-off piece queued as a new line.
    pub fn eat(&mut self, sweep: &BoundingBox) -> Feeding {
        let mut feeding = Feeding::default();
        let mut index = 0;

        while index < self.live.len() {
            let id = self.live[index];
            let Some(line) = self.pool.get_mut(id) else {
                self.live.remove(index);
                continue;
            };

            let bounds = line.bounding_box();
            if !sweep.intersects(&bounds) {
                index += 1;
                continue;
            }

            feeding.touched = true;

            if sweep.contains_box(&bounds) {
                self.live.remove(index);
                self.pool.free(id);
                feeding.last_bitten = None;
                continue;
            }

            if let Some(piece) = line.remove_intersection(sweep) {
                debug!(?piece, "line split");
                let piece_id = self.pool.obtain(piece);
                self.pending.push(piece_id);
            }

            feeding.bitten = true;
            feeding.last_bitten = Some(id);
            index += 1;
        }

        feeding
    }

    /// Recycles unowned lines shorter than `min_length`. Returns how many went.
    pub fn remove_short(&mut self, min_length: f32) -> usize {
        let pool = &mut self.pool;
        let before = self.live.len();

        self.live.retain(|&id| {
            let is_nub = pool
                .get(id)
                .is_none_or(|line| line.owner().is_none() && line.length() < min_length);
            if is_nub {
                pool.free(id);
            }
            !is_nub
        });

        before - self.live.len()
    }

    /// Recycles every live and queued line.
    pub fn clear(&mut self) {
        for id in self.live.drain(..).chain(self.pending.drain(..)) {
            self.pool.free(id);
        }
    }

    /// The backing arena.
    pub fn pool(&self) -> &LinePool {
        &self.pool
    }
}
