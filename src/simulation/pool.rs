//! Free-list object pools.
//!
//! Entities are recycled rather than dropped so that a running game settles
//! into a steady state with no per-frame allocation.

/// Types that can be returned to a [`Pool`] and handed out again later.
pub trait Recycle {
    /// Clears every identity-bearing field back to its initial state.
    fn recycle(&mut self);
}

/// A stack of idle objects of one kind.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    idle: Vec<T>,
    max_idle: usize,
}

impl<T: Recycle> Pool<T> {
    /// Creates a pool that keeps at most `max_idle` objects around.
    pub fn new(initial_capacity: usize, max_idle: usize) -> Self {
        Self {
            idle: Vec::with_capacity(initial_capacity),
            max_idle,
        }
    }

    /// Takes an idle object, or builds a fresh one with `make` when none is left.
    pub fn acquire(&mut self, make: impl FnOnce() -> T) -> T {
        self.idle.pop().unwrap_or_else(make)
    }

    /// Recycles `item` and keeps it for reuse. Items beyond `max_idle` are dropped.
    pub fn release(&mut self, mut item: T) {
        if self.idle.len() < self.max_idle {
            item.recycle();
            self.idle.push(item);
        }
    }

    /// Number of objects waiting to be reused.
    pub fn idle(&self) -> usize {
        self.idle.len()
    }
}
