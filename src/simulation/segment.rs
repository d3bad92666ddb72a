//! Segmented creature bodies.
//!
//! A body is a chain of rectangular segments linked head to tail. Segments live
//! in a fixed arena owned by the body: slot 0 is always the head and the
//! remaining slots form a pool that is drawn from whenever the creature turns.
//! Links are arena indices, so no segment is ever allocated after the body is
//! built.

use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, Direction, Point};

/// Arena index of the head segment.
pub const HEAD: usize = 0;

/// One rectangular cell of a creature's body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    bounds: BoundingBox,
    direction: Option<Direction>,
    next: Option<usize>,
    previous: Option<usize>,
}

impl Segment {
    /// Positions the segment centred on `(x, y)` and sets its size.
    ///
    /// `width` is measured across the direction of travel and `height` along it.
    pub fn place(&mut self, x: f32, y: f32, width: f32, height: f32, direction: Direction) {
        if direction.is_horizontal() {
            self.bounds.set_size(height, width);
        } else {
            self.bounds.set_size(width, height);
        }

        self.bounds.move_to(x, y);
        self.direction = Some(direction);
    }

    /// Area covered by this segment.
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Centre of this segment.
    pub fn position(&self) -> Point {
        self.bounds.centre()
    }

    /// Direction this segment is facing, if it has been placed.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Arena index of the segment behind this one.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Arena index of the segment in front of this one.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Length of the segment along its direction of travel.
    ///
    /// An unplaced segment has no length.
    pub fn size(&self) -> f32 {
        match self.direction {
            Some(direction) if direction.is_horizontal() => self.bounds.width(),
            Some(_) => self.bounds.height(),
            None => 0.0,
        }
    }

    /// A segment is active once placed and until its size falls below zero.
    pub fn is_active(&self) -> bool {
        self.direction.is_some() && self.size() >= 0.0
    }

    /// Checks whether `point` lies within this segment.
    pub fn contains(&self, point: &Point) -> bool {
        self.bounds.contains(point)
    }

    /// Moves this segment as part of a body.
    ///
    /// A lone segment translates, the head of a longer body grows, the tail
    /// shrinks and interior segments stay where they are.
    fn advance(&mut self, distance: f32) {
        let Some(direction) = self.direction else {
            panic!("cannot move a segment that has not been placed");
        };

        match (self.previous.is_none(), self.next.is_none()) {
            (true, true) => self.bounds.translate(distance, direction),
            (true, false) => self.bounds.grow(distance, direction),
            (false, true) => self.bounds.shrink(distance, direction),
            (false, false) => {}
        }
    }

    fn clear_links(&mut self) {
        self.next = None;
        self.previous = None;
    }

    fn reset(&mut self) {
        *self = Segment::default();
    }
}

/// The doubly-linked chain of segments making up one creature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    segments: Vec<Segment>,
    tail: usize,
    count: usize,
}

impl Body {
    /// Creates a body able to hold up to `capacity` segments (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: vec![Segment::default(); capacity.max(1)],
            tail: HEAD,
            count: 1,
        }
    }

    /// The leading segment.
    pub fn head(&self) -> &Segment {
        &self.segments[HEAD]
    }

    /// The trailing segment.
    pub fn tail(&self) -> &Segment {
        &self.segments[self.tail]
    }

    /// Number of segments currently linked into the chain.
    pub fn len(&self) -> usize {
        self.count
    }

    /// A body always has at least its head, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Maximum number of segments this body can hold.
    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    /// Walks the chain from head to tail.
    pub fn iter(&self) -> Segments<'_> {
        Segments {
            segments: &self.segments,
            cursor: Some(HEAD),
        }
    }

    /// Sum of all linked segment sizes.
    pub fn length(&self) -> f32 {
        self.iter().map(Segment::size).sum()
    }

    /// Places the head segment. Only legal on a single-segment body.
    pub fn place_head(&mut self, x: f32, y: f32, width: f32, height: f32, direction: Direction) {
        assert!(self.count == 1, "cannot place a multi-segment creature");
        self.segments[HEAD].place(x, y, width, height, direction);
    }

    /// Points the head in a new direction without adding a joint.
    pub fn set_head_direction(&mut self, direction: Direction) {
        self.segments[HEAD].direction = Some(direction);
    }

    /// Splits the head `width` units behind its leading edge, linking a
    /// pooled segment in as the new second segment.
    ///
    /// Panics when every pooled segment is already in use.
    pub fn split_head(&mut self, width: f32) {
        let target = self.available_segment();
        let head = self.segments[HEAD];
        let Some(direction) = head.direction else {
            panic!("cannot split a head that has not been placed");
        };

        let mut front = head.bounds;
        let mut back = head.bounds;

        match direction {
            Direction::Left => {
                let split = front.left + width;
                back.left = split;
                front.right = split;
            }
            Direction::Right => {
                let split = front.right - width;
                back.right = split;
                front.left = split;
            }
            Direction::Up => {
                let split = front.top - width;
                back.top = split;
                front.bottom = split;
            }
            Direction::Down => {
                let split = front.bottom + width;
                back.bottom = split;
                front.top = split;
            }
        }

        self.segments[HEAD].bounds = front;
        self.segments[target].bounds = back;
        self.segments[target].direction = Some(direction);
        self.insert_after(HEAD, target);
        self.count += 1;

        if self.segments[target].next.is_none() {
            self.tail = target;
        }
    }

    /// Moves every linked segment by `distance` and retires the tail once it
    /// has shrunk past zero. Returns the length of what is left.
    pub fn advance(&mut self, distance: f32) -> f32 {
        let mut cursor = Some(HEAD);

        while let Some(index) = cursor {
            let segment = &mut self.segments[index];
            segment.advance(distance);
            cursor = segment.next;
        }

        if !self.segments[self.tail].is_active() {
            assert!(self.tail != HEAD, "head is inactive");

            let old_tail = self.tail;
            let Some(previous) = self.segments[old_tail].previous else {
                panic!("tail segment {old_tail} has no predecessor");
            };

            self.count -= 1;
            self.tail = previous;
            self.segments[previous].next = None;
            self.segments[old_tail].clear_links();
        }

        self.length()
    }

    /// Retracts the tail by `amount` along its direction.
    pub fn shrink_tail(&mut self, amount: f32) {
        let tail = &mut self.segments[self.tail];
        if let Some(direction) = tail.direction {
            tail.bounds.shrink(amount, direction);
        }
    }

    /// Collapses the body back to a single unplaced head.
    pub fn reset(&mut self) {
        for segment in &mut self.segments {
            segment.reset();
        }
        self.tail = HEAD;
        self.count = 1;
    }

    fn available_segment(&self) -> usize {
        (HEAD + 1..self.segments.len())
            .find(|&index| !self.segments[index].is_active())
            .unwrap_or_else(|| panic!("cannot add segment with no segments in pool"))
    }

    fn insert_after(&mut self, index: usize, inserted: usize) {
        let next = self.segments[index].next;
        assert!(next != Some(inserted), "segment {inserted} is already linked after {index}");

        self.segments[inserted].previous = Some(index);
        self.segments[inserted].next = next;
        if let Some(next) = next {
            self.segments[next].previous = Some(inserted);
        }
        self.segments[index].next = Some(inserted);
    }
}

/// Iterator over a body's segments, head first.
pub struct Segments<'a> {
    segments: &'a [Segment],
    cursor: Option<usize>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = &self.segments[self.cursor?];
        self.cursor = segment.next;
        Some(segment)
    }
}
