//! Axis-aligned geometry for the arena.
//!
//! Every shape in the world is a rectangle aligned to one of the four cardinal
//! directions, so the only primitives needed are points, boxes and directions.
//! The y axis points up: `top >= bottom`.

use serde::{Deserialize, Serialize};

/// One of the four cardinal directions a creature or line can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards positive y.
    Up,
    /// Towards negative y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns `true` for `Left` and `Right`.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Returns `true` for `Up` and `Down`.
    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// The direction pointing the other way along the same axis.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Checks whether `other` is a 180 degree reversal of this direction.
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Converts a scalar distance into a signed displacement along this direction.
    ///
    /// The displacement is negative for `Left` and `Down`.
    pub fn displacement(self, distance: f32) -> f32 {
        match self {
            Direction::Left | Direction::Down => -distance,
            Direction::Up | Direction::Right => distance,
        }
    }
}

/// A primary direction and a fallback secondary direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionPair {
    /// Preferred direction.
    pub primary: Direction,
    /// Direction to use when the primary one is not allowed.
    pub secondary: Direction,
}

/// A position in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (up is positive).
    pub y: f32,
}

impl Point {
    /// Creates a point at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves this point `distance` units in `direction`.
    pub fn shift(&mut self, distance: f32, direction: Direction) {
        if direction.is_horizontal() {
            self.x += direction.displacement(distance);
        } else {
            self.y += direction.displacement(distance);
        }
    }
}

/// Axis-aligned rectangle stored by its four edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x.
    pub left: f32,
    /// Largest x.
    pub right: f32,
    /// Largest y.
    pub top: f32,
    /// Smallest y.
    pub bottom: f32,
}

impl BoundingBox {
    /// Creates a box from its edges.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// The point in the middle of the box.
    pub fn centre(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.bottom + self.height() / 2.0,
        )
    }

    /// Resizes the box keeping its bottom-left corner fixed.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.right = self.left + width;
        self.top = self.bottom + height;
    }

    /// Moves the box so that it is centred on `(x, y)`, keeping its size.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let half_width = self.width() / 2.0;
        let half_height = self.height() / 2.0;

        self.left = x - half_width;
        self.right = x + half_width;
        self.top = y + half_height;
        self.bottom = y - half_height;
    }

    /// Translates both edges along `direction`.
    pub fn translate(&mut self, amount: f32, direction: Direction) {
        match direction {
            Direction::Left => {
                self.left -= amount;
                self.right -= amount;
            }
            Direction::Right => {
                self.left += amount;
                self.right += amount;
            }
            Direction::Up => {
                self.bottom += amount;
                self.top += amount;
            }
            Direction::Down => {
                self.bottom -= amount;
                self.top -= amount;
            }
        }
    }

    /// Pushes the edge facing `direction` outwards by `amount`.
    pub fn grow(&mut self, amount: f32, direction: Direction) {
        match direction {
            Direction::Left => self.left -= amount,
            Direction::Right => self.right += amount,
            Direction::Up => self.top += amount,
            Direction::Down => self.bottom -= amount,
        }
    }

    /// Pulls the edge opposite `direction` inwards by `amount`.
    pub fn shrink(&mut self, amount: f32, direction: Direction) {
        match direction {
            Direction::Left => self.right -= amount,
            Direction::Right => self.left += amount,
            Direction::Up => self.bottom += amount,
            Direction::Down => self.top -= amount,
        }
    }

    /// Checks whether any part of this box touches any part of `other`.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.top < other.bottom
            || self.bottom > other.top)
    }

    /// Checks whether this box wholly contains `other`.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.bottom <= other.bottom
            && self.top >= other.top
    }

    /// Checks whether `point` lies inside this box or on its edge.
    pub fn contains(&self, point: &Point) -> bool {
        self.left <= point.x
            && self.right >= point.x
            && self.bottom <= point.y
            && self.top >= point.y
    }
}
