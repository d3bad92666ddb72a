//! Direction heuristics and random placement within the arena.

use rand::Rng;

use super::geometry::{Direction, DirectionPair, Point};
use super::rng::SimRng;

/// Chooses headings between points and samples random points in an arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    width: f32,
    height: f32,
    last_edge_direction: Option<Direction>,
}

impl Navigator {
    /// Creates a navigator for an arena of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            last_edge_direction: None,
        }
    }

    /// Arena width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Arena height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Heading along the axis with the larger displacement from `start` to `end`.
    ///
    /// Ties go to the horizontal axis.
    pub fn navigate(start: Point, end: Point) -> Direction {
        let x_magnitude = (end.x - start.x).abs();
        let y_magnitude = (end.y - start.y).abs();

        if x_magnitude >= y_magnitude {
            horizontal_towards(start, end)
        } else {
            vertical_towards(start, end)
        }
    }

    /// Like [`Navigator::navigate`], but never a 180 degree turn from `current`:
    /// a reversal is replaced by the heading along the other axis.
    pub fn navigate_turning(start: Point, end: Point, current: Direction) -> Direction {
        let direction = Self::navigate(start, end);

        if direction.is_opposite(current) {
            if current.is_horizontal() {
                vertical_towards(start, end)
            } else {
                horizontal_towards(start, end)
            }
        } else {
            direction
        }
    }

    /// One horizontal and one vertical heading leading away from `end`.
    ///
    /// The primary heading is along the axis where `start` is closer to `end`;
    /// equal magnitudes put the vertical heading second.
    pub fn navigate_away_from(start: Point, end: Point) -> DirectionPair {
        let x_magnitude = (end.x - start.x).abs();
        let y_magnitude = (end.y - start.y).abs();

        let horizontal = if end.x > start.x {
            Direction::Left
        } else {
            Direction::Right
        };
        let vertical = if end.y > start.y {
            Direction::Down
        } else {
            Direction::Up
        };

        if x_magnitude <= y_magnitude {
            DirectionPair {
                primary: horizontal,
                secondary: vertical,
            }
        } else {
            DirectionPair {
                primary: vertical,
                secondary: horizontal,
            }
        }
    }

    /// Picks a uniformly random point on a uniformly random arena edge and
    /// returns it with the heading that points into the arena.
    pub fn random_edge_point(&mut self, rng: &mut SimRng) -> (Point, Direction) {
        let (point, direction) = match rng.random_range(0..4) {
            0 => (Point::new(self.random_x(rng), self.height), Direction::Down),
            1 => (Point::new(self.random_x(rng), 0.0), Direction::Up),
            2 => (Point::new(0.0, self.random_y(rng)), Direction::Right),
            _ => (Point::new(self.width, self.random_y(rng)), Direction::Left),
        };

        self.last_edge_direction = Some(direction);
        (point, direction)
    }

    /// Inward heading of the last edge point handed out.
    pub fn last_edge_direction(&self) -> Option<Direction> {
        self.last_edge_direction
    }

    /// A uniformly random point inside the arena.
    pub fn random_point(&self, rng: &mut SimRng) -> Point {
        Point::new(self.random_x(rng), self.random_y(rng))
    }

    fn random_x(&self, rng: &mut SimRng) -> f32 {
        rng.random::<f32>() * self.width
    }

    fn random_y(&self, rng: &mut SimRng) -> f32 {
        rng.random::<f32>() * self.height
    }
}

fn horizontal_towards(start: Point, end: Point) -> Direction {
    if end.x > start.x {
        Direction::Right
    } else {
        Direction::Left
    }
}

fn vertical_towards(start: Point, end: Point) -> Direction {
    if end.y > start.y {
        Direction::Up
    } else {
        Direction::Down
    }
}
