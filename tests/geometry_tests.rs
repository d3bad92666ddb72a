#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use slugs::simulation::geometry::{BoundingBox, Direction, Point};

const EPSILON: f32 = 1e-4;

fn assert_box_eq(actual: &BoundingBox, expected: &BoundingBox) {
    assert!((actual.left - expected.left).abs() < EPSILON, "{actual:?} != {expected:?}");
    assert!((actual.right - expected.right).abs() < EPSILON, "{actual:?} != {expected:?}");
    assert!((actual.top - expected.top).abs() < EPSILON, "{actual:?} != {expected:?}");
    assert!((actual.bottom - expected.bottom).abs() < EPSILON, "{actual:?} != {expected:?}");
}

#[test]
fn test_direction_classification() {
    assert!(Direction::Left.is_horizontal());
    assert!(Direction::Right.is_horizontal());
    assert!(Direction::Up.is_vertical());
    assert!(Direction::Down.is_vertical());

    for direction in Direction::ALL {
        assert!(direction.is_opposite(direction.opposite()));
        assert!(!direction.is_opposite(direction));
        assert_eq!(direction.opposite().opposite(), direction);
    }
}

#[test]
fn test_displacement_sign() {
    assert_eq!(Direction::Left.displacement(3.0), -3.0);
    assert_eq!(Direction::Down.displacement(3.0), -3.0);
    assert_eq!(Direction::Right.displacement(3.0), 3.0);
    assert_eq!(Direction::Up.displacement(3.0), 3.0);
}

#[test]
fn test_grow_then_shrink_restores_box() {
    let original = BoundingBox::new(-3.0, 5.0, 7.0, 1.0);

    for direction in Direction::ALL {
        for amount in [0.0, 0.5, 4.0, 12.25] {
            let mut bounds = original;
            bounds.grow(amount, direction);
            bounds.shrink(amount, direction);

            // grow and shrink work on opposite edges, so the box has moved
            let mut expected = original;
            expected.translate(amount, direction);
            assert_box_eq(&bounds, &expected);

            let mut back = bounds;
            back.translate(amount, direction.opposite());
            assert_box_eq(&back, &original);
        }
    }
}

#[test]
fn test_grow_extends_leading_edge() {
    let mut bounds = BoundingBox::new(0.0, 10.0, 10.0, 0.0);

    bounds.grow(2.0, Direction::Right);
    assert_box_eq(&bounds, &BoundingBox::new(0.0, 12.0, 10.0, 0.0));

    bounds.grow(2.0, Direction::Down);
    assert_box_eq(&bounds, &BoundingBox::new(0.0, 12.0, 10.0, -2.0));

    bounds.shrink(3.0, Direction::Up);
    assert_box_eq(&bounds, &BoundingBox::new(0.0, 12.0, 10.0, 1.0));
}

#[test]
fn test_move_to_keeps_size() {
    let mut bounds = BoundingBox::new(0.0, 4.0, 10.0, 0.0);
    bounds.move_to(20.0, 30.0);

    assert!((bounds.width() - 4.0).abs() < EPSILON);
    assert!((bounds.height() - 10.0).abs() < EPSILON);
    let centre = bounds.centre();
    assert!((centre.x - 20.0).abs() < EPSILON);
    assert!((centre.y - 30.0).abs() < EPSILON);
}

#[test]
fn test_intersection_and_containment() {
    let outer = BoundingBox::new(0.0, 10.0, 10.0, 0.0);
    let inner = BoundingBox::new(2.0, 4.0, 6.0, 3.0);
    let touching = BoundingBox::new(10.0, 12.0, 5.0, 4.0);
    let apart = BoundingBox::new(10.5, 12.0, 5.0, 4.0);

    assert!(outer.intersects(&inner));
    assert!(outer.contains_box(&inner));
    assert!(!inner.contains_box(&outer));

    assert!(outer.intersects(&touching));
    assert!(!outer.contains_box(&touching));
    assert!(!outer.intersects(&apart));

    assert!(outer.contains(&Point::new(10.0, 0.0)));
    assert!(!outer.contains(&Point::new(10.1, 0.0)));
}

#[test]
fn test_degenerate_box_intersection() {
    // lines are boxes with zero height or width
    let line = BoundingBox::new(0.0, 10.0, 5.0, 5.0);
    let crossing = BoundingBox::new(4.0, 6.0, 8.0, 2.0);
    let above = BoundingBox::new(4.0, 6.0, 8.0, 5.5);

    assert!(line.intersects(&crossing));
    assert!(!line.intersects(&above));
}

#[test]
fn test_point_shift_and_distance() {
    let mut point = Point::new(1.0, 1.0);
    point.shift(3.0, Direction::Up);
    point.shift(4.0, Direction::Right);

    assert_eq!(point, Point::new(5.0, 4.0));
    assert!((Point::new(1.0, 1.0).distance(&point) - 5.0).abs() < EPSILON);
}
