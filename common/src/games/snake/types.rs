use std::ops::Add;

pub const BOARD_SIZE: i32 = 16;
pub const INITIAL_LENGTH: usize = 4;

/// Board cell. Signed so that a step off the edge is representable and can be
/// rejected by a bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_inside(&self, board_size: i32) -> bool {
        (0..board_size).contains(&self.x) && (0..board_size).contains(&self.y)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit vector of the direction; `y` grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        let (ax, ay) = self.delta();
        let (bx, by) = other.delta();
        ax + bx == 0 && ay + by == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    #[test]
    fn test_opposites() {
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_from_delta_inverts_delta() {
        for direction in ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn test_point_bounds() {
        assert!(Point::new(0, 0).is_inside(BOARD_SIZE));
        assert!(Point::new(15, 15).is_inside(BOARD_SIZE));
        assert!(!Point::new(-1, 0).is_inside(BOARD_SIZE));
        assert!(!Point::new(0, 16).is_inside(BOARD_SIZE));
    }

    #[test]
    fn test_point_plus_direction() {
        assert_eq!(Point::new(7, 7) + Direction::Right, Point::new(8, 7));
        assert_eq!(Point::new(0, 0) + Direction::Up, Point::new(0, -1));
    }
}
