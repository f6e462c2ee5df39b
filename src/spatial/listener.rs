use tracing::trace;

use super::Point;
use crate::config::{INITIAL_LISTENER, MOVABLE_REGION, MOVE_STEP, OBSTACLE};
use crate::error::PositionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -MOVE_STEP),
            Direction::Down => (0, MOVE_STEP),
            Direction::Left => (-MOVE_STEP, 0),
            Direction::Right => (MOVE_STEP, 0),
        }
    }
}

/// Where the listener stands. Always inside the movable region and never
/// inside the obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerPosition {
    point: Point,
}

impl ListenerPosition {
    pub fn new(x: i32, y: i32) -> Result<Self, PositionError> {
        let point = Point::new(x, y);
        if !MOVABLE_REGION.contains(point) {
            return Err(PositionError::OutOfBounds(point));
        }
        if OBSTACLE.contains(point) {
            return Err(PositionError::InsideObstacle(point));
        }
        Ok(Self { point })
    }

    /// Start of the walk, bottom of the map.
    pub const fn initial() -> Self {
        Self {
            point: INITIAL_LISTENER,
        }
    }

    /// Move one step. Returns `false` and stays put if the step would leave
    /// the region or walk into the obstacle.
    pub fn step(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        match Self::new(self.point.x + dx, self.point.y + dy) {
            Ok(next) => {
                *self = next;
                true
            }
            Err(err) => {
                trace!(?direction, %err, "listener move refused");
                false
            }
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn x(&self) -> i32 {
        self.point.x
    }

    pub fn y(&self) -> i32 {
        self.point.y
    }
}

impl Default for ListenerPosition {
    fn default() -> Self {
        Self::initial()
    }
}
