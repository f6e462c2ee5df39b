use thiserror::Error;

use crate::spatial::Point;

/// Rejected listener placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Outside the movable region of the map.
    #[error("position ({}, {}) is outside the movable region", .0.x, .0.y)]
    OutOfBounds(Point),
    /// Inside the reserved obstacle rectangle.
    #[error("position ({}, {}) is inside the obstacle", .0.x, .0.y)]
    InsideObstacle(Point),
}

/// Failure to hand a control message to the audio side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The audio thread has not drained earlier messages yet.
    #[error("control queue is full")]
    QueueFull,
}
