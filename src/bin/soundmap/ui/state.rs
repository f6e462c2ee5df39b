//! Messages between the UI thread and the position task
//!
//! Both directions are Copy and travel over wait-free ring buffers.

use soundmap::{
    spatial::{Direction, Point},
    SpatialFrame,
};

/// Key presses forwarded to the position task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Arrow key / WASD
    Move(Direction),
    /// Recompute spatial cues without moving
    Recompute,
    /// Silence everything and return to the start
    Reset,
}

/// Published by the position task after each period that changed something
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionUpdate {
    pub listener: Point,
    /// The frame sent to the engine, if one was sent
    pub frame: Option<SpatialFrame>,
}
