//! Listener geometry and the interaural cues derived from it.
//!
//! For each source the listener hears two things that place it in space:
//! an interaural time difference (the far ear hears the sound a little
//! later) and an interaural level difference (the far ear hears it a little
//! quieter). On top of both, loudness falls off with distance.
//!
//! ```text
//!              source
//!                *
//!               /|
//!              / | dy
//!             /θ |
//!   listener o---+
//!              dx
//! ```
//!
//! `θ = atan(|dx| / |dy|)` is the angle away from straight ahead. The far ear
//! is attenuated by `cos θ` and delayed by the head-diffraction
//! approximation `r (θ + sin θ) / c`, with `r` the head radius and `c` the
//! speed of sound.

mod listener;

pub use listener::{Direction, ListenerPosition};

use crate::config::{HEAD_RADIUS_CM, MIN_AXIS_OFFSET, SOUND_SPEED_CM_PER_S, TICK_RATE_HZ};
use crate::voices::{Source, SourceProfile};

/// A position in display coordinates (x right, y down).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    pub const BOTH: [Ear; 2] = [Ear::Left, Ear::Right];

    pub const fn index(self) -> usize {
        match self {
            Ear::Left => 0,
            Ear::Right => 1,
        }
    }

    pub const fn opposite(self) -> Ear {
        match self {
            Ear::Left => Ear::Right,
            Ear::Right => Ear::Left,
        }
    }
}

/// Everything the engine needs to place one source for one listener position.
///
/// Always computed as a whole; the engine replaces its copy in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialState {
    pub source_position: Point,
    pub listener: Point,
    /// Source minus listener, in display coordinates.
    pub dx: i32,
    pub dy: i32,
    /// Angle from straight ahead, in radians, within `[0, π/2]`.
    pub angle: f64,
    /// Far-ear level relative to the near ear, `cos(angle)`.
    pub amplitude_ratio: f64,
    pub delay_seconds: f64,
    /// Far-ear delay rounded up to whole sample ticks.
    pub delay_ticks: u32,
    pub distance: f64,
    /// Ear on the source's side, retriggered without delay.
    pub near: Ear,
    pub near_target: f32,
    pub far_target: f32,
}

impl SpatialState {
    /// Spatial cues for `source` at its fixed map position.
    pub fn compute(source: Source, listener: &ListenerPosition) -> Self {
        let profile = source.profile();
        Self::between(profile, profile.position, listener.point())
    }

    /// Spatial cues for a source with `profile` tuning placed at `source_position`.
    ///
    /// `listener` is not checked against the map; any coordinate works.
    pub fn between(profile: &SourceProfile, source_position: Point, listener: Point) -> Self {
        let dx = source_position.x - listener.x;
        let dy = source_position.y - listener.y;

        // Guard the level case: |dy| = 0 would divide by zero.
        let lateral = f64::from(dx.unsigned_abs());
        let forward = f64::from(dy.unsigned_abs()).max(MIN_AXIS_OFFSET);
        let angle = (lateral / forward).atan();

        let amplitude_ratio = angle.cos();
        let delay_seconds = HEAD_RADIUS_CM * (angle + angle.sin()) / SOUND_SPEED_CM_PER_S;
        let delay_ticks = (delay_seconds * TICK_RATE_HZ).ceil() as u32;

        let distance = lateral.hypot(f64::from(dy.unsigned_abs()));
        let near_target = profile.amplitude_at(distance);
        let floor = profile.floor_amplitude;
        let far_target = (f64::from(near_target - floor) * amplitude_ratio) as f32 + floor;

        let near = if dx > 0 { Ear::Right } else { Ear::Left };

        Self {
            source_position,
            listener,
            dx,
            dy,
            angle,
            amplitude_ratio,
            delay_seconds,
            delay_ticks,
            distance,
            near,
            near_target,
            far_target,
        }
    }

    pub fn far(&self) -> Ear {
        self.near.opposite()
    }

    /// Target amplitude for `ear`.
    pub fn target(&self, ear: Ear) -> f32 {
        if ear == self.near {
            self.near_target
        } else {
            self.far_target
        }
    }
}

/// One recompute for every source, applied by the engine as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialFrame {
    pub listener: Point,
    pub states: [SpatialState; 3],
}

impl SpatialFrame {
    pub fn compute(listener: &ListenerPosition) -> Self {
        Self {
            listener: listener.point(),
            states: Source::ALL.map(|source| SpatialState::compute(source, listener)),
        }
    }

    pub fn get(&self, source: Source) -> &SpatialState {
        &self.states[source.index()]
    }
}
