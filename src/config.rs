//! Compile-time tuning for the engine and the map.
//!
//! Nothing here is reconfigurable at runtime. Per-source constants (envelope
//! durations, amplitude ceilings, distance falloff, positions) live with each
//! voice in [`crate::voices`].

use crate::spatial::{Point, Rect};

/// Sample-tick rate in Hz. Every voice advances exactly once per tick.
pub const SAMPLE_RATE: u32 = 44_000;

/// Rate at which far-ear timers count. They are serviced on the sample tick,
/// so they share its clock.
pub const TICK_RATE_HZ: f64 = SAMPLE_RATE as f64;

/// `2^32`, the span of the DDS phase accumulator.
pub const PHASE_SPAN: f64 = 4_294_967_296.0;

/// log2 of the sine table length.
pub const SINE_TABLE_BITS: u32 = 8;
pub const SINE_TABLE_SIZE: usize = 1 << SINE_TABLE_BITS;

/// Output sample width. Frames are biased so no negative value is emitted.
pub const OUTPUT_BITS: u32 = 12;
pub const OUTPUT_MAX: u16 = (1 << OUTPUT_BITS) - 1;
pub const DC_BIAS: i32 = 1 << (OUTPUT_BITS - 1);

/// Head radius in map units (centimetres).
pub const HEAD_RADIUS_CM: f64 = 9.0;
/// Speed of sound in centimetres per second.
pub const SOUND_SPEED_CM_PER_S: f64 = 34_000.0;

/// Smallest |dy| used when forming the dx/dy ratio. A listener level with a
/// source resolves to a fully lateral angle instead of dividing by zero.
pub const MIN_AXIS_OFFSET: f64 = 1e-3;
/// Smallest distance fed to the logarithmic falloff.
pub const MIN_DISTANCE: f64 = 1.0;

pub const DISPLAY_WIDTH: i32 = 240;
pub const DISPLAY_HEIGHT: i32 = 320;

/// Region the listener may occupy (inclusive).
pub const MOVABLE_REGION: Rect = Rect::new(90, 150, 10, 310);
/// Parked car; the listener can never stand inside it.
pub const OBSTACLE: Rect = Rect::new(121, 159, 0, 49);
/// Distance covered by one listener move.
pub const MOVE_STEP: i32 = 10;
pub const INITIAL_LISTENER: Point = Point::new(120, 310);

/// Cadence of the background position task in milliseconds.
pub const POSITION_TASK_INTERVAL_MS: u64 = 500;
