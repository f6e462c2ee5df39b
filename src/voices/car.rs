//! Car voice.
//!
//! An idling engine: a loud, very low tone whose pitch saws up and drops
//! back every 714 ticks, with a matching attack/decay swell every 2856.
//!
//! # How It Works
//!
//! 1. `p = t mod 714`
//! 2. First half of the period: `f = 0.9014 p + 0.3`, climbing to ~322 Hz
//! 3. Second half: `f = 1.3 - 0.0014 p`, a near-zero rumble
//! 4. 1428-tick attack, no sustain, 1428-tick decay, looping at 2856

use super::{Contour, Falloff, SourceProfile};
use crate::dsp::envelope::EnvelopeShape;
use crate::spatial::Point;

pub const CAR: SourceProfile = SourceProfile {
    position: Point::new(142, 25),
    envelope: EnvelopeShape::new(1428, 0, 1428),
    counter_ceiling: 2856,
    max_amplitude: 180.0,
    floor_amplitude: 0.0,
    falloff: Falloff {
        scale: 150.0,
        reference: 20.0,
        offset: 0.0,
    },
};

const RAMP_PERIOD: u32 = 714;
const RAMP_HALF: u32 = 357;

/// Repeating rise/fall ramp.
pub struct CarEngine;

impl Contour for CarEngine {
    fn frequency(&self, elapsed: u32) -> f32 {
        let p = elapsed % RAMP_PERIOD;
        let x = p as f32;
        if p < RAMP_HALF {
            0.9014 * x + 0.3
        } else {
            1.3 - 0.0014 * x
        }
    }
}
