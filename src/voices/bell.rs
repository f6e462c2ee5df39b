//! Bell voice.
//!
//! A two-note chime, C7 then G#6, followed by silence.
//!
//! # How It Works
//!
//! 1. `t < 4500`: 2093 Hz
//! 2. `t < 9000`: 1661 Hz
//! 3. afterwards: 0 Hz (the accumulator stops, output is DC)
//! 4. 2000-tick attack and a long sustain carry both notes; the 6000-tick
//!    decay finishes well before the counter restarts at 70 000

use super::{Contour, Falloff, SourceProfile};
use crate::dsp::envelope::EnvelopeShape;
use crate::spatial::Point;

pub const BELL: SourceProfile = SourceProfile {
    position: Point::new(183, 221),
    envelope: EnvelopeShape::new(2000, 10_000, 6000),
    counter_ceiling: 70_000,
    max_amplitude: 18.0,
    floor_amplitude: 0.0,
    falloff: Falloff {
        scale: 15.0,
        reference: 6.0,
        offset: -1.0,
    },
};

const FIRST_NOTE_HZ: f32 = 2093.0;
const SECOND_NOTE_HZ: f32 = 1661.0;
const FIRST_NOTE_END: u32 = 4500;
const SECOND_NOTE_END: u32 = 9000;

/// Two-level step, then silence.
pub struct BellChime;

impl Contour for BellChime {
    fn frequency(&self, elapsed: u32) -> f32 {
        if elapsed < FIRST_NOTE_END {
            FIRST_NOTE_HZ
        } else if elapsed < SECOND_NOTE_END {
            SECOND_NOTE_HZ
        } else {
            0.0
        }
    }
}
