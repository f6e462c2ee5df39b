//! Bird voice.
//!
//! A short rising chirp. The pitch climbs quadratically from 2 kHz while the
//! envelope is open, then the voice rests for the long remainder of its loop.
//!
//! # How It Works
//!
//! 1. `f = 0.000153 * t^2 + 2000`, so by the end of the envelope
//!    (t = 5720) the chirp has reached roughly 7 kHz
//! 2. 1000-tick attack, 3720-tick sustain, 1000-tick decay
//! 3. The counter runs on to 100 000 before restarting, about 2.3 s of
//!    silence between chirps at 44 kHz

use super::{Contour, Falloff, SourceProfile};
use crate::dsp::envelope::EnvelopeShape;
use crate::spatial::Point;

pub const BIRD: SourceProfile = SourceProfile {
    position: Point::new(80, 120),
    envelope: EnvelopeShape::new(1000, 3720, 1000),
    counter_ceiling: 100_000,
    max_amplitude: 12.0,
    floor_amplitude: 0.0,
    falloff: Falloff {
        scale: 10.0,
        reference: 6.0,
        offset: -2.0,
    },
};

const SWEEP_RATE: f32 = 0.000153;
const BASE_FREQUENCY: f32 = 2000.0;

/// Quadratic rising sweep.
pub struct BirdChirp;

impl Contour for BirdChirp {
    fn frequency(&self, elapsed: u32) -> f32 {
        let t = elapsed as f32;
        SWEEP_RATE * t * t + BASE_FREQUENCY
    }
}
