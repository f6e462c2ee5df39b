//! The three fixed sound sources on the map.
//!
//! Every source shares the same machinery (two DDS channels, two envelopes,
//! one deferred far-ear timer). What differs is data: a [`SourceProfile`]
//! with durations, loudness and position, plus a [`Contour`] that turns the
//! voice's elapsed-time counter into a frequency.
//!
//! # Example
//!
//! ```
//! use soundmap::voices::{Contour, Source};
//!
//! let bell = Source::Bell;
//! assert_eq!(bell.contour().frequency(0), 2093.0);
//! assert_eq!(bell.profile().max_amplitude, 18.0);
//! ```

mod bell;
mod bird;
mod car;

pub use bell::{BellChime, BELL};
pub use bird::{BirdChirp, BIRD};
pub use car::{CarEngine, CAR};

use crate::config::MIN_DISTANCE;
use crate::dsp::envelope::EnvelopeShape;
use crate::spatial::Point;

/// Maps a voice's elapsed-time counter to an instantaneous frequency in Hz.
pub trait Contour: Send + Sync {
    fn frequency(&self, elapsed: u32) -> f32;
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Bird,
    Car,
    Bell,
}

impl Source {
    /// Every source in tick order.
    pub const ALL: [Source; 3] = [Source::Bird, Source::Car, Source::Bell];

    pub const fn index(self) -> usize {
        match self {
            Source::Bird => 0,
            Source::Car => 1,
            Source::Bell => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Source::Bird => "bird",
            Source::Car => "car",
            Source::Bell => "bell",
        }
    }

    pub const fn profile(self) -> &'static SourceProfile {
        match self {
            Source::Bird => &BIRD,
            Source::Car => &CAR,
            Source::Bell => &BELL,
        }
    }

    pub fn contour(self) -> &'static dyn Contour {
        match self {
            Source::Bird => &BirdChirp,
            Source::Car => &CarEngine,
            Source::Bell => &BellChime,
        }
    }
}

/// Logarithmic loudness loss with distance:
/// `scale * log10(distance / reference) + offset`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    pub scale: f64,
    pub reference: f64,
    pub offset: f64,
}

impl Falloff {
    pub fn attenuation(&self, distance: f64) -> f64 {
        let distance = distance.max(MIN_DISTANCE);
        self.scale * (distance / self.reference).log10() + self.offset
    }
}

/// Per-source constant table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProfile {
    /// Fixed map position.
    pub position: Point,
    pub envelope: EnvelopeShape,
    /// Elapsed-time counter ceiling; one loop of the voice is `ceiling + 1` ticks.
    pub counter_ceiling: u32,
    /// Loudest target the envelope may reach.
    pub max_amplitude: f32,
    /// Level the envelope rests at when idle.
    pub floor_amplitude: f32,
    pub falloff: Falloff,
}

impl SourceProfile {
    /// Near-ear target amplitude for a listener `distance` away, clamped
    /// into `[0, max_amplitude]`.
    pub fn amplitude_at(&self, distance: f64) -> f32 {
        let ceiling = f64::from(self.max_amplitude);
        let amplitude = ceiling - self.falloff.attenuation(distance);
        if amplitude.is_nan() {
            return 0.0;
        }
        amplitude.clamp(0.0, ceiling) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_tick_order() {
        for (i, source) in Source::ALL.iter().enumerate() {
            assert_eq!(source.index(), i);
        }
    }

    #[test]
    fn bird_falloff_saturates_at_both_ends() {
        // Close in, the falloff is negative and the amplitude clips at the ceiling.
        assert_eq!(BIRD.amplitude_at(1.0), 12.0);
        // 10 * log10(400 / 6) - 2 = 16.2 > 12, so the bird is inaudible.
        assert_eq!(BIRD.amplitude_at(400.0), 0.0);
        let mid = BIRD.amplitude_at(60.0);
        assert!((mid - 4.0).abs() < 1e-4, "{mid}");
    }

    #[test]
    fn zero_distance_is_guarded() {
        for source in Source::ALL {
            let amplitude = source.profile().amplitude_at(0.0);
            assert!(amplitude.is_finite());
            assert_eq!(amplitude, source.profile().max_amplitude);
        }
    }
}
