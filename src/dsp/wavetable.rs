use std::f32::consts::TAU;

use crate::config::{SINE_TABLE_BITS, SINE_TABLE_SIZE};

/// One cycle of a unit sine, indexed by the top bits of a 32-bit phase.
pub struct SineTable {
    samples: [f32; SINE_TABLE_SIZE],
}

impl SineTable {
    pub fn new() -> Self {
        let mut samples = [0.0; SINE_TABLE_SIZE];
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = (TAU * i as f32 / SINE_TABLE_SIZE as f32).sin();
        }
        Self { samples }
    }

    /// Table slot addressed by `phase`: its most significant `SINE_TABLE_BITS` bits.
    #[inline]
    pub fn index(phase: u32) -> usize {
        (phase >> (u32::BITS - SINE_TABLE_BITS)) as usize
    }

    #[inline]
    pub fn lookup(&self, phase: u32) -> f32 {
        self.samples[Self::index(phase)]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for SineTable {
    fn default() -> Self {
        Self::new()
    }
}
