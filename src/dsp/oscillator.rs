use crate::config::{PHASE_SPAN, SAMPLE_RATE};
use crate::dsp::wavetable::SineTable;

/*
Direct Digital Synthesis
========================

A 32-bit phase accumulator walks the sine table. Each tick adds a fixed
increment; the unsigned wraparound at 2^32 is the end of one waveform cycle.

    increment = round(frequency * 2^32 / sample_rate)
    phase     = phase + increment   (mod 2^32)
    sample    = table[phase >> (32 - table_bits)]

Frequency resolution is sample_rate / 2^32 (about 10 µHz at 44 kHz), and the
cost per sample is one add and one lookup.

Changing frequency only swaps the increment. The phase carries on from where
it was, so pitch sweeps stay continuous and never click.
*/

/// Phase increment for `frequency` at the engine sample rate.
///
/// Frequencies at or above the sample rate fold back modulo 2^32, the same
/// aliasing a hardware accumulator produces. Negative input walks the table
/// backwards.
pub fn phase_increment(frequency: f32) -> u32 {
    let increment = (f64::from(frequency) * PHASE_SPAN / f64::from(SAMPLE_RATE)).round();
    increment.rem_euclid(PHASE_SPAN) as u32
}

#[derive(Debug, Clone, Copy)]
pub struct PhaseAccumulator {
    phase: u32,
    increment: u32,
    frequency: f32,
}

impl PhaseAccumulator {
    pub const fn new() -> Self {
        Self {
            phase: 0,
            increment: 0,
            frequency: 0.0,
        }
    }

    /// Retune without touching the phase.
    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency != self.frequency {
            self.frequency = frequency;
            self.increment = phase_increment(frequency);
        }
    }

    /// Advance one tick and read the table at the new phase.
    #[inline]
    pub fn next_sample(&mut self, table: &SineTable) -> f32 {
        self.phase = self.phase.wrapping_add(self.increment);
        table.lookup(self.phase)
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PhaseAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_is_rounded() {
        // 1000 * 2^32 / 44000 = 97_612_893.09
        assert_eq!(phase_increment(1000.0), 97_612_893);
        // 2093 * 2^32 / 44000 = 204_303_785.24
        assert_eq!(phase_increment(2093.0), 204_303_785);
        assert_eq!(phase_increment(0.0), 0);
    }

    #[test]
    fn accumulator_returns_to_start_after_one_period() {
        // 171.875 Hz maps to exactly 2^24 per tick, so 256 ticks is one cycle.
        let table = SineTable::new();
        let mut osc = PhaseAccumulator::new();
        osc.set_frequency(171.875);
        assert_eq!(osc.increment(), 1 << 24);

        let start = osc.phase();
        let period = (PHASE_SPAN / f64::from(osc.increment())) as usize;
        for _ in 0..period {
            osc.next_sample(&table);
        }
        assert_eq!(osc.phase(), start);
    }

    #[test]
    fn retune_keeps_phase() {
        let table = SineTable::new();
        let mut osc = PhaseAccumulator::new();
        osc.set_frequency(440.0);
        for _ in 0..37 {
            osc.next_sample(&table);
        }
        let before = osc.phase();
        osc.set_frequency(880.0);
        assert_eq!(osc.phase(), before);

        osc.next_sample(&table);
        assert_eq!(osc.phase(), before.wrapping_add(phase_increment(880.0)));
    }

    #[test]
    fn above_nyquist_folds_instead_of_saturating() {
        let folded = phase_increment(SAMPLE_RATE as f32 + 1000.0);
        assert_eq!(folded, phase_increment(1000.0));
    }
}
