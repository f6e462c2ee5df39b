//! Low-level DSP primitives driven by the sample tick.
//!
//! These components are allocation-free and branch-light so the engine can
//! run all six (source × ear) instances once per tick with a bounded cost.
//! They stay focused on the signal math; the engine decides when each one
//! is advanced or retriggered.

/// Saturating elapsed-time counter that restarts at zero past its ceiling.
pub mod counter;
/// Attack/sustain/decay envelope keyed off the elapsed-time counter.
pub mod envelope;
/// Phase accumulator (direct digital synthesis).
pub mod oscillator;
/// Precomputed single-cycle sine lookup shared by every voice.
pub mod wavetable;

pub use counter::ElapsedCounter;
pub use envelope::{Envelope, EnvelopeShape, EnvelopeStage};
pub use oscillator::PhaseAccumulator;
pub use wavetable::SineTable;
