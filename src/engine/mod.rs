//! The sample-tick routine.
//!
//! [`Engine`] owns every piece of per-voice state: three sources, each with a
//! left and right channel (phase accumulator + envelope) and one deferred
//! far-ear timer. Nothing else writes to that state. The control thread
//! reaches it only through [`ControlMessage`]s, which the engine drains at a
//! tick boundary, so the sample path never observes a half-applied update.
//!
//! Per tick, always in this order:
//!
//! 1. far-ear timers armed in earlier ticks count down and may fire
//! 2. queued control messages are applied
//! 3. bird, car, bell, each left then right: contour → DDS → table × level
//! 4. both channels are mixed, biased and clamped to the output width
//! 5. every envelope steps its level and advances its elapsed-time counter

pub mod message;
pub mod timer;

pub use message::{ControlMessage, MessageReceiver, CONTROL_QUEUE_SIZE};
#[cfg(feature = "rtrb")]
pub use message::EngineHandle;
pub use timer::OneShot;

use crate::dsp::envelope::{Envelope, EnvelopeStage};
use crate::dsp::oscillator::PhaseAccumulator;
use crate::dsp::wavetable::SineTable;
use crate::io::dac::StereoFrame;
use crate::io::FrameSink;
use crate::spatial::{Ear, SpatialFrame, SpatialState};
use crate::voices::{Contour, Source};

/// One ear's worth of a source.
struct Channel {
    osc: PhaseAccumulator,
    env: Envelope,
}

/// Deferred far-ear retrigger, captured when the timer is armed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FarEarRetrigger {
    ear: Ear,
    target: f32,
}

struct SourceVoice {
    contour: &'static dyn Contour,
    channels: [Channel; 2],
    far_timer: OneShot<FarEarRetrigger>,
    far_expiries: u32,
    spatial: Option<SpatialState>,
}

impl SourceVoice {
    fn new(source: Source) -> Self {
        let profile = source.profile();
        let channel = || Channel {
            osc: PhaseAccumulator::new(),
            env: Envelope::new(
                profile.envelope,
                profile.floor_amplitude,
                profile.max_amplitude,
                profile.counter_ceiling,
            ),
        };

        Self {
            contour: source.contour(),
            channels: [channel(), channel()],
            far_timer: OneShot::new(),
            far_expiries: 0,
            spatial: None,
        }
    }

    fn apply(&mut self, state: &SpatialState) {
        // Near ear first, synchronously; only then is the far ear scheduled.
        self.channels[state.near.index()].env.retrigger(state.near_target);

        let far = state.far();
        if state.delay_ticks == 0 {
            self.far_timer.cancel();
            self.channels[far.index()].env.retrigger(state.far_target);
        } else {
            self.far_timer.arm(
                state.delay_ticks,
                FarEarRetrigger {
                    ear: far,
                    target: state.far_target,
                },
            );
        }
        self.spatial = Some(*state);
    }

    fn service_timer(&mut self) {
        if let Some(retrigger) = self.far_timer.tick() {
            self.channels[retrigger.ear.index()].env.retrigger(retrigger.target);
            self.far_expiries = self.far_expiries.wrapping_add(1);
        }
    }

    fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.osc.reset();
            channel.env.reset();
        }
        self.far_timer.cancel();
        self.far_expiries = 0;
        self.spatial = None;
    }
}

pub struct Engine {
    table: SineTable,
    voices: [SourceVoice; 3],
    ticks: u64,
}

impl Engine {
    /// Power-on state: all six channels silent until the first spatial frame.
    pub fn new() -> Self {
        Self {
            table: SineTable::new(),
            voices: Source::ALL.map(SourceVoice::new),
            ticks: 0,
        }
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Spatial(frame) => self.apply_spatial(&frame),
            ControlMessage::Reset => self.reset(),
        }
    }

    /// Retrigger every source for a new listener position.
    ///
    /// For each source the near ear restarts immediately; the far ear either
    /// restarts immediately too (zero delay) or gets its timer re-armed,
    /// replacing whatever expiry was still pending.
    pub fn apply_spatial(&mut self, frame: &SpatialFrame) {
        for (voice, state) in self.voices.iter_mut().zip(&frame.states) {
            voice.apply(state);
        }
    }

    /// Back to power-on: silent channels, no pending far-ear timers, tick and
    /// expiry counters at zero.
    pub fn reset(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
        self.ticks = 0;
    }

    /// One sample period with no control input.
    pub fn tick(&mut self) -> StereoFrame {
        self.service_timers();
        self.render_sample()
    }

    /// One sample period, applying whatever `rx` has queued.
    pub fn tick_with<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R) -> StereoFrame {
        self.service_timers();
        while let Some(message) = rx.pop() {
            self.apply(message);
        }
        self.render_sample()
    }

    /// Fill `out` with consecutive ticks.
    pub fn render<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R, out: &mut [StereoFrame]) {
        for frame in out.iter_mut() {
            *frame = self.tick_with(rx);
        }
    }

    /// Run `frames` ticks, handing each result to `sink` as soon as it is mixed.
    pub fn run<R, S>(&mut self, rx: &mut R, sink: &mut S, frames: usize)
    where
        R: MessageReceiver + ?Sized,
        S: FrameSink + ?Sized,
    {
        for _ in 0..frames {
            let frame = self.tick_with(rx);
            sink.accept(frame);
        }
    }

    fn service_timers(&mut self) {
        for voice in &mut self.voices {
            voice.service_timer();
        }
    }

    fn render_sample(&mut self) -> StereoFrame {
        let mut mix = [0i32; 2];
        for voice in &mut self.voices {
            for (channel, out) in voice.channels.iter_mut().zip(mix.iter_mut()) {
                let frequency = voice.contour.frequency(channel.env.elapsed());
                channel.osc.set_frequency(frequency);
                let sample = channel.osc.next_sample(&self.table);
                *out += (channel.env.level() * sample) as i32;
            }
        }

        for voice in &mut self.voices {
            for channel in &mut voice.channels {
                channel.env.advance();
            }
        }

        self.ticks += 1;
        StereoFrame::from_mix(mix[0], mix[1])
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn envelope(&self, source: Source, ear: Ear) -> &Envelope {
        &self.voices[source.index()].channels[ear.index()].env
    }

    pub fn oscillator(&self, source: Source, ear: Ear) -> &PhaseAccumulator {
        &self.voices[source.index()].channels[ear.index()].osc
    }

    /// Ear and remaining ticks of the far-ear timer, if one is pending.
    pub fn pending_far_ear(&self, source: Source) -> Option<(Ear, u32)> {
        let timer = &self.voices[source.index()].far_timer;
        Some((timer.payload()?.ear, timer.remaining()?))
    }

    /// How many times the far-ear timer of `source` has fired.
    pub fn far_expiries(&self, source: Source) -> u32 {
        self.voices[source.index()].far_expiries
    }

    /// Last spatial cues applied to `source`.
    pub fn spatial(&self, source: Source) -> Option<&SpatialState> {
        self.voices[source.index()].spatial.as_ref()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            ticks: self.ticks,
            sources: Source::ALL.map(|source| {
                let voice = &self.voices[source.index()];
                SourceSnapshot {
                    ears: Ear::BOTH.map(|ear| {
                        let channel = &voice.channels[ear.index()];
                        EarSnapshot {
                            level: channel.env.level(),
                            target: channel.env.target(),
                            frequency: channel.osc.frequency(),
                            elapsed: channel.env.elapsed(),
                            stage: channel.env.stage(),
                        }
                    }),
                    pending_far_ear: self.pending_far_ear(source),
                    far_expiries: voice.far_expiries,
                    spatial: voice.spatial,
                }
            }),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Copyable view of the engine for display, safe to send off the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSnapshot {
    pub ticks: u64,
    pub sources: [SourceSnapshot; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceSnapshot {
    pub ears: [EarSnapshot; 2],
    pub pending_far_ear: Option<(Ear, u32)>,
    pub far_expiries: u32,
    pub spatial: Option<SpatialState>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarSnapshot {
    pub level: f32,
    pub target: f32,
    pub frequency: f32,
    pub elapsed: u32,
    pub stage: EnvelopeStage,
}

impl EngineSnapshot {
    pub fn source(&self, source: Source) -> &SourceSnapshot {
        &self.sources[source.index()]
    }
}
