//! SoundMap - application builder and runner

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info, warn};

use soundmap::{
    config::{POSITION_TASK_INTERVAL_MS, SAMPLE_RATE},
    engine::{EngineHandle, MessageReceiver},
    io::FrameSink,
    Engine, EngineSnapshot, ListenerPosition, StereoFrame,
};

use super::position::PositionTask;
use super::ui::{InputEvent, PositionUpdate, UiApp};

/// Frames buffered for the scope and spectrum views
const MONITOR_QUEUE_SIZE: usize = 8192;
const SNAPSHOT_QUEUE_SIZE: usize = 16;
const INPUT_QUEUE_SIZE: usize = 64;
const UPDATE_QUEUE_SIZE: usize = 16;

/// Main application builder
pub struct SoundMap {
    position_interval: Duration,
    listener: ListenerPosition,
}

impl SoundMap {
    pub fn new() -> Self {
        Self {
            position_interval: Duration::from_millis(POSITION_TASK_INTERVAL_MS),
            listener: ListenerPosition::initial(),
        }
    }

    /// How often the position task samples input
    pub fn position_interval(mut self, interval: Duration) -> Self {
        self.position_interval = interval;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = pick_config(&device)?;

        let device_rate = config.sample_rate().0;
        let channels = usize::from(config.channels());
        info!(device_rate, channels, engine_rate = SAMPLE_RATE, "opening output stream");
        if device_rate != SAMPLE_RATE {
            warn!(device_rate, "device cannot run at the engine rate, holding frames");
        }

        let (handle, mut control_rx) = EngineHandle::channel();
        let (mut monitor_tx, monitor_rx) = RingBuffer::<StereoFrame>::new(MONITOR_QUEUE_SIZE);
        let (mut snapshot_tx, snapshot_rx) = RingBuffer::<EngineSnapshot>::new(SNAPSHOT_QUEUE_SIZE);
        let (input_tx, input_rx) = RingBuffer::<InputEvent>::new(INPUT_QUEUE_SIZE);
        let (update_tx, update_rx) = RingBuffer::<PositionUpdate>::new(UPDATE_QUEUE_SIZE);

        // The engine lives on the audio thread; everything else talks to it
        // through the control queue.
        let mut engine = Engine::new();
        let mut clock = TickClock::new(device_rate);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    for out in data.chunks_mut(channels) {
                        let frame = clock.next(&mut engine, &mut control_rx, &mut monitor_tx);
                        write_frame(out, frame);
                    }
                    let _ = snapshot_tx.push(engine.snapshot());
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let running = Arc::new(AtomicBool::new(true));
        let task = PositionTask::new(self.listener, handle, input_rx, update_tx, self.position_interval);
        let task_thread = task.spawn(running.clone());

        let mut terminal = ratatui::init();
        let mut ui = UiApp::new(self.listener, input_tx, update_rx, monitor_rx, snapshot_rx);
        let result = ui.run(&mut terminal);
        ratatui::restore();

        running.store(false, Ordering::Relaxed);
        if task_thread.join().is_err() {
            error!("position task panicked");
        }
        drop(stream);

        result
    }
}

impl Default for SoundMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefer an f32 config at the engine rate; otherwise take the device default.
fn pick_config(device: &cpal::Device) -> EyreResult<cpal::SupportedStreamConfig> {
    let wanted = cpal::SampleRate(SAMPLE_RATE);
    if let Ok(mut configs) = device.supported_output_configs() {
        let exact = configs.find(|range| {
            range.sample_format() == cpal::SampleFormat::F32
                && range.min_sample_rate() <= wanted
                && wanted <= range.max_sample_rate()
        });
        if let Some(range) = exact {
            return Ok(range.with_sample_rate(wanted));
        }
    }
    device
        .default_output_config()
        .wrap_err("failed to fetch default output config")
}

/// Stereo frame onto an interleaved device frame. Extra channels get the
/// mono sum; a mono device gets it alone.
fn write_frame(out: &mut [f32], frame: StereoFrame) {
    let [left, right] = frame.to_f32();
    match out {
        [mono] => *mono = 0.5 * (left + right),
        [l, r, rest @ ..] => {
            *l = left;
            *r = right;
            rest.fill(0.5 * (left + right));
        }
        [] => {}
    }
}

/// Runs the engine at its own fixed rate inside a device callback of any
/// rate, holding the last frame when the device runs faster.
struct TickClock {
    step: f64,
    phase: f64,
    last: StereoFrame,
}

impl TickClock {
    fn new(device_rate: u32) -> Self {
        Self {
            step: f64::from(SAMPLE_RATE) / f64::from(device_rate.max(1)),
            phase: 0.0,
            last: StereoFrame::SILENT,
        }
    }

    fn next<R, S>(&mut self, engine: &mut Engine, rx: &mut R, monitor: &mut S) -> StereoFrame
    where
        R: MessageReceiver + ?Sized,
        S: FrameSink + ?Sized,
    {
        self.phase += self.step;
        while self.phase >= 1.0 {
            self.phase -= 1.0;
            self.last = engine.tick_with(rx);
            // A full monitor queue only costs the scope some frames.
            monitor.accept(self.last);
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn clock_ticks_once_per_frame_at_engine_rate() {
        let mut engine = Engine::new();
        let mut clock = TickClock::new(SAMPLE_RATE);
        let mut rx = VecDeque::new();
        let mut monitor = Vec::new();
        for _ in 0..100 {
            clock.next(&mut engine, &mut rx, &mut monitor);
        }
        assert_eq!(engine.ticks(), 100);
        assert_eq!(monitor.len(), 100);
    }

    #[test]
    fn clock_keeps_engine_rate_on_faster_device() {
        let mut engine = Engine::new();
        let mut clock = TickClock::new(48_000);
        let mut rx = VecDeque::new();
        let mut monitor = Vec::new();
        for _ in 0..48_000 {
            clock.next(&mut engine, &mut rx, &mut monitor);
        }
        let ticks = engine.ticks() as i64;
        assert!((ticks - i64::from(SAMPLE_RATE)).abs() <= 1, "{ticks}");
    }

    #[test]
    fn write_frame_handles_channel_counts() {
        let frame = StereoFrame { left: 4095, right: 0 };
        let mut stereo = [9.0; 2];
        write_frame(&mut stereo, frame);
        assert!(stereo[0] > 0.99 && stereo[1] == -1.0);

        let mut mono = [9.0; 1];
        write_frame(&mut mono, StereoFrame::SILENT);
        assert_eq!(mono, [0.0]);

        let mut quad = [9.0; 4];
        write_frame(&mut quad, StereoFrame::SILENT);
        assert_eq!(quad, [0.0; 4]);
    }
}
