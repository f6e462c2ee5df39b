use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::{debug, warn};

#[cfg(feature = "rtrb")]
use crate::{error::ControlError, spatial::ListenerPosition};
use crate::spatial::SpatialFrame;

/// Control-plane requests, applied by the engine at the start of a tick.
#[derive(Debug, Clone, Copy)]
pub enum ControlMessage {
    /// Replace every source's spatial cues and retrigger them.
    Spatial(SpatialFrame),
    /// Back to power-on: silent voices, no pending far-ear timers.
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

impl MessageReceiver for VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

pub const CONTROL_QUEUE_SIZE: usize = 16;

/// Control-thread side of the engine's message queue.
#[cfg(feature = "rtrb")]
pub struct EngineHandle {
    tx: Producer<ControlMessage>,
}

#[cfg(feature = "rtrb")]
impl EngineHandle {
    /// Wait-free handle/receiver pair. The receiver goes to the audio thread.
    pub fn channel() -> (Self, Consumer<ControlMessage>) {
        let (tx, rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE_SIZE);
        (Self { tx }, rx)
    }

    pub fn send(&mut self, message: ControlMessage) -> Result<(), ControlError> {
        self.tx.push(message).map_err(|_| {
            warn!(?message, "control queue full, message dropped");
            ControlError::QueueFull
        })
    }

    /// Recompute every source for `listener` and queue the result.
    pub fn recompute(&mut self, listener: &ListenerPosition) -> Result<SpatialFrame, ControlError> {
        let frame = SpatialFrame::compute(listener);
        for state in &frame.states {
            debug!(
                source = ?state.source_position,
                listener = ?state.listener,
                angle = state.angle,
                ratio = state.amplitude_ratio,
                delay_ticks = state.delay_ticks,
                near = ?state.near,
                near_target = state.near_target,
                far_target = state.far_target,
                "spatial recompute"
            );
        }
        self.send(ControlMessage::Spatial(frame))?;
        Ok(frame)
    }

    pub fn reset(&mut self) -> Result<(), ControlError> {
        self.send(ControlMessage::Reset)
    }
}
