//! Position task - samples user input at a fixed interval, moves the
//! listener and asks the engine to retrigger with fresh spatial cues.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use rtrb::{Consumer, Producer};
use tracing::{debug, info, warn};

use soundmap::{engine::EngineHandle, spatial::Direction, ListenerPosition};

use super::ui::{InputEvent, PositionUpdate};

/// Input gathered since the last poll. Like a sampled joystick, only the
/// latest press on each axis counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PendingInput {
    vertical: Option<Direction>,
    horizontal: Option<Direction>,
    recompute: bool,
    reset: bool,
}

impl PendingInput {
    fn record(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(dir @ (Direction::Up | Direction::Down)) => self.vertical = Some(dir),
            InputEvent::Move(dir) => self.horizontal = Some(dir),
            InputEvent::Recompute => self.recompute = true,
            InputEvent::Reset => self.reset = true,
        }
    }
}

pub struct PositionTask {
    listener: ListenerPosition,
    handle: EngineHandle,
    input_rx: Consumer<InputEvent>,
    update_tx: Producer<PositionUpdate>,
    interval: Duration,
}

impl PositionTask {
    pub fn new(
        listener: ListenerPosition,
        handle: EngineHandle,
        input_rx: Consumer<InputEvent>,
        update_tx: Producer<PositionUpdate>,
        interval: Duration,
    ) -> Self {
        Self {
            listener,
            handle,
            input_rx,
            update_tx,
            interval,
        }
    }

    /// Run on a dedicated thread until `running` is cleared.
    pub fn spawn(mut self, running: Arc<AtomicBool>) -> JoinHandle<()> {
        thread::spawn(move || {
            info!(interval_ms = self.interval.as_millis() as u64, "position task started");
            while running.load(Ordering::Relaxed) {
                self.poll();
                thread::sleep(self.interval);
            }
            info!("position task stopped");
        })
    }

    /// One period: drain input, move, recompute if anything changed.
    pub fn poll(&mut self) -> Option<PositionUpdate> {
        let mut input = PendingInput::default();
        while let Ok(event) = self.input_rx.pop() {
            input.record(event);
        }

        if input.reset {
            if let Err(err) = self.handle.reset() {
                warn!(%err, "reset not delivered");
            }
            self.listener = ListenerPosition::initial();
            return self.publish(None);
        }

        let mut moved = false;
        for dir in [input.vertical, input.horizontal].into_iter().flatten() {
            moved |= self.listener.step(dir);
        }
        if !moved && !input.recompute {
            return None;
        }

        debug!(x = self.listener.x(), y = self.listener.y(), moved, "listener update");
        match self.handle.recompute(&self.listener) {
            Ok(frame) => self.publish(Some(frame)),
            Err(err) => {
                warn!(%err, "spatial frame not delivered");
                self.publish(None)
            }
        }
    }

    fn publish(&mut self, frame: Option<soundmap::SpatialFrame>) -> Option<PositionUpdate> {
        let update = PositionUpdate {
            listener: self.listener.point(),
            frame,
        };
        // The UI only wants the latest; a full queue is harmless.
        let _ = self.update_tx.push(update);
        Some(update)
    }

    #[cfg(test)]
    fn listener(&self) -> ListenerPosition {
        self.listener
    }
}

#[cfg(test)]
mod tests {
    use rtrb::RingBuffer;
    use soundmap::{engine::ControlMessage, spatial::Point};

    use super::*;

    struct Rig {
        task: PositionTask,
        input_tx: Producer<InputEvent>,
        control_rx: Consumer<ControlMessage>,
        update_rx: Consumer<PositionUpdate>,
    }

    fn rig() -> Rig {
        let (handle, control_rx) = EngineHandle::channel();
        let (input_tx, input_rx) = RingBuffer::new(16);
        let (update_tx, update_rx) = RingBuffer::new(16);
        let task = PositionTask::new(
            ListenerPosition::initial(),
            handle,
            input_rx,
            update_tx,
            Duration::from_millis(500),
        );
        Rig {
            task,
            input_tx,
            control_rx,
            update_rx,
        }
    }

    #[test]
    fn idle_poll_sends_nothing() {
        let mut rig = rig();
        assert_eq!(rig.task.poll(), None);
        assert!(rig.control_rx.pop().is_err());
        assert!(rig.update_rx.pop().is_err());
    }

    #[test]
    fn move_recomputes_and_publishes() {
        let mut rig = rig();
        rig.input_tx.push(InputEvent::Move(Direction::Up)).unwrap();

        let update = rig.task.poll().unwrap();
        assert_eq!(update.listener, Point::new(120, 300));
        assert!(update.frame.is_some());
        assert!(matches!(rig.control_rx.pop(), Ok(ControlMessage::Spatial(_))));
        assert_eq!(rig.update_rx.pop().unwrap(), update);
    }

    #[test]
    fn latest_press_per_axis_wins() {
        let mut rig = rig();
        for event in [
            InputEvent::Move(Direction::Up),
            InputEvent::Move(Direction::Left),
            InputEvent::Move(Direction::Up),
            InputEvent::Move(Direction::Right),
        ] {
            rig.input_tx.push(event).unwrap();
        }

        let update = rig.task.poll().unwrap();
        assert_eq!(update.listener, Point::new(130, 300));
        // One recompute per period, however many keys were pressed.
        assert!(rig.control_rx.pop().is_ok());
        assert!(rig.control_rx.pop().is_err());
    }

    #[test]
    fn blocked_move_without_button_is_ignored() {
        let mut rig = rig();
        // Already on the bottom edge.
        rig.input_tx.push(InputEvent::Move(Direction::Down)).unwrap();
        assert_eq!(rig.task.poll(), None);
        assert!(rig.control_rx.pop().is_err());
    }

    #[test]
    fn button_recomputes_in_place() {
        let mut rig = rig();
        rig.input_tx.push(InputEvent::Recompute).unwrap();
        let update = rig.task.poll().unwrap();
        assert_eq!(update.listener, Point::new(120, 310));
        assert!(matches!(rig.control_rx.pop(), Ok(ControlMessage::Spatial(_))));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut rig = rig();
        rig.input_tx.push(InputEvent::Move(Direction::Left)).unwrap();
        rig.task.poll();
        assert_eq!(rig.task.listener().point(), Point::new(110, 310));
        let _ = rig.control_rx.pop();

        rig.input_tx.push(InputEvent::Reset).unwrap();
        let update = rig.task.poll().unwrap();
        assert_eq!(update.listener, Point::new(120, 310));
        assert_eq!(update.frame, None);
        assert!(matches!(rig.control_rx.pop(), Ok(ControlMessage::Reset)));
    }
}
