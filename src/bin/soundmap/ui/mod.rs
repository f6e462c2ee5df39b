//! TUI module for soundmap
//!
//! Map, live per-source readout, stereo scope and spectrum. Keys are
//! forwarded to the position task; the UI never talks to the engine.

mod map;
mod scope;
mod sources;
mod spectrum;
pub mod state;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;
use tracing::debug;

use soundmap::{
    config::SAMPLE_RATE,
    spatial::{Direction, Point},
    EngineSnapshot, ListenerPosition, StereoFrame,
};

pub use state::{InputEvent, PositionUpdate};

use map::render_map;
use scope::render_scope;
use sources::render_sources;
use spectrum::{render_spectrum, SpectrumAnalyzer};

/// Samples kept for the scope and the FFT
const VIS_BUFFER_SIZE: usize = 1024;

pub struct UiApp {
    input_tx: Producer<InputEvent>,
    update_rx: Consumer<PositionUpdate>,
    monitor_rx: Consumer<StereoFrame>,
    snapshot_rx: Consumer<EngineSnapshot>,
    listener: Point,
    snapshot: Option<EngineSnapshot>,
    left: Vec<f32>,
    right: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        listener: ListenerPosition,
        input_tx: Producer<InputEvent>,
        update_rx: Consumer<PositionUpdate>,
        monitor_rx: Consumer<StereoFrame>,
        snapshot_rx: Consumer<EngineSnapshot>,
    ) -> Self {
        Self {
            input_tx,
            update_rx,
            monitor_rx,
            snapshot_rx,
            listener: listener.point(),
            snapshot: None,
            left: vec![0.0; VIS_BUFFER_SIZE],
            right: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, SAMPLE_RATE as f32),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_updates();
            self.poll_monitor();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_updates(&mut self) {
        while let Ok(update) = self.update_rx.pop() {
            self.listener = update.listener;
            if update.frame.is_none() {
                debug!(listener = ?update.listener, "position update without spatial frame");
            }
        }
        // Keep only the latest
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            self.snapshot = Some(snapshot);
        }
    }

    fn poll_monitor(&mut self) {
        let mut fresh = 0;
        while let Ok(frame) = self.monitor_rx.pop() {
            let [left, right] = frame.to_f32();
            self.left.push(left);
            self.right.push(right);
            fresh += 1;
        }
        if fresh == 0 {
            return;
        }

        for buffer in [&mut self.left, &mut self.right] {
            let excess = buffer.len().saturating_sub(VIS_BUFFER_SIZE);
            buffer.drain(..excess);
        }
        let mono: Vec<f32> = self
            .left
            .iter()
            .zip(&self.right)
            .map(|(l, r)| 0.5 * (l + r))
            .collect();
        self.spectrum.update(&mono);
    }

    fn handle_key(&mut self, key: KeyCode) {
        let event = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Up | KeyCode::Char('w') => InputEvent::Move(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => InputEvent::Move(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => InputEvent::Move(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => InputEvent::Move(Direction::Right),
            KeyCode::Char(' ') | KeyCode::Enter => InputEvent::Recompute,
            KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Reset,
            _ => return,
        };
        if self.input_tx.push(event).is_err() {
            debug!(?event, "input queue full, key dropped");
        }
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(12),    // Map + sources
                Constraint::Length(10), // Scope + spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        let top = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(40)])
            .split(rows[0]);
        render_map(frame, top[0], self.listener);
        render_sources(frame, top[1], self.snapshot.as_ref());

        let bottom = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        render_scope(frame, bottom[0], &self.left, &self.right);
        render_spectrum(frame, bottom[1], self.spectrum.data());

        let help = Paragraph::new(format!(
            " [Arrows/WASD] Move  [Space] Recompute  [R] Reset  [Q] Quit   listener ({}, {})",
            self.listener.x, self.listener.y
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
