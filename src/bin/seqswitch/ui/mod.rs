//! TUI module for seqswitch
//!
//! Shows the lane lights, the transport, and a scope of the monitored lane.
//! Keys become [`ControlMessage`]s for the audio thread.

pub mod state;
mod lanes;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

pub use state::{ControlMessage, UiStateInit, UiStateUpdate};

use lanes::render_lanes;
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for monitored-lane samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for UI state updates
    state_rx: Consumer<UiStateUpdate>,
    /// Ring buffer sender for control messages
    control_tx: Producer<ControlMessage>,
    /// Static state (sent once)
    init: UiStateInit,
    /// Current dynamic state (latest received)
    current_state: UiStateUpdate,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    /// Create a new UI application
    pub fn new(
        audio_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        control_tx: Producer<ControlMessage>,
        init: UiStateInit,
        initial_state: UiStateUpdate,
    ) -> Self {
        Self {
            audio_rx,
            state_rx,
            control_tx,
            init,
            current_state: initial_state,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
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

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        // Append whatever arrived, keep only the last VIS_BUFFER_SIZE
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Poll for state updates from ring buffer
    fn poll_state(&mut self) {
        // Keep only the latest state
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    /// Map a key to a control message, if it has one
    fn message_for_key(&self, key: KeyCode) -> Option<ControlMessage> {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(ControlMessage::Reset),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(ControlMessage::Clock),
            KeyCode::Char(' ') => Some(ControlMessage::ToggleClock),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                Some(ControlMessage::SetSteps(self.current_state.nudged_steps(true)))
            }
            KeyCode::Char('-') | KeyCode::Down => {
                Some(ControlMessage::SetSteps(self.current_state.nudged_steps(false)))
            }
            KeyCode::Char(c @ '1'..='8') => {
                Some(ControlMessage::MonitorLane(c as usize - '1' as usize))
            }
            _ => None,
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }

        if let Some(msg) = self.message_for_key(key) {
            // Full ring means the audio thread is stalled; dropping a key press is fine.
            if self.control_tx.push(msg).is_err() {
                tracing::debug!(?msg, "control ring full, dropping message");
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, lanes, waveform, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Length(10), // Eight lanes + border
                Constraint::Min(6),     // Waveform
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, chunks[0], &self.init, &self.current_state, &stats);

        render_lanes(frame, chunks[1], &self.init, &self.current_state);

        let monitor = self.current_state.monitor as usize;
        let lane_name = self.init.lane_names.get(monitor).copied().unwrap_or("?");
        let lane_active = self.current_state.lights.get(monitor).is_some_and(|&b| b > 0.0);
        render_waveform(frame, chunks[2], lane_name, lane_active, &self.audio_buffer);

        let help = Paragraph::new(
            " [Q] Quit  [Space] Clock on/off  [C] Clock  [R] Reset  [+/-] Steps  [1-8] Monitor",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
