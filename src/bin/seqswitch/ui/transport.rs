//! Transport bar widget - shows tempo, clock state, step position, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiStateInit, UiStateUpdate};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    static_state: &UiStateInit,
    dynamic_state: &UiStateUpdate,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" seqswitch ").borders(Borders::ALL);

    let (clock_symbol, clock_str, clock_color) = if dynamic_state.clock_running {
        ("▶", "Clock", Color::Green)
    } else {
        ("⏸", "Manual", Color::Yellow)
    };

    // Step is shown 1-based like the panel labels. It can sit past the cycle
    // length after the knob is turned down.
    let step_color = if dynamic_state.current_step < dynamic_state.steps {
        Color::White
    } else {
        Color::Red
    };

    let sample_rate_khz = static_state.sample_rate / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", static_state.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", clock_symbol, clock_str),
            Style::default().fg(clock_color),
        ),
        Span::styled(
            format!(
                "Step {} / {}  ",
                dynamic_state.current_step as u32 + 1,
                dynamic_state.steps
            ),
            Style::default().fg(step_color),
        ),
        Span::styled(
            format!("Monitor: {}  ", dynamic_state.monitor + 1),
            Style::default().fg(Color::LightGreen),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate_khz),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
