//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the monitored lane as an oscilloscope trace
///
/// The trace dims while the lane is not the active step; its samples are
/// all 0.0 then and the line sits flat on the axis.
pub fn render_waveform(
    frame: &mut Frame,
    area: Rect,
    lane_name: &str,
    lane_active: bool,
    audio_buffer: &[f32],
) {
    let (title, trace_color) = if lane_active {
        (format!(" {} ", lane_name), Color::Cyan)
    } else {
        (format!(" {} (silent) ", lane_name), Color::DarkGray)
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    // Convert audio samples to chart data points
    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let x = i as f64 / audio_buffer.len() as f64;
            let y = sample as f64;
            (x, y)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(trace_color))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
