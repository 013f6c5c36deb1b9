//! Lane panel - one row per output jack with its light

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiStateInit, UiStateUpdate};

/// Glyph and color for a light at the given brightness
fn light_glyph(brightness: f32) -> (&'static str, Color) {
    if brightness > 0.5 {
        ("●", Color::LightGreen)
    } else if brightness > 0.0 {
        ("◉", Color::Green)
    } else {
        ("○", Color::DarkGray)
    }
}

/// Label color for a lane row.
///
/// A lit lane outside the cycle (knob turned down mid-cycle) still carries the
/// signal until the next clock edge, so it is highlighted rather than dimmed.
fn label_color(in_cycle: bool, lit: bool) -> Color {
    match (in_cycle, lit) {
        (true, _) => Color::White,
        (false, true) => Color::Yellow,
        (false, false) => Color::DarkGray,
    }
}

/// Render the eight lanes, dimming the idle ones outside the current cycle
pub fn render_lanes(
    frame: &mut Frame,
    area: Rect,
    static_state: &UiStateInit,
    dynamic_state: &UiStateUpdate,
) {
    let block = Block::default().title(" Outputs ").borders(Borders::ALL);

    let lines: Vec<Line> = static_state
        .lane_names
        .iter()
        .zip(dynamic_state.lights.iter())
        .enumerate()
        .map(|(lane, (name, &brightness))| {
            let (glyph, light_color) = light_glyph(brightness);
            let in_cycle = lane < dynamic_state.steps as usize;
            let monitored = lane == dynamic_state.monitor as usize;

            let lit = brightness > 0.0;

            let mut label_style = Style::default().fg(label_color(in_cycle, lit));
            if lit {
                label_style = label_style.add_modifier(Modifier::BOLD);
            }

            Line::from(vec![
                Span::styled(format!(" {} ", glyph), Style::default().fg(light_color)),
                Span::styled(format!("{:8}", name), label_style),
                Span::styled(
                    if monitored { "◀ speakers" } else { "" },
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_glyph_tracks_brightness() {
        assert_eq!(light_glyph(1.0).0, "●");
        assert_eq!(light_glyph(0.2).0, "◉");
        assert_eq!(light_glyph(0.0).0, "○");
    }

    #[test]
    fn stale_lit_lane_is_not_dimmed() {
        // Knob shrank below the current step: the lane is outside the cycle
        // but still routing.
        assert_ne!(label_color(false, true), Color::DarkGray);
        assert_eq!(label_color(false, false), Color::DarkGray);
        assert_eq!(label_color(true, false), Color::White);
        assert_eq!(label_color(true, true), Color::White);
    }
}
