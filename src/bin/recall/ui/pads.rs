//! Pad row - one coloured block per sound, flashing when it plays

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::ViewState;

/// Saturation / lightness of idle and lit pads
const SATURATION: f32 = 0.7;
const IDLE_LIGHTNESS: f32 = 0.45;
const LIT_LIGHTNESS: f32 = 0.75;

pub fn render_pads(frame: &mut Frame, area: Rect, view: &ViewState) {
    let count = view.pads.len().max(1) as u32;
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, count); count as usize])
        .spacing(1)
        .split(area);

    let accepting = view.snapshot.phase.accepts_input();

    for (index, (pad, cell)) in view.pads.iter().zip(columns.iter()).enumerate() {
        let lit = view.lit == Some(index);
        let lightness = if lit { LIT_LIGHTNESS } else { IDLE_LIGHTNESS };
        let color = pad_color(index, lightness);

        let border = if accepting || lit {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let label = Line::styled(
            format!("{}  {}", index + 1, pad.name),
            Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if lit { BorderType::Thick } else { BorderType::Rounded })
            .border_style(border)
            .style(Style::default().bg(color));

        frame.render_widget(Paragraph::new(label).centered().block(block), *cell);
    }
}

/// Pads are spread 90° apart on the colour wheel.
fn pad_color(index: usize, lightness: f32) -> Color {
    let hue = (index as f32 * 90.0) % 360.0;
    let (r, g, b) = hsl_to_rgb(hue, SATURATION, lightness);
    Color::Rgb(r, g, b)
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
