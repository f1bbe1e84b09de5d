//! Status bar widget - shows phase, round, score and sound loading state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_recall::game::Phase;

use super::{LoadState, ViewState};

pub fn render_status(frame: &mut Frame, area: Rect, view: &ViewState) {
    let block = Block::default().title(" recall ").borders(Borders::ALL);
    let snap = &view.snapshot;

    let phase_color = match snap.phase {
        Phase::Idle => Color::White,
        Phase::Playing => Color::Yellow,
        Phase::AwaitingInput => Color::Green,
        Phase::GameOver => Color::Red,
    };

    let (sounds, sounds_color) = match &view.load_state {
        LoadState::Loading => ("loading", Color::Yellow),
        LoadState::Ready => ("ready", Color::DarkGray),
        LoadState::Failed(_) => ("failed", Color::Red),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", snap.phase.label()),
            Style::default().fg(phase_color),
        ),
        Span::styled(
            format!("Round {}  ", snap.sequence_len),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{}/{}  ", snap.input_len, snap.sequence_len),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Score: {}  Best: {}  ", snap.score, snap.best_score),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Sounds: {sounds}"),
            Style::default().fg(sounds_color),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
