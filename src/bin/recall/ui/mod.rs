//! TUI module for recall
//!
//! One screen: status bar on top, the row of pads, a message line and the
//! key help. A popup covers the pads after a wrong answer.

mod pads;
mod status;

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use saavy_recall::game::GameSnapshot;

use pads::render_pads;
use status::render_status;

/// Static information about one pad
#[derive(Clone, Debug)]
pub struct PadInfo {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Everything the screen needs for one frame
pub struct ViewState {
    pub pads: Vec<PadInfo>,
    pub snapshot: GameSnapshot,
    pub load_state: LoadState,
    /// Pad currently flashing
    pub lit: Option<usize>,
    /// Final score of the last game, while its popup is shown
    pub game_over: Option<u32>,
    pub status: String,
}

impl ViewState {
    pub fn new(pads: Vec<PadInfo>) -> Self {
        Self {
            pads,
            snapshot: GameSnapshot::default(),
            load_state: LoadState::Loading,
            lit: None,
            game_over: None,
            status: "Loading sounds...".into(),
        }
    }
}

/// Render the whole screen
pub fn render(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(7),    // Pads
            Constraint::Length(3), // Message
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_status(frame, chunks[0], view);
    render_pads(frame, chunks[1], view);

    let message = Paragraph::new(view.status.as_str())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, chunks[2]);

    let help = Paragraph::new(" [Space] Start  [1-9] Tap pad  [Q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);

    if let Some(score) = view.game_over {
        render_game_over(frame, chunks[1], score);
    }
}

fn render_game_over(frame: &mut Frame, area: Rect, score: u32) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(32)])
        .flex(Flex::Center)
        .areas(row);

    let text = vec![
        Line::styled(
            format!("Final score: {score}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled("[Space] play again", Style::default().fg(Color::DarkGray)),
    ];
    let paragraph = Paragraph::new(text)
        .centered()
        .block(
            Block::default()
                .title(" Wrong! ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
