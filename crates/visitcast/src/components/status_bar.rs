use super::{Component, EventResult};
use crate::state::{AppState, TabId};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text(state: &AppState) -> &'static str {
        match state.active_tab {
            TabId::Predictor => {
                "1-3: tabs | j/k: field | h/l: adjust | H/L: ×10 | d: sweep | r: reset | e: export | q: quit"
            }
            TabId::GwrAnalysis => "1-3: tabs | c: coefficient | q: quit",
            TabId::UrbanRural => "1-3: tabs | ←/→: section | q: quit",
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error.as_str()),
                Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
            ])
        } else if let Some(status) = &state.status_message {
            Line::from(vec![
                Span::styled(status.as_str(), Style::default().fg(Color::Green)),
                Span::raw(" | "),
                Span::styled(Self::get_help_text(state), Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled(Self::get_help_text(state), Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled(state.dataset.label(), Style::default().fg(Color::DarkGray)),
            ])
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
