//! # Path Prompt Component
//!
//! Centered overlay where the user types a path to open. It stands in for the
//! platform file picker: Enter hands the path to `PathPicker`, Esc cancels.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::shell::component::{Component, EventHandler};
use crate::shell::event::ShellEvent;

#[derive(Debug, Default)]
pub struct PathPrompt {
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Trimmed input; empty means the user submitted nothing.
    Submit(String),
    Cancel,
}

impl EventHandler for PathPrompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &ShellEvent) -> Option<PromptEvent> {
        match event {
            ShellEvent::Escape => Some(PromptEvent::Cancel),
            ShellEvent::Submit => Some(PromptEvent::Submit(self.buffer.trim().to_string())),
            ShellEvent::Backspace => {
                self.buffer.pop();
                None
            }
            ShellEvent::InputChar(c) => {
                self.buffer.push(*c);
                None
            }
            // Drag-and-drop into a terminal usually arrives as a paste, often quoted.
            ShellEvent::Paste(text) => {
                let line = text.lines().next().unwrap_or_default();
                self.buffer.push_str(line.trim_matches(|c| c == '\'' || c == '"'));
                None
            }
            _ => None,
        }
    }
}

impl Component for PathPrompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, overlay, _] = Layout::horizontal([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .areas(row);

        frame.render_widget(Clear, overlay);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Open file ")
            .title_bottom(Line::from(" Enter Open  Esc Cancel ").centered());
        frame.render_widget(Paragraph::new(self.buffer.as_str()).block(block), overlay);

        let cursor_x = overlay.x + 1 + (self.buffer.width() as u16).min(overlay.width.saturating_sub(3));
        frame.set_cursor_position(Position::new(cursor_x, overlay.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_submit() {
        let mut prompt = PathPrompt::default();
        for c in " /tmp/a.pdf ".chars() {
            assert_eq!(prompt.handle_event(&ShellEvent::InputChar(c)), None);
        }
        assert_eq!(
            prompt.handle_event(&ShellEvent::Submit),
            Some(PromptEvent::Submit("/tmp/a.pdf".to_string()))
        );
    }

    #[test]
    fn test_backspace_edits() {
        let mut prompt = PathPrompt::default();
        prompt.handle_event(&ShellEvent::InputChar('a'));
        prompt.handle_event(&ShellEvent::InputChar('b'));
        prompt.handle_event(&ShellEvent::Backspace);
        assert_eq!(prompt.buffer, "a");
    }

    #[test]
    fn test_paste_strips_quotes() {
        let mut prompt = PathPrompt::default();
        prompt.handle_event(&ShellEvent::Paste("'/home/me/My Book.pdf'\n".to_string()));
        assert_eq!(prompt.buffer, "/home/me/My Book.pdf");
    }

    #[test]
    fn test_escape_cancels() {
        let mut prompt = PathPrompt::default();
        assert_eq!(prompt.handle_event(&ShellEvent::Escape), Some(PromptEvent::Cancel));
    }
}
