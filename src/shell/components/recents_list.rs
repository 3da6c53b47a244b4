//! # Recents List Component
//!
//! Body of the Recents screen: recently opened documents, newest first.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecentsListState` lives in `ShellState`
//! - `RecentsList` is created each frame with borrowed state
//!
//! The list is a snapshot. The shell refreshes it whenever the app's recents
//! revision moves, so it never edits entries itself; it only emits intents.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::recents::RecentFile;
use crate::shell::component::{Component, EventHandler};
use crate::shell::event::ShellEvent;

/// Persistent state for the recents list.
pub struct RecentsListState {
    pub entries: Vec<RecentFile>,
    pub selected: usize,
    pub confirm_delete: bool,
    pub confirm_clear: bool,
    pub list_state: ListState,
}

impl Default for RecentsListState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecentsListState {
    pub fn new(entries: Vec<RecentFile>) -> Self {
        let mut state = Self {
            entries: Vec::new(),
            selected: 0,
            confirm_delete: false,
            confirm_clear: false,
            list_state: ListState::default(),
        };
        state.set_entries(entries);
        state
    }

    /// Replace the snapshot, keeping the selection on the same path when it survives.
    pub fn set_entries(&mut self, entries: Vec<RecentFile>) {
        let selected_path = self.entries.get(self.selected).map(|f| f.path.clone());
        self.entries = entries;
        self.selected = selected_path
            .and_then(|path| self.entries.iter().position(|f| f.path == path))
            .unwrap_or(0);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.entries.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.entries.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

impl EventHandler for RecentsListState {
    type Event = RecentsEvent;

    fn handle_event(&mut self, event: &ShellEvent) -> Option<RecentsEvent> {
        // Reset confirmations on any other key
        if !matches!(event, ShellEvent::InputChar('d')) {
            self.confirm_delete = false;
        }
        if !matches!(event, ShellEvent::InputChar('c')) {
            self.confirm_clear = false;
        }

        match event {
            ShellEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            ShellEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            ShellEvent::Submit => self
                .entries
                .get(self.selected)
                .map(|file| RecentsEvent::Open(file.clone())),
            ShellEvent::InputChar('d') => {
                let path = self.entries.get(self.selected)?.path.clone();
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(RecentsEvent::Delete(path))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            ShellEvent::InputChar('c') => {
                if self.entries.is_empty() {
                    return None;
                }
                if self.confirm_clear {
                    self.confirm_clear = false;
                    Some(RecentsEvent::ClearAll)
                } else {
                    self.confirm_clear = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Intents emitted by the recents list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentsEvent {
    Open(RecentFile),
    Delete(String),
    ClearAll,
}

/// Transient render wrapper for the recents list.
pub struct RecentsList<'a> {
    state: &'a mut RecentsListState,
}

impl<'a> RecentsList<'a> {
    pub fn new(state: &'a mut RecentsListState) -> Self {
        Self { state }
    }
}

impl Component for RecentsList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.confirm_delete {
            " Press d again to confirm delete "
        } else if self.state.confirm_clear {
            " Press c again to clear all history "
        } else {
            " Enter Open  d Delete  c Clear history  Esc Back "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recent files ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No recent files.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let date = file
                    .last_opened
                    .map(format_timestamp)
                    .unwrap_or_else(|| "      ".to_string());
                let page = file
                    .page_number
                    .map(|p| format!("p.{p}"))
                    .unwrap_or_default();
                let kind = short_type(&file.file_type);

                // Layout: "Jan 15  <name>   pdf  p.12"
                let fixed_width = date.width() + 2 + kind.width() + 2 + page.width();
                let name_width = inner_width.saturating_sub(fixed_width + 2);
                let name = truncate_str(&file.name, name_width);
                let padded_name = format!("{}{}", name, " ".repeat(name_width.saturating_sub(name.width())));

                let style = if i == self.state.selected {
                    let color = if self.state.confirm_delete { Color::Red } else { Color::White };
                    Style::default()
                        .fg(color)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(date, style),
                    Span::styled("  ", style),
                    Span::styled(padded_name, style),
                    Span::styled("  ", style),
                    Span::styled(kind.to_string(), style),
                    Span::styled("  ", style),
                    Span::styled(page, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Format a millisecond timestamp as "Jan 15" style date.
fn format_timestamp(ms: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d").to_string()
}

/// "application/pdf" → "pdf".
fn short_type(mime: &str) -> &str {
    let subtype = mime.rsplit('/').next().unwrap_or(mime);
    subtype.split('+').next().unwrap_or(subtype)
}

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_file;

    fn list_of(paths: &[&str]) -> RecentsListState {
        RecentsListState::new(paths.iter().map(|p| sample_file(p)).collect())
    }

    #[test]
    fn test_enter_opens_selected() {
        let mut list = list_of(&["a", "b"]);
        list.handle_event(&ShellEvent::CursorDown);
        assert_eq!(
            list.handle_event(&ShellEvent::Submit),
            Some(RecentsEvent::Open(sample_file("b")))
        );
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut list = list_of(&["a"]);
        assert_eq!(list.handle_event(&ShellEvent::InputChar('d')), None);
        assert!(list.confirm_delete);
        assert_eq!(
            list.handle_event(&ShellEvent::InputChar('d')),
            Some(RecentsEvent::Delete("a".to_string()))
        );
    }

    #[test]
    fn test_other_key_cancels_confirmation() {
        let mut list = list_of(&["a"]);
        list.handle_event(&ShellEvent::InputChar('c'));
        list.handle_event(&ShellEvent::CursorDown);
        assert!(!list.confirm_clear);
        assert_eq!(list.handle_event(&ShellEvent::InputChar('c')), None);
        assert_eq!(list.handle_event(&ShellEvent::InputChar('c')), Some(RecentsEvent::ClearAll));
    }

    #[test]
    fn test_empty_list_emits_nothing() {
        let mut list = RecentsListState::default();
        assert_eq!(list.handle_event(&ShellEvent::Submit), None);
        assert_eq!(list.handle_event(&ShellEvent::InputChar('d')), None);
        assert_eq!(list.handle_event(&ShellEvent::InputChar('c')), None);
    }

    #[test]
    fn test_refresh_keeps_selection_on_same_path() {
        let mut list = list_of(&["a", "b", "c"]);
        list.handle_event(&ShellEvent::CursorDown);
        list.set_entries(vec![sample_file("b"), sample_file("a"), sample_file("c")]);
        assert_eq!(list.selected, 0);
        list.set_entries(vec![sample_file("c")]);
        assert_eq!(list.selected, 0);
        list.set_entries(Vec::new());
        assert_eq!(list.list_state.selected(), None);
    }

    #[test]
    fn test_short_type() {
        assert_eq!(short_type("application/pdf"), "pdf");
        assert_eq!(short_type("application/epub+zip"), "epub");
        assert_eq!(short_type("weird"), "weird");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a long file name.pdf", 10), "a long ...");
        assert_eq!(truncate_str("abcdef", 2), "..");
    }
}
