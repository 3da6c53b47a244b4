//! # TitleBar Component
//!
//! Top line: app name, current route, and the transient status message.
//! Purely presentational; all data arrives as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::navigation::{Route, TransitionDirection};
use crate::shell::component::Component;

pub struct TitleBar<'a> {
    pub route: Route,
    pub direction: TransitionDirection,
    pub status_message: &'a str,
}

impl TitleBar<'_> {
    pub fn title_text(&self) -> String {
        // The arrow stands in for the push/pop slide animation.
        let arrow = match self.direction {
            TransitionDirection::Push => "→",
            TransitionDirection::Pop => "←",
        };
        if self.status_message.is_empty() {
            format!("Serenity {} {}", arrow, self.route)
        } else {
            format!("Serenity {} {} | {}", arrow, self.route, self.status_message)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_without_status() {
        let bar = TitleBar {
            route: Route::Home,
            direction: TransitionDirection::Push,
            status_message: "",
        };
        assert_eq!(bar.title_text(), "Serenity → Home");
    }

    #[test]
    fn test_title_with_status_after_pop() {
        let bar = TitleBar {
            route: Route::Recents,
            direction: TransitionDirection::Pop,
            status_message: "No file selected",
        };
        assert_eq!(bar.title_text(), "Serenity ← Recents | No file selected");
    }
}
