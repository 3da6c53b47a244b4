//! # Toolbar Component
//!
//! Renders the toolbar variant mapped to the current route. Routes without a
//! toolbar, a hidden reader toolbar, and the global hide flag all render nothing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::reader::ReaderState;
use crate::core::toolbar::ToolbarKind;
use crate::shell::component::Component;

pub struct Toolbar<'a> {
    pub kind: Option<ToolbarKind>,
    pub reader: &'a ReaderState,
    pub document_name: Option<&'a str>,
    pub floating: bool,
}

impl Toolbar<'_> {
    pub fn text(&self) -> Option<String> {
        let text = match self.kind? {
            ToolbarKind::Home => " o Open   r Recents   s Settings ".to_string(),
            ToolbarKind::Settings => " + / - Zoom   i Invert   f Floating toolbars ".to_string(),
            ToolbarKind::Reader => {
                if !self.reader.toolbar_visible {
                    return None;
                }
                format!(
                    " {}   page {}   {:.0}% ",
                    self.document_name.unwrap_or("(no document)"),
                    self.reader.page_label(),
                    self.reader.scale * 100.0
                )
            }
        };
        Some(text)
    }
}

impl Component for Toolbar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(text) = self.text() else {
            return;
        };
        let style = if self.floating {
            Style::default().fg(Color::Black).bg(Color::Gray)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(Line::styled(text, style), area);
    }
}
