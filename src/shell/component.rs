use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields) and render to a `Frame`
/// within a given `Rect`. `render` takes `&mut self` so stateful widgets
/// (list selection, scroll offsets) can update during the render pass.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `ShellEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::ShellEvent) -> Option<Self::Event>;
}
