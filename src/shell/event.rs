use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Terminal input events, before the shell decides what they mean on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    ForceQuit, // Ctrl+C
    Escape,
    Backspace,
    Submit,
    InputChar(char),
    Paste(String),
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    PageUp,
    PageDown,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<ShellEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, waiting up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<ShellEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    let event = match event::read() {
        Ok(event) => event,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            return None;
        }
    };
    match event {
        // Only presses; releases arrive too when keyboard enhancement is on.
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(ShellEvent::ForceQuit),
                (_, KeyCode::Char(c)) => Some(ShellEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(ShellEvent::Backspace),
                (_, KeyCode::Enter) => Some(ShellEvent::Submit),
                (_, KeyCode::Esc) => Some(ShellEvent::Escape),
                (_, KeyCode::Up) => Some(ShellEvent::CursorUp),
                (_, KeyCode::Down) => Some(ShellEvent::CursorDown),
                (_, KeyCode::Left) => Some(ShellEvent::CursorLeft),
                (_, KeyCode::Right) => Some(ShellEvent::CursorRight),
                (_, KeyCode::PageUp) => Some(ShellEvent::PageUp),
                (_, KeyCode::PageDown) => Some(ShellEvent::PageDown),
                _ => None,
            }
        }
        Event::Paste(data) => Some(ShellEvent::Paste(data)),
        Event::Resize(_, _) => Some(ShellEvent::Resize),
        _ => None,
    }
}
