//! # Terminal Shell
//!
//! The ratatui-specific host. Handles terminal I/O, renders the four screens,
//! and translates keyboard events into core calls and events.
//!
//! This is the only module that knows about ratatui and crossterm. It plays
//! the part a mobile host would: it forwards "hardware" keys (Esc and
//! Backspace act as Back), supplies the file picker, and exits when the core
//! declines a Back at the root screen.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event (including terminal resize). A freshly opened
//! document is drawn once in its loading state, with a quote, before the
//! loop awaits its page count.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::App;
use crate::core::events::Event;
use crate::core::keys::{HardwareKey, KeyDisposition};
use crate::core::navigation::Route;
use crate::core::picker::PathPicker;
use crate::core::quotes::QuoteBook;
use crate::shell::component::EventHandler;
use crate::shell::components::{PathPrompt, PromptEvent, RecentsEvent, RecentsListState};
use crate::shell::event::{ShellEvent, poll_event_immediate, poll_event_timeout};

/// Shell-specific presentation state (not part of core business logic)
pub struct ShellState {
    pub recents: RecentsListState,
    /// Recents revision the list snapshot was taken at.
    pub recents_seen: Option<u64>,
    /// Path prompt overlay (None = hidden)
    pub prompt: Option<PathPrompt>,
    pub status_message: String,
    quotes: QuoteBook,
    /// Quote for the load in progress; one per load.
    pub loading_quote: Option<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            recents: RecentsListState::default(),
            recents_seen: None,
            prompt: None,
            status_message: String::new(),
            quotes: QuoteBook::bundled(),
            loading_quote: None,
        }
    }

    /// Pick a quote when a load starts and drop it once the document is ready.
    pub fn sync_loading_quote(&mut self, app: &App) {
        if !app.store().reader().is_loading {
            self.loading_quote = None;
        } else if self.loading_quote.is_none() {
            self.loading_quote = Some(self.quotes.random().to_string());
        }
    }

    /// Reload the recents snapshot if the app's list may have changed.
    pub fn refresh_recents(&mut self, app: &App) {
        let revision = app.recents_revision();
        if self.recents_seen != Some(revision) {
            debug!("Refreshing recents list (revision {})", revision);
            self.recents.set_entries(app.recents());
            self.recents_seen = Some(revision);
        }
    }

    /// Display name of the selected document: its recents name, else the last path segment.
    pub fn document_name(&self, app: &App) -> Option<String> {
        let path = app.store().selected_file_path.as_deref()?;
        let name = self
            .recents
            .entries
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| {
                Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string())
            });
        Some(name)
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Whether the loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the shell until the user quits, then hand the app back for shutdown.
pub async fn run(mut app: App, open: Option<PathBuf>) -> std::io::Result<App> {
    let mut shell = ShellState::new();

    if let Some(path) = open {
        open_path(&mut app, &mut shell, &path.to_string_lossy()).await;
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        shell.refresh_recents(&app);
        shell.sync_loading_quote(&app);

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut shell)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        if app.store().reader().is_loading {
            app.load_document().await;
            needs_redraw = true;
            continue;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut flow = Flow::Continue;
        let pending: Vec<ShellEvent> = first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
            .collect();
        for event in pending {
            if handle_event(&mut app, &mut shell, event).await == Flow::Quit {
                flow = Flow::Quit;
                break;
            }
        }
        if flow == Flow::Quit {
            break Ok(());
        }
    };

    ratatui::restore();
    info!("Shell exited");
    result.map(|()| app)
}

async fn handle_event(app: &mut App, shell: &mut ShellState, event: ShellEvent) -> Flow {
    if matches!(event, ShellEvent::Resize) {
        return Flow::Continue;
    }
    if matches!(event, ShellEvent::ForceQuit) {
        return Flow::Quit;
    }

    // When the prompt is open, route all events to it
    if let Some(prompt) = shell.prompt.as_mut() {
        match prompt.handle_event(&event) {
            Some(PromptEvent::Submit(path)) => {
                shell.prompt = None;
                open_path(app, shell, &path).await;
            }
            Some(PromptEvent::Cancel) => {
                shell.prompt = None;
                shell.status_message = "No file selected".to_string();
            }
            None => {}
        }
        return Flow::Continue;
    }

    shell.status_message.clear();

    // Esc and Backspace are the hardware Back key. Declined at the root means exit.
    if matches!(event, ShellEvent::Escape | ShellEvent::Backspace) {
        return match app.handle_key(HardwareKey::Back) {
            KeyDisposition::Consumed => Flow::Continue,
            KeyDisposition::Default => Flow::Quit,
        };
    }

    // Global keys
    match event {
        ShellEvent::InputChar('q') => return Flow::Quit,
        ShellEvent::InputChar('o') => {
            shell.prompt = Some(PathPrompt::default());
            return Flow::Continue;
        }
        ShellEvent::InputChar('r') => {
            app.push_route(Route::Recents);
            return Flow::Continue;
        }
        ShellEvent::InputChar('s') => {
            app.push_route(Route::Settings);
            return Flow::Continue;
        }
        ShellEvent::InputChar('h') => {
            let hide = !app.store().hide_toolbar;
            app.set_hide_toolbar(hide);
            return Flow::Continue;
        }
        _ => {}
    }

    match app.current_route() {
        Route::Home => {
            if matches!(event, ShellEvent::Submit) {
                shell.prompt = Some(PathPrompt::default());
            }
        }
        Route::Recents => handle_recents_event(app, shell, &event),
        Route::Viewer => handle_viewer_event(app, &event),
        Route::Settings => handle_settings_event(app, &event),
    }
    Flow::Continue
}

fn handle_recents_event(app: &mut App, shell: &mut ShellState, event: &ShellEvent) {
    match shell.recents.handle_event(event) {
        Some(RecentsEvent::Open(file)) => {
            info!("Reopening {}", file.path);
            app.open_in_viewer(file);
        }
        Some(RecentsEvent::Delete(path)) => {
            app.delete_recent(&path);
            shell.status_message = "Removed from recents".to_string();
        }
        Some(RecentsEvent::ClearAll) => {
            app.clear_history();
            shell.status_message = "History cleared".to_string();
        }
        None => {}
    }
}

fn handle_viewer_event(app: &mut App, event: &ShellEvent) {
    let core_event = match event {
        ShellEvent::CursorRight | ShellEvent::PageDown | ShellEvent::InputChar(' ') => {
            Event::NextPage
        }
        ShellEvent::CursorLeft | ShellEvent::PageUp => Event::PrevPage,
        ShellEvent::InputChar('+') | ShellEvent::InputChar('=') => Event::ZoomIn,
        ShellEvent::InputChar('-') => Event::ZoomOut,
        ShellEvent::InputChar('0') => Event::ResetZoom,
        ShellEvent::InputChar('w') => Event::FitToWidth,
        ShellEvent::InputChar('t') => Event::ToggleToolbar,
        ShellEvent::InputChar('m') => {
            app.handle_key(HardwareKey::Menu);
            return;
        }
        _ => return,
    };
    app.dispatch(core_event);
}

fn handle_settings_event(app: &mut App, event: &ShellEvent) {
    match event {
        ShellEvent::InputChar('+') | ShellEvent::InputChar('=') => {
            app.update_settings(|s| s.zoom_in())
        }
        ShellEvent::InputChar('-') => app.update_settings(|s| s.zoom_out()),
        ShellEvent::InputChar('i') => {
            app.update_settings(|s| s.invert_pdf_in_dark_mode = !s.invert_pdf_in_dark_mode)
        }
        ShellEvent::InputChar('f') => {
            app.update_settings(|s| s.floating_toolbars = !s.floating_toolbars)
        }
        _ => {}
    }
}

/// Feed a typed path to the picker and report the outcome in the status line.
async fn open_path(app: &mut App, shell: &mut ShellState, path: &str) {
    let picker = PathPicker::new(path);
    if app.pick_and_open_file(&picker).await {
        shell.status_message.clear();
    } else {
        warn!("Could not open {:?}", path);
        shell.status_message = if path.is_empty() {
            "No file selected".to_string()
        } else {
            format!("Could not open {path}")
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quotes::FALLBACK_QUOTE;
    use crate::test_support::{sample_file, test_app};

    #[test]
    fn test_one_quote_per_load() {
        let mut app = test_app();
        let mut shell = ShellState {
            quotes: QuoteBook::from_json("[]"),
            ..ShellState::new()
        };
        shell.sync_loading_quote(&app);
        assert_eq!(shell.loading_quote, None);

        app.open_in_viewer(sample_file("a"));
        shell.sync_loading_quote(&app);
        assert_eq!(shell.loading_quote.as_deref(), Some(FALLBACK_QUOTE));

        app.dispatch(Event::PdfLoaded { total_pages: 4 });
        shell.sync_loading_quote(&app);
        assert_eq!(shell.loading_quote, None);
    }

    #[test]
    fn test_quote_is_kept_for_the_whole_load() {
        let mut app = test_app();
        let mut shell = ShellState::new();
        app.open_in_viewer(sample_file("a"));
        shell.sync_loading_quote(&app);
        let first = shell.loading_quote.clone();
        assert!(first.is_some());
        shell.sync_loading_quote(&app);
        assert_eq!(shell.loading_quote, first);
    }

    fn render_text(app: &App, shell: &mut ShellState) -> String {
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, app, shell)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_home_counts_the_recents_snapshot() {
        let app = test_app();
        let mut shell = ShellState::new();
        shell.recents.set_entries(vec![sample_file("a"), sample_file("b")]);
        // The app's storage is empty; Home must not go back to it on redraw.
        assert!(render_text(&app, &mut shell).contains("Recent files (2)"));
    }

    #[test]
    fn test_viewer_shows_quote_while_loading() {
        let mut app = test_app();
        let mut shell = ShellState {
            quotes: QuoteBook::from_json(r#"[{"book": "Moby-Dick", "quote": "Call me Ishmael."}]"#),
            ..ShellState::new()
        };
        app.open_in_viewer(sample_file("a"));
        shell.sync_loading_quote(&app);
        assert!(render_text(&app, &mut shell).contains("Call me Ishmael."));

        app.dispatch(Event::PdfLoaded { total_pages: 2 });
        shell.sync_loading_quote(&app);
        assert!(!render_text(&app, &mut shell).contains("Call me Ishmael."));
    }

    #[test]
    fn test_document_name_prefers_recents_name() {
        let mut app = test_app();
        let mut shell = ShellState::new();
        assert_eq!(shell.document_name(&app), None);

        app.open_file(sample_file("/books/a"));
        assert_eq!(shell.document_name(&app).as_deref(), Some("a"));
        shell.refresh_recents(&app);
        assert_eq!(shell.document_name(&app).as_deref(), Some("/books/a.pdf"));
    }
}
