//! # Application Store
//!
//! Sole owner of navigation, the selected file and reader view state.
//!
//! ```text
//! AppStore
//! ├── selected_file_path: Option<String>   // document shown in the Viewer
//! ├── navigation: NavigationStack          // screen history
//! ├── reader: ReaderState                  // page, zoom, selection, toolbar
//! ├── settings: Settings                   // persisted preferences
//! ├── hide_toolbar: bool                   // shell-level toolbar override
//! └── outbox: VecDeque<Event>              // events raised while handling events
//! ```
//!
//! The store never touches storage itself. Operations that affect the recents
//! list queue an event in the outbox; [`crate::core::app::App`] drains it
//! through the bus once the current turn finishes.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::core::events::Event;
use crate::core::navigation::{NavigationStack, Route, TransitionDirection};
use crate::core::picker::FilePicker;
use crate::core::reader::{ReaderState, ReaderStatePatch};
use crate::core::recents::RecentFile;
use crate::core::settings::Settings;

#[derive(Debug, Clone, Default)]
pub struct AppStore {
    pub selected_file_path: Option<String>,
    navigation: NavigationStack,
    reader: ReaderState,
    pub settings: Settings,
    pub hide_toolbar: bool,
    outbox: VecDeque<Event>,
}

impl AppStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    pub fn current_route(&self) -> Route {
        self.navigation.current()
    }

    pub fn transition_direction(&self) -> TransitionDirection {
        self.navigation.direction()
    }

    pub fn push_route(&mut self, route: Route) {
        self.navigation.push(route);
    }

    pub fn pop_route(&mut self) {
        self.navigation.pop();
    }

    pub fn handle_back_button(&mut self) -> Option<Route> {
        self.navigation.handle_back_button()
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    pub fn set_selected_file(&mut self, path: Option<String>) {
        debug!("Selected file: {:?}", path);
        self.selected_file_path = path;
    }

    /// Record `file` as just opened. The recents list is updated when the outbox drains.
    pub fn add_file_to_store(&mut self, file: RecentFile, now_ms: i64) {
        self.queue(Event::CreateRecentsEntry(RecentFile {
            last_opened: Some(now_ms),
            ..file
        }));
    }

    /// Select `file` and start loading it, resuming at its saved page.
    pub fn open_file(&mut self, file: RecentFile, now_ms: i64) {
        let path = file.path.clone();
        let resume_page = file.page_number.unwrap_or(1).max(1);
        self.add_file_to_store(file, now_ms);
        self.set_selected_file(Some(path));
        self.reader = ReaderState {
            current_page: resume_page,
            total_pages: 0,
            is_loading: true,
            scale: self.settings.default_zoom,
            ..ReaderState::default()
        };
    }

    /// Await the picker and open whatever it returns.
    ///
    /// Returns false with no state change on cancellation or picker failure.
    pub async fn pick_and_open_file(&mut self, picker: &dyn FilePicker, now_ms: i64) -> bool {
        match picker.pick_file().await {
            Ok(Some(file)) => {
                self.open_file(file, now_ms);
                self.push_route(Route::Viewer);
                true
            }
            Ok(None) => {
                debug!("File picker dismissed without a selection");
                false
            }
            Err(e) => {
                warn!("Failed to pick file with metadata: {}", e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Reader
    // ------------------------------------------------------------------

    pub fn reader(&self) -> &ReaderState {
        &self.reader
    }

    pub fn update_reader_state(&mut self, patch: ReaderStatePatch) {
        self.reader = self.reader.merge(patch);
    }

    // ------------------------------------------------------------------
    // Outbox
    // ------------------------------------------------------------------

    pub fn queue(&mut self, event: Event) {
        self.outbox.push_back(event);
    }

    pub fn take_queued(&mut self) -> Option<Event> {
        self.outbox.pop_front()
    }

    pub fn has_queued(&self) -> bool {
        !self.outbox.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CancelPicker, FailingPicker, FixedPicker, sample_file};

    #[test]
    fn test_add_file_stamps_last_opened() {
        let mut store = AppStore::default();
        store.add_file_to_store(sample_file("a"), 42);
        match store.take_queued() {
            Some(Event::CreateRecentsEntry(file)) => {
                assert_eq!(file.path, "a");
                assert_eq!(file.last_opened, Some(42));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(!store.has_queued());
    }

    #[test]
    fn test_open_file_selects_path_and_resets_reader() {
        let mut store = AppStore::new(Settings {
            default_zoom: 1.25,
            ..Default::default()
        });
        store.update_reader_state(ReaderStatePatch {
            current_page: Some(7),
            ..Default::default()
        });
        store.open_file(sample_file("a"), 1);
        assert_eq!(store.selected_file_path.as_deref(), Some("a"));
        assert_eq!(store.reader().current_page, 1);
        assert_eq!(store.reader().scale, 1.25);
    }

    #[test]
    fn test_open_file_resumes_saved_page_and_starts_loading() {
        let mut store = AppStore::default();
        store.update_reader_state(ReaderStatePatch {
            total_pages: Some(40),
            ..Default::default()
        });
        let file = RecentFile {
            page_number: Some(12),
            ..sample_file("a")
        };
        store.open_file(file, 1);
        assert_eq!(store.reader().current_page, 12);
        assert_eq!(store.reader().total_pages, 0);
        assert!(store.reader().is_loading);
    }

    #[test]
    fn test_pick_and_open_pushes_viewer() {
        let mut store = AppStore::default();
        let picker = FixedPicker(sample_file("a"));
        let opened = tokio_test::block_on(store.pick_and_open_file(&picker, 5));
        assert!(opened);
        assert_eq!(store.current_route(), Route::Viewer);
        assert_eq!(store.selected_file_path.as_deref(), Some("a"));
        assert!(store.has_queued());
    }

    #[test]
    fn test_pick_cancelled_changes_nothing() {
        let mut store = AppStore::default();
        let opened = tokio_test::block_on(store.pick_and_open_file(&CancelPicker, 5));
        assert!(!opened);
        assert_eq!(store.current_route(), Route::Home);
        assert_eq!(store.selected_file_path, None);
        assert!(!store.has_queued());
    }

    #[test]
    fn test_pick_failure_is_swallowed() {
        let mut store = AppStore::default();
        let opened = tokio_test::block_on(store.pick_and_open_file(&FailingPicker, 5));
        assert!(!opened);
        assert_eq!(store.navigation().routes(), &[Route::Home]);
    }

    #[test]
    fn test_outbox_is_fifo() {
        let mut store = AppStore::default();
        store.queue(Event::NextPage);
        store.queue(Event::RefreshRecents);
        assert_eq!(store.take_queued(), Some(Event::NextPage));
        assert_eq!(store.take_queued(), Some(Event::RefreshRecents));
        assert_eq!(store.take_queued(), None);
    }
}
