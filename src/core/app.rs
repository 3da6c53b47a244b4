//! # Application
//!
//! The explicitly constructed application object. Built once at startup,
//! handed to the front-end, and shut down on exit.
//!
//! ```text
//! App
//! ├── ctx: AppContext
//! │   ├── store: AppStore             // navigation, selection, reader state
//! │   ├── recents: RecentsStore       // MRU list over `storage`
//! │   ├── router: Router              // what is on screen
//! │   ├── storage: Box<dyn KeyValueStore>
//! │   └── recents_revision: u64       // bumped whenever the list may have changed
//! └── bus: EventBus<AppContext>       // default wiring installed by `App::new`
//! ```
//!
//! Every state change goes through [`App::dispatch`]: the event is emitted,
//! then anything handlers queued on the store is emitted in FIFO order until
//! the queue is empty. One `dispatch` is one turn; nothing is left half-applied.

use std::path::Path;

use chrono::Utc;
use log::{debug, info, warn};

use crate::core::document;
use crate::core::events::{Event, EventBus, EventKind, SubscriptionId};
use crate::core::keys::{HardwareKey, KeyDisposition};
use crate::core::navigation::Route;
use crate::core::picker::FilePicker;
use crate::core::reader::ReaderStatePatch;
use crate::core::recents::{RecentFile, RecentFilePatch, RecentsStore};
use crate::core::router::Router;
use crate::core::settings::{Settings, clamp_zoom};
use crate::core::storage::KeyValueStore;
use crate::core::store::AppStore;

pub struct AppContext {
    pub store: AppStore,
    pub recents: RecentsStore,
    pub router: Router,
    pub storage: Box<dyn KeyValueStore>,
    pub recents_revision: u64,
}

impl AppContext {
    pub fn load_recents(&self) -> Vec<RecentFile> {
        self.recents.load_all(self.storage.as_ref())
    }

    /// Keep the router on whatever the navigation stack says is current.
    fn sync_router(&mut self) {
        let route = self.store.current_route();
        if self.router.current() != route {
            self.router.navigate(route);
        }
    }
}

pub struct App {
    ctx: AppContext,
    bus: EventBus<AppContext>,
    clock: fn() -> i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl App {
    /// Load settings from `storage` (falling back to `defaults`) and install the default handlers.
    pub fn new(storage: Box<dyn KeyValueStore>, defaults: Settings) -> Self {
        let settings = Settings::load(storage.as_ref(), defaults);
        let ctx = AppContext {
            store: AppStore::new(settings),
            recents: RecentsStore::default(),
            router: Router::default(),
            storage,
            recents_revision: 0,
        };
        let mut bus = EventBus::new();
        install_recents_handlers(&mut bus);
        install_navigation_handlers(&mut bus);
        install_reader_handlers(&mut bus);
        info!("Application started at {}", ctx.store.current_route());
        Self {
            ctx,
            bus,
            clock: now_millis,
        }
    }

    /// Replace the wall clock used for `lastOpened` stamps.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn store(&self) -> &AppStore {
        &self.ctx.store
    }

    pub fn current_route(&self) -> Route {
        self.ctx.store.current_route()
    }

    pub fn recents(&self) -> Vec<RecentFile> {
        self.ctx.load_recents()
    }

    pub fn recents_revision(&self) -> u64 {
        self.ctx.recents_revision
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut AppContext, &Event) + 'static,
    {
        self.bus.on(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.off(id)
    }

    /// Emit `event` and everything its handlers queue, in order.
    pub fn dispatch(&mut self, event: Event) {
        debug!("Dispatch {:?}", event);
        self.bus.emit(&mut self.ctx, &event);
        self.drain();
    }

    fn drain(&mut self) {
        while let Some(event) = self.ctx.store.take_queued() {
            debug!("Dispatch (queued) {:?}", event);
            self.bus.emit(&mut self.ctx, &event);
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn push_route(&mut self, route: Route) {
        self.ctx.store.push_route(route);
        self.ctx.sync_router();
    }

    pub fn pop_route(&mut self) {
        self.ctx.store.pop_route();
        self.ctx.sync_router();
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    pub fn open_file(&mut self, file: RecentFile) {
        let now = (self.clock)();
        self.ctx.store.open_file(file, now);
        self.drain();
    }

    /// Open a file and show it in the Viewer.
    pub fn open_in_viewer(&mut self, file: RecentFile) {
        self.open_file(file);
        self.push_route(Route::Viewer);
    }

    pub async fn pick_and_open_file(&mut self, picker: &dyn FilePicker) -> bool {
        let now = (self.clock)();
        let opened = self.ctx.store.pick_and_open_file(picker, now).await;
        if opened {
            self.ctx.sync_router();
            self.drain();
        }
        opened
    }

    /// Finish loading the selected document and report its page count.
    ///
    /// An unreadable document still completes the load, with no page count.
    pub async fn load_document(&mut self) {
        if !self.ctx.store.reader().is_loading {
            return;
        }
        let total_pages = match self.ctx.store.selected_file_path.clone() {
            Some(path) => match document::page_count(Path::new(&path)).await {
                Ok(pages) => pages,
                Err(e) => {
                    warn!("Could not read {}: {}", path, e);
                    0
                }
            },
            None => 0,
        };
        self.dispatch(Event::PdfLoaded { total_pages });
    }

    pub fn delete_recent(&mut self, path: &str) {
        self.dispatch(Event::DeleteRecentsEntry(path.to_string()));
    }

    pub fn clear_history(&mut self) {
        info!("Clearing recent files");
        self.ctx.recents.clear(self.ctx.storage.as_mut());
        self.dispatch(Event::RefreshRecents);
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn settings(&self) -> Settings {
        self.ctx.store.settings
    }

    /// Apply `change` to the settings and persist them immediately.
    pub fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.ctx.store.settings);
        self.ctx.store.settings.default_zoom = clamp_zoom(self.ctx.store.settings.default_zoom);
        self.ctx.store.settings.save(self.ctx.storage.as_mut());
        debug!("Settings updated: {:?}", self.ctx.store.settings);
    }

    pub fn set_hide_toolbar(&mut self, hide: bool) {
        self.ctx.store.hide_toolbar = hide;
    }

    // ------------------------------------------------------------------
    // Hardware keys
    // ------------------------------------------------------------------

    /// Decide whether the core consumes a key forwarded by the host.
    pub fn handle_key(&mut self, key: HardwareKey) -> KeyDisposition {
        let in_viewer = self.current_route() == Route::Viewer;
        debug!("Key {} on {}", key, self.current_route());
        match key {
            HardwareKey::Back => {
                if self.ctx.store.navigation().is_at_root() {
                    return KeyDisposition::Default;
                }
                self.dispatch(Event::GoBack);
                KeyDisposition::Consumed
            }
            HardwareKey::VolumeDown if in_viewer => {
                self.dispatch(Event::NextPage);
                KeyDisposition::Consumed
            }
            HardwareKey::VolumeUp if in_viewer => {
                self.dispatch(Event::PrevPage);
                KeyDisposition::Consumed
            }
            HardwareKey::Menu if in_viewer => {
                self.dispatch(Event::OpenToolbarDrawer);
                KeyDisposition::Consumed
            }
            _ => KeyDisposition::Default,
        }
    }

    /// Persist settings and release storage.
    pub fn shutdown(mut self) {
        self.ctx.store.settings.save(self.ctx.storage.as_mut());
        info!(
            "Application stopped at {} ({} recent files)",
            self.ctx.store.current_route(),
            self.ctx.load_recents().len()
        );
    }
}

fn install_recents_handlers(bus: &mut EventBus<AppContext>) {
    bus.on(EventKind::CreateRecentsEntry, |ctx, event| {
        if let Event::CreateRecentsEntry(file) = event {
            ctx.recents.create(ctx.storage.as_mut(), file.clone());
            ctx.recents_revision += 1;
        }
    });
    bus.on(EventKind::EditRecentsEntry, |ctx, event| {
        if let Event::EditRecentsEntry(patch) = event {
            ctx.recents.edit(ctx.storage.as_mut(), patch);
            ctx.recents_revision += 1;
        }
    });
    bus.on(EventKind::DeleteRecentsEntry, |ctx, event| {
        if let Event::DeleteRecentsEntry(path) = event {
            ctx.recents.delete(ctx.storage.as_mut(), path);
            ctx.recents_revision += 1;
        }
    });
    bus.on(EventKind::RefreshRecents, |ctx, _| {
        ctx.recents_revision += 1;
    });
}

fn install_navigation_handlers(bus: &mut EventBus<AppContext>) {
    bus.on(EventKind::GoBack, |ctx, _| {
        if let Some(target) = ctx.store.handle_back_button() {
            ctx.router.navigate(target);
        }
    });
}

fn install_reader_handlers(bus: &mut EventBus<AppContext>) {
    bus.on(EventKind::NextPage, |ctx, _| {
        if let Some(page) = ctx.store.reader().next_page() {
            turn_to(ctx, page);
        }
    });
    bus.on(EventKind::PrevPage, |ctx, _| {
        if let Some(page) = ctx.store.reader().prev_page() {
            turn_to(ctx, page);
        }
    });
    bus.on(EventKind::ZoomIn, |ctx, _| {
        let scale = ctx.store.reader().zoomed_in();
        set_scale(ctx, scale);
    });
    bus.on(EventKind::ZoomOut, |ctx, _| {
        let scale = ctx.store.reader().zoomed_out();
        set_scale(ctx, scale);
    });
    bus.on(EventKind::ResetZoom, |ctx, _| {
        let scale = ctx.store.settings.default_zoom;
        set_scale(ctx, scale);
    });
    bus.on(EventKind::ZoomChanged, |ctx, event| {
        if let Event::ZoomChanged(scale) = event {
            set_scale(ctx, clamp_zoom(*scale));
        }
    });
    bus.on(EventKind::PdfLoaded, |ctx, event| {
        if let Event::PdfLoaded { total_pages } = event {
            // A zero count means the format has no pages to clamp against.
            let page = ctx.store.reader().current_page;
            let current_page = if *total_pages > 0 {
                page.min(*total_pages).max(1)
            } else {
                page.max(1)
            };
            ctx.store.update_reader_state(ReaderStatePatch {
                total_pages: Some(*total_pages),
                current_page: Some(current_page),
                is_loading: Some(false),
                ..Default::default()
            });
        }
    });
    bus.on(EventKind::SelectionChange, |ctx, event| {
        if let Event::SelectionChange(text) = event {
            ctx.store.update_reader_state(ReaderStatePatch {
                selected_text: Some(Some(text.clone())),
                ..Default::default()
            });
        }
    });
    bus.on(EventKind::SelectionClear, |ctx, _| {
        ctx.store.update_reader_state(ReaderStatePatch {
            selected_text: Some(None),
            ..Default::default()
        });
    });
    bus.on(EventKind::ToggleToolbar, |ctx, _| {
        let visible = !ctx.store.reader().toolbar_visible;
        ctx.store.update_reader_state(ReaderStatePatch {
            toolbar_visible: Some(visible),
            ..Default::default()
        });
    });
}

/// Move to `page` and remember it on the open document's recents entry.
fn turn_to(ctx: &mut AppContext, page: u32) {
    ctx.store.update_reader_state(ReaderStatePatch {
        current_page: Some(page),
        ..Default::default()
    });
    if let Some(path) = ctx.store.selected_file_path.clone() {
        ctx.store
            .queue(Event::EditRecentsEntry(RecentFilePatch::new(path).page_number(page)));
    }
}

fn set_scale(ctx: &mut AppContext, scale: f64) {
    ctx.store.update_reader_state(ReaderStatePatch {
        scale: Some(scale),
        ..Default::default()
    });
}
