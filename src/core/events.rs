//! # Events
//!
//! Everything the UI can announce becomes an [`Event`].
//! User picks a file? That's `Event::CreateRecentsEntry(file)`.
//! Hardware back key? That's `Event::GoBack`.
//!
//! The [`EventBus`] maps each [`EventKind`] to an ordered list of handlers.
//!
//! ```text
//! emit(ctx, event)
//!   └─ for handler in handlers[event.kind()]   // subscription order
//!         handler(ctx, event)                  // synchronous, same turn
//! ```
//!
//! Handlers get the application context by `&mut`, so they mutate state
//! directly. There is no error isolation: a panicking handler unwinds through
//! `emit` to the caller. Handlers that need to raise further events queue them
//! on the context; see [`crate::core::app::App::dispatch`].

use std::collections::HashMap;

use log::debug;

use crate::core::recents::{RecentFile, RecentFilePatch};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    NextPage,
    PrevPage,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    FitToWidth,
    GoBack,
    PdfLoaded { total_pages: u32 },
    SelectionChange(String),
    SelectionClear,
    LookupSelection,
    OpenToolbarDrawer,
    ZoomChanged(f64),
    ToggleToolbar,
    CreateRecentsEntry(RecentFile),
    EditRecentsEntry(RecentFilePatch),
    /// Path of the entry to remove.
    DeleteRecentsEntry(String),
    RefreshRecents,
}

/// Payload-free discriminant of [`Event`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NextPage,
    PrevPage,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    FitToWidth,
    GoBack,
    PdfLoaded,
    SelectionChange,
    SelectionClear,
    LookupSelection,
    OpenToolbarDrawer,
    ZoomChanged,
    ToggleToolbar,
    CreateRecentsEntry,
    EditRecentsEntry,
    DeleteRecentsEntry,
    RefreshRecents,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::NextPage => EventKind::NextPage,
            Event::PrevPage => EventKind::PrevPage,
            Event::ZoomIn => EventKind::ZoomIn,
            Event::ZoomOut => EventKind::ZoomOut,
            Event::ResetZoom => EventKind::ResetZoom,
            Event::FitToWidth => EventKind::FitToWidth,
            Event::GoBack => EventKind::GoBack,
            Event::PdfLoaded { .. } => EventKind::PdfLoaded,
            Event::SelectionChange(_) => EventKind::SelectionChange,
            Event::SelectionClear => EventKind::SelectionClear,
            Event::LookupSelection => EventKind::LookupSelection,
            Event::OpenToolbarDrawer => EventKind::OpenToolbarDrawer,
            Event::ZoomChanged(_) => EventKind::ZoomChanged,
            Event::ToggleToolbar => EventKind::ToggleToolbar,
            Event::CreateRecentsEntry(_) => EventKind::CreateRecentsEntry,
            Event::EditRecentsEntry(_) => EventKind::EditRecentsEntry,
            Event::DeleteRecentsEntry(_) => EventKind::DeleteRecentsEntry,
            Event::RefreshRecents => EventKind::RefreshRecents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler<C> = Box<dyn FnMut(&mut C, &Event)>;

struct Subscription<C> {
    id: SubscriptionId,
    handler: Handler<C>,
}

/// Synchronous, in-order publish/subscribe over [`Event`].
pub struct EventBus<C> {
    handlers: HashMap<EventKind, Vec<Subscription<C>>>,
    next_id: u64,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`. It runs after every handler registered before it.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C, &Event) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push(Subscription {
            id,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        for subscriptions in self.handlers.values_mut() {
            if let Some(index) = subscriptions.iter().position(|s| s.id == id) {
                subscriptions.remove(index);
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every current subscriber of its kind, returning how many ran.
    pub fn emit(&mut self, ctx: &mut C, event: &Event) -> usize {
        let Some(subscriptions) = self.handlers.get_mut(&event.kind()) else {
            debug!("No handlers for {:?}", event.kind());
            return 0;
        };
        for subscription in subscriptions.iter_mut() {
            (subscription.handler)(ctx, event);
        }
        subscriptions.len()
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        bus.on(EventKind::GoBack, |log, _| log.push("first"));
        bus.on(EventKind::GoBack, |log, _| log.push("second"));
        bus.on(EventKind::NextPage, |log, _| log.push("other"));

        let mut log = Vec::new();
        assert_eq!(bus.emit(&mut log, &Event::GoBack), 2);
        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn test_emit_without_handlers_is_noop() {
        let mut bus: EventBus<u32> = EventBus::new();
        let mut count = 0;
        assert_eq!(bus.emit(&mut count, &Event::RefreshRecents), 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_handler_sees_payload() {
        let mut bus: EventBus<Option<String>> = EventBus::new();
        bus.on(EventKind::DeleteRecentsEntry, |seen, event| {
            if let Event::DeleteRecentsEntry(path) = event {
                *seen = Some(path.clone());
            }
        });
        let mut seen = None;
        bus.emit(&mut seen, &Event::DeleteRecentsEntry("/docs/a.pdf".to_string()));
        assert_eq!(seen.as_deref(), Some("/docs/a.pdf"));
    }

    #[test]
    fn test_off_removes_only_that_handler() {
        let mut bus: EventBus<u32> = EventBus::new();
        let first = bus.on(EventKind::ZoomIn, |n, _| *n += 1);
        bus.on(EventKind::ZoomIn, |n, _| *n += 10);

        assert!(bus.off(first));
        assert!(!bus.off(first));

        let mut n = 0;
        bus.emit(&mut n, &Event::ZoomIn);
        assert_eq!(n, 10);
        assert_eq!(bus.handler_count(EventKind::ZoomIn), 1);
    }

    #[test]
    #[should_panic(expected = "handler failed")]
    fn test_panicking_handler_propagates() {
        let mut bus: EventBus<()> = EventBus::new();
        bus.on(EventKind::ToggleToolbar, |_, _| panic!("handler failed"));
        bus.emit(&mut (), &Event::ToggleToolbar);
    }

    #[test]
    fn test_kind_ignores_payload() {
        assert_eq!(
            Event::PdfLoaded { total_pages: 3 }.kind(),
            Event::PdfLoaded { total_pages: 9 }.kind()
        );
        assert_eq!(Event::ZoomChanged(1.2).kind(), EventKind::ZoomChanged);
    }
}
