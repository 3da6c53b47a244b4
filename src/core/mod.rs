//! # Core Application Logic
//!
//! This module contains Serenity's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │            CORE             │
//!                    │       (this module)         │
//!                    │                             │
//!                    │  • App (context + bus)      │
//!                    │  • Event (what can happen)  │
//!                    │  • AppStore (nav + reader)  │
//!                    │  • RecentsStore (MRU list)  │
//!                    │                             │
//!                    │  Storage and file picking   │
//!                    │  sit behind traits.         │
//!                    └──────────────┬──────────────┘
//!                                   │
//!            ┌──────────────────────┼──────────────────────┐
//!            ▼                      ▼                      ▼
//!     ┌────────────┐         ┌────────────┐         ┌────────────┐
//!     │   Shell    │         │  Mobile    │         │   Tests    │
//!     │ (ratatui)  │         │  host      │         │            │
//!     └────────────┘         └────────────┘         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`app`]: `App`, the explicitly constructed application object
//! - [`events`]: the `Event` enum and the `EventBus`
//! - [`store`]: `AppStore`, owner of navigation and reader state
//! - [`navigation`]: `Route` and the `NavigationStack`
//! - [`recents`]: `RecentFile` and the persisted MRU list
//! - [`storage`]: the `KeyValueStore` trait and its backends
//! - [`document`]: page counts for opened files
//! - [`quotes`]: book quotes shown while a document loads

pub mod app;
pub mod config;
pub mod document;
pub mod events;
pub mod keys;
pub mod navigation;
pub mod picker;
pub mod quotes;
pub mod reader;
pub mod recents;
pub mod router;
pub mod settings;
pub mod storage;
pub mod store;
pub mod toolbar;

pub use app::App;
pub use events::Event;
pub use navigation::Route;
pub use recents::RecentFile;
