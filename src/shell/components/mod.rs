//! # Shell Components
//!
//! - [`title_bar`]: route name and status line
//! - [`toolbar`]: per-route toolbar variant
//! - [`recents_list`]: the Recents screen list (open / delete / clear)
//! - [`path_prompt`]: overlay that feeds a path to the file picker

pub mod path_prompt;
pub mod recents_list;
pub mod title_bar;
pub mod toolbar;

pub use path_prompt::{PathPrompt, PromptEvent};
pub use recents_list::{RecentsEvent, RecentsListState};
pub use title_bar::TitleBar;
pub use toolbar::Toolbar;
