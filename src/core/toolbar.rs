//! Which toolbar the shell shows for each route.

use crate::core::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarKind {
    Home,
    Settings,
    Reader,
}

impl ToolbarKind {
    pub fn label(self) -> &'static str {
        match self {
            ToolbarKind::Home => "home",
            ToolbarKind::Settings => "settings",
            ToolbarKind::Reader => "reader",
        }
    }
}

/// `None` means the route renders without a toolbar.
pub fn toolbar_for(route: Route) -> Option<ToolbarKind> {
    match route {
        Route::Home => Some(ToolbarKind::Home),
        Route::Settings => Some(ToolbarKind::Settings),
        Route::Viewer => Some(ToolbarKind::Reader),
        Route::Recents => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recents_has_no_toolbar() {
        assert_eq!(toolbar_for(Route::Recents), None);
    }

    #[test]
    fn test_viewer_uses_reader_toolbar() {
        assert_eq!(toolbar_for(Route::Viewer), Some(ToolbarKind::Reader));
        assert_eq!(toolbar_for(Route::Home), Some(ToolbarKind::Home));
        assert_eq!(toolbar_for(Route::Settings), Some(ToolbarKind::Settings));
    }
}
