//! # Reader State
//!
//! Transient view state for the open document. Updates go through
//! [`ReaderState::merge`], which produces a whole new value from a patch;
//! nothing outside the application store writes individual fields.

use crate::core::settings::{ZOOM_STEP, clamp_zoom, round_step};

#[derive(Debug, Clone, PartialEq)]
pub struct ReaderState {
    /// 1-based.
    pub current_page: u32,
    /// 0 until the renderer reports a page count.
    pub total_pages: u32,
    pub is_loading: bool,
    pub is_rendering: bool,
    pub selected_text: Option<String>,
    pub scale: f64,
    pub toolbar_visible: bool,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            is_loading: false,
            is_rendering: false,
            selected_text: None,
            scale: 1.0,
            toolbar_visible: true,
        }
    }
}

/// Shallow update for [`ReaderState`]. Only `Some` fields overwrite.
///
/// `selected_text` is doubly optional: `Some(None)` clears the selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReaderStatePatch {
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub is_loading: Option<bool>,
    pub is_rendering: Option<bool>,
    pub selected_text: Option<Option<String>>,
    pub scale: Option<f64>,
    pub toolbar_visible: Option<bool>,
}

impl ReaderState {
    pub fn merge(&self, patch: ReaderStatePatch) -> Self {
        Self {
            current_page: patch.current_page.unwrap_or(self.current_page),
            total_pages: patch.total_pages.unwrap_or(self.total_pages),
            is_loading: patch.is_loading.unwrap_or(self.is_loading),
            is_rendering: patch.is_rendering.unwrap_or(self.is_rendering),
            selected_text: patch
                .selected_text
                .unwrap_or_else(|| self.selected_text.clone()),
            scale: patch.scale.unwrap_or(self.scale),
            toolbar_visible: patch.toolbar_visible.unwrap_or(self.toolbar_visible),
        }
    }

    /// The page after the current one, or `None` when already on the last known page.
    pub fn next_page(&self) -> Option<u32> {
        let next = self.current_page.saturating_add(1);
        if self.total_pages > 0 && next > self.total_pages {
            None
        } else {
            Some(next)
        }
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn zoomed_in(&self) -> f64 {
        clamp_zoom(round_step(self.scale + ZOOM_STEP))
    }

    pub fn zoomed_out(&self) -> f64 {
        clamp_zoom(round_step(self.scale - ZOOM_STEP))
    }

    /// "3 / 12", or "3" before the page count is known.
    pub fn page_label(&self) -> String {
        if self.total_pages > 0 {
            format!("{} / {}", self.current_page, self.total_pages)
        } else {
            self.current_page.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::MAX_ZOOM;

    #[test]
    fn test_merge_only_overwrites_present_fields() {
        let state = ReaderState::default();
        let merged = state.merge(ReaderStatePatch {
            current_page: Some(4),
            scale: Some(1.5),
            ..Default::default()
        });
        assert_eq!(merged.current_page, 4);
        assert_eq!(merged.scale, 1.5);
        assert_eq!(merged.total_pages, state.total_pages);
        assert!(merged.toolbar_visible);
    }

    #[test]
    fn test_merge_can_clear_selection() {
        let state = ReaderState {
            selected_text: Some("word".to_string()),
            ..Default::default()
        };
        let kept = state.merge(ReaderStatePatch::default());
        assert_eq!(kept.selected_text.as_deref(), Some("word"));
        let cleared = state.merge(ReaderStatePatch {
            selected_text: Some(None),
            ..Default::default()
        });
        assert_eq!(cleared.selected_text, None);
    }

    #[test]
    fn test_next_page_respects_known_total() {
        let state = ReaderState {
            current_page: 3,
            total_pages: 3,
            ..Default::default()
        };
        assert_eq!(state.next_page(), None);

        let unknown = ReaderState {
            current_page: 3,
            ..Default::default()
        };
        assert_eq!(unknown.next_page(), Some(4));
    }

    #[test]
    fn test_prev_page_stops_at_first() {
        assert_eq!(ReaderState::default().prev_page(), None);
        let state = ReaderState {
            current_page: 2,
            ..Default::default()
        };
        assert_eq!(state.prev_page(), Some(1));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let state = ReaderState {
            scale: MAX_ZOOM,
            ..Default::default()
        };
        assert_eq!(state.zoomed_in(), MAX_ZOOM);
        assert_eq!(ReaderState::default().zoomed_out(), 0.9);
    }

    #[test]
    fn test_page_label() {
        let state = ReaderState {
            current_page: 3,
            total_pages: 12,
            ..Default::default()
        };
        assert_eq!(state.page_label(), "3 / 12");
        assert_eq!(ReaderState::default().page_label(), "1");
    }
}
