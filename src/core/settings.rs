//! # Reader Settings
//!
//! User preferences persisted one value per storage key, each as a JSON scalar
//! (`0.9`, `true`). A missing or malformed value falls back to the default for
//! that field only; the others still load.

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::storage::{KeyValueStore, StorageError};

pub const DEFAULT_ZOOM_KEY: &str = "settings-default-zoom";
pub const INVERT_PDF_KEY: &str = "settings-invert-pdf-dark-mode";
pub const FLOATING_TOOLBARS_KEY: &str = "settings-floating-toolbars";

pub const DEFAULT_ZOOM: f64 = 0.9;
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub default_zoom: f64,
    pub invert_pdf_in_dark_mode: bool,
    pub floating_toolbars: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            invert_pdf_in_dark_mode: true,
            floating_toolbars: true,
        }
    }
}

/// Clamp a zoom scale into the supported range.
pub fn clamp_zoom(scale: f64) -> f64 {
    if scale.is_nan() {
        return DEFAULT_ZOOM;
    }
    scale.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Settings {
    /// Load each field from storage, using `defaults` where nothing usable is stored.
    pub fn load(storage: &dyn KeyValueStore, defaults: Settings) -> Self {
        let settings = Self {
            default_zoom: clamp_zoom(read_or(storage, DEFAULT_ZOOM_KEY, defaults.default_zoom)),
            invert_pdf_in_dark_mode: read_or(
                storage,
                INVERT_PDF_KEY,
                defaults.invert_pdf_in_dark_mode,
            ),
            floating_toolbars: read_or(storage, FLOATING_TOOLBARS_KEY, defaults.floating_toolbars),
        };
        debug!("Settings loaded: {:?}", settings);
        settings
    }

    pub fn save(&self, storage: &mut dyn KeyValueStore) {
        write(storage, DEFAULT_ZOOM_KEY, &self.default_zoom);
        write(storage, INVERT_PDF_KEY, &self.invert_pdf_in_dark_mode);
        write(storage, FLOATING_TOOLBARS_KEY, &self.floating_toolbars);
    }

    pub fn zoom_in(&mut self) {
        self.default_zoom = clamp_zoom(round_step(self.default_zoom + ZOOM_STEP));
    }

    pub fn zoom_out(&mut self) {
        self.default_zoom = clamp_zoom(round_step(self.default_zoom - ZOOM_STEP));
    }
}

/// Keeps repeated steps from drifting (0.9 + 0.1 + 0.1 stays 1.1).
pub fn round_step(scale: f64) -> f64 {
    (scale * 100.0).round() / 100.0
}

fn read_or<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str, default: T) -> T {
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring malformed setting {}: {}", key, e);
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!("Failed to read setting {}: {}", key, e);
            default
        }
    }
}

fn write<T: Serialize>(storage: &mut dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| storage.set(key, &json));
    if let Err(e) = result {
        warn!("Failed to save setting {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    #[test]
    fn test_empty_storage_uses_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage, Settings::default()), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            default_zoom: 1.5,
            invert_pdf_in_dark_mode: false,
            floating_toolbars: false,
        };
        settings.save(&mut storage);
        assert_eq!(storage.get(INVERT_PDF_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(Settings::load(&storage, Settings::default()), settings);
    }

    #[test]
    fn test_malformed_value_falls_back_per_field() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_ZOOM_KEY, "huge").unwrap();
        storage.set(FLOATING_TOOLBARS_KEY, "false").unwrap();
        let settings = Settings::load(&storage, Settings::default());
        assert_eq!(settings.default_zoom, DEFAULT_ZOOM);
        assert!(!settings.floating_toolbars);
        assert!(settings.invert_pdf_in_dark_mode);
    }

    #[test]
    fn test_stored_zoom_is_clamped() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_ZOOM_KEY, "40").unwrap();
        assert_eq!(Settings::load(&storage, Settings::default()).default_zoom, MAX_ZOOM);
    }

    #[test]
    fn test_zoom_steps_do_not_drift() {
        let mut settings = Settings::default();
        settings.zoom_in();
        settings.zoom_in();
        assert_eq!(settings.default_zoom, 1.1);
        for _ in 0..20 {
            settings.zoom_out();
        }
        assert_eq!(settings.default_zoom, MIN_ZOOM);
    }
}
