//! # Recents Store
//!
//! The "recently opened" list: deduplicated by `path`, most recently used first,
//! persisted as a JSON array under a single storage key.
//!
//! ```text
//! create(a) → [a]
//! create(b) → [b, a]
//! create(a) → [a, b]      // moved to top, never duplicated
//! edit(a, page 5)         // merged in place, position kept
//! delete(b) → [a]
//! ```
//!
//! Every operation reloads the list from storage, mutates it, and writes it back.
//! Reads never fail: a missing key and a corrupt value both come back as an
//! empty list (logged). Writes are best-effort; failures are logged and dropped.

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::core::storage::KeyValueStore;

/// Storage key for the recents list.
pub const RECENTS_KEY: &str = "recentFiles";

/// One previously opened document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFile {
    /// Dedup key.
    pub path: String,
    pub uri: String,
    pub file_type: String,
    pub name: String,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "lastOpened", default, skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<i64>,
    #[serde(rename = "pageNumber", default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl RecentFile {
    pub fn new(
        path: impl Into<String>,
        uri: impl Into<String>,
        file_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            uri: uri.into(),
            file_type: file_type.into(),
            name: name.into(),
            last_opened: None,
            page_number: None,
        }
    }

    /// Merge the fields present in `patch`. The path is the match key and never changes.
    pub fn apply(&mut self, patch: &RecentFilePatch) {
        if let Some(uri) = &patch.uri {
            self.uri = uri.clone();
        }
        if let Some(file_type) = &patch.file_type {
            self.file_type = file_type.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(last_opened) = patch.last_opened {
            self.last_opened = Some(last_opened);
        }
        if let Some(page_number) = patch.page_number {
            self.page_number = Some(page_number);
        }
    }
}

/// Partial update for a [`RecentFile`], matched by `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFilePatch {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "lastOpened", default, skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<i64>,
    #[serde(rename = "pageNumber", default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl RecentFilePatch {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn page_number(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

}

/// Sole writer of the recents key.
#[derive(Debug, Clone)]
pub struct RecentsStore {
    key: String,
}

impl Default for RecentsStore {
    fn default() -> Self {
        Self::new(RECENTS_KEY)
    }
}

impl RecentsStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Read the persisted list. Absent or unreadable data yields an empty list.
    pub fn load_all(&self, storage: &dyn KeyValueStore) -> Vec<RecentFile> {
        let raw = match storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Failed to load recent files: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(recents) => recents,
            Err(e) => {
                error!("Failed to parse recent files: {}", e);
                Vec::new()
            }
        }
    }

    /// Insert `file` at the head, removing any existing entry with the same path.
    pub fn create(&self, storage: &mut dyn KeyValueStore, file: RecentFile) {
        let mut recents = self.load_all(storage);
        if let Some(index) = recents.iter().position(|f| f.path == file.path) {
            debug!("Moving {} to top of recents", file.path);
            recents.remove(index);
        }
        recents.insert(0, file);
        self.save(storage, &recents);
    }

    /// Merge `patch` into the matching entry in place. Unknown paths are ignored.
    pub fn edit(&self, storage: &mut dyn KeyValueStore, patch: &RecentFilePatch) {
        let mut recents = self.load_all(storage);
        match recents.iter_mut().find(|f| f.path == patch.path) {
            Some(entry) => {
                entry.apply(patch);
                self.save(storage, &recents);
            }
            None => debug!("No recents entry for {}, edit ignored", patch.path),
        }
    }

    pub fn delete(&self, storage: &mut dyn KeyValueStore, path: &str) {
        let mut recents = self.load_all(storage);
        recents.retain(|f| f.path != path);
        self.save(storage, &recents);
    }

    /// Drop the whole list ("clear history").
    pub fn clear(&self, storage: &mut dyn KeyValueStore) {
        if let Err(e) = storage.remove(&self.key) {
            warn!("Failed to clear recent files: {}", e);
        }
    }

    fn save(&self, storage: &mut dyn KeyValueStore, recents: &[RecentFile]) {
        let json = match serde_json::to_string(recents) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize recent files: {}", e);
                return;
            }
        };
        if let Err(e) = storage.set(&self.key, &json) {
            warn!("Failed to save recent files: {}", e);
        }
    }
}
