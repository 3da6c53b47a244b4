//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::app::App;
use crate::core::picker::{FilePicker, PickerError};
use crate::core::recents::RecentFile;
use crate::core::settings::Settings;
use crate::core::storage::MemoryStorage;

/// A PDF descriptor whose fields are all derived from `path`.
pub fn sample_file(path: &str) -> RecentFile {
    RecentFile::new(
        path,
        format!("file://{path}"),
        "application/pdf",
        format!("{path}.pdf"),
    )
}

/// Creates an App over empty in-memory storage with a fixed clock.
pub fn test_app() -> App {
    App::new(Box::new(MemoryStorage::new()), Settings::default()).with_clock(|| 1_000)
}

/// Always picks the same file.
pub struct FixedPicker(pub RecentFile);

#[async_trait]
impl FilePicker for FixedPicker {
    async fn pick_file(&self) -> Result<Option<RecentFile>, PickerError> {
        Ok(Some(self.0.clone()))
    }
}

/// The user dismisses the picker.
pub struct CancelPicker;

#[async_trait]
impl FilePicker for CancelPicker {
    async fn pick_file(&self) -> Result<Option<RecentFile>, PickerError> {
        Ok(None)
    }
}

/// The platform picker blows up.
pub struct FailingPicker;

#[async_trait]
impl FilePicker for FailingPicker {
    async fn pick_file(&self) -> Result<Option<RecentFile>, PickerError> {
        Err(PickerError::Io(std::io::Error::other("picker crashed")))
    }
}
