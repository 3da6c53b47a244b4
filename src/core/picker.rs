//! # File Picker
//!
//! The picker is a host collaborator: the core awaits it once and gets back a
//! descriptor or nothing. `Ok(None)` is a user cancellation, not an error.
//!
//! [`PathPicker`] is the shipped implementation for desktop hosts. It turns a
//! filesystem path into a [`RecentFile`] with a `file://` URI and a MIME type
//! guessed from the extension.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::recents::RecentFile;

#[derive(Debug)]
pub enum PickerError {
    NotFound(PathBuf),
    NotAFile(PathBuf),
    Io(io::Error),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::NotFound(p) => write!(f, "no such file: {}", p.display()),
            PickerError::NotAFile(p) => write!(f, "not a regular file: {}", p.display()),
            PickerError::Io(e) => write!(f, "picker I/O error: {e}"),
        }
    }
}

impl std::error::Error for PickerError {}

#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick_file(&self) -> Result<Option<RecentFile>, PickerError>;
}

/// Picks whatever path it was constructed with. An empty path means "cancelled".
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn pick_file(&self) -> Result<Option<RecentFile>, PickerError> {
        if self.path.as_os_str().is_empty() {
            return Ok(None);
        }
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PickerError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(PickerError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(PickerError::NotAFile(self.path.clone()));
        }
        let absolute = tokio::fs::canonicalize(&self.path)
            .await
            .map_err(PickerError::Io)?;
        Ok(Some(describe(&absolute)))
    }
}

/// Build a descriptor for an absolute path.
pub fn describe(path: &Path) -> RecentFile {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let path_str = path.display().to_string();
    RecentFile::new(
        path_str.clone(),
        format!("file://{path_str}"),
        mime_type(path),
        name,
    )
}

/// MIME type from the file extension, `application/octet-stream` when unknown.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "epub" => "application/epub+zip",
        "djvu" => "image/vnd.djvu",
        "cbz" => "application/vnd.comicbook+zip",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_cancellation() {
        let picked = tokio_test::block_on(PathPicker::new("").pick_file()).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = tokio_test::block_on(PathPicker::new("/definitely/not/here.pdf").pick_file());
        assert!(matches!(result, Err(PickerError::NotFound(_))));
    }

    #[test]
    fn test_directory_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(PathPicker::new(tmp.path()).pick_file());
        assert!(matches!(result, Err(PickerError::NotAFile(_))));
    }

    #[test]
    fn test_picks_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file_path = tmp.path().join("Guide.PDF");
        std::fs::write(&file_path, b"%PDF-1.7").unwrap();

        let picked = tokio_test::block_on(PathPicker::new(&file_path).pick_file())
            .unwrap()
            .unwrap();
        assert_eq!(picked.name, "Guide.PDF");
        assert_eq!(picked.file_type, "application/pdf");
        assert!(picked.uri.starts_with("file://"));
        assert!(picked.path.ends_with("Guide.PDF"));
        assert_eq!(picked.last_opened, None);
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        assert_eq!(mime_type(Path::new("notes.xyz")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("README")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("book.epub")), "application/epub+zip");
    }
}
