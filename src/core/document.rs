//! # Document Loading
//!
//! Stands in for the platform renderer's "document loaded" callback: reads
//! the page count of an opened file so the app can emit `PdfLoaded`.
//! Parsing runs on tokio's blocking pool.

use std::fmt;
use std::path::Path;

use log::debug;

use crate::core::picker::mime_type;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug)]
pub enum DocumentError {
    Pdf(lopdf::Error),
    Task(tokio::task::JoinError),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Pdf(e) => write!(f, "PDF error: {e}"),
            DocumentError::Task(e) => write!(f, "document task failed: {e}"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Number of pages in the document at `path`. Formats without pages report 0.
pub async fn page_count(path: &Path) -> Result<u32, DocumentError> {
    if mime_type(path) != PDF_MIME {
        debug!("No page model for {}", path.display());
        return Ok(0);
    }
    let owned = path.to_path_buf();
    let pages = tokio::task::spawn_blocking(move || {
        lopdf::Document::load(&owned).map(|doc| doc.get_pages().len())
    })
    .await
    .map_err(DocumentError::Task)?
    .map_err(DocumentError::Pdf)?;
    debug!("{} has {} pages", path.display(), pages);
    Ok(u32::try_from(pages).unwrap_or(u32::MAX))
}
