use std::path::Path;

use thiserror::Error;

use crate::Page;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF layout parsers.
///
/// Implementors turn a PDF file into positioned words, one [`Page`] per PDF
/// page; the text reconstruction that follows lives in [`crate::layout`].
pub trait PdfBackend: Send + Sync {
    /// Extract the words of every page, in reading order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, BackendError>;
}
