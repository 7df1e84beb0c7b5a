//! Text Extractor
//!
//! Flattens a PDF into page-ordered plain text. Nothing about columns or
//! tables survives; downstream parsing works on the text alone.

use thiserror::Error;

use backend::{LopdfBackend, PdfBackend};

pub mod backend;
pub mod text;
pub mod types;

pub use types::*;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract the text of every page of a PDF held in memory.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    Ok(extract_with_backend(&backend))
}

/// Read a PDF from disk and extract its text.
pub fn extract_text_from_path(path: &std::path::Path) -> Result<ExtractedText, PdfError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

/// Walk the pages of a backend in page order.
///
/// A page whose text cannot be extracted is recorded in
/// [`ExtractedText::failed_pages`] instead of failing the document.
pub fn extract_with_backend<B: PdfBackend>(backend: &B) -> ExtractedText {
    let mut extracted = ExtractedText::default();

    for &number in backend.pages().keys() {
        match backend.page_text(number) {
            Ok(raw) => extracted.pages.push(PageText {
                number,
                text: text::normalize_page_text(&raw),
            }),
            Err(_) => extracted.failed_pages.push(number),
        }
    }

    extracted
}
