//! Text extraction for report PDFs.

mod pdf;

#[cfg(any(test, feature = "test-util"))]
pub mod fixture;

use std::path::Path;

use digest_core::Document;
use thiserror::Error;

pub use pdf::extract_pages;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF file not found at {0}")]
    NotFound(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page of extracted text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    pub text: String,
}

/// Read a PDF from disk and join the text of its first `max_pages` pages
/// (all pages when `None`). The document's page count is always the file's
/// total page count.
pub fn read_pdf(path: &Path, max_pages: Option<usize>) -> Result<Document, ExtractionError> {
    if !path.exists() {
        return Err(ExtractionError::NotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let pages = extract_pages(&bytes)?;
    let page_count = pages.len();

    let limit = max_pages.unwrap_or(page_count).min(page_count);
    let text = join_pages(&pages[..limit]);

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(
        source = %source,
        total_pages = page_count,
        pages_read = limit,
        chars = text.len(),
        "PDF text extracted"
    );

    Ok(Document::new(source, text, page_count))
}

/// Concatenate page texts, one trailing newline per page.
pub fn join_pages(pages: &[PageContent]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page.text);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, text: &str) -> PageContent {
        PageContent {
            page_number: n,
            text: text.to_string(),
        }
    }

    #[test]
    fn join_pages_appends_newline_per_page() {
        let pages = vec![page(1, "First"), page(2, ""), page(3, "Third")];
        assert_eq!(join_pages(&pages), "First\n\nThird\n");
    }

    #[test]
    fn join_no_pages_is_empty() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_pdf(Path::new("/definitely/not/here.pdf"), None).unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        let err = read_pdf(&path, None).unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }

    #[test]
    fn blank_pages_are_counted_but_yield_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanned.pdf");
        std::fs::write(&path, fixture::blank_pdf(3)).unwrap();

        let doc = read_pdf(&path, None).unwrap();
        assert_eq!(doc.page_count, 3);
        assert!(doc.is_empty());

        let doc = read_pdf(&path, Some(1)).unwrap();
        assert_eq!(doc.page_count, 3);
    }
}
