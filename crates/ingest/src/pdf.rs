use std::panic::{self, AssertUnwindSafe};

use super::{ExtractionError, PageContent};

/// Extract every page of a PDF, blank pages included, so the result length
/// is the document's page count.
///
/// `pdf_extract` panics on some malformed input; those panics are reported
/// as extraction errors.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let raw_pages = match result {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(ExtractionError::PdfError(e.to_string())),
        Err(_) => {
            return Err(ExtractionError::PdfError(
                "extraction panicked (malformed document)".to_string(),
            ))
        }
    };

    let pages: Vec<PageContent> = raw_pages
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageContent {
            page_number: i + 1,
            text: text.trim().to_string(),
        })
        .collect();

    let blank = pages.iter().filter(|p| p.text.is_empty()).count();
    if blank > 0 {
        tracing::warn!(blank, total = pages.len(), "PDF pages without extractable text");
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_error() {
        assert!(matches!(extract_pages(b""), Err(ExtractionError::PdfError(_))));
    }
}
