//! PDF parsing collaborators.
//!
//! A [`PdfParser`] opens raw bytes into a session ([`PdfTextSource`]) that
//! exposes the page count and, per page, the ordered text runs the backend
//! produced. No positional layout reconstruction happens here.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::debug;

use crate::errors::PipelineError;

/// An open extraction session over one document. Dropping it releases the parsed document.
pub trait PdfTextSource {
    fn page_count(&self) -> usize;

    /// Text runs of the 1-based `page`, in the order the backend yields them.
    fn page_runs(&self, page: usize) -> Result<Vec<String>, PipelineError>;
}

/// Opens PDF bytes into an extraction session.
pub trait PdfParser: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfTextSource>, PipelineError>;
}

// ────────────────────────────────────────────────────────────────────────────
// lopdf backend
// ────────────────────────────────────────────────────────────────────────────

/// Primary backend: page-by-page extraction with `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfParser;

struct LopdfSession {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfParser for LopdfParser {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfTextSource>, PipelineError> {
        let document = Document::load_mem(bytes).map_err(|e| {
            let reason = e.to_string();
            if reason.contains("encrypt") || reason.contains("password") {
                PipelineError::ExtractionFailed("document is encrypted".to_string())
            } else {
                PipelineError::ExtractionFailed(format!("document cannot be opened: {reason}"))
            }
        })?;

        if document.is_encrypted() {
            return Err(PipelineError::ExtractionFailed(
                "document is encrypted".to_string(),
            ));
        }

        // get_pages is keyed by page number, so iteration is already 1..N.
        let page_numbers: Vec<u32> = document.get_pages().into_keys().collect();
        debug!(pages = page_numbers.len(), "lopdf session opened");

        Ok(Box::new(LopdfSession {
            document,
            page_numbers,
        }))
    }
}

impl PdfTextSource for LopdfSession {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_runs(&self, page: usize) -> Result<Vec<String>, PipelineError> {
        let number = page
            .checked_sub(1)
            .and_then(|i| self.page_numbers.get(i))
            .copied()
            .ok_or_else(|| PipelineError::ExtractionFailed(format!("page {page} not found")))?;

        let text = self.document.extract_text(&[number]).map_err(|e| {
            PipelineError::ExtractionFailed(format!("failed to read page {page}: {e}"))
        })?;

        Ok(split_runs(&text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// pdf-extract backend
// ────────────────────────────────────────────────────────────────────────────

/// Fallback backend built on `pdf-extract`, which resolves ToUnicode maps more
/// completely than lopdf. It has no page API; form feeds in its output are
/// treated as page breaks when present.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractParser;

struct PdfExtractSession {
    pages: Vec<Vec<String>>,
}

impl PdfParser for PdfExtractParser {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfTextSource>, PipelineError> {
        // pdf-extract panics on some malformed font programs.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                return Err(PipelineError::ExtractionFailed(format!(
                    "document cannot be opened: {e}"
                )))
            }
            Err(_) => {
                return Err(PipelineError::ExtractionFailed(
                    "pdf-extract aborted while parsing the document".to_string(),
                ))
            }
        };

        let pages = text
            .split('\u{c}')
            .map(split_runs)
            .collect::<Vec<_>>();
        debug!(pages = pages.len(), "pdf-extract session opened");

        Ok(Box::new(PdfExtractSession { pages }))
    }
}

impl PdfTextSource for PdfExtractSession {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_runs(&self, page: usize) -> Result<Vec<String>, PipelineError> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or_else(|| PipelineError::ExtractionFailed(format!("page {page} not found")))
    }
}

/// Both backends emit one line per text object; each line is a run.
fn split_runs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .map(String::from)
        .collect()
}
