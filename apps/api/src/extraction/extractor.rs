//! PDF bytes → normalized text.

use tracing::{debug, warn};

use crate::errors::PipelineError;
use crate::extraction::normalizer::normalize;
use crate::extraction::source::{LopdfParser, PdfExtractParser, PdfParser, PdfTextSource};

/// Separator placed between consecutive pages before normalization.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Drives a primary PDF backend and, when it yields no text, an optional fallback.
pub struct TextExtractor {
    primary: Box<dyn PdfParser>,
    fallback: Option<Box<dyn PdfParser>>,
}

impl Default for TextExtractor {
    /// lopdf first, pdf-extract when lopdf finds no text layer.
    fn default() -> Self {
        Self::new(Box::new(LopdfParser)).with_fallback(Box::new(PdfExtractParser))
    }
}

impl TextExtractor {
    pub fn new(primary: Box<dyn PdfParser>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn PdfParser>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Extracts and normalizes the text layer of a PDF.
    ///
    /// Fails when the document cannot be opened, has no pages, or has no
    /// extractable text once normalized. Once the primary backend has opened
    /// the document, an empty result or a page it cannot read hands over to
    /// the fallback.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String, PipelineError> {
        let primary_error = {
            let session = SessionGuard::open(self.primary.as_ref(), bytes)?;
            match read_pages(&session) {
                Ok(text) if !text.is_empty() => return Ok(text),
                Ok(_) => None,
                Err(e) => Some(e),
            }
        };

        if let Some(fallback) = &self.fallback {
            match &primary_error {
                Some(e) => warn!(
                    primary = self.primary.name(),
                    fallback = fallback.name(),
                    "primary backend failed mid-document ({e}), trying fallback"
                ),
                None => warn!(
                    primary = self.primary.name(),
                    fallback = fallback.name(),
                    "primary backend found no text, trying fallback"
                ),
            }
            match extract_with(fallback.as_ref(), bytes) {
                Ok(text) if !text.is_empty() => return Ok(text),
                Ok(_) => {}
                Err(e) => debug!("fallback extraction failed: {e}"),
            }
        }

        Err(primary_error.unwrap_or_else(|| {
            PipelineError::ExtractionFailed("document has no extractable text layer".to_string())
        }))
    }
}

/// Opens one session and reads it.
fn extract_with(parser: &dyn PdfParser, bytes: &[u8]) -> Result<String, PipelineError> {
    let session = SessionGuard::open(parser, bytes)?;
    read_pages(&session)
}

/// Reads every page in order and normalizes.
/// Returns an empty string when the document opened but held no text.
fn read_pages(session: &SessionGuard) -> Result<String, PipelineError> {
    let page_count = session.page_count();
    if page_count == 0 {
        return Err(PipelineError::ExtractionFailed(
            "document has no pages".to_string(),
        ));
    }

    let mut pages = Vec::with_capacity(page_count);
    for page in 1..=page_count {
        let runs = session.page_runs(page)?;
        debug!(backend = session.backend, page, runs = runs.len(), "page extracted");
        pages.push(runs.join(" "));
    }

    Ok(normalize(&pages.join(PAGE_SEPARATOR)))
}

/// Holds an extraction session for the duration of one read and releases it
/// on every exit path.
struct SessionGuard {
    backend: &'static str,
    source: Box<dyn PdfTextSource>,
}

impl SessionGuard {
    fn open(parser: &dyn PdfParser, bytes: &[u8]) -> Result<Self, PipelineError> {
        Ok(Self {
            backend: parser.name(),
            source: parser.open(bytes)?,
        })
    }
}

impl std::ops::Deref for SessionGuard {
    type Target = dyn PdfTextSource;

    fn deref(&self) -> &Self::Target {
        self.source.as_ref()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!(backend = self.backend, "extraction session released");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::extraction::test_pdf::pdf_with_pages;

    /// In-memory backend that counts open and released sessions.
    struct FakeParser {
        pages: Vec<Vec<String>>,
        fail_page: Option<usize>,
        live: Arc<AtomicUsize>,
    }

    struct FakeSession {
        pages: Vec<Vec<String>>,
        fail_page: Option<usize>,
        live: Arc<AtomicUsize>,
    }

    impl FakeParser {
        fn new(pages: &[&[&str]]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|p| p.iter().map(|s| s.to_string()).collect())
                    .collect(),
                fail_page: None,
                live: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl PdfParser for FakeParser {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PdfTextSource>, PipelineError> {
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSession {
                pages: self.pages.clone(),
                fail_page: self.fail_page,
                live: Arc::clone(&self.live),
            }))
        }
    }

    impl PdfTextSource for FakeSession {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_runs(&self, page: usize) -> Result<Vec<String>, PipelineError> {
            if self.fail_page == Some(page) {
                return Err(PipelineError::ExtractionFailed("corrupt page".into()));
            }
            Ok(self.pages[page - 1].clone())
        }
    }

    impl Drop for FakeSession {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_pages_keep_order() {
        let bytes = pdf_with_pages(&[&["A"], &["B"], &["C"]]);
        let text = TextExtractor::default().extract_text(&bytes).unwrap();
        let a = text.find('A').unwrap();
        let b = text.find('B').unwrap();
        let c = text.find('C').unwrap();
        assert!(a < b && b < c, "got {text:?}");
    }

    #[test]
    fn test_runs_joined_with_single_space() {
        let parser = FakeParser::new(&[&["Jane", "Roe"]]);
        let text = TextExtractor::new(Box::new(parser)).extract_text(b"").unwrap();
        assert_eq!(text, "Jane Roe");
    }

    #[test]
    fn test_page_boundaries_survive_as_line_breaks() {
        let parser = FakeParser::new(&[&["Page one"], &["Page two"]]);
        let text = TextExtractor::new(Box::new(parser)).extract_text(b"").unwrap();
        assert_eq!(text, "Page one\nPage two");
    }

    #[test]
    fn test_output_is_normalized() {
        let parser = FakeParser::new(&[&["Contact", "jane @ example.com", "Educaci ón"]]);
        let text = TextExtractor::new(Box::new(parser)).extract_text(b"").unwrap();
        assert_eq!(text, "Contact jane@example.com Educación");
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let err = TextExtractor::default()
            .extract_text(b"this is not a pdf at all")
            .unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionFailed(_)));
    }

    #[test]
    fn test_zero_pages_fail() {
        let parser = FakeParser::new(&[]);
        let err = TextExtractor::new(Box::new(parser))
            .extract_text(b"")
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::ExtractionFailed("document has no pages".into())
        );
    }

    #[test]
    fn test_whitespace_only_text_fails() {
        let parser = FakeParser::new(&[&["   "], &[]]);
        let err = TextExtractor::new(Box::new(parser))
            .extract_text(b"")
            .unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionFailed(_)));
    }

    #[test]
    fn test_pdf_without_text_layer_fails() {
        let bytes = pdf_with_pages(&[&[], &[]]);
        let err = TextExtractor::default().extract_text(&bytes).unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionFailed(_)));
    }

    #[test]
    fn test_fallback_used_when_primary_is_empty() {
        let primary = FakeParser::new(&[&[" "]]);
        let fallback = FakeParser::new(&[&["Recovered text"]]);
        let extractor = TextExtractor::new(Box::new(primary)).with_fallback(Box::new(fallback));
        assert_eq!(extractor.extract_text(b"").unwrap(), "Recovered text");
    }

    #[test]
    fn test_fallback_used_when_primary_fails_on_a_page() {
        let mut primary = FakeParser::new(&[&["one"], &["two"]]);
        primary.fail_page = Some(2);
        let live = Arc::clone(&primary.live);
        let fallback = FakeParser::new(&[&["Recovered text"]]);
        let extractor = TextExtractor::new(Box::new(primary)).with_fallback(Box::new(fallback));
        assert_eq!(extractor.extract_text(b"").unwrap(), "Recovered text");
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_page_error_reported_when_fallback_also_fails() {
        let mut primary = FakeParser::new(&[&["one"]]);
        primary.fail_page = Some(1);
        let fallback = FakeParser::new(&[&["  "]]);
        let err = TextExtractor::new(Box::new(primary))
            .with_fallback(Box::new(fallback))
            .extract_text(b"")
            .unwrap_err();
        assert_eq!(err, PipelineError::ExtractionFailed("corrupt page".into()));
    }

    #[test]
    fn test_session_released_on_success_and_failure() {
        let ok = FakeParser::new(&[&["text"]]);
        let live_ok = Arc::clone(&ok.live);
        TextExtractor::new(Box::new(ok)).extract_text(b"").unwrap();
        assert_eq!(live_ok.load(Ordering::SeqCst), 0);

        let mut failing = FakeParser::new(&[&["one"], &["two"]]);
        failing.fail_page = Some(2);
        let live_err = Arc::clone(&failing.live);
        let result = TextExtractor::new(Box::new(failing)).extract_text(b"");
        assert!(result.is_err());
        assert_eq!(live_err.load(Ordering::SeqCst), 0);
    }
}
