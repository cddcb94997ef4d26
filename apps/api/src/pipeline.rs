//! In-process library surface: extract, detect, render.
//!
//! The free functions use default collaborators. [`Pipeline`] bundles
//! configured instances for hosts that need a non-default threshold or backend.

use tracing::{debug, warn};

use crate::errors::PipelineError;
use crate::extraction::{LanguageDetector, TextExtractor};
use crate::models::{Language, StructuredCv};
use crate::render::DocumentAssembler;
use crate::templates::{self, TemplateDescriptor, TemplateId};

/// Bytes produced by a render, tagged with the template that actually produced them.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub template: TemplateId,
}

#[derive(Default)]
pub struct Pipeline {
    extractor: TextExtractor,
    detector: LanguageDetector,
    assembler: DocumentAssembler,
}

impl Pipeline {
    pub fn new(extractor: TextExtractor, detector: LanguageDetector, assembler: DocumentAssembler) -> Self {
        Self { extractor, detector, assembler }
    }

    pub fn extract_text(&self, bytes: &[u8]) -> Result<String, PipelineError> {
        self.extractor.extract_text(bytes)
    }

    pub fn detect_language(&self, text: &str) -> Language {
        self.detector.detect(text)
    }

    /// Renders with the template registered under `template_id` (modern when unknown).
    pub fn render(
        &self,
        cv: &StructuredCv,
        keywords: &[String],
        template_id: &str,
        language: Option<Language>,
    ) -> Result<Vec<u8>, PipelineError> {
        self.render_descriptor(templates::resolve(template_id), cv, keywords, language)
    }

    /// Like [`Pipeline::render`], but a `RenderFailed` from any template other
    /// than modern is retried once with modern.
    pub fn render_with_fallback(
        &self,
        cv: &StructuredCv,
        keywords: &[String],
        template_id: &str,
        language: Option<Language>,
    ) -> Result<RenderedDocument, PipelineError> {
        with_modern_fallback(templates::resolve(template_id), |descriptor| {
            self.render_descriptor(descriptor, cv, keywords, language)
        })
    }

    fn render_descriptor(
        &self,
        descriptor: &TemplateDescriptor,
        cv: &StructuredCv,
        keywords: &[String],
        language: Option<Language>,
    ) -> Result<Vec<u8>, PipelineError> {
        let document = descriptor.render(cv, keywords, language);
        let bytes = self.assembler.render(&document)?;
        debug!(template = %descriptor.id, bytes = bytes.len(), "render complete");
        Ok(bytes)
    }
}

fn with_modern_fallback<F>(
    descriptor: &'static TemplateDescriptor,
    mut render: F,
) -> Result<RenderedDocument, PipelineError>
where
    F: FnMut(&'static TemplateDescriptor) -> Result<Vec<u8>, PipelineError>,
{
    match render(descriptor) {
        Ok(bytes) => Ok(RenderedDocument { bytes, template: descriptor.id }),
        Err(PipelineError::RenderFailed(reason)) if descriptor.id != TemplateId::Modern => {
            warn!(template = %descriptor.id, %reason, "render failed, retrying with modern");
            let modern = templates::get(TemplateId::Modern);
            let bytes = render(modern)?;
            Ok(RenderedDocument { bytes, template: TemplateId::Modern })
        }
        Err(e) => Err(e),
    }
}

/// Extracts and normalizes the text of a PDF with the default backends.
pub fn extract_text(bytes: &[u8]) -> Result<String, PipelineError> {
    TextExtractor::default().extract_text(bytes)
}

/// Tags text with a language using the default threshold and priority.
pub fn detect_language(text: &str) -> Language {
    crate::extraction::detect_language(text)
}

/// Renders `cv` with the template registered under `template_id`.
pub fn render(
    cv: &StructuredCv,
    keywords: &[String],
    template_id: &str,
    language: Option<Language>,
) -> Result<Vec<u8>, PipelineError> {
    Pipeline::default().render(cv, keywords, template_id, language)
}

/// [`render`] with the single modern-template retry on `RenderFailed`.
pub fn render_with_fallback(
    cv: &StructuredCv,
    keywords: &[String],
    template_id: &str,
    language: Option<Language>,
) -> Result<RenderedDocument, PipelineError> {
    Pipeline::default().render_with_fallback(cv, keywords, template_id, language)
}
