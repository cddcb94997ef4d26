use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{LanguageDetector, TextExtractor};
use crate::pipeline::Pipeline;
use crate::render::DocumentAssembler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Configured extractor, detector and assembler. Used from blocking tasks.
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let detector = LanguageDetector::default().with_min_matches(config.language_min_matches);
        let pipeline = Pipeline::new(TextExtractor::default(), detector, DocumentAssembler::default());
        AppState { config, pipeline: Arc::new(pipeline) }
    }
}
