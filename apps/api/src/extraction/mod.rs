// Document reconstruction, input half: PDF bytes → normalized text → language tag.
// Everything here is synchronous and CPU-bound; async hosts call it via spawn_blocking.

pub mod extractor;
pub mod language;
pub mod normalizer;
pub mod source;

#[cfg(test)]
pub(crate) mod test_pdf;

pub use extractor::TextExtractor;
pub use language::{detect_language, LanguageDetector};
pub use normalizer::normalize;
